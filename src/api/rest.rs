//! REST implementation of [`StatusClient`].

use std::collections::HashMap;

use http::header::CONTENT_TYPE;
use http::{HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::{
    ApiError, ChargerId, ControlOutcome, ControlRequest, StatusClient, StatusRecord, StatusUpdate,
};
use crate::http::{HttpClient, HttpError, HttpRequest};

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Production client for the charging API.
///
/// Builds endpoint URLs under a base URL, attaches the `x-api-key` header,
/// encodes request bodies as JSON, and classifies non-2xx responses into
/// [`ApiError`] variants. Timeouts come from the underlying [`HttpClient`].
///
/// # Example
///
/// ```no_run
/// use charger_watch::api::{RestClient, StatusClient, ChargerId};
/// use charger_watch::http::ReqwestClient;
/// use http::HeaderValue;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RestClient::new(
///     ReqwestClient::new(),
///     Url::parse("https://api.evcharging.abc.com/api/v1")?,
///     HeaderValue::from_str("your-api-key")?,
/// );
/// let status = client.fetch_status(&ChargerId::new("CHARGER_001")).await?;
/// println!("{}", status.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RestClient<H> {
    http: H,
    base_url: Url,
    api_key: HeaderValue,
}

impl<H> RestClient<H> {
    /// Creates a client for the service at `base_url`.
    ///
    /// `base_url` is the versioned API root (for example
    /// `https://api.evcharging.abc.com/api/v1`); endpoint paths are
    /// appended beneath it.
    #[must_use]
    pub const fn new(http: H, base_url: Url, api_key: HeaderValue) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    /// Returns the configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds an endpoint URL from path segments under the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::Transport(HttpError::InvalidUrl(format!(
                    "base URL '{}' cannot have a path",
                    self.base_url
                )))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl<H: HttpClient> RestClient<H> {
    /// Builds a request with the API key and JSON content type attached.
    fn request(&self, method: http::Method, url: Url) -> HttpRequest {
        HttpRequest::new(method, url)
            .with_header(API_KEY_HEADER, self.api_key.clone())
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }

    /// Sends a request and decodes a JSON response.
    ///
    /// `charger` is the request's target, used to classify a 404.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        charger: Option<&ChargerId>,
    ) -> Result<T, ApiError> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let response = self.http.request(request).await?;

        if !response.is_success() {
            let body = response.body_text().map(ToString::to_string);
            return Err(ApiError::from_status(response.status, body, charger));
        }

        tracing::debug!(status = %response.status, "response successful");
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Serializes a JSON body onto a request.
    fn with_json_body(
        request: HttpRequest,
        body: &impl Serialize,
    ) -> Result<HttpRequest, ApiError> {
        let encoded = serde_json::to_vec(body)?;
        Ok(request.with_body(encoded))
    }
}

impl<H: HttpClient> StatusClient for RestClient<H> {
    async fn fetch_status(&self, charger: &ChargerId) -> Result<StatusRecord, ApiError> {
        let url = self.endpoint(&["chargers", charger.as_str(), "status"])?;
        let request = self.request(http::Method::GET, url);
        self.send_json(request, Some(charger)).await
    }

    async fn fetch_batch_status(&self) -> Result<HashMap<ChargerId, StatusRecord>, ApiError> {
        let url = self.endpoint(&["chargers", "batch", "status"])?;
        let request = self.request(http::Method::GET, url);

        // The service returns a flat list; key it by charger id for callers.
        let records: Vec<StatusRecord> = self.send_json(request, None).await?;
        Ok(records
            .into_iter()
            .map(|record| (record.charger_id.clone(), record))
            .collect())
    }

    async fn update_status(
        &self,
        charger: &ChargerId,
        update: &StatusUpdate,
    ) -> Result<StatusRecord, ApiError> {
        let url = self.endpoint(&["chargers", charger.as_str(), "status"])?;
        let request = Self::with_json_body(self.request(http::Method::PUT, url), update)?;
        self.send_json(request, Some(charger)).await
    }

    async fn control_charger(
        &self,
        charger: &ChargerId,
        control: &ControlRequest,
    ) -> Result<ControlOutcome, ApiError> {
        let url = self.endpoint(&["chargers", charger.as_str(), "control"])?;
        let request = Self::with_json_body(self.request(http::Method::POST, url), control)?;
        self.send_json(request, Some(charger)).await
    }
}
