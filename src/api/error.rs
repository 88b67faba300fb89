//! Error taxonomy for charging API calls.

use thiserror::Error;

use super::ChargerId;
use crate::http::HttpError;

/// Error type for single-shot API calls.
///
/// One-shot calls always surface these to the caller; the monitor loop
/// catches them, logs, and keeps going. [`ApiError::is_transient`] tells
/// callers which failures are worth retrying or backing off on.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API key was missing or rejected (401/403).
    ///
    /// Not transient; retrying with the same credential will not help.
    #[error("API key rejected by the service")]
    Auth,

    /// The charger is unknown to the service (404).
    #[error("Charger '{charger}' not found")]
    NotFound {
        /// Identifier the service did not recognize.
        charger: ChargerId,
    },

    /// The service throttled the request (429).
    ///
    /// Callers should back off rather than treat this as fatal.
    #[error("Request throttled by the service")]
    RateLimited,

    /// Network-level failure: connection error or timeout.
    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    /// The service returned an unexpected non-2xx status.
    #[error("Unexpected status {status}: {}", .body.as_deref().unwrap_or("<no body>"))]
    UnexpectedStatus {
        /// Status code the service returned.
        status: http::StatusCode,
        /// Response body, when it was valid UTF-8.
        body: Option<String>,
    },

    /// A 2xx response body could not be decoded.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Classifies a non-2xx response into an error variant.
    ///
    /// `charger` is the identifier the request targeted, when it targeted
    /// one; a 404 without a target stays [`ApiError::UnexpectedStatus`].
    #[must_use]
    pub fn from_status(
        status: http::StatusCode,
        body: Option<String>,
        charger: Option<&ChargerId>,
    ) -> Self {
        match status {
            http::StatusCode::UNAUTHORIZED | http::StatusCode::FORBIDDEN => Self::Auth,
            http::StatusCode::NOT_FOUND => charger.map_or(
                Self::UnexpectedStatus { status, body },
                |charger| Self::NotFound {
                    charger: charger.clone(),
                },
            ),
            http::StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            _ => Self::UnexpectedStatus { status, body },
        }
    }

    /// Returns true if the failure is potentially transient.
    ///
    /// Transient failures: network errors, timeouts, throttling, server
    /// errors (5xx), and undecodable bodies. Auth failures, unknown
    /// chargers, and other 4xx statuses are not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) | Self::RateLimited | Self::Decode(_) => true,
            Self::UnexpectedStatus { status, .. } => status.is_server_error(),
            Self::Auth | Self::NotFound { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn classifies_auth_statuses() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, None, None),
            ApiError::Auth
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, None, None),
            ApiError::Auth
        ));
    }

    #[test]
    fn classifies_not_found_with_target() {
        let charger = ChargerId::new("CHARGER_001");
        let error = ApiError::from_status(StatusCode::NOT_FOUND, None, Some(&charger));

        assert!(matches!(error, ApiError::NotFound { .. }));
        assert!(error.to_string().contains("CHARGER_001"));
    }

    #[test]
    fn not_found_without_target_is_unexpected() {
        let error = ApiError::from_status(StatusCode::NOT_FOUND, None, None);

        assert!(matches!(error, ApiError::UnexpectedStatus { .. }));
    }

    #[test]
    fn classifies_rate_limit() {
        assert!(matches!(
            ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, None, None),
            ApiError::RateLimited
        ));
    }

    #[test]
    fn server_errors_are_transient() {
        let error = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, None, None);
        assert!(error.is_transient());
    }

    #[test]
    fn auth_and_not_found_are_not_transient() {
        let charger = ChargerId::new("CHARGER_001");

        assert!(!ApiError::Auth.is_transient());
        assert!(!ApiError::NotFound { charger }.is_transient());
    }

    #[test]
    fn transport_and_rate_limit_are_transient() {
        assert!(ApiError::Transport(HttpError::Timeout).is_transient());
        assert!(ApiError::RateLimited.is_transient());
    }

    #[test]
    fn unexpected_status_displays_body() {
        let error = ApiError::UnexpectedStatus {
            status: StatusCode::BAD_REQUEST,
            body: Some("operation not allowed".to_string()),
        };

        assert!(error.to_string().contains("400"));
        assert!(error.to_string().contains("operation not allowed"));
    }
}
