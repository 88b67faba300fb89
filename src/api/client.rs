//! Status client trait.

use std::collections::HashMap;

use super::{ApiError, ChargerId, ControlOutcome, ControlRequest, StatusRecord, StatusUpdate};

/// Trait for single round-trip calls against the charging API.
///
/// Every method performs exactly one request/response exchange and surfaces
/// a classified [`ApiError`] on failure. No method retries internally;
/// retries and backoff are the caller's responsibility.
///
/// # Design
///
/// The monitor depends on this trait rather than a concrete client, so
/// tests can drive it with scripted responses. The production
/// implementation is [`super::RestClient`].
pub trait StatusClient: Send + Sync {
    /// Fetches the current status of one charger.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown charger,
    /// [`ApiError::Auth`] for a rejected API key, [`ApiError::RateLimited`]
    /// when throttled, and [`ApiError::Transport`] /
    /// [`ApiError::UnexpectedStatus`] / [`ApiError::Decode`] otherwise.
    fn fetch_status(
        &self,
        charger: &ChargerId,
    ) -> impl std::future::Future<Output = Result<StatusRecord, ApiError>> + Send;

    /// Fetches the status of every charger known to the service,
    /// keyed by charger identifier, in a single round trip.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`StatusClient::fetch_status`], minus
    /// `NotFound` (there is no single target).
    fn fetch_batch_status(
        &self,
    ) -> impl std::future::Future<Output = Result<HashMap<ChargerId, StatusRecord>, ApiError>> + Send;

    /// Reports a new status for one charger and returns the record the
    /// service stored.
    ///
    /// Idempotence is owned by the service; this crate makes no claim.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`StatusClient::fetch_status`].
    fn update_status(
        &self,
        charger: &ChargerId,
        update: &StatusUpdate,
    ) -> impl std::future::Future<Output = Result<StatusRecord, ApiError>> + Send;

    /// Issues a remote on/off command.
    ///
    /// The returned [`ControlOutcome`] is the service's synchronous
    /// acknowledgment, not the charger's eventual physical state.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`StatusClient::fetch_status`].
    fn control_charger(
        &self,
        charger: &ChargerId,
        request: &ControlRequest,
    ) -> impl std::future::Future<Output = Result<ControlOutcome, ApiError>> + Send;
}
