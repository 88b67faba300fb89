//! Shared mock status client for monitor tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::api::{
    ApiError, ChargerId, ControlOutcome, ControlRequest, StatusClient, StatusRecord, StatusUpdate,
};

/// Mock status client returning scripted per-charger results and
/// recording every poll.
///
/// Clones share the same script and call log, so a test can hand one
/// clone to the monitor and inspect the other.
#[derive(Clone, Default)]
pub(crate) struct MockClient {
    inner: Arc<MockInner>,
}

#[derive(Default)]
struct MockInner {
    scripts: Mutex<HashMap<ChargerId, VecDeque<Result<StatusRecord, ApiError>>>>,
    calls: Mutex<Vec<ChargerId>>,
}

impl MockClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Scripts raw results for one charger, consumed in order.
    pub(crate) fn script(&self, charger: &str, results: Vec<Result<StatusRecord, ApiError>>) {
        self.inner
            .scripts
            .lock()
            .unwrap()
            .insert(ChargerId::new(charger), results.into());
    }

    /// Scripts a sequence of successful polls with the given statuses.
    pub(crate) fn script_statuses(&self, charger: &str, statuses: &[&str]) {
        let results = statuses
            .iter()
            .map(|status| Ok(StatusRecord::new(charger, *status)))
            .collect();
        self.script(charger, results);
    }

    /// Every poll recorded so far, in call order.
    pub(crate) fn calls(&self) -> Vec<ChargerId> {
        self.inner.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.inner.calls.lock().unwrap().len()
    }
}

impl StatusClient for MockClient {
    async fn fetch_status(&self, charger: &ChargerId) -> Result<StatusRecord, ApiError> {
        self.inner.calls.lock().unwrap().push(charger.clone());
        self.inner
            .scripts
            .lock()
            .unwrap()
            .get_mut(charger)
            .and_then(VecDeque::pop_front)
            // Exhausted scripts keep polling successfully without transitions.
            .unwrap_or_else(|| Ok(StatusRecord::new(charger.clone(), "EXHAUSTED")))
    }

    async fn fetch_batch_status(&self) -> Result<HashMap<ChargerId, StatusRecord>, ApiError> {
        unimplemented!("not exercised by monitor tests")
    }

    async fn update_status(
        &self,
        _charger: &ChargerId,
        _update: &StatusUpdate,
    ) -> Result<StatusRecord, ApiError> {
        unimplemented!("not exercised by monitor tests")
    }

    async fn control_charger(
        &self,
        _charger: &ChargerId,
        _request: &ControlRequest,
    ) -> Result<ControlOutcome, ApiError> {
        unimplemented!("not exercised by monitor tests")
    }
}
