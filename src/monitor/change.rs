//! Status transition detection types and functions.

use std::time::SystemTime;

use crate::api::{ChargerId, StatusRecord};

/// A status transition observed between two consecutive successful polls
/// of the same charger.
///
/// Carries both the new and the previous record so subscribers can see
/// what changed. Transitions for one charger are delivered in poll order;
/// no ordering is guaranteed across chargers.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    /// Charger whose status changed.
    pub charger: ChargerId,
    /// Record from the poll that observed the change.
    pub new: StatusRecord,
    /// Record from the previous successful poll.
    pub old: StatusRecord,
    /// When the change was observed.
    pub timestamp: SystemTime,
}

impl StatusChange {
    /// Creates a new status change event.
    #[must_use]
    pub fn new(
        charger: ChargerId,
        new: StatusRecord,
        old: StatusRecord,
        timestamp: SystemTime,
    ) -> Self {
        Self {
            charger,
            new,
            old,
            timestamp,
        }
    }
}

/// Returns true if two consecutive records constitute a transition.
///
/// Only the `status` field matters; other fields (name, location, update
/// time) may churn without triggering a notification.
#[must_use]
pub fn is_transition(old: &StatusRecord, new: &StatusRecord) -> bool {
    old.status != new.status
}

#[cfg(test)]
#[path = "change_tests.rs"]
mod tests;
