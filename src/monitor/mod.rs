//! Monitor layer for detecting charger status transitions.
//!
//! This module provides:
//! - Change events and transition detection ([`StatusChange`], [`is_transition`])
//! - The polling monitor ([`ChangeMonitor`], [`SweepReport`])
//! - Background lifecycle control ([`MonitorHandle`], [`StopError`])
//! - Throttling backoff ([`BackoffPolicy`])

mod backoff;
mod change;
mod handle;
mod poller;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use backoff::BackoffPolicy;
pub use change::{StatusChange, is_transition};
pub use handle::{MonitorHandle, StopError};
pub use poller::{ChangeMonitor, SweepReport};
