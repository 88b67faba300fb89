//! Background monitoring lifecycle: start and cooperative stop.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::poller::ChangeMonitor;
use crate::api::{ChargerId, StatusClient};
use crate::time::Clock;

/// Error type for stopping the background monitor.
#[derive(Debug, Error)]
pub enum StopError {
    /// The polling task panicked or was aborted externally.
    #[error("Monitor task did not shut down cleanly: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Handle to a running background monitor.
///
/// Returned by [`ChangeMonitor::start`]. Holds the spawned task and the
/// stop signal; [`MonitorHandle::stop`] requests shutdown and waits for
/// the task to exit, so no polling activity survives it.
///
/// Dropping the handle without calling `stop()` also signals the loop to
/// terminate (the stop channel closes), but without waiting for it.
pub struct MonitorHandle<C, K> {
    stop: watch::Sender<bool>,
    task: JoinHandle<ChangeMonitor<C, K>>,
}

impl<C, K> ChangeMonitor<C, K>
where
    C: StatusClient + Send + 'static,
    K: Clock + Send + 'static,
{
    /// Starts continuous monitoring of a set of chargers.
    ///
    /// Spawns one background task that sweeps the whole set immediately,
    /// then sleeps `interval` (stretched by the backoff policy while
    /// throttled) between sweeps. Within a sweep chargers are polled
    /// sequentially, so per-charger notifications follow poll order.
    ///
    /// The stop flag is checked between sweeps, never mid-sweep: an
    /// in-flight sweep always finishes before the loop exits.
    #[must_use]
    pub fn start(self, chargers: Vec<ChargerId>, interval: Duration) -> MonitorHandle<C, K> {
        let (stop, mut stop_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut monitor = self;
            let mut throttled_streak: u32 = 0;

            tracing::info!(
                chargers = chargers.len(),
                interval_ms = interval.as_millis(),
                "monitoring started"
            );

            loop {
                let report = monitor.sweep(&chargers).await;

                throttled_streak = if report.throttled {
                    throttled_streak + 1
                } else {
                    0
                };
                let delay = monitor.backoff().stretched(interval, throttled_streak);
                if throttled_streak > 0 {
                    tracing::warn!(
                        delay_ms = delay.as_millis(),
                        "sweep was throttled, backing off"
                    );
                }

                tokio::select! {
                    biased;

                    // Stop requested, or the handle was dropped.
                    _ = stop_rx.changed() => break,

                    () = tokio::time::sleep(delay) => {}
                }
            }

            tracing::info!("monitoring stopped");
            monitor
        });

        MonitorHandle { stop, task }
    }
}

impl<C, K> MonitorHandle<C, K> {
    /// Stops the background loop and waits for it to exit.
    ///
    /// The current sweep, if one is in flight, runs to completion; no new
    /// poll starts after this returns. The monitor is handed back with its
    /// last-seen state intact, so monitoring can be resumed later.
    ///
    /// # Errors
    ///
    /// Returns [`StopError`] if the polling task panicked.
    pub async fn stop(self) -> Result<ChangeMonitor<C, K>, StopError> {
        // Ignore send errors: the task exiting early already closed the channel.
        let _ = self.stop.send(true);
        Ok(self.task.await?)
    }

    /// Returns true if the background task has already exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
