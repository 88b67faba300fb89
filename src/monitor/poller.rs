//! Polling change monitor.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use super::backoff::BackoffPolicy;
use super::change::{StatusChange, is_transition};
use crate::api::{ApiError, ChargerId, StatusClient, StatusRecord};
use crate::time::{Clock, SystemClock};

/// A registered change subscriber.
type Subscriber = Box<dyn Fn(&StatusChange) + Send + Sync>;

/// What one sweep over the monitored set observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepReport {
    /// Chargers polled in this sweep.
    pub polled: usize,
    /// Polls that failed (state left untouched for those chargers).
    pub failed: usize,
    /// Transitions detected and delivered to subscribers.
    pub changes: usize,
    /// Whether any poll came back rate-limited.
    pub throttled: bool,
}

/// Polling-based status-change monitor.
///
/// Owns the last-seen record for every charger it has successfully polled
/// and compares each new poll against it. When the `status` field differs,
/// every subscriber is invoked exactly once with the `(new, old)` pair, in
/// registration order. The first successful poll of a charger only seeds
/// the table; there is nothing to compare against, so nothing fires.
///
/// The last-seen table is owned exclusively by this value. Moving the
/// monitor into a background task (see [`ChangeMonitor::start`]) serializes
/// all access by ownership; there is no shared state to race on.
///
/// # Type Parameters
///
/// * `C` - The [`StatusClient`] used for polling
/// * `K` - The [`Clock`] stamping change events (defaults to [`SystemClock`])
///
/// # Example
///
/// ```ignore
/// use charger_watch::monitor::ChangeMonitor;
/// use charger_watch::api::ChargerId;
/// use std::time::Duration;
///
/// let mut monitor = ChangeMonitor::new(client);
/// monitor.subscribe(|change| {
///     println!("{}: {} -> {}", change.charger, change.old.status, change.new.status);
/// });
///
/// let handle = monitor.start(vec![ChargerId::new("CHARGER_001")], Duration::from_secs(5));
/// // ... later
/// let monitor = handle.stop().await?;
/// ```
pub struct ChangeMonitor<C, K = SystemClock> {
    client: C,
    clock: K,
    last_seen: HashMap<ChargerId, StatusRecord>,
    subscribers: Vec<Subscriber>,
    backoff: BackoffPolicy,
}

impl<C> ChangeMonitor<C, SystemClock>
where
    C: StatusClient,
{
    /// Creates a monitor with the system clock and default backoff.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self::with_clock(client, SystemClock)
    }
}

impl<C, K> ChangeMonitor<C, K>
where
    C: StatusClient,
    K: Clock,
{
    /// Creates a monitor with a custom clock.
    ///
    /// This constructor allows injecting a mock clock for testing.
    #[must_use]
    pub fn with_clock(client: C, clock: K) -> Self {
        Self {
            client,
            clock,
            last_seen: HashMap::new(),
            subscribers: Vec::new(),
            backoff: BackoffPolicy::default(),
        }
    }

    /// Configures the backoff applied when sweeps are throttled.
    #[must_use]
    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Returns the configured backoff policy.
    #[must_use]
    pub const fn backoff(&self) -> &BackoffPolicy {
        &self.backoff
    }

    /// Registers a callback invoked on every status transition.
    ///
    /// Subscribers are invoked in registration order, once per transition.
    /// Callbacks run on the polling task and should return quickly.
    pub fn subscribe(&mut self, subscriber: impl Fn(&StatusChange) + Send + Sync + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Returns a stream of change events as an alternative to callbacks.
    ///
    /// The stream is backed by a subscriber feeding an unbounded channel,
    /// so it carries the same per-charger ordering and once-per-transition
    /// guarantees. Dropping the stream silently detaches it.
    #[must_use]
    pub fn events(&mut self) -> UnboundedReceiverStream<StatusChange> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribe(move |change| {
            let _ = tx.send(change.clone());
        });
        UnboundedReceiverStream::new(rx)
    }

    /// Returns the last successfully observed record for a charger, if any.
    #[must_use]
    pub fn last_seen(&self, charger: &ChargerId) -> Option<&StatusRecord> {
        self.last_seen.get(charger)
    }

    /// Polls one charger and notifies subscribers on a transition.
    ///
    /// On success the stored last-seen record is replaced with the fresh
    /// one whether or not the status differed. On failure the stored state
    /// is left untouched and no notification fires.
    ///
    /// # Errors
    ///
    /// Surfaces the [`ApiError`] from the fetch. [`ChangeMonitor::sweep`]
    /// catches these; direct callers decide for themselves.
    pub async fn poll_once(
        &mut self,
        charger: &ChargerId,
    ) -> Result<Option<StatusChange>, ApiError> {
        let record = self.client.fetch_status(charger).await?;

        let change = self.last_seen.get(charger).and_then(|prev| {
            is_transition(prev, &record).then(|| {
                StatusChange::new(
                    charger.clone(),
                    record.clone(),
                    prev.clone(),
                    self.clock.now(),
                )
            })
        });

        if let Some(ref change) = change {
            tracing::info!(
                charger = %change.charger,
                old = %change.old.status,
                new = %change.new.status,
                "charger status changed"
            );
            for subscriber in &self.subscribers {
                subscriber(change);
            }
        }

        self.last_seen.insert(charger.clone(), record);
        Ok(change)
    }

    /// Polls every charger in the set once, sequentially.
    ///
    /// A failed poll is logged and skipped; it never aborts the rest of
    /// the sweep. The report says how many polls failed and whether any
    /// was throttled, which drives the backoff in the continuous loop.
    pub async fn sweep(&mut self, chargers: &[ChargerId]) -> SweepReport {
        let mut report = SweepReport::default();

        for charger in chargers {
            report.polled += 1;
            match self.poll_once(charger).await {
                Ok(Some(_)) => report.changes += 1,
                Ok(None) => {}
                Err(error) => {
                    report.failed += 1;
                    if matches!(error, ApiError::RateLimited) {
                        report.throttled = true;
                    }
                    tracing::warn!(charger = %charger, error = %error, "poll failed");
                }
            }
        }

        report
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
