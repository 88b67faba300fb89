//! Backoff policy for throttled sweeps.

use std::time::Duration;

/// Controls how the sweep interval stretches when the service throttles
/// polls.
///
/// After a sweep in which any poll came back rate-limited, the next sleep
/// is the base interval multiplied by `multiplier` once per consecutive
/// throttled sweep, capped at `max_delay`. A sweep without throttling
/// resets the stretch.
///
/// # Example
///
/// ```
/// use charger_watch::monitor::BackoffPolicy;
/// use std::time::Duration;
///
/// let policy = BackoffPolicy::new()
///     .with_multiplier(2.0)
///     .with_max_delay(Duration::from_secs(60));
///
/// let base = Duration::from_secs(5);
/// assert_eq!(policy.stretched(base, 0), base);
/// assert_eq!(policy.stretched(base, 2), Duration::from_secs(20));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    /// Multiplier applied once per consecutive throttled sweep.
    pub multiplier: f64,
    /// Upper bound on the stretched delay.
    pub max_delay: Duration,
}

impl BackoffPolicy {
    /// Default multiplier (2.0).
    pub const DEFAULT_MULTIPLIER: f64 = 2.0;

    /// Default maximum delay (60 seconds).
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(60);

    /// Creates a policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            multiplier: Self::DEFAULT_MULTIPLIER,
            max_delay: Self::DEFAULT_MAX_DELAY,
        }
    }

    /// Sets the multiplier.
    ///
    /// # Panics
    ///
    /// Panics if `multiplier` is less than 1.0; a sub-unity multiplier
    /// would poll faster while being throttled.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        assert!(multiplier >= 1.0, "multiplier must be at least 1.0");
        self.multiplier = multiplier;
        self
    }

    /// Sets the maximum delay.
    #[must_use]
    pub const fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Computes the delay before the next sweep.
    ///
    /// # Arguments
    ///
    /// * `base` - The configured poll interval
    /// * `consecutive_throttled` - How many sweeps in a row saw a
    ///   rate-limited poll (0 = not throttled)
    #[must_use]
    pub fn stretched(&self, base: Duration, consecutive_throttled: u32) -> Duration {
        if consecutive_throttled == 0 {
            return base;
        }

        // Safe cast: throttle streaks are small and i32::MAX is ~2 billion
        #[allow(clippy::cast_possible_wrap)]
        let factor = self.multiplier.powi(consecutive_throttled as i32);
        let stretched = base.as_secs_f64() * factor;
        let capped = stretched.min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(capped.max(base.as_secs_f64()))
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;
