//! Built-in default configuration values.

/// Default API base URL (the service's versioned API root).
pub const BASE_URL: &str = "https://api.evcharging.abc.com/api/v1";

/// Default poll interval in milliseconds.
pub const POLL_INTERVAL_MS: u64 = 5000;

/// Default per-call timeout in seconds.
pub const TIMEOUT_SECS: u64 = 10;

/// Default backoff multiplier applied while the service throttles polls.
pub const BACKOFF_MULTIPLIER: f64 = 2.0;

/// Default maximum backoff delay in seconds.
pub const BACKOFF_MAX_DELAY_SECS: u64 = 60;
