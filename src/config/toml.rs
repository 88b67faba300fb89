//! TOML configuration file parsing.

use std::path::Path;

use serde::Deserialize;

use super::error::ConfigError;

/// Raw TOML configuration as read from disk.
///
/// All fields are optional; [`super::ValidatedConfig`] merges them with
/// CLI arguments and built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API connection settings.
    #[serde(default)]
    pub api: ApiSection,

    /// Monitoring settings.
    #[serde(default)]
    pub monitor: MonitorSection,
}

/// The `[api]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// API key sent in the x-api-key header.
    pub key: Option<String>,
    /// Base URL of the charging API.
    pub base_url: Option<String>,
    /// Per-call timeout in seconds.
    pub timeout: Option<u64>,
}

/// The `[monitor]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Chargers to monitor.
    #[serde(default)]
    pub chargers: Vec<String>,
    /// Polling interval in milliseconds.
    pub poll_interval_ms: Option<u64>,
    /// Backoff multiplier applied while throttled.
    pub backoff_multiplier: Option<f64>,
    /// Maximum backoff delay in seconds.
    pub backoff_max_delay: Option<u64>,
}

impl TomlConfig {
    /// Loads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileRead`] if the file cannot be read and
    /// [`ConfigError::TomlParse`] if it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(toml::from_str(&content)?)
    }
}

/// Returns the default configuration file template.
#[must_use]
pub fn default_config_template() -> &'static str {
    r#"# charger-watch configuration

[api]
# API key sent in the x-api-key header (required)
# key = "your-api-key-here"

# Base URL of the charging API
# base_url = "https://api.evcharging.abc.com/api/v1"

# Per-call timeout in seconds
# timeout = 10

[monitor]
# Chargers to watch for status transitions
# chargers = ["CHARGER_001", "CHARGER_002"]

# Polling interval in milliseconds
# poll_interval_ms = 5000

# Backoff applied while the service throttles polls
# backoff_multiplier = 2.0
# backoff_max_delay = 60
"#
}
