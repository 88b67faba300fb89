//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use http::HeaderValue;
use url::Url;

use crate::api::ChargerId;
use crate::monitor::BackoffPolicy;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// All required fields are present and all values have been validated.
/// CLI arguments take precedence over TOML values, which take precedence
/// over built-in defaults.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// API key as a ready-to-send header value (required).
    pub api_key: HeaderValue,

    /// Base URL of the charging API.
    pub base_url: Url,

    /// Per-call timeout.
    pub timeout: Duration,

    /// Chargers to monitor in watch mode.
    ///
    /// May be empty for one-shot subcommands; watch mode rejects an
    /// empty set at startup.
    pub chargers: Vec<ChargerId>,

    /// Polling interval between sweeps.
    pub poll_interval: Duration,

    /// Backoff applied while the service throttles polls.
    pub backoff: BackoffPolicy,

    /// Verbose logging enabled.
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The API key never appears in logs.
        write!(
            f,
            "Config {{ base_url: {}, chargers: {}, poll_interval: {}ms, timeout: {}s }}",
            self.base_url,
            self.chargers.len(),
            self.poll_interval.as_millis(),
            self.timeout.as_secs(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional
    /// TOML config.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API key is missing or not a valid header value
    /// - The base URL is invalid or cannot carry a path
    /// - The poll interval or timeout is zero
    /// - The backoff settings are out of range
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let api_key = Self::resolve_api_key(cli, toml)?;
        let base_url = Self::resolve_base_url(cli, toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;
        let chargers = Self::resolve_chargers(cli, toml);
        let poll_interval = Self::resolve_poll_interval(cli, toml)?;
        let backoff = Self::build_backoff(toml)?;

        Ok(Self {
            api_key,
            base_url,
            timeout,
            chargers,
            poll_interval,
            backoff,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or
    /// if the merged configuration is invalid.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_api_key(cli: &Cli, toml: Option<&TomlConfig>) -> Result<HeaderValue, ConfigError> {
        // CLI takes precedence
        let key = cli
            .api_key
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.key.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::API_KEY,
                    "Use --api-key or set api.key in the config file",
                )
            })?;

        HeaderValue::from_str(key).map_err(|e| ConfigError::InvalidApiKey {
            reason: e.to_string(),
        })
    }

    fn resolve_base_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url_str = cli
            .base_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.base_url.as_deref()))
            .unwrap_or(defaults::BASE_URL);

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        // Endpoint paths are appended beneath the base; reject URLs that
        // cannot carry path segments (e.g. mailto:).
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(url)
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.api.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_chargers(cli: &Cli, toml: Option<&TomlConfig>) -> Vec<ChargerId> {
        // CLI chargers replace TOML chargers entirely (not merged).
        let raw: Vec<&str> = if cli.chargers.is_empty() {
            toml.map(|t| t.monitor.chargers.iter().map(String::as_str).collect())
                .unwrap_or_default()
        } else {
            cli.chargers.iter().map(String::as_str).collect()
        };

        raw.into_iter().map(ChargerId::new).collect()
    }

    fn resolve_poll_interval(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        let millis = cli
            .poll_interval_ms
            .or_else(|| toml.and_then(|t| t.monitor.poll_interval_ms))
            .unwrap_or(defaults::POLL_INTERVAL_MS);

        if millis == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "poll_interval_ms",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_millis(millis))
    }

    fn build_backoff(toml: Option<&TomlConfig>) -> Result<BackoffPolicy, ConfigError> {
        let monitor = toml.map(|t| &t.monitor);

        let multiplier = monitor
            .and_then(|m| m.backoff_multiplier)
            .unwrap_or(defaults::BACKOFF_MULTIPLIER);

        let max_delay_secs = monitor
            .and_then(|m| m.backoff_max_delay)
            .unwrap_or(defaults::BACKOFF_MAX_DELAY_SECS);

        if multiplier < 1.0 || !multiplier.is_finite() {
            return Err(ConfigError::InvalidBackoff(
                "backoff_multiplier must be a finite number >= 1.0".to_string(),
            ));
        }

        if max_delay_secs == 0 {
            return Err(ConfigError::InvalidBackoff(
                "backoff_max_delay must be greater than 0".to_string(),
            ));
        }

        Ok(BackoffPolicy::new()
            .with_multiplier(multiplier)
            .with_max_delay(Duration::from_secs(max_delay_secs)))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
