use std::io::Write;

use tempfile::NamedTempFile;

use super::error::ConfigError;
use super::toml::{TomlConfig, default_config_template};

#[test]
fn parses_full_config() {
    let content = r#"
[api]
key = "secret"
base_url = "https://example.com/api/v1"
timeout = 30

[monitor]
chargers = ["CHARGER_001", "CHARGER_002"]
poll_interval_ms = 2000
backoff_multiplier = 1.5
backoff_max_delay = 120
"#;

    let config: TomlConfig = toml::from_str(content).unwrap();

    assert_eq!(config.api.key.as_deref(), Some("secret"));
    assert_eq!(
        config.api.base_url.as_deref(),
        Some("https://example.com/api/v1")
    );
    assert_eq!(config.api.timeout, Some(30));
    assert_eq!(config.monitor.chargers, vec!["CHARGER_001", "CHARGER_002"]);
    assert_eq!(config.monitor.poll_interval_ms, Some(2000));
    assert_eq!(config.monitor.backoff_multiplier, Some(1.5));
    assert_eq!(config.monitor.backoff_max_delay, Some(120));
}

#[test]
fn empty_file_yields_all_defaults() {
    let config: TomlConfig = toml::from_str("").unwrap();

    assert!(config.api.key.is_none());
    assert!(config.monitor.chargers.is_empty());
    assert!(config.monitor.poll_interval_ms.is_none());
}

#[test]
fn rejects_unknown_fields() {
    let content = r#"
[api]
key = "secret"
tiemout = 30
"#;

    let result: Result<TomlConfig, _> = toml::from_str(content);
    assert!(result.is_err());
}

#[test]
fn rejects_unknown_sections() {
    let result: Result<TomlConfig, _> = toml::from_str("[watcher]\nfoo = 1\n");
    assert!(result.is_err());
}

#[test]
fn default_template_parses_cleanly() {
    let config: TomlConfig = toml::from_str(default_config_template()).unwrap();

    // Every value in the template is commented out.
    assert!(config.api.key.is_none());
    assert!(config.monitor.chargers.is_empty());
}

#[test]
fn loads_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[api]\nkey = \"from-file\"\n").unwrap();

    let config = TomlConfig::load(file.path()).unwrap();
    assert_eq!(config.api.key.as_deref(), Some("from-file"));
}

#[test]
fn missing_file_is_a_read_error() {
    let result = TomlConfig::load(std::path::Path::new("/nonexistent/charger-watch.toml"));
    assert!(matches!(result, Err(ConfigError::FileRead { .. })));
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "not valid toml [[[").unwrap();

    let result = TomlConfig::load(file.path());
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}
