//! Configuration loading and validation.
//!
//! Sources are merged with the priority CLI > TOML file > built-in
//! defaults, then validated into a [`ValidatedConfig`].

mod cli;
mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;

pub use cli::{ActionArg, Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
