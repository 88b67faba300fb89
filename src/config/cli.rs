//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::api::ControlAction;

/// charger-watch: EV charger status client and change monitor
///
/// Watches a set of chargers on a remote charging API and reports
/// status transitions. Subcommands issue one-shot API calls.
#[derive(Debug, Parser)]
#[command(name = "charger-watch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (default: continuous watch mode)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// API key sent in the x-api-key header (required)
    #[arg(long = "api-key", global = true)]
    pub api_key: Option<String>,

    /// Base URL of the charging API
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Charger to monitor (can be specified multiple times)
    #[arg(long = "charger", value_name = "ID")]
    pub chargers: Vec<String>,

    /// Polling interval in milliseconds
    #[arg(long = "poll-interval-ms")]
    pub poll_interval_ms: Option<u64>,

    /// Per-call timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for charger-watch
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "charger-watch.toml")]
        output: PathBuf,
    },

    /// Fetch the current status of one charger
    Status {
        /// Charger identifier
        charger: String,
    },

    /// Report a new status for one charger
    Update {
        /// Charger identifier
        charger: String,
        /// New status value (service vocabulary, e.g. AVAILABLE, CHARGING)
        status: String,
    },

    /// Issue a remote on/off command
    Control {
        /// Charger identifier
        charger: String,
        /// Action to perform
        #[arg(value_enum)]
        action: ActionArg,
        /// Operator-supplied reason for the command
        #[arg(long)]
        reason: Option<String>,
        /// Bypass the service's status checks
        #[arg(long)]
        force: bool,
    },

    /// Fetch the status of every charger known to the service
    Batch,
}

/// Control action argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ActionArg {
    /// Start delivering power
    #[value(name = "on")]
    On,
    /// Stop delivering power
    #[value(name = "off")]
    Off,
}

impl From<ActionArg> for ControlAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::On => Self::TurnOn,
            ActionArg::Off => Self::TurnOff,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
