//! Application execution logic.
//!
//! This module contains the one-shot API operations and the continuous
//! watch loop that reports status transitions.

use std::time::{Duration, UNIX_EPOCH};

use thiserror::Error;
use tokio::signal;

use charger_watch::api::{
    ApiError, ChargerId, ControlAction, ControlRequest, RestClient, StatusClient, StatusUpdate,
};
use charger_watch::config::{Command, ValidatedConfig};
use charger_watch::http::ReqwestClient;
use charger_watch::monitor::{ChangeMonitor, StatusChange, StopError};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// An API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The background monitor did not shut down cleanly.
    #[error(transparent)]
    Stop(#[from] StopError),

    /// Watch mode was requested without any chargers to watch.
    #[error("No chargers configured. Use --charger or set monitor.chargers in the config file")]
    NoChargers,

    /// Failed to render a response as JSON.
    #[error("Failed to render response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// What the process should do, derived from the CLI subcommand.
#[derive(Debug)]
pub enum Operation {
    /// Continuous watch mode (the default when no subcommand is given).
    Watch,
    /// Fetch one charger's status.
    Status { charger: ChargerId },
    /// Report a new status for one charger.
    Update { charger: ChargerId, status: String },
    /// Issue a remote on/off command.
    Control {
        charger: ChargerId,
        action: ControlAction,
        reason: Option<String>,
        force: bool,
    },
    /// Fetch every charger's status.
    Batch,
}

impl Operation {
    /// Maps a parsed subcommand to an operation.
    ///
    /// `Init` is handled before config loading and never reaches here;
    /// mapping it anyway keeps this total.
    #[must_use]
    pub fn from_command(command: Option<Command>) -> Self {
        match command {
            None | Some(Command::Init { .. }) => Self::Watch,
            Some(Command::Status { charger }) => Self::Status {
                charger: ChargerId::new(charger),
            },
            Some(Command::Update { charger, status }) => Self::Update {
                charger: ChargerId::new(charger),
                status,
            },
            Some(Command::Control {
                charger,
                action,
                reason,
                force,
            }) => Self::Control {
                charger: ChargerId::new(charger),
                action: action.into(),
                reason,
                force,
            },
            Some(Command::Batch) => Self::Batch,
        }
    }
}

/// Executes the requested operation.
///
/// One-shot operations print the API response as pretty JSON on stdout.
/// Watch mode polls the configured chargers until a shutdown signal is
/// received and prints one JSON line per status transition.
///
/// # Errors
///
/// Returns an error if an API call fails, the monitor fails to shut
/// down, or watch mode is requested with no chargers configured.
///
/// # Coverage Note
///
/// Excluded from coverage because it performs real network I/O and
/// installs signal handlers.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, operation: Operation) -> Result<(), RunError> {
    let http = ReqwestClient::with_timeout(config.timeout);
    let client = RestClient::new(http, config.base_url.clone(), config.api_key.clone());

    match operation {
        Operation::Watch => run_watch(client, &config).await,
        Operation::Status { charger } => {
            let record = client.fetch_status(&charger).await?;
            print_json(&record)
        }
        Operation::Update { charger, status } => {
            let record = client
                .update_status(&charger, &StatusUpdate::new(status))
                .await?;
            print_json(&record)
        }
        Operation::Control {
            charger,
            action,
            reason,
            force,
        } => {
            let mut request = ControlRequest::new(action).with_force(force);
            if let Some(reason) = reason {
                request = request.with_reason(reason);
            }
            let outcome = client.control_charger(&charger, &request).await?;
            print_json(&outcome)
        }
        Operation::Batch => {
            let statuses = client.fetch_batch_status().await?;
            print_json(&statuses)
        }
    }
}

/// Runs the continuous watch loop until a shutdown signal arrives.
///
/// Excluded from coverage - requires signal handling.
#[cfg(not(tarpaulin_include))]
async fn run_watch<C>(client: C, config: &ValidatedConfig) -> Result<(), RunError>
where
    C: StatusClient + Send + 'static,
{
    if config.chargers.is_empty() {
        return Err(RunError::NoChargers);
    }

    let mut monitor = ChangeMonitor::new(client).with_backoff(config.backoff.clone());
    monitor.subscribe(|change| println!("{}", render_change(change)));

    let handle = monitor.start(config.chargers.clone(), config.poll_interval);

    shutdown_signal().await;
    tracing::info!("Shutdown signal received, stopping...");

    handle.stop().await?;
    Ok(())
}

/// Renders a status transition as a single JSON line.
fn render_change(change: &StatusChange) -> String {
    let timestamp_ms = change
        .timestamp
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis();

    serde_json::json!({
        "chargerId": change.charger.as_str(),
        "from": change.old.status,
        "to": change.new.status,
        "observedAt": u64::try_from(timestamp_ms).unwrap_or(u64::MAX),
    })
    .to_string()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), RunError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
