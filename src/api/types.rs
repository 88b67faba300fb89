//! Wire types for the charging API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque charger identifier assigned by the charging service.
///
/// Identifiers are stable strings like `CHARGER_001`. The crate never
/// inspects their structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChargerId(String);

impl ChargerId {
    /// Creates a charger identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChargerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChargerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ChargerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One charger's reported state at a point in time.
///
/// The `status` vocabulary (AVAILABLE, CHARGING, BLOCKED, ...) is owned by
/// the remote service and carried here as an opaque string. Fields the
/// service adds in the future are preserved in `extra` rather than rejected.
///
/// Each poll produces a fresh record; records are never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecord {
    /// Charger this record describes.
    pub charger_id: ChargerId,
    /// Current operating status.
    pub status: String,
    /// Human-readable charger name, when the service reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Last update time as reported by the service (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Any other fields returned by the service.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StatusRecord {
    /// Creates a minimal record with just an id and a status.
    #[must_use]
    pub fn new(charger_id: impl Into<ChargerId>, status: impl Into<String>) -> Self {
        Self {
            charger_id: charger_id.into(),
            status: status.into(),
            name: None,
            updated_at: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// Body for a status update (`PUT /chargers/{id}/status`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// New status value to record.
    pub status: String,
    /// Any additional fields to send alongside the status.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StatusUpdate {
    /// Creates an update carrying only a status value.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Remote on/off action for a charger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlAction {
    /// Start delivering power.
    #[serde(rename = "TURN_ON")]
    TurnOn,
    /// Stop delivering power.
    #[serde(rename = "TURN_OFF")]
    TurnOff,
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TurnOn => f.write_str("TURN_ON"),
            Self::TurnOff => f.write_str("TURN_OFF"),
        }
    }
}

/// Body for a control command (`POST /chargers/{id}/control`).
///
/// How `reason` and `force` interact with the service's own state rules
/// is owned by the service; they are passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlRequest {
    /// Action to perform.
    pub action: ControlAction,
    /// Optional operator-supplied reason, omitted from the body when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Whether to bypass the service's status checks.
    #[serde(default)]
    pub force: bool,
}

impl ControlRequest {
    /// Creates a control request with no reason and `force = false`.
    #[must_use]
    pub const fn new(action: ControlAction) -> Self {
        Self {
            action,
            reason: None,
            force: false,
        }
    }

    /// Sets the operator-supplied reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Sets the force flag.
    #[must_use]
    pub const fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// The service's synchronous acknowledgment of a control command.
///
/// `success` reflects whether the command was accepted, not the charger's
/// eventual physical state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlOutcome {
    /// Charger the command targeted.
    pub charger_id: ChargerId,
    /// Action that was requested.
    pub action: ControlAction,
    /// Whether the service accepted the command.
    pub success: bool,
    /// Error message when the command was rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Server-side timestamp of the acknowledgment (RFC 3339).
    pub timestamp: String,
}
