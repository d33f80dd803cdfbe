//! Tamper alerts: flagged environmental or security anomalies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of anomaly an alert flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    TemperatureViolation,
    ShockDetected,
    HumidityViolation,
    SealBroken,
    UnauthorizedAccess,
}

/// Severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// Investigation status of an alert.
///
/// Legal transitions: `open -> investigating -> resolved`, or
/// `open -> false_alarm`. `resolved` and `false_alarm` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Open,
    Investigating,
    Resolved,
    FalseAlarm,
}

impl AlertStatus {
    /// Whether this status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::FalseAlarm)
    }

    /// Whether the status may legally move from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Open, Self::Investigating)
                | (Self::Open, Self::FalseAlarm)
                | (Self::Investigating, Self::Resolved)
        )
    }
}

/// A flagged anomaly tied to a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TamperAlert {
    pub id: String,
    pub batch_id: String,
    /// Denormalized copy of the batch number.
    pub batch_number: String,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub description: String,
    pub location: String,
    pub status: AlertStatus,
    pub timestamp: DateTime<Utc>,
}
