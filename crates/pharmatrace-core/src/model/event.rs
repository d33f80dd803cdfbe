//! Supply-chain events: immutable custody and status-change facts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::compliance::CheckResult;

/// Kind of custody or status change an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Manufactured,
    QualityCheck,
    Approved,
    Rejected,
    Transferred,
    Received,
    Recalled,
}

impl EventType {
    /// Returns the snake_case wire name of this event type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manufactured => "manufactured",
            Self::QualityCheck => "quality_check",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Transferred => "transferred",
            Self::Received => "received",
            Self::Recalled => "recalled",
        }
    }
}

/// An immutable fact recording a custody or status change for one batch.
///
/// Events are append-only: once recorded they are never mutated or deleted.
/// For any batch, the auto-generated events ordered by timestamp form a walk
/// on the lifecycle transition graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyChainEvent {
    pub id: String,
    pub batch_id: String,
    /// Denormalized copy of the batch number.
    pub batch_number: String,
    pub event_type: EventType,
    pub from_stakeholder: String,
    pub to_stakeholder: String,
    /// Units involved; at most the batch's current quantity.
    pub quantity: u32,
    pub location: String,
    pub timestamp: DateTime<Utc>,
    /// Simulated tamper-evidence token: 64 lowercase hex characters. Not a
    /// cryptographic commitment to prior state.
    pub blockchain_hash: String,
    /// Outcome of the inspection, on `quality_check` events only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qc_result: Option<CheckResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspector_name: Option<String>,
    /// Free-text approving party, on `quality_check` events only. The store
    /// matches this against "fda" (case-insensitive) when applying status
    /// side effects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver: Option<String>,
}
