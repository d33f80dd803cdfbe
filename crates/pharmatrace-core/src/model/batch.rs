//! Batch records and their lifecycle status.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a batch.
///
/// Status changes flow from recorded supply-chain events (see the store's
/// ingest side effects) or direct administrative override; batches are never
/// deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    InProduction,
    QualityCheck,
    Approved,
    InTransit,
    Delivered,
    Recalled,
}

impl BatchStatus {
    /// Returns the snake_case wire name of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProduction => "in_production",
            Self::QualityCheck => "quality_check",
            Self::Approved => "approved",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Recalled => "recalled",
        }
    }
}

/// A manufactured lot of a drug, tracked end-to-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: String,
    /// Human-readable unique number, `BATCH-<year>-<month>-<seq>`.
    pub batch_number: String,
    pub drug_id: String,
    /// Denormalized copy of the catalog drug name.
    pub drug_name: String,
    pub manufacturer_id: String,
    pub manufacturer_name: String,
    pub manufacturing_date: NaiveDate,
    /// Always after `manufacturing_date`.
    pub expiry_date: NaiveDate,
    /// Initial units produced.
    pub quantity: u32,
    /// Units still in the chain; never exceeds `quantity`.
    pub current_quantity: u32,
    pub status: BatchStatus,
    /// Derived label, unique per batch (`QR-<batch_number>`).
    pub qr_code: String,
}
