//! Core domain logic for the PharmaTrace supply-chain dashboard.
//!
//! This crate simulates pharmaceutical supply-chain data: batches, custody
//! events, IoT sensor readings, tamper alerts, regulatory filings, and
//! quality checks. There is no real sensor ingestion and no real blockchain;
//! everything is in-memory state driven by UI actions and synthetic-data
//! generators.
//!
//! # Architecture
//!
//! ```text
//! UI action --> generator (lifecycle / telemetry) --> SupplyStore --> views
//! ```
//!
//! - [`registry`] holds the read-only seed tables (drugs, stakeholders, the
//!   location graph).
//! - [`telemetry`] evolves per-sensor time series with type-specific
//!   stochastic models and alert thresholds.
//! - [`lifecycle`] enforces which event type may follow a batch's current
//!   state and plans the next auto-generated event.
//! - [`store`] owns all collections and is the only component that mutates
//!   them; recording an event applies its batch-status side effects there.
//!
//! # Determinism
//!
//! Generators take the current time and a `rand::Rng` as inputs instead of
//! reaching for ambient sources, so a seeded rng plus a [`FixedClock`]
//! reproduces an exact run.

pub mod config;
pub mod ident;
pub mod lifecycle;
pub mod model;
pub mod registry;
pub mod store;
pub mod telemetry;

pub use config::{ConfigError, CoreConfig};
pub use ident::{Clock, FixedClock, SystemClock};
pub use lifecycle::{BatchProgress, allowed_next, is_valid_transition};
pub use model::{
    AlertSeverity, AlertStatus, AlertType, Batch, BatchStatus, CheckResult, CheckType, EventType,
    FdaSubmission, IoTReading, QualityCheck, SensorType, SubmissionStatus, SubmissionType,
    SupplyChainEvent, TamperAlert,
};
pub use store::SupplyStore;
pub use telemetry::{SensorProfile, SensorState, TelemetryGenerator};
