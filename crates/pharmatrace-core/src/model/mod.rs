//! Entity records for the supply-chain dashboard.
//!
//! All records serialize with snake_case field and variant names; these are
//! the shapes an external store persists verbatim. Several fields are
//! deliberately denormalized (`batch_number` and `drug_name` are copied onto
//! events and checks) as a read optimization; the copies can drift from the
//! authoritative [`Batch`] record and that risk is accepted.

mod alert;
mod batch;
mod compliance;
mod event;
mod sensor;

pub use alert::{AlertSeverity, AlertStatus, AlertType, TamperAlert};
pub use batch::{Batch, BatchStatus};
pub use compliance::{
    CheckResult, CheckType, FdaSubmission, QualityCheck, SubmissionStatus, SubmissionType,
};
pub use event::{EventType, SupplyChainEvent};
pub use sensor::{IoTReading, SensorType};
