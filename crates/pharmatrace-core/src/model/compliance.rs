//! Regulatory filings and quality-control inspections.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Kind of regulatory filing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionType {
    NewDrug,
    Amendment,
    AnnualReport,
    AdverseEvent,
}

/// Review status of a regulatory filing. Set at creation and advanced only
/// by administrative action; there is no automatic workflow engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Draft,
    Submitted,
    UnderReview,
    Approved,
    Rejected,
    AdditionalInfoRequired,
}

/// A regulatory filing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FdaSubmission {
    pub id: String,
    pub drug_name: String,
    pub submission_type: SubmissionType,
    /// Unique filing number, `FDA-<6 alphanumeric>`.
    pub submission_number: String,
    pub submitted_by: String,
    pub submission_date: NaiveDate,
    pub status: SubmissionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_date: Option<NaiveDate>,
}

/// Where in the chain an inspection happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    Incoming,
    Production,
    Outgoing,
    Random,
}

/// Outcome of an inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckResult {
    Passed,
    Failed,
    Conditional,
}

/// An inspection record, linked to a batch by batch number. Append-only;
/// may also be generated as a side product of a `quality_check` supply
/// event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityCheck {
    pub id: String,
    pub batch_number: String,
    pub check_type: CheckType,
    pub result: CheckResult,
    pub inspector_name: String,
    pub stakeholder_name: String,
    pub timestamp: DateTime<Utc>,
}
