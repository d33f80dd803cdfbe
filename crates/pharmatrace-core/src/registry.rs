//! Static reference data: drug catalog, stakeholder roster, the location
//! graph, and dosage-form batch sizing.
//!
//! This is read-only seed data. Generators draw from these tables; nothing
//! mutates them at runtime.

use serde::{Deserialize, Serialize};

// =============================================================================
// Drug Catalog
// =============================================================================

/// Dosage form of a drug, which determines the standard batch size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DosageForm {
    Tablet,
    Capsule,
    Injectable,
    Liquid,
}

impl DosageForm {
    /// Standard production batch size in units for this dosage form.
    #[must_use]
    pub const fn base_batch_size(self) -> u32 {
        match self {
            Self::Tablet => 100_000,
            Self::Capsule => 50_000,
            Self::Injectable => 10_000,
            Self::Liquid => 20_000,
        }
    }
}

/// A catalog entry for a manufactured drug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrugRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub ndc_code: &'static str,
    pub dosage_form: DosageForm,
    pub strength: &'static str,
}

/// The fixed drug catalog used by the batch generator.
pub const DRUG_CATALOG: &[DrugRecord] = &[
    DrugRecord {
        id: "d1",
        name: "Paracetamol 500mg",
        ndc_code: "0002-1433-80",
        dosage_form: DosageForm::Tablet,
        strength: "500 mg",
    },
    DrugRecord {
        id: "d2",
        name: "Amoxicillin 250mg",
        ndc_code: "0002-3227-30",
        dosage_form: DosageForm::Capsule,
        strength: "250 mg",
    },
    DrugRecord {
        id: "d3",
        name: "Insulin Glargine",
        ndc_code: "0002-7715-01",
        dosage_form: DosageForm::Injectable,
        strength: "100 IU/mL",
    },
    DrugRecord {
        id: "d4",
        name: "Azithromycin Oral Suspension",
        ndc_code: "0002-5055-15",
        dosage_form: DosageForm::Liquid,
        strength: "200 mg/5 mL",
    },
];

// =============================================================================
// Stakeholders
// =============================================================================

/// Role of a party in the chain of custody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StakeholderKind {
    Manufacturer,
    Distributor,
    Pharmacy,
    Regulatory,
}

/// A named party in the chain of custody.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeholderRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: StakeholderKind,
}

/// The fixed stakeholder roster.
pub const STAKEHOLDERS: &[StakeholderRecord] = &[
    StakeholderRecord {
        id: "1",
        name: MANUFACTURER_NAME,
        kind: StakeholderKind::Manufacturer,
    },
    StakeholderRecord {
        id: "2",
        name: DISTRIBUTOR_NAME,
        kind: StakeholderKind::Distributor,
    },
    StakeholderRecord {
        id: "3",
        name: "CityCare Pharmacy",
        kind: StakeholderKind::Pharmacy,
    },
    StakeholderRecord {
        id: "4",
        name: "FDA Regulatory Authority",
        kind: StakeholderKind::Regulatory,
    },
];

/// Name of the manufacturing stakeholder; the `from` party on transfers and
/// the submitter on regulatory filings.
pub const MANUFACTURER_NAME: &str = "PharmaCorp Manufacturing";

/// Name of the distribution stakeholder; the `to` party on transfers.
pub const DISTRIBUTOR_NAME: &str = "MedSupply Distributors";

/// Id of the manufacturing stakeholder.
pub const MANUFACTURER_ID: &str = "1";

// =============================================================================
// Location Graph
// =============================================================================

/// Starting location for every batch's custody chain.
pub const DEFAULT_ORIGIN: &str = "Mumbai, India";

/// Directed adjacency table for custody transfers. A `transferred` event
/// moves a batch to a uniformly chosen neighbor of its current location.
const LOCATION_GRAPH: &[(&str, &[&str])] = &[
    ("Mumbai, India", &["Delhi, India", "Bangalore, India"]),
    ("Delhi, India", &["Mumbai, India", "Kolkata, India"]),
    ("Bangalore, India", &["Chennai, India", "Mumbai, India"]),
    ("Chennai, India", &["Bangalore, India", "Hyderabad, India"]),
    ("Kolkata, India", &["Delhi, India", "Hyderabad, India"]),
    ("Hyderabad, India", &["Chennai, India", "Bangalore, India"]),
];

/// Returns the locations reachable from `location` in one transfer, or an
/// empty slice for locations outside the graph.
#[must_use]
pub fn neighbors(location: &str) -> &'static [&'static str] {
    LOCATION_GRAPH
        .iter()
        .find(|(name, _)| *name == location)
        .map_or(&[], |(_, next)| next)
}

/// Standard batch size for a dosage form; falls back to 10 000 units for
/// forms outside the table.
#[must_use]
pub fn batch_size_for(form: Option<DosageForm>) -> u32 {
    form.map_or(10_000, DosageForm::base_batch_size)
}
