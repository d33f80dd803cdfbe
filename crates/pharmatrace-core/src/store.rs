//! The in-memory supply-chain store.
//!
//! [`SupplyStore`] is the single source of truth for every collection the
//! dashboard renders. It exclusively owns the collections; generators and
//! the presentation layer only receive slices and hand records back for the
//! store to append. Mutators are synchronous and total: there is no I/O and
//! no validation beyond the ingest side effects, so none of them can fail.
//! Batches and events are append-only (events are never mutated or deleted).
//!
//! The store is constructed explicitly once per session and passed to its
//! consumers; there is no module-level singleton.
//!
//! # Ingest side effects
//!
//! Recording a supply-chain event can flip the referenced batch's status:
//! an `approved` event always does, and a `quality_check` event does when
//! its result is `passed` and its approver mentions "fda"
//! (case-insensitive). The two rules are evaluated independently. The
//! approver match is deliberately a loose substring test; tightening it to
//! check the stakeholder roster would change observable behavior.

use std::collections::HashMap;

use chrono::{Datelike, Duration, Months};
use rand::Rng;
use tracing::{debug, info};

use crate::config::CoreConfig;
use crate::ident::{Clock, SystemClock, entity_id};
use crate::lifecycle::{self, BatchProgress};
use crate::model::{
    AlertSeverity, AlertStatus, AlertType, Batch, BatchStatus, CheckResult, CheckType, EventType,
    FdaSubmission, IoTReading, QualityCheck, SubmissionStatus, SubmissionType, SupplyChainEvent,
    TamperAlert,
};
use crate::registry::{
    DRUG_CATALOG, MANUFACTURER_ID, MANUFACTURER_NAME, batch_size_for,
};
use crate::telemetry::{self, SensorState, TelemetryGenerator};

/// Alphabet for regulatory submission numbers.
const SUBMISSION_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Alert types the random alert generator draws from.
const GENERATED_ALERT_TYPES: &[AlertType] = &[AlertType::TemperatureViolation, AlertType::ShockDetected];

/// Severities the random alert generator draws from (`critical` is reserved
/// for manually filed alerts).
const GENERATED_SEVERITIES: &[AlertSeverity] =
    &[AlertSeverity::Low, AlertSeverity::Medium, AlertSeverity::High];

/// Check types the random quality-check generator draws from.
const GENERATED_CHECK_TYPES: &[CheckType] = &[
    CheckType::Production,
    CheckType::Incoming,
    CheckType::Outgoing,
    CheckType::Random,
];

/// In-memory store backing every dashboard view.
pub struct SupplyStore {
    config: CoreConfig,
    clock: Box<dyn Clock>,
    batches: Vec<Batch>,
    iot_readings: Vec<IoTReading>,
    supply_chain_events: Vec<SupplyChainEvent>,
    tamper_alerts: Vec<TamperAlert>,
    fda_submissions: Vec<FdaSubmission>,
    quality_checks: Vec<QualityCheck>,
    telemetry: TelemetryGenerator,
    /// Lifecycle progress per batch id, feeding the state machine.
    progress: HashMap<String, BatchProgress>,
}

impl SupplyStore {
    /// Creates an empty store using the system clock.
    #[must_use]
    pub fn new(config: CoreConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// Creates an empty store with an injected clock.
    #[must_use]
    pub fn with_clock(config: CoreConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            batches: Vec::new(),
            iot_readings: Vec::new(),
            supply_chain_events: Vec::new(),
            tamper_alerts: Vec::new(),
            fda_submissions: Vec::new(),
            quality_checks: Vec::new(),
            telemetry: TelemetryGenerator::new(),
            progress: HashMap::new(),
        }
    }

    /// Creates a store pre-populated with a small demo dataset: two batches
    /// mid-lifecycle with their event history, a short cold-chain reading
    /// series, an open alert, a filing, and two inspections.
    #[must_use]
    pub fn with_seed_data(config: CoreConfig) -> Self {
        let mut store = Self::new(config);
        store.seed_demo_data();
        store
    }

    // =========================================================================
    // Read surface
    // =========================================================================

    /// Batches, newest first.
    #[must_use]
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Sensor readings in time-series (append) order.
    #[must_use]
    pub fn iot_readings(&self) -> &[IoTReading] {
        &self.iot_readings
    }

    /// Supply-chain events, newest first.
    #[must_use]
    pub fn supply_chain_events(&self) -> &[SupplyChainEvent] {
        &self.supply_chain_events
    }

    /// Tamper alerts, newest first.
    #[must_use]
    pub fn tamper_alerts(&self) -> &[TamperAlert] {
        &self.tamper_alerts
    }

    /// Regulatory filings, newest first.
    #[must_use]
    pub fn fda_submissions(&self) -> &[FdaSubmission] {
        &self.fda_submissions
    }

    /// Inspection records, newest first.
    #[must_use]
    pub fn quality_checks(&self) -> &[QualityCheck] {
        &self.quality_checks
    }

    /// Whether the "secured by blockchain" indicator is shown. Display
    /// only; has no effect on generated data.
    #[must_use]
    pub fn blockchain_badge(&self) -> bool {
        self.config.blockchain_badge
    }

    /// Toggles the blockchain indicator.
    pub fn set_blockchain_badge(&mut self, enabled: bool) {
        self.config.blockchain_badge = enabled;
    }

    /// Lifecycle progress recorded for a batch, if any event was generated.
    #[must_use]
    pub fn batch_progress(&self, batch_id: &str) -> Option<&BatchProgress> {
        self.progress.get(batch_id)
    }

    // =========================================================================
    // Direct mutators
    // =========================================================================

    /// Records a batch (prepended: newest first).
    pub fn add_batch(&mut self, batch: Batch) {
        debug!(batch_id = %batch.id, batch_number = %batch.batch_number, "batch recorded");
        self.batches.insert(0, batch);
    }

    /// Records a sensor reading (appended: time-series order).
    pub fn add_iot_reading(&mut self, reading: IoTReading) {
        self.iot_readings.push(reading);
    }

    /// Records a tamper alert (prepended).
    pub fn add_tamper_alert(&mut self, alert: TamperAlert) {
        self.tamper_alerts.insert(0, alert);
    }

    /// Records a regulatory filing (prepended).
    pub fn add_fda_submission(&mut self, submission: FdaSubmission) {
        self.fda_submissions.insert(0, submission);
    }

    /// Records an inspection (prepended).
    pub fn add_quality_check(&mut self, check: QualityCheck) {
        self.quality_checks.insert(0, check);
    }

    /// Records a supply-chain event (prepended) and applies its status side
    /// effects to the referenced batch.
    ///
    /// Accepts any event as-is: manually submitted events are not checked
    /// against the lifecycle transition table.
    pub fn add_supply_event(&mut self, event: SupplyChainEvent) {
        self.apply_status_side_effects(&event);
        self.supply_chain_events.insert(0, event);
    }

    fn apply_status_side_effects(&mut self, event: &SupplyChainEvent) {
        if event.event_type == EventType::Approved {
            self.set_batch_status(&event.batch_id, BatchStatus::Approved, "approved event");
        }
        // Independently of the above: a passed quality check signed off by a
        // party mentioning "fda" also approves the batch. Loose substring
        // match, kept verbatim from the source behavior.
        if event.event_type == EventType::QualityCheck
            && event.qc_result == Some(CheckResult::Passed)
            && event
                .approver
                .as_deref()
                .is_some_and(|a| a.to_lowercase().contains("fda"))
        {
            self.set_batch_status(&event.batch_id, BatchStatus::Approved, "fda quality sign-off");
        }
    }

    fn set_batch_status(&mut self, batch_id: &str, status: BatchStatus, cause: &str) {
        if let Some(batch) = self.batches.iter_mut().find(|b| b.id == batch_id) {
            if batch.status != status {
                info!(
                    batch_id,
                    from = batch.status.as_str(),
                    to = status.as_str(),
                    cause,
                    "batch status changed"
                );
                batch.status = status;
            }
        }
    }

    // =========================================================================
    // Generators (compute, record, return)
    // =========================================================================

    /// Generates a batch from the drug catalog, records it, and records its
    /// first (`manufactured`) supply-chain event.
    pub fn add_random_batch<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Batch {
        let drug = &DRUG_CATALOG[rng.gen_range(0..DRUG_CATALOG.len())];
        let now = self.clock.now();
        let today = now.date_naive();
        let batch_number = format!(
            "BATCH-{}-{:02}-{}",
            today.year(),
            today.month(),
            rng.gen_range(100..1000)
        );
        let base = batch_size_for(Some(drug.dosage_form));
        // Standard size for the dosage form, with up to +10% variation.
        let quantity = base + rng.gen_range(0..base / 10);

        let batch = Batch {
            id: entity_id(rng, "b"),
            batch_number: batch_number.clone(),
            drug_id: drug.id.to_string(),
            drug_name: drug.name.to_string(),
            manufacturer_id: MANUFACTURER_ID.to_string(),
            manufacturer_name: MANUFACTURER_NAME.to_string(),
            manufacturing_date: today,
            expiry_date: today.checked_add_months(Months::new(24)).unwrap_or(today),
            quantity,
            current_quantity: quantity,
            status: BatchStatus::InProduction,
            qr_code: format!("QR-{batch_number}"),
        };
        let id = batch.id.clone();
        self.add_batch(batch.clone());
        // A fresh batch immediately gets its manufactured event.
        self.add_random_supply_event(Some(&id), rng);
        batch
    }

    /// Generates the next reading for a sensor (a random fleet member when
    /// `sensor_id` is `None`), records it, and returns it.
    ///
    /// Returns `None` when an explicit `sensor_id` is not in the fleet.
    pub fn add_random_iot_reading<R: Rng + ?Sized>(
        &mut self,
        sensor_id: Option<&str>,
        rng: &mut R,
    ) -> Option<IoTReading> {
        let fleet = telemetry::sensor_ids();
        let sensor = sensor_id.unwrap_or_else(|| fleet[rng.gen_range(0..fleet.len())]);
        let now = self.clock.now();
        let reading = self.telemetry.generate(sensor, now, rng)?;
        self.add_iot_reading(reading.clone());
        Some(reading)
    }

    /// Generates the next lifecycle event for a batch (a random batch when
    /// `batch_id` is `None`), records it, applies its side effects, and
    /// returns it.
    ///
    /// With no batches present (or an unknown `batch_id`), returns the
    /// "b0"/"UNKNOWN" sentinel event without recording it.
    pub fn add_random_supply_event<R: Rng + ?Sized>(
        &mut self,
        batch_id: Option<&str>,
        rng: &mut R,
    ) -> SupplyChainEvent {
        let now = self.clock.now();
        let target = match batch_id {
            Some(id) => self.batches.iter().find(|b| b.id == id).cloned(),
            None if self.batches.is_empty() => None,
            None => Some(self.batches[rng.gen_range(0..self.batches.len())].clone()),
        };
        let Some(target) = target else {
            debug!("no batch available; returning sentinel event");
            return lifecycle::fallback_event(now, rng);
        };

        let progress = self
            .progress
            .get(&target.id)
            .cloned()
            .unwrap_or_default();
        let (event, next) = lifecycle::plan_event(&target, &progress, now, rng);
        self.progress.insert(target.id.clone(), next);
        self.add_supply_event(event.clone());
        event
    }

    /// Generates a tamper alert against a batch (a random one when
    /// `batch_id` is `None`), records it, and returns it. Falls back to the
    /// "b0"/"UNKNOWN" sentinel batch reference when no batch matches.
    pub fn add_random_tamper_alert<R: Rng + ?Sized>(
        &mut self,
        batch_id: Option<&str>,
        rng: &mut R,
    ) -> TamperAlert {
        let target = match batch_id {
            Some(id) => self.batches.iter().find(|b| b.id == id),
            None if self.batches.is_empty() => None,
            None => Some(&self.batches[rng.gen_range(0..self.batches.len())]),
        };
        let (target_id, target_number) = target.map_or_else(
            || ("b0".to_string(), "UNKNOWN".to_string()),
            |b| (b.id.clone(), b.batch_number.clone()),
        );

        let alert = TamperAlert {
            id: entity_id(rng, "a"),
            batch_id: target_id,
            batch_number: target_number,
            alert_type: GENERATED_ALERT_TYPES[rng.gen_range(0..GENERATED_ALERT_TYPES.len())],
            severity: GENERATED_SEVERITIES[rng.gen_range(0..GENERATED_SEVERITIES.len())],
            description: "Automatically generated alert for demo".to_string(),
            location: "Simulated Location".to_string(),
            status: AlertStatus::Open,
            timestamp: self.clock.now(),
        };
        self.add_tamper_alert(alert.clone());
        alert
    }

    /// Generates a regulatory filing for a random catalog drug, records it,
    /// and returns it. Filings start in the `submitted` state.
    pub fn add_random_fda_submission<R: Rng + ?Sized>(&mut self, rng: &mut R) -> FdaSubmission {
        let drug = &DRUG_CATALOG[rng.gen_range(0..DRUG_CATALOG.len())];
        let mut number = String::from("FDA-");
        for _ in 0..6 {
            number.push(SUBMISSION_ALPHABET[rng.gen_range(0..SUBMISSION_ALPHABET.len())] as char);
        }
        let submission = FdaSubmission {
            id: entity_id(rng, "f"),
            drug_name: drug.name.to_string(),
            submission_type: SubmissionType::AnnualReport,
            submission_number: number,
            submitted_by: MANUFACTURER_NAME.to_string(),
            submission_date: self.clock.now().date_naive(),
            status: SubmissionStatus::Submitted,
            approval_date: None,
        };
        self.add_fda_submission(submission.clone());
        submission
    }

    /// Generates an inspection record (90% pass rate), records it, and
    /// returns it. Targets the given batch number, else the newest batch,
    /// else the "BATCH-000" placeholder.
    pub fn add_random_quality_check<R: Rng + ?Sized>(
        &mut self,
        batch_number: Option<&str>,
        rng: &mut R,
    ) -> QualityCheck {
        let target = batch_number.map_or_else(
            || {
                self.batches
                    .first()
                    .map_or_else(|| "BATCH-000".to_string(), |b| b.batch_number.clone())
            },
            ToString::to_string,
        );
        let result = if rng.gen::<f64>() > 0.1 {
            CheckResult::Passed
        } else {
            CheckResult::Failed
        };
        let check = QualityCheck {
            id: entity_id(rng, "q"),
            batch_number: target,
            check_type: GENERATED_CHECK_TYPES[rng.gen_range(0..GENERATED_CHECK_TYPES.len())],
            result,
            inspector_name: "Auto Inspector".to_string(),
            stakeholder_name: MANUFACTURER_NAME.to_string(),
            timestamp: self.clock.now(),
        };
        self.add_quality_check(check.clone());
        check
    }

    // =========================================================================
    // Alert merge surface (realtime sync)
    // =========================================================================

    /// Inserts or replaces an alert by id (last write wins). Inserts go to
    /// the front, replacements stay in place.
    pub fn merge_alert_upsert(&mut self, alert: TamperAlert) {
        if let Some(existing) = self.tamper_alerts.iter_mut().find(|a| a.id == alert.id) {
            *existing = alert;
        } else {
            self.tamper_alerts.insert(0, alert);
        }
    }

    /// Removes an alert by id. Unknown ids are ignored.
    pub fn merge_alert_remove(&mut self, alert_id: &str) {
        self.tamper_alerts.retain(|a| a.id != alert_id);
    }

    /// Replaces the whole alert collection with an external snapshot.
    pub fn replace_tamper_alerts(&mut self, alerts: Vec<TamperAlert>) {
        self.tamper_alerts = alerts;
    }

    // =========================================================================
    // Seed data
    // =========================================================================

    fn seed_demo_data(&mut self) {
        let now = self.clock.now();
        let today = now.date_naive();
        let mfg = |days: i64| today - Duration::days(days);

        let b1 = Batch {
            id: "b1".to_string(),
            batch_number: "BATCH-2024-03-101".to_string(),
            drug_id: "d1".to_string(),
            drug_name: "Paracetamol 500mg".to_string(),
            manufacturer_id: MANUFACTURER_ID.to_string(),
            manufacturer_name: MANUFACTURER_NAME.to_string(),
            manufacturing_date: mfg(90),
            expiry_date: mfg(90).checked_add_months(Months::new(24)).unwrap_or(today),
            quantity: 100_000,
            current_quantity: 100_000,
            status: BatchStatus::QualityCheck,
            qr_code: "QR-BATCH-2024-03-101".to_string(),
        };
        let b2 = Batch {
            id: "b2".to_string(),
            batch_number: "BATCH-2024-05-202".to_string(),
            drug_id: "d3".to_string(),
            drug_name: "Insulin Glargine".to_string(),
            manufacturer_id: MANUFACTURER_ID.to_string(),
            manufacturer_name: MANUFACTURER_NAME.to_string(),
            manufacturing_date: mfg(30),
            expiry_date: mfg(30).checked_add_months(Months::new(24)).unwrap_or(today),
            quantity: 10_000,
            current_quantity: 10_000,
            status: BatchStatus::InProduction,
            qr_code: "QR-BATCH-2024-05-202".to_string(),
        };
        self.add_batch(b1.clone());
        self.add_batch(b2.clone());

        let seeded_event = |id: &str, batch: &Batch, event_type: EventType, age_days: i64| {
            SupplyChainEvent {
                id: id.to_string(),
                batch_id: batch.id.clone(),
                batch_number: batch.batch_number.clone(),
                event_type,
                from_stakeholder: "Current Holder".to_string(),
                to_stakeholder: "Current Holder".to_string(),
                quantity: batch.quantity,
                location: crate::registry::DEFAULT_ORIGIN.to_string(),
                timestamp: now - Duration::days(age_days),
                blockchain_hash: "0".repeat(64),
                qc_result: None,
                inspector_name: None,
                approver: None,
            }
        };
        self.add_supply_event(seeded_event("e1", &b1, EventType::Manufactured, 90));
        self.add_supply_event(seeded_event("e2", &b1, EventType::QualityCheck, 60));
        self.add_supply_event(seeded_event("e3", &b2, EventType::Manufactured, 30));
        self.progress.insert(
            b1.id.clone(),
            BatchProgress {
                last_event: Some(EventType::QualityCheck),
                location: crate::registry::DEFAULT_ORIGIN.to_string(),
            },
        );
        self.progress.insert(
            b2.id.clone(),
            BatchProgress {
                last_event: Some(EventType::Manufactured),
                location: crate::registry::DEFAULT_ORIGIN.to_string(),
            },
        );

        for (i, (value, minutes_ago)) in [(4.9, 3), (5.1, 2), (5.0, 1)].iter().enumerate() {
            self.add_iot_reading(IoTReading {
                id: format!("r{}", i + 1),
                sensor_id: "s1".to_string(),
                sensor_type: crate::model::SensorType::Temperature,
                value: *value,
                unit: "°C".to_string(),
                timestamp: now - Duration::minutes(*minutes_ago),
                is_alert: false,
            });
        }
        // Continue the seeded cold-chain series from its last point.
        self.telemetry.seed_state(
            "s1",
            SensorState {
                value: 5.0,
                at: now - Duration::minutes(1),
            },
        );

        self.add_tamper_alert(TamperAlert {
            id: "a1".to_string(),
            batch_id: b1.id.clone(),
            batch_number: b1.batch_number.clone(),
            alert_type: AlertType::TemperatureViolation,
            severity: AlertSeverity::Medium,
            description: "Cold-chain excursion during loading".to_string(),
            location: crate::registry::DEFAULT_ORIGIN.to_string(),
            status: AlertStatus::Open,
            timestamp: now - Duration::hours(6),
        });

        self.add_fda_submission(FdaSubmission {
            id: "f1".to_string(),
            drug_name: b1.drug_name.clone(),
            submission_type: SubmissionType::AnnualReport,
            submission_number: "FDA-SEED01".to_string(),
            submitted_by: MANUFACTURER_NAME.to_string(),
            submission_date: mfg(45),
            status: SubmissionStatus::UnderReview,
            approval_date: None,
        });

        self.add_quality_check(QualityCheck {
            id: "q1".to_string(),
            batch_number: b1.batch_number.clone(),
            check_type: CheckType::Production,
            result: CheckResult::Passed,
            inspector_name: "R. Mehta".to_string(),
            stakeholder_name: MANUFACTURER_NAME.to_string(),
            timestamp: now - Duration::days(60),
        });
        self.add_quality_check(QualityCheck {
            id: "q2".to_string(),
            batch_number: b2.batch_number.clone(),
            check_type: CheckType::Incoming,
            result: CheckResult::Passed,
            inspector_name: "R. Mehta".to_string(),
            stakeholder_name: MANUFACTURER_NAME.to_string(),
            timestamp: now - Duration::days(29),
        });
    }
}

impl std::fmt::Debug for SupplyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupplyStore")
            .field("batches", &self.batches.len())
            .field("iot_readings", &self.iot_readings.len())
            .field("supply_chain_events", &self.supply_chain_events.len())
            .field("tamper_alerts", &self.tamper_alerts.len())
            .field("fda_submissions", &self.fda_submissions.len())
            .field("quality_checks", &self.quality_checks.len())
            .finish_non_exhaustive()
    }
}
