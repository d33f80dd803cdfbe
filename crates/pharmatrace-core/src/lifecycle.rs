//! Supply-chain lifecycle state machine.
//!
//! Encodes which event type may legally follow a batch's last recorded
//! event, and how a `transferred` event moves the batch through the
//! location graph. The machine constrains only the auto-generated path;
//! user-submitted events are trusted as-is (the store still applies the
//! same status side effects on ingest).
//!
//! Transition graph, starting from the implicit "no events yet" state:
//!
//! ```text
//! none          -> manufactured
//! manufactured  -> quality_check
//! quality_check -> approved | rejected
//! approved      -> transferred
//! transferred   -> received
//! received      -> quality_check | transferred
//! rejected      -> quality_check
//! ```

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::ident::{chain_token, entity_id};
use crate::model::{Batch, EventType, SupplyChainEvent};
use crate::registry::{DEFAULT_ORIGIN, DISTRIBUTOR_NAME, MANUFACTURER_NAME, neighbors};

/// Placeholder party name on events that do not change custody.
const CURRENT_HOLDER: &str = "Current Holder";

/// Per-batch progress through the lifecycle: the last recorded event type
/// (None before the first event) and the batch's current location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchProgress {
    pub last_event: Option<EventType>,
    pub location: String,
}

impl Default for BatchProgress {
    fn default() -> Self {
        Self {
            last_event: None,
            location: DEFAULT_ORIGIN.to_string(),
        }
    }
}

/// Event types that may legally follow `last` on the auto-generated path.
///
/// Event types outside the graph (`recalled`) restart the walk at
/// `manufactured`, matching the generator's historical fallback.
#[must_use]
pub fn allowed_next(last: Option<EventType>) -> &'static [EventType] {
    match last {
        None => &[EventType::Manufactured],
        Some(EventType::Manufactured) => &[EventType::QualityCheck],
        Some(EventType::QualityCheck) => &[EventType::Approved, EventType::Rejected],
        Some(EventType::Approved) => &[EventType::Transferred],
        Some(EventType::Transferred) => &[EventType::Received],
        Some(EventType::Received) => &[EventType::QualityCheck, EventType::Transferred],
        Some(EventType::Rejected) => &[EventType::QualityCheck],
        Some(EventType::Recalled) => &[EventType::Manufactured],
    }
}

/// Whether `next` is a legal successor of `last` on the auto-generated path.
#[must_use]
pub fn is_valid_transition(last: Option<EventType>, next: EventType) -> bool {
    allowed_next(last).contains(&next)
}

/// Plans the next auto-generated event for `batch`.
///
/// Picks a legal next event type uniformly at random, computes the location
/// transition (only `transferred` moves the batch, to a uniformly chosen
/// neighbor of its current location), and emits the fully formed event plus
/// the updated progress. Pure apart from the supplied `now` and `rng`; the
/// caller records the event and persists the progress.
pub fn plan_event<R: Rng + ?Sized>(
    batch: &Batch,
    progress: &BatchProgress,
    now: DateTime<Utc>,
    rng: &mut R,
) -> (SupplyChainEvent, BatchProgress) {
    let choices = allowed_next(progress.last_event);
    let event_type = choices[rng.gen_range(0..choices.len())];

    let location = if event_type == EventType::Transferred {
        let reachable = neighbors(&progress.location);
        if reachable.is_empty() {
            progress.location.clone()
        } else {
            reachable[rng.gen_range(0..reachable.len())].to_string()
        }
    } else {
        progress.location.clone()
    };

    let (from_stakeholder, to_stakeholder) = if event_type == EventType::Transferred {
        (MANUFACTURER_NAME.to_string(), DISTRIBUTOR_NAME.to_string())
    } else {
        (CURRENT_HOLDER.to_string(), CURRENT_HOLDER.to_string())
    };

    let event = SupplyChainEvent {
        id: entity_id(rng, "e"),
        batch_id: batch.id.clone(),
        batch_number: batch.batch_number.clone(),
        event_type,
        from_stakeholder,
        to_stakeholder,
        quantity: batch.quantity,
        location: location.clone(),
        timestamp: now,
        blockchain_hash: chain_token(rng),
        qc_result: None,
        inspector_name: None,
        approver: None,
    };
    let next = BatchProgress {
        last_event: Some(event_type),
        location,
    };
    (event, next)
}

/// Builds the sentinel event returned when no batch exists to attach an
/// event to. The caller surfaces it without recording it.
pub fn fallback_event<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> SupplyChainEvent {
    SupplyChainEvent {
        id: entity_id(rng, "e"),
        batch_id: "b0".to_string(),
        batch_number: "UNKNOWN".to_string(),
        event_type: EventType::Manufactured,
        from_stakeholder: MANUFACTURER_NAME.to_string(),
        to_stakeholder: MANUFACTURER_NAME.to_string(),
        quantity: 0,
        location: DEFAULT_ORIGIN.to_string(),
        timestamp: now,
        blockchain_hash: chain_token(rng),
        qc_result: None,
        inspector_name: None,
        approver: None,
    }
}
