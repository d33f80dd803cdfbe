//! Property tests: auto-generated event histories are valid walks on the
//! lifecycle graph, and transfers follow the location graph.

use pharmatrace_core::{
    CoreConfig, EventType, SupplyStore, is_valid_transition, registry,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

proptest! {
    #[test]
    fn event_histories_are_walks_on_the_transition_graph(
        seed in any::<u64>(),
        steps in 1usize..60,
    ) {
        let mut store = SupplyStore::new(CoreConfig::default());
        let mut rng = StdRng::seed_from_u64(seed);
        let batch = store.add_random_batch(&mut rng);
        for _ in 0..steps {
            store.add_random_supply_event(Some(&batch.id), &mut rng);
        }

        // Stored newest first; replay in timestamp (insertion) order.
        let mut last = None;
        for event in store.supply_chain_events().iter().rev() {
            prop_assert!(
                is_valid_transition(last, event.event_type),
                "{:?} -> {:?} violates the lifecycle graph", last, event.event_type
            );
            last = Some(event.event_type);
        }
    }

    #[test]
    fn transfers_move_to_adjacent_locations_and_nothing_else_moves(
        seed in any::<u64>(),
        steps in 1usize..80,
    ) {
        let mut store = SupplyStore::new(CoreConfig::default());
        let mut rng = StdRng::seed_from_u64(seed);
        let batch = store.add_random_batch(&mut rng);
        for _ in 0..steps {
            store.add_random_supply_event(Some(&batch.id), &mut rng);
        }

        let mut location = registry::DEFAULT_ORIGIN.to_string();
        for event in store.supply_chain_events().iter().rev() {
            if event.event_type == EventType::Transferred {
                prop_assert!(
                    registry::neighbors(&location).contains(&event.location.as_str()),
                    "transfer from {} to non-adjacent {}", location, event.location
                );
            } else {
                prop_assert_eq!(&event.location, &location);
            }
            location = event.location.clone();
        }
    }

    #[test]
    fn the_first_two_events_are_always_manufacture_then_inspection(seed in any::<u64>()) {
        let mut store = SupplyStore::new(CoreConfig::default());
        let mut rng = StdRng::seed_from_u64(seed);
        let batch = store.add_random_batch(&mut rng);
        let second = store.add_random_supply_event(Some(&batch.id), &mut rng);

        let events = store.supply_chain_events();
        prop_assert_eq!(events[1].event_type, EventType::Manufactured);
        // Never approved/rejected straight after manufacture.
        prop_assert_eq!(second.event_type, EventType::QualityCheck);
    }
}
