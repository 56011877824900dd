mod common;

use blockagotchi_core::command::{Action, Command};
use blockagotchi_core::lifecycle::{biotype_for, condition_for};
use blockagotchi_data::{Biotype, Condition, Holder};
use chrono::Duration;
use common::{t0, ProcessorBuilder, SINK};
use proptest::prelude::*;

const ACTORS: [&str; 3] = ["0xa1", "0xb2", "0xc3"];
const FUNDS: u64 = 80;

prop_compose! {
    fn arb_action()(
        kind in 0u8..7,
        pick in 0usize..4,
        item_id in 1u32..=7,
        paid in any::<bool>()
    ) -> Action {
        let food = ["Fish", "Meat", "Vegetal", "Fruit"][pick];
        match kind {
            0 => Action::CreateCreature { name: format!("pet{pick}") },
            1 => Action::Feed { food_type: food.to_string() },
            2 => Action::Walk { walk_type: "park".to_string() },
            3 => Action::Bathe { bath_type: "bubble".to_string(), is_paid: paid },
            4 => Action::BuyItem { item_id },
            5 => Action::ApplyItem { item_id },
            _ => Action::RemoveItem { item_id },
        }
    }
}

prop_compose! {
    fn arb_command()(
        actor in 0..ACTORS.len(),
        hours in 0i64..96,
        action in arb_action()
    ) -> (usize, i64, Action) {
        (actor, hours, action)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_world_invariants_hold(steps in prop::collection::vec(arb_command(), 1..120)) {
        let mut builder = ProcessorBuilder::new().with_config(|c| c.world.supply_cap = 4);
        for actor in ACTORS {
            builder = builder.with_balance(actor, FUNDS);
        }
        let mut h = builder.build();
        let mut now = t0();
        let mut stages = std::collections::BTreeMap::new();

        for (actor, hours, action) in steps {
            now += Duration::hours(hours);
            let _ = h.processor.process(&Command::new(ACTORS[actor], now, action));

            let world = h.processor.world();
            prop_assert!(world.eggs_created() <= world.supply_cap());
            for creature in world.creatures() {
                let previous = stages.insert(creature.identity.id, creature.lifecycle.stage);
                if let Some(previous) = previous {
                    prop_assert!(creature.lifecycle.stage >= previous);
                }
                prop_assert_eq!(
                    creature.overall_score(),
                    creature.care.happiness + creature.lifecycle.age
                );
                if !creature.is_alive() {
                    prop_assert!(creature.lifecycle.died_at.is_some());
                }
            }
            for instance in world.items().iter() {
                let id = instance.instance_id;
                let count = |held: &[u64]| held.iter().filter(|i| **i == id).count();
                let holders = match &instance.holder {
                    Holder::Inventory(owner) => {
                        world.user(owner).map_or(0, |u| count(&u.inventory))
                    }
                    Holder::Equipped(c) => world.creature(*c).map_or(0, |c| count(&c.equipped)),
                };
                prop_assert_eq!(holders, 1);
            }
        }

        // Value only moves between users and the sink.
        let total: u64 = ACTORS.iter().map(|a| h.balance(a)).sum::<u64>() + h.balance(SINK);
        prop_assert_eq!(total, FUNDS * ACTORS.len() as u64);
    }

    #[test]
    fn test_biotype_is_a_pure_threshold(feedings in 0usize..500, age in 0i64..200) {
        let days = age as usize + 1;
        let expected = if feedings > 2 * days {
            Biotype::Fat
        } else if feedings < days {
            Biotype::Skinny
        } else {
            Biotype::Normal
        };
        prop_assert_eq!(biotype_for(feedings, age), expected);
        prop_assert_eq!(biotype_for(feedings, age), biotype_for(feedings, age));
    }

    #[test]
    fn test_more_walks_never_worsens_condition(days in 0i64..10, walks in 0usize..40) {
        let rank = |c: Condition| match c {
            Condition::Muscle => 0,
            Condition::Normal => 1,
            Condition::Sedentary => 2,
        };
        prop_assert!(rank(condition_for(days, walks + 1)) <= rank(condition_for(days, walks)));
        prop_assert!(rank(condition_for(days, walks)) <= rank(condition_for(days + 1, walks)));
    }
}
