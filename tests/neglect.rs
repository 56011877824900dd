mod common;

use blockagotchi_core::command::Action;
use common::{t0, ProcessorBuilder};
use chrono::Duration;

#[test]
fn test_seven_days_without_food_is_survivable() {
    let mut h = ProcessorBuilder::new().with_balance("a", 5).build();
    assert_accepted!(h.create("a", 0, "Rex"));
    assert_accepted!(h.walk("a", 7));
    assert!(h.creature_of("a").is_alive());
    // Feeding resets the clock.
    assert_accepted!(h.feed("a", 7, "Meat"));
    assert_accepted!(h.walk("a", 14));
    assert!(h.creature_of("a").is_alive());
}

#[test]
fn test_death_is_checked_on_any_command() {
    let mut h = ProcessorBuilder::new().with_balance("a", 50).build();
    assert_accepted!(h.create("a", 0, "Rex"));
    // Buying an item still runs the neglect check first.
    assert_accepted!(h.on_day("a", 9, Action::BuyItem { item_id: 1 }));
    let rex = h.creature_of("a");
    assert!(!rex.is_alive());
    assert_eq!(rex.lifecycle.died_at, Some(t0() + Duration::days(9)));
}

#[test]
fn test_dead_creature_rejects_all_care() {
    let mut h = ProcessorBuilder::new().with_balance("a", 50).build();
    assert_accepted!(h.create("a", 0, "Rex"));
    assert_accepted!(h.on_day("a", 0, Action::BuyItem { item_id: 1 }));
    assert_accepted!(h.on_day("a", 0, Action::ApplyItem { item_id: 1 }));

    assert_rejected!(h.feed("a", 8, "Fish"), "User a does not have a blockagotchi to feed.");
    assert_rejected!(h.walk("a", 9));
    assert_rejected!(h.bathe("a", 9, true));
    assert_rejected!(h.on_day("a", 9, Action::RemoveItem { item_id: 1 }));

    let rex = h.creature_of("a");
    assert!(!rex.is_alive());
    assert!(rex.history.food.is_empty());
    assert!(rex.history.walks.is_empty());
    assert_eq!(rex.equipped.len(), 1);
    // Paid bath was refused before any charge.
    assert_eq!(h.balance("a"), 39);
}

#[test]
fn test_death_time_is_stable() {
    let mut h = ProcessorBuilder::new().with_balance("a", 5).build();
    assert_accepted!(h.create("a", 0, "Rex"));
    assert_rejected!(h.feed("a", 10, "Fish"));
    assert_rejected!(h.feed("a", 30, "Fish"));
    assert_eq!(
        h.creature_of("a").lifecycle.died_at,
        Some(t0() + Duration::days(10))
    );
    assert_eq!(h.processor.metrics().deaths(), 1);
}

#[test]
fn test_neglect_window_follows_config() {
    let mut h = ProcessorBuilder::new()
        .with_config(|c| c.care.neglect_days = 2)
        .with_balance("a", 5)
        .build();
    assert_accepted!(h.create("a", 0, "Rex"));
    assert_accepted!(h.walk("a", 2));
    assert_rejected!(h.walk("a", 3));
}
