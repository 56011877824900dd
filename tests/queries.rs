mod common;

use blockagotchi_core::command::Action;
use common::{Harness, ProcessorBuilder};

fn populated() -> Harness {
    let mut h = ProcessorBuilder::new()
        .with_balance("0xaa", 50)
        .with_balance("0xbb", 50)
        .with_balance("0xcc", 50)
        .build();
    for (actor, name) in [("0xaa", "Ann"), ("0xbb", "Bob"), ("0xcc", "Cid")] {
        assert_accepted!(h.create(actor, 0, name));
    }
    h
}

#[test]
fn test_ranking_ties_break_on_id() {
    let h = populated();
    let ranking = h.query("ranking");
    let ids: Vec<u64> = ranking
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(ranking[0]["rank"], 1);
    assert_eq!(ranking[2]["overall_score"], 50);
}

#[test]
fn test_ranking_follows_score() {
    let mut h = populated();
    assert_accepted!(h.feed("0xcc", 1, "Fish"));
    assert_accepted!(h.on_day("0xbb", 1, Action::BuyItem { item_id: 3 }));
    assert_accepted!(h.on_day("0xbb", 1, Action::ApplyItem { item_id: 3 }));

    let ranking = h.query("RANKING");
    assert_eq!(ranking[0]["name"], "Bob");
    // Scarf bonus 20 plus one day of age.
    assert_eq!(ranking[0]["overall_score"], 71);
    assert_eq!(ranking[1]["name"], "Cid");
    // Fed on day 1: happiness 60, age 1.
    assert_eq!(ranking[1]["overall_score"], 61);
    assert_eq!(ranking[2]["owner"], "0xaa");
}

#[test]
fn test_ranking_is_identical_across_calls() {
    let mut h = populated();
    assert_accepted!(h.walk("0xaa", 2));
    assert_eq!(h.query("ranking"), h.query("ranking"));
}

#[test]
fn test_creature_projection() {
    let mut h = populated();
    assert_accepted!(h.feed("0xaa", 1, "Meat"));
    assert_accepted!(h.walk("0xaa", 1));

    let view = h.query("creature/1");
    assert_eq!(view["name"], "Ann");
    assert_eq!(view["owner"], "0xaa");
    assert_eq!(view["stage"], "Blob");
    assert_eq!(view["type"], serde_json::Value::Null);
    assert_eq!(view["alive"], true);
    assert_eq!(view["happiness"], 65);
    assert_eq!(view["overall_score"], 66);
    assert_eq!(view["food_history"], serde_json::json!(["Meat"]));
    assert_eq!(view["walk_history"].as_array().unwrap().len(), 1);

    assert_eq!(h.query("user_creature/0xAA"), view);
}

#[test]
fn test_user_projection() {
    let mut h = populated();
    assert_accepted!(h.on_day("0xaa", 0, Action::BuyItem { item_id: 1 }));
    let user = h.query("user/0xaa");
    assert_eq!(user["creature_id"], 1);
    assert_eq!(user["inventory"][0]["item_id"], 1);
}

#[test]
fn test_balances_and_shop() {
    let h = populated();
    let balance = h.query("balance/ether/0xaa");
    assert_eq!(balance["balance"], 49);
    assert_eq!(h.query("balance/ether/0xnobody")["balance"], 0);

    let shop = h.query("shop_items");
    let shop = shop.as_array().unwrap();
    assert_eq!(shop.len(), 7);
    assert_eq!(shop[0]["name"], "Hat");
    assert_eq!(shop[6]["price"], 30);

    assert_eq!(h.query("all_creatures").as_array().unwrap().len(), 3);
}

#[test]
fn test_failures_become_error_payloads() {
    let h = populated();
    assert_eq!(h.query("creature/99")["error"], "creature 99 not found");
    assert_eq!(
        h.query("creature/abc")["error"],
        "bad argument: invalid creature id 'abc'"
    );
    assert_eq!(
        h.query("balance/gold/0xaa")["error"],
        "bad argument: unsupported token 'gold'"
    );
    assert_eq!(h.query("weather")["error"], "unknown query path 'weather'");
    assert!(h.query("user_creature/0xdd")["error"]
        .as_str()
        .unwrap()
        .ends_with("not found"));
}

#[test]
fn test_queries_do_not_mutate() {
    let h = populated();
    let before = h.query("all_creatures");
    for path in ["ranking", "user/0xaa", "creature/2", "shop_items"] {
        let _ = h.query(path);
    }
    assert_eq!(h.query("all_creatures"), before);
}
