//! Cross-crate feed contracts: battle isolation, failure isolation,
//! mixed-encoding HP flow, and concurrent delivery/poll access.

use ringside_client::{
    BattleFeed, BattleId, CombatantReveal, ConditionScope, HpDeltaKind, HpReport, PositionToken,
    SideData, SideId,
};

fn sides() -> (SideData, SideData) {
    (
        SideData::new(vec!["Alice".to_string()]),
        SideData::new(vec!["Bob".to_string()]),
    )
}

fn pos(token: &str) -> PositionToken {
    PositionToken::parse(token).unwrap()
}

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn reset_isolates_battles() {
    let feed = BattleFeed::new();
    let old_id = BattleId::new("battle-1");
    let (s1, s2) = sides();

    feed.on_battle_init(old_id.clone(), &s1, &s2, "Alice");
    feed.on_switch(
        &old_id,
        &pos("p1a"),
        &CombatantReveal::new("Vexar", Some(HpReport::fraction(1.0))),
    );
    feed.on_message_batch(&old_id, &lines(&["sidestart p1 reflect", "turn 1"]));
    assert_eq!(feed.conditions(ConditionScope::Side(SideId::P1)).len(), 1);

    // End the old battle, start a new one
    feed.on_battle_end(&old_id);
    let new_id = BattleId::new("battle-2");
    feed.on_battle_init(new_id.clone(), &s1, &s2, "Alice");

    // Queries return empty/default state
    assert!(feed.find_combatant("Vexar").is_none());
    assert!(feed.conditions(ConditionScope::Side(SideId::P1)).is_empty());
    assert!(feed.conditions(ConditionScope::Field).is_empty());
    assert_eq!(feed.turn(), 0);
    assert!(feed.consume_damage_events().is_empty());

    // A stale-tagged update from the prior battle is a no-op
    feed.on_message_batch(&old_id, &lines(&["sidestart p1 reflect"]));
    feed.on_health_change(&old_id, &pos("p1a"), &HpReport::fraction(0.5));
    assert!(feed.conditions(ConditionScope::Side(SideId::P1)).is_empty());
    assert!(feed.consume_damage_events().is_empty());
    assert_eq!(feed.battle_id(), Some(new_id));
}

#[test]
fn unmatched_text_never_mutates_state() {
    let feed = BattleFeed::new();
    let id = BattleId::new("battle-3");
    let (s1, s2) = sides();
    feed.on_battle_init(id.clone(), &s1, &s2, "Bob");
    feed.on_switch(&id, &pos("p1a"), &CombatantReveal::new("Vexar", None));
    feed.on_message_batch(&id, &lines(&["boost atk 2 Vexar", "weather rain start"]));

    let before = feed.state_snapshot().unwrap();
    feed.on_message_batch(
        &id,
        &lines(&["the crowd is on its feet", "somebody waves a flag"]),
    );
    let after = feed.state_snapshot().unwrap();

    assert_eq!(before, after);
}

#[test]
fn mixed_encoding_damage_flow() {
    let feed = BattleFeed::new();
    let id = BattleId::new("battle-4");
    let (s1, s2) = sides();
    feed.on_battle_init(id.clone(), &s1, &s2, "Alice");

    // Absolute switch-in baseline, fractional follow-up report
    feed.on_switch(
        &id,
        &pos("p2a"),
        &CombatantReveal::new("Weezing", Some(HpReport::absolute(240.0, 240.0))),
    );
    feed.on_health_change(&id, &pos("p2a"), &HpReport::fraction(0.5));

    let events = feed.consume_damage_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, HpDeltaKind::Damage);
    assert!((events[0].percent - 50.0).abs() < 0.5);
}

#[test]
fn switch_reseeds_baseline() {
    let feed = BattleFeed::new();
    let id = BattleId::new("battle-5");
    let (s1, s2) = sides();
    feed.on_battle_init(id.clone(), &s1, &s2, "Alice");

    // Vexar takes damage, switches out at 60%
    feed.on_switch(
        &id,
        &pos("p1a"),
        &CombatantReveal::new("Vexar", Some(HpReport::fraction(1.0))),
    );
    feed.on_health_change(&id, &pos("p1a"), &HpReport::fraction(0.6));
    feed.on_switch(
        &id,
        &pos("p1a"),
        &CombatantReveal::new("Drelba", Some(HpReport::fraction(1.0))),
    );
    feed.consume_damage_events();

    // Healed on the bench; the switch-in report is the new baseline
    feed.on_switch(
        &id,
        &pos("p1a"),
        &CombatantReveal::new("Vexar", Some(HpReport::fraction(0.9))),
    );
    feed.on_health_change(&id, &pos("p1a"), &HpReport::fraction(0.7));

    let events = feed.consume_damage_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].combatant, "Vexar");
    // 20% off the switch-in value, not 10% off the pre-switch 60%
    assert!((events[0].percent - 20.0).abs() < 0.5);
}

#[test]
fn knockout_reported_distinctly_and_once() {
    let feed = BattleFeed::new();
    let id = BattleId::new("battle-6");
    let (s1, s2) = sides();
    feed.on_battle_init(id.clone(), &s1, &s2, "Alice");

    feed.on_switch(
        &id,
        &pos("p2a"),
        &CombatantReveal::new("Weezing", Some(HpReport::fraction(0.3))),
    );
    feed.on_health_change(&id, &pos("p2a"), &HpReport::parse("0 fnt").unwrap());
    feed.on_health_change(&id, &pos("p2a"), &HpReport::parse("0 fnt").unwrap());

    let events = feed.consume_damage_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, HpDeltaKind::Knockout);

    let ko = feed.find_combatant("Weezing").unwrap();
    assert!(feed.combatant(ko).unwrap().knocked_out);
}

#[test]
fn spectator_and_participant_resolution() {
    let (s1, s2) = sides();

    // Observer on side 1
    let feed = BattleFeed::new();
    feed.on_battle_init(BattleId::new("b"), &s1, &s2, "Alice");
    let r = feed.resolve_side(SideId::P1).unwrap();
    assert!(r.is_ally && !r.is_spectating);

    // Observer on side 2
    let feed = BattleFeed::new();
    feed.on_battle_init(BattleId::new("b"), &s1, &s2, "Bob");
    assert!(!feed.resolve_side(SideId::P1).unwrap().is_ally);
    assert!(feed.resolve_side(SideId::P2).unwrap().is_ally);

    // Observer on neither side: spectating, left side fixed as ally
    let feed = BattleFeed::new();
    feed.on_battle_init(BattleId::new("b"), &s1, &s2, "Carol");
    let r = feed.resolve_side(SideId::P1).unwrap();
    assert!(r.is_ally && r.is_spectating);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_delivery_and_poll() {
    let feed = BattleFeed::new();
    let id = BattleId::new("battle-busy");
    let (s1, s2) = sides();
    feed.on_battle_init(id.clone(), &s1, &s2, "Alice");
    feed.on_switch(
        &id,
        &pos("p1a"),
        &CombatantReveal::new("Vexar", Some(HpReport::fraction(1.0))),
    );

    let writer = {
        let feed = feed.clone();
        let id = id.clone();
        tokio::spawn(async move {
            for turn in 1..=50u32 {
                feed.on_message_batch(
                    &id,
                    &lines(&["sidestart p1 reflect", &format!("turn {turn}")]),
                );
                feed.on_health_change(
                    &id,
                    &pos("p1a"),
                    &HpReport::fraction(1.0 - (turn as f32) * 0.01),
                );
                tokio::task::yield_now().await;
            }
        })
    };

    let poller = {
        let feed = feed.clone();
        tokio::spawn(async move {
            let mut drained = 0usize;
            for _ in 0..200 {
                let conditions = feed.conditions(ConditionScope::Side(SideId::P1));
                assert!(conditions.len() <= 1);
                if let Some(vexar) = feed.find_combatant("Vexar") {
                    let snap = feed.combatant(vexar).unwrap();
                    assert!((0.0..=1.0).contains(&snap.hp_fraction));
                }
                drained += feed.consume_damage_events().len();
                tokio::task::yield_now().await;
            }
            drained
        })
    };

    writer.await.unwrap();
    let drained = poller.await.unwrap() + feed.consume_damage_events().len();

    // Every delta is delivered exactly once across the two drains
    assert_eq!(drained, 50);
    assert_eq!(feed.turn(), 50);
}
