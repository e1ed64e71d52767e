//! Scripted Battle Example
//!
//! Drives a BattleFeed with a canned packet sequence and prints the derived
//! model at the end of each turn, the way a rendering overlay would poll it.

use anyhow::Result;
use ringside_client::{
    BattleFeed, BattleId, CombatantReveal, ConditionScope, HpReport, PositionToken, SideData,
    SideId,
};

fn print_model(feed: &BattleFeed) {
    let Some(state) = feed.state_snapshot() else {
        return;
    };

    println!("\n{}", "=".repeat(60));
    println!("TURN {}", state.turn);
    println!("{}", "=".repeat(60));

    let field = feed.conditions(ConditionScope::Field);
    if !field.is_empty() {
        let parts: Vec<String> = field.iter().map(format_condition).collect();
        println!("Field: {}", parts.join(", "));
    }

    for side_id in [SideId::P1, SideId::P2] {
        let side = state.side(side_id);
        let resolution = feed.resolve_side(side_id).unwrap();
        let label = if resolution.is_spectating {
            if resolution.is_ally { "(left)" } else { "(right)" }
        } else if resolution.is_ally {
            "(you)"
        } else {
            "(opponent)"
        };

        println!(
            "\n{} {} {}",
            side_id.as_str().to_uppercase(),
            side.actor().unwrap_or("?"),
            label
        );

        let conditions = feed.conditions(ConditionScope::Side(side_id));
        if !conditions.is_empty() {
            let parts: Vec<String> = conditions.iter().map(format_condition).collect();
            println!("  Conditions: {}", parts.join(", "));
        }

        for id in &side.combatants {
            let Some(c) = feed.combatant(*id) else { continue };
            let mut parts = vec![c.name.clone()];

            if c.knocked_out {
                parts.push("(down)".to_string());
            } else {
                parts.push(format!("{:.0}%", c.hp_percent()));
                if c.active {
                    parts.push("[active]".to_string());
                }
                if let Some(ailment) = c.ailment {
                    parts.push(format!("[{ailment}]"));
                }
                for (stat, stage) in c.stages.entries() {
                    parts.push(format!("{}{:+}", stat.as_str(), stage));
                }
            }

            println!("  - {}", parts.join(" "));
        }
    }

    for event in feed.consume_damage_events() {
        println!("\n  * {} {:?} {:.1}%", event.combatant, event.kind, event.percent);
    }

    println!("{}", "=".repeat(60));
}

fn format_condition(c: &ringside_client::ActiveCondition) -> String {
    match c.remaining_range() {
        Some((_, max)) if c.exact => format!("{} ({} left)", c.kind, max),
        Some((min, max)) => format!("{} ({}-{} left)", c.kind, min, max),
        None => format!("{} (persistent)", c.kind),
    }
}

fn main() -> Result<()> {
    let feed = BattleFeed::new();
    let battle = BattleId::new("battle-arena-2209");

    // Side payloads arrive as JSON from the transport
    let side1 = SideData::from_json(r#"{"actors":["Alice"]}"#)?;
    let side2 = SideData::from_json(r#"{"actors":["Bob"]}"#)?;

    feed.on_battle_init(battle.clone(), &side1, &side2, "Alice");

    let p1a = PositionToken::parse("p1a").expect("valid token");
    let p2a = PositionToken::parse("p2a").expect("valid token");

    feed.on_switch(
        &battle,
        &p1a,
        &CombatantReveal::new("Vexar", Some(HpReport::absolute(270.0, 270.0))),
    );
    feed.on_switch(
        &battle,
        &p2a,
        &CombatantReveal::new("Weezing", Some(HpReport::fraction(1.0))),
    );

    let turns: Vec<Vec<&str>> = vec![
        vec!["turn 1", "weather sandstorm start", "boost atk 2 Vexar"],
        vec!["turn 2", "sidestart p2 reflect", "status par Vexar"],
        vec!["turn 3", "sidestart p1 stealthrock"],
        vec!["turn 4", "switch p2a Duskhowl", "faint Weezing"],
        vec!["turn 5", "weather sandstorm end", "curestatus Vexar"],
    ];

    for batch in turns {
        let lines: Vec<String> = batch.iter().map(|s| s.to_string()).collect();
        feed.on_message_batch(&battle, &lines);
        feed.on_health_change(&battle, &p2a, &HpReport::fraction(0.8));
        print_model(&feed);
    }

    feed.on_battle_end(&battle);
    println!("\nBattle over.");

    Ok(())
}
