//! Shared identity vocabulary for battle packets

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::ParseError;
use crate::report::HpReport;

/// One of the two sides in a battle (wire tokens "p1", "p2")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SideId {
    P1,
    P2,
}

impl SideId {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "p1" => Some(SideId::P1),
            "p2" => Some(SideId::P2),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SideId::P1 => "p1",
            SideId::P2 => "p2",
        }
    }

    /// The other side
    pub fn opposite(&self) -> Self {
        match self {
            SideId::P1 => SideId::P2,
            SideId::P2 => SideId::P1,
        }
    }

    /// Array index for per-side storage
    pub fn index(&self) -> usize {
        match self {
            SideId::P1 => 0,
            SideId::P2 => 1,
        }
    }
}

/// Stat that can carry a stage modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
    Accuracy,
    Evasion,
}

impl Stat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "atk" => Some(Stat::Atk),
            "def" => Some(Stat::Def),
            "spa" => Some(Stat::Spa),
            "spd" => Some(Stat::Spd),
            "spe" => Some(Stat::Spe),
            "accuracy" => Some(Stat::Accuracy),
            "evasion" => Some(Stat::Evasion),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Atk => "atk",
            Stat::Def => "def",
            Stat::Spa => "spa",
            Stat::Spd => "spd",
            Stat::Spe => "spe",
            Stat::Accuracy => "accuracy",
            Stat::Evasion => "evasion",
        }
    }

    /// All stats, in stage-display order
    pub fn all() -> &'static [Stat] {
        &[
            Stat::Atk,
            Stat::Def,
            Stat::Spa,
            Stat::Spd,
            Stat::Spe,
            Stat::Accuracy,
            Stat::Evasion,
        ]
    }
}

/// Locator for the actor/slot a combatant occupies, e.g. "p2a" or "p1a: Vexar"
#[derive(Debug, Clone, PartialEq)]
pub struct PositionToken {
    /// Side the slot belongs to
    pub side: SideId,
    /// Slot letter (a, b, ...), if the token carries one
    pub slot: Option<char>,
    /// Combatant's display name, if the token carries one
    pub name: Option<String>,
}

impl PositionToken {
    /// Parse a position token like "p1a", "p2", or "p1a: Vexar"
    pub fn parse(s: &str) -> Option<Self> {
        let (pos_part, name) = match s.split_once(": ") {
            Some((pos, name)) => (pos, Some(name.to_string())),
            None => (s, None),
        };

        let side = SideId::parse(pos_part.get(..2)?)?;
        let slot = pos_part.chars().nth(2);

        Some(PositionToken { side, slot, name })
    }
}

/// Actors on one side of the battle, as sent in a battle-init packet
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SideData {
    /// Display names of the actors controlling this side
    pub actors: Vec<String>,
}

impl SideData {
    pub fn new(actors: Vec<String>) -> Self {
        Self { actors }
    }

    /// Whether the given observer id names an actor on this side
    pub fn contains(&self, observer: &str) -> bool {
        self.actors.iter().any(|a| a == observer)
    }

    /// Parse a side payload from its JSON wire form, e.g. `{"actors":["Alice"]}`
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload)
            .map_err(|e| ParseError::InvalidFormat(format!("side payload: {e}")).into())
    }
}

/// Combatant identity revealed by a switch-in
#[derive(Debug, Clone, PartialEq)]
pub struct CombatantReveal {
    /// Display name
    pub name: String,
    /// HP reported alongside the reveal, if any
    pub hp: Option<HpReport>,
}

impl CombatantReveal {
    pub fn new(name: impl Into<String>, hp: Option<HpReport>) -> Self {
        Self {
            name: name.into(),
            hp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_id_parse() {
        assert_eq!(SideId::parse("p1"), Some(SideId::P1));
        assert_eq!(SideId::parse("p2"), Some(SideId::P2));
        assert_eq!(SideId::parse("p3"), None);
        assert_eq!(SideId::parse(""), None);
    }

    #[test]
    fn test_side_id_opposite() {
        assert_eq!(SideId::P1.opposite(), SideId::P2);
        assert_eq!(SideId::P2.opposite(), SideId::P1);
    }

    #[test]
    fn test_stat_parse() {
        assert_eq!(Stat::parse("atk"), Some(Stat::Atk));
        assert_eq!(Stat::parse("evasion"), Some(Stat::Evasion));
        assert_eq!(Stat::parse("hp"), None);
    }

    #[test]
    fn test_position_token_bare() {
        let token = PositionToken::parse("p1a").unwrap();
        assert_eq!(token.side, SideId::P1);
        assert_eq!(token.slot, Some('a'));
        assert!(token.name.is_none());
    }

    #[test]
    fn test_position_token_with_name() {
        let token = PositionToken::parse("p2a: Vexar").unwrap();
        assert_eq!(token.side, SideId::P2);
        assert_eq!(token.slot, Some('a'));
        assert_eq!(token.name.as_deref(), Some("Vexar"));
    }

    #[test]
    fn test_position_token_no_slot() {
        let token = PositionToken::parse("p2").unwrap();
        assert_eq!(token.side, SideId::P2);
        assert!(token.slot.is_none());
    }

    #[test]
    fn test_position_token_invalid() {
        assert!(PositionToken::parse("x9a").is_none());
        assert!(PositionToken::parse("").is_none());
    }

    #[test]
    fn test_side_data_contains() {
        let side = SideData::new(vec!["Alice".to_string()]);
        assert!(side.contains("Alice"));
        assert!(!side.contains("Bob"));
    }

    #[test]
    fn test_side_data_from_json() {
        let side = SideData::from_json(r#"{"actors":["Alice","Mira"]}"#).unwrap();
        assert_eq!(side.actors.len(), 2);
        assert!(side.contains("Mira"));

        assert!(SideData::from_json("not json").is_err());
    }
}
