//! Typed events produced by the battle-log interpreter

use crate::ident::{PositionToken, SideId, Stat};

/// One interpreted battle-log event
///
/// Condition kinds stay as raw strings here; the domain layer decides which
/// names it recognizes.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEvent {
    /// A stat stage rose or fell on the named combatant
    StatStage {
        name: String,
        stat: Stat,
        delta: i8,
    },

    /// A field-scoped condition (weather, terrain, room effect) began
    FieldStart { kind: String },

    /// A field-scoped condition ended
    FieldEnd { kind: String },

    /// A side-scoped condition (screen, hazard, tailwind) began
    SideStart { side: SideId, kind: String },

    /// A side-scoped condition ended
    SideEnd { side: SideId, kind: String },

    /// A combatant was sent out into the named position
    Switch {
        position: PositionToken,
        name: String,
    },

    /// The named combatant was knocked out
    Faint { name: String },

    /// The named combatant gained a status ailment
    StatusSet { name: String, ailment: String },

    /// The named combatant's status ailment was cured
    StatusCure { name: String },

    /// The battle advanced to a new turn
    TurnAdvance { turn: u32 },

    /// The battle ended with a winner
    BattleWon { winner: String },
}
