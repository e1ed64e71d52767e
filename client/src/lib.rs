//! Shared battle feed for the ringside observer.
//!
//! [`BattleFeed`] is the composition point: protocol packets go in on the
//! delivery path, and rendering collaborators poll cloned snapshots out.
//! Every inbound call is battle-id gated and fire-and-forget; malformed or
//! stale input degrades the model's completeness, never the caller.

mod feed;

pub use feed::{BattleFeed, DamageEvent};

// Re-export what feed callers and pollers need
pub use ringside_battle::{
    ActiveCondition, Ailment, BattleState, Combatant, CombatantId, ConditionKind, ConditionScope,
    HpDeltaKind, SideResolution, SideRole,
};
pub use ringside_protocol::{
    BattleId, Classification, CombatantReveal, HpReport, LogEvent, PositionToken, SideData, SideId,
    Stat,
};
