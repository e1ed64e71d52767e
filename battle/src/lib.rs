//! Battle state derivation for the ringside observer.
//!
//! This crate turns protocol packets and interpreted log events into one
//! consistent, queryable model of a battle: who is allied or opposing, each
//! combatant's HP/KO/status, live field and side conditions with
//! remaining-duration estimates, and stat stage changes.
//!
//! # Overview
//!
//! `ringside-battle` sits between `ringside-protocol` (wire vocabulary) and
//! the feed layer:
//!
//! ```text
//! ringside-protocol (packets + log interpretation)
//!        │
//!        ▼
//! ringside-battle (derived model) ← THIS CRATE
//!        │
//!        └─> ringside-client (shared feed polled by rendering)
//! ```
//!
//! # Main Types
//!
//! - [`Perspective`] - the observer's fixed ally/spectator viewpoint
//! - [`HpTracker`] - HP baselines and damage/heal delta derivation
//! - [`BattleState`] - the canonical store: registry, conditions, stages
//! - [`ConditionKind`], [`ActiveCondition`] - conditions with duration bounds
//! - [`Combatant`], [`SideState`], [`StageSet`], [`Ailment`] - domain types
//!
//! # Example
//!
//! ```
//! use ringside_battle::{BattleState, ConditionScope};
//! use ringside_protocol::{BattleId, LogEvent, SideData};
//!
//! let mut state = BattleState::new(
//!     BattleId::new("battle-1"),
//!     &SideData::new(vec!["Alice".to_string()]),
//!     &SideData::new(vec!["Bob".to_string()]),
//!     "Alice",
//! );
//!
//! state.apply_event(&LogEvent::FieldStart { kind: "rain".to_string() });
//! assert_eq!(state.conditions(ConditionScope::Field).len(), 1);
//! ```

pub mod tracking;
pub mod types;

// Re-export main types at crate root for convenience
pub use tracking::{
    BattleState, CombatantRef, HpDelta, HpDeltaKind, HpTracker, NOISE_THRESHOLD, Perspective,
    SideResolution,
};
pub use types::{
    ActiveCondition, Ailment, Combatant, CombatantId, ConditionKind, ConditionScope, ConditionSet,
    DurationProfile, STAGE_MAX, STAGE_MIN, SideRole, SideState, StageSet,
};

// Re-export commonly used protocol types
pub use ringside_protocol::{BattleId, HpReport, LogEvent, PositionToken, SideData, SideId, Stat};
