//! Domain types for tracked battle state

pub mod combatant;
pub mod conditions;
pub mod stats;
pub mod status;
pub mod side;

pub use combatant::{Combatant, CombatantId};
pub use conditions::{
    ActiveCondition, ConditionKind, ConditionScope, ConditionSet, DurationProfile,
};
pub use side::{SideRole, SideState};
pub use stats::{STAGE_MAX, STAGE_MIN, StageSet};
pub use status::Ailment;
