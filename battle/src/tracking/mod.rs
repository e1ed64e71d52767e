//! State tracking: identity resolution, HP deltas, the battle store

pub mod hp;
pub mod identity;
pub mod store;

pub use hp::{HpDelta, HpDeltaKind, HpTracker, NOISE_THRESHOLD};
pub use identity::{Perspective, SideResolution};
pub use store::{BattleState, CombatantRef};
