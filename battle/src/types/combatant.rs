//! Combatant state

use ringside_protocol::SideId;

use super::stats::StageSet;
use super::status::Ailment;

/// Opaque, battle-scoped identity of one combatant.
/// Stable for the combatant's lifetime; minted by the store on first reveal.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CombatantId(u32);

impl CombatantId {
    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// One creature revealed in the battle
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Combatant {
    pub id: CombatantId,

    /// Display name
    pub name: String,

    /// Owning side; fixed once assigned
    pub side: SideId,

    /// Current HP as a fraction of max, in [0.0, 1.0]
    pub hp_fraction: f32,

    /// Whether this combatant has been knocked out
    pub knocked_out: bool,

    /// Active status ailment, at most one
    pub ailment: Option<Ailment>,

    /// Current stat stage deltas
    pub stages: StageSet,

    /// Whether this combatant is currently on the field
    pub active: bool,
}

impl Combatant {
    /// Create a freshly revealed combatant at full health
    pub fn new(id: CombatantId, name: impl Into<String>, side: SideId) -> Self {
        Self {
            id,
            name: name.into(),
            side,
            hp_fraction: 1.0,
            knocked_out: false,
            ailment: None,
            stages: StageSet::new(),
            active: false,
        }
    }

    /// Whether the combatant can still fight
    pub fn is_alive(&self) -> bool {
        !self.knocked_out && self.hp_fraction > 0.0
    }

    /// Current HP as a display percentage
    pub fn hp_percent(&self) -> f32 {
        self.hp_fraction * 100.0
    }
}
