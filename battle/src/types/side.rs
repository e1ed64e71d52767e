//! Side state

use ringside_protocol::SideId;

use super::combatant::CombatantId;
use super::conditions::ConditionSet;

/// Display role of a side, fixed once per battle at initialization
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideRole {
    /// The observer's own side, or the left side when spectating
    Ally,
    Opponent,
}

/// One of the two competing sides
#[derive(Debug, Clone, PartialEq)]
pub struct SideState {
    /// Protocol identity (p1/p2)
    pub id: SideId,

    /// Ally/opponent designation; never flips mid-battle
    pub role: SideRole,

    /// Display names of the actors controlling this side
    pub actors: Vec<String>,

    /// Combatants revealed so far, in reveal order
    pub combatants: Vec<CombatantId>,

    /// Live side conditions (screens, hazards, tailwind-likes)
    pub conditions: ConditionSet,
}

impl SideState {
    pub fn new(id: SideId, role: SideRole, actors: Vec<String>) -> Self {
        Self {
            id,
            role,
            actors,
            combatants: Vec::new(),
            conditions: ConditionSet::new(),
        }
    }

    /// First actor name, for display
    pub fn actor(&self) -> Option<&str> {
        self.actors.first().map(|s| s.as_str())
    }

    /// Record a revealed combatant id if not already present
    pub fn reveal(&mut self, id: CombatantId) {
        if !self.combatants.contains(&id) {
            self.combatants.push(id);
        }
    }

    pub fn is_ally(&self) -> bool {
        self.role == SideRole::Ally
    }
}
