//! The battle state store: combatant registry, conditions, stat stages
//!
//! One store tracks exactly one battle id. Every mutation is total: a
//! reference to an unknown combatant or condition degrades to a no-op for
//! that event, never an error.

use std::collections::HashMap;

use ringside_protocol::{BattleId, LogEvent, PositionToken, SideData, SideId, Stat};

use super::identity::{Perspective, SideResolution};
use crate::types::{
    ActiveCondition, Ailment, Combatant, CombatantId, ConditionKind, ConditionScope, ConditionSet,
    SideRole, SideState,
};

/// A position token resolved against the current battle
#[derive(Debug, Clone, PartialEq)]
pub struct CombatantRef {
    pub side: SideId,
    pub role: SideRole,
    /// Display name of the actor controlling that side, if known
    pub actor: Option<String>,
}

/// Canonical derived model of one battle
#[derive(Debug, Clone, PartialEq)]
pub struct BattleState {
    battle_id: BattleId,
    perspective: Perspective,
    sides: [SideState; 2],
    field: ConditionSet,
    combatants: HashMap<CombatantId, Combatant>,
    next_id: u32,

    /// Current turn number (0 before the first turn-advance)
    pub turn: u32,

    /// Whether the battle has ended
    pub ended: bool,

    /// Winner's display name, if the battle ended with one
    pub winner: Option<String>,
}

impl BattleState {
    /// Build the state for a freshly initialized battle
    pub fn new(battle_id: BattleId, side1: &SideData, side2: &SideData, observer: &str) -> Self {
        let perspective = Perspective::from_init(side1, side2, observer);
        let sides = [
            SideState::new(SideId::P1, perspective.role_of(SideId::P1), side1.actors.clone()),
            SideState::new(SideId::P2, perspective.role_of(SideId::P2), side2.actors.clone()),
        ];
        Self {
            battle_id,
            perspective,
            sides,
            field: ConditionSet::new(),
            combatants: HashMap::new(),
            next_id: 0,
            turn: 0,
            ended: false,
            winner: None,
        }
    }

    pub fn battle_id(&self) -> &BattleId {
        &self.battle_id
    }

    pub fn perspective(&self) -> Perspective {
        self.perspective
    }

    pub fn side(&self, id: SideId) -> &SideState {
        &self.sides[id.index()]
    }

    /// Resolve a side against the observer's viewpoint
    pub fn resolve_side(&self, id: SideId) -> SideResolution {
        self.perspective.resolve_side(id)
    }

    /// Resolve a position token to its side, role and controlling actor
    pub fn resolve_position(&self, token: &PositionToken) -> CombatantRef {
        let side = self.side(token.side);
        CombatantRef {
            side: token.side,
            role: side.role,
            actor: side.actor().map(|s| s.to_string()),
        }
    }

    /// Idempotent upsert of a combatant on a side.
    /// The first call creates; later calls return the existing id. An
    /// already-resolved side assignment is never changed.
    pub fn register_combatant(&mut self, side: SideId, name: &str) -> CombatantId {
        if let Some(id) = self.find_on_side(side, name) {
            return id;
        }
        let id = CombatantId::new(self.next_id);
        self.next_id += 1;
        self.combatants.insert(id, Combatant::new(id, name, side));
        self.sides[side.index()].reveal(id);
        id
    }

    fn find_on_side(&self, side: SideId, name: &str) -> Option<CombatantId> {
        self.sides[side.index()]
            .combatants
            .iter()
            .copied()
            .find(|id| self.combatants.get(id).is_some_and(|c| c.name == name))
    }

    /// Find a combatant by display name, searching sides in protocol order
    pub fn find_combatant(&self, name: &str) -> Option<CombatantId> {
        self.sides
            .iter()
            .flat_map(|side| side.combatants.iter().copied())
            .find(|id| self.combatants.get(id).is_some_and(|c| c.name == name))
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(&id)
    }

    /// Cloned snapshot for poll-based consumers
    pub fn combatant_snapshot(&self, id: CombatantId) -> Option<Combatant> {
        self.combatants.get(&id).cloned()
    }

    /// Live conditions for a scope, in start order
    pub fn conditions(&self, scope: ConditionScope) -> Vec<ActiveCondition> {
        let set = match scope {
            ConditionScope::Field => &self.field,
            ConditionScope::Side(id) => &self.sides[id.index()].conditions,
        };
        set.iter().cloned().collect()
    }

    /// Full stat→stage mapping for a combatant
    pub fn stat_stages(&self, id: CombatantId) -> Option<Vec<(Stat, i8)>> {
        self.combatants.get(&id).map(|c| c.stages.iter().collect())
    }

    /// Record an authoritative HP fraction for a combatant
    pub fn set_hp(&mut self, id: CombatantId, fraction: f32) {
        if let Some(c) = self.combatants.get_mut(&id) {
            c.hp_fraction = fraction.clamp(0.0, 1.0);
        }
    }

    /// Set the KO flag; idempotent
    pub fn mark_knocked_out(&mut self, id: CombatantId) {
        if let Some(c) = self.combatants.get_mut(&id) {
            c.knocked_out = true;
            c.hp_fraction = 0.0;
            c.active = false;
        }
    }

    /// Set or clear a combatant's ailment from a raw protocol tag
    pub fn set_ailment_tag(&mut self, id: CombatantId, tag: Option<&str>) {
        if let Some(c) = self.combatants.get_mut(&id) {
            match tag {
                Some("fnt") => {
                    c.knocked_out = true;
                    c.hp_fraction = 0.0;
                }
                Some(tag) => {
                    if let Some(ailment) = Ailment::from_protocol(tag) {
                        c.ailment = Some(ailment);
                    }
                }
                None => {}
            }
        }
    }

    /// Mark one combatant active on its side, the previous one inactive.
    /// Stat stages are deliberately left untouched; only explicit reset
    /// events clear them.
    pub fn set_active(&mut self, side: SideId, incoming: CombatantId) {
        let roster: Vec<CombatantId> = self.sides[side.index()].combatants.clone();
        for id in roster {
            if let Some(c) = self.combatants.get_mut(&id) {
                c.active = id == incoming;
            }
        }
    }

    /// Apply one interpreted log event. Exhaustive over the event kinds;
    /// any failed lookup degrades to a no-op for that event only.
    pub fn apply_event(&mut self, event: &LogEvent) {
        match event {
            LogEvent::StatStage { name, stat, delta } => {
                if let Some(id) = self.find_combatant(name)
                    && let Some(c) = self.combatants.get_mut(&id)
                {
                    c.stages.apply(*stat, *delta);
                }
            }

            LogEvent::FieldStart { kind } => {
                if let Some(kind) = ConditionKind::from_protocol(kind) {
                    self.field.start(kind);
                }
            }

            LogEvent::FieldEnd { kind } => {
                if let Some(kind) = ConditionKind::from_protocol(kind) {
                    self.field.end(kind);
                }
            }

            LogEvent::SideStart { side, kind } => {
                if let Some(kind) = ConditionKind::from_protocol(kind) {
                    self.sides[side.index()].conditions.start(kind);
                }
            }

            LogEvent::SideEnd { side, kind } => {
                if let Some(kind) = ConditionKind::from_protocol(kind) {
                    self.sides[side.index()].conditions.end(kind);
                }
            }

            LogEvent::Switch { position, name } => {
                let id = self.register_combatant(position.side, name);
                self.set_active(position.side, id);
            }

            LogEvent::Faint { name } => {
                if let Some(id) = self.find_combatant(name) {
                    self.mark_knocked_out(id);
                }
            }

            LogEvent::StatusSet { name, ailment } => {
                if let Some(id) = self.find_combatant(name) {
                    self.set_ailment_tag(id, Some(ailment));
                }
            }

            LogEvent::StatusCure { name } => {
                if let Some(id) = self.find_combatant(name)
                    && let Some(c) = self.combatants.get_mut(&id)
                {
                    c.ailment = None;
                }
            }

            LogEvent::TurnAdvance { turn } => {
                self.turn = *turn;
                self.field.advance_turn();
                for side in &mut self.sides {
                    side.conditions.advance_turn();
                }
            }

            LogEvent::BattleWon { winner } => {
                self.ended = true;
                self.winner = Some(winner.clone());
            }
        }
    }

    /// Clear every combatant, side and condition and adopt a new battle id
    pub fn reset(&mut self, battle_id: BattleId) {
        self.battle_id = battle_id;
        self.combatants.clear();
        self.field.clear();
        self.next_id = 0;
        self.turn = 0;
        self.ended = false;
        self.winner = None;
        for side in &mut self.sides {
            side.combatants.clear();
            side.conditions.clear();
            side.actors.clear();
        }
    }

    /// The combatant currently on the field for a side, if any
    pub fn active_combatant(&self, side: SideId) -> Option<CombatantId> {
        self.sides[side.index()]
            .combatants
            .iter()
            .copied()
            .find(|id| self.combatants.get(id).is_some_and(|c| c.active))
    }

    /// All revealed combatant ids, sides in protocol order
    pub fn combatant_ids(&self) -> Vec<CombatantId> {
        self.sides
            .iter()
            .flat_map(|side| side.combatants.iter().copied())
            .collect()
    }
}
