//! The battle feed: packet intake on one path, polling on the other
//!
//! Delivery handlers are fire-and-forget: every failure degrades to a no-op
//! for that packet or line, never an error to the caller. Poll accessors
//! return cloned snapshots and never block beyond the store's short
//! critical section.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use thiserror::Error;
use tracing::{debug, warn};

use ringside_battle::{
    ActiveCondition, BattleState, Combatant, CombatantId, ConditionScope, HpDeltaKind, HpTracker,
    SideResolution,
};
use ringside_protocol::{
    BattleId, Classification, CombatantReveal, HpReport, PositionToken, SideData, SideId, Stat,
    interpret_lines,
};

/// One drained damage/heal report for display
#[derive(Debug, Clone, PartialEq)]
pub struct DamageEvent {
    /// Display name of the combatant the delta applies to
    pub combatant: String,
    pub kind: HpDeltaKind,
    /// Magnitude as a percentage of max HP
    pub percent: f32,
}

/// Why a delivery was not applied; logged, never surfaced
#[derive(Error, Debug)]
enum Discard {
    #[error("no battle is being tracked")]
    NoBattle,

    #[error("stale battle id {0}")]
    StaleBattle(BattleId),
}

/// State for the one battle currently tracked
struct Session {
    state: BattleState,
    hp: HpTracker,
}

struct FeedInner {
    session: RwLock<Option<Session>>,
    deltas: Mutex<Vec<DamageEvent>>,
    dropped_lines: AtomicU64,
}

/// Shared front door for battle packets and display polling.
///
/// Cloning yields another handle to the same feed; delivery may run off the
/// poller's thread.
#[derive(Clone)]
pub struct BattleFeed {
    inner: Arc<FeedInner>,
}

impl BattleFeed {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(FeedInner {
                session: RwLock::new(None),
                deltas: Mutex::new(Vec::new()),
                dropped_lines: AtomicU64::new(0),
            }),
        }
    }

    // === Inbound: delivery path ===

    /// Start tracking a battle, replacing any previous one.
    ///
    /// An init for a new battle id is the reset signal: everything scoped
    /// to the old id is dropped before the new state is installed.
    pub fn on_battle_init(
        &self,
        battle_id: BattleId,
        side1: &SideData,
        side2: &SideData,
        observer: &str,
    ) {
        let Ok(mut session) = self.inner.session.write() else {
            return;
        };
        if let Some(old) = session.as_ref() {
            debug!(old = %old.state.battle_id(), new = %battle_id, "replacing tracked battle");
        }
        *session = Some(Session {
            state: BattleState::new(battle_id, side1, side2, observer),
            hp: HpTracker::new(),
        });
        if let Ok(mut deltas) = self.inner.deltas.lock() {
            deltas.clear();
        }
    }

    /// A combatant was sent out. The switch-in report reseeds the HP
    /// baseline before any later health change for it is processed.
    pub fn on_switch(
        &self,
        battle_id: &BattleId,
        position: &PositionToken,
        incoming: &CombatantReveal,
    ) {
        self.with_session(battle_id, |session| {
            let id = session
                .state
                .register_combatant(position.side, &incoming.name);
            session.state.set_active(position.side, id);

            if let Some(report) = &incoming.hp {
                session.hp.reseed(id, report);
                session.state.set_hp(id, report.as_fraction());
                session.state.set_ailment_tag(id, report.ailment.as_deref());
            }
            None::<()>
        });
    }

    /// A health report for the combatant at a position
    pub fn on_health_change(
        &self,
        battle_id: &BattleId,
        position: &PositionToken,
        report: &HpReport,
    ) {
        let event = self.with_session(battle_id, |session| {
            let id = match &position.name {
                Some(name) => session.state.register_combatant(position.side, name),
                None => session.state.active_combatant(position.side)?,
            };

            session.state.set_hp(id, report.as_fraction());
            session.state.set_ailment_tag(id, report.ailment.as_deref());

            let delta = session.hp.record_hp(id, report)?;
            if delta.kind == HpDeltaKind::Knockout {
                session.state.mark_knocked_out(id);
            }

            let name = session.state.combatant(id)?.name.clone();
            Some(DamageEvent {
                combatant: name,
                kind: delta.kind,
                percent: delta.percent,
            })
        });

        if let Some(event) = event
            && let Ok(mut deltas) = self.inner.deltas.lock()
        {
            deltas.push(event);
        }
    }

    /// An ordered batch of battle-log lines for the current turn
    pub fn on_message_batch(&self, battle_id: &BattleId, lines: &[String]) {
        let mut unparseable = 0u64;

        self.with_session(battle_id, |session| {
            for classification in interpret_lines(lines) {
                match classification {
                    Classification::Event(event) => session.state.apply_event(&event),
                    Classification::NoEvent => {}
                    Classification::Unparseable => unparseable += 1,
                }
            }
            None::<()>
        });

        if unparseable > 0 {
            warn!(count = unparseable, "dropped unparseable battle-log lines");
            self.inner
                .dropped_lines
                .fetch_add(unparseable, Ordering::Relaxed);
        }
    }

    /// The battle ended; drop everything scoped to it
    pub fn on_battle_end(&self, battle_id: &BattleId) {
        let Ok(mut session) = self.inner.session.write() else {
            return;
        };
        match session.as_ref() {
            Some(s) if s.state.battle_id() == battle_id => {
                debug!(%battle_id, "battle ended, clearing tracked state");
                *session = None;
            }
            Some(s) => {
                debug!(discard = %Discard::StaleBattle(battle_id.clone()),
                       current = %s.state.battle_id(), "ignoring battle end");
            }
            None => debug!(discard = %Discard::NoBattle, "ignoring battle end"),
        }
    }

    // === Outbound: poll path ===

    /// Snapshot of one combatant
    pub fn combatant(&self, id: CombatantId) -> Option<Combatant> {
        let session = self.inner.session.read().ok()?;
        session.as_ref()?.state.combatant_snapshot(id)
    }

    /// Look up a combatant id by display name
    pub fn find_combatant(&self, name: &str) -> Option<CombatantId> {
        let session = self.inner.session.read().ok()?;
        session.as_ref()?.state.find_combatant(name)
    }

    /// Live conditions for a scope, in start order
    pub fn conditions(&self, scope: ConditionScope) -> Vec<ActiveCondition> {
        let Ok(session) = self.inner.session.read() else {
            return Vec::new();
        };
        session
            .as_ref()
            .map(|s| s.state.conditions(scope))
            .unwrap_or_default()
    }

    /// Full stat→stage mapping for a combatant
    pub fn stat_stages(&self, id: CombatantId) -> Option<Vec<(Stat, i8)>> {
        let session = self.inner.session.read().ok()?;
        session.as_ref()?.state.stat_stages(id)
    }

    /// Resolve a side against the observer's viewpoint
    pub fn resolve_side(&self, side: SideId) -> Option<SideResolution> {
        let session = self.inner.session.read().ok()?;
        session.as_ref().map(|s| s.state.resolve_side(side))
    }

    /// Battle id currently tracked, if any
    pub fn battle_id(&self) -> Option<BattleId> {
        let session = self.inner.session.read().ok()?;
        session.as_ref().map(|s| s.state.battle_id().clone())
    }

    /// Current turn number (0 when no battle is tracked)
    pub fn turn(&self) -> u32 {
        self.inner
            .session
            .read()
            .ok()
            .and_then(|s| s.as_ref().map(|s| s.state.turn))
            .unwrap_or(0)
    }

    /// Cloned snapshot of the whole derived model
    pub fn state_snapshot(&self) -> Option<BattleState> {
        let session = self.inner.session.read().ok()?;
        session.as_ref().map(|s| s.state.clone())
    }

    /// Drain damage events recorded since the last poll; at-most-once
    pub fn consume_damage_events(&self) -> Vec<DamageEvent> {
        self.inner
            .deltas
            .lock()
            .map(|mut deltas| std::mem::take(&mut *deltas))
            .unwrap_or_default()
    }

    /// Lines dropped as unparseable since the feed was created
    pub fn dropped_lines(&self) -> u64 {
        self.inner.dropped_lines.load(Ordering::Relaxed)
    }

    /// Run a closure against the tracked session if the battle id matches;
    /// anything else is discarded and logged.
    fn with_session<T>(
        &self,
        battle_id: &BattleId,
        f: impl FnOnce(&mut Session) -> Option<T>,
    ) -> Option<T> {
        let Ok(mut session) = self.inner.session.write() else {
            return None;
        };
        match session.as_mut() {
            Some(s) if s.state.battle_id() == battle_id => f(s),
            Some(s) => {
                debug!(discard = %Discard::StaleBattle(battle_id.clone()),
                       current = %s.state.battle_id(), "ignoring packet");
                None
            }
            None => {
                debug!(discard = %Discard::NoBattle, "ignoring packet");
                None
            }
        }
    }
}

impl Default for BattleFeed {
    fn default() -> Self {
        Self::new()
    }
}
