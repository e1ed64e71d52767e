//! HP baseline tracking and damage/heal delta derivation
//!
//! Successive HP reports for a combatant are turned into deltas regardless
//! of which encoding each report arrived in. The tracker never fabricates a
//! delta across a switch: the caller reseeds the baseline from the
//! authoritative switch-in report before any later health report is
//! processed, and reseeding always wins over interpolation.

use std::collections::{HashMap, HashSet};

use ringside_protocol::HpReport;

use crate::types::CombatantId;

/// Changes smaller than this fraction of max HP are treated as zero
pub const NOISE_THRESHOLD: f32 = 0.005;

/// What a derived delta represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HpDeltaKind {
    Damage,
    Heal,
    /// The hit that took the combatant to zero; reported once
    Knockout,
}

/// One derived HP change, as a percentage of max HP
#[derive(Debug, Clone, PartialEq)]
pub struct HpDelta {
    pub kind: HpDeltaKind,
    pub percent: f32,
}

/// Per-combatant HP baselines
#[derive(Debug, Default)]
pub struct HpTracker {
    baselines: HashMap<CombatantId, f32>,
    downed: HashSet<CombatantId>,
}

impl HpTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an HP report and derive the delta against the prior baseline.
    ///
    /// The first report for a combatant only establishes the baseline and
    /// yields no delta. The baseline is always overwritten with the new
    /// value, whether or not a delta is reported.
    pub fn record_hp(&mut self, id: CombatantId, report: &HpReport) -> Option<HpDelta> {
        let new_fraction = report.as_fraction();
        let old_fraction = self.baselines.insert(id, new_fraction);

        if new_fraction <= 0.0 && !self.downed.insert(id) {
            // Already reported down; later zero reports are not news
            return None;
        }

        let old_fraction = old_fraction?;

        if new_fraction <= 0.0 {
            return Some(HpDelta {
                kind: HpDeltaKind::Knockout,
                percent: old_fraction * 100.0,
            });
        }

        let delta = old_fraction - new_fraction;
        if delta.abs() < NOISE_THRESHOLD {
            return None;
        }

        Some(if delta > 0.0 {
            HpDelta {
                kind: HpDeltaKind::Damage,
                percent: delta * 100.0,
            }
        } else {
            HpDelta {
                kind: HpDeltaKind::Heal,
                percent: -delta * 100.0,
            }
        })
    }

    /// Overwrite the baseline from an authoritative report (switch-in),
    /// producing no delta.
    pub fn reseed(&mut self, id: CombatantId, report: &HpReport) {
        self.baselines.insert(id, report.as_fraction());
    }

    /// Last known fraction for a combatant, if any report has been seen
    pub fn baseline(&self, id: CombatantId) -> Option<f32> {
        self.baselines.get(&id).copied()
    }

    /// Drop every baseline (battle reset)
    pub fn clear(&mut self) {
        self.baselines.clear();
        self.downed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u32) -> CombatantId {
        CombatantId::new(raw)
    }

    #[test]
    fn test_first_report_seeds_only() {
        let mut tracker = HpTracker::new();
        let delta = tracker.record_hp(id(1), &HpReport::absolute(270.0, 270.0));
        assert!(delta.is_none());
        assert_eq!(tracker.baseline(id(1)), Some(1.0));
    }

    #[test]
    fn test_damage_from_absolute_reports() {
        let mut tracker = HpTracker::new();
        tracker.record_hp(id(1), &HpReport::absolute(270.0, 270.0));

        let delta = tracker.record_hp(id(1), &HpReport::absolute(135.0, 270.0)).unwrap();
        assert_eq!(delta.kind, HpDeltaKind::Damage);
        assert!((delta.percent - 50.0).abs() < 0.5);
    }

    #[test]
    fn test_mixed_encoding_consistency() {
        // Absolute seed, fractional follow-up
        let mut tracker = HpTracker::new();
        tracker.record_hp(id(1), &HpReport::absolute(200.0, 200.0));
        let delta = tracker.record_hp(id(1), &HpReport::fraction(0.5)).unwrap();
        assert_eq!(delta.kind, HpDeltaKind::Damage);
        assert!((delta.percent - 50.0).abs() < 0.5);

        // Fractional seed, absolute follow-up
        let mut tracker = HpTracker::new();
        tracker.record_hp(id(2), &HpReport::fraction(1.0));
        let delta = tracker.record_hp(id(2), &HpReport::absolute(100.0, 200.0)).unwrap();
        assert_eq!(delta.kind, HpDeltaKind::Damage);
        assert!((delta.percent - 50.0).abs() < 0.5);
    }

    #[test]
    fn test_heal_reported() {
        let mut tracker = HpTracker::new();
        tracker.record_hp(id(1), &HpReport::fraction(0.25));
        let delta = tracker.record_hp(id(1), &HpReport::fraction(0.75)).unwrap();
        assert_eq!(delta.kind, HpDeltaKind::Heal);
        assert!((delta.percent - 50.0).abs() < 0.5);
    }

    #[test]
    fn test_noise_threshold() {
        let mut tracker = HpTracker::new();
        tracker.record_hp(id(1), &HpReport::fraction(0.5000));
        assert!(tracker.record_hp(id(1), &HpReport::fraction(0.4980)).is_none());
        // Baseline still moved to the newest value
        assert_eq!(tracker.baseline(id(1)), Some(0.498));
    }

    #[test]
    fn test_reseed_wins_over_stale_baseline() {
        let mut tracker = HpTracker::new();

        // Active at 30%, then switched out
        tracker.record_hp(id(1), &HpReport::fraction(1.0));
        tracker.record_hp(id(1), &HpReport::fraction(0.3));

        // Healed on the bench; switch-in reports 80%
        tracker.reseed(id(1), &HpReport::fraction(0.8));

        // Next health report computes against the switch-in value
        let delta = tracker.record_hp(id(1), &HpReport::fraction(0.6)).unwrap();
        assert_eq!(delta.kind, HpDeltaKind::Damage);
        assert!((delta.percent - 20.0).abs() < 0.5);
    }

    #[test]
    fn test_knockout_reported_once() {
        let mut tracker = HpTracker::new();
        tracker.record_hp(id(1), &HpReport::fraction(0.4));

        let delta = tracker.record_hp(id(1), &HpReport::fraction(0.0)).unwrap();
        assert_eq!(delta.kind, HpDeltaKind::Knockout);
        assert!((delta.percent - 40.0).abs() < 0.5);

        // A duplicate zero report stays quiet
        assert!(tracker.record_hp(id(1), &HpReport::fraction(0.0)).is_none());
    }

    #[test]
    fn test_first_report_at_zero_is_silent() {
        let mut tracker = HpTracker::new();
        assert!(tracker.record_hp(id(1), &HpReport::fraction(0.0)).is_none());
        assert!(tracker.record_hp(id(1), &HpReport::fraction(0.0)).is_none());
    }

    #[test]
    fn test_clear() {
        let mut tracker = HpTracker::new();
        tracker.record_hp(id(1), &HpReport::fraction(0.5));
        tracker.clear();
        assert!(tracker.baseline(id(1)).is_none());
    }
}
