//! Stat stage tracking

use ringside_protocol::Stat;

/// Legal stage range
pub const STAGE_MIN: i8 = -6;
pub const STAGE_MAX: i8 = 6;

/// Signed stage deltas for every trackable stat, clamped to [-6, +6]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageSet {
    stages: [i8; 7],
}

fn slot(stat: Stat) -> usize {
    match stat {
        Stat::Atk => 0,
        Stat::Def => 1,
        Stat::Spa => 2,
        Stat::Spd => 3,
        Stat::Spe => 4,
        Stat::Accuracy => 5,
        Stat::Evasion => 6,
    }
}

impl StageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the stage for a stat
    pub fn get(&self, stat: Stat) -> i8 {
        self.stages[slot(stat)]
    }

    /// Set the stage for a stat, clamped to the legal range
    pub fn set(&mut self, stat: Stat, value: i8) {
        self.stages[slot(stat)] = value.clamp(STAGE_MIN, STAGE_MAX);
    }

    /// Apply a signed delta to a stat, returns the change actually applied
    pub fn apply(&mut self, stat: Stat, delta: i8) -> i8 {
        let current = self.get(stat);
        let next = (current + delta).clamp(STAGE_MIN, STAGE_MAX);
        self.stages[slot(stat)] = next;
        next - current
    }

    /// Reset every stage to 0
    pub fn clear(&mut self) {
        self.stages = [0; 7];
    }

    /// Whether every stage is 0
    pub fn is_clear(&self) -> bool {
        self.stages.iter().all(|s| *s == 0)
    }

    /// Stages in display order
    pub fn iter(&self) -> impl Iterator<Item = (Stat, i8)> + '_ {
        Stat::all().iter().map(|stat| (*stat, self.get(*stat)))
    }

    /// Snapshot of the non-zero stages, in display order
    pub fn entries(&self) -> Vec<(Stat, i8)> {
        self.iter().filter(|(_, stage)| *stage != 0).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_clear() {
        let stages = StageSet::new();
        assert!(stages.is_clear());
        assert_eq!(stages.get(Stat::Atk), 0);
    }

    #[test]
    fn test_apply() {
        let mut stages = StageSet::new();
        assert_eq!(stages.apply(Stat::Atk, 2), 2);
        assert_eq!(stages.get(Stat::Atk), 2);
        assert_eq!(stages.apply(Stat::Atk, -3), -3);
        assert_eq!(stages.get(Stat::Atk), -1);
    }

    #[test]
    fn test_apply_clamps_at_bounds() {
        let mut stages = StageSet::new();
        stages.set(Stat::Spe, 5);
        assert_eq!(stages.apply(Stat::Spe, 3), 1);
        assert_eq!(stages.get(Stat::Spe), STAGE_MAX);
        assert_eq!(stages.apply(Stat::Spe, 1), 0);

        stages.set(Stat::Def, -5);
        assert_eq!(stages.apply(Stat::Def, -4), -1);
        assert_eq!(stages.get(Stat::Def), STAGE_MIN);
    }

    #[test]
    fn test_set_clamps() {
        let mut stages = StageSet::new();
        stages.set(Stat::Spa, 10);
        assert_eq!(stages.get(Stat::Spa), 6);
        stages.set(Stat::Spa, -10);
        assert_eq!(stages.get(Stat::Spa), -6);
    }

    #[test]
    fn test_entries_skips_zero() {
        let mut stages = StageSet::new();
        stages.set(Stat::Atk, 2);
        stages.set(Stat::Spe, -1);

        let entries = stages.entries();
        assert_eq!(entries, vec![(Stat::Atk, 2), (Stat::Spe, -1)]);
    }

    #[test]
    fn test_clear() {
        let mut stages = StageSet::new();
        stages.set(Stat::Atk, 3);
        stages.clear();
        assert!(stages.is_clear());
    }
}
