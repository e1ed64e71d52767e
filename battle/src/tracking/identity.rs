//! Identity resolution: which side is "ours"
//!
//! The perspective is decided once at battle initialization and never
//! changes mid-battle. All resolution calls are pure reads, so independent
//! packet handlers can each resolve the same mapping without racing to
//! different answers.

use ringside_protocol::{SideData, SideId};

use crate::types::SideRole;

/// Result of resolving a side against the observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideResolution {
    /// Whether this side is displayed as the observer's own
    pub is_ally: bool,
    /// Whether the observer participates in neither side
    pub is_spectating: bool,
}

/// The observer's fixed viewpoint on a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Perspective {
    ally: SideId,
    spectating: bool,
}

impl Perspective {
    /// Decide the viewpoint from the two init-time side payloads.
    ///
    /// When the observer is on neither side, the first side is designated
    /// ally purely for left/right layout; the designation carries no
    /// gameplay meaning.
    pub fn from_init(side1: &SideData, side2: &SideData, observer: &str) -> Self {
        if side1.contains(observer) {
            Self {
                ally: SideId::P1,
                spectating: false,
            }
        } else if side2.contains(observer) {
            Self {
                ally: SideId::P2,
                spectating: false,
            }
        } else {
            Self {
                ally: SideId::P1,
                spectating: true,
            }
        }
    }

    /// The side displayed as the observer's own
    pub fn ally_side(&self) -> SideId {
        self.ally
    }

    pub fn is_spectating(&self) -> bool {
        self.spectating
    }

    /// Resolve one side against this viewpoint
    pub fn resolve_side(&self, side: SideId) -> SideResolution {
        SideResolution {
            is_ally: side == self.ally,
            is_spectating: self.spectating,
        }
    }

    /// Display role for a side
    pub fn role_of(&self, side: SideId) -> SideRole {
        if side == self.ally {
            SideRole::Ally
        } else {
            SideRole::Opponent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sides() -> (SideData, SideData) {
        (
            SideData::new(vec!["Alice".to_string()]),
            SideData::new(vec!["Bob".to_string()]),
        )
    }

    #[test]
    fn test_observer_on_side1() {
        let (s1, s2) = sides();
        let p = Perspective::from_init(&s1, &s2, "Alice");
        assert!(!p.is_spectating());
        assert_eq!(p.ally_side(), SideId::P1);

        assert_eq!(
            p.resolve_side(SideId::P1),
            SideResolution {
                is_ally: true,
                is_spectating: false
            }
        );
        assert_eq!(
            p.resolve_side(SideId::P2),
            SideResolution {
                is_ally: false,
                is_spectating: false
            }
        );
    }

    #[test]
    fn test_observer_on_side2() {
        let (s1, s2) = sides();
        let p = Perspective::from_init(&s1, &s2, "Bob");
        assert!(!p.is_spectating());
        assert_eq!(p.ally_side(), SideId::P2);
        assert!(p.resolve_side(SideId::P2).is_ally);
        assert!(!p.resolve_side(SideId::P1).is_ally);
    }

    #[test]
    fn test_spectator_gets_fixed_left_side() {
        let (s1, s2) = sides();
        let p = Perspective::from_init(&s1, &s2, "Carol");
        assert!(p.is_spectating());
        // Layout-only designation: always the first side
        assert_eq!(p.ally_side(), SideId::P1);

        let r = p.resolve_side(SideId::P1);
        assert!(r.is_ally);
        assert!(r.is_spectating);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let (s1, s2) = sides();
        let p = Perspective::from_init(&s1, &s2, "Bob");
        let first = p.resolve_side(SideId::P1);
        for _ in 0..10 {
            assert_eq!(p.resolve_side(SideId::P1), first);
        }
    }

    #[test]
    fn test_role_of() {
        let (s1, s2) = sides();
        let p = Perspective::from_init(&s1, &s2, "Alice");
        assert_eq!(p.role_of(SideId::P1), SideRole::Ally);
        assert_eq!(p.role_of(SideId::P2), SideRole::Opponent);
    }
}
