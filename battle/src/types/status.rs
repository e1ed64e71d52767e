//! Status ailments

/// The closed set of status ailments a combatant can carry (at most one)
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ailment {
    Poison,
    Burn,
    Paralysis,
    Freeze,
    Sleep,
}

impl Ailment {
    /// Parse from a protocol tag ("psn", "brn", "par", "frz", "slp").
    /// The graded "tox" tag collapses onto Poison.
    pub fn from_protocol(s: &str) -> Option<Self> {
        match s {
            "psn" | "tox" => Some(Ailment::Poison),
            "brn" => Some(Ailment::Burn),
            "par" => Some(Ailment::Paralysis),
            "frz" => Some(Ailment::Freeze),
            "slp" => Some(Ailment::Sleep),
            _ => None,
        }
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Ailment::Poison => "Poison",
            Ailment::Burn => "Burn",
            Ailment::Paralysis => "Paralysis",
            Ailment::Freeze => "Freeze",
            Ailment::Sleep => "Sleep",
        }
    }
}

impl std::fmt::Display for Ailment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
