//! Field and side conditions with remaining-duration estimates

use ringside_protocol::SideId;

/// Every condition kind the tracker recognizes
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    // Weather
    Sun,
    Rain,
    Sandstorm,
    Hail,
    Snow,

    // Terrain
    ElectricTerrain,
    GrassyTerrain,
    MistyTerrain,
    PsychicTerrain,

    // Field effects
    TrickRoom,
    Gravity,
    MagicRoom,
    WonderRoom,

    // Screens
    Reflect,
    LightScreen,
    AuroraVeil,

    // Other side effects
    Tailwind,
    Safeguard,
    Mist,

    // Entry hazards (persist until cleared)
    Spikes,
    ToxicSpikes,
    StealthRock,
    StickyWeb,
}

/// Default duration bounds for a condition kind.
///
/// The spread between `min_turns` and `max_turns` models a turn-extending
/// item the observer cannot see; `max_turns` of None means the condition
/// never expires by count. These values are configuration data, kept in one
/// place so they can be corrected against the target game's rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationProfile {
    pub min_turns: u8,
    pub max_turns: Option<u8>,
}

impl ConditionKind {
    /// Parse from a protocol condition name.
    /// Normalizes case and strips spaces, dashes and a "move: " prefix.
    pub fn from_protocol(s: &str) -> Option<Self> {
        let clean = s.strip_prefix("move: ").unwrap_or(s);
        let normalized = clean.to_lowercase().replace([' ', '-'], "");

        match normalized.as_str() {
            "sunnyday" | "sun" => Some(ConditionKind::Sun),
            "raindance" | "rain" => Some(ConditionKind::Rain),
            "sandstorm" | "sand" => Some(ConditionKind::Sandstorm),
            "hail" => Some(ConditionKind::Hail),
            "snow" | "snowscape" => Some(ConditionKind::Snow),

            "electricterrain" => Some(ConditionKind::ElectricTerrain),
            "grassyterrain" => Some(ConditionKind::GrassyTerrain),
            "mistyterrain" => Some(ConditionKind::MistyTerrain),
            "psychicterrain" => Some(ConditionKind::PsychicTerrain),

            "trickroom" => Some(ConditionKind::TrickRoom),
            "gravity" => Some(ConditionKind::Gravity),
            "magicroom" => Some(ConditionKind::MagicRoom),
            "wonderroom" => Some(ConditionKind::WonderRoom),

            "reflect" => Some(ConditionKind::Reflect),
            "lightscreen" => Some(ConditionKind::LightScreen),
            "auroraveil" => Some(ConditionKind::AuroraVeil),

            "tailwind" => Some(ConditionKind::Tailwind),
            "safeguard" => Some(ConditionKind::Safeguard),
            "mist" => Some(ConditionKind::Mist),

            "spikes" => Some(ConditionKind::Spikes),
            "toxicspikes" => Some(ConditionKind::ToxicSpikes),
            "stealthrock" => Some(ConditionKind::StealthRock),
            "stickyweb" => Some(ConditionKind::StickyWeb),

            _ => None,
        }
    }

    /// Default duration bounds for this kind
    pub fn duration(&self) -> DurationProfile {
        use ConditionKind::*;
        match self {
            // Five turns base, eight with an unseen extending item
            Sun | Rain | Sandstorm | Hail | Snow | ElectricTerrain | GrassyTerrain
            | MistyTerrain | PsychicTerrain | Reflect | LightScreen | AuroraVeil => {
                DurationProfile {
                    min_turns: 5,
                    max_turns: Some(8),
                }
            }

            // Fixed, unextendable durations
            Tailwind => DurationProfile {
                min_turns: 4,
                max_turns: Some(4),
            },
            TrickRoom | Gravity | MagicRoom | WonderRoom | Safeguard | Mist => DurationProfile {
                min_turns: 5,
                max_turns: Some(5),
            },

            // Hazards persist until removed
            Spikes | ToxicSpikes | StealthRock | StickyWeb => DurationProfile {
                min_turns: 0,
                max_turns: None,
            },
        }
    }

    /// Check if this is a weather kind
    pub fn is_weather(&self) -> bool {
        matches!(
            self,
            ConditionKind::Sun
                | ConditionKind::Rain
                | ConditionKind::Sandstorm
                | ConditionKind::Hail
                | ConditionKind::Snow
        )
    }

    /// Check if this is a terrain kind
    pub fn is_terrain(&self) -> bool {
        matches!(
            self,
            ConditionKind::ElectricTerrain
                | ConditionKind::GrassyTerrain
                | ConditionKind::MistyTerrain
                | ConditionKind::PsychicTerrain
        )
    }

    /// Check if this is a screen
    pub fn is_screen(&self) -> bool {
        matches!(
            self,
            ConditionKind::Reflect | ConditionKind::LightScreen | ConditionKind::AuroraVeil
        )
    }

    /// Check if this is an entry hazard
    pub fn is_hazard(&self) -> bool {
        matches!(
            self,
            ConditionKind::Spikes
                | ConditionKind::ToxicSpikes
                | ConditionKind::StealthRock
                | ConditionKind::StickyWeb
        )
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionKind::Sun => "Sun",
            ConditionKind::Rain => "Rain",
            ConditionKind::Sandstorm => "Sandstorm",
            ConditionKind::Hail => "Hail",
            ConditionKind::Snow => "Snow",
            ConditionKind::ElectricTerrain => "Electric Terrain",
            ConditionKind::GrassyTerrain => "Grassy Terrain",
            ConditionKind::MistyTerrain => "Misty Terrain",
            ConditionKind::PsychicTerrain => "Psychic Terrain",
            ConditionKind::TrickRoom => "Trick Room",
            ConditionKind::Gravity => "Gravity",
            ConditionKind::MagicRoom => "Magic Room",
            ConditionKind::WonderRoom => "Wonder Room",
            ConditionKind::Reflect => "Reflect",
            ConditionKind::LightScreen => "Light Screen",
            ConditionKind::AuroraVeil => "Aurora Veil",
            ConditionKind::Tailwind => "Tailwind",
            ConditionKind::Safeguard => "Safeguard",
            ConditionKind::Mist => "Mist",
            ConditionKind::Spikes => "Spikes",
            ConditionKind::ToxicSpikes => "Toxic Spikes",
            ConditionKind::StealthRock => "Stealth Rock",
            ConditionKind::StickyWeb => "Sticky Web",
        }
    }
}

impl std::fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scope a condition applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionScope {
    Field,
    Side(SideId),
}

/// A live condition with its duration estimate
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveCondition {
    pub kind: ConditionKind,
    /// Turns this condition has been up
    pub turns_elapsed: u32,
    /// Lower bound on remaining turns, floored at zero
    pub min_remaining: u8,
    /// Upper bound on remaining turns; None means it never expires by count
    pub max_remaining: Option<u8>,
    /// True once the true duration is known
    pub exact: bool,
}

impl ActiveCondition {
    /// Start a fresh condition from its kind's default bounds
    pub fn start(kind: ConditionKind) -> Self {
        let profile = kind.duration();
        let exact = match profile.max_turns {
            // Indefinite conditions carry no duration uncertainty
            None => true,
            Some(max) => max == profile.min_turns,
        };
        Self {
            kind,
            turns_elapsed: 0,
            min_remaining: profile.min_turns,
            max_remaining: profile.max_turns,
            exact,
        }
    }

    /// Step one turn; returns true when the condition has expired.
    ///
    /// If the lower bound was already zero before this step and the
    /// condition is still alive, the unextended duration is no longer
    /// consistent with observation, so the duration becomes exact.
    pub fn advance_turn(&mut self) -> bool {
        self.turns_elapsed += 1;
        let min_was_zero = self.min_remaining == 0;
        self.min_remaining = self.min_remaining.saturating_sub(1);

        if let Some(max) = self.max_remaining.as_mut() {
            *max = max.saturating_sub(1);
            if *max == 0 {
                return true;
            }
            if min_was_zero {
                self.exact = true;
            }
        }

        false
    }

    /// The remaining-turn estimate as an inclusive range, if bounded
    pub fn remaining_range(&self) -> Option<(u8, u8)> {
        self.max_remaining.map(|max| (self.min_remaining, max))
    }
}

/// Ordered set of live conditions for one scope
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionSet {
    conditions: Vec<ActiveCondition>,
}

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a condition. A same-kind condition already in this scope is
    /// replaced in place (counters reset), never stacked.
    pub fn start(&mut self, kind: ConditionKind) {
        let fresh = ActiveCondition::start(kind);
        match self.conditions.iter_mut().find(|c| c.kind == kind) {
            Some(existing) => *existing = fresh,
            None => self.conditions.push(fresh),
        }
    }

    /// Remove a condition regardless of its remaining bounds.
    /// Returns false if no such condition was live (a no-op).
    pub fn end(&mut self, kind: ConditionKind) -> bool {
        let before = self.conditions.len();
        self.conditions.retain(|c| c.kind != kind);
        self.conditions.len() != before
    }

    /// Step every live condition one turn; expired ones are dropped
    pub fn advance_turn(&mut self) {
        self.conditions.retain_mut(|c| !c.advance_turn());
    }

    pub fn get(&self, kind: ConditionKind) -> Option<&ActiveCondition> {
        self.conditions.iter().find(|c| c.kind == kind)
    }

    pub fn contains(&self, kind: ConditionKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Live conditions in start order
    pub fn iter(&self) -> impl Iterator<Item = &ActiveCondition> {
        self.conditions.iter()
    }

    pub fn clear(&mut self) {
        self.conditions.clear();
    }
}
