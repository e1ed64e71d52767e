//! HP reports and battle identity

/// Opaque identity of one battle; all tracked state is scoped to it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BattleId(String);

impl BattleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BattleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An HP value in one of the two wire encodings, plus an optional ailment tag
///
/// Absolute form: "134/270" (current over max). Fractional form: "0.48"
/// (already normalized). Either may carry a trailing tag like "par" or "fnt".
#[derive(Debug, Clone, PartialEq)]
pub struct HpReport {
    /// Reported value: raw HP when absolute, a [0,1] fraction otherwise
    pub value: f32,
    /// Max HP; only meaningful when `absolute` is true
    pub max: f32,
    /// Whether `value` is an absolute amount over `max`
    pub absolute: bool,
    /// Raw ailment tag ("par", "brn", "fnt", ...), if present
    pub ailment: Option<String>,
}

impl HpReport {
    /// Parse an HP report string like "134/270", "0.48", or "0 fnt"
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let hp_part = parts.first()?;
        let ailment = parts.get(1).map(|t| t.to_string());

        if let Some((current_str, max_str)) = hp_part.split_once('/') {
            Some(HpReport {
                value: current_str.parse().ok()?,
                max: max_str.parse().ok()?,
                absolute: true,
                ailment,
            })
        } else {
            Some(HpReport {
                value: hp_part.parse().ok()?,
                max: 1.0,
                absolute: false,
                ailment,
            })
        }
    }

    /// Build an absolute-encoded report
    pub fn absolute(value: f32, max: f32) -> Self {
        Self {
            value,
            max,
            absolute: true,
            ailment: None,
        }
    }

    /// Build a fraction-encoded report
    pub fn fraction(value: f32) -> Self {
        Self {
            value,
            max: 1.0,
            absolute: false,
            ailment: None,
        }
    }

    /// The reported HP as a fraction of max, clamped to [0,1]
    pub fn as_fraction(&self) -> f32 {
        let raw = if self.absolute {
            if self.max > 0.0 { self.value / self.max } else { 0.0 }
        } else {
            self.value
        };
        raw.clamp(0.0, 1.0)
    }

    /// Whether the report carries the knockout tag
    pub fn is_knockout(&self) -> bool {
        self.ailment.as_deref() == Some("fnt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battle_id_display() {
        let id = BattleId::new("battle-arena-9917");
        assert_eq!(id.as_str(), "battle-arena-9917");
        assert_eq!(id.to_string(), "battle-arena-9917");
    }

    #[test]
    fn test_parse_absolute() {
        let report = HpReport::parse("134/270").unwrap();
        assert!(report.absolute);
        assert_eq!(report.value, 134.0);
        assert_eq!(report.max, 270.0);
        assert!(report.ailment.is_none());
        assert!((report.as_fraction() - 134.0 / 270.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_fractional() {
        let report = HpReport::parse("0.48").unwrap();
        assert!(!report.absolute);
        assert!((report.as_fraction() - 0.48).abs() < 1e-6);
    }

    #[test]
    fn test_parse_with_ailment_tag() {
        let report = HpReport::parse("50/100 par").unwrap();
        assert_eq!(report.ailment.as_deref(), Some("par"));
        assert!(!report.is_knockout());
    }

    #[test]
    fn test_parse_knockout_tag() {
        let report = HpReport::parse("0 fnt").unwrap();
        assert!(report.is_knockout());
        assert_eq!(report.as_fraction(), 0.0);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(HpReport::parse("abc").is_none());
        assert!(HpReport::parse("10/").is_none());
        assert!(HpReport::parse("").is_none());
    }

    #[test]
    fn test_fraction_clamped() {
        let report = HpReport::fraction(1.7);
        assert_eq!(report.as_fraction(), 1.0);

        let report = HpReport::absolute(10.0, 0.0);
        assert_eq!(report.as_fraction(), 0.0);
    }
}
