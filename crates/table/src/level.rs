use serde::Serialize;

use crate::value::Value;

/// Ordinal scale shared by stress level and workload demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Low, Level::Medium, Level::High, Level::VeryHigh];

    /// Parse a level label. Case-insensitive; accepts the English labels and
    /// the Spanish ones found in legacy survey exports.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized: String = input
            .trim()
            .to_lowercase()
            .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        match normalized.as_str() {
            "low" | "bajo" | "baja" => Some(Level::Low),
            "medium" | "moderate" | "medio" | "media" => Some(Level::Medium),
            "high" | "alto" | "alta" => Some(Level::High),
            "very high" | "muy alto" | "muy alta" => Some(Level::VeryHigh),
            _ => None,
        }
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_str().and_then(Self::parse)
    }

    /// High or Very High.
    pub fn is_high(&self) -> bool {
        matches!(self, Level::High | Level::VeryHigh)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
            Level::VeryHigh => "Very High",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_english_and_spanish() {
        assert_eq!(Level::parse("High"), Some(Level::High));
        assert_eq!(Level::parse("very high"), Some(Level::VeryHigh));
        assert_eq!(Level::parse("Very_High"), Some(Level::VeryHigh));
        assert_eq!(Level::parse("Muy Alto"), Some(Level::VeryHigh));
        assert_eq!(Level::parse(" bajo "), Some(Level::Low));
        assert_eq!(Level::parse("Medio"), Some(Level::Medium));
        assert_eq!(Level::parse("extreme"), None);
        assert_eq!(Level::parse(""), None);
    }

    #[test]
    fn high_includes_very_high() {
        assert!(Level::High.is_high());
        assert!(Level::VeryHigh.is_high());
        assert!(!Level::Medium.is_high());
        assert!(!Level::Low.is_high());
    }

    #[test]
    fn labels_round_trip() {
        for level in Level::ALL {
            assert_eq!(Level::parse(level.label()), Some(level));
        }
    }

    #[test]
    fn non_text_values_are_not_levels() {
        assert_eq!(Level::from_value(&Value::Int(3)), None);
        assert_eq!(Level::from_value(&Value::Missing), None);
        assert_eq!(Level::from_value(&Value::text("Alto")), Some(Level::High));
    }
}
