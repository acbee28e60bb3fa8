//! Score → risk band mapping.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub const ALL: [RiskBand; 3] = [RiskBand::Low, RiskBand::Medium, RiskBand::High];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🔴",
        }
    }

    /// Marker plus label, e.g. `🔴 High`.
    pub fn render(&self) -> String {
        format!("{} {}", self.marker(), self.label())
    }

    /// Accepts a rendered band or a bare label.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|b| s == b.label() || s == b.render())
    }
}

/// Two inclusive upper edges. A score on an edge falls into the lower band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bands {
    pub low_max: i64,
    pub medium_max: i64,
}

impl Bands {
    pub const fn new(low_max: i64, medium_max: i64) -> Self {
        Self { low_max, medium_max }
    }

    pub fn classify(&self, score: i64) -> RiskBand {
        if score <= self.low_max {
            RiskBand::Low
        } else if score <= self.medium_max {
            RiskBand::Medium
        } else {
            RiskBand::High
        }
    }
}

/// Illness composite, 0–4.
pub const ILLNESS_BANDS: Bands = Bands::new(1, 2);
/// Rotation composite, 0–3.
pub const ROTATION_BANDS: Bands = Bands::new(0, 1);
/// Resilience score 1–9, three equal-width bins.
pub const RESILIENCE_BANDS: Bands = Bands::new(3, 6);
