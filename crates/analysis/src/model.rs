use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::Serialize;

use psyscan_table::RecordTable;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::evidence::AnalysisSummary;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The scoring functions, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AnalysisKind {
    #[serde(rename = "alerts")]
    EarlyAlert,
    #[serde(rename = "recommendations")]
    Recommendations,
    #[serde(rename = "stress")]
    StressPatterns,
    #[serde(rename = "rotation")]
    Rotation,
    #[serde(rename = "incidents")]
    Incidents,
    #[serde(rename = "resilience")]
    Resilience,
    #[serde(rename = "effectiveness")]
    Effectiveness,
    #[serde(rename = "illness")]
    Illness,
    #[serde(rename = "rotation_color")]
    RotationColor,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 9] = [
        AnalysisKind::EarlyAlert,
        AnalysisKind::Recommendations,
        AnalysisKind::StressPatterns,
        AnalysisKind::Rotation,
        AnalysisKind::Incidents,
        AnalysisKind::Resilience,
        AnalysisKind::Effectiveness,
        AnalysisKind::Illness,
        AnalysisKind::RotationColor,
    ];

    /// Stable key used on the command line and in export file names.
    pub fn key(&self) -> &'static str {
        match self {
            Self::EarlyAlert => "alerts",
            Self::Recommendations => "recommendations",
            Self::StressPatterns => "stress",
            Self::Rotation => "rotation",
            Self::Incidents => "incidents",
            Self::Resilience => "resilience",
            Self::Effectiveness => "effectiveness",
            Self::Illness => "illness",
            Self::RotationColor => "rotation_color",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::EarlyAlert => "Early risk alerts",
            Self::Recommendations => "Intervention recommendations",
            Self::StressPatterns => "Stress patterns",
            Self::Rotation => "Rotation risk",
            Self::Incidents => "Incident prediction",
            Self::Resilience => "Resilience profile",
            Self::Effectiveness => "Intervention effectiveness",
            Self::Illness => "Illness risk detector",
            Self::RotationColor => "Rotation risk detector",
        }
    }

    /// Columns this analysis appends.
    pub fn output_columns(&self) -> &'static [&'static str] {
        match self {
            Self::EarlyAlert => &[crate::alerts::HIGH_RISK],
            Self::Recommendations => &[crate::recommend::RECOMMENDATION],
            Self::StressPatterns => &[
                crate::cluster::STRESS_CODE,
                crate::cluster::DEMAND_CODE,
                crate::cluster::CLUSTER,
            ],
            Self::Rotation => &[
                crate::rotation::ROTATION_RISK,
                crate::rotation::ROTATION_PROBABILITY,
            ],
            Self::Incidents => &[crate::alerts::INCIDENT_RISK],
            Self::Resilience => &[
                crate::placeholders::RESILIENCE_SCORE,
                crate::placeholders::RESILIENCE_PROFILE,
            ],
            Self::Effectiveness => &[
                crate::placeholders::EXPECTED_IMPROVEMENT,
                crate::placeholders::RECOMMENDED_INTERVENTION,
            ],
            Self::Illness => &[
                crate::detectors::ILLNESS_SCORE,
                crate::detectors::ILLNESS_RISK,
                crate::detectors::DEPRESSION_ALERT,
                crate::detectors::ANXIETY_ALERT,
            ],
            Self::RotationColor => &[
                crate::detectors::ROTATION_SCORE,
                crate::detectors::ROTATION_BAND,
            ],
        }
    }

    /// Whether the output can differ between runs on the same input.
    pub fn is_randomized(&self) -> bool {
        !matches!(self, Self::Recommendations | Self::StressPatterns)
    }

    pub(crate) fn ordinal(&self) -> usize {
        Self::ALL.iter().position(|k| k == self).unwrap_or_default()
    }

    /// Score a copy of `table`. The input is left untouched.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        table: &RecordTable,
        config: &AnalysisConfig,
        rng: &mut R,
    ) -> RecordTable {
        match self {
            Self::EarlyAlert => crate::alerts::early_alerts(table, rng),
            Self::Recommendations => crate::recommend::recommend(table),
            Self::StressPatterns => crate::cluster::stress_patterns(table, config),
            Self::Rotation => crate::rotation::rotation_risk(table, rng),
            Self::Incidents => crate::alerts::incident_risk(table, rng),
            Self::Resilience => crate::placeholders::resilience(table, rng),
            Self::Effectiveness => crate::placeholders::effectiveness(table, rng),
            Self::Illness => crate::detectors::illness(table, rng),
            Self::RotationColor => crate::detectors::rotation_color(table, rng),
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AnalysisKind {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.key() == key)
            .ok_or_else(|| AnalysisError::UnknownAnalysis(s.trim().to_string()))
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One executed analysis: the scored table plus its summary.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub kind: AnalysisKind,
    pub title: &'static str,
    #[serde(skip)]
    pub table: RecordTable,
    pub summary: AnalysisSummary,
}

impl AnalysisResult {
    pub fn key(&self) -> &'static str {
        self.kind.key()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub engine_version: String,
    pub run_at: String,
    pub seed: Option<u64>,
    pub rows: usize,
}

/// Everything produced by one engine run, in selection order.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRun {
    pub meta: RunMeta,
    pub results: Vec<AnalysisResult>,
}

impl AnalysisRun {
    pub fn get(&self, kind: AnalysisKind) -> Option<&AnalysisResult> {
        self.results.iter().find(|r| r.kind == kind)
    }
}
