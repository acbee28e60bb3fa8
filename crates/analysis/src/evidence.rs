use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use psyscan_table::columns::WORK_AREA;
use psyscan_table::RecordTable;

use crate::alerts::{HIGH_RISK, INCIDENT_RISK};
use crate::bands::RiskBand;
use crate::cluster::CLUSTER;
use crate::detectors::{ANXIETY_ALERT, DEPRESSION_ALERT, ILLNESS_RISK, ROTATION_BAND};
use crate::model::AnalysisKind;
use crate::placeholders::{EXPECTED_IMPROVEMENT, RECOMMENDED_INTERVENTION, RESILIENCE_PROFILE};
use crate::recommend::RECOMMENDATION;
use crate::rotation::ROTATION_RISK;

/// Recommendations listed in the summary.
pub const TOP_RECOMMENDATIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Count {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaRate {
    pub area: String,
    pub flagged: usize,
    pub total: usize,
    pub percent: f64,
}

/// Per-analysis summary figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisSummary {
    Flagged {
        column: &'static str,
        flagged: usize,
        total: usize,
        percent: f64,
        by_area: Vec<AreaRate>,
    },
    Recommendations {
        top: Vec<Count>,
    },
    Clusters {
        counts: Vec<Count>,
    },
    Rotation {
        flagged: usize,
        total: usize,
        retention_percent: f64,
    },
    Bands {
        column: &'static str,
        counts: Vec<Count>,
        #[serde(skip_serializing_if = "Option::is_none")]
        depression_alerts: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        anxiety_alerts: Option<usize>,
    },
    Effectiveness {
        mean_improvement: Option<f64>,
        by_intervention: Vec<Count>,
    },
}

impl AnalysisSummary {
    /// One line for the report's results list.
    pub fn headline(&self) -> String {
        match self {
            Self::Flagged { flagged, total, percent, .. } => {
                format!("{flagged} of {total} employees flagged ({percent:.1}%)")
            }
            Self::Recommendations { top } => match top.first() {
                Some(c) => format!("most frequent: {} ({})", c.label, c.count),
                None => "no recommendations".to_string(),
            },
            Self::Clusters { counts } => {
                let parts: Vec<String> = counts.iter().map(|c| format!("cluster {}: {}", c.label, c.count)).collect();
                parts.join(", ")
            }
            Self::Rotation { flagged, retention_percent, .. } => {
                format!("{flagged} at risk, retention {retention_percent:.1}%")
            }
            Self::Bands { counts, .. } => {
                let parts: Vec<String> = counts.iter().map(|c| format!("{} {}", c.label, c.count)).collect();
                parts.join(", ")
            }
            Self::Effectiveness { mean_improvement, .. } => match mean_improvement {
                Some(mean) => format!("mean expected improvement {:.1}%", mean * 100.0),
                None => "no employees".to_string(),
            },
        }
    }
}

/// Summarize a scored table.
pub fn summarize(kind: AnalysisKind, table: &RecordTable) -> AnalysisSummary {
    match kind {
        AnalysisKind::EarlyAlert => flagged(table, HIGH_RISK),
        AnalysisKind::Incidents => flagged(table, INCIDENT_RISK),
        AnalysisKind::Recommendations => AnalysisSummary::Recommendations {
            top: counts_by_frequency(table, RECOMMENDATION, TOP_RECOMMENDATIONS),
        },
        AnalysisKind::StressPatterns => AnalysisSummary::Clusters {
            counts: cluster_counts(table),
        },
        AnalysisKind::Rotation => {
            let flagged = count_ones(table, ROTATION_RISK);
            let total = table.len();
            AnalysisSummary::Rotation {
                flagged,
                total,
                retention_percent: if total == 0 { 0.0 } else { 100.0 - percent(flagged, total) },
            }
        }
        AnalysisKind::Resilience => bands(table, RESILIENCE_PROFILE, false),
        AnalysisKind::Illness => bands(table, ILLNESS_RISK, true),
        AnalysisKind::RotationColor => bands(table, ROTATION_BAND, false),
        AnalysisKind::Effectiveness => effectiveness(table),
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

fn is_one(value: &psyscan_table::Value) -> bool {
    value.as_i64() == Some(1)
}

fn count_ones(table: &RecordTable, column: &str) -> usize {
    table.column(column).map_or(0, |values| values.filter(|v| is_one(v)).count())
}

fn flagged(table: &RecordTable, column: &'static str) -> AnalysisSummary {
    let total = table.len();
    let flagged = count_ones(table, column);

    let mut areas: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    if table.has_column(WORK_AREA) {
        for row in 0..total {
            let area = table.get(row, WORK_AREA).map(|v| v.category_key()).unwrap_or_default();
            let entry = areas.entry(area).or_default();
            entry.1 += 1;
            if table.get(row, column).is_some_and(is_one) {
                entry.0 += 1;
            }
        }
    }

    AnalysisSummary::Flagged {
        column,
        flagged,
        total,
        percent: percent(flagged, total),
        by_area: areas
            .into_iter()
            .map(|(area, (flagged, total))| AreaRate {
                area,
                flagged,
                total,
                percent: percent(flagged, total),
            })
            .collect(),
    }
}

/// Most frequent values first; ties by label.
fn counts_by_frequency(table: &RecordTable, column: &str, limit: usize) -> Vec<Count> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    if let Some(values) = table.column(column) {
        for v in values {
            *counts.entry(v.to_string()).or_insert(0) += 1;
        }
    }
    let mut counts: Vec<Count> = counts.into_iter().map(|(label, count)| Count { label, count }).collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    counts.truncate(limit);
    counts
}

fn cluster_counts(table: &RecordTable) -> Vec<Count> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    if let Some(values) = table.column(CLUSTER) {
        for id in values.filter_map(|v| v.as_i64()) {
            *counts.entry(id).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|(id, count)| Count { label: id.to_string(), count })
        .collect()
}

fn bands(table: &RecordTable, column: &'static str, with_alerts: bool) -> AnalysisSummary {
    let mut tally = [0usize; 3];
    if let Some(values) = table.column(column) {
        for band in values.filter_map(|v| v.as_str().and_then(RiskBand::parse)) {
            tally[band as usize] += 1;
        }
    }
    AnalysisSummary::Bands {
        column,
        counts: RiskBand::ALL
            .iter()
            .zip(tally)
            .map(|(band, count)| Count { label: band.label().to_string(), count })
            .collect(),
        depression_alerts: with_alerts.then(|| count_ones(table, DEPRESSION_ALERT)),
        anxiety_alerts: with_alerts.then(|| count_ones(table, ANXIETY_ALERT)),
    }
}

fn effectiveness(table: &RecordTable) -> AnalysisSummary {
    let improvements: Vec<f64> = table
        .column(EXPECTED_IMPROVEMENT)
        .map(|values| values.filter_map(|v| v.as_f64()).collect())
        .unwrap_or_default();
    let mean_improvement = if improvements.is_empty() {
        None
    } else {
        Some(improvements.iter().sum::<f64>() / improvements.len() as f64)
    };

    let mut by_intervention = counts_by_frequency(table, RECOMMENDED_INTERVENTION, usize::MAX);
    by_intervention.sort_by(|a, b| a.label.cmp(&b.label));

    AnalysisSummary::Effectiveness {
        mean_improvement,
        by_intervention,
    }
}
