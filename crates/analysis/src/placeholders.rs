//! Placeholder metrics. Neither function reads the table's contents: the
//! values are uniform random draws, one per row, and must be presented as
//! such.

use rand::Rng;

use psyscan_table::{RecordTable, Value};

use crate::bands::RESILIENCE_BANDS;

pub const RESILIENCE_SCORE: &str = "resilience_score";
pub const RESILIENCE_PROFILE: &str = "resilience_profile";
pub const EXPECTED_IMPROVEMENT: &str = "expected_improvement";
pub const RECOMMENDED_INTERVENTION: &str = "recommended_intervention";

pub const INTERVENTIONS: [&str; 4] = [
    "Training",
    "Job redesign",
    "Psychological support",
    "Flexible schedule",
];

/// Score uniform in 1–9; profile Low (1–3), Medium (4–6), High (7–9).
pub fn resilience<R: Rng + ?Sized>(table: &RecordTable, rng: &mut R) -> RecordTable {
    let scores: Vec<i64> = (0..table.len()).map(|_| rng.gen_range(1..=9)).collect();
    let profiles = scores
        .iter()
        .map(|s| Value::text(RESILIENCE_BANDS.classify(*s).label()))
        .collect();
    table
        .clone()
        .with_column(RESILIENCE_SCORE, scores.into_iter().map(Value::Int).collect())
        .with_column(RESILIENCE_PROFILE, profiles)
}

/// Improvement uniform in [0.1, 0.8); intervention chosen uniformly.
pub fn effectiveness<R: Rng + ?Sized>(table: &RecordTable, rng: &mut R) -> RecordTable {
    let improvement = (0..table.len())
        .map(|_| Value::Float(rng.gen_range(0.1..0.8)))
        .collect();
    let intervention = (0..table.len())
        .map(|_| Value::text(INTERVENTIONS[rng.gen_range(0..INTERVENTIONS.len())]))
        .collect();
    table
        .clone()
        .with_column(EXPECTED_IMPROVEMENT, improvement)
        .with_column(RECOMMENDED_INTERVENTION, intervention)
}
