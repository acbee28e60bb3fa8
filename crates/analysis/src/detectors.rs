//! Color-coded detectors: composite indicator scores mapped onto risk bands.

use rand::Rng;

use psyscan_table::columns::{ABSENCE_DAYS, JOB_SATISFACTION, STRESS_LEVEL, TENURE_MONTHS, WORKLOAD_DEMAND};
use psyscan_table::{RecordTable, Value};

use crate::bands::{ILLNESS_BANDS, ROTATION_BANDS};
use crate::indicator::{composite, Indicator, Predicate};

pub const ILLNESS_SCORE: &str = "illness_score";
pub const ILLNESS_RISK: &str = "illness_risk";
pub const DEPRESSION_ALERT: &str = "depression_alert";
pub const ANXIETY_ALERT: &str = "anxiety_alert";
pub const ROTATION_SCORE: &str = "rotation_score";
pub const ROTATION_BAND: &str = "rotation_band";

/// Composite score at which both mental-health alerts fire.
pub const ALERT_THRESHOLD: i64 = 2;

pub const ILLNESS_INDICATORS: [Indicator; 4] = [
    Indicator::new(STRESS_LEVEL, Predicate::LevelHigh, 0.3),
    Indicator::new(WORKLOAD_DEMAND, Predicate::LevelHigh, 0.3),
    Indicator::new(JOB_SATISFACTION, Predicate::Below(5.0), 0.2),
    Indicator::new(ABSENCE_DAYS, Predicate::AtLeast(5.0), 0.2),
];

pub const ROTATION_INDICATORS: [Indicator; 3] = [
    Indicator::new(JOB_SATISFACTION, Predicate::Below(5.0), 0.2),
    Indicator::new(STRESS_LEVEL, Predicate::LevelHigh, 0.3),
    Indicator::new(TENURE_MONTHS, Predicate::Below(12.0), 0.2),
];

pub fn illness<R: Rng + ?Sized>(table: &RecordTable, rng: &mut R) -> RecordTable {
    let scores = composite(&ILLNESS_INDICATORS, table, rng);
    let band = scores
        .iter()
        .map(|s| Value::text(ILLNESS_BANDS.classify(*s).render()))
        .collect();
    let alerts: Vec<Value> = scores.iter().map(|s| Value::flag(*s >= ALERT_THRESHOLD)).collect();

    table
        .clone()
        .with_column(ILLNESS_SCORE, scores.into_iter().map(Value::Int).collect())
        .with_column(ILLNESS_RISK, band)
        .with_column(DEPRESSION_ALERT, alerts.clone())
        .with_column(ANXIETY_ALERT, alerts)
}

pub fn rotation_color<R: Rng + ?Sized>(table: &RecordTable, rng: &mut R) -> RecordTable {
    let scores = composite(&ROTATION_INDICATORS, table, rng);
    let band = scores
        .iter()
        .map(|s| Value::text(ROTATION_BANDS.classify(*s).render()))
        .collect();

    table
        .clone()
        .with_column(ROTATION_SCORE, scores.into_iter().map(Value::Int).collect())
        .with_column(ROTATION_BAND, band)
}
