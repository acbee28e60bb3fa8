//! Intervention recommender.

use psyscan_table::columns::{JOB_SATISFACTION, STRESS_LEVEL, WORKLOAD_DEMAND};
use psyscan_table::{RecordTable, Value};

use crate::indicator::Predicate;

pub const RECOMMENDATION: &str = "recommendation";

pub const STRESS_TRAINING: &str = "Stress management training";
pub const WORKLOAD_REVIEW: &str = "Workload review";
pub const RECOGNITION: &str = "Recognition program";
pub const MONITORING: &str = "Periodic monitoring";

const RULES: [(&str, Predicate, &str); 3] = [
    (STRESS_LEVEL, Predicate::LevelHigh, STRESS_TRAINING),
    (WORKLOAD_DEMAND, Predicate::LevelHigh, WORKLOAD_REVIEW),
    (JOB_SATISFACTION, Predicate::Below(5.0), RECOGNITION),
];

/// One recommendation string per row. Absent columns contribute nothing, and
/// Missing satisfaction never triggers recognition.
pub fn recommend(table: &RecordTable) -> RecordTable {
    let values = (0..table.len())
        .map(|row| {
            let phrases: Vec<&str> = RULES
                .iter()
                .filter(|(column, predicate, _)| {
                    table.get(row, column).is_some_and(|v| predicate.holds(v))
                })
                .map(|(_, _, phrase)| *phrase)
                .collect();
            if phrases.is_empty() {
                Value::text(MONITORING)
            } else {
                Value::text(phrases.join(", "))
            }
        })
        .collect();
    table.clone().with_column(RECOMMENDATION, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrases_accumulate_in_rule_order() {
        let table = RecordTable::from_rows(
            vec![STRESS_LEVEL.into(), WORKLOAD_DEMAND.into(), JOB_SATISFACTION.into()],
            vec![
                vec![Value::text("High"), Value::text("Very High"), Value::Int(2)],
                vec![Value::text("Low"), Value::text("High"), Value::Int(7)],
                vec![Value::text("Low"), Value::text("Low"), Value::Int(5)],
                vec![Value::text("Low"), Value::text("Low"), Value::Missing],
            ],
        );
        let out = recommend(&table);
        let recs: Vec<String> = out.column(RECOMMENDATION).unwrap().map(|v| v.to_string()).collect();
        assert_eq!(
            recs,
            vec![
                "Stress management training, Workload review, Recognition program",
                "Workload review",
                "Periodic monitoring",
                "Periodic monitoring",
            ]
        );
    }

    #[test]
    fn empty_table_still_gets_column() {
        let out = recommend(&RecordTable::default());
        assert!(out.has_column(RECOMMENDATION));
        assert!(out.is_empty());
    }

    #[test]
    fn absent_columns_mean_monitoring() {
        let table = RecordTable::from_rows(vec!["name".into()], vec![vec![Value::text("Ana")]]);
        assert_eq!(recommend(&table).get(0, RECOMMENDATION), Some(&Value::text(MONITORING)));
    }
}
