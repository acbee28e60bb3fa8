use proptest::prelude::*;

use psyscan_analysis::bands::{Bands, RiskBand};
use psyscan_analysis::{aggregate, run, AnalysisConfig, AnalysisKind};
use psyscan_table::columns::{JOB_SATISFACTION, STRESS_LEVEL, WORKLOAD_DEMAND};
use psyscan_table::{IngestedSource, RecordTable, SourceMeta, SourceStatus, Value};

fn staff() -> RecordTable {
    RecordTable::from_rows(
        vec![STRESS_LEVEL.into(), WORKLOAD_DEMAND.into(), JOB_SATISFACTION.into()],
        vec![
            vec![Value::text("High"), Value::text("Low"), Value::Int(5)],
            vec![Value::text("Low"), Value::text("High"), Value::Int(2)],
            vec![Value::text("Very High"), Value::text("Medium"), Value::Int(8)],
            vec![Value::text("Medium"), Value::text("Very High"), Value::Missing],
        ],
    )
}

fn column(table: &RecordTable, name: &str) -> Vec<Value> {
    table.column(name).expect("column present").cloned().collect()
}

#[test]
fn alerts_follow_stress_level() {
    let run = run(&AnalysisConfig::default(), &staff(), &[AnalysisKind::EarlyAlert]);
    let out = &run.results[0].table;
    assert_eq!(
        column(out, "high_risk"),
        vec![Value::Int(1), Value::Int(0), Value::Int(1), Value::Int(0)]
    );
}

#[test]
fn satisfaction_of_five_is_not_a_rotation_risk() {
    let run = run(&AnalysisConfig::default(), &staff(), &[AnalysisKind::Rotation]);
    let out = &run.results[0].table;
    assert_eq!(
        column(out, "rotation_risk"),
        vec![Value::Int(0), Value::Int(1), Value::Int(0), Value::Int(0)]
    );
}

#[test]
fn deterministic_analyses_are_idempotent_and_leave_input_alone() {
    let input = staff();
    let before = input.clone();
    let deterministic = [
        AnalysisKind::EarlyAlert,
        AnalysisKind::Recommendations,
        AnalysisKind::StressPatterns,
    ];

    // Unseeded on purpose: these rules read only columns that are present
    let first = run(&AnalysisConfig::default(), &input, &deterministic);
    let second = run(&AnalysisConfig::default(), &input, &deterministic);

    assert_eq!(first.results.len(), 3);
    for (a, b) in first.results.iter().zip(&second.results) {
        assert_eq!(a.table, b.table, "{}", a.key());
    }
    assert_eq!(input, before);
}

#[test]
fn every_analysis_adds_its_columns() {
    let run = run(&AnalysisConfig::seeded(1), &staff(), &AnalysisKind::ALL);
    for result in &run.results {
        for column in result.kind.output_columns() {
            assert!(result.table.has_column(column), "{} lacks {column}", result.key());
        }
        assert_eq!(result.table.len(), 4);
    }
}

#[test]
fn clustering_fewer_rows_than_clusters_yields_zero() {
    let two = staff().head(2);
    let run = run(&AnalysisConfig::default(), &two, &[AnalysisKind::StressPatterns]);
    assert_eq!(column(&run.results[0].table, "cluster"), vec![Value::Int(0), Value::Int(0)]);
}

#[test]
fn no_sources_means_nothing_to_analyze() {
    assert!(aggregate(Vec::new()).is_none());
}

fn source_with_rows(i: usize, rows: usize) -> IngestedSource {
    let table = RecordTable::from_rows(
        vec!["employee_id".into(), format!("extra_{}", i % 3)],
        (0..rows).map(|r| vec![Value::Int(r as i64 + 1), Value::Int(i as i64)]).collect(),
    );
    IngestedSource {
        meta: SourceMeta::new(format!("s{i}.csv"), "text/csv", 100, rows, SourceStatus::Parsed),
        table,
    }
}

proptest! {
    #[test]
    fn band_mapping_is_exhaustive(low in -5i64..5, span in 0i64..5, score in -20i64..20) {
        let bands = Bands::new(low, low + span);
        let band = bands.classify(score);
        let expected = if score <= low {
            RiskBand::Low
        } else if score <= low + span {
            RiskBand::Medium
        } else {
            RiskBand::High
        };
        prop_assert_eq!(band, expected);
    }

    #[test]
    fn aggregate_rows_are_the_sum_in_order(sizes in prop::collection::vec(0usize..20, 1..6)) {
        let sources: Vec<IngestedSource> = sizes.iter().enumerate().map(|(i, &n)| source_with_rows(i, n)).collect();
        let combined = aggregate(sources).unwrap();

        prop_assert_eq!(combined.table.len(), sizes.iter().sum::<usize>());
        prop_assert_eq!(combined.sources.len(), sizes.len());

        // Rows appear block by block in source order
        let mut row = 0;
        for (i, &n) in sizes.iter().enumerate() {
            for r in 0..n {
                prop_assert_eq!(combined.table.get(row, "employee_id"), Some(&Value::Int(r as i64 + 1)));
                let marker = combined.table.get(row, &format!("extra_{}", i % 3));
                prop_assert_eq!(marker, Some(&Value::Int(i as i64)));
                row += 1;
            }
        }
    }
}
