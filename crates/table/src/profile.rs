//! Table profiling: shape, missing cells, per-column structure and
//! descriptive statistics for numeric columns.

use std::collections::HashSet;

use serde::Serialize;

use crate::table::RecordTable;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
    /// Mixed numbers and text.
    Mixed,
    /// Only Missing cells.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1). `None` for a single value.
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub unique: usize,
    pub missing: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableProfile {
    pub rows: usize,
    pub columns: usize,
    pub missing: usize,
    pub column_profiles: Vec<ColumnProfile>,
}

impl TableProfile {
    pub fn of(table: &RecordTable) -> Self {
        let column_profiles = table
            .columns()
            .iter()
            .map(|name| profile_column(table, name))
            .collect();

        Self {
            rows: table.len(),
            columns: table.width(),
            missing: table.missing_count(),
            column_profiles,
        }
    }
}

fn profile_column(table: &RecordTable, name: &str) -> ColumnProfile {
    let mut ints = 0usize;
    let mut floats = 0usize;
    let mut texts = 0usize;
    let mut missing = 0usize;
    let mut distinct: HashSet<String> = HashSet::new();
    let mut numbers: Vec<f64> = Vec::new();

    for value in table.column(name).into_iter().flatten() {
        match value {
            Value::Int(n) => {
                ints += 1;
                numbers.push(*n as f64);
            }
            Value::Float(n) => {
                floats += 1;
                numbers.push(*n);
            }
            Value::Text(_) => texts += 1,
            Value::Missing => {
                missing += 1;
                continue;
            }
        }
        distinct.insert(value.to_string());
    }

    let kind = match (ints + floats > 0, texts > 0) {
        (false, false) => ColumnKind::Empty,
        (true, true) => ColumnKind::Mixed,
        (false, true) => ColumnKind::Text,
        (true, false) if floats > 0 => ColumnKind::Float,
        (true, false) => ColumnKind::Integer,
    };

    let numeric = if matches!(kind, ColumnKind::Integer | ColumnKind::Float) {
        describe(&mut numbers)
    } else {
        None
    };

    ColumnProfile {
        name: name.to_string(),
        kind,
        unique: distinct.len(),
        missing,
        numeric,
    }
}

/// Descriptive statistics; quantiles use linear interpolation between ranks.
pub fn describe(values: &mut [f64]) -> Option<NumericStats> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        Some(var.sqrt())
    } else {
        None
    };

    Some(NumericStats {
        count,
        mean,
        std,
        min: values[0],
        p25: quantile(values, 0.25),
        p50: quantile(values, 0.50),
        p75: quantile(values, 0.75),
        max: values[count - 1],
    })
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RecordTable {
        RecordTable::from_rows(
            vec!["id".into(), "stress".into(), "score".into(), "blank".into()],
            vec![
                vec![Value::Int(1), Value::text("High"), Value::Float(1.5)],
                vec![Value::Int(2), Value::text("Low"), Value::Int(3)],
                vec![Value::Int(3), Value::text("High"), Value::Missing],
                vec![Value::Int(4), Value::Missing, Value::Float(4.5)],
            ],
        )
    }

    #[test]
    fn shape_and_missing() {
        let p = TableProfile::of(&table());
        assert_eq!(p.rows, 4);
        assert_eq!(p.columns, 4);
        // 1 stress + 1 score + 4 blank
        assert_eq!(p.missing, 6);
    }

    #[test]
    fn column_kinds_and_unique_counts() {
        let p = TableProfile::of(&table());
        let by_name = |n: &str| p.column_profiles.iter().find(|c| c.name == n).unwrap();

        assert_eq!(by_name("id").kind, ColumnKind::Integer);
        assert_eq!(by_name("stress").kind, ColumnKind::Text);
        assert_eq!(by_name("stress").unique, 2);
        assert_eq!(by_name("score").kind, ColumnKind::Float);
        assert_eq!(by_name("blank").kind, ColumnKind::Empty);
        assert!(by_name("stress").numeric.is_none());
    }

    #[test]
    fn describe_matches_linear_quantiles() {
        let mut v = vec![4.0, 1.0, 3.0, 2.0];
        let s = describe(&mut v).unwrap();
        assert_eq!(s.count, 4);
        assert_eq!(s.mean, 2.5);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);
        assert_eq!(s.p25, 1.75);
        assert_eq!(s.p50, 2.5);
        assert_eq!(s.p75, 3.25);
        let std = s.std.unwrap();
        assert!((std - 1.2909944).abs() < 1e-6);
    }

    #[test]
    fn describe_single_value_has_no_std() {
        let s = describe(&mut [7.0]).unwrap();
        assert_eq!(s.std, None);
        assert_eq!(s.p75, 7.0);
        assert!(describe(&mut []).is_none());
    }
}
