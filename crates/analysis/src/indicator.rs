//! Indicators: a column, a per-row predicate, and a fallback probability
//! used when the column is absent.
//!
//! A present column is always evaluated, even when every cell is Missing;
//! Missing and unparseable cells evaluate to 0. Only an absent column
//! triggers the random fallback, drawn once per row.

use rand::Rng;

use psyscan_table::{Level, RecordTable, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Predicate {
    /// Ordinal level is High or Very High.
    LevelHigh,
    /// Numeric value strictly below the threshold.
    Below(f64),
    /// Numeric value at or above the threshold.
    AtLeast(f64),
}

impl Predicate {
    pub fn holds(&self, value: &Value) -> bool {
        match self {
            Self::LevelHigh => Level::from_value(value).is_some_and(|l| l.is_high()),
            Self::Below(t) => value.as_f64().is_some_and(|v| v < *t),
            Self::AtLeast(t) => value.as_f64().is_some_and(|v| v >= *t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    pub column: &'static str,
    pub predicate: Predicate,
    /// Probability of a 1 per row when the column is absent.
    pub fallback_p: f64,
}

impl Indicator {
    pub const fn new(column: &'static str, predicate: Predicate, fallback_p: f64) -> Self {
        Self {
            column,
            predicate,
            fallback_p,
        }
    }

    /// One flag per row of `table`.
    pub fn evaluate<R: Rng + ?Sized>(&self, table: &RecordTable, rng: &mut R) -> Vec<bool> {
        match table.column(self.column) {
            Some(values) => values.map(|v| self.predicate.holds(v)).collect(),
            None => {
                log::debug!(
                    "column '{}' absent; drawing flags with p={}",
                    self.column,
                    self.fallback_p
                );
                (0..table.len()).map(|_| rng.gen_bool(self.fallback_p)).collect()
            }
        }
    }
}

/// Sum of indicator flags per row.
pub fn composite<R: Rng + ?Sized>(indicators: &[Indicator], table: &RecordTable, rng: &mut R) -> Vec<i64> {
    let mut scores = vec![0i64; table.len()];
    for indicator in indicators {
        for (score, hit) in scores.iter_mut().zip(indicator.evaluate(table, rng)) {
            *score += hit as i64;
        }
    }
    scores
}

pub(crate) fn flags(values: Vec<bool>) -> Vec<Value> {
    values.into_iter().map(Value::flag).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use psyscan_table::columns::{JOB_SATISFACTION, STRESS_LEVEL};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn table(column: &str, values: Vec<Value>) -> RecordTable {
        RecordTable::from_rows(vec![column.to_string()], values.into_iter().map(|v| vec![v]).collect())
    }

    #[test]
    fn predicates() {
        assert!(Predicate::LevelHigh.holds(&Value::text("Muy Alto")));
        assert!(!Predicate::LevelHigh.holds(&Value::text("Medium")));
        assert!(!Predicate::LevelHigh.holds(&Value::text("unknown")));
        assert!(!Predicate::LevelHigh.holds(&Value::Missing));

        assert!(Predicate::Below(5.0).holds(&Value::Int(4)));
        assert!(!Predicate::Below(5.0).holds(&Value::Int(5)));
        assert!(Predicate::Below(5.0).holds(&Value::text("4.5")));
        assert!(!Predicate::Below(5.0).holds(&Value::Missing));

        assert!(Predicate::AtLeast(5.0).holds(&Value::Int(5)));
        assert!(!Predicate::AtLeast(5.0).holds(&Value::Float(4.9)));
    }

    #[test]
    fn present_column_never_draws() {
        let t = table(STRESS_LEVEL, vec![Value::Missing, Value::Missing]);
        let ind = Indicator::new(STRESS_LEVEL, Predicate::LevelHigh, 1.0);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(ind.evaluate(&t, &mut rng), vec![false, false]);
    }

    #[test]
    fn absent_column_uses_fallback() {
        let t = table("other", vec![Value::Int(1); 4]);
        let mut rng = StdRng::seed_from_u64(0);

        let always = Indicator::new(STRESS_LEVEL, Predicate::LevelHigh, 1.0);
        assert_eq!(always.evaluate(&t, &mut rng), vec![true; 4]);

        let never = Indicator::new(STRESS_LEVEL, Predicate::LevelHigh, 0.0);
        assert_eq!(never.evaluate(&t, &mut rng), vec![false; 4]);
    }

    #[test]
    fn composite_sums_indicators() {
        let t = RecordTable::from_rows(
            vec![STRESS_LEVEL.into(), JOB_SATISFACTION.into()],
            vec![
                vec![Value::text("High"), Value::Int(3)],
                vec![Value::text("Low"), Value::Int(3)],
                vec![Value::text("Low"), Value::Int(8)],
            ],
        );
        let indicators = [
            Indicator::new(STRESS_LEVEL, Predicate::LevelHigh, 0.3),
            Indicator::new(JOB_SATISFACTION, Predicate::Below(5.0), 0.2),
        ];
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(composite(&indicators, &t, &mut rng), vec![2, 1, 0]);
    }
}
