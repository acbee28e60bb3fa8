//! Rotation (turnover) risk.

use rand::Rng;

use psyscan_table::columns::JOB_SATISFACTION;
use psyscan_table::{RecordTable, Value};

use crate::indicator::{flags, Indicator, Predicate};

pub const ROTATION_RISK: &str = "rotation_risk";
pub const ROTATION_PROBABILITY: &str = "rotation_probability";

const LOW_SATISFACTION: Indicator = Indicator::new(JOB_SATISFACTION, Predicate::Below(5.0), 0.2);

/// `rotation_risk` = 1 when satisfaction is below 5. `rotation_probability`
/// is an independent uniform draw in [0, 1) and carries no model.
pub fn rotation_risk<R: Rng + ?Sized>(table: &RecordTable, rng: &mut R) -> RecordTable {
    let risk = flags(LOW_SATISFACTION.evaluate(table, rng));
    let probability = (0..table.len()).map(|_| Value::Float(rng.gen::<f64>())).collect();
    table
        .clone()
        .with_column(ROTATION_RISK, risk)
        .with_column(ROTATION_PROBABILITY, probability)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn satisfaction_five_is_not_flagged() {
        let table = RecordTable::from_rows(
            vec![JOB_SATISFACTION.into()],
            vec![vec![Value::Int(4)], vec![Value::Int(5)], vec![Value::Missing]],
        );
        let mut rng = StdRng::seed_from_u64(3);
        let out = rotation_risk(&table, &mut rng);

        let risk: Vec<&Value> = out.column(ROTATION_RISK).unwrap().collect();
        assert_eq!(risk, vec![&Value::Int(1), &Value::Int(0), &Value::Int(0)]);

        for p in out.column(ROTATION_PROBABILITY).unwrap() {
            let p = p.as_f64().unwrap();
            assert!((0.0..1.0).contains(&p));
        }
    }

    #[test]
    fn absent_satisfaction_draws_at_fallback_rate() {
        let table = RecordTable::from_rows(vec!["x".into()], vec![vec![Value::Int(0)]; 4000]);
        let mut rng = StdRng::seed_from_u64(8);
        let out = rotation_risk(&table, &mut rng);
        let hits = out.column(ROTATION_RISK).unwrap().filter(|v| **v == Value::Int(1)).count();
        let rate = hits as f64 / 4000.0;
        assert!((rate - 0.2).abs() < 0.03, "rate was {rate}");
    }
}
