//! Early risk alerts and incident prediction: one flag per row from the
//! stress level.

use rand::Rng;

use psyscan_table::columns::STRESS_LEVEL;
use psyscan_table::RecordTable;

use crate::indicator::{flags, Indicator, Predicate};

pub const HIGH_RISK: &str = "high_risk";
pub const INCIDENT_RISK: &str = "incident_risk";

const ALERT: Indicator = Indicator::new(STRESS_LEVEL, Predicate::LevelHigh, 0.3);
const INCIDENT: Indicator = Indicator::new(STRESS_LEVEL, Predicate::LevelHigh, 0.15);

/// `high_risk` = 1 for High or Very High stress.
pub fn early_alerts<R: Rng + ?Sized>(table: &RecordTable, rng: &mut R) -> RecordTable {
    let values = flags(ALERT.evaluate(table, rng));
    table.clone().with_column(HIGH_RISK, values)
}

/// `incident_risk`, same rule with a lower fallback rate.
pub fn incident_risk<R: Rng + ?Sized>(table: &RecordTable, rng: &mut R) -> RecordTable {
    let values = flags(INCIDENT.evaluate(table, rng));
    table.clone().with_column(INCIDENT_RISK, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use psyscan_table::Value;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn stress(levels: &[&str]) -> RecordTable {
        RecordTable::from_rows(
            vec![STRESS_LEVEL.into()],
            levels.iter().map(|l| vec![Value::text(*l)]).collect(),
        )
    }

    #[test]
    fn high_and_very_high_are_flagged() {
        let mut rng = StdRng::seed_from_u64(1);
        let out = early_alerts(&stress(&["High", "Low", "Very High"]), &mut rng);
        let flags: Vec<&Value> = out.column(HIGH_RISK).unwrap().collect();
        assert_eq!(flags, vec![&Value::Int(1), &Value::Int(0), &Value::Int(1)]);
    }

    #[test]
    fn incidents_follow_stress() {
        let mut rng = StdRng::seed_from_u64(1);
        let out = incident_risk(&stress(&["Medio", "Alto"]), &mut rng);
        assert_eq!(out.get(0, INCIDENT_RISK), Some(&Value::Int(0)));
        assert_eq!(out.get(1, INCIDENT_RISK), Some(&Value::Int(1)));
    }

    #[test]
    fn fallback_rate_is_roughly_respected() {
        let table = RecordTable::from_rows(vec!["x".into()], vec![vec![Value::Int(0)]; 4000]);
        let mut rng = StdRng::seed_from_u64(5);
        let out = early_alerts(&table, &mut rng);
        let hits = out.column(HIGH_RISK).unwrap().filter(|v| **v == Value::Int(1)).count();
        let rate = hits as f64 / 4000.0;
        assert!((rate - 0.3).abs() < 0.03, "rate was {rate}");
    }

    #[test]
    fn incident_fallback_rate_is_lower() {
        let table = RecordTable::from_rows(vec!["x".into()], vec![vec![Value::Int(0)]; 4000]);
        let mut rng = StdRng::seed_from_u64(5);
        let out = incident_risk(&table, &mut rng);
        let hits = out.column(INCIDENT_RISK).unwrap().filter(|v| **v == Value::Int(1)).count();
        let rate = hits as f64 / 4000.0;
        assert!((rate - 0.15).abs() < 0.03, "rate was {rate}");
    }

    #[test]
    fn input_is_not_mutated() {
        let table = stress(&["High"]);
        let before = table.clone();
        let mut rng = StdRng::seed_from_u64(1);
        let _ = early_alerts(&table, &mut rng);
        assert_eq!(table, before);
        assert!(!table.has_column(HIGH_RISK));
    }
}
