//! Synthetic employee tables.
//!
//! These generators stand in for sources that cannot be read (parse
//! failures, PDF/DOCX documents) and provide the demo datasets. Everything
//! they produce is fabricated; callers must label it as such.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use psyscan_table::columns::*;
use psyscan_table::{RecordTable, Value};

/// Seed shared by the fallback and demo generators.
pub const DEFAULT_SEED: u64 = 42;
/// Rows in the table substituted for an unparseable source.
pub const FALLBACK_ROWS: usize = 50;

const LEVELS: [&str; 4] = ["Low", "Medium", "High", "Very High"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoSize {
    Small,
    Large,
}

impl DemoSize {
    pub fn rows(&self) -> usize {
        match self {
            Self::Small => 50,
            Self::Large => 150,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Small => "demo_small.csv",
            Self::Large => "demo_large.csv",
        }
    }
}

impl std::str::FromStr for DemoSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "large" => Ok(Self::Large),
            other => Err(format!("unknown demo size '{other}' (expected small or large)")),
        }
    }
}

/// Eight-column table substituted when a delimited or spreadsheet source fails to parse.
pub fn fallback_table(rows: usize, seed: u64) -> RecordTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut table = RecordTable::new(owned(&[
        EMPLOYEE_ID,
        NAME,
        WORK_AREA,
        STRESS_LEVEL,
        WORKLOAD_DEMAND,
        JOB_SATISFACTION,
        ABSENCE_DAYS,
        TENURE_MONTHS,
    ]));

    let areas = [("Academic", 0.40), ("Administrative", 0.35), ("Operational", 0.25)];
    let stress = weighted(&LEVELS, &[0.50, 0.25, 0.15, 0.10]);
    let demand = weighted(&LEVELS, &[0.30, 0.40, 0.20, 0.10]);

    for i in 1..=rows {
        table.push_row(vec![
            Value::Int(i as i64),
            Value::text(format!("Employee_{i}")),
            Value::text(choose_weighted(&mut rng, &areas)),
            Value::text(choose_weighted(&mut rng, &stress)),
            Value::text(choose_weighted(&mut rng, &demand)),
            Value::Int(rng.gen_range(1..=10)),
            Value::Int(poisson(&mut rng, 2.0)),
            Value::Int(rng.gen_range(1..60)),
        ]);
    }
    table
}

/// Twelve-column demo table; also backs the PDF/DOCX stubs.
pub fn demo_table(rows: usize, seed: u64) -> RecordTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut table = RecordTable::new(owned(&CANONICAL));

    let areas = [
        ("Academic", 0.30),
        ("Administrative", 0.25),
        ("Operational", 0.20),
        ("Commercial", 0.15),
        ("Research", 0.10),
    ];
    let titles = ["Professor", "Administrator", "Coordinator", "Researcher", "Assistant"];
    let stress = weighted(&LEVELS, &[0.40, 0.30, 0.20, 0.10]);
    let demand = weighted(&LEVELS, &[0.30, 0.40, 0.20, 0.10]);
    let genders = [("Female", 0.52), ("Male", 0.45), ("Other", 0.03)];
    let contracts = [("Permanent", 0.60), ("Temporary", 0.30), ("Service contract", 0.10)];

    for i in 1..=rows {
        // Column order follows CANONICAL
        table.push_row(vec![
            Value::Int(i as i64),
            Value::text(format!("Employee_{i}")),
            Value::text(choose_weighted(&mut rng, &areas)),
            Value::text(titles[rng.gen_range(0..titles.len())]),
            Value::text(choose_weighted(&mut rng, &stress)),
            Value::text(choose_weighted(&mut rng, &demand)),
            Value::Int(rng.gen_range(1..=10)),
            Value::Int(poisson(&mut rng, 3.0)),
            Value::Int(rng.gen_range(1..120)),
            Value::Int(rng.gen_range(25..60)),
            Value::text(choose_weighted(&mut rng, &genders)),
            Value::text(choose_weighted(&mut rng, &contracts)),
        ]);
    }
    table
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn weighted<'a>(options: &[&'a str], weights: &[f64]) -> Vec<(&'a str, f64)> {
    options.iter().copied().zip(weights.iter().copied()).collect()
}

/// Pick one option by weight. Invalid weight sets fall back to the first option.
pub(crate) fn choose_weighted<'a, R: Rng + ?Sized>(rng: &mut R, options: &[(&'a str, f64)]) -> &'a str {
    match WeightedIndex::<f64>::new(options.iter().map(|(_, w)| *w)) {
        Ok(dist) => options[dist.sample(rng)].0,
        Err(_) => options.first().map(|(o, _)| *o).unwrap_or_default(),
    }
}

/// Knuth's multiplication method; fine for the small means used here.
pub(crate) fn poisson<R: Rng + ?Sized>(rng: &mut R, lambda: f64) -> i64 {
    let limit = (-lambda).exp();
    let mut k = 0i64;
    let mut p = 1.0f64;
    loop {
        p *= rng.gen::<f64>();
        if p <= limit {
            return k;
        }
        k += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psyscan_table::Level;

    #[test]
    fn fallback_is_reproducible() {
        let a = fallback_table(FALLBACK_ROWS, DEFAULT_SEED);
        let b = fallback_table(FALLBACK_ROWS, DEFAULT_SEED);
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
        assert_eq!(a.width(), 8);
    }

    #[test]
    fn demo_schema_is_canonical() {
        let t = demo_table(20, DEFAULT_SEED);
        assert_eq!(t.columns(), &CANONICAL);
        assert_eq!(t.len(), 20);
        assert_eq!(t.get(0, EMPLOYEE_ID), Some(&Value::Int(1)));
        assert_eq!(t.get(19, NAME), Some(&Value::text("Employee_20")));
    }

    #[test]
    fn demo_values_in_documented_ranges() {
        let t = demo_table(300, 7);
        for row in 0..t.len() {
            let sat = t.get(row, JOB_SATISFACTION).and_then(Value::as_i64).unwrap();
            assert!((1..=10).contains(&sat));
            let tenure = t.get(row, TENURE_MONTHS).and_then(Value::as_i64).unwrap();
            assert!((1..120).contains(&tenure));
            let age = t.get(row, AGE).and_then(Value::as_i64).unwrap();
            assert!((25..60).contains(&age));
            let absence = t.get(row, ABSENCE_DAYS).and_then(Value::as_i64).unwrap();
            assert!(absence >= 0);
            assert!(Level::from_value(t.get(row, STRESS_LEVEL).unwrap()).is_some());
        }
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(demo_table(50, 1), demo_table(50, 2));
    }

    #[test]
    fn poisson_mean_is_close() {
        let mut rng = StdRng::seed_from_u64(3);
        let n = 5000;
        let total: i64 = (0..n).map(|_| poisson(&mut rng, 2.0)).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - 2.0).abs() < 0.15, "mean was {mean}");
    }

    #[test]
    fn demo_size_parsing() {
        assert_eq!("small".parse::<DemoSize>(), Ok(DemoSize::Small));
        assert_eq!("LARGE".parse::<DemoSize>().map(|d| d.rows()), Ok(150));
        assert!("medium".parse::<DemoSize>().is_err());
    }
}
