//! Stress pattern clustering over label-encoded stress and demand.

use std::collections::BTreeSet;

use psyscan_table::columns::{STRESS_LEVEL, WORKLOAD_DEMAND};
use psyscan_table::{RecordTable, Value};

use crate::config::AnalysisConfig;
use crate::kmeans::KMeans;

pub const STRESS_CODE: &str = "stress_code";
pub const DEMAND_CODE: &str = "demand_code";
pub const CLUSTER: &str = "cluster";

const FEATURES: [(&str, &str); 2] = [(STRESS_LEVEL, STRESS_CODE), (WORKLOAD_DEMAND, DEMAND_CODE)];

/// Encode each distinct string form as its rank among the sorted distinct
/// forms. Missing cells share the code of `"nan"`.
pub fn label_encode<'a>(values: impl Iterator<Item = &'a Value>) -> Vec<i64> {
    let keys: Vec<String> = values.map(Value::category_key).collect();
    let classes: BTreeSet<&str> = keys.iter().map(String::as_str).collect();
    let classes: Vec<&str> = classes.into_iter().collect();
    keys.iter()
        .map(|k| classes.binary_search(&k.as_str()).unwrap_or_default() as i64)
        .collect()
}

/// Adds `stress_code`/`demand_code` for each feature column present, then
/// `cluster`. Fewer than two features, or a clustering failure, puts every
/// row in cluster 0.
pub fn stress_patterns(table: &RecordTable, config: &AnalysisConfig) -> RecordTable {
    let mut out = table.clone();
    let mut features: Vec<Vec<i64>> = Vec::new();

    for (source, code) in FEATURES {
        if let Some(values) = table.column(source) {
            let encoded = label_encode(values);
            out.set_column(code, encoded.iter().map(|c| Value::Int(*c)).collect());
            features.push(encoded);
        }
    }

    let labels = if features.len() < FEATURES.len() {
        log::debug!("only {} of {} feature columns present; no clustering", features.len(), FEATURES.len());
        vec![0; table.len()]
    } else {
        let points: Vec<Vec<f64>> = (0..table.len())
            .map(|row| features.iter().map(|f| f[row] as f64).collect())
            .collect();
        match KMeans::new(config.clusters, config.cluster_seed).fit(&points) {
            Ok(fit) => fit.labels,
            Err(e) => {
                log::warn!("{e}; assigning every row to cluster 0");
                vec![0; table.len()]
            }
        }
    };

    out.set_column(CLUSTER, labels.into_iter().map(|l| Value::Int(l as i64)).collect());
    out
}
