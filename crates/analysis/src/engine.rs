use psyscan_table::RecordTable;

use crate::config::AnalysisConfig;
use crate::evidence::summarize;
use crate::model::{AnalysisKind, AnalysisResult, AnalysisRun, RunMeta};

/// Run the selected analyses in order. Repeated selections run once.
pub fn run(config: &AnalysisConfig, table: &RecordTable, selection: &[AnalysisKind]) -> AnalysisRun {
    let mut kinds: Vec<AnalysisKind> = Vec::new();
    for kind in selection {
        if !kinds.contains(kind) {
            kinds.push(*kind);
        }
    }

    let results = kinds
        .into_iter()
        .map(|kind| {
            let mut rng = config.rng_for(kind);
            let scored = kind.apply(table, config, &mut rng);
            let summary = summarize(kind, &scored);
            log::info!("{}: {}", kind.title(), summary.headline());
            AnalysisResult {
                kind,
                title: kind.title(),
                table: scored,
                summary,
            }
        })
        .collect();

    AnalysisRun {
        meta: RunMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            seed: config.seed,
            rows: table.len(),
        },
        results,
    }
}
