use serde::Serialize;

use psyscan_table::{IngestedSource, RecordTable, SourceMeta};

/// The combined table plus metadata for every source that fed it.
#[derive(Debug, Clone, PartialEq)]
pub struct Combined {
    pub table: RecordTable,
    pub sources: Vec<SourceMeta>,
}

impl Combined {
    /// Sources whose rows were fabricated (stubs, demo, fallback).
    pub fn synthetic_sources(&self) -> usize {
        self.sources.iter().filter(|s| s.synthetic).count()
    }

    pub fn overview(&self) -> Overview {
        Overview {
            rows: self.table.len(),
            columns: self.table.width(),
            sources: self.sources.len(),
            synthetic_sources: self.synthetic_sources(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub rows: usize,
    pub columns: usize,
    pub sources: usize,
    pub synthetic_sources: usize,
}

/// Concatenate ingested sources in order. Source tables are consumed; only
/// their metadata is kept. No sources means no combined table.
pub fn aggregate(sources: Vec<IngestedSource>) -> Option<Combined> {
    if sources.is_empty() {
        return None;
    }

    let table = RecordTable::concat(sources.iter().map(|s| &s.table));
    let sources: Vec<SourceMeta> = sources.into_iter().map(|s| s.meta).collect();

    log::debug!(
        "combined {} sources into {} rows x {} columns",
        sources.len(),
        table.len(),
        table.width()
    );
    Some(Combined { table, sources })
}
