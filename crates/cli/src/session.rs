//! In-memory session context.
//!
//! One `Session` per process owns the combined table, the metadata of the
//! sources that produced it, and the latest analysis run. Every operation
//! either completes or returns an error with the session left exactly as it
//! was.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use psyscan_analysis::aggregate::Overview;
use psyscan_analysis::report::{render_report, report_file_name};
use psyscan_analysis::{aggregate, AnalysisConfig, AnalysisError, AnalysisKind, AnalysisRun, Combined};
use psyscan_io::export::{export_result, to_csv_string};
use psyscan_io::synthetic::{demo_table, DemoSize, DEFAULT_SEED};
use psyscan_io::{ingest_all, ExportFormat, IngestError, IngestOptions, UploadedSource};
use psyscan_table::{SourceMeta, SourceStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// No combined table: nothing loaded, or every source was skipped.
    NoData,
    /// Export or report requested before any analysis ran.
    NoResults,
    /// Analysis requested with an empty selection.
    EmptySelection,
    Ingest(IngestError),
    Analysis(AnalysisError),
    /// Writing a report failed.
    Write(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::NoData => write!(f, "no data loaded"),
            SessionError::NoResults => write!(f, "no analysis results yet"),
            SessionError::EmptySelection => write!(f, "no analyses selected"),
            SessionError::Ingest(e) => write!(f, "{e}"),
            SessionError::Analysis(e) => write!(f, "{e}"),
            SessionError::Write(msg) => write!(f, "cannot write report: {msg}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<IngestError> for SessionError {
    fn from(e: IngestError) -> Self {
        SessionError::Ingest(e)
    }
}

impl From<AnalysisError> for SessionError {
    fn from(e: AnalysisError) -> Self {
        SessionError::Analysis(e)
    }
}

/// What a successful load produced.
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    pub sources: Vec<SourceMeta>,
    pub skipped: Vec<String>,
    pub overview: Overview,
}

/// Snapshot for `status` output.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub uploaded_files: usize,
    pub overview: Option<Overview>,
    pub analyses: Vec<AnalysisKind>,
}

pub struct Session {
    ingest: IngestOptions,
    config: AnalysisConfig,
    /// Drives the document-stub row counts.
    rng: StdRng,
    combined: Option<Combined>,
    uploaded: usize,
    skipped: Vec<String>,
    run: Option<AnalysisRun>,
}

impl Session {
    pub fn new(ingest: IngestOptions, config: AnalysisConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            ingest,
            config,
            rng,
            combined: None,
            uploaded: 0,
            skipped: Vec::new(),
            run: None,
        }
    }

    pub fn combined(&self) -> Option<&Combined> {
        self.combined.as_ref()
    }

    pub fn run(&self) -> Option<&AnalysisRun> {
        self.run.as_ref()
    }

    pub fn uploaded_files(&self) -> usize {
        self.uploaded
    }

    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            uploaded_files: self.uploaded,
            overview: self.combined.as_ref().map(Combined::overview),
            analyses: self
                .run
                .as_ref()
                .map(|r| r.results.iter().map(|x| x.kind).collect())
                .unwrap_or_default(),
        }
    }

    /// Ingest and aggregate `paths`, replacing any previous data and results.
    ///
    /// Unsupported files are skipped. If nothing at all could be ingested the
    /// session keeps its previous state and `NoData` is returned.
    pub fn load_sources(&mut self, paths: &[PathBuf]) -> Result<LoadSummary, SessionError> {
        let uploads = paths
            .iter()
            .map(|p| UploadedSource::from_path(p))
            .collect::<Result<Vec<_>, _>>()?;

        let report = ingest_all(&uploads, &self.ingest, &mut self.rng);
        let combined = aggregate(report.ingested).ok_or(SessionError::NoData)?;

        let summary = LoadSummary {
            sources: combined.sources.clone(),
            skipped: report.skipped.clone(),
            overview: combined.overview(),
        };
        self.replace_data(combined, uploads.len(), report.skipped);
        Ok(summary)
    }

    /// Load a built-in demo dataset, replacing any previous data and results.
    pub fn load_demo(&mut self, size: DemoSize) -> LoadSummary {
        let table = demo_table(size.rows(), DEFAULT_SEED);
        let size_bytes = to_csv_string(&table).map(|s| s.len() as u64).unwrap_or_default();
        let meta = SourceMeta::new(size.file_name(), "text/csv", size_bytes, table.len(), SourceStatus::Demo);
        log::info!("{} {}: {} rows (demo)", meta.glyph, meta.name, meta.rows);

        let combined = Combined {
            table,
            sources: vec![meta],
        };
        let summary = LoadSummary {
            sources: combined.sources.clone(),
            skipped: Vec::new(),
            overview: combined.overview(),
        };
        self.replace_data(combined, 1, Vec::new());
        summary
    }

    fn replace_data(&mut self, combined: Combined, uploaded: usize, skipped: Vec<String>) {
        self.combined = Some(combined);
        self.uploaded = uploaded;
        self.skipped = skipped;
        self.run = None;
    }

    /// Score the combined table. Replaces the previous run on success.
    pub fn run_analyses(&mut self, selection: &[AnalysisKind]) -> Result<&AnalysisRun, SessionError> {
        let combined = self.combined.as_ref().ok_or(SessionError::NoData)?;
        if selection.is_empty() {
            return Err(SessionError::EmptySelection);
        }
        let run = psyscan_analysis::run(&self.config, &combined.table, selection);
        Ok(self.run.insert(run))
    }

    /// Drop all data and results.
    pub fn clear(&mut self) {
        self.combined = None;
        self.uploaded = 0;
        self.skipped.clear();
        self.run = None;
        log::info!("session cleared");
    }

    /// Write one `results_{key}` file per analysis of the latest run.
    pub fn export_results(&self, dir: &Path, format: ExportFormat) -> Result<Vec<PathBuf>, SessionError> {
        let run = self.run.as_ref().ok_or(SessionError::NoResults)?;
        let mut written = Vec::with_capacity(run.results.len());
        for result in &run.results {
            written.push(export_result(&result.table, dir, result.key(), format)?);
        }
        Ok(written)
    }

    /// Render the report for the latest run and write it into `dir`.
    pub fn write_report(&self, dir: &Path, now: NaiveDateTime) -> Result<PathBuf, SessionError> {
        let run = self.run.as_ref().ok_or(SessionError::NoResults)?;
        let sources = self.combined.as_ref().map_or(0, |c| c.sources.len());
        let text = render_report(run, sources, now)?;

        std::fs::create_dir_all(dir).map_err(|e| SessionError::Write(format!("{}: {e}", dir.display())))?;
        let path = dir.join(report_file_name(now));
        std::fs::write(&path, text).map_err(|e| SessionError::Write(format!("{}: {e}", path.display())))?;
        log::info!("wrote {}", path.display());
        Ok(path)
    }
}
