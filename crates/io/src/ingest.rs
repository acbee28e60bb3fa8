//! Ingestion adapter: turns uploaded sources of a declared format into
//! uniform record tables plus per-source metadata.
//!
//! Format is decided by extension only. Delimited tables and spreadsheets
//! are parsed; on failure the seeded fallback table is substituted. PDF and
//! DOCX are not read at all: they yield demo rows whose count is drawn from
//! a format-specific range. Unsupported extensions are skipped.

use std::ops::Range;
use std::path::{Path, PathBuf};

use rand::Rng;

use psyscan_table::{IngestedSource, RecordTable, SourceMeta, SourceStatus};

use crate::error::IngestError;
use crate::synthetic::{self, DEFAULT_SEED, FALLBACK_ROWS};

/// Row-count range for the PDF stub (upper bound exclusive).
pub const PDF_ROWS: Range<usize> = 30..100;
/// Row-count range for the DOCX stub (upper bound exclusive).
pub const DOCX_ROWS: Range<usize> = 20..80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Spreadsheet,
    Pdf,
    Docx,
}

impl SourceFormat {
    /// Map a file name's extension (case-insensitive) to a format.
    pub fn from_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" => Some(Self::Spreadsheet),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// Media type reported in source metadata.
    pub fn media_type(&self, name: &str) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Spreadsheet if name.to_lowercase().ends_with(".xls") => "application/vnd.ms-excel",
            Self::Spreadsheet => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Pdf => "application/pdf",
            Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        }
    }
}

/// An uploaded file: display name, location, and size in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedSource {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl UploadedSource {
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let metadata = std::fs::metadata(path)
            .map_err(|e| IngestError::Io(format!("cannot read {}: {e}", path.display())))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            path: path.to_path_buf(),
            size_bytes: metadata.len(),
        })
    }

    pub fn format(&self) -> Option<SourceFormat> {
        SourceFormat::from_name(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    pub fallback_rows: usize,
    pub fallback_seed: u64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            fallback_rows: FALLBACK_ROWS,
            fallback_seed: DEFAULT_SEED,
        }
    }
}

/// Everything produced by one ingestion pass, in source order.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub ingested: Vec<IngestedSource>,
    /// Names of sources skipped for an unsupported extension.
    pub skipped: Vec<String>,
}

/// Ingest one source. `None` means the extension is unsupported and the
/// source was skipped.
///
/// `rng` only drives the row counts of the document stubs.
pub fn ingest_source<R: Rng + ?Sized>(
    source: &UploadedSource,
    options: &IngestOptions,
    rng: &mut R,
) -> Option<IngestedSource> {
    let Some(format) = source.format() else {
        log::warn!("unsupported format, skipping: {}", source.name);
        return None;
    };

    let (table, status) = match format {
        SourceFormat::Csv => parsed_or_fallback(source, options, crate::csv::import(&source.path)),
        SourceFormat::Spreadsheet => {
            parsed_or_fallback(source, options, crate::xlsx::import(&source.path))
        }
        SourceFormat::Pdf => (document_stub(rng, PDF_ROWS), SourceStatus::PdfStub),
        SourceFormat::Docx => (document_stub(rng, DOCX_ROWS), SourceStatus::DocxStub),
    };

    log::info!("{} {}: {} rows ({status})", status.glyph(), source.name, table.len());

    let meta = SourceMeta::new(
        source.name.clone(),
        format.media_type(&source.name),
        source.size_bytes,
        table.len(),
        status,
    );
    Some(IngestedSource { meta, table })
}

/// Ingest every source in order, collecting skipped names.
pub fn ingest_all<R: Rng + ?Sized>(
    sources: &[UploadedSource],
    options: &IngestOptions,
    rng: &mut R,
) -> IngestReport {
    let mut report = IngestReport::default();
    for source in sources {
        match ingest_source(source, options, rng) {
            Some(ingested) => report.ingested.push(ingested),
            None => report.skipped.push(source.name.clone()),
        }
    }
    report
}

fn parsed_or_fallback(
    source: &UploadedSource,
    options: &IngestOptions,
    parsed: Result<RecordTable, IngestError>,
) -> (RecordTable, SourceStatus) {
    match parsed {
        Ok(table) => (table, SourceStatus::Parsed),
        Err(e) => {
            log::warn!(
                "{}: {e}; substituting {} synthetic rows",
                source.name,
                options.fallback_rows
            );
            (
                synthetic::fallback_table(options.fallback_rows, options.fallback_seed),
                SourceStatus::Fallback,
            )
        }
    }
}

/// Document formats are not parsed; the file contents are never read.
fn document_stub<R: Rng + ?Sized>(rng: &mut R, rows: Range<usize>) -> RecordTable {
    let n = rng.gen_range(rows);
    synthetic::demo_table(n, DEFAULT_SEED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fs;
    use tempfile::tempdir;

    fn upload(dir: &Path, name: &str, contents: &[u8]) -> UploadedSource {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        UploadedSource::from_path(&path).unwrap()
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(SourceFormat::from_name("a.CSV"), Some(SourceFormat::Csv));
        assert_eq!(SourceFormat::from_name("b.xls"), Some(SourceFormat::Spreadsheet));
        assert_eq!(SourceFormat::from_name("b.xlsx"), Some(SourceFormat::Spreadsheet));
        assert_eq!(SourceFormat::from_name("report.pdf"), Some(SourceFormat::Pdf));
        assert_eq!(SourceFormat::from_name("notes.docx"), Some(SourceFormat::Docx));
        assert_eq!(SourceFormat::from_name("notes.txt"), None);
        assert_eq!(SourceFormat::from_name("no_extension"), None);
    }

    #[test]
    fn csv_row_count_matches_file() {
        let dir = tempdir().unwrap();
        let src = upload(dir.path(), "staff.csv", b"stress_level,job_satisfaction\nHigh,3\nLow,8\nMedium,6\n");
        let mut rng = StdRng::seed_from_u64(1);

        let out = ingest_source(&src, &IngestOptions::default(), &mut rng).unwrap();
        assert_eq!(out.table.len(), 3);
        assert_eq!(out.meta.rows, 3);
        assert_eq!(out.meta.status, SourceStatus::Parsed);
        assert_eq!(out.meta.declared_type, "text/csv");
        assert!(!out.meta.synthetic);
    }

    #[test]
    fn malformed_csv_falls_back_reproducibly() {
        let dir = tempdir().unwrap();
        let src = upload(dir.path(), "broken.csv", b"a,b\n1,2,3,4\n");
        let mut rng = StdRng::seed_from_u64(1);
        let options = IngestOptions::default();

        let first = ingest_source(&src, &options, &mut rng).unwrap();
        let second = ingest_source(&src, &options, &mut rng).unwrap();

        assert_eq!(first.table.len(), 50);
        assert_eq!(first.meta.status, SourceStatus::Fallback);
        assert_eq!(first.meta.glyph, "⚠️");
        assert!(first.meta.synthetic);
        assert_eq!(first.table, second.table);
    }

    #[test]
    fn document_stubs_draw_rows_from_their_ranges() {
        let dir = tempdir().unwrap();
        let pdf = upload(dir.path(), "survey.pdf", b"%PDF-1.4 not parsed");
        let docx = upload(dir.path(), "notes.docx", b"PK not parsed");
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..25 {
            let p = ingest_source(&pdf, &IngestOptions::default(), &mut rng).unwrap();
            assert!(PDF_ROWS.contains(&p.table.len()), "pdf rows {}", p.table.len());
            assert_eq!(p.meta.status, SourceStatus::PdfStub);

            let d = ingest_source(&docx, &IngestOptions::default(), &mut rng).unwrap();
            assert!(DOCX_ROWS.contains(&d.table.len()), "docx rows {}", d.table.len());
            assert_eq!(d.meta.glyph, "📝");
        }
    }

    #[test]
    fn unsupported_sources_are_skipped() {
        let dir = tempdir().unwrap();
        let sources = vec![
            upload(dir.path(), "a.csv", b"x\n1\n"),
            upload(dir.path(), "b.txt", b"ignored"),
            upload(dir.path(), "c.csv", b"x\n2\n3\n"),
        ];
        let mut rng = StdRng::seed_from_u64(1);

        let report = ingest_all(&sources, &IngestOptions::default(), &mut rng);
        assert_eq!(report.ingested.len(), 2);
        assert_eq!(report.skipped, vec!["b.txt".to_string()]);
        assert_eq!(report.ingested[0].meta.name, "a.csv");
        assert_eq!(report.ingested[1].meta.name, "c.csv");
    }

    #[test]
    fn missing_file_cannot_be_uploaded() {
        let dir = tempdir().unwrap();
        let err = UploadedSource::from_path(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Io(_)));
    }
}
