use serde::Serialize;

use crate::table::RecordTable;

/// Outcome marker shown next to each processed source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    /// Delimited table or spreadsheet parsed from the file.
    Parsed,
    /// PDF stub: synthetic rows, file not read.
    PdfStub,
    /// DOCX stub: synthetic rows, file not read.
    DocxStub,
    /// Built-in demo dataset.
    Demo,
    /// Parse failed; synthetic fallback rows substituted.
    Fallback,
}

impl SourceStatus {
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Parsed => "✅",
            Self::PdfStub => "📄",
            Self::DocxStub => "📝",
            Self::Demo => "🎲",
            Self::Fallback => "⚠️",
        }
    }

    /// Whether rows behind this status were generated rather than read.
    pub fn is_synthetic(&self) -> bool {
        !matches!(self, Self::Parsed)
    }
}

impl std::fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parsed => write!(f, "parsed"),
            Self::PdfStub => write!(f, "pdf_stub"),
            Self::DocxStub => write!(f, "docx_stub"),
            Self::Demo => write!(f, "demo"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Per-source metadata kept by the aggregator after the source table is consumed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceMeta {
    pub name: String,
    /// Declared media type, derived from the extension.
    pub declared_type: String,
    pub size_kb: f64,
    pub rows: usize,
    pub status: SourceStatus,
    pub glyph: &'static str,
    pub synthetic: bool,
}

impl SourceMeta {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>, size_bytes: u64, rows: usize, status: SourceStatus) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            size_kb: size_bytes as f64 / 1024.0,
            rows,
            status,
            glyph: status.glyph(),
            synthetic: status.is_synthetic(),
        }
    }

    /// Size as shown to users, e.g. `12.3 KB`.
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.size_kb)
    }
}

/// A source after ingestion: its uniform table plus metadata.
#[derive(Debug, Clone)]
pub struct IngestedSource {
    pub meta: SourceMeta,
    pub table: RecordTable,
}
