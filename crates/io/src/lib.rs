// Source ingestion and table export

pub mod csv;
pub mod error;
pub mod export;
pub mod ingest;
pub mod synthetic;
pub mod xlsx;

pub use error::IngestError;
pub use export::ExportFormat;
pub use ingest::{ingest_all, ingest_source, IngestOptions, IngestReport, SourceFormat, UploadedSource};
