//! `psyscan-table`: the Record Table data model.
//!
//! Pure data crate: typed cell values, the canonical employee column
//! vocabulary, per-source metadata and table profiling. No IO.

pub mod columns;
pub mod level;
pub mod profile;
pub mod source;
pub mod table;
pub mod value;

pub use level::Level;
pub use profile::TableProfile;
pub use source::{IngestedSource, SourceMeta, SourceStatus};
pub use table::RecordTable;
pub use value::Value;
