//! `psyscan-analysis`: aggregation and scoring engine.
//!
//! Pure engine crate: receives ingested record tables, returns the combined
//! table and scored copies of it. No CLI or IO dependencies.
//!
//! Every scoring function takes the table by reference and returns a new
//! table with derived columns appended; the input is never mutated. Rules
//! that need a column fall back to seeded random draws when it is absent.

pub mod aggregate;
pub mod alerts;
pub mod bands;
pub mod cluster;
pub mod config;
pub mod detectors;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod indicator;
pub mod kmeans;
pub mod model;
pub mod placeholders;
pub mod recommend;
pub mod report;
pub mod rotation;

pub use aggregate::{aggregate, Combined};
pub use config::AnalysisConfig;
pub use engine::run;
pub use error::AnalysisError;
pub use model::{AnalysisKind, AnalysisResult, AnalysisRun};
