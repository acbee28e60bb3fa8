use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Analysis key not in the catalog.
    UnknownAnalysis(String),
    /// Clustering could not run on the given features.
    Cluster(String),
    /// Report could not be rendered.
    Report(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAnalysis(key) => write!(f, "unknown analysis: {key}"),
            Self::Cluster(msg) => write!(f, "clustering unavailable: {msg}"),
            Self::Report(msg) => write!(f, "report unavailable: {msg}"),
        }
    }
}

impl std::error::Error for AnalysisError {}
