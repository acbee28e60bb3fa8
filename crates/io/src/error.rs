use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum IngestError {
    /// File could not be read or written.
    Io(String),
    /// Delimited text could not be parsed into a table.
    Parse(String),
    /// Spreadsheet could not be opened or read.
    Spreadsheet(String),
    /// Export target could not be produced.
    Export(String),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Spreadsheet(msg) => write!(f, "spreadsheet error: {msg}"),
            Self::Export(msg) => write!(f, "export error: {msg}"),
        }
    }
}

impl std::error::Error for IngestError {}

impl From<std::io::Error> for IngestError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
