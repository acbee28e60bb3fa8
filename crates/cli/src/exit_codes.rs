//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                            |
//! |------|----------------------------------------------------|
//! | 0    | Success                                            |
//! | 1    | General error (unspecified)                        |
//! | 2    | CLI usage error (bad args, empty selection)        |
//! | 3    | No data loaded, or nothing to export/report        |
//! | 4    | Ingestion error (unreadable input path)            |
//! | 5    | Export or report write failed                      |
//! | 6    | Unknown analysis key                               |
//! | 7    | Settings file error                                |
//!
//! Parse failures of individual tables are not errors: they are replaced by
//! labeled synthetic rows and reported as warnings.

use psyscan_analysis::AnalysisError;
use psyscan_io::IngestError;

use crate::session::SessionError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// No combined table exists (no sources given, or all were skipped), or
/// export/report requested before any analysis ran.
pub const EXIT_NO_DATA: u8 = 3;

/// An input path could not be read at all.
pub const EXIT_INGEST: u8 = 4;

/// Writing an export or report failed.
pub const EXIT_EXPORT: u8 = 5;

/// `--run` named an analysis that does not exist.
pub const EXIT_UNKNOWN_ANALYSIS: u8 = 6;

/// Settings file could not be written or already exists.
pub const EXIT_SETTINGS: u8 = 7;

/// Map a session error to its exit code.
pub fn session_exit_code(err: &SessionError) -> u8 {
    match err {
        SessionError::NoData | SessionError::NoResults => EXIT_NO_DATA,
        SessionError::EmptySelection => EXIT_USAGE,
        SessionError::Ingest(IngestError::Export(_)) | SessionError::Write(_) => EXIT_EXPORT,
        SessionError::Ingest(_) => EXIT_INGEST,
        SessionError::Analysis(AnalysisError::UnknownAnalysis(_)) => EXIT_UNKNOWN_ANALYSIS,
        SessionError::Analysis(AnalysisError::Report(_)) => EXIT_EXPORT,
        SessionError::Analysis(_) => EXIT_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_errors_map_to_codes() {
        assert_eq!(session_exit_code(&SessionError::NoData), EXIT_NO_DATA);
        assert_eq!(session_exit_code(&SessionError::Ingest(IngestError::Io("x".into()))), EXIT_INGEST);
        assert_eq!(session_exit_code(&SessionError::Ingest(IngestError::Export("x".into()))), EXIT_EXPORT);
        assert_eq!(
            session_exit_code(&SessionError::Analysis(AnalysisError::UnknownAnalysis("x".into()))),
            EXIT_UNKNOWN_ANALYSIS
        );
    }

    #[test]
    fn codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_USAGE,
            EXIT_NO_DATA,
            EXIT_INGEST,
            EXIT_EXPORT,
            EXIT_UNKNOWN_ANALYSIS,
            EXIT_SETTINGS,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
