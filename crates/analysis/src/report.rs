//! Plain-text report for a completed run.

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::error::AnalysisError;
use crate::model::AnalysisRun;

const SEPARATOR_WIDTH: usize = 50;

/// `psychosocial_report_20261017_0930.txt`
pub fn report_file_name(now: NaiveDateTime) -> String {
    format!("psychosocial_report_{}.txt", now.format("%Y%m%d_%H%M"))
}

/// Render the report. `sources` is the number of files that fed the run.
pub fn render_report(run: &AnalysisRun, sources: usize, now: NaiveDateTime) -> Result<String, AnalysisError> {
    if run.results.is_empty() {
        return Err(AnalysisError::Report("no analyses have been run".into()));
    }

    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "PSYCHOSOCIAL REPORT - {}", now.format("%Y-%m-%d"));
    let _ = writeln!(out, "{}", "=".repeat(SEPARATOR_WIDTH));
    let _ = writeln!(out);
    let _ = writeln!(out, "SUMMARY");
    let _ = writeln!(out, "- Total employees analyzed: {}", run.meta.rows);
    let _ = writeln!(out, "- Data sources: {sources}");
    let _ = writeln!(out, "- Analyses executed: {}", run.results.len());
    let _ = writeln!(out, "- Generated at: {}", now.format("%Y-%m-%d %H:%M"));
    let _ = writeln!(out);
    let _ = writeln!(out, "MAIN RESULTS");
    for result in &run.results {
        let _ = writeln!(out, "- {}: Completed", result.title);
        let _ = writeln!(out, "  {}", result.summary.headline());
    }
    Ok(out)
}
