//! Human-readable text for terminals. JSON output is produced by serde in
//! the command handlers.

use std::fmt::Write;

use psyscan_analysis::{AnalysisKind, AnalysisRun};
use psyscan_table::profile::TableProfile;
use psyscan_table::SourceMeta;

/// One line per processed source, then the skipped ones.
pub fn sources(meta: &[SourceMeta], skipped: &[String]) -> String {
    let width = meta.iter().map(|m| m.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for m in meta {
        let _ = write!(
            out,
            "{} {:<width$}  {:>9}  {:>5} rows  {}",
            m.glyph,
            m.name,
            m.size_label(),
            m.rows,
            m.status
        );
        if m.synthetic {
            out.push_str("  [synthetic]");
        }
        out.push('\n');
    }
    for name in skipped {
        let _ = writeln!(out, "skipped {name}: unsupported format");
    }
    out
}

pub fn profile(p: &TableProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} rows x {} columns, {} missing cells", p.rows, p.columns, p.missing);

    let width = p.column_profiles.iter().map(|c| c.name.len()).max().unwrap_or(0);
    for col in &p.column_profiles {
        let kind = format!("{:?}", col.kind).to_lowercase();
        let _ = write!(
            out,
            "  {:<width$}  {:<7}  {:>5} unique  {:>5} missing",
            col.name, kind, col.unique, col.missing
        );
        if let Some(stats) = &col.numeric {
            let _ = write!(
                out,
                "  mean {:.2}  min {}  median {}  max {}",
                stats.mean, stats.min, stats.p50, stats.max
            );
        }
        out.push('\n');
    }
    out
}

/// `- Title: headline` per executed analysis.
pub fn run_summary(run: &AnalysisRun) -> String {
    let mut out = String::new();
    for result in &run.results {
        let _ = writeln!(out, "- {}: {}", result.title, result.summary.headline());
    }
    out
}

/// The analysis catalog, one key per line.
pub fn catalog() -> String {
    let mut out = String::new();
    for kind in AnalysisKind::ALL {
        let _ = write!(out, "{:<16} {}", kind.key(), kind.title());
        if kind.is_randomized() {
            out.push_str(" (uses random draws)");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use psyscan_table::{RecordTable, SourceStatus, Value};

    #[test]
    fn sources_mark_synthetic_and_skipped() {
        let meta = vec![
            SourceMeta::new("staff.csv", "text/csv", 2048, 3, SourceStatus::Parsed),
            SourceMeta::new("survey.pdf", "application/pdf", 512, 40, SourceStatus::PdfStub),
        ];
        let text = sources(&meta, &["notes.txt".to_string()]);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("✅ staff.csv"));
        assert!(lines[0].contains("2.0 KB"));
        assert!(!lines[0].contains("[synthetic]"));
        assert!(lines[1].starts_with("📄 survey.pdf"));
        assert!(lines[1].ends_with("[synthetic]"));
        assert_eq!(lines[2], "skipped notes.txt: unsupported format");
    }

    #[test]
    fn profile_lists_columns() {
        let table = RecordTable::from_rows(
            vec!["age".into(), "name".into()],
            vec![vec![Value::Int(30), Value::text("a")], vec![Value::Int(40), Value::Missing]],
        );
        let text = profile(&TableProfile::of(&table));
        assert!(text.starts_with("2 rows x 2 columns, 1 missing cells"));
        assert!(text.contains("mean 35.00"));
    }

    #[test]
    fn catalog_lists_every_key() {
        let text = catalog();
        for kind in AnalysisKind::ALL {
            assert!(text.contains(kind.key()));
        }
        assert_eq!(text.lines().count(), 9);
    }
}
