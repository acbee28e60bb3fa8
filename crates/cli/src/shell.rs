//! Line-oriented interactive session over any reader/writer pair.
//!
//! Each line is one command. Failed commands print `error: ...` and leave
//! the session as it was; the loop continues until `quit` or end of input.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use psyscan_analysis::AnalysisKind;
use psyscan_io::synthetic::DemoSize;
use psyscan_io::ExportFormat;

use crate::render;
use crate::session::{LoadSummary, Session};

pub const PROMPT: &str = "psyscan> ";

pub const HELP: &str = "\
Commands:
  load <file>...        ingest files and replace the current data
  demo small|large      load a demo dataset
  run [<key>...|all]    run analyses (default selection when no keys)
  status                show loaded data and last run
  export [dir]          write results_<key> files for the last run
  report [dir]          write the text report for the last run
  clear                 drop all data and results
  help                  show this help
  quit                  leave the shell";

/// Where exports and reports go when a command gives no directory.
#[derive(Debug, Clone)]
pub struct ShellDefaults {
    pub selection: Vec<AnalysisKind>,
    pub export_dir: PathBuf,
    pub report_dir: PathBuf,
    pub format: ExportFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Load(Vec<PathBuf>),
    Demo(DemoSize),
    /// `None` = default selection.
    Run(Option<Vec<AnalysisKind>>),
    Status,
    Export(Option<PathBuf>),
    Report(Option<PathBuf>),
    Clear,
    Help,
    Quit,
    Empty,
}

pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(ShellCommand::Empty);
    };
    let args: Vec<&str> = words.collect();

    match verb.to_lowercase().as_str() {
        "load" => {
            if args.is_empty() {
                return Err("load needs at least one file".into());
            }
            Ok(ShellCommand::Load(args.iter().map(PathBuf::from).collect()))
        }
        "demo" => {
            let size = args.first().ok_or("demo needs a size: small or large")?;
            Ok(ShellCommand::Demo(size.parse()?))
        }
        "run" => {
            if args.is_empty() {
                return Ok(ShellCommand::Run(None));
            }
            if args.iter().any(|a| a.eq_ignore_ascii_case("all")) {
                return Ok(ShellCommand::Run(Some(AnalysisKind::ALL.to_vec())));
            }
            let kinds = args
                .iter()
                .flat_map(|a| a.split(','))
                .filter(|k| !k.is_empty())
                .map(|k| k.parse::<AnalysisKind>().map_err(|e| e.to_string()))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ShellCommand::Run(Some(kinds)))
        }
        "status" => Ok(ShellCommand::Status),
        "export" => Ok(ShellCommand::Export(args.first().map(PathBuf::from))),
        "report" => Ok(ShellCommand::Report(args.first().map(PathBuf::from))),
        "clear" => Ok(ShellCommand::Clear),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command '{other}' (try help)")),
    }
}

/// Read commands from `input` until `quit` or end of input.
pub fn run_shell<R: BufRead, W: Write>(
    session: &mut Session,
    defaults: &ShellDefaults,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    write!(out, "{PROMPT}")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        match parse_line(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => execute(session, defaults, command, out)?,
            Err(e) => writeln!(out, "error: {e}")?,
        }
        write!(out, "{PROMPT}")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

fn execute<W: Write>(
    session: &mut Session,
    defaults: &ShellDefaults,
    command: ShellCommand,
    out: &mut W,
) -> io::Result<()> {
    match command {
        ShellCommand::Load(paths) => match session.load_sources(&paths) {
            Ok(summary) => write_load(out, &summary)?,
            Err(e) => writeln!(out, "error: {e}")?,
        },
        ShellCommand::Demo(size) => {
            let summary = session.load_demo(size);
            write_load(out, &summary)?;
        }
        ShellCommand::Run(selection) => {
            let selection = selection.unwrap_or_else(|| defaults.selection.clone());
            match session.run_analyses(&selection) {
                Ok(run) => write!(out, "{}", render::run_summary(run))?,
                Err(e) => writeln!(out, "error: {e}")?,
            }
        }
        ShellCommand::Status => {
            let status = session.status();
            match status.overview {
                Some(o) => writeln!(
                    out,
                    "{} files, {} sources, {} rows x {} columns",
                    status.uploaded_files, o.sources, o.rows, o.columns
                )?,
                None => writeln!(out, "no data loaded")?,
            }
            if !status.analyses.is_empty() {
                let keys: Vec<&str> = status.analyses.iter().map(|k| k.key()).collect();
                writeln!(out, "last run: {}", keys.join(", "))?;
            }
        }
        ShellCommand::Export(dir) => {
            let dir = dir.unwrap_or_else(|| defaults.export_dir.clone());
            match session.export_results(&dir, defaults.format) {
                Ok(paths) => {
                    for p in paths {
                        writeln!(out, "wrote {}", p.display())?;
                    }
                }
                Err(e) => writeln!(out, "error: {e}")?,
            }
        }
        ShellCommand::Report(dir) => {
            let dir = dir.unwrap_or_else(|| defaults.report_dir.clone());
            match session.write_report(&dir, chrono::Local::now().naive_local()) {
                Ok(path) => writeln!(out, "wrote {}", path.display())?,
                Err(e) => writeln!(out, "error: {e}")?,
            }
        }
        ShellCommand::Clear => {
            session.clear();
            writeln!(out, "cleared")?;
        }
        ShellCommand::Help => writeln!(out, "{HELP}")?,
        ShellCommand::Quit | ShellCommand::Empty => {}
    }
    Ok(())
}

fn write_load<W: Write>(out: &mut W, summary: &LoadSummary) -> io::Result<()> {
    write!(out, "{}", render::sources(&summary.sources, &summary.skipped))?;
    writeln!(
        out,
        "{} rows x {} columns from {} sources",
        summary.overview.rows, summary.overview.columns, summary.overview.sources
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use psyscan_analysis::AnalysisConfig;
    use psyscan_io::IngestOptions;
    use tempfile::tempdir;

    fn defaults(dir: &std::path::Path) -> ShellDefaults {
        ShellDefaults {
            selection: vec![AnalysisKind::EarlyAlert],
            export_dir: dir.to_path_buf(),
            report_dir: dir.to_path_buf(),
            format: ExportFormat::Csv,
        }
    }

    fn drive(script: &str, dir: &std::path::Path) -> String {
        let mut session = Session::new(IngestOptions::default(), AnalysisConfig::seeded(1));
        let mut out = Vec::new();
        run_shell(&mut session, &defaults(dir), script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line("   "), Ok(ShellCommand::Empty));
        assert_eq!(parse_line("demo LARGE"), Ok(ShellCommand::Demo(DemoSize::Large)));
        assert_eq!(parse_line("run"), Ok(ShellCommand::Run(None)));
        assert_eq!(
            parse_line("run alerts,stress illness"),
            Ok(ShellCommand::Run(Some(vec![
                AnalysisKind::EarlyAlert,
                AnalysisKind::StressPatterns,
                AnalysisKind::Illness
            ])))
        );
        assert_eq!(parse_line("run all"), Ok(ShellCommand::Run(Some(AnalysisKind::ALL.to_vec()))));
        assert!(parse_line("run burnout").is_err());
        assert!(parse_line("load").is_err());
        assert!(parse_line("dance").is_err());
    }

    #[test]
    fn run_before_load_reports_no_data() {
        let dir = tempdir().unwrap();
        let out = drive("run\nquit\n", dir.path());
        assert!(out.contains("error: no data loaded"), "{out}");
    }

    #[test]
    fn demo_run_export_cycle() {
        let dir = tempdir().unwrap();
        let out = drive("demo small\nrun\nstatus\nexport\n", dir.path());
        assert!(out.contains("50 rows x 12 columns from 1 sources"), "{out}");
        assert!(out.contains("- Early risk alerts:"), "{out}");
        assert!(out.contains("last run: alerts"), "{out}");
        assert!(dir.path().join("results_alerts.csv").exists());
    }

    #[test]
    fn clear_then_status() {
        let dir = tempdir().unwrap();
        let out = drive("demo small\nclear\nstatus\n", dir.path());
        assert!(out.contains("cleared"));
        assert!(out.trim_end().ends_with("no data loaded\npsyscan>"), "{out}");
    }
}
