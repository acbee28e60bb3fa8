// psyscan CLI - psychosocial risk screening over employee record tables

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use psyscan_analysis::{AnalysisConfig, AnalysisKind};
use psyscan_cli::exit_codes::{
    session_exit_code, EXIT_ERROR, EXIT_EXPORT, EXIT_SETTINGS, EXIT_SUCCESS, EXIT_UNKNOWN_ANALYSIS,
};
use psyscan_cli::render;
use psyscan_cli::session::{LoadSummary, Session, SessionError};
use psyscan_cli::shell::{run_shell, ShellDefaults};
use psyscan_config::{OutputFormat, Settings};
use psyscan_io::export::write_csv;
use psyscan_io::synthetic::{demo_table, DemoSize, DEFAULT_SEED};
use psyscan_io::{ExportFormat, IngestOptions};
use psyscan_table::TableProfile;

#[derive(Parser)]
#[command(name = "psyscan")]
#[command(about = "Psychosocial risk screening for employee record tables")]
#[command(version)]
struct Cli {
    /// Settings file (default: <config dir>/psyscan/settings.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More logging (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Process-mode indicator; recorded in the log only
    #[arg(long, env = "PSYSCAN_CLOUD", global = true)]
    cloud: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest files and show the combined data
    #[command(after_help = "\
Examples:
  psyscan ingest staff.csv survey.xlsx
  psyscan ingest staff.csv --json")]
    Ingest {
        /// Input files (.csv, .xlsx, .xls, .pdf, .docx)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output JSON to stdout instead of text
        #[arg(long)]
        json: bool,
    },

    /// Profile the combined data: structure and column statistics
    Inspect {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Ingest, run analyses and export results
    #[command(after_help = "\
Examples:
  psyscan analyze staff.csv --run alerts --run recommendations
  psyscan analyze --demo small --all --out-dir results --report
  psyscan analyze staff.csv --run illness,rotation_color --format xlsx --seed 7 --json")]
    Analyze {
        files: Vec<PathBuf>,

        /// Use a demo dataset instead of FILES
        #[arg(long, value_enum, conflicts_with = "files")]
        demo: Option<DemoArg>,

        /// Analysis key to run (repeatable, comma-separated allowed)
        #[arg(long = "run", value_delimiter = ',')]
        run: Vec<String>,

        /// Run every analysis
        #[arg(long, conflicts_with = "run")]
        all: bool,

        /// Directory for results_<key> files
        #[arg(long)]
        out_dir: Option<PathBuf>,

        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Also write the text report
        #[arg(long)]
        report: bool,

        /// Seed for the random draws (fallback indicators, placeholders)
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        json: bool,
    },

    /// Write a demo dataset as CSV
    Demo {
        #[arg(long, value_enum, default_value = "small")]
        size: DemoArg,

        /// Output file (default: demo_small.csv / demo_large.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the available analyses
    ListAnalyses {
        #[arg(long)]
        json: bool,
    },

    /// Interactive session reading commands from stdin
    Shell,

    /// Show or create the settings file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective settings as JSON
    Show,
    /// Write a commented default settings file
    Init,
}

#[derive(Clone, Copy, ValueEnum)]
enum DemoArg {
    Small,
    Large,
}

impl From<DemoArg> for DemoSize {
    fn from(arg: DemoArg) -> Self {
        match arg {
            DemoArg::Small => DemoSize::Small,
            DemoArg::Large => DemoSize::Large,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Xlsx,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Xlsx => ExportFormat::Xlsx,
        }
    }
}

fn export_format(setting: OutputFormat) -> ExportFormat {
    match setting {
        OutputFormat::Csv => ExportFormat::Csv,
        OutputFormat::Xlsx => ExportFormat::Xlsx,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    log::info!("process mode: {}", if cli.cloud { "cloud" } else { "local" });

    let settings_path = cli.config.clone().unwrap_or_else(Settings::config_path);
    let settings = Settings::load_from(&settings_path);

    let result = match cli.command {
        Commands::Ingest { files, json } => cmd_ingest(&settings, files, json),
        Commands::Inspect { files, json } => cmd_inspect(&settings, files, json),
        Commands::Analyze { files, demo, run, all, out_dir, format, report, seed, json } => cmd_analyze(
            &settings,
            AnalyzeArgs { files, demo, run, all, out_dir, format, report, seed, json },
        ),
        Commands::Demo { size, output } => cmd_demo(size.into(), output),
        Commands::ListAnalyses { json } => cmd_list_analyses(json),
        Commands::Shell => cmd_shell(&settings),
        Commands::Config(ConfigCommands::Show) => cmd_config_show(&settings_path, &settings),
        Commands::Config(ConfigCommands::Init) => cmd_config_init(&settings_path),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self { code: EXIT_EXPORT, message: msg.into(), hint: None }
    }

    /// Create error from session error with proper exit code.
    pub fn session(err: SessionError) -> Self {
        let code = session_exit_code(&err);
        let hint = match &err {
            SessionError::NoData => Some("pass at least one .csv/.xlsx/.pdf/.docx file, or --demo small".to_string()),
            SessionError::EmptySelection => Some("use --run <key> or --all; see `psyscan list-analyses`".to_string()),
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn ingest_options(settings: &Settings) -> IngestOptions {
    IngestOptions {
        fallback_rows: settings.fallback_rows,
        fallback_seed: settings.fallback_seed,
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::io(format!("JSON serialization error: {e}")))
}

fn print_stdout(text: &str) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{text}").map_err(|e| CliError::io(e.to_string()))
}

fn load(settings: &Settings, seed: Option<u64>, files: &[PathBuf]) -> Result<(Session, LoadSummary), CliError> {
    let config = AnalysisConfig {
        seed: seed.or(settings.seed),
        ..AnalysisConfig::default()
    };
    let mut session = Session::new(ingest_options(settings), config);
    let summary = session.load_sources(files).map_err(CliError::session)?;
    Ok((session, summary))
}

// ============================================================================
// ingest / inspect
// ============================================================================

fn cmd_ingest(settings: &Settings, files: Vec<PathBuf>, json: bool) -> Result<(), CliError> {
    let (session, summary) = load(settings, None, &files)?;
    let profile = session.combined().map(|c| TableProfile::of(&c.table));

    if json {
        let out = serde_json::json!({
            "sources": summary.sources,
            "skipped": summary.skipped,
            "overview": summary.overview,
            "profile": profile,
        });
        return print_stdout(&to_json(&out)?);
    }

    eprint!("{}", render::sources(&summary.sources, &summary.skipped));
    if let Some(profile) = &profile {
        print_stdout(render::profile(profile).trim_end())?;
    }
    Ok(())
}

fn cmd_inspect(settings: &Settings, files: Vec<PathBuf>, json: bool) -> Result<(), CliError> {
    let (session, _) = load(settings, None, &files)?;
    let combined = session.combined().ok_or_else(|| CliError::session(SessionError::NoData))?;
    let profile = TableProfile::of(&combined.table);

    if json {
        return print_stdout(&to_json(&profile)?);
    }
    print_stdout(render::profile(&profile).trim_end())
}

// ============================================================================
// analyze
// ============================================================================

struct AnalyzeArgs {
    files: Vec<PathBuf>,
    demo: Option<DemoArg>,
    run: Vec<String>,
    all: bool,
    out_dir: Option<PathBuf>,
    format: Option<FormatArg>,
    report: bool,
    seed: Option<u64>,
    json: bool,
}

/// `--all` > `--run` > settings default selection.
fn resolve_selection(all: bool, keys: &[String], defaults: &[String]) -> Result<Vec<AnalysisKind>, CliError> {
    if all {
        return Ok(AnalysisKind::ALL.to_vec());
    }
    let keys = if keys.is_empty() { defaults } else { keys };
    keys.iter()
        .filter(|k| !k.trim().is_empty())
        .map(|k| {
            k.parse::<AnalysisKind>().map_err(|e| CliError {
                code: EXIT_UNKNOWN_ANALYSIS,
                message: e.to_string(),
                hint: Some("see `psyscan list-analyses`".to_string()),
            })
        })
        .collect()
}

fn cmd_analyze(settings: &Settings, args: AnalyzeArgs) -> Result<(), CliError> {
    // Validate the selection before touching any input
    let selection = resolve_selection(args.all, &args.run, &settings.default_selection)?;

    let (mut session, summary) = match args.demo {
        Some(size) => {
            let config = AnalysisConfig {
                seed: args.seed.or(settings.seed),
                ..AnalysisConfig::default()
            };
            let mut session = Session::new(ingest_options(settings), config);
            let summary = session.load_demo(size.into());
            (session, summary)
        }
        None if args.files.is_empty() => {
            return Err(CliError::session(SessionError::NoData));
        }
        None => load(settings, args.seed, &args.files)?,
    };
    eprint!("{}", render::sources(&summary.sources, &summary.skipped));

    session.run_analyses(&selection).map_err(CliError::session)?;

    let out_dir = args.out_dir.clone().unwrap_or_else(|| settings.export_directory.clone());
    let format = args.format.map(ExportFormat::from).unwrap_or_else(|| export_format(settings.export_format));
    let written = session.export_results(&out_dir, format).map_err(CliError::session)?;

    let report_path = if args.report {
        let dir = args.out_dir.clone().unwrap_or_else(|| settings.report_directory.clone());
        let now = chrono::Local::now().naive_local();
        Some(session.write_report(&dir, now).map_err(CliError::session)?)
    } else {
        None
    };

    let run = session
        .run()
        .ok_or_else(|| CliError::session(SessionError::NoResults))?;

    if args.json {
        let out = serde_json::json!({
            "meta": run.meta,
            "sources": summary.sources,
            "skipped": summary.skipped,
            "results": run.results,
            "exports": written,
            "report": report_path,
        });
        print_stdout(&to_json(&out)?)?;
    } else {
        print_stdout(render::run_summary(run).trim_end())?;
    }

    // Human summary to stderr
    eprintln!(
        "{} analyses over {} rows; wrote {} files to {}",
        run.results.len(),
        run.meta.rows,
        written.len(),
        out_dir.display()
    );
    if let Some(path) = report_path {
        eprintln!("report: {}", path.display());
    }
    Ok(())
}

// ============================================================================
// demo / list-analyses
// ============================================================================

fn cmd_demo(size: DemoSize, output: Option<PathBuf>) -> Result<(), CliError> {
    let path = output.unwrap_or_else(|| PathBuf::from(size.file_name()));
    let table = demo_table(size.rows(), DEFAULT_SEED);
    write_csv(&table, &path).map_err(|e| CliError::export(e.to_string()))?;
    eprintln!("wrote {} ({} rows)", path.display(), table.len());
    Ok(())
}

fn cmd_list_analyses(json: bool) -> Result<(), CliError> {
    if json {
        let entries: Vec<serde_json::Value> = AnalysisKind::ALL
            .iter()
            .map(|k| {
                serde_json::json!({
                    "key": k.key(),
                    "title": k.title(),
                    "columns": k.output_columns(),
                    "randomized": k.is_randomized(),
                })
            })
            .collect();
        return print_stdout(&to_json(&entries)?);
    }
    print_stdout(render::catalog().trim_end())
}

// ============================================================================
// shell
// ============================================================================

fn cmd_shell(settings: &Settings) -> Result<(), CliError> {
    let selection = resolve_selection(false, &[], &settings.default_selection)?;
    let defaults = ShellDefaults {
        selection,
        export_dir: settings.export_directory.clone(),
        report_dir: settings.report_directory.clone(),
        format: export_format(settings.export_format),
    };
    let config = AnalysisConfig {
        seed: settings.seed,
        ..AnalysisConfig::default()
    };
    let mut session = Session::new(ingest_options(settings), config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_shell(&mut session, &defaults, stdin.lock(), &mut out).map_err(|e| CliError::io(e.to_string()))
}

// ============================================================================
// config
// ============================================================================

fn cmd_config_show(path: &std::path::Path, settings: &Settings) -> Result<(), CliError> {
    eprintln!("settings file: {}{}", path.display(), if path.exists() { "" } else { " (not found, defaults)" });
    print_stdout(&to_json(settings)?)
}

fn cmd_config_init(path: &std::path::Path) -> Result<(), CliError> {
    Settings::write_default_file(path).map_err(|e| {
        CliError { code: EXIT_SETTINGS, message: e, hint: None }
            .with_hint("edit the existing file, or pass --config <new path>")
    })?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
