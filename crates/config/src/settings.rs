// User settings (settings.json)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File format for per-analysis exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Xlsx,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Analysis
    #[serde(rename = "analysis.seed")]
    pub seed: Option<u64>,  // None = fresh randomness each run

    #[serde(rename = "analysis.defaultSelection")]
    pub default_selection: Vec<String>,

    // Export
    #[serde(rename = "export.directory")]
    pub export_directory: PathBuf,

    #[serde(rename = "export.format")]
    pub export_format: OutputFormat,

    // Ingestion
    #[serde(rename = "ingest.fallbackRows")]
    pub fallback_rows: usize,

    #[serde(rename = "ingest.fallbackSeed")]
    pub fallback_seed: u64,

    // Report
    #[serde(rename = "report.directory")]
    pub report_directory: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            default_selection: [
                "alerts",
                "recommendations",
                "stress",
                "rotation",
                "incidents",
                "resilience",
                "effectiveness",
                "illness",
                "rotation_color",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            export_directory: PathBuf::from("."),
            export_format: OutputFormat::Csv,
            fallback_rows: 50,
            fallback_seed: 42,
            report_directory: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("psyscan");
        config_dir.join("settings.json")
    }

    /// Load settings from `path`. A missing or unreadable file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("no settings at {}; using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("error parsing {}: {e}; using default settings", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("error reading {}: {e}; using default settings", path.display());
                Self::default()
            }
        }
    }

    /// Parse settings JSON. Lines starting with `//` are comments.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        serde_json::from_str(&cleaned).map_err(|e| e.to_string())
    }

    /// Write the commented default file. Refuses to overwrite.
    pub fn write_default_file(path: &Path) -> Result<(), String> {
        if path.exists() {
            return Err(format!("{} already exists", path.display()));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        fs::write(path, DEFAULT_FILE).map_err(|e| e.to_string())
    }
}

const DEFAULT_FILE: &str = r#"{
    // Analysis ("analysis.seed": null draws fresh randomness each run)
    "analysis.seed": null,
    "analysis.defaultSelection": [
        "alerts", "recommendations", "stress", "rotation", "incidents",
        "resilience", "effectiveness", "illness", "rotation_color"
    ],

    // Export ("csv" or "xlsx")
    "export.directory": ".",
    "export.format": "csv",

    // Synthetic rows substituted for unreadable tables
    "ingest.fallbackRows": 50,
    "ingest.fallbackSeed": 42,

    // Report
    "report.directory": "."
}
"#;
