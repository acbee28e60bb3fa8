// Table export: per-analysis result files

use std::path::{Path, PathBuf};

use psyscan_table::RecordTable;

use crate::error::IngestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(format!("unknown export format '{other}' (expected csv or xlsx)")),
        }
    }
}

/// File name for an analysis export, e.g. `results_alerts.csv`.
pub fn result_file_name(key: &str, format: ExportFormat) -> String {
    format!("results_{key}.{}", format.extension())
}

/// Write `table` into `dir` under the deterministic name for `key`.
pub fn export_result(
    table: &RecordTable,
    dir: &Path,
    key: &str,
    format: ExportFormat,
) -> Result<PathBuf, IngestError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| IngestError::Export(format!("cannot create {}: {e}", dir.display())))?;
    let path = dir.join(result_file_name(key, format));
    match format {
        ExportFormat::Csv => write_csv(table, &path)?,
        ExportFormat::Xlsx => crate::xlsx::export(table, &path)?,
    }
    log::info!("wrote {}", path.display());
    Ok(path)
}

/// Header row plus one record per row. Missing cells are empty fields.
pub fn write_csv(table: &RecordTable, path: &Path) -> Result<(), IngestError> {
    let file = std::fs::File::create(path)
        .map_err(|e| IngestError::Export(format!("cannot write {}: {e}", path.display())))?;
    write_csv_to(table, file)
}

/// CSV text of a table.
pub fn to_csv_string(table: &RecordTable) -> Result<String, IngestError> {
    let mut buf = Vec::new();
    write_csv_to(table, &mut buf)?;
    String::from_utf8(buf).map_err(|e| IngestError::Export(e.to_string()))
}

fn write_csv_to<W: std::io::Write>(table: &RecordTable, out: W) -> Result<(), IngestError> {
    let mut writer = ::csv::WriterBuilder::new().from_writer(out);
    let export_err = |e: ::csv::Error| IngestError::Export(e.to_string());

    writer.write_record(table.columns()).map_err(export_err)?;
    for row in table.rows() {
        writer
            .write_record(row.iter().map(|v| v.to_string()))
            .map_err(export_err)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use psyscan_table::Value;
    use tempfile::tempdir;

    fn sample() -> RecordTable {
        RecordTable::from_rows(
            vec!["employee_id".into(), "recommendation".into(), "score".into()],
            vec![
                vec![Value::Int(1), Value::text("Workload review, Recognition program"), Value::Float(0.5)],
                vec![Value::Int(2), Value::text("Periodic monitoring"), Value::Missing],
            ],
        )
    }

    #[test]
    fn csv_quotes_embedded_delimiters() {
        let text = to_csv_string(&sample()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "employee_id,recommendation,score");
        assert_eq!(lines[1], "1,\"Workload review, Recognition program\",0.5");
        assert_eq!(lines[2], "2,Periodic monitoring,");
    }

    #[test]
    fn export_result_uses_deterministic_name() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested");

        let path = export_result(&sample(), &out, "alerts", ExportFormat::Csv).unwrap();
        assert_eq!(path, out.join("results_alerts.csv"));

        let reread = crate::csv::import(&path).unwrap();
        assert_eq!(reread.len(), 2);
    }

    #[test]
    fn xlsx_export_writes_file() {
        let dir = tempdir().unwrap();
        let path = export_result(&sample(), dir.path(), "stress", ExportFormat::Xlsx).unwrap();
        assert_eq!(path.file_name().unwrap(), "results_stress.xlsx");
        assert!(path.metadata().unwrap().len() > 0);
    }

    #[test]
    fn format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("xlsx".parse::<ExportFormat>(), Ok(ExportFormat::Xlsx));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
