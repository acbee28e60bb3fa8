// Delimited-table import

use std::io::Read;
use std::path::Path;

use psyscan_table::columns::normalize_header;
use psyscan_table::{RecordTable, Value};

use crate::error::IngestError;

/// Read a delimited file into a record table. First row is the header.
pub fn import(path: &Path) -> Result<RecordTable, IngestError> {
    let content = read_file_as_utf8(path)?;
    parse_table(&content)
}

/// Parse delimited text, sniffing the delimiter.
pub fn parse_table(content: &str) -> Result<RecordTable, IngestError> {
    let delimiter = sniff_delimiter(content);
    parse_with_delimiter(content, delimiter)
}

/// Parse delimited text with a known delimiter.
///
/// Rows shorter than the header are padded with Missing; a row with more
/// fields than the header makes the whole source malformed.
pub fn parse_with_delimiter(content: &str, delimiter: u8) -> Result<RecordTable, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| IngestError::Parse(e.to_string()))?
        .clone();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::Parse("no columns to parse".into()));
    }

    let columns = unique_columns(headers.iter().map(normalize_header));
    let width = columns.len();
    let mut table = RecordTable::new(columns);

    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| IngestError::Parse(e.to_string()))?;
        if record.len() > width {
            // +2: one for the header, one for 1-based numbering
            return Err(IngestError::Parse(format!(
                "line {}: expected {width} fields, saw {}",
                idx + 2,
                record.len()
            )));
        }
        table.push_row(record.iter().map(Value::from_input).collect());
    }

    Ok(table)
}

/// Disambiguate repeated headers: `a, a, a` → `a, a_2, a_3`. Blank headers
/// become `column_{n}`.
pub(crate) fn unique_columns(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for (idx, name) in names.enumerate() {
        let base = if name.is_empty() { format!("column_{}", idx + 1) } else { name };
        let mut candidate = base.clone();
        let mut n = 2;
        while out.contains(&candidate) {
            candidate = format!("{base}_{n}");
            n += 1;
        }
        out.push(candidate);
    }
    out
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
pub fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the header line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Score: (lines with the header's field count) * field count
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, IngestError> {
    let mut file = std::fs::File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(decode_utf8_lossy_1252(bytes))
}

/// UTF-8 first; on failure fall back to Windows-1252 (common for Excel-exported CSVs).
pub fn decode_utf8_lossy_1252(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}
