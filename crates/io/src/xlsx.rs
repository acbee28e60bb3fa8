// Excel import (xlsx, xls, xlsb, ods via calamine) and xlsx export

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Format, Workbook};

use psyscan_table::columns::normalize_header;
use psyscan_table::{RecordTable, Value};

use crate::csv::unique_columns;
use crate::error::IngestError;

/// Import the first worksheet. Its first row is the header.
pub fn import(path: &Path) -> Result<RecordTable, IngestError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| IngestError::Spreadsheet(format!("failed to open Excel file: {e}")))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .ok_or_else(|| IngestError::Spreadsheet("Excel file contains no sheets".into()))?;

    let range = workbook
        .worksheet_range(first)
        .map_err(|e| IngestError::Spreadsheet(format!("failed to read sheet '{first}': {e}")))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| IngestError::Spreadsheet(format!("sheet '{first}' is empty")))?;

    let columns = unique_columns(header.iter().map(|cell| normalize_header(&cell_value(cell).to_string())));
    let mut table = RecordTable::new(columns);

    // Blank interior rows stay as all-Missing rows; the range ends at the last used row
    for row in rows {
        table.push_row(row.iter().map(cell_value).collect());
    }

    log::debug!("imported {} rows from sheet '{first}' of {}", table.len(), path.display());
    Ok(table)
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Missing,
        Data::String(s) => Value::from_input(s),
        Data::Float(n) => Value::from_number(*n),
        Data::Int(n) => Value::Int(*n),
        Data::Bool(b) => Value::text(if *b { "TRUE" } else { "FALSE" }),
        // Serial date numbers; the scoring rules never read dates
        Data::DateTime(dt) => Value::from_number(dt.as_f64()),
        Data::Error(e) => Value::text(format!("#{e:?}")),
        other => Value::from_input(&other.to_string()),
    }
}

/// Write a table as a single-sheet xlsx workbook with a bold header row.
pub fn export(table: &RecordTable, path: &Path) -> Result<(), IngestError> {
    let xlsx_err = |e: rust_xlsxwriter::XlsxError| IngestError::Export(e.to_string());

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name("results").map_err(xlsx_err)?;

    for (col, name) in table.columns().iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, name, &header_format)
            .map_err(xlsx_err)?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let r = row_idx as u32 + 1;
        for (col, value) in row.iter().enumerate() {
            let c = col as u16;
            match value {
                Value::Int(n) => sheet.write_number(r, c, *n as f64).map(|_| ()),
                Value::Float(n) => sheet.write_number(r, c, *n).map(|_| ()),
                Value::Text(s) => sheet.write_string(r, c, s).map(|_| ()),
                Value::Missing => Ok(()),
            }
            .map_err(xlsx_err)?;
        }
    }

    workbook.save(path).map_err(xlsx_err)
}
