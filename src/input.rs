//! Roster file loading.
//!
//! CSV files go through the `csv` crate; spreadsheets go through
//! `calamine`, reading the first sheet with its first row as headers.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::debug;

use crate::error::{PairingError, PairingResult};
use crate::models::RawTable;

const SPREADSHEET_EXTENSIONS: [&str; 4] = ["xlsx", "xls", "xlsm", "ods"];

/// Reads a headed CSV table from `reader`.
///
/// Rows may have fewer cells than the header; missing cells read as empty.
/// Headers are normalized by [`RawTable::from_rows`].
/// `source` names the input in error messages.
pub fn read_csv<R: Read>(reader: R, source: &str) -> PairingResult<RawTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| input_error(source, e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| input_error(source, e))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::from_rows(headers, rows))
}

/// Loads a roster table from a file, choosing the reader by extension.
pub fn load_table(path: &Path) -> PairingResult<RawTable> {
    let source = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let table = if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        load_spreadsheet(path, &source)?
    } else {
        let file = File::open(path).map_err(|e| input_error(&source, e))?;
        read_csv(file, &source)?
    };

    debug!(
        path = %source,
        rows = table.len(),
        columns = table.headers().len(),
        "Loaded roster table"
    );
    Ok(table)
}

fn load_spreadsheet(path: &Path, source: &str) -> PairingResult<RawTable> {
    let mut workbook = open_workbook_auto(path).map_err(|e| input_error(source, e))?;

    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return Err(input_error(source, "workbook has no sheets"));
    };
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| input_error(source, e))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());

    let headers = rows.next().unwrap_or_default();

    Ok(RawTable::from_rows(headers, rows.collect()))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("#ERR:{e:?}"),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.date().format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| dt.to_string()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

fn input_error(source: &str, error: impl std::fmt::Display) -> PairingError {
    PairingError::InputRead {
        path: source.to_string(),
        message: error.to_string(),
    }
}
