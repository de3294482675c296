//! Workbook sources (`.xlsx`, `.xls`, `.ods`, ...) through `calamine`.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::Timelike;
use redcap_common::format_numeric;
use redcap_model::{CellValue, Dataset};

use crate::error::{IngestError, Result};
use crate::table::build_dataset;

/// Sheet names of a workbook in workbook order.
pub fn list_sheets(path: &Path) -> Result<Vec<String>> {
    let workbook = open_workbook_auto(path).map_err(|source| IngestError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(workbook.sheet_names().to_vec())
}

/// Read one sheet of a workbook into a [`Dataset`].
///
/// Without `sheet`, the workbook must contain exactly one sheet. The first
/// non-empty row is the header row; empty rows are skipped.
pub fn read_workbook_table(path: &Path, sheet: Option<&str>) -> Result<Dataset> {
    let workbook_err = |source| IngestError::Workbook {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(workbook_err)?;
    let sheets = workbook.sheet_names().to_vec();

    let sheet = match sheet {
        Some(name) => {
            if !sheets.iter().any(|s| s == name) {
                return Err(IngestError::SheetNotFound {
                    path: path.to_path_buf(),
                    sheet: name.to_string(),
                    available: sheets,
                });
            }
            name.to_string()
        }
        None => match sheets.as_slice() {
            [] => {
                return Err(IngestError::EmptyTable {
                    path: path.to_path_buf(),
                });
            }
            [only] => only.clone(),
            _ => {
                return Err(IngestError::AmbiguousSheet {
                    path: path.to_path_buf(),
                    sheets,
                });
            }
        },
    };

    let range = workbook.worksheet_range(&sheet).map_err(workbook_err)?;
    tracing::debug!(path = %path.display(), sheet = %sheet, "reading worksheet");

    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for row in range.rows() {
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        match headers {
            None => headers = Some(row.iter().map(header_string).collect()),
            Some(_) => rows.push(row.iter().map(cell_value).collect()),
        }
    }

    let headers = headers.ok_or_else(|| IngestError::EmptyTable {
        path: path.to_path_buf(),
    })?;
    build_dataset(&headers, rows)
}

fn header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => cell_value(other).to_string(),
    }
}

fn cell_value(c: &Data) -> CellValue {
    match c {
        Data::Empty => CellValue::Missing,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::text(s.trim()),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) if value.time().num_seconds_from_midnight() == 0 => {
                CellValue::Text(value.format("%Y-%m-%d").to_string())
            }
            Some(value) => CellValue::Text(value.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => CellValue::Text(format_numeric(dt.as_f64())),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.as_str()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}
