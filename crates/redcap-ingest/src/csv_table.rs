use std::path::Path;

use csv::ReaderBuilder;
use redcap_model::{CellValue, Dataset};

use crate::error::{IngestError, Result};
use crate::table::build_dataset;

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a CSV file into a [`Dataset`].
///
/// The first non-blank record is the header row. Blank records are skipped
/// and every cell is kept as text; blank cells are missing.
pub fn read_csv_table(path: &Path) -> Result<Dataset> {
    let csv_err = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        match headers {
            None => headers = Some(row),
            Some(_) => rows.push(row.into_iter().map(CellValue::text).collect()),
        }
    }

    let headers = headers.ok_or_else(|| IngestError::EmptyTable {
        path: path.to_path_buf(),
    })?;
    build_dataset(&headers, rows)
}
