//! Assembly of loaded rows into a [`Dataset`].

use redcap_common::normalize_name;
use redcap_model::{CellValue, Column, Dataset};

use crate::error::Result;

/// Collapse whitespace in a header and strip a leading BOM, keeping case.
pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Build a dataset from a header row and data rows.
///
/// Short rows are padded with missing cells and cells past the last header
/// are dropped. A column with a blank header is dropped when all of its cells
/// are blank, and named `unnamed_<n>` (1-based position) otherwise.
pub(crate) fn build_dataset(headers: &[String], rows: Vec<Vec<CellValue>>) -> Result<Dataset> {
    let mut cells: Vec<Vec<CellValue>> = vec![Vec::with_capacity(rows.len()); headers.len()];
    for row in rows {
        let mut row = row.into_iter();
        for column in cells.iter_mut() {
            column.push(row.next().unwrap_or(CellValue::Missing));
        }
    }

    let mut columns = Vec::with_capacity(headers.len());
    for (idx, (header, cells)) in headers.iter().zip(cells).enumerate() {
        let header = normalize_header(header);
        if header.is_empty() {
            if cells.iter().all(CellValue::is_missing) {
                continue;
            }
            let name = format!("unnamed_{}", idx + 1);
            tracing::warn!(column = %name, "column without header kept under a generated name");
            columns.push(Column::new(name, cells));
            continue;
        }
        columns.push(Column::new(normalize_name(&header), cells).with_header(header));
    }
    Ok(Dataset::new(columns)?)
}
