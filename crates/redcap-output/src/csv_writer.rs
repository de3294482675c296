//! Import-ready CSV output.

use std::path::Path;

use redcap_model::{CellValue, Dataset};

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// Write `dataset` as CSV: one header row of column identifiers, then one
/// record per row. Missing cells are empty fields.
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let csv_err = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;

    writer
        .write_record(dataset.column_names())
        .map_err(csv_err)?;
    for row in 0..dataset.row_count() {
        let record = dataset.columns().iter().map(|column| match &column.cells[row] {
            CellValue::Missing => String::new(),
            other => other.to_string(),
        });
        writer.write_record(record).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "wrote import CSV"
    );
    Ok(())
}
