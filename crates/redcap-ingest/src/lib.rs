//! Tabular loading for CSV and workbook sources.
//!
//! Every source is read into a [`redcap_model::Dataset`] whose column names
//! are normalized and whose original headers are kept alongside.

pub mod csv_table;
pub mod error;
mod table;
pub mod workbook;

use std::path::Path;

use redcap_model::Dataset;

pub use csv_table::read_csv_table;
pub use error::{IngestError, Result};
pub use workbook::{list_sheets, read_workbook_table};

/// Options for [`load_table`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Worksheet to read from a workbook source. Ignored for CSV.
    pub sheet: Option<String>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }
}

/// Source format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Workbook,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Workbook),
            _ => None,
        }
    }
}

/// Load a table from a CSV or workbook file.
pub fn load_table(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Dataset> {
    let path = path.as_ref();
    let format = SourceFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    std::fs::metadata(path).map_err(|source| IngestError::io(path, source))?;

    let dataset = match format {
        SourceFormat::Csv => read_csv_table(path)?,
        SourceFormat::Workbook => read_workbook_table(path, options.sheet.as_deref())?,
    };
    tracing::info!(
        path = %path.display(),
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "loaded table"
    );
    Ok(dataset)
}
