#![deny(unsafe_code)]

use std::path::PathBuf;

use redcap_model::ModelError;

pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("unsupported file format for {path}: expected .csv, .xlsx, .xlsm, .xlsb, .xls or .ods")]
    UnsupportedFormat { path: PathBuf },

    #[error("workbook {path} has several sheets ({}); choose one explicitly", sheets.join(", "))]
    AmbiguousSheet { path: PathBuf, sheets: Vec<String> },

    #[error("sheet '{sheet}' not found in {path} (available: {})", available.join(", "))]
    SheetNotFound {
        path: PathBuf,
        sheet: String,
        available: Vec<String>,
    },

    #[error("{path} contains no header row")]
    EmptyTable { path: PathBuf },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
