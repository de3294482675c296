use std::path::PathBuf;

use redcap_model::{CellError, ConvertOptions, ErrorSummary};

/// Everything one conversion run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub data_path: PathBuf,
    pub dictionary_path: PathBuf,
    /// Worksheet of a workbook data file.
    pub data_sheet: Option<String>,
    /// Worksheet of a workbook dictionary.
    pub dictionary_sheet: Option<String>,
    pub output_dir: PathBuf,
    pub options: ConvertOptions,
    /// Skip writing every output file.
    pub dry_run: bool,
}

impl RunConfig {
    /// Config with outputs next to the data file, in `output/`.
    pub fn new(data_path: impl Into<PathBuf>, dictionary_path: impl Into<PathBuf>) -> Self {
        let data_path = data_path.into();
        let output_dir = data_path
            .parent()
            .map(|parent| parent.join("output"))
            .unwrap_or_else(|| PathBuf::from("output"));
        Self {
            data_path,
            dictionary_path: dictionary_path.into(),
            data_sheet: None,
            dictionary_sheet: None,
            output_dir,
            options: ConvertOptions::default(),
            dry_run: false,
        }
    }
}

/// Files written by a run. Empty for dry runs.
#[derive(Debug, Clone, Default)]
pub struct OutputPaths {
    pub import_csv: Option<PathBuf>,
    pub error_workbook: Option<PathBuf>,
    pub error_log: Option<PathBuf>,
    pub json_report: Option<PathBuf>,
}

#[derive(Debug)]
pub struct RunResult {
    pub data_path: PathBuf,
    pub dictionary_path: PathBuf,
    pub output_dir: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub dictionary_fields: usize,
    /// Columns written to the import CSV; zero when errored.
    pub output_columns: usize,
    pub errors: Vec<CellError>,
    pub summary: ErrorSummary,
    pub outputs: OutputPaths,
    pub has_errors: bool,
}

impl RunResult {
    pub fn exit_status(&self) -> ExitStatus {
        if self.has_errors {
            ExitStatus::DataErrors
        } else {
            ExitStatus::Clean
        }
    }
}

/// Process exit status of a command.
///
/// Data errors and aborted runs get distinct codes so scripts can tell a
/// dataset that needs fixing from a run that never finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Clean,
    /// The run finished and recorded at least one error.
    DataErrors,
    /// Inputs could not be read, the dictionary was unusable, or writing failed.
    Aborted,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Clean => 0,
            ExitStatus::DataErrors => 1,
            ExitStatus::Aborted => 2,
        }
    }
}
