//! One conversion run: load, convert, report, write.

use std::io;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use redcap_dictionary::load_dictionary;
use redcap_ingest::{LoadOptions, load_table};
use redcap_model::{CellError, Dataset};
use redcap_output::{write_csv, write_flagged_workbook};
use redcap_report::{ErrorReport, write_error_log, write_json_report};
use redcap_transform::{Conversion, ConversionOutput, convert};
use tracing::{debug, info, info_span};

use crate::logging::redact_value;
use crate::types::{OutputPaths, RunConfig, RunResult};

pub const IMPORT_CSV_FILE: &str = "redcap_import.csv";
pub const ERROR_WORKBOOK_FILE: &str = "redcap_errors.xlsx";
pub const ERROR_LOG_FILE: &str = "redcap_error_log.txt";
pub const JSON_REPORT_FILE: &str = "redcap_report.json";

/// Run a full conversion.
///
/// Only structural problems (unreadable inputs, a dictionary without the
/// required columns, write failures) return `Err`. Data errors are part of
/// the [`RunResult`].
pub fn run(config: &RunConfig) -> Result<RunResult> {
    let span = info_span!("run", data = %config.data_path.display());
    let _guard = span.enter();
    let started = Instant::now();

    let dictionary = load_dictionary(
        &config.dictionary_path,
        &load_options(config.dictionary_sheet.as_deref()),
    )
    .with_context(|| format!("load dictionary {}", config.dictionary_path.display()))?;
    let dataset = load_table(&config.data_path, &load_options(config.data_sheet.as_deref()))
        .with_context(|| format!("load data {}", config.data_path.display()))?;

    let conversion = convert(&dataset, &dictionary, &config.options).context("convert dataset")?;
    log_errors(&conversion.errors);

    let outputs = if config.dry_run {
        info!("dry run, no files written");
        OutputPaths::default()
    } else {
        write_outputs(config, &conversion)?
    };

    let output_columns = conversion
        .clean_dataset()
        .map(Dataset::column_count)
        .unwrap_or(0);
    info!(
        errors = conversion.errors.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "run finished"
    );

    Ok(RunResult {
        data_path: config.data_path.clone(),
        dictionary_path: config.dictionary_path.clone(),
        output_dir: config.output_dir.clone(),
        rows: dataset.row_count(),
        columns: dataset.column_count(),
        dictionary_fields: dictionary.len(),
        output_columns,
        summary: conversion.summary(),
        has_errors: !conversion.is_clean(),
        errors: conversion.errors,
        outputs,
    })
}

fn load_options(sheet: Option<&str>) -> LoadOptions {
    match sheet {
        Some(sheet) => LoadOptions::new().with_sheet(sheet),
        None => LoadOptions::new(),
    }
}

fn log_errors(errors: &[CellError]) {
    for error in errors {
        let value = error.value.as_deref().map(redact_value).unwrap_or("");
        match error.row {
            Some(row) => debug!(
                field = %error.field,
                kind = %error.kind,
                row,
                value,
                "cell error"
            ),
            None => debug!(
                field = %error.field,
                kind = %error.kind,
                detail = error.detail.as_deref().map(redact_value).unwrap_or(""),
                "field error"
            ),
        }
    }
}

fn write_outputs(config: &RunConfig, conversion: &Conversion) -> Result<OutputPaths> {
    let dir = &config.output_dir;
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let mut outputs = OutputPaths::default();

    // Only one of the import CSV and the error workbook may sit in the
    // directory after a run.
    match &conversion.output {
        ConversionOutput::Clean(clean) => {
            remove_stale(&dir.join(ERROR_WORKBOOK_FILE))?;
            let path = dir.join(IMPORT_CSV_FILE);
            write_csv(clean, &path).with_context(|| format!("write {}", path.display()))?;
            outputs.import_csv = Some(path);
        }
        ConversionOutput::Errored(original) => {
            remove_stale(&dir.join(IMPORT_CSV_FILE))?;
            let path = dir.join(ERROR_WORKBOOK_FILE);
            write_flagged_workbook(original, &conversion.mask, &path)
                .with_context(|| format!("write {}", path.display()))?;
            outputs.error_workbook = Some(path);
        }
    }

    let report = ErrorReport::new(
        config.dictionary_path.clone(),
        config.data_path.clone(),
        &conversion.errors,
        &conversion.expected_fields,
    )
    .with_match_key(conversion.match_key);

    let log_path = dir.join(ERROR_LOG_FILE);
    write_error_log(&log_path, &report).with_context(|| format!("write {}", log_path.display()))?;
    outputs.error_log = Some(log_path);

    let json_path = dir.join(JSON_REPORT_FILE);
    write_json_report(&json_path, &report)
        .with_context(|| format!("write {}", json_path.display()))?;
    outputs.json_report = Some(json_path);

    debug!(dir = %dir.display(), "outputs written");
    Ok(outputs)
}

fn remove_stale(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "removed output from a previous run");
            Ok(())
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(error).with_context(|| format!("remove {}", path.display())),
    }
}
