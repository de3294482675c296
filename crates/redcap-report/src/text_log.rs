//! Human-readable error log.
//!
//! Field-name errors (columns with no dictionary counterpart) are listed
//! first, followed by the expected identifiers. Every other error is a value
//! error, grouped per field and kind as `{value: row}` pairs.

use std::fmt::Write as _;
use std::path::Path;

use redcap_model::{CellError, ErrorKind, MISSING_SENTINEL};

use crate::context::ErrorReport;
use crate::error::{ReportError, Result};

/// Render the error log as text.
pub fn render_error_log(report: &ErrorReport<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "REDCap conversion error log");
    let _ = writeln!(out, "Generated: {}", report.generated_at.to_rfc3339());
    let _ = writeln!(
        out,
        "Data dictionary file used: {}",
        report.dictionary_path.display()
    );
    let _ = writeln!(out, "Data file used: {}", report.data_path.display());
    let _ = writeln!(out, "Match on: {}", report.match_key.as_str());
    out.push('\n');

    if report.is_clean() {
        out.push_str("No errors found. The dataset is ready for import.\n");
        return out;
    }

    write_field_name_errors(&mut out, report);
    out.push('\n');
    write_value_errors(&mut out, report.errors);
    out
}

/// Render and write the error log to `path`.
pub fn write_error_log(path: &Path, report: &ErrorReport<'_>) -> Result<()> {
    std::fs::write(path, render_error_log(report)).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_field_name_errors(out: &mut String, report: &ErrorReport<'_>) {
    out.push_str("Field Name Errors\n");
    out.push_str("-----------------\n");
    let unmatched: Vec<&str> = report
        .errors
        .iter()
        .filter(|e| e.kind.is_field_name_error())
        .map(|e| e.field.as_str())
        .collect();
    if unmatched.is_empty() {
        out.push_str("None\n");
        return;
    }
    out.push_str("These data field names do not match options found in the metadata:\n");
    for name in unmatched {
        let _ = writeln!(out, "  {name}");
    }
    out.push_str("Was expecting one of these values:\n");
    let _ = writeln!(out, "  {}", report.expected_fields.join(", "));
}

fn write_value_errors(out: &mut String, errors: &[CellError]) {
    out.push_str("Value Errors\n");
    out.push_str("------------\n");

    // (field, kind) groups in first-seen order.
    let mut groups: Vec<((&str, ErrorKind), Vec<&CellError>)> = Vec::new();
    for error in errors.iter().filter(|e| !e.kind.is_field_name_error()) {
        let key = (error.field.as_str(), error.kind);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(error),
            None => groups.push((key, vec![error])),
        }
    }
    if groups.is_empty() {
        out.push_str("None\n");
        return;
    }

    out.push_str("These fields have values that cannot be imported:\n");
    for ((field, kind), members) in groups {
        let cells: Vec<String> = members
            .iter()
            .filter_map(|e| {
                e.row.map(|row| {
                    let value = e.value.as_deref().unwrap_or(MISSING_SENTINEL);
                    format!("{value}: {row}")
                })
            })
            .collect();
        if cells.is_empty() {
            let detail = members
                .iter()
                .filter_map(|e| e.detail.as_deref())
                .collect::<Vec<_>>()
                .join("; ");
            if detail.is_empty() {
                let _ = writeln!(out, "  {field} ({kind})");
            } else {
                let _ = writeln!(out, "  {field} ({kind}): {detail}");
            }
        } else {
            let _ = writeln!(out, "  {field} ({kind}): {{{}}}", cells.join(", "));
        }
    }
}
