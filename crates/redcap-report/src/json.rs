use std::path::Path;

use redcap_model::{CellError, ErrorSummary};
use serde::Serialize;

use crate::context::ErrorReport;
use crate::error::{ReportError, Result};

const REPORT_SCHEMA: &str = "redcap-convert.error-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct ReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    dictionary: String,
    data: String,
    match_on: &'static str,
    status: &'static str,
    summary: ErrorSummary,
    unmatched_fields: Vec<&'a str>,
    expected_fields: &'a [String],
    errors: &'a [CellError],
}

fn payload<'a>(report: &'a ErrorReport<'a>) -> ReportPayload<'a> {
    ReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: report.generated_at.to_rfc3339(),
        dictionary: report.dictionary_path.display().to_string(),
        data: report.data_path.display().to_string(),
        match_on: report.match_key.as_str(),
        status: if report.is_clean() { "clean" } else { "errored" },
        summary: ErrorSummary::from_errors(report.errors),
        unmatched_fields: report
            .errors
            .iter()
            .filter(|e| e.kind.is_field_name_error())
            .map(|e| e.field.as_str())
            .collect(),
        expected_fields: report.expected_fields,
        errors: report.errors,
    }
}

/// Render the machine-readable report as pretty JSON.
pub fn render_json_report(report: &ErrorReport<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&payload(report))?)
}

/// Render and write the JSON report to `path`.
pub fn write_json_report(path: &Path, report: &ErrorReport<'_>) -> Result<()> {
    let json = render_json_report(report)?;
    std::fs::write(path, format!("{json}\n")).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
