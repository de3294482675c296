//! Integration tests for error log and JSON report rendering.

use chrono::{TimeZone, Utc};
use redcap_model::{CellError, ErrorKind, MatchKey};
use redcap_report::{ErrorReport, render_error_log, render_json_report, write_error_log};

fn sample_errors() -> Vec<CellError> {
    vec![
        CellError::cell("gender", ErrorKind::InvalidCategoricalValue, 3, Some("Unknown".into())),
        CellError::field("weight_lbs", ErrorKind::UnmatchedField),
        CellError::cell("gender", ErrorKind::InvalidCategoricalValue, 5, Some("X".into())),
        CellError::cell("sx", ErrorKind::InvalidCheckboxToken, 2, Some("feverx".into())),
        CellError::field("temp", ErrorKind::NonNumericColumn)
            .with_detail("non-numeric values {n/a: 3}"),
        CellError::cell("record_id", ErrorKind::MissingValue, 4, None),
    ]
}

fn expected() -> Vec<String> {
    ["record_id", "gender", "sx", "temp"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

#[test]
fn error_log_groups_field_and_value_errors() {
    let errors = sample_errors();
    let expected = expected();
    let report = ErrorReport::new("dictionary.csv", "data.xlsx", &errors, &expected)
        .with_generated_at(Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap());

    insta::assert_snapshot!(render_error_log(&report), @r"
    REDCap conversion error log
    Generated: 2024-01-15T09:30:00+00:00
    Data dictionary file used: dictionary.csv
    Data file used: data.xlsx
    Match on: variable

    Field Name Errors
    -----------------
    These data field names do not match options found in the metadata:
      weight_lbs
    Was expecting one of these values:
      record_id, gender, sx, temp

    Value Errors
    ------------
    These fields have values that cannot be imported:
      gender (InvalidCategoricalValue): {Unknown: 3, X: 5}
      sx (InvalidCheckboxToken): {feverx: 2}
      temp (NonNumericColumn): non-numeric values {n/a: 3}
      record_id (MissingValue): {MISSING: 4}
    ");
}

#[test]
fn error_log_without_field_name_errors() {
    let errors = vec![CellError::cell(
        "dob",
        ErrorKind::UnparseableDate,
        1,
        Some("soon".into()),
    )];
    let report = ErrorReport::new("d.csv", "x.csv", &errors, &[])
        .with_generated_at(Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap())
        .with_match_key(MatchKey::FieldLabel);
    let log = render_error_log(&report);
    assert!(log.contains("Match on: label\n"));
    assert!(log.contains("Field Name Errors\n-----------------\nNone\n"));
    assert!(log.contains("  dob (UnparseableDate): {soon: 1}\n"));
}

#[test]
fn json_report_carries_counts_and_errors() {
    let errors = sample_errors();
    let expected = expected();
    let report = ErrorReport::new("dictionary.csv", "data.xlsx", &errors, &expected)
        .with_generated_at(Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap());
    let json = render_json_report(&report).expect("render json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse json");

    assert_eq!(value["schema"], "redcap-convert.error-report");
    assert_eq!(value["status"], "errored");
    assert_eq!(value["generated_at"], "2024-01-15T09:30:00+00:00");
    assert_eq!(value["summary"]["total"], 6);
    assert_eq!(value["summary"]["field_level"], 2);
    assert_eq!(value["summary"]["cell_level"], 4);
    assert_eq!(value["summary"]["by_kind"]["invalid_categorical_value"], 2);
    assert_eq!(value["unmatched_fields"], serde_json::json!(["weight_lbs"]));
    assert_eq!(value["errors"][0]["row"], 3);
    assert_eq!(value["errors"][0]["value"], "Unknown");
    assert_eq!(value["errors"][1]["row"], serde_json::Value::Null);
}

#[test]
fn writes_error_log_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("redcap_error_log.txt");
    let report = ErrorReport::new("d.csv", "x.csv", &[], &[]);
    write_error_log(&path, &report).expect("write log");
    let text = std::fs::read_to_string(&path).expect("read log");
    assert!(text.starts_with("REDCap conversion error log\n"));
}
