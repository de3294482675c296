use std::fs;
use std::path::PathBuf;

use redcap_ingest::{IngestError, LoadOptions, load_table, read_csv_table};
use redcap_model::CellValue;
use tempfile::TempDir;

fn temp_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_table_with_normalized_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = temp_file(
        &dir,
        "data.csv",
        "\u{feff}Record ID,Gender,Weight / Height\n001,Male,\n\n002, female ,3.5\n",
    );
    let table = read_csv_table(&path).expect("read csv");

    let names: Vec<&str> = table.column_names().collect();
    assert_eq!(names, vec!["record_id", "gender", "weight_height"]);
    assert_eq!(table.row_count(), 2);

    let id = table.column("record_id").expect("record_id");
    assert_eq!(id.header, "Record ID");
    assert_eq!(id.cells, vec![CellValue::text("001"), CellValue::text("002")]);

    let gender = table.column("gender").expect("gender");
    assert_eq!(gender.cells[1], CellValue::text("female"));

    let ratio = table.column("weight_height").expect("weight_height");
    assert_eq!(ratio.cells, vec![CellValue::Missing, CellValue::text("3.5")]);
}

#[test]
fn n_a_is_text_not_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = temp_file(&dir, "temps.csv", "temp\n3\nn/a\n\"  \"\n4.5\n");
    let table = read_csv_table(&path).expect("read csv");
    let temp = table.column("temp").expect("temp");
    // The quoted blank record is skipped like any blank line.
    assert_eq!(
        temp.cells,
        vec![
            CellValue::text("3"),
            CellValue::text("n/a"),
            CellValue::text("4.5")
        ]
    );
}

#[test]
fn empty_file_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = temp_file(&dir, "empty.csv", "\n\n");
    let err = load_table(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::EmptyTable { .. }));
}

#[test]
fn header_only_file_has_no_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = temp_file(&dir, "header.csv", "a,b\n");
    let table = load_table(&path, &LoadOptions::default()).expect("load");
    assert_eq!(table.row_count(), 0);
    assert_eq!(table.column_count(), 2);
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = temp_file(&dir, "data.json", "{}");
    let err = load_table(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_table(dir.path().join("absent.csv"), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));
}
