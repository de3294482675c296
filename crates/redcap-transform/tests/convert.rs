//! End-to-end conversion against small in-memory dictionaries.

use redcap_dictionary::{DictionaryError, DictionaryIndex, parse_choices};
use redcap_model::{
    CellValue, Column, ConvertOptions, Dataset, DateOrder, ErrorKind, FieldDefinition, FieldType,
    MatchKey, TextValidation,
};
use redcap_transform::{ConversionOutput, convert};

fn choices(raw: &str) -> redcap_model::ChoiceList {
    parse_choices(raw).expect("choices")
}

fn text_cells(values: &[&str]) -> Vec<CellValue> {
    values.iter().map(|v| CellValue::text(*v)).collect()
}

fn dataset(columns: Vec<Column>) -> Dataset {
    Dataset::new(columns).expect("dataset")
}

fn cells_of<'a>(dataset: &'a Dataset, name: &str) -> Vec<String> {
    let column: &'a Column = dataset.column(name).expect("column");
    column.cells.iter().map(ToString::to_string).collect()
}

fn demo_index() -> DictionaryIndex {
    DictionaryIndex::from_fields(vec![
        FieldDefinition::new("gender", FieldType::Radio).with_choices(choices("1, Male | 2, Female")),
        FieldDefinition::new("consent", FieldType::Yesno),
        FieldDefinition::new("sx", FieldType::Checkbox).with_choices(choices("1, fever | 2, cough")),
        FieldDefinition::new("temp", FieldType::Text).with_validation(TextValidation::TwoDecimal),
        FieldDefinition::new("visit_date", FieldType::Text)
            .with_validation(TextValidation::Date(DateOrder::Mdy)),
    ])
    .expect("index")
}

#[test]
fn gender_unknown_value_is_reported_at_its_position() {
    let index = demo_index();
    let data = dataset(vec![Column::new(
        "gender",
        text_cells(&["Male", " female ", "Unknown"]),
    )]);
    let conversion = convert(&data, &index, &ConvertOptions::default()).expect("convert");

    assert!(!conversion.is_clean());
    assert_eq!(conversion.errors.len(), 1);
    let error = &conversion.errors[0];
    assert_eq!(error.kind, ErrorKind::InvalidCategoricalValue);
    assert_eq!(error.row, Some(3));
    assert_eq!(error.value.as_deref(), Some("Unknown"));
    assert!(conversion.mask.is_flagged(0, 2));
    assert!(!conversion.mask.is_flagged(0, 0));
    assert_eq!(conversion.output, ConversionOutput::Errored(data));
}

#[test]
fn clean_run_codes_values() {
    let index = demo_index();
    let data = dataset(vec![
        Column::new("gender", text_cells(&["Male", " female ", "FEMALE"])),
        Column::new("consent", text_cells(&["Yes", "No", "yes"])),
        Column::new("sx", text_cells(&["fever|cough", "", "cough"])),
        Column::new(
            "temp",
            vec![CellValue::Number(3.0), CellValue::text("4.5"), CellValue::Missing],
        ),
        Column::new("visit_date", text_cells(&["2021-03-14", "", "3/4/2021"])),
    ]);
    let conversion = convert(&data, &index, &ConvertOptions::default()).expect("convert");

    assert!(conversion.is_clean(), "errors: {:?}", conversion.errors);
    assert!(!conversion.mask.any());
    let out = conversion.clean_dataset().expect("clean dataset");
    let names: Vec<&str> = out.column_names().collect();
    assert_eq!(
        names,
        vec!["gender", "consent", "sx___fever", "sx___cough", "temp", "visit_date"]
    );
    assert_eq!(cells_of(out, "gender"), vec!["1", "2", "2"]);
    assert_eq!(cells_of(out, "consent"), vec!["2", "1", "2"]);
    assert_eq!(cells_of(out, "sx___fever"), vec!["1", "0", "0"]);
    assert_eq!(cells_of(out, "sx___cough"), vec!["1", "0", "1"]);
    assert_eq!(cells_of(out, "temp"), vec!["3.00", "4.50", ""]);
    assert_eq!(cells_of(out, "visit_date"), vec!["03/14/2021", "", "03/04/2021"]);
}

#[test]
fn checkbox_token_error_suppresses_derived_columns() {
    let index = demo_index();
    let data = dataset(vec![Column::new("sx", text_cells(&["fever|cough", "feverx"]))]);
    let conversion = convert(&data, &index, &ConvertOptions::default()).expect("convert");

    assert_eq!(conversion.errors.len(), 1);
    assert_eq!(conversion.errors[0].kind, ErrorKind::InvalidCheckboxToken);
    assert_eq!(conversion.errors[0].row, Some(2));
    assert_eq!(conversion.errors[0].value.as_deref(), Some("feverx"));
    assert!(conversion.clean_dataset().is_none());
}

#[test]
fn two_decimal_with_text_is_a_field_error() {
    let index = demo_index();
    let data = dataset(vec![Column::new(
        "temp",
        vec![CellValue::Number(3.0), CellValue::Number(4.5), CellValue::text("n/a")],
    )]);
    let conversion = convert(&data, &index, &ConvertOptions::default()).expect("convert");

    assert_eq!(conversion.errors.len(), 1);
    assert_eq!(conversion.errors[0].kind, ErrorKind::NonNumericColumn);
    assert_eq!(conversion.errors[0].row, None);
    assert_eq!(conversion.mask.column_flags("temp"), Some(&[true, true, true][..]));
}

#[test]
fn unmatched_column_flags_whole_column_and_suppresses_output() {
    let index = demo_index();
    let data = dataset(vec![
        Column::new("gender", text_cells(&["male", "female"])),
        Column::new("weight_lbs", vec![CellValue::Number(150.0), CellValue::Missing]),
    ]);
    let conversion = convert(&data, &index, &ConvertOptions::default()).expect("convert");

    assert_eq!(conversion.errors.len(), 1);
    assert_eq!(conversion.errors[0].kind, ErrorKind::UnmatchedField);
    assert_eq!(conversion.errors[0].field, "weight_lbs");
    assert_eq!(conversion.mask.column_flags("weight_lbs"), Some(&[true, true][..]));
    assert_eq!(conversion.mask.column_flags("gender"), Some(&[false, false][..]));
    assert_eq!(
        conversion.expected_fields,
        vec!["gender", "consent", "sx", "temp", "visit_date"]
    );
    assert!(conversion.clean_dataset().is_none());
}

#[test]
fn missing_date_is_absent_not_error() {
    let index = demo_index();
    let data = dataset(vec![Column::new("visit_date", vec![CellValue::Missing])]);
    let conversion = convert(&data, &index, &ConvertOptions::default()).expect("convert");
    let out = conversion.clean_dataset().expect("clean");
    assert_eq!(out.column("visit_date").expect("column").cells, vec![CellValue::Missing]);
}

#[test]
fn implicit_yes_no_is_one_based() {
    let index = DictionaryIndex::from_fields(vec![
        FieldDefinition::new("smoker", FieldType::Radio),
        FieldDefinition::new("consent", FieldType::Yesno),
    ])
    .expect("index");
    let data = dataset(vec![
        Column::new("smoker", text_cells(&["no", "yes"])),
        Column::new("consent", text_cells(&["no", "yes"])),
    ]);
    let conversion = convert(&data, &index, &ConvertOptions::default()).expect("convert");
    let out = conversion.clean_dataset().expect("clean");
    assert_eq!(cells_of(out, "smoker"), vec!["1", "2"]);
    assert_eq!(cells_of(out, "consent"), vec!["1", "2"]);
}

#[test]
fn checkbox_labels_do_not_match_by_substring() {
    let index = DictionaryIndex::from_fields(vec![
        FieldDefinition::new("site", FieldType::Checkbox).with_choices(choices("1, axi | 2, axilla")),
    ])
    .expect("index");
    let data = dataset(vec![Column::new("site", text_cells(&["axilla", "axi|axilla"]))]);
    let conversion = convert(&data, &index, &ConvertOptions::default()).expect("convert");
    let out = conversion.clean_dataset().expect("clean");
    assert_eq!(cells_of(out, "site___axi"), vec!["0", "1"]);
    assert_eq!(cells_of(out, "site___axilla"), vec!["1", "1"]);
}

#[test]
fn dictionary_problems_surface_as_field_errors() {
    let index = DictionaryIndex::new(vec![redcap_dictionary::DictionaryEntry::Problem(
        redcap_dictionary::DictionaryProblem {
            name: "bmi".into(),
            label: "bmi".into(),
            kind: ErrorKind::UnsupportedFieldType,
            detail: "Unsupported field type: calc".into(),
        },
    )])
    .expect("index");
    let data = dataset(vec![Column::new("bmi", text_cells(&["21.5"]))]);
    let conversion = convert(&data, &index, &ConvertOptions::default()).expect("convert");
    assert_eq!(conversion.errors.len(), 1);
    assert_eq!(conversion.errors[0].kind, ErrorKind::UnsupportedFieldType);
    assert_eq!(
        conversion.errors[0].detail.as_deref(),
        Some("Unsupported field type: calc")
    );
}

#[test]
fn colliding_dataset_headers_are_flagged() {
    let index = demo_index();
    let data = dataset(vec![
        Column::new("gender", text_cells(&["male"])).with_header("Gender"),
        Column::new("gender", text_cells(&["female"])).with_header("gender "),
    ]);
    let conversion = convert(&data, &index, &ConvertOptions::default()).expect("convert");
    let kinds: Vec<ErrorKind> = conversion.errors.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ErrorKind::DuplicateColumn, ErrorKind::DuplicateColumn]);
    assert_eq!(conversion.mask.flagged_count(), 2);
}

#[test]
fn colliding_dictionary_names_are_detected() {
    let err = DictionaryIndex::from_fields(vec![
        FieldDefinition::new("visit_date", FieldType::Text),
        FieldDefinition::new("visit_date", FieldType::Text),
    ])
    .unwrap_err();
    assert!(matches!(err, DictionaryError::AmbiguousFieldName { .. }));
}

#[test]
fn label_matching_outputs_variable_names() {
    let index = DictionaryIndex::from_fields(vec![
        FieldDefinition::new("sex", FieldType::Radio)
            .with_label("gender_at_birth")
            .with_choices(choices("1, Male | 2, Female")),
    ])
    .expect("index");
    let data = dataset(vec![Column::new("gender_at_birth", text_cells(&["female"]))]);
    let options = ConvertOptions::new().with_match_key(MatchKey::FieldLabel);
    let conversion = convert(&data, &index, &options).expect("convert");
    let out = conversion.clean_dataset().expect("clean");
    assert_eq!(out.column_names().collect::<Vec<_>>(), vec!["sex"]);
    assert_eq!(conversion.expected_fields, vec!["gender_at_birth"]);
}

#[test]
fn day_first_option_changes_ambiguous_dates() {
    let index = demo_index();
    let data = dataset(vec![Column::new("visit_date", text_cells(&["03/04/2021"]))]);
    let options = ConvertOptions::new().with_day_first(true);
    let conversion = convert(&data, &index, &options).expect("convert");
    let out = conversion.clean_dataset().expect("clean");
    assert_eq!(cells_of(out, "visit_date"), vec!["04/03/2021"]);
}

#[test]
fn checkbox_without_usable_choices_is_never_clean() {
    let index = DictionaryIndex::from_fields(vec![
        FieldDefinition::new("rid", FieldType::Text),
        FieldDefinition::new("sx", FieldType::Checkbox),
        FieldDefinition::new("site", FieldType::Checkbox).with_choices(choices("1, a/b | 2, ab")),
    ])
    .expect("index");
    let data = dataset(vec![
        Column::new("rid", text_cells(&["1"])),
        Column::new("sx", vec![CellValue::Missing]),
        Column::new("site", text_cells(&["a/b"])),
    ]);
    let conversion = convert(&data, &index, &ConvertOptions::default()).expect("convert");

    assert!(!conversion.is_clean());
    let flagged: Vec<(&str, ErrorKind)> = conversion
        .errors
        .iter()
        .map(|e| (e.field.as_str(), e.kind))
        .collect();
    assert_eq!(
        flagged,
        vec![
            ("sx", ErrorKind::MalformedChoiceList),
            ("site", ErrorKind::MalformedChoiceList),
        ]
    );
    assert_eq!(conversion.output, ConversionOutput::Errored(data));
}
