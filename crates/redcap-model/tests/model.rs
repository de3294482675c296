//! Tests for redcap-model types.

use redcap_model::{
    CellError, CellValue, ChoiceList, Column, ConvertOptions, Dataset, ErrorKind, ErrorMask,
    FieldDefinition, FieldType, Granularity, MatchKey, TextValidation,
};

#[test]
fn error_kind_granularity() {
    assert_eq!(ErrorKind::UnmatchedField.granularity(), Granularity::Field);
    assert_eq!(ErrorKind::NonNumericColumn.granularity(), Granularity::Field);
    assert_eq!(ErrorKind::InvalidCheckboxToken.granularity(), Granularity::Cell);
    assert_eq!(ErrorKind::UnparseableDate.granularity(), Granularity::Cell);
}

#[test]
fn mask_matches_dataset_shape() {
    let dataset = Dataset::new(vec![
        Column::new("gender", vec![CellValue::text("male"), CellValue::text("x")]),
        Column::new("weight_lbs", vec![CellValue::Number(150.0), CellValue::Missing]),
    ])
    .expect("dataset");
    let errors = vec![
        CellError::cell("gender", ErrorKind::InvalidCategoricalValue, 2, Some("x".into())),
        CellError::field("weight_lbs", ErrorKind::UnmatchedField),
    ];
    let mask = ErrorMask::from_errors(&dataset, &errors);
    assert_eq!(mask.row_count(), 2);
    assert_eq!(mask.columns(), &["gender".to_string(), "weight_lbs".to_string()]);
    assert_eq!(mask.flagged_count(), 3);
    assert!(!mask.is_flagged(0, 0));
    assert!(mask.is_flagged(0, 1));
    assert!(mask.is_flagged(1, 0));
}

#[test]
fn field_definition_builder() {
    let field = FieldDefinition::new("temp", FieldType::Text)
        .with_label("body_temperature")
        .with_validation(TextValidation::TwoDecimal);
    assert_eq!(field.label, "body_temperature");
    assert_eq!(field.validation.as_str(), "number_2dp");
    assert!(field.effective_choices().is_empty());

    let sx = FieldDefinition::new("symptoms", FieldType::Checkbox)
        .with_choices(ChoiceList::new(vec!["fever".into(), "cough".into()]));
    assert_eq!(sx.effective_choices().code_of("cough"), Some(2));
}

#[test]
fn convert_options_defaults() {
    let options = ConvertOptions::new();
    assert_eq!(options.match_key, MatchKey::VariableName);
    assert!(!options.day_first);

    let options = options.with_match_key(MatchKey::FieldLabel).with_day_first(true);
    assert_eq!(options.match_key.as_str(), "label");
    assert!(options.day_first);
}
