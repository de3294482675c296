//! Multi-select fields, expanded into one indicator column per choice.

use std::collections::BTreeSet;

use redcap_common::{clean_value, format_numeric, normalize_name};
use redcap_dictionary::checkbox_choice_problem;
use redcap_model::{CellError, CellValue, Column, ErrorKind, FieldDefinition};

use crate::outcome::ColumnOutcome;

/// Name of the indicator column for one checkbox choice.
pub fn indicator_name(field: &str, label: &str) -> String {
    format!("{field}___{}", normalize_name(label))
}

/// Expand a checkbox column.
///
/// Cells hold `|`-delimited labels. Each token is cleaned and must be an
/// exact member of the choice list. A missing cell selects nothing. Any
/// invalid token rejects the column and no indicators are produced. A choice
/// list that cannot yield distinct indicator columns is a field-level error.
pub fn transform_checkbox(field: &FieldDefinition, column: &Column) -> ColumnOutcome {
    let choices = field.effective_choices();
    if let Some(detail) = checkbox_choice_problem(&choices) {
        return ColumnOutcome::field_error(column, ErrorKind::MalformedChoiceList, Some(detail));
    }
    let mut errors = Vec::new();
    let mut selections: Vec<BTreeSet<String>> = Vec::with_capacity(column.len());

    for (idx, cell) in column.cells.iter().enumerate() {
        let raw = match cell {
            CellValue::Missing => String::new(),
            CellValue::Number(v) => format_numeric(*v),
            CellValue::Text(s) => s.clone(),
        };
        let mut selected = BTreeSet::new();
        for token in raw.split('|') {
            let key = clean_value(token);
            if key.is_empty() {
                continue;
            }
            if choices.contains(&key) {
                selected.insert(key);
            } else {
                errors.push(CellError::cell(
                    column.name.clone(),
                    ErrorKind::InvalidCheckboxToken,
                    idx + 1,
                    Some(token.trim().to_string()),
                ));
            }
        }
        selections.push(selected);
    }

    if !errors.is_empty() {
        return ColumnOutcome::rejected(column, errors);
    }

    let mut seen = BTreeSet::new();
    let columns = choices
        .labels()
        .iter()
        .filter(|label| seen.insert(label.as_str()))
        .map(|label| {
            let cells = selections
                .iter()
                .map(|selected| {
                    let flag = if selected.contains(label) { "1" } else { "0" };
                    CellValue::Text(flag.to_string())
                })
                .collect();
            Column::new(indicator_name(&field.name, label), cells)
        })
        .collect();
    ColumnOutcome::expanded(columns)
}
