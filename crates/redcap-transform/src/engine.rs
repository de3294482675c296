//! Dispatch of a column to its field-type rule.

use redcap_dictionary::DictionaryEntry;
use redcap_model::{Column, ConvertOptions, ErrorKind, FieldDefinition, FieldType};

use crate::outcome::ColumnOutcome;
use crate::rules::categorical::transform_categorical;
use crate::rules::checkbox::transform_checkbox;
use crate::rules::text::transform_text;

/// Transform one column against its dictionary definition.
pub fn transform_column(
    field: &FieldDefinition,
    column: &Column,
    options: &ConvertOptions,
) -> ColumnOutcome {
    let outcome = match field.field_type {
        FieldType::Text => transform_text(field, column, options.day_first),
        FieldType::Radio | FieldType::Dropdown | FieldType::Yesno => {
            transform_categorical(field, column)
        }
        FieldType::Checkbox => transform_checkbox(field, column),
    };
    tracing::debug!(
        field = %field.name,
        field_type = %field.field_type,
        validation = %field.validation,
        errors = outcome.errors.len(),
        "transformed column"
    );
    outcome
}

/// Resolve a column against an optional dictionary entry.
///
/// No entry means the column is unmatched; an entry the dictionary could not
/// parse yields that entry's field-level error.
pub fn resolve_column(
    entry: Option<&DictionaryEntry>,
    column: &Column,
    options: &ConvertOptions,
) -> ColumnOutcome {
    match entry {
        None => ColumnOutcome::field_error(column, ErrorKind::UnmatchedField, None),
        Some(DictionaryEntry::Problem(problem)) => {
            ColumnOutcome::field_error(column, problem.kind, Some(problem.detail.clone()))
        }
        Some(DictionaryEntry::Field(field)) => transform_column(field, column, options),
    }
}
