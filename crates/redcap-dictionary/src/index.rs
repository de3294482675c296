//! Data dictionary index.
//!
//! Dictionary rows are parsed into [`FieldDefinition`]s keyed by normalized
//! variable name. Rows that cannot be used for import (unsupported field type,
//! unsupported validation, malformed choices) are kept as
//! [`DictionaryProblem`]s: they still count as dictionary fields for matching,
//! so a dataset column naming one gets a field-level error instead of
//! `UnmatchedField`.

use std::collections::BTreeMap;

use redcap_common::{find_collisions, normalize_name};
use redcap_model::{
    CellValue, Dataset, ErrorKind, FieldDefinition, FieldType, MatchKey, TextValidation,
};

use crate::choices::{checkbox_choice_problem, parse_choices};
use crate::error::{DictionaryError, Result};

/// Normalized dictionary header holding the variable name.
pub const VARIABLE_COLUMN: &str = "variable_field_name";
/// Normalized dictionary header holding the field type.
pub const FIELD_TYPE_COLUMN: &str = "field_type";
/// Normalized dictionary header holding the field label.
pub const FIELD_LABEL_COLUMN: &str = "field_label";
/// Normalized dictionary header holding serialized choices.
pub const CHOICES_COLUMN: &str = "choices_calculations_or_slider_labels";
/// Normalized dictionary header holding the text validation kind.
pub const VALIDATION_COLUMN: &str = "text_validation_type_or_show_slider_number";

const REQUIRED_COLUMNS: [&str; 3] = [VARIABLE_COLUMN, FIELD_TYPE_COLUMN, FIELD_LABEL_COLUMN];

/// A dictionary row that cannot be imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryProblem {
    pub name: String,
    pub label: String,
    /// One of the dictionary-level field error kinds.
    pub kind: ErrorKind,
    pub detail: String,
}

/// One dictionary row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryEntry {
    Field(FieldDefinition),
    Problem(DictionaryProblem),
}

impl DictionaryEntry {
    pub fn name(&self) -> &str {
        match self {
            DictionaryEntry::Field(field) => &field.name,
            DictionaryEntry::Problem(problem) => &problem.name,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            DictionaryEntry::Field(field) => &field.label,
            DictionaryEntry::Problem(problem) => &problem.label,
        }
    }

    pub fn definition(&self) -> Option<&FieldDefinition> {
        match self {
            DictionaryEntry::Field(field) => Some(field),
            DictionaryEntry::Problem(_) => None,
        }
    }

    pub fn problem(&self) -> Option<&DictionaryProblem> {
        match self {
            DictionaryEntry::Field(_) => None,
            DictionaryEntry::Problem(problem) => Some(problem),
        }
    }
}

/// Parsed data dictionary, in dictionary row order.
#[derive(Debug, Clone, Default)]
pub struct DictionaryIndex {
    entries: Vec<DictionaryEntry>,
    by_name: BTreeMap<String, usize>,
    by_label: BTreeMap<String, usize>,
}

impl DictionaryIndex {
    /// Build an index from entries. Names must be unique.
    pub fn new(entries: Vec<DictionaryEntry>) -> Result<Self> {
        let mut by_name = BTreeMap::new();
        let mut by_label = BTreeMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            if by_name.insert(entry.name().to_string(), idx).is_some() {
                return Err(DictionaryError::AmbiguousFieldName {
                    name: entry.name().to_string(),
                    raws: vec![entry.name().to_string(); 2],
                });
            }
            if let Some(first) = by_label.get(entry.label()) {
                let first: &DictionaryEntry = &entries[*first];
                tracing::warn!(
                    label = %entry.label(),
                    first = %first.name(),
                    ignored = %entry.name(),
                    "duplicate field label; label matching uses the first field"
                );
            } else {
                by_label.insert(entry.label().to_string(), idx);
            }
        }
        Ok(Self {
            entries,
            by_name,
            by_label,
        })
    }

    /// Build an index from valid field definitions.
    pub fn from_fields(fields: Vec<FieldDefinition>) -> Result<Self> {
        Self::new(fields.into_iter().map(DictionaryEntry::Field).collect())
    }

    /// Parse a loaded dictionary table.
    ///
    /// Rows with a blank variable name are skipped. Unsupported rows are
    /// logged once here and kept as problems.
    pub fn from_dataset(table: &Dataset) -> Result<Self> {
        let available: Vec<String> = table.column_names().map(String::from).collect();
        for required in REQUIRED_COLUMNS {
            if table.column(required).is_none() {
                return Err(DictionaryError::MissingColumn {
                    column: required.to_string(),
                    available,
                });
            }
        }

        let cells = |name: &str, row: usize| -> String {
            table
                .column(name)
                .and_then(|col| col.cells.get(row))
                .and_then(CellValue::raw)
                .unwrap_or_default()
        };

        let mut raw_names = Vec::new();
        let mut entries = Vec::new();
        for row in 0..table.row_count() {
            let raw_name = cells(VARIABLE_COLUMN, row);
            if raw_name.trim().is_empty() {
                continue;
            }
            let entry = parse_row(
                &raw_name,
                &cells(FIELD_TYPE_COLUMN, row),
                &cells(FIELD_LABEL_COLUMN, row),
                &cells(CHOICES_COLUMN, row),
                &cells(VALIDATION_COLUMN, row),
            );
            if let DictionaryEntry::Problem(problem) = &entry {
                tracing::warn!(
                    field = %problem.name,
                    kind = %problem.kind,
                    detail = %problem.detail,
                    "dictionary field cannot be imported"
                );
            }
            raw_names.push(raw_name);
            entries.push(entry);
        }

        if let Some((name, raws)) = find_collisions(&raw_names).into_iter().next() {
            return Err(DictionaryError::AmbiguousFieldName { name, raws });
        }
        Self::new(entries)
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by normalized variable name.
    pub fn get(&self, name: &str) -> Option<&DictionaryEntry> {
        self.by_name.get(name).map(|idx| &self.entries[*idx])
    }

    /// Valid field definition by normalized variable name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.get(name).and_then(DictionaryEntry::definition)
    }

    /// Entry matching a normalized dataset header under `key`.
    pub fn lookup(&self, header: &str, key: MatchKey) -> Option<&DictionaryEntry> {
        let map = match key {
            MatchKey::VariableName => &self.by_name,
            MatchKey::FieldLabel => &self.by_label,
        };
        map.get(header).map(|idx| &self.entries[*idx])
    }

    /// Identifiers a dataset header may match under `key`, in dictionary order.
    pub fn identifiers(&self, key: MatchKey) -> Vec<&str> {
        match key {
            MatchKey::VariableName => self.entries.iter().map(DictionaryEntry::name).collect(),
            MatchKey::FieldLabel => {
                let mut labels: Vec<(usize, &str)> = self
                    .by_label
                    .iter()
                    .map(|(label, idx)| (*idx, label.as_str()))
                    .collect();
                labels.sort_unstable();
                labels.into_iter().map(|(_, label)| label).collect()
            }
        }
    }

    pub fn problems(&self) -> impl Iterator<Item = &DictionaryProblem> {
        self.entries.iter().filter_map(DictionaryEntry::problem)
    }
}

fn parse_row(
    raw_name: &str,
    raw_type: &str,
    raw_label: &str,
    raw_choices: &str,
    raw_validation: &str,
) -> DictionaryEntry {
    let name = normalize_name(raw_name);
    let label = if raw_label.trim().is_empty() {
        name.clone()
    } else {
        normalize_name(raw_label)
    };
    let problem = |kind: ErrorKind, detail: String| {
        DictionaryEntry::Problem(DictionaryProblem {
            name: name.clone(),
            label: label.clone(),
            kind,
            detail,
        })
    };

    let field_type = match raw_type.parse::<FieldType>() {
        Ok(field_type) => field_type,
        Err(detail) => return problem(ErrorKind::UnsupportedFieldType, detail),
    };

    let mut field = FieldDefinition::new(name.clone(), field_type).with_label(label.clone());
    match field_type {
        FieldType::Text => match raw_validation.parse::<TextValidation>() {
            Ok(validation) => field = field.with_validation(validation),
            Err(detail) => return problem(ErrorKind::UnsupportedValidation, detail),
        },
        FieldType::Checkbox => match parse_choices(raw_choices) {
            Ok(choices) => {
                if let Some(detail) = checkbox_choice_problem(&choices) {
                    return problem(ErrorKind::MalformedChoiceList, detail);
                }
                field = field.with_choices(choices);
            }
            Err(err) => return problem(ErrorKind::MalformedChoiceList, err.to_string()),
        },
        FieldType::Yesno | FieldType::Radio | FieldType::Dropdown => {
            match parse_choices(raw_choices) {
                Ok(choices) => field = field.with_choices(choices),
                Err(err) => return problem(ErrorKind::MalformedChoiceList, err.to_string()),
            }
        }
    }
    DictionaryEntry::Field(field)
}
