use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether an error invalidates a whole column or a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Field,
    Cell,
}

/// Reason a field or cell was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Dataset column has no dictionary counterpart.
    UnmatchedField,
    /// Two dataset headers normalize to the same identifier.
    DuplicateColumn,
    /// Dictionary choice list could not be parsed.
    MalformedChoiceList,
    /// Dictionary field type is not importable (`calc`, `file`, ...).
    UnsupportedFieldType,
    /// Dictionary text validation kind is not supported.
    UnsupportedValidation,
    /// Two-decimal column contains non-numeric values.
    NonNumericColumn,
    /// Required text value is missing.
    MissingValue,
    /// Value is not in the field's choice list.
    InvalidCategoricalValue,
    /// One pipe-delimited checkbox token is not in the choice list.
    InvalidCheckboxToken,
    /// Integer column value is not numeric.
    InvalidInteger,
    /// Date column value could not be parsed as a calendar date.
    UnparseableDate,
}

impl ErrorKind {
    pub fn granularity(&self) -> Granularity {
        match self {
            ErrorKind::UnmatchedField
            | ErrorKind::DuplicateColumn
            | ErrorKind::MalformedChoiceList
            | ErrorKind::UnsupportedFieldType
            | ErrorKind::UnsupportedValidation
            | ErrorKind::NonNumericColumn => Granularity::Field,
            ErrorKind::MissingValue
            | ErrorKind::InvalidCategoricalValue
            | ErrorKind::InvalidCheckboxToken
            | ErrorKind::InvalidInteger
            | ErrorKind::UnparseableDate => Granularity::Cell,
        }
    }

    /// Field-name errors are reported apart from value errors.
    pub fn is_field_name_error(&self) -> bool {
        matches!(self, ErrorKind::UnmatchedField)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnmatchedField => "UnmatchedField",
            ErrorKind::DuplicateColumn => "DuplicateColumn",
            ErrorKind::MalformedChoiceList => "MalformedChoiceList",
            ErrorKind::UnsupportedFieldType => "UnsupportedFieldType",
            ErrorKind::UnsupportedValidation => "UnsupportedValidation",
            ErrorKind::NonNumericColumn => "NonNumericColumn",
            ErrorKind::MissingValue => "MissingValue",
            ErrorKind::InvalidCategoricalValue => "InvalidCategoricalValue",
            ErrorKind::InvalidCheckboxToken => "InvalidCheckboxToken",
            ErrorKind::InvalidInteger => "InvalidInteger",
            ErrorKind::UnparseableDate => "UnparseableDate",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flagged field or cell.
///
/// Cell-level errors carry the 1-based data row and the original raw value
/// (or, for checkbox fields, the literal offending token). Field-level errors
/// have no row and may carry a free-text detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellError {
    /// Normalized field identifier (dataset column).
    pub field: String,
    pub kind: ErrorKind,
    /// 1-based data row, `None` for field-level errors.
    pub row: Option<usize>,
    /// Original raw value or offending token, `None` when missing.
    pub value: Option<String>,
    pub detail: Option<String>,
}

impl CellError {
    /// Error covering the whole column.
    pub fn field(field: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
            row: None,
            value: None,
            detail: None,
        }
    }

    /// Error for one cell.
    pub fn cell(
        field: impl Into<String>,
        kind: ErrorKind,
        row: usize,
        value: Option<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind,
            row: Some(row),
            value,
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn granularity(&self) -> Granularity {
        match self.row {
            Some(_) => Granularity::Cell,
            None => Granularity::Field,
        }
    }

    pub fn is_field_level(&self) -> bool {
        self.granularity() == Granularity::Field
    }
}

/// Error counts for a run, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSummary {
    pub total: usize,
    pub field_level: usize,
    pub cell_level: usize,
    pub by_kind: BTreeMap<ErrorKind, usize>,
    /// Distinct fields with at least one error, in first-seen order.
    pub fields: Vec<String>,
}

impl ErrorSummary {
    pub fn from_errors(errors: &[CellError]) -> Self {
        let mut summary = Self::default();
        for error in errors {
            summary.total += 1;
            match error.granularity() {
                Granularity::Field => summary.field_level += 1,
                Granularity::Cell => summary.cell_level += 1,
            }
            *summary.by_kind.entry(error.kind).or_insert(0) += 1;
            if !summary.fields.contains(&error.field) {
                summary.fields.push(error.field.clone());
            }
        }
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
