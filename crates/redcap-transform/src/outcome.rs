use redcap_model::{CellError, Column, ErrorKind};

/// Result of transforming one dataset column.
///
/// Carries the replacement columns (one for most fields, one per choice for a
/// clean checkbox field, the untouched original when the field failed) and
/// every error found in that column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnOutcome {
    pub columns: Vec<Column>,
    pub errors: Vec<CellError>,
}

impl ColumnOutcome {
    pub fn replaced(column: Column) -> Self {
        Self {
            columns: vec![column],
            errors: Vec::new(),
        }
    }

    pub fn expanded(columns: Vec<Column>) -> Self {
        Self {
            columns,
            errors: Vec::new(),
        }
    }

    /// Keep the original column and record errors against it.
    pub fn rejected(original: &Column, errors: Vec<CellError>) -> Self {
        Self {
            columns: vec![original.clone()],
            errors,
        }
    }

    /// Keep the original column with a single field-level error.
    pub fn field_error(original: &Column, kind: ErrorKind, detail: Option<String>) -> Self {
        let mut error = CellError::field(original.name.clone(), kind);
        error.detail = detail;
        Self::rejected(original, vec![error])
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
