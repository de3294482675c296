//! Append-only error accumulation for a conversion run.

use redcap_model::{CellError, Granularity};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorCollector {
    errors: Vec<CellError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: CellError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = CellError>) {
        self.errors.extend(errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[CellError] {
        &self.errors
    }

    /// Field-name errors: columns that matched no dictionary field.
    pub fn unmatched_fields(&self) -> impl Iterator<Item = &CellError> {
        self.errors.iter().filter(|e| e.kind.is_field_name_error())
    }

    pub fn count(&self, granularity: Granularity) -> usize {
        self.errors
            .iter()
            .filter(|e| e.granularity() == granularity)
            .count()
    }

    pub fn into_errors(self) -> Vec<CellError> {
        self.errors
    }
}
