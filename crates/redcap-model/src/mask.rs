//! Boolean grid parallel to a [`Dataset`] marking flagged cells.

use serde::{Deserialize, Serialize};

use crate::issue::CellError;
use crate::table::Dataset;

/// Rendered in place of a missing value in reports and flagged cells.
pub const MISSING_SENTINEL: &str = "MISSING";

/// Per-cell flags with the same shape as the source dataset.
///
/// Stored column-major so that whole-column flags (field-level errors) are a
/// single fill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMask {
    columns: Vec<String>,
    row_count: usize,
    flags: Vec<Vec<bool>>,
}

impl ErrorMask {
    /// All-false mask shaped like `dataset`.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        let row_count = dataset.row_count();
        Self {
            columns: dataset.column_names().map(String::from).collect(),
            row_count,
            flags: vec![vec![false; row_count]; dataset.column_count()],
        }
    }

    /// Mask shaped like `dataset` with every error applied.
    ///
    /// Field-level errors flag every cell of their column; cell-level errors
    /// flag one cell. Errors naming an unknown column or an out-of-range row
    /// are ignored.
    pub fn from_errors(dataset: &Dataset, errors: &[CellError]) -> Self {
        let mut mask = Self::for_dataset(dataset);
        for error in errors {
            mask.apply(error);
        }
        mask
    }

    pub fn apply(&mut self, error: &CellError) {
        match error.row {
            Some(row) => self.flag_cell(&error.field, row),
            None => self.flag_column(&error.field),
        }
    }

    /// Flag every cell of every column named `column`.
    pub fn flag_column(&mut self, column: &str) {
        for (idx, name) in self.columns.iter().enumerate() {
            if name == column {
                self.flags[idx].fill(true);
            }
        }
    }

    /// Flag a single cell; `row` is 1-based.
    pub fn flag_cell(&mut self, column: &str, row: usize) {
        if row == 0 || row > self.row_count {
            return;
        }
        for (idx, name) in self.columns.iter().enumerate() {
            if name == column {
                self.flags[idx][row - 1] = true;
            }
        }
    }

    /// Flag state by column position and 0-based row index.
    pub fn is_flagged(&self, column_idx: usize, row_idx: usize) -> bool {
        self.flags
            .get(column_idx)
            .and_then(|col| col.get(row_idx))
            .copied()
            .unwrap_or(false)
    }

    pub fn column_flags(&self, column: &str) -> Option<&[bool]> {
        self.columns
            .iter()
            .position(|name| name == column)
            .map(|idx| self.flags[idx].as_slice())
    }

    pub fn flagged_count(&self) -> usize {
        self.flags
            .iter()
            .map(|col| col.iter().filter(|flag| **flag).count())
            .sum()
    }

    pub fn any(&self) -> bool {
        self.flags.iter().any(|col| col.iter().any(|flag| *flag))
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}
