//! Single-select fields: `radio`, `dropdown` and `yesno`.

use redcap_model::{CellError, CellValue, Column, ErrorKind, FieldDefinition};

use crate::outcome::ColumnOutcome;
use crate::rules::cell_key;

/// Replace each value with the 1-based code of its label.
///
/// Fields without explicit choices use the implicit `[no, yes]` list. A
/// missing value stays missing. Any value outside the choice list rejects
/// the column.
pub fn transform_categorical(field: &FieldDefinition, column: &Column) -> ColumnOutcome {
    let choices = field.effective_choices();
    let mut errors = Vec::new();
    let mut cells = Vec::with_capacity(column.len());

    for (idx, cell) in column.cells.iter().enumerate() {
        let Some(key) = cell_key(cell) else {
            cells.push(CellValue::Missing);
            continue;
        };
        match choices.code_of(&key) {
            Some(code) => cells.push(CellValue::Text(code.to_string())),
            None => errors.push(CellError::cell(
                column.name.clone(),
                ErrorKind::InvalidCategoricalValue,
                idx + 1,
                cell.raw(),
            )),
        }
    }

    if !errors.is_empty() {
        return ColumnOutcome::rejected(column, errors);
    }
    ColumnOutcome::replaced(Column::new(field.name.clone(), cells))
}
