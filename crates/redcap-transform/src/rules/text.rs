//! Text fields, with or without a validation kind.

use redcap_common::{format_numeric, format_two_decimals};
use redcap_model::{
    CellError, CellValue, Column, DateOrder, ErrorKind, FieldDefinition, TextValidation,
};

use crate::datetime::{format_date, parse_flexible_date};
use crate::outcome::ColumnOutcome;

pub fn transform_text(field: &FieldDefinition, column: &Column, day_first: bool) -> ColumnOutcome {
    match field.validation {
        TextValidation::None => transform_plain(field, column),
        TextValidation::Date(order) => transform_date(field, column, order, day_first),
        TextValidation::TwoDecimal => transform_two_decimal(field, column),
        TextValidation::Integer => transform_integer(field, column),
    }
}

/// Pass values through; a missing value is an error.
fn transform_plain(field: &FieldDefinition, column: &Column) -> ColumnOutcome {
    let errors: Vec<CellError> = column
        .cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_missing())
        .map(|(idx, _)| CellError::cell(column.name.clone(), ErrorKind::MissingValue, idx + 1, None))
        .collect();
    if !errors.is_empty() {
        return ColumnOutcome::rejected(column, errors);
    }
    ColumnOutcome::replaced(Column::new(field.name.clone(), column.cells.clone()))
}

/// Re-render parseable dates; missing stays missing.
fn transform_date(
    field: &FieldDefinition,
    column: &Column,
    order: DateOrder,
    day_first: bool,
) -> ColumnOutcome {
    let mut errors = Vec::new();
    let mut cells = Vec::with_capacity(column.len());
    for (idx, cell) in column.cells.iter().enumerate() {
        let raw = match cell {
            CellValue::Missing => {
                cells.push(CellValue::Missing);
                continue;
            }
            CellValue::Number(v) => format_numeric(*v),
            CellValue::Text(s) => s.clone(),
        };
        match parse_flexible_date(&raw, day_first) {
            Some(date) => cells.push(CellValue::Text(format_date(date, order))),
            None => {
                errors.push(CellError::cell(
                    column.name.clone(),
                    ErrorKind::UnparseableDate,
                    idx + 1,
                    Some(raw),
                ));
            }
        }
    }
    if !errors.is_empty() {
        return ColumnOutcome::rejected(column, errors);
    }
    ColumnOutcome::replaced(Column::new(field.name.clone(), cells))
}

/// All non-missing values must be numeric, otherwise the whole column fails.
fn transform_two_decimal(field: &FieldDefinition, column: &Column) -> ColumnOutcome {
    let offending: Vec<(usize, String)> = column
        .cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| !cell.is_missing() && cell.as_number().is_none())
        .map(|(idx, cell)| (idx + 1, cell.to_string()))
        .collect();
    if !offending.is_empty() {
        let listed = offending
            .iter()
            .map(|(row, value)| format!("{value}: {row}"))
            .collect::<Vec<_>>()
            .join(", ");
        return ColumnOutcome::field_error(
            column,
            ErrorKind::NonNumericColumn,
            Some(format!("non-numeric values {{{listed}}}")),
        );
    }

    let cells = column
        .cells
        .iter()
        .map(|cell| match cell.as_number() {
            Some(v) => CellValue::Text(format_two_decimals(v)),
            None => CellValue::Missing,
        })
        .collect();
    ColumnOutcome::replaced(Column::new(field.name.clone(), cells))
}

/// Truncate numeric values toward zero; each non-numeric value is an error.
fn transform_integer(field: &FieldDefinition, column: &Column) -> ColumnOutcome {
    let mut errors = Vec::new();
    let mut cells = Vec::with_capacity(column.len());
    for (idx, cell) in column.cells.iter().enumerate() {
        if cell.is_missing() {
            cells.push(CellValue::Missing);
            continue;
        }
        match cell.as_number() {
            Some(v) => {
                let truncated = v.trunc();
                let truncated = if truncated == 0.0 { 0.0 } else { truncated };
                cells.push(CellValue::Text(format_numeric(truncated)));
            }
            None => {
                errors.push(CellError::cell(
                    column.name.clone(),
                    ErrorKind::InvalidInteger,
                    idx + 1,
                    cell.raw(),
                ));
            }
        }
    }
    if !errors.is_empty() {
        return ColumnOutcome::rejected(column, errors);
    }
    ColumnOutcome::replaced(Column::new(field.name.clone(), cells))
}
