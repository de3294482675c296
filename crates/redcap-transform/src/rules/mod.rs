//! Per-field-type transformation rules.
//!
//! Each rule receives one dataset column and its dictionary definition and
//! returns a self-contained [`ColumnOutcome`](crate::outcome::ColumnOutcome).

pub mod categorical;
pub mod checkbox;
pub mod text;

use redcap_common::{clean_value, format_numeric};
use redcap_model::CellValue;

/// Lookup key of a non-missing cell: numbers without a fractional part are
/// stringified without decimals, text is cleaned.
pub(crate) fn cell_key(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Missing => None,
        CellValue::Number(v) => Some(format_numeric(*v)),
        CellValue::Text(s) => Some(clean_value(s)),
    }
}
