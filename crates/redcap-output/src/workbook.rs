//! Highlighted error workbook.
//!
//! The original dataset is written unchanged except that every flagged cell
//! gets a fixed background colour, and flagged missing cells show
//! [`MISSING_SENTINEL`] so the highlight has something to sit on.

use std::path::Path;

use redcap_model::{CellValue, Dataset, ErrorMask, MISSING_SENTINEL};
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// Background of flagged cells.
pub const HIGHLIGHT_COLOR: u32 = 0xFF00FF;

const SHEET_NAME: &str = "errors";

/// Write `dataset` to an `.xlsx` workbook, highlighting the cells set in `mask`.
///
/// The header row holds the column identifiers; data starts on the second
/// row so mask row `n` lands on worksheet row `n + 1`.
pub fn write_flagged_workbook(dataset: &Dataset, mask: &ErrorMask, path: &Path) -> Result<()> {
    let too_large = || OutputError::SheetTooLarge {
        rows: dataset.row_count(),
        columns: dataset.column_count(),
    };
    // Excel caps: 1_048_576 rows (header included) and 16_384 columns.
    if dataset.row_count() >= 1_048_576 || dataset.column_count() > 16_384 {
        return Err(too_large());
    }

    ensure_parent_dir(path)?;
    let xlsx_err = |source| OutputError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(xlsx_err)?;
    let flagged = write_cells(worksheet, dataset, mask).map_err(xlsx_err)?;
    workbook.save(path).map_err(xlsx_err)?;

    tracing::info!(
        path = %path.display(),
        rows = dataset.row_count(),
        flagged,
        "wrote highlighted error workbook"
    );
    Ok(())
}

fn write_cells(
    worksheet: &mut Worksheet,
    dataset: &Dataset,
    mask: &ErrorMask,
) -> std::result::Result<usize, XlsxError> {
    let highlight = Format::new().set_background_color(Color::RGB(HIGHLIGHT_COLOR));
    let mut flagged = 0;

    for (col_idx, column) in dataset.columns().iter().enumerate() {
        let col = col_idx as u16;
        worksheet.write_string(0, col, &column.name)?;

        for (row_idx, cell) in column.cells.iter().enumerate() {
            let row = row_idx as u32 + 1;
            if mask.is_flagged(col_idx, row_idx) {
                flagged += 1;
                match cell {
                    CellValue::Missing => {
                        worksheet.write_string_with_format(row, col, MISSING_SENTINEL, &highlight)?
                    }
                    CellValue::Number(v) => {
                        worksheet.write_number_with_format(row, col, *v, &highlight)?
                    }
                    CellValue::Text(s) => worksheet.write_string_with_format(row, col, s, &highlight)?,
                };
            } else {
                match cell {
                    CellValue::Missing => continue,
                    CellValue::Number(v) => worksheet.write_number(row, col, *v)?,
                    CellValue::Text(s) => worksheet.write_string(row, col, s)?,
                };
            }
        }
    }
    Ok(flagged)
}
