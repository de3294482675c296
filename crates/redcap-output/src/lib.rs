//! Output writers for REDCap conversion.
//!
//! - **Import CSV**: the transformed dataset, ready for the REDCap data import tool
//! - **Error workbook**: the original dataset with flagged cells highlighted

mod common;
mod csv_writer;
mod error;
mod workbook;

pub use csv_writer::write_csv;
pub use error::{OutputError, Result};
pub use workbook::{HIGHLIGHT_COLOR, write_flagged_workbook};
