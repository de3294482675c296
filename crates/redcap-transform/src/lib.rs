//! Dictionary-driven value transformation.
//!
//! [`convert`] resolves every dataset column against the data dictionary,
//! dispatches it to the rule for its field type and either returns the
//! import-ready dataset or the original dataset with an error mask.

pub mod collector;
pub mod convert;
pub mod datetime;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod rules;

pub use collector::ErrorCollector;
pub use convert::{Conversion, ConversionOutput, convert};
pub use datetime::{format_date, parse_flexible_date};
pub use engine::{resolve_column, transform_column};
pub use error::{Result, TransformError};
pub use outcome::ColumnOutcome;
pub use rules::checkbox::indicator_name;
