//! Report rendering for conversion runs.
//!
//! - **Error log**: plain-text log for the person fixing the data
//! - **JSON report**: the same errors with counts, for tooling

mod context;
mod error;
mod json;
mod text_log;

pub use context::ErrorReport;
pub use error::{ReportError, Result};
pub use json::{render_json_report, write_json_report};
pub use text_log::{render_error_log, write_error_log};
