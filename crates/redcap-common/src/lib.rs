//! Shared utilities for REDCap crates.
//!
//! This crate provides the name normalizer applied to both dataset headers and
//! dictionary identifiers, plus value cleaning and numeric formatting helpers
//! used by the transformer and the ingest layer.

pub mod names;
pub mod values;

// Re-export commonly used functions at crate root for convenience
pub use names::{find_collisions, normalize_name, normalize_names};
pub use values::{clean_value, collapse_whitespace, format_numeric, format_two_decimals};
