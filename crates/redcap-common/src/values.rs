//! Value cleaning and numeric formatting helpers.

/// Collapses every internal whitespace run to a single space and trims.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleans a raw value for choice-list lookup: trim, collapse whitespace,
/// lowercase.
///
/// # Examples
///
/// ```
/// use redcap_common::clean_value;
///
/// assert_eq!(clean_value("  Female "), "female");
/// assert_eq!(clean_value("Not   Sure"), "not sure");
/// ```
pub fn clean_value(value: &str) -> String {
    collapse_whitespace(value).to_lowercase()
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use redcap_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Formats a number with exactly two fractional digits.
///
/// # Examples
///
/// ```
/// use redcap_common::format_two_decimals;
///
/// assert_eq!(format_two_decimals(3.0), "3.00");
/// assert_eq!(format_two_decimals(4.5), "4.50");
/// assert_eq!(format_two_decimals(1.999), "2.00");
/// ```
pub fn format_two_decimals(v: f64) -> String {
    format!("{v:.2}")
}
