//! Best-effort calendar date parsing and rendering.
//!
//! Input dates arrive in many shapes (`2021-03-14`, `3/14/2021`,
//! `14-Mar-2021`, `2021-03-14 08:30:00`). Only the date part is kept and it is
//! re-rendered in the field's [`DateOrder`].

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use redcap_model::DateOrder;

/// Formats that cannot be read two ways.
const UNAMBIGUOUS_DATE_FORMATS: [&str; 12] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",    // Compact: 20210314
    "%d-%b-%Y",  // 14-Mar-2021
    "%d-%B-%Y",  // 14-March-2021
    "%b %d, %Y", // Mar 14, 2021
    "%B %d, %Y", // March 14, 2021
    "%b %d %Y",  // Mar 14 2021
    "%d %b %Y",  // 14 Mar 2021
    "%d %B %Y",  // 14 March 2021
    "%Y-%b-%d",  // 2021-Mar-14
];

const MONTH_FIRST_FORMATS: [&str; 6] = [
    "%m/%d/%Y", "%m-%d-%Y", "%m.%d.%Y", "%m/%d/%y", "%m-%d-%y", "%m.%d.%y",
];

const DAY_FIRST_FORMATS: [&str; 6] = [
    "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%d/%m/%y", "%d-%m-%y", "%d.%m.%y",
];

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Parse a date in any supported shape.
///
/// Purely numeric dates with the year last are read month-first unless
/// `day_first` is set; if the preferred reading is not a valid date the other
/// order is tried. Datetimes keep only their date part.
pub fn parse_flexible_date(value: &str, day_first: bool) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(date) = try_formats(trimmed, &UNAMBIGUOUS_DATE_FORMATS) {
        return Some(date);
    }

    let (preferred, fallback) = if day_first {
        (&DAY_FIRST_FORMATS, &MONTH_FIRST_FORMATS)
    } else {
        (&MONTH_FIRST_FORMATS, &DAY_FIRST_FORMATS)
    };
    if let Some(date) = try_formats(trimmed, preferred).or_else(|| try_formats(trimmed, fallback))
    {
        return Some(date);
    }

    try_parse_datetime(trimmed)
        .or_else(|| try_parse_ambiguous_datetime(trimmed, day_first))
        .map(|dt| dt.date())
}

/// Render a date in the given component order.
pub fn format_date(date: NaiveDate, order: DateOrder) -> String {
    date.format(order.format_str()).to_string()
}

fn try_formats(value: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(value, fmt)
            .ok()
            // `%Y` accepts short years; those belong to the `%y` formats.
            .filter(|d| !fmt.contains("%Y") || d.year() >= 1000)
    })
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Numeric date followed by a time, e.g. `3/14/2021 08:30`.
fn try_parse_ambiguous_datetime(value: &str, day_first: bool) -> Option<NaiveDateTime> {
    let (date_part, time_part) = value.split_once(' ')?;
    let date = parse_flexible_date(date_part, day_first)?;
    let time_part = time_part.trim();
    ["%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p"]
        .iter()
        .find_map(|fmt| chrono::NaiveTime::parse_from_str(time_part, fmt).ok())
        .map(|time| date.and_time(time))
}
