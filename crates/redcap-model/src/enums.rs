//! Type-safe enumerations for data dictionary metadata.
//!
//! The dictionary stores field types and text validation kinds as free-form
//! strings (`radio`, `date_mdy`, `number_2dp`, ...). These enums give them a
//! closed, matchable shape; anything outside the supported set is rejected at
//! dictionary-load time instead of being silently passed through.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field type of a dictionary entry.
///
/// Only the five types that carry importable data are modelled. `notes` is a
/// multi-line text box and is handled exactly like [`FieldType::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text, optionally constrained by a [`TextValidation`].
    Text,
    /// Multi-select; expanded into one indicator column per choice.
    Checkbox,
    /// Implicit `no`/`yes` choice list.
    Yesno,
    /// Single-select radio buttons.
    Radio,
    /// Single-select drop-down list.
    Dropdown,
}

impl FieldType {
    /// Returns the dictionary spelling of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Checkbox => "checkbox",
            FieldType::Yesno => "yesno",
            FieldType::Radio => "radio",
            FieldType::Dropdown => "dropdown",
        }
    }

    /// Returns true for the single-select coded types.
    pub fn is_categorical(&self) -> bool {
        matches!(
            self,
            FieldType::Yesno | FieldType::Radio | FieldType::Dropdown
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    /// Parse a dictionary field type (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "notes" => Ok(FieldType::Text),
            "checkbox" => Ok(FieldType::Checkbox),
            "yesno" => Ok(FieldType::Yesno),
            "radio" => Ok(FieldType::Radio),
            "dropdown" => Ok(FieldType::Dropdown),
            _ => Err(format!("Unsupported field type: {s}")),
        }
    }
}

/// Component order used when rendering a validated date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateOrder {
    /// `MM/DD/YYYY`
    Mdy,
    /// `DD/MM/YYYY`
    Dmy,
    /// `YYYY/MM/DD`
    Ymd,
}

impl DateOrder {
    /// `chrono` format string for this order.
    pub fn format_str(&self) -> &'static str {
        match self {
            DateOrder::Mdy => "%m/%d/%Y",
            DateOrder::Dmy => "%d/%m/%Y",
            DateOrder::Ymd => "%Y/%m/%d",
        }
    }
}

/// Text validation kind attached to a `text` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "order", rename_all = "snake_case")]
pub enum TextValidation {
    /// No validation: any non-missing value is accepted.
    None,
    /// Calendar date rendered in the given order.
    Date(DateOrder),
    /// Number rendered with exactly two fractional digits.
    TwoDecimal,
    /// Whole number; floats truncate toward zero.
    Integer,
}

impl TextValidation {
    /// Returns the dictionary spelling of this validation kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextValidation::None => "",
            TextValidation::Date(DateOrder::Mdy) => "date_mdy",
            TextValidation::Date(DateOrder::Dmy) => "date_dmy",
            TextValidation::Date(DateOrder::Ymd) => "date_ymd",
            TextValidation::TwoDecimal => "number_2dp",
            TextValidation::Integer => "integer",
        }
    }
}

impl fmt::Display for TextValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextValidation::None => write!(f, "none"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl FromStr for TextValidation {
    type Err = String;

    /// Parse a dictionary validation kind. A blank value means no validation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" => Ok(TextValidation::None),
            "date_mdy" => Ok(TextValidation::Date(DateOrder::Mdy)),
            "date_dmy" => Ok(TextValidation::Date(DateOrder::Dmy)),
            "date_ymd" => Ok(TextValidation::Date(DateOrder::Ymd)),
            "number_2dp" => Ok(TextValidation::TwoDecimal),
            "integer" => Ok(TextValidation::Integer),
            _ => Err(format!("Unsupported text validation: {s}")),
        }
    }
}
