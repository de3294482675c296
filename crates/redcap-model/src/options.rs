//! Configuration options for a conversion run.

use serde::{Deserialize, Serialize};

/// Dictionary column used to match dataset headers to fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKey {
    /// Match on the normalized variable name.
    #[default]
    VariableName,
    /// Match on the normalized field label.
    FieldLabel,
}

impl MatchKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKey::VariableName => "variable",
            MatchKey::FieldLabel => "label",
        }
    }
}

/// Options controlling how values are transformed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Dictionary key used for field matching.
    pub match_key: MatchKey,

    /// Read ambiguous numeric dates like `03/04/2021` as day-first.
    /// Default: false (month-first).
    pub day_first: bool,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_match_key(mut self, match_key: MatchKey) -> Self {
        self.match_key = match_key;
        self
    }

    #[must_use]
    pub fn with_day_first(mut self, day_first: bool) -> Self {
        self.day_first = day_first;
        self
    }
}
