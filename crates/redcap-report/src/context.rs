use std::path::PathBuf;

use chrono::{DateTime, Utc};
use redcap_model::{CellError, MatchKey};

/// Everything a report describes about one run.
#[derive(Debug, Clone)]
pub struct ErrorReport<'a> {
    pub dictionary_path: PathBuf,
    pub data_path: PathBuf,
    pub generated_at: DateTime<Utc>,
    pub match_key: MatchKey,
    pub errors: &'a [CellError],
    /// Identifiers a dataset column could have matched.
    pub expected_fields: &'a [String],
}

impl<'a> ErrorReport<'a> {
    pub fn new(
        dictionary_path: impl Into<PathBuf>,
        data_path: impl Into<PathBuf>,
        errors: &'a [CellError],
        expected_fields: &'a [String],
    ) -> Self {
        Self {
            dictionary_path: dictionary_path.into(),
            data_path: data_path.into(),
            generated_at: Utc::now(),
            match_key: MatchKey::default(),
            errors,
            expected_fields,
        }
    }

    #[must_use]
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    #[must_use]
    pub fn with_match_key(mut self, match_key: MatchKey) -> Self {
        self.match_key = match_key;
        self
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
