#![deny(unsafe_code)]

use redcap_ingest::IngestError;

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("data dictionary is missing required column '{column}' (found: {})", available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("data dictionary names {} all normalize to '{name}'", raws.join(", "))]
    AmbiguousFieldName { name: String, raws: Vec<String> },
}

pub type Result<T> = std::result::Result<T, DictionaryError>;
