use std::path::Path;

use redcap_ingest::{LoadOptions, load_table};

use crate::error::Result;
use crate::index::DictionaryIndex;

/// Load and parse a data dictionary from a CSV or workbook file.
pub fn load_dictionary(path: impl AsRef<Path>, options: &LoadOptions) -> Result<DictionaryIndex> {
    let path = path.as_ref();
    let span = tracing::info_span!("load_dictionary", path = %path.display());
    let _guard = span.enter();

    let table = load_table(path, options)?;
    let index = DictionaryIndex::from_dataset(&table)?;
    tracing::info!(
        fields = index.len(),
        problems = index.problems().count(),
        "dictionary loaded"
    );
    Ok(index)
}
