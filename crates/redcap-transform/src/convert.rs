//! Whole-dataset conversion and output selection.

use std::collections::BTreeMap;

use redcap_dictionary::{DictionaryIndex, match_fields};
use redcap_model::{
    CellError, Column, ConvertOptions, Dataset, ErrorKind, ErrorMask, ErrorSummary, Granularity,
    MatchKey,
};

use crate::collector::ErrorCollector;
use crate::engine::resolve_column;
use crate::error::Result;
use crate::outcome::ColumnOutcome;

/// Terminal state of a conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutput {
    /// No errors: the transformed, import-ready dataset.
    Clean(Dataset),
    /// At least one error: the original dataset, to be rendered with the mask.
    Errored(Dataset),
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub output: ConversionOutput,
    pub errors: Vec<CellError>,
    /// Same shape as the source dataset; all false when clean.
    pub mask: ErrorMask,
    /// Identifiers a dataset column could have matched, in dictionary order.
    pub expected_fields: Vec<String>,
    pub match_key: MatchKey,
}

impl Conversion {
    pub fn is_clean(&self) -> bool {
        matches!(self.output, ConversionOutput::Clean(_))
    }

    pub fn clean_dataset(&self) -> Option<&Dataset> {
        match &self.output {
            ConversionOutput::Clean(dataset) => Some(dataset),
            ConversionOutput::Errored(_) => None,
        }
    }

    pub fn summary(&self) -> ErrorSummary {
        ErrorSummary::from_errors(&self.errors)
    }
}

/// Convert a dataset against a data dictionary.
///
/// Every column is resolved and transformed independently; the per-column
/// outcomes are then merged in column order. Any error at all selects the
/// errored output.
pub fn convert(
    dataset: &Dataset,
    index: &DictionaryIndex,
    options: &ConvertOptions,
) -> Result<Conversion> {
    let span = tracing::info_span!(
        "convert",
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        match_on = options.match_key.as_str()
    );
    let _guard = span.enter();

    let names: Vec<&str> = dataset.column_names().collect();
    let duplicates = duplicate_names(&names);
    let matches = match_fields(&names, index, options.match_key);

    let outcomes: Vec<ColumnOutcome> = dataset
        .columns()
        .iter()
        .enumerate()
        .map(|(position, column)| {
            if duplicates.get(column.name.as_str()).copied().unwrap_or(0) > 1 {
                duplicate_column(column)
            } else {
                resolve_column(matches.entry_at(position), column, options)
            }
        })
        .collect();

    let mut collector = ErrorCollector::new();
    let mut columns: Vec<Column> = Vec::new();
    for outcome in outcomes {
        collector.extend(outcome.errors);
        columns.extend(outcome.columns);
    }

    let expected_fields = index
        .identifiers(options.match_key)
        .into_iter()
        .map(String::from)
        .collect();

    let mask = ErrorMask::from_errors(dataset, collector.errors());
    let output = if collector.is_empty() {
        ConversionOutput::Clean(Dataset::new(columns)?)
    } else {
        ConversionOutput::Errored(dataset.clone())
    };

    tracing::info!(
        matched = matches.matched_count(),
        unmatched = collector.unmatched_fields().count(),
        field_errors = collector.count(Granularity::Field),
        cell_errors = collector.count(Granularity::Cell),
        clean = collector.is_empty(),
        "conversion finished"
    );

    Ok(Conversion {
        output,
        errors: collector.into_errors(),
        mask,
        expected_fields,
        match_key: options.match_key,
    })
}

fn duplicate_names<'a>(names: &[&'a str]) -> BTreeMap<&'a str, usize> {
    let mut counts = BTreeMap::new();
    for name in names {
        *counts.entry(*name).or_insert(0) += 1;
    }
    counts
}

fn duplicate_column(column: &Column) -> ColumnOutcome {
    ColumnOutcome::field_error(
        column,
        ErrorKind::DuplicateColumn,
        Some(format!(
            "header '{}' normalizes to '{}' like another column",
            column.header, column.name
        )),
    )
}
