//! Field matching between dataset columns and the dictionary.

use std::collections::BTreeSet;

use redcap_model::MatchKey;

use crate::index::{DictionaryEntry, DictionaryIndex};

/// Split dataset names into those present in the dictionary and those absent.
///
/// Both lists keep dataset order. Names are compared exactly, so both sides
/// should already be normalized.
pub fn match_names<S, T>(dataset: &[S], dictionary: &[T]) -> (Vec<String>, Vec<String>)
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let known: BTreeSet<&str> = dictionary.iter().map(|name| name.as_ref()).collect();
    dataset
        .iter()
        .map(|name| name.as_ref().to_string())
        .partition(|name| known.contains(name.as_str()))
}

/// Resolution of every dataset column against a [`DictionaryIndex`].
#[derive(Debug, Clone)]
pub struct FieldMatch<'a> {
    columns: Vec<(String, Option<&'a DictionaryEntry>)>,
}

impl<'a> FieldMatch<'a> {
    /// Dictionary entry resolved for the column at `position`.
    pub fn entry_at(&self, position: usize) -> Option<&'a DictionaryEntry> {
        self.columns.get(position).and_then(|(_, entry)| *entry)
    }

    /// Matched columns with their entries, in dataset order.
    pub fn matched(&self) -> impl Iterator<Item = (&str, &'a DictionaryEntry)> + '_ {
        self.columns
            .iter()
            .filter_map(|(name, entry)| entry.map(|entry| (name.as_str(), entry)))
    }

    /// Dataset columns without a dictionary counterpart, in dataset order.
    pub fn unmatched(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|(_, entry)| entry.is_none())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn matched_count(&self) -> usize {
        self.columns.iter().filter(|(_, entry)| entry.is_some()).count()
    }
}

/// Resolve each dataset column name against the dictionary under `key`.
pub fn match_fields<'a, S: AsRef<str>>(
    columns: &[S],
    index: &'a DictionaryIndex,
    key: MatchKey,
) -> FieldMatch<'a> {
    let columns = columns
        .iter()
        .map(|name| {
            let name = name.as_ref();
            (name.to_string(), index.lookup(name, key))
        })
        .collect();
    FieldMatch { columns }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redcap_model::{FieldDefinition, FieldType};

    #[test]
    fn match_names_keeps_dataset_order() {
        let (matched, unmatched) = match_names(
            &["weight_lbs", "gender", "age", "dob"],
            &["dob", "gender", "age"],
        );
        assert_eq!(matched, vec!["gender", "age", "dob"]);
        assert_eq!(unmatched, vec!["weight_lbs"]);
    }

    #[test]
    fn match_fields_resolves_by_key() {
        let index = DictionaryIndex::from_fields(vec![
            FieldDefinition::new("age", FieldType::Text).with_label("age_in_years"),
            FieldDefinition::new("gender", FieldType::Radio),
        ])
        .expect("index");

        let by_name = match_fields(&["gender", "age_in_years"], &index, MatchKey::VariableName);
        assert_eq!(by_name.matched_count(), 1);
        assert_eq!(by_name.unmatched(), vec!["age_in_years"]);

        let by_label = match_fields(&["gender", "age_in_years"], &index, MatchKey::FieldLabel);
        assert_eq!(by_label.unmatched(), Vec::<&str>::new());
        assert_eq!(by_label.entry_at(1).map(DictionaryEntry::name), Some("age"));
    }
}
