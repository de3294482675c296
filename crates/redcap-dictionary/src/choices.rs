//! Parsing of serialized choice lists (`1, Male | 2, Female`).

use redcap_common::{clean_value, find_collisions, normalize_name};
use redcap_model::ChoiceList;

/// A choice segment without the `code, label` shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("choice '{segment}' is not of the form 'code, label'")]
pub struct MalformedChoice {
    pub segment: String,
}

/// Parse a serialized choice list.
///
/// Segments are separated by `|`. Only the first comma of a segment splits
/// the code from the label, so labels may contain commas. The serialized code
/// is discarded: a label's code is its 1-based position. Labels are trimmed,
/// whitespace-collapsed and lower-cased. Empty segments are ignored.
pub fn parse_choices(raw: &str) -> Result<ChoiceList, MalformedChoice> {
    let mut labels = Vec::new();
    for segment in raw.split('|') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let label = segment
            .split_once(',')
            .map(|(_, label)| clean_value(label))
            .filter(|label| !label.is_empty())
            .ok_or_else(|| MalformedChoice {
                segment: segment.to_string(),
            })?;
        labels.push(label);
    }
    Ok(ChoiceList::new(labels))
}

/// Why a choice list cannot back a checkbox field, if it can't.
///
/// Every choice becomes an indicator column `field___<normalized label>`, so
/// the list must be non-empty and distinct labels must not normalize to the
/// same suffix. Repeated identical labels share one indicator and are fine.
pub fn checkbox_choice_problem(choices: &ChoiceList) -> Option<String> {
    if choices.is_empty() {
        return Some("checkbox field has no choices".to_string());
    }
    let mut distinct: Vec<&str> = Vec::with_capacity(choices.len());
    for label in choices.labels() {
        if !distinct.contains(&label.as_str()) {
            distinct.push(label.as_str());
        }
    }
    if let Some((suffix, labels)) = find_collisions(&distinct).into_iter().next() {
        return Some(format!(
            "choices '{}' share the indicator suffix '{suffix}'",
            labels.join("', '")
        ));
    }
    if distinct.iter().any(|label| normalize_name(label).is_empty()) {
        return Some("choice label has no usable indicator suffix".to_string());
    }
    None
}
