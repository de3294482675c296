//! Field definitions parsed from the data dictionary.
//!
//! A dictionary row describes one importable field:
//!
//! ```text
//! Variable / Field Name = gender
//! Field Type            = radio
//! Choices               = 1, Male | 2, Female
//! ```
//!
//! The serialized codes (`1`, `2`) are not trusted. A [`ChoiceList`] keeps the
//! labels in parse order and the code of a label is its 1-based position.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{FieldType, TextValidation};

/// Labels of the implicit choice list used by `yesno` fields.
pub const YES_NO_LABELS: [&str; 2] = ["no", "yes"];

/// Ordered list of permissible labels for a categorical field.
///
/// Labels are stored already cleaned (trimmed, whitespace-collapsed,
/// lower-cased). Lookup is exact on the cleaned label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ChoiceList {
    labels: Vec<String>,
    /// Cleaned label -> 1-based code. The first occurrence of a label wins.
    codes: BTreeMap<String, usize>,
}

impl ChoiceList {
    /// Build a choice list from labels in dictionary order.
    pub fn new(labels: Vec<String>) -> Self {
        let mut codes = BTreeMap::new();
        for (idx, label) in labels.iter().enumerate() {
            codes.entry(label.clone()).or_insert(idx + 1);
        }
        Self { labels, codes }
    }

    /// The implicit `[no, yes]` list, coded `1 = no`, `2 = yes`.
    pub fn yes_no() -> Self {
        Self::new(YES_NO_LABELS.iter().map(|s| (*s).to_string()).collect())
    }

    /// Labels in dictionary order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns true if `label` is a permissible (cleaned) value.
    pub fn contains(&self, label: &str) -> bool {
        self.codes.contains_key(label)
    }

    /// 1-based code of a cleaned label.
    pub fn code_of(&self, label: &str) -> Option<usize> {
        self.codes.get(label).copied()
    }
}

impl From<Vec<String>> for ChoiceList {
    fn from(labels: Vec<String>) -> Self {
        Self::new(labels)
    }
}

impl From<ChoiceList> for Vec<String> {
    fn from(list: ChoiceList) -> Self {
        list.labels
    }
}

/// One importable field of the data dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Normalized variable name; unique within the dictionary.
    pub name: String,
    /// Normalized field label (alternate match key).
    pub label: String,
    pub field_type: FieldType,
    pub validation: TextValidation,
    /// Explicit choices from the dictionary, empty when none were supplied.
    pub choices: ChoiceList,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            field_type,
            validation: TextValidation::None,
            choices: ChoiceList::default(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_validation(mut self, validation: TextValidation) -> Self {
        self.validation = validation;
        self
    }

    #[must_use]
    pub fn with_choices(mut self, choices: ChoiceList) -> Self {
        self.choices = choices;
        self
    }

    /// Choice list used for coding values of this field.
    ///
    /// Categorical fields without explicit choices fall back to the implicit
    /// yes/no list; explicit choices always take precedence.
    pub fn effective_choices(&self) -> Cow<'_, ChoiceList> {
        if self.choices.is_empty() && self.field_type.is_categorical() {
            Cow::Owned(ChoiceList::yes_no())
        } else {
            Cow::Borrowed(&self.choices)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn codes_follow_parse_order() {
        let list = ChoiceList::new(labels(&["male", "female"]));
        assert_eq!(list.code_of("male"), Some(1));
        assert_eq!(list.code_of("female"), Some(2));
        assert_eq!(list.code_of("unknown"), None);
    }

    #[test]
    fn duplicate_label_keeps_first_code() {
        let list = ChoiceList::new(labels(&["a", "b", "a"]));
        assert_eq!(list.code_of("a"), Some(1));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn yes_no_is_one_based() {
        let list = ChoiceList::yes_no();
        assert_eq!(list.code_of("no"), Some(1));
        assert_eq!(list.code_of("yes"), Some(2));
    }

    #[test]
    fn effective_choices_prefers_explicit_list() {
        let radio = FieldDefinition::new("smoker", FieldType::Radio);
        assert_eq!(radio.effective_choices().labels(), &labels(&["no", "yes"])[..]);

        let yesno = FieldDefinition::new("consent", FieldType::Yesno)
            .with_choices(ChoiceList::new(labels(&["yes", "no"])));
        assert_eq!(yesno.effective_choices().code_of("yes"), Some(1));

        let text = FieldDefinition::new("notes", FieldType::Text);
        assert!(text.effective_choices().is_empty());
    }

    #[test]
    fn choice_list_serializes_as_labels() {
        let list = ChoiceList::new(labels(&["fever", "cough"]));
        let json = serde_json::to_string(&list).expect("serialize");
        assert_eq!(json, r#"["fever","cough"]"#);
        let back: ChoiceList = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.code_of("cough"), Some(2));
    }
}
