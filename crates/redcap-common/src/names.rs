//! Field name normalization.
//!
//! Dataset headers and dictionary identifiers are compared only after both
//! pass through [`normalize_name`].

use std::collections::BTreeMap;

/// Canonicalizes a field name.
///
/// Lowercases, trims, collapses internal whitespace runs to a single `_`,
/// removes `,` and `/`, then collapses repeated `_` left over by the removal.
///
/// # Examples
///
/// ```
/// use redcap_common::normalize_name;
///
/// assert_eq!(normalize_name("  Weight (lbs) "), "weight_(lbs)");
/// assert_eq!(normalize_name("Height / Weight"), "height_weight");
/// assert_eq!(normalize_name("Variable / Field Name"), "variable_field_name");
/// assert_eq!(normalize_name("a,b"), "ab");
/// ```
pub fn normalize_name(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let joined = lowered.split_whitespace().collect::<Vec<_>>().join("_");
    let stripped: String = joined.chars().filter(|c| *c != ',' && *c != '/').collect();

    let mut out = String::with_capacity(stripped.len());
    let mut prev_underscore = false;
    for ch in stripped.chars() {
        if ch == '_' {
            if prev_underscore {
                continue;
            }
            prev_underscore = true;
        } else {
            prev_underscore = false;
        }
        out.push(ch);
    }
    out
}

/// Normalizes every name, preserving order and length.
pub fn normalize_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names.iter().map(|n| normalize_name(n.as_ref())).collect()
}

/// Returns the normalized names reached by two or more distinct raw names.
///
/// The map value lists the colliding raw names in input order. Identical raw
/// names repeated also count as a collision.
pub fn find_collisions<S: AsRef<str>>(names: &[S]) -> BTreeMap<String, Vec<String>> {
    let mut seen: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for raw in names {
        let raw = raw.as_ref();
        seen.entry(normalize_name(raw))
            .or_default()
            .push(raw.to_string());
    }
    seen.retain(|_, raws| raws.len() > 1);
    seen
}
