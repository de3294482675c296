//! Property tests for the name normalizer.

use proptest::prelude::*;
use redcap_common::{normalize_name, normalize_names};

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in "[ A-Za-z0-9_,/\t-]{0,24}") {
        let once = normalize_name(&raw);
        prop_assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn normalized_names_have_canonical_shape(raw in "[ A-Za-z0-9_,/\t-]{0,24}") {
        let name = normalize_name(&raw);
        prop_assert!(!name.contains(char::is_whitespace));
        prop_assert!(!name.contains(','));
        prop_assert!(!name.contains('/'));
        prop_assert!(!name.contains("__"));
        prop_assert_eq!(name.to_lowercase(), name.clone());
    }

    #[test]
    fn normalize_names_preserves_length(raws in proptest::collection::vec("[ A-Za-z,/]{0,12}", 0..8)) {
        prop_assert_eq!(normalize_names(&raws).len(), raws.len());
    }
}
