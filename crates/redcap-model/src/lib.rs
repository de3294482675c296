pub mod enums;
pub mod error;
pub mod field;
pub mod issue;
pub mod mask;
pub mod options;
pub mod table;

pub use enums::{DateOrder, FieldType, TextValidation};
pub use error::{ModelError, Result};
pub use field::{ChoiceList, FieldDefinition, YES_NO_LABELS};
pub use issue::{CellError, ErrorKind, ErrorSummary, Granularity};
pub use mask::{ErrorMask, MISSING_SENTINEL};
pub use options::{ConvertOptions, MatchKey};
pub use table::{CellValue, Column, Dataset};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_summary_counts() {
        let errors = vec![
            CellError::field("weight_lbs", ErrorKind::UnmatchedField),
            CellError::cell("gender", ErrorKind::InvalidCategoricalValue, 2, Some("X".into())),
            CellError::cell("gender", ErrorKind::InvalidCategoricalValue, 4, Some("Y".into())),
        ];
        let summary = ErrorSummary::from_errors(&errors);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.field_level, 1);
        assert_eq!(summary.cell_level, 2);
        assert_eq!(summary.by_kind[&ErrorKind::InvalidCategoricalValue], 2);
        assert_eq!(summary.fields, vec!["weight_lbs", "gender"]);
    }

    #[test]
    fn error_serializes() {
        let error = CellError::cell("temp", ErrorKind::InvalidInteger, 1, Some("abc".into()));
        let json = serde_json::to_string(&error).expect("serialize error");
        let round: CellError = serde_json::from_str(&json).expect("deserialize error");
        assert_eq!(round, error);
        assert!(json.contains("\"invalid_integer\""));
    }
}
