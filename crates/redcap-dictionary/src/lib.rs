#![deny(unsafe_code)]

pub mod choices;
pub mod error;
pub mod index;
pub mod loader;
pub mod matcher;

pub use crate::choices::{MalformedChoice, checkbox_choice_problem, parse_choices};
pub use crate::error::{DictionaryError, Result};
pub use crate::index::{DictionaryEntry, DictionaryIndex, DictionaryProblem};
pub use crate::loader::load_dictionary;
pub use crate::matcher::{FieldMatch, match_fields, match_names};
