//! Directive error definitions.

use symrename_model::NameError;
use thiserror::Error;

/// A directive line that has a recognized prefix but cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("expected 2 ';'-separated fields, found {found}")]
    FieldCount { found: usize },

    #[error("missing member separator in '{0}'")]
    MissingSeparator(String),

    #[error("invalid old name: {0}")]
    InvalidOldName(NameError),

    #[error("invalid new name: {0}")]
    InvalidNewName(NameError),
}
