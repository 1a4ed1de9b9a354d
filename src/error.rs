//! Error types for xexpr-core.
//!
//! Parsing is fail-fast: the first position where no production can advance
//! produces a [`ExprError::Syntax`] carrying that position and a description
//! of what was expected there. No partial AST is ever surfaced.

use thiserror::Error;

/// Expression engine error type
#[derive(Error, Debug)]
pub enum ExprError {
    /// No grammar production matched at the given input position.
    #[error("Syntax error at position {position}: expecting {expected}, found {found}")]
    Syntax {
        /// Character position in the input where parsing stopped
        position: usize,
        /// Description of what the grammar expected at that position
        expected: String,
        /// What was actually found
        found: String,
    },

    /// The parse options were malformed; rejected before parsing starts.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for expression parsing
pub type ExprResult<T> = Result<T, ExprError>;

impl serde::Serialize for ExprError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
