//! Error types for the graf-query crate.

use thiserror::Error;

/// Errors produced while parsing a filter expression.
///
/// All of these are surfaced synchronously, before any network call is
/// made with the query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The query contained no atoms at all.
    #[error("empty query")]
    Empty,

    /// An opening parenthesis was never closed, or a closing one never
    /// opened.
    #[error("unbalanced parentheses in query")]
    UnbalancedParens,

    /// An `and`/`or` appeared without an operand on one side.
    #[error("operator `{operator}` is missing an operand")]
    DanglingOperator {
        /// The operator that was left dangling.
        operator: String,
    },

    /// A punctuation token that is not part of the grammar.
    #[error("unknown operator `{operator}`")]
    UnknownOperator {
        /// The unrecognized token.
        operator: String,
    },
}

/// Result type for query parsing.
pub type Result<T> = std::result::Result<T, ParseError>;
