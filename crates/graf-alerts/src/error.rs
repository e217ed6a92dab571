//! Error types for the graf-alerts crate.

use thiserror::Error;

/// Errors produced while interpreting a label selector.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// A selector clause that is not of the `label=value` form.
    #[error("selector clause `{clause}` is not of the form label=value")]
    MissingEquals {
        /// The offending clause.
        clause: String,
    },
}

/// Result type for alert reconciliation.
pub type Result<T> = std::result::Result<T, SelectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_missing_equals() {
        let err = SelectorError::MissingEquals {
            clause: "cow-service".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "selector clause `cow-service` is not of the form label=value"
        );
    }
}
