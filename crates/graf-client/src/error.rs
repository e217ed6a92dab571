//! Error types for the graf-client crate.

use thiserror::Error;

/// Errors that can occur while talking to a Grafana source.
///
/// A failed fetch fails the whole aggregate operation; no partial or
/// degraded result is ever returned.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Upstream answered with a non-2xx status.
    #[error("request failed with {status} {status_text}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Status text as reported by the upstream.
        status_text: String,
    },

    /// Network-level failure before a response was produced.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("failed to decode response from {path}: {message}")]
    Decode {
        /// Request path whose response failed to decode.
        path: String,
        /// Decoder message.
        message: String,
    },

    /// An entity referenced a source id that is not configured.
    #[error("unknown Grafana source: {id}")]
    UnknownSource {
        /// The missing source id.
        id: String,
    },

    /// Invalid source configuration.
    #[error("invalid source configuration: {reason}")]
    Config {
        /// Why the configuration was rejected.
        reason: String,
    },

    /// Malformed dashboard filter expression.
    #[error(transparent)]
    Parse(#[from] graf_query::ParseError),

    /// Malformed alert selector clause.
    #[error(transparent)]
    Selector(#[from] graf_alerts::SelectorError),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_http() {
        let err = ClientError::Http {
            status: 502,
            status_text: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "request failed with 502 Bad Gateway");
    }

    #[test]
    fn error_display_unknown_source() {
        let err = ClientError::UnknownSource {
            id: "staging".to_string(),
        };
        assert_eq!(err.to_string(), "unknown Grafana source: staging");
    }

    #[test]
    fn error_display_decode_names_the_path() {
        let err = ClientError::Decode {
            path: "/api/search".to_string(),
            message: "expected a list".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to decode response from /api/search: expected a list"
        );
    }
}
