//! Authenticated REST transport to one Grafana installation.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Supplies the bearer credential attached to upstream requests.
///
/// Credentials come from an external identity provider; a `None` token
/// simply omits the `Authorization` header rather than failing.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// The current bearer token, if any.
    async fn token(&self) -> Option<String>;
}

/// A fixed token (or none), for CLIs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticToken {
    token: Option<String>,
}

impl StaticToken {
    /// Wrap an optional token.
    #[must_use]
    pub const fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Option<String> {
        self.token.clone()
    }
}

/// GET-only JSON transport rooted at one source's API base.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    api_base: String,
    tokens: Arc<dyn TokenProvider>,
}

impl RestClient {
    /// Create a transport for `proxy_base` + `proxy_path`.
    #[must_use]
    pub fn new(proxy_base: &str, proxy_path: &str, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: format!("{proxy_base}{proxy_path}"),
            tokens,
        }
    }

    /// Fetch `path` and decode the JSON body.
    ///
    /// Non-2xx responses fail with the HTTP status; shape mismatches
    /// fail with a decode error naming the path.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.api_base);
        debug!(%url, "fetching from Grafana");

        let mut request = self.http.get(&url);
        if let Some(token) = self.tokens.token().await {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| ClientError::Decode {
            path: path.to_string(),
            message: err.to_string(),
        })
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_token_round_trips() {
        let tokens = StaticToken::new(Some("secret".to_string()));
        assert_eq!(tokens.token().await.as_deref(), Some("secret"));
        assert!(StaticToken::default().token().await.is_none());
    }
}
