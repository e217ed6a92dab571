//! Grafana source configuration.
//!
//! A deployment can expose several named Grafana installations; entities
//! reference them by id. A bare single-domain configuration registers
//! under the id `"default"` so backward compatibility is an explicit
//! registry entry rather than fallback logic at call sites.

use crate::error::{ClientError, Result};

/// Proxy path used when a source does not configure one.
pub const DEFAULT_PROXY_PATH: &str = "/grafana/api";

/// Id under which a bare single-domain configuration is registered.
pub const DEFAULT_SOURCE_ID: &str = "default";

/// One named Grafana installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrafanaSource {
    /// Source id referenced by catalog entities.
    pub id: String,
    /// Domain users reach the Grafana web UI on, prepended to every URL
    /// returned to callers.
    pub domain: String,
    /// Path appended to the proxy base for API requests.
    pub proxy_path: String,
    /// Whether this installation runs unified alerting (separate
    /// rule/instance collections) instead of legacy alerts.
    pub unified_alerting: bool,
}

impl GrafanaSource {
    /// Create a source, validating that id and domain are present.
    pub fn new(id: impl Into<String>, domain: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let domain = domain.into();
        if id.is_empty() {
            return Err(ClientError::Config {
                reason: "source id must not be empty".to_string(),
            });
        }
        if domain.is_empty() {
            return Err(ClientError::Config {
                reason: format!("source `{id}` has no domain"),
            });
        }
        Ok(Self {
            id,
            domain,
            proxy_path: DEFAULT_PROXY_PATH.to_string(),
            unified_alerting: false,
        })
    }

    /// Create the implicit default source from a bare domain.
    pub fn default_source(domain: impl Into<String>) -> Result<Self> {
        Self::new(DEFAULT_SOURCE_ID, domain)
    }

    /// Set the proxy path.
    #[must_use]
    pub fn with_proxy_path(mut self, proxy_path: impl Into<String>) -> Self {
        self.proxy_path = proxy_path.into();
        self
    }

    /// Select unified alerting for this source.
    #[must_use]
    pub const fn with_unified_alerting(mut self, unified: bool) -> Self {
        self.unified_alerting = unified;
        self
    }
}

/// The set of configured Grafana sources.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<GrafanaSource>,
}

impl SourceRegistry {
    /// Build a registry, rejecting duplicate ids.
    pub fn new(sources: Vec<GrafanaSource>) -> Result<Self> {
        for (i, source) in sources.iter().enumerate() {
            if sources[..i].iter().any(|other| other.id == source.id) {
                return Err(ClientError::Config {
                    reason: format!("duplicate source id `{}`", source.id),
                });
            }
        }
        Ok(Self { sources })
    }

    /// Look up a source by id.
    pub fn get(&self, id: &str) -> Result<&GrafanaSource> {
        self.sources
            .iter()
            .find(|source| source.id == id)
            .ok_or_else(|| ClientError::UnknownSource { id: id.to_string() })
    }

    /// The implicit default source, if configured.
    pub fn default_source(&self) -> Result<&GrafanaSource> {
        self.get(DEFAULT_SOURCE_ID)
    }

    /// Iterate over all configured sources.
    pub fn iter(&self) -> impl Iterator<Item = &GrafanaSource> {
        self.sources.iter()
    }
}
