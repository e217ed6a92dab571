//! Grafana client for grafbridge.
//!
//! Fetches dashboards and alert statuses from one or more configured
//! Grafana installations and returns them in the normalized shapes a
//! software catalog can render. The pipeline per call: a raw selector is
//! expanded into the discrete upstream queries needed to realize it, the
//! queries are issued concurrently, each result is normalized (URLs
//! qualified, rules joined with their instances), and the merged result
//! is deduplicated before being returned.
//!
//! All entities are transient: constructed fresh per request from the
//! upstream responses, never persisted, no shared mutable state between
//! requests. Errors are fail-fast; one failed fetch fails the whole
//! aggregate call.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use graf_client::{GrafanaApiClient, GrafanaSource, SourceRegistry, StaticToken};
//!
//! # async fn run() -> graf_client::Result<()> {
//! let source = GrafanaSource::default_source("https://monitoring.example.com")?
//!     .with_unified_alerting(true);
//! let registry = SourceRegistry::new(vec![source])?;
//! let client = GrafanaApiClient::new(
//!     "https://backstage.example.com/proxy",
//!     &registry,
//!     Arc::new(StaticToken::new(None)),
//! );
//!
//! let dashboards = client.dashboards("default", "payments").await?;
//! let alerts = client.alerts("default", "bc=payments").await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod api;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod types;

pub use api::GrafanaApiClient;
pub use client::{RestClient, StaticToken, TokenProvider};
pub use config::{GrafanaSource, SourceRegistry, DEFAULT_PROXY_PATH, DEFAULT_SOURCE_ID};
pub use error::{ClientError, Result};
pub use types::Dashboard;

// Re-exported so callers can consume alert results without a direct
// graf-alerts dependency.
pub use graf_alerts::{AlertState, NormalizedAlert, RuleState};
