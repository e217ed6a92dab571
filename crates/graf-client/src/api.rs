//! High-level dashboard and alert lookup across configured sources.
//!
//! One fetch-and-render cycle per call: the caller's refresh cycle
//! drives polling, and a failed fetch fails the whole call rather than
//! surfacing partial results.

use std::sync::Arc;

use futures::future::try_join_all;

use graf_alerts::{LegacyAlert, NormalizedAlert, Reconciler};
use graf_query::{dedupe_by, expand_uris, is_tag_selector, ParsedQuery};

use crate::client::{RestClient, TokenProvider};
use crate::config::SourceRegistry;
use crate::decode::{
    flatten_rules, AlertmanagerAlert, PromAlertsResponse, RulerResponse, SearchHit,
};
use crate::error::{ClientError, Result};
use crate::types::Dashboard;

struct SourceHandle {
    id: String,
    domain: String,
    unified_alerting: bool,
    rest: RestClient,
    reconciler: Reconciler,
}

/// Client over all configured Grafana sources.
///
/// Entities reference a source by id; every operation resolves the id,
/// fans out the necessary upstream requests concurrently and merges the
/// results in selector/rule iteration order, never completion order.
pub struct GrafanaApiClient {
    handles: Vec<SourceHandle>,
}

impl GrafanaApiClient {
    /// Build a client for every source in the registry.
    ///
    /// `proxy_base` is the URL the per-source proxy paths are appended
    /// to; `tokens` supplies the bearer credential for every request.
    #[must_use]
    pub fn new(
        proxy_base: &str,
        registry: &SourceRegistry,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        let handles = registry
            .iter()
            .map(|source| SourceHandle {
                id: source.id.clone(),
                domain: source.domain.clone(),
                unified_alerting: source.unified_alerting,
                rest: RestClient::new(proxy_base, &source.proxy_path, Arc::clone(&tokens)),
                reconciler: Reconciler::new(source.domain.clone()),
            })
            .collect();
        Self { handles }
    }

    fn handle(&self, source_id: &str) -> Result<&SourceHandle> {
        self.handles
            .iter()
            .find(|handle| handle.id == source_id)
            .ok_or_else(|| ClientError::UnknownSource {
                id: source_id.to_string(),
            })
    }

    /// List dashboards of a source matching a query.
    ///
    /// Pure tag selectors (single words combined with OR/AND separators)
    /// are pushed down to the server-side tag filter, one request per
    /// OR-branch, merged and deduped by URL. Anything else is parsed by
    /// the filter grammar and evaluated client-side against the full
    /// dashboard list.
    pub async fn dashboards(&self, source_id: &str, query: &str) -> Result<Vec<Dashboard>> {
        let handle = self.handle(source_id)?;

        if is_tag_selector(query) {
            let uris = expand_uris("/api/search", &["type=dash-db"], "tag", query);
            let fetches = uris
                .iter()
                .map(|uri| handle.rest.get_json::<Vec<SearchHit>>(uri));
            let merged: Vec<Dashboard> = try_join_all(fetches)
                .await?
                .into_iter()
                .flatten()
                .map(|hit| Dashboard::from_hit(hit, &handle.domain))
                .collect();
            return Ok(dedupe_by(merged, |dashboard| dashboard.url.clone()));
        }

        // Parse before fetching so a malformed query never costs a
        // network call.
        let parsed = ParsedQuery::parse(query)?;
        let hits: Vec<SearchHit> = handle.rest.get_json("/api/search?type=dash-db").await?;
        Ok(hits
            .into_iter()
            .map(|hit| Dashboard::from_hit(hit, &handle.domain))
            .filter(|dashboard| parsed.evaluate(dashboard))
            .collect())
    }

    /// Fetch the normalized alerts of a source for a selector.
    ///
    /// Legacy sources expand the selector over the `dashboardTag`
    /// parameter and map each returned alert directly. Unified sources
    /// fetch rule definitions and alert instances concurrently and
    /// reconcile them by label and name matching.
    pub async fn alerts(&self, source_id: &str, selector: &str) -> Result<Vec<NormalizedAlert>> {
        let handle = self.handle(source_id)?;

        let alerts = if handle.unified_alerting {
            let (ruler, prometheus) = tokio::try_join!(
                handle
                    .rest
                    .get_json::<RulerResponse>("/api/ruler/grafana/api/v1/rules"),
                handle
                    .rest
                    .get_json::<PromAlertsResponse>("/api/prometheus/grafana/api/v1/alerts"),
            )?;
            let rules = flatten_rules(ruler);
            handle
                .reconciler
                .reconcile(selector, &rules, &prometheus.data.alerts)?
        } else {
            let uris = expand_uris("/api/alerts", &[], "dashboardTag", selector);
            let fetches = uris
                .iter()
                .map(|uri| handle.rest.get_json::<Vec<LegacyAlert>>(uri));
            try_join_all(fetches)
                .await?
                .into_iter()
                .flatten()
                .map(|alert| handle.reconciler.normalize_legacy(&alert))
                .collect()
        };

        Ok(dedupe_by(alerts, |alert| alert.url.clone()))
    }

    /// Raw alertmanager view of a source for a selector.
    ///
    /// Unlike [`alerts`](Self::alerts) this returns the
    /// alertmanager-style records as-is, without reconciliation.
    pub async fn alertmanager_alerts(
        &self,
        source_id: &str,
        selector: &str,
    ) -> Result<Vec<AlertmanagerAlert>> {
        let handle = self.handle(source_id)?;
        let filter: String = url::form_urlencoded::byte_serialize(selector.as_bytes()).collect();
        let path = format!("/api/alertmanager/grafana/api/v2/alerts?filter={filter}");
        handle.rest.get_json(&path).await
    }
}

impl std::fmt::Debug for GrafanaApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrafanaApiClient")
            .field(
                "sources",
                &self.handles.iter().map(|h| h.id.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
