//! Typed decode boundary for the upstream JSON shapes.
//!
//! Every upstream payload is parsed into one of these structs before any
//! logic touches it; a shape mismatch surfaces as a decode error instead
//! of a dynamically-typed value leaking through.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use graf_alerts::{AlertInstance, AlertRule};

/// One record from `GET /api/search?type=dash-db[&tag=T]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    /// Dashboard title.
    pub title: String,
    /// Dashboard URL, relative to the Grafana domain.
    pub url: String,
    /// Title of the containing folder, if any.
    #[serde(default)]
    pub folder_title: Option<String>,
    /// Folder URL, relative to the Grafana domain.
    #[serde(default)]
    pub folder_url: Option<String>,
    /// Dashboard tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Response of `GET /api/ruler/grafana/api/v1/rules`: namespace name to
/// rule groups. A `BTreeMap` keeps namespace iteration deterministic.
pub type RulerResponse = BTreeMap<String, Vec<RuleGroup>>;

/// One rule group inside a namespace.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleGroup {
    /// Group name.
    pub name: String,
    /// Rules in the group.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// One configured rule inside a group.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    /// Rule labels.
    #[serde(default)]
    pub labels: HashMap<String, String>,
    /// Nested rule identity.
    pub grafana_alert: RuleIdentity,
}

/// The identity block nested under `grafana_alert`.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleIdentity {
    /// Stable rule uid.
    pub uid: String,
    /// Rule title.
    pub title: String,
}

impl From<RuleConfig> for AlertRule {
    fn from(config: RuleConfig) -> Self {
        Self {
            uid: config.grafana_alert.uid,
            title: config.grafana_alert.title,
            labels: config.labels,
        }
    }
}

/// Flatten a ruler response into the rules it contains, in namespace
/// then group then rule order.
#[must_use]
pub fn flatten_rules(response: RulerResponse) -> Vec<AlertRule> {
    response
        .into_values()
        .flatten()
        .flat_map(|group| group.rules)
        .map(AlertRule::from)
        .collect()
}

/// Response of `GET /api/prometheus/grafana/api/v1/alerts`.
#[derive(Debug, Clone, Deserialize)]
pub struct PromAlertsResponse {
    /// Payload wrapper.
    pub data: PromAlertsData,
}

/// The `data` member of the prometheus alerts response.
#[derive(Debug, Clone, Deserialize)]
pub struct PromAlertsData {
    /// Current alert instances.
    #[serde(default)]
    pub alerts: Vec<AlertInstance>,
}

/// One record from
/// `GET /api/alertmanager/grafana/api/v2/alerts?filter=...`.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertmanagerAlert {
    /// Alert labels.
    #[serde(default)]
    pub labels: HashMap<String, String>,
    /// Alert annotations.
    #[serde(default)]
    pub annotations: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use graf_alerts::AlertState;

    #[test]
    fn search_hit_decodes_optional_folder_fields() {
        let json = r#"{"title": "Service Overview", "url": "/d/abc/service-overview"}"#;
        let hit: SearchHit = serde_json::from_str(json).unwrap();
        assert_eq!(hit.title, "Service Overview");
        assert!(hit.folder_title.is_none());
        assert!(hit.tags.is_empty());
    }

    #[test]
    fn ruler_response_flattens_in_namespace_order() {
        let json = r#"{
            "Team Alerting": [{
                "name": "The Cows Got Out Again Alert",
                "rules": [{
                    "labels": {"bc": "cow-service"},
                    "grafana_alert": {"uid": "A8KId9MVk", "title": "The Cows Got Out Again Alert"}
                }]
            }],
            "General Alerting": [{
                "name": "Software Catalog - GitHub Provider Errors",
                "rules": [{
                    "labels": {"bc": "backstage"},
                    "grafana_alert": {"uid": "I7VlW6GVz", "title": "Software Catalog - GitHub Provider Errors"}
                }]
            }]
        }"#;
        let response: RulerResponse = serde_json::from_str(json).unwrap();
        let rules = flatten_rules(response);

        let uids: Vec<&str> = rules.iter().map(|r| r.uid.as_str()).collect();
        assert_eq!(uids, vec!["I7VlW6GVz", "A8KId9MVk"]);
        assert_eq!(rules[1].labels.get("bc").map(String::as_str), Some("cow-service"));
    }

    #[test]
    fn ruler_rule_with_extra_fields_still_decodes() {
        let json = r#"{
            "ns": [{
                "name": "g",
                "interval": "1m",
                "rules": [{
                    "expr": "",
                    "for": "5m",
                    "labels": {},
                    "annotations": {},
                    "grafana_alert": {
                        "id": 28,
                        "uid": "u",
                        "title": "t",
                        "no_data_state": "OK"
                    }
                }]
            }]
        }"#;
        let rules = flatten_rules(serde_json::from_str(json).unwrap());
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn prometheus_alerts_decode_into_instances() {
        let json = r#"{
            "status": "success",
            "data": {
                "alerts": [{
                    "labels": {"alertname": "The Cows Got Out Again Alert", "bc": "cow-service"},
                    "annotations": {"__panelId__": "7"},
                    "state": "Normal",
                    "activeAt": "2023-01-24T19:00:00Z",
                    "value": ""
                }]
            }
        }"#;
        let response: PromAlertsResponse = serde_json::from_str(json).unwrap();
        let instance = &response.data.alerts[0];
        assert_eq!(instance.state, AlertState::Normal);
        assert_eq!(instance.alert_name(), Some("The Cows Got Out Again Alert"));
        assert!(instance.active_at.is_some());
    }

    #[test]
    fn shape_mismatch_is_a_decode_failure() {
        let err = serde_json::from_str::<PromAlertsResponse>(r#"{"data": []}"#);
        assert!(err.is_err());
    }
}
