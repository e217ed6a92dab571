//! Core types for alert reconciliation.
//!
//! Two upstream data models feed into one normalized output shape:
//! legacy alerts are self-contained objects with an embedded state, while
//! unified alerting splits rule definitions and their evaluation
//! instances into separate collections. Both are mapped into
//! [`NormalizedAlert`], the only alert shape exposed to callers.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::SelectorError;

/// Label key carrying the rule title on unified alert instances.
pub const ALERTNAME_LABEL: &str = "alertname";

/// The state of one alert evaluation.
///
/// Deserializes from both the unified spellings (`"Normal"`, `"NoData"`,
/// ...) and the legacy lowercase spellings (`"ok"`, `"alerting"`,
/// `"no_data"`); anything unrecognized lands in [`AlertState::Invalid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertState {
    /// The rule evaluated cleanly.
    #[serde(alias = "normal", alias = "ok")]
    Normal,
    /// The condition is true but has not been true long enough to fire.
    #[serde(alias = "pending")]
    Pending,
    /// The alert is firing.
    #[serde(alias = "alerting")]
    Alerting,
    /// The upstream explicitly reported no data for the evaluation.
    #[serde(alias = "no_data", alias = "nodata")]
    NoData,
    /// The evaluation itself failed.
    #[serde(alias = "error")]
    Error,
    /// Any state string this client does not recognize.
    #[serde(other)]
    Invalid,
}

impl AlertState {
    /// Returns the canonical (unified) spelling of the state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Pending => "Pending",
            Self::Alerting => "Alerting",
            Self::NoData => "NoData",
            Self::Error => "Error",
            Self::Invalid => "Invalid",
        }
    }
}

impl std::fmt::Display for AlertState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The single state reported for a rule after aggregation.
///
/// `NotAvailable` renders as `"n/a"` and means "no matching instance was
/// found to judge this rule". It is an output-only sentinel, distinct
/// from [`AlertState::NoData`] where the upstream explicitly reported no
/// data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleState {
    /// An aggregated concrete state.
    Known(AlertState),
    /// No instance data to judge the rule.
    NotAvailable,
}

impl RuleState {
    /// Returns the display spelling of the state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Known(state) => state.as_str(),
            Self::NotAvailable => "n/a",
        }
    }
}

impl std::fmt::Display for RuleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for RuleState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A configured alerting rule, independent of its current firing state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlertRule {
    /// Stable rule identifier, used for the deep link into the alerting
    /// UI.
    pub uid: String,
    /// Rule title; unified instances point back at it through the
    /// `alertname` label.
    pub title: String,
    /// Rule labels.
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

impl AlertRule {
    /// True if the rule carries the matcher's `label=value` pair.
    #[must_use]
    pub fn matches_label(&self, matcher: &LabelMatch) -> bool {
        self.labels.get(&matcher.label).map(String::as_str) == Some(matcher.value.as_str())
    }
}

/// One concrete evaluation of a rule.
///
/// A templated rule may produce many instances per evaluation, or none.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlertInstance {
    /// Instance labels; `alertname` links the instance to its rule.
    #[serde(default)]
    pub labels: HashMap<String, String>,
    /// State of this evaluation.
    pub state: AlertState,
    /// When the instance became active, if the upstream reported it.
    #[serde(default, rename = "activeAt")]
    pub active_at: Option<DateTime<Utc>>,
}

impl AlertInstance {
    /// The rule title this instance belongs to, per its `alertname`
    /// label.
    #[must_use]
    pub fn alert_name(&self) -> Option<&str> {
        self.labels.get(ALERTNAME_LABEL).map(String::as_str)
    }
}

/// A legacy alert object: self-contained, state embedded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAlert {
    /// Upstream alert id.
    pub id: i64,
    /// Panel the alert is attached to; used for the deep link.
    pub panel_id: i64,
    /// Alert name.
    pub name: String,
    /// Embedded state.
    pub state: AlertState,
    /// Dashboard-relative URL.
    pub url: String,
}

/// The normalized alert shape returned to callers.
///
/// Legacy and unified sources are both mapped into this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedAlert {
    /// Alert or rule name.
    pub name: String,
    /// Absolute deep link into the alerting UI.
    pub url: String,
    /// Aggregated state.
    pub state: RuleState,
}

/// One `label=value` clause of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMatch {
    /// Label name.
    pub label: String,
    /// Expected label value.
    pub value: String,
}

impl LabelMatch {
    /// Parse a clause, splitting on the first `=` only; values never
    /// contain `=` in this domain.
    pub fn parse(clause: &str) -> Result<Self, SelectorError> {
        let (label, value) = clause.split_once('=').ok_or_else(|| {
            SelectorError::MissingEquals {
                clause: clause.to_string(),
            }
        })?;
        Ok(Self {
            label: label.trim().to_string(),
            value: value.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("\"Normal\"", AlertState::Normal ; "unified normal")]
    #[test_case("\"ok\"", AlertState::Normal ; "legacy ok")]
    #[test_case("\"alerting\"", AlertState::Alerting ; "legacy alerting")]
    #[test_case("\"Alerting\"", AlertState::Alerting ; "unified alerting")]
    #[test_case("\"no_data\"", AlertState::NoData ; "legacy no data")]
    #[test_case("\"NoData\"", AlertState::NoData ; "unified no data")]
    #[test_case("\"pending\"", AlertState::Pending ; "legacy pending")]
    #[test_case("\"Error\"", AlertState::Error ; "unified error")]
    #[test_case("\"paused\"", AlertState::Invalid ; "paused is unrecognized")]
    #[test_case("\"garbage\"", AlertState::Invalid ; "arbitrary string")]
    fn alert_state_deserialization(json: &str, expected: AlertState) {
        let state: AlertState = serde_json::from_str(json).unwrap();
        assert_eq!(state, expected);
    }

    #[test]
    fn rule_state_renders_na_sentinel() {
        assert_eq!(RuleState::NotAvailable.to_string(), "n/a");
        assert_eq!(RuleState::Known(AlertState::Normal).to_string(), "Normal");
    }

    #[test]
    fn rule_state_serializes_as_string() {
        let json = serde_json::to_string(&RuleState::NotAvailable).unwrap();
        assert_eq!(json, "\"n/a\"");
    }

    #[test]
    fn label_match_splits_on_first_equals() {
        let matcher = LabelMatch::parse("bc=cow-service").unwrap();
        assert_eq!(matcher.label, "bc");
        assert_eq!(matcher.value, "cow-service");
    }

    #[test]
    fn label_match_rejects_bare_word() {
        let err = LabelMatch::parse("cow-service").unwrap_err();
        assert_eq!(
            err,
            SelectorError::MissingEquals {
                clause: "cow-service".to_string()
            }
        );
    }

    #[test]
    fn rule_label_matching() {
        let rule = AlertRule {
            uid: "A8KId9MVk".to_string(),
            title: "The Cows Got Out Again Alert".to_string(),
            labels: HashMap::from([("bc".to_string(), "cow-service".to_string())]),
        };
        assert!(rule.matches_label(&LabelMatch::parse("bc=cow-service").unwrap()));
        assert!(!rule.matches_label(&LabelMatch::parse("bc=backstage").unwrap()));
        assert!(!rule.matches_label(&LabelMatch::parse("team=cow-service").unwrap()));
    }

    #[test]
    fn legacy_alert_deserialization() {
        let json = r#"{"id": 1, "panelId": 7, "name": "X", "state": "alerting", "url": "/u"}"#;
        let alert: LegacyAlert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.panel_id, 7);
        assert_eq!(alert.state, AlertState::Alerting);
    }

    #[test]
    fn instance_alert_name_comes_from_labels() {
        let instance = AlertInstance {
            labels: HashMap::from([(ALERTNAME_LABEL.to_string(), "My Rule".to_string())]),
            state: AlertState::Normal,
            active_at: None,
        };
        assert_eq!(instance.alert_name(), Some("My Rule"));
    }
}
