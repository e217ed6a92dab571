//! Joining alert rules with their instances and aggregating states.
//!
//! Unified alerting serves rule definitions and evaluation instances as
//! two separate collections. Reconciliation joins them: selector clauses
//! pick candidate rules by label equality, instances attach to a rule by
//! the `alertname` label matching the rule title, and the attached
//! instance states collapse into one reported state per rule.

use graf_query::split_disjuncts;

use crate::error::Result;
use crate::types::{AlertInstance, AlertRule, AlertState, LabelMatch, LegacyAlert, NormalizedAlert, RuleState};

/// Collapse the states of a rule's attached instances into one reported
/// state.
///
/// Precedence, first match wins: any `Alerting`, any `Error`, any
/// `Pending`, all `NoData`, then `Normal` when normal and no-data
/// instances cover the full count. Anything else, including zero
/// attached instances, is `n/a` — there is nothing to judge the rule by.
/// A single firing instance dominates even if most instances are
/// healthy.
#[must_use]
pub fn aggregate(states: &[AlertState]) -> RuleState {
    if states.is_empty() {
        return RuleState::NotAvailable;
    }
    if states.contains(&AlertState::Alerting) {
        return RuleState::Known(AlertState::Alerting);
    }
    if states.contains(&AlertState::Error) {
        return RuleState::Known(AlertState::Error);
    }
    if states.contains(&AlertState::Pending) {
        return RuleState::Known(AlertState::Pending);
    }

    let total = states.len();
    let no_data = states.iter().filter(|s| **s == AlertState::NoData).count();
    let normal = states.iter().filter(|s| **s == AlertState::Normal).count();
    if no_data == total {
        return RuleState::Known(AlertState::NoData);
    }
    if normal + no_data == total {
        return RuleState::Known(AlertState::Normal);
    }

    RuleState::NotAvailable
}

/// Normalizes rules and instances for one alert source.
///
/// Holds the source's display domain, which is prepended to every URL
/// handed back to callers.
#[derive(Debug, Clone)]
pub struct Reconciler {
    domain: String,
}

impl Reconciler {
    /// Create a reconciler for the given display domain.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    /// Reconcile rules with instances for a compound selector.
    ///
    /// Each OR/comma-separated `label=value` clause is reconciled
    /// independently and the results concatenated in clause order, then
    /// rule order. Zero or many matching instances for a rule are not
    /// errors; they resolve through [`aggregate`].
    pub fn reconcile(
        &self,
        selector: &str,
        rules: &[AlertRule],
        instances: &[AlertInstance],
    ) -> Result<Vec<NormalizedAlert>> {
        let mut alerts = Vec::new();
        for clause in split_disjuncts(selector) {
            let matcher = LabelMatch::parse(clause)?;
            for rule in rules.iter().filter(|rule| rule.matches_label(&matcher)) {
                let states: Vec<AlertState> = instances
                    .iter()
                    .filter(|instance| instance.alert_name() == Some(rule.title.as_str()))
                    .map(|instance| instance.state)
                    .collect();
                alerts.push(NormalizedAlert {
                    name: rule.title.clone(),
                    url: format!("{}/alerting/grafana/{}/view", self.domain, rule.uid),
                    state: aggregate(&states),
                });
            }
        }
        Ok(alerts)
    }

    /// Map a legacy alert object into the normalized shape.
    ///
    /// Legacy alerts already carry their state; only the panel deep link
    /// needs building.
    #[must_use]
    pub fn normalize_legacy(&self, alert: &LegacyAlert) -> NormalizedAlert {
        NormalizedAlert {
            name: alert.name.clone(),
            url: format!(
                "{}{}?panelId={}&fullscreen&refresh=30s",
                self.domain, alert.url, alert.panel_id
            ),
            state: RuleState::Known(alert.state),
        }
    }
}
