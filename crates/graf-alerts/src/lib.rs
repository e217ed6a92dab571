//! Alert model and state reconciliation for grafbridge.
//!
//! Grafana exposes alerts through two regimes: legacy alerts are
//! self-contained objects with an embedded state, while unified alerting
//! serves rule definitions and evaluation instances as separate
//! collections. This crate joins the unified pair by label and name
//! matching, aggregates instance states into one state per rule using a
//! fixed severity precedence, and maps both regimes into a single
//! normalized output shape.
//!
//! # Example
//!
//! ```rust
//! use graf_alerts::{aggregate, AlertState, Reconciler, RuleState};
//!
//! // A single firing instance dominates the rule's reported state.
//! let state = aggregate(&[AlertState::Normal, AlertState::Alerting]);
//! assert_eq!(state, RuleState::Known(AlertState::Alerting));
//!
//! // Zero attached instances resolve to the n/a sentinel, not an error.
//! assert_eq!(aggregate(&[]).to_string(), "n/a");
//!
//! let reconciler = Reconciler::new("https://grafana.example.com");
//! let alerts = reconciler.reconcile("team=payments", &[], &[]).unwrap();
//! assert!(alerts.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod reconcile;
pub mod types;

pub use error::{Result, SelectorError};
pub use reconcile::{aggregate, Reconciler};
pub use types::{
    AlertInstance, AlertRule, AlertState, LabelMatch, LegacyAlert, NormalizedAlert, RuleState,
    ALERTNAME_LABEL,
};
