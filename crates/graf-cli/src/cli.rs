//! Command-line argument definitions.

use clap::{Parser, Subcommand};

/// Look up Grafana dashboards and alert statuses for a catalog entity.
#[derive(Debug, Parser)]
#[command(name = "graf", version, about)]
pub struct Cli {
    /// Base URL requests are issued against (the Grafana root, or a
    /// catalog proxy in front of it).
    #[arg(long, env = "GRAF_BASE_URL")]
    pub base_url: String,

    /// Path appended to the base URL; use `/grafana/api` when going
    /// through a catalog proxy.
    #[arg(long, default_value = "")]
    pub proxy_path: String,

    /// Domain users open Grafana on, used to build the returned links.
    /// Defaults to the base URL.
    #[arg(long)]
    pub domain: Option<String>,

    /// Bearer token attached to every request; omitted when absent.
    #[arg(long, env = "GRAFANA_TOKEN")]
    pub token: Option<String>,

    /// The installation runs unified alerting.
    #[arg(long)]
    pub unified: bool,

    /// Print results as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// What to look up.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List dashboards matching a tag selector or filter expression.
    Dashboards {
        /// A tag selector (`payments`, `a|b`, `a&b`) or a filter
        /// expression (`tag:payments and overview`).
        query: String,
    },
    /// Show normalized alert states for a selector.
    Alerts {
        /// `label=value` clauses for unified sources (OR/comma
        /// separated), or dashboard tags for legacy sources.
        selector: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_an_alerts_invocation() {
        let cli = Cli::parse_from([
            "graf",
            "--base-url",
            "http://localhost:3000",
            "--unified",
            "alerts",
            "bc=cow-service",
        ]);
        assert!(cli.unified);
        match cli.command {
            Commands::Alerts { selector } => assert_eq!(selector, "bc=cow-service"),
            Commands::Dashboards { .. } => panic!("expected alerts subcommand"),
        }
    }
}
