//! `graf` binary entrypoint.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use graf_client::{GrafanaApiClient, GrafanaSource, SourceRegistry, StaticToken, TokenProvider,
    DEFAULT_SOURCE_ID};

mod cli;
mod output;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let domain = cli.domain.clone().unwrap_or_else(|| cli.base_url.clone());
    let source = GrafanaSource::new(DEFAULT_SOURCE_ID, domain)?
        .with_proxy_path(cli.proxy_path.clone())
        .with_unified_alerting(cli.unified);
    let registry = SourceRegistry::new(vec![source])?;
    let tokens: Arc<dyn TokenProvider> = Arc::new(StaticToken::new(cli.token.clone()));
    let client = GrafanaApiClient::new(&cli.base_url, &registry, tokens);

    let mut stdout = io::stdout().lock();
    match cli.command {
        Commands::Dashboards { query } => {
            let dashboards = client.dashboards(DEFAULT_SOURCE_ID, &query).await?;
            output::dashboards(&mut stdout, &dashboards, cli.json)?;
        }
        Commands::Alerts { selector } => {
            let alerts = client.alerts(DEFAULT_SOURCE_ID, &selector).await?;
            output::alerts(&mut stdout, &alerts, cli.json)?;
        }
    }
    Ok(())
}
