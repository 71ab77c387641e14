//! Ledger Network Bootstrap - Main Entry Point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledger_network_bootstrap::infrastructure::driven_adapters::config::AppConfig;
use ledger_network_bootstrap::infrastructure::driving_adapters::cli::{handlers, AppContext, Cli, Gateways};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing on stderr; stdout carries command results
    let level = if cli.verbose { "debug" } else { "info" };
    let json = cli
        .log_json
        .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr));
    let plain = (!cli.log_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ledger_network_bootstrap={level}").into()),
        )
        .with(json)
        .with(plain)
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::debug!("Configuration loaded successfully");

    // Wire gateways and use cases
    let gateways = Gateways::docker(&config, cli.yes).await;
    let context = AppContext::new(config, gateways)?;

    match handlers::run(&context, cli.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("Error [{}]: {e}", e.error_code());
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
