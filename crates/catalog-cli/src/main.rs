//! # catalog CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use catalog_cli::commands::{run, Command};
use catalog_client::{CatalogClient, ClientConfig};

/// Item catalog client.
///
/// Lists items, submits new ones with images, shows item details, and sends
/// enquiry emails through a running catalog API.
#[derive(Parser, Debug)]
#[command(name = "catalog", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Catalog API base URL. Overrides `CATALOG_API_URL`.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match execute(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

async fn execute(cli: Cli) -> Result<u8> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url)?;
    }
    tracing::debug!(api = %config.base(), "using catalog API");

    let client = CatalogClient::new(config)?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    run(cli.command, &client, stdin.lock(), &mut stdout).await
}
