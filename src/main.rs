// ABOUTME: CLI entry point for po-sync
// ABOUTME: Parses flags and environment, then runs the create-only sync

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use po_sync::commands::sync::{self, SyncOptions};
use po_sync::config::{AirtableConfig, DEFAULT_API_URL};

#[derive(Parser)]
#[command(name = "po-sync")]
#[command(about = "Create-only sync of purchase-order line items from SQLite to Airtable", long_about = None)]
#[command(version)]
struct Cli {
    /// Airtable personal access token
    #[arg(long, env = "AIRTABLE_PERSONAL_TOKEN", hide_env_values = true)]
    token: String,
    /// Airtable base id (appXXXXXXXXXXXXXX)
    #[arg(long = "base-id", env = "PO_BASE_ID")]
    base_id: String,
    /// Airtable table name
    #[arg(long = "table-name", env = "PO_TABLE_NAME")]
    table_name: String,
    /// Path to the materials requisition SQLite database
    #[arg(long, env = "PO_DATABASE", default_value = "app.db")]
    database: PathBuf,
    /// Airtable API base URL
    #[arg(long = "api-url", default_value_t = String::from(DEFAULT_API_URL))]
    api_url: String,
    /// Plan and report without creating any remote records
    #[arg(long)]
    dry_run: bool,
    /// Set the log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --log, default "info"
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log.clone()));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = AirtableConfig::new(&cli.api_url, cli.token, cli.base_id, cli.table_name);
    let opts = SyncOptions {
        database: cli.database,
        dry_run: cli.dry_run,
    };

    let report = sync::run(&config, &opts).await?;

    if report.has_failures() {
        anyhow::bail!(
            "{} of {} planned records failed to sync",
            report.failed,
            report.planned
        );
    }

    Ok(())
}
