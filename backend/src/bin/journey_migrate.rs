//! Apply pending record store migrations and exit.
//!
//! Reads the connection string from `--database-url` or
//! `JOURNEY_DATABASE_URL`.

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use weight_journey::outbound::persistence::run_pending_migrations;

#[derive(Debug, Parser)]
#[command(name = "journey-migrate", about = "Apply pending weight journey migrations")]
struct Args {
    /// PostgreSQL connection string.
    #[arg(long, env = "JOURNEY_DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = Args::parse();
    let applied = run_pending_migrations(args.database_url)
        .await
        .wrap_err("failed to apply journey migrations")?;
    if applied.is_empty() {
        info!("no pending migrations");
    }
    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(())
}
