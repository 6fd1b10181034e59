//! Migration command
//!
//! Applies the forward-only catalog migrations without starting the
//! server.

use anyhow::{Context, Result};
use clap::Parser;

use holocron_server::db::{create_pool, migrations};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (file-backed SQLite by default)
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://holocron.db")]
    pub database_url: String,
}

/// Apply the catalog migrations and exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = create_pool(&args.database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to apply migrations")?;

    tracing::info!("Migrations applied");
    Ok(())
}
