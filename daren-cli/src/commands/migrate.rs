//! Schema command

use anyhow::{Context, Result};
use clap::Parser;
use daren_core::DarenConfig;
use daren_server::db::{create_pool, migrations};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Create all tables and indexes; safe to run repeatedly
pub async fn run_migrate(args: MigrateArgs, config: &DarenConfig) -> Result<()> {
    let url = args.database_url.as_deref().unwrap_or(&config.database.url);

    let pool = create_pool(url)
        .await
        .with_context(|| format!("Failed to open database {}", url))?;

    migrations::run(&pool)
        .await
        .context("Failed to create database schema")?;
    pool.close().await;

    println!("Schema up to date: {}", url);
    Ok(())
}
