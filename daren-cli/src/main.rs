//! daren CLI - dares and trip expense splitting
//!
//! Entry point for the `daren` binary:
//! - `serve`: run the HTTP server (HTML pages + JSON API)
//! - `migrate`: create the SQLite schema
//! - `config`: inspect and initialize ~/.daren/config.toml

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use daren_core::DarenConfig;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "daren",
    author,
    version,
    about = "Serve random dares and split shared trip expenses",
    long_about = "A small web app: write dares, draw a random unseen one, and track who \
                  owes whom on shared trips. Data lives in a local SQLite database."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file to use instead of ~/.daren/config.toml
    #[arg(long, global = true, value_name = "PATH", env = "DAREN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Create or update the database schema
    Migrate(commands::migrate::MigrateArgs),
    /// Inspect or initialize configuration
    Config(commands::config::ConfigArgs),
}

/// Load the config file (explicit path or default), then env overrides
fn load_config(path: Option<PathBuf>) -> Result<(PathBuf, DarenConfig)> {
    let path = path.unwrap_or_else(DarenConfig::config_path);

    let mut config = DarenConfig::load_from(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    config
        .apply_overrides(|key| std::env::var(key).ok())
        .context("Invalid environment override")?;

    Ok((path, config))
}

/// Load ~/.daren/.env and ./.env without overriding the real environment
fn load_dotenv() {
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".daren/.env"));
    }
    let _ = dotenvy::dotenv();
}

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    let cli = Cli::parse();

    let (config_path, config) = load_config(cli.config)?;

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        default_level: config.log_level.clone(),
    })
    .ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, config).await?,
        Commands::Migrate(args) => commands::run_migrate(args, &config).await?,
        Commands::Config(args) => commands::run_config(args, &config_path, &config)?,
    }
    Ok(())
}
