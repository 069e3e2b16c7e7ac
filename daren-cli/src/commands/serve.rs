//! HTTP server command
//!
//! Opens the database, makes sure the schema exists, then serves until
//! Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use daren_core::DarenConfig;
use daren_server::db::{create_pool_with_options, migrations};
use daren_server::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default from config: 127.0.0.1:8080)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL, e.g. sqlite://daren.db (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Directory with the built payback frontend, served at /payback
    #[arg(long, value_name = "DIR")]
    pub static_dir: Option<PathBuf>,
}

impl ServeArgs {
    /// Layer command-line flags over the loaded config
    fn apply(self, mut config: DarenConfig) -> DarenConfig {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if self.cors_permissive {
            config.server.cors_permissive = true;
        }
        if let Some(url) = self.database_url {
            config.database.url = url;
        }
        if let Some(dir) = self.static_dir {
            config.server.static_dir = Some(dir);
        }
        config
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: DarenConfig) -> Result<()> {
    let config = args.apply(config);

    tracing::info!(
        bind = %config.server.bind,
        database = %config.database.url,
        cors_permissive = config.server.cors_permissive,
        "Starting daren server"
    );

    let pool = create_pool_with_options(&config.database.url, config.database.max_connections)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.url))?;

    migrations::run(&pool)
        .await
        .context("Failed to create database schema")?;

    // Run server (blocks until shutdown)
    run_server(pool, ServerConfig::from(&config.server))
        .await
        .context("Server error")?;

    Ok(())
}
