//! Config command: show the active config or write a default file

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use daren_core::DarenConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a config file with default values
    Init(InitArgs),
    /// Print the effective config (file + environment) as TOML
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, path: &Path, config: &DarenConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args, path),
        ConfigCommands::Show => run_show(config),
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn run_init(args: InitArgs, path: &Path) -> Result<()> {
    if path.exists() && !args.force {
        bail!(
            "Config already exists at {}\n\nUse --force to overwrite",
            path.display()
        );
    }

    DarenConfig::default()
        .save_to(path)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    println!("Created config at: {}", path.display());
    Ok(())
}

fn run_show(config: &DarenConfig) -> Result<()> {
    let rendered = config.to_toml().context("Failed to render config")?;
    print!("{}", rendered);
    Ok(())
}
