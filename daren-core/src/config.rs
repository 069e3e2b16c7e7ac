use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{DarenError, Result};

/// Environment variable pointing at an alternate config file
pub const CONFIG_PATH_ENV: &str = "DAREN_CONFIG";

/// Centralized configuration for the daren server and CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DarenConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    /// tracing filter used when RUST_LOG is unset (e.g. "info", "daren_server=debug")
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
    pub allowed_origins: Vec<String>,
    /// Prebuilt payback frontend, served under /payback when set
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            cors_permissive: false,
            allowed_origins: vec!["http://localhost:5173".to_string()],
            static_dir: None,
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: 5,
        }
    }
}

/// sqlite://~/.daren/daren.db
fn default_database_url() -> String {
    format!("sqlite://{}", daren_home().join("daren.db").display())
}

/// ~/.daren (or ./.daren when there is no home directory)
pub fn daren_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".daren")
}

impl DarenConfig {
    /// Load config from `config_path()`, then apply environment overrides.
    ///
    /// A missing file is not an error: defaults are used.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Load config from a specific file without touching the environment
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| DarenError::config_parse(path, e))
    }

    /// Get config file path: $DAREN_CONFIG or ~/.daren/config.toml
    pub fn config_path() -> PathBuf {
        env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| daren_home().join("config.toml"))
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// `load`).
    ///
    /// Recognized keys: DAREN_BIND, DATABASE_URL, DAREN_STATIC_DIR, DAREN_LOG.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("DAREN_BIND") {
            self.server.bind = bind.parse().map_err(|_| {
                DarenError::config(format!("DAREN_BIND is not a socket address: '{}'", bind))
            })?;
        }

        if let Some(url) = lookup("DATABASE_URL") {
            if !url.starts_with("sqlite:") {
                return Err(DarenError::config(format!(
                    "DATABASE_URL must be a sqlite: URL, got '{}'",
                    url
                )));
            }
            self.database.url = url;
        }

        if let Some(dir) = lookup("DAREN_STATIC_DIR") {
            self.server.static_dir = Some(PathBuf::from(dir));
        }

        if let Some(level) = lookup("DAREN_LOG") {
            self.log_level = Some(level);
        }

        Ok(())
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}
