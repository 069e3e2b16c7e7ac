/// Structured error types for daren-core.
///
/// Library code returns these; the `daren` binary wraps them in `anyhow`
/// with extra context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for daren-core operations
#[derive(Error, Debug)]
pub enum DarenError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Config file exists but is not valid TOML for `DarenConfig`
    #[error("Invalid config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Config could not be rendered back to TOML
    #[error("Failed to serialize config: {source}")]
    ConfigSerialize {
        #[from]
        source: toml::ser::Error,
    },

    /// Configuration value is unusable
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for daren-core operations
pub type Result<T> = std::result::Result<T, DarenError>;

impl DarenError {
    /// Create a config parse error for the given file
    pub fn config_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
