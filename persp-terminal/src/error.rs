//! Error types for persp-terminal

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Problems reading or validating the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors that can stop the terminal viewer
#[derive(Error, Debug)]
pub enum AppError {
    /// Terminal I/O failed
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for persp-terminal operations
pub type Result<T> = std::result::Result<T, AppError>;
