//! CLI error type.

use std::io;
use std::path::PathBuf;

use coralert::cache::StoreError;
use coralert::config::ConfigError;
use coralert::logging::LoggingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    ConfigFile(#[from] ConfigError),

    #[error("Cache error: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Write to {dataset} was superseded by version {current}")]
    Superseded { dataset: String, current: u64 },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}
