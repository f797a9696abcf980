use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid temp-file pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid directory {path}: {reason}")]
    InvalidDirectory { path: PathBuf, reason: String },

    #[error("Unknown operation code '{0}'")]
    UnknownOperation(char),

    #[error("Invalid mode string '{0}'")]
    InvalidMode(String),

    #[error("Aborted by operator")]
    Aborted,
}
