//! Error types shared across the network portal crates

use thiserror::Error;

/// Result type alias for shared operations
pub type Result<T> = std::result::Result<T, NpError>;

#[derive(Error, Debug)]
pub enum NpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown species: {0}")]
    UnknownSpecies(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl NpError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
