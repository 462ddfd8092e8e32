//! Core error types for cilium-e2e

use thiserror::Error;

/// Errors raised while loading configuration and resolving inputs
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
