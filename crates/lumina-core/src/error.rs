//! Error types shared across the Lumina workspace.

use thiserror::Error;

/// Main error type for Lumina operations.
#[derive(Error, Debug)]
pub enum LuminaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for Lumina operations.
pub type Result<T> = std::result::Result<T, LuminaError>;
