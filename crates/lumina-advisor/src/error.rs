//! Error types for the advisory subsystem.

use thiserror::Error;

/// Errors from the advisory collaborator.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// The service could not be reached.
    #[error("advisory service unavailable: {0}")]
    Unavailable(String),

    /// The service responded with data that does not match the expected
    /// segment schema.
    #[error("malformed advisory response: {0}")]
    Malformed(String),

    /// IO error while talking to the service.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for advisory operations.
pub type AdvisorResult<T> = std::result::Result<T, AdvisorError>;
