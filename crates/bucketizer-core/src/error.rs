//! Error types for the bucketizers

use thiserror::Error;

pub type BucketizerResult<T> = Result<T, BucketizerError>;

/// Bucketizer error types
#[derive(Debug, Error)]
pub enum BucketizerError {
    /// Missing or invalid option, raised at construction time
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),

    /// Snapshot does not match what the strategy expects
    #[error("Malformed state: {0}")]
    MalformedState(String),
}

impl BucketizerError {
    pub fn config(msg: impl Into<String>) -> Self {
        BucketizerError::ConfigurationError(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        BucketizerError::MalformedState(msg.into())
    }
}
