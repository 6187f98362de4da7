use thiserror::Error;

/// Unified error type for the crate.
///
/// Individual request failures are never surfaced here — they are recorded as
/// [`crate::Outcome::Failure`] entries in the result set. This enum covers only
/// structural misuse (empty batches, querying a formatted error for an index
/// that did not fail) and construction-time problems.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid batch: {message}")]
    InvalidBatch { message: String },

    #[error("No failure recorded at index {index}")]
    NotAFailure { index: usize },

    #[error("Batch worker error: {message}")]
    Worker { message: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
        }
    }

    /// Create a new invalid-batch error
    pub fn invalid_batch(msg: impl Into<String>) -> Self {
        Error::InvalidBatch {
            message: msg.into(),
        }
    }
}
