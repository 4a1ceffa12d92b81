//! Crate error type.
//!
//! Deriving a narrative never fails. Errors only come from decoding
//! upstream payloads and from rejecting bad thresholds.

use thiserror::Error;

/// Result type for fallible narrative operations.
pub type NarrativeResult<T> = Result<T, NarrativeError>;

/// Narrative errors.
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
