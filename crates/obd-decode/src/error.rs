//! Decode Error Types

use thiserror::Error;

/// Errors during decoding of a raw PID response payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Payload contains non-hexadecimal characters or is empty
    #[error("invalid hex payload: {0:?}")]
    InvalidHex(String),

    /// Payload is shorter than the PID requires
    #[error("truncated payload: expected {expected} hex chars, got {actual}")]
    TruncatedPayload { expected: usize, actual: usize },
}
