//! Engine Error Types

use obd_decode::DecodeError;
use thiserror::Error;

/// Errors detected while building the sensor registry. These are
/// configuration mistakes and fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two definitions share a short identifier
    #[error("duplicate sensor short id: {0}")]
    DuplicateShortId(String),

    /// A command code is not a well-formed mode-01 query
    #[error("malformed command code {command:?} for sensor {short_id}")]
    MalformedCommand { short_id: String, command: String },
}

/// Errors surfaced while updating sensors during a session
#[derive(Debug, Error)]
pub enum EngineError {
    /// The raw payload could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The transport layer failed to answer a query
    #[error("transport error querying {command}: {reason}")]
    Transport { command: String, reason: String },
}
