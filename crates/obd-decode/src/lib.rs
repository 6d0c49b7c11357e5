//! OBD-II Response Decoding
//!
//! Converts raw hexadecimal PID response payloads into physical values
//! (temperatures, pressures, percentages, ...) using the standard mode-01
//! decoding formulas.

mod decoder;
mod dtc;
mod error;

pub use decoder::{DecodedValue, Decoder};
pub use dtc::DtcStatus;
pub use error::DecodeError;
