//! Monitor Status (Mode-01 PID 01) Byte Decomposition
//!
//! The four payload bytes carry the MIL state, the stored trouble-code
//! count, and per-monitor test status flags. The display path currently
//! renders only the `"#"` placeholder (see [`crate::Decoder::DtcStatus`]);
//! this breakdown is decoded and validated but not yet consumed, since no
//! display treatment for it has been settled.

use crate::decoder::hex_to_int;
use crate::error::DecodeError;
use serde::{Deserialize, Serialize};

/// Length of a monitor-status payload in hex characters (bytes A-D)
const PAYLOAD_LEN: usize = 8;

/// Decoded monitor status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtcStatus {
    /// Malfunction indicator lamp ("check engine") is lit
    pub mil_on: bool,
    /// Number of stored trouble codes
    pub dtc_count: u8,
    /// Continuous monitor tests (byte B): 2-bit fields, bit 0 = test
    /// available, bit 1 = test incomplete
    pub continuous_tests: [u8; 3],
    /// Non-continuous monitor tests (bytes C/D): 2-bit fields, bit 0 =
    /// test available, bit 1 = test incomplete
    pub non_continuous_tests: [u8; 7],
    /// EGR system test incomplete flag (byte D, bit 7)
    pub egr_test: u8,
}

impl DtcStatus {
    /// Decompose an 8-hex-character monitor status payload
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        if !raw.is_ascii() {
            return Err(DecodeError::InvalidHex(raw.to_string()));
        }
        if raw.len() < PAYLOAD_LEN {
            return Err(DecodeError::TruncatedPayload {
                expected: PAYLOAD_LEN,
                actual: raw.len(),
            });
        }

        let a = hex_to_int(&raw[0..2])? as u8;
        let b = hex_to_int(&raw[2..4])? as u8;
        let c = hex_to_int(&raw[4..6])? as u8;
        let d = hex_to_int(&raw[6..8])? as u8;

        let mil_on = a & 0x80 != 0;
        let dtc_count = a & 0x7F;

        let mut continuous_tests = [0u8; 3];
        for (i, field) in continuous_tests.iter_mut().enumerate() {
            *field = (b >> i & 0x01) + (b >> (3 + i) & 0x02);
        }

        let mut non_continuous_tests = [0u8; 7];
        for (i, field) in non_continuous_tests.iter_mut().enumerate() {
            *field = (c >> i & 0x01) + ((d >> i & 0x01) << 1);
        }

        Ok(Self {
            mil_on,
            dtc_count,
            continuous_tests,
            non_continuous_tests,
            egr_test: d >> 7 & 0x01,
        })
    }
}
