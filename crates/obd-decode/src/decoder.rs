//! PID Decoding Formulas
//!
//! Each [`Decoder`] kind maps a raw hexadecimal payload to a physical value.
//! Whether a kind yields fractional or integral output is fixed here, not
//! inspected at display time; formatting (two-decimal rounding) is the
//! display layer's job.

use crate::error::DecodeError;
use serde::{Deserialize, Serialize};

/// A decoded sensor value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DecodedValue {
    /// Fractional physical quantity
    Float(f64),
    /// Integral physical quantity
    Int(i64),
    /// Opaque payload (bitstrings, passthrough placeholders)
    Text(String),
}

impl DecodedValue {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DecodedValue::Float(v) => Some(*v),
            DecodedValue::Int(v) => Some(*v as f64),
            DecodedValue::Text(_) => None,
        }
    }
}

/// Decoding formula bound to a sensor definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decoder {
    /// Mass air flow: `x * 0.00132276` (lb/min)
    MassAirflow,
    /// Percentage of full scale: `x * 100 / 255` (throttle, engine load)
    PercentScale,
    /// Intake manifold absolute pressure: `x / 0.14504` (psi)
    ManifoldPressure,
    /// Engine RPM: `x / 4`
    EngineRpm,
    /// Vehicle speed: `x / 1.609` (MPH)
    VehicleSpeed,
    /// Ignition timing advance: `(x - 128) / 2` (degrees)
    TimingAdvance,
    /// Elapsed engine time: `x / 60` (minutes)
    SecondsToMinutes,
    /// Temperature: `x - 40` (°C)
    TemperatureCelsius,
    /// Fuel trim: `(x - 128) * 100 / 128` (%), integer arithmetic.
    /// The original formula truncates rather than scaling in floating
    /// point; kept verbatim for compatibility.
    FuelTrimPercent,
    /// Raw payload returned unchanged (PIDs without a decoding formula yet)
    Passthrough,
    /// Supported-PID bitmap: each hex digit expands to four '0'/'1'
    /// characters, most significant bit first
    BitString,
    /// Mode-01 PID 01 monitor status. Decodes to the placeholder `"#"`;
    /// the bit-level breakdown lives in [`crate::DtcStatus`] and has no
    /// display consumer yet.
    DtcStatus,
}

impl Decoder {
    /// Decode a raw hexadecimal payload to a physical value
    pub fn decode(&self, raw: &str) -> Result<DecodedValue, DecodeError> {
        match self {
            Decoder::MassAirflow => Ok(DecodedValue::Float(hex_to_int(raw)? as f64 * 0.00132276)),
            Decoder::PercentScale => {
                Ok(DecodedValue::Float(hex_to_int(raw)? as f64 * 100.0 / 255.0))
            }
            Decoder::ManifoldPressure => {
                Ok(DecodedValue::Float(hex_to_int(raw)? as f64 / 0.14504))
            }
            Decoder::EngineRpm => Ok(DecodedValue::Int(hex_to_int(raw)? / 4)),
            Decoder::VehicleSpeed => Ok(DecodedValue::Float(hex_to_int(raw)? as f64 / 1.609)),
            Decoder::TimingAdvance => {
                Ok(DecodedValue::Float((hex_to_int(raw)? - 128) as f64 / 2.0))
            }
            Decoder::SecondsToMinutes => Ok(DecodedValue::Int(hex_to_int(raw)? / 60)),
            Decoder::TemperatureCelsius => Ok(DecodedValue::Int(hex_to_int(raw)? - 40)),
            Decoder::FuelTrimPercent => {
                Ok(DecodedValue::Int((hex_to_int(raw)? - 128) * 100 / 128))
            }
            Decoder::Passthrough => Ok(DecodedValue::Text(raw.to_string())),
            Decoder::BitString => Ok(DecodedValue::Text(hex_to_bitstring(raw)?)),
            Decoder::DtcStatus => {
                // Validate the payload shape even though the breakdown is
                // not surfaced (see DtcStatus docs).
                crate::dtc::DtcStatus::decode(raw)?;
                Ok(DecodedValue::Text("#".to_string()))
            }
        }
    }

    /// Whether this decoder yields fractional output (two-decimal display)
    pub fn is_fractional(&self) -> bool {
        matches!(
            self,
            Decoder::MassAirflow
                | Decoder::PercentScale
                | Decoder::ManifoldPressure
                | Decoder::VehicleSpeed
                | Decoder::TimingAdvance
        )
    }
}

/// Parse a hex payload to its integer value
pub(crate) fn hex_to_int(raw: &str) -> Result<i64, DecodeError> {
    // from_str_radix would accept a leading sign; a payload is digits only
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(DecodeError::InvalidHex(raw.to_string()));
    }
    i64::from_str_radix(raw, 16).map_err(|_| DecodeError::InvalidHex(raw.to_string()))
}

/// Expand each hex digit to its 4-bit binary representation, MSB first
fn hex_to_bitstring(raw: &str) -> Result<String, DecodeError> {
    if raw.is_empty() {
        return Err(DecodeError::InvalidHex(raw.to_string()));
    }
    let mut bits = String::with_capacity(raw.len() * 4);
    for c in raw.chars() {
        let v = c
            .to_digit(16)
            .ok_or_else(|| DecodeError::InvalidHex(raw.to_string()))?;
        for shift in (0..4).rev() {
            bits.push(if v >> shift & 1 == 1 { '1' } else { '0' });
        }
    }
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_f64(decoder: Decoder, raw: &str) -> f64 {
        match decoder.decode(raw).unwrap() {
            DecodedValue::Float(v) => v,
            other => panic!("expected float, got {:?}", other),
        }
    }

    fn decode_i64(decoder: Decoder, raw: &str) -> i64 {
        match decoder.decode(raw).unwrap() {
            DecodedValue::Int(v) => v,
            other => panic!("expected int, got {:?}", other),
        }
    }

    #[test]
    fn test_maf_decode() {
        // 0x1A2B = 6699, so 6699 * 0.00132276 = 8.86117...
        assert!((decode_f64(Decoder::MassAirflow, "1A2B") - 8.86117).abs() < 1e-4);
    }

    #[test]
    fn test_percent_scale_decode() {
        assert!((decode_f64(Decoder::PercentScale, "FF") - 100.0).abs() < 1e-9);
        assert!((decode_f64(Decoder::PercentScale, "00") - 0.0).abs() < 1e-9);
        // 0x80 = 128, 128 * 100 / 255 = 50.196...
        assert!((decode_f64(Decoder::PercentScale, "80") - 50.19607).abs() < 1e-4);
    }

    #[test]
    fn test_manifold_pressure_decode() {
        // 0x64 = 100 kPa-ish raw, 100 / 0.14504 = 689.46...
        assert!((decode_f64(Decoder::ManifoldPressure, "64") - 689.4649).abs() < 1e-3);
    }

    #[test]
    fn test_rpm_decode_is_integral() {
        // 0x1A2B = 6699, 6699 / 4 = 1674 (integer division)
        assert_eq!(decode_i64(Decoder::EngineRpm, "1A2B"), 1674);
    }

    #[test]
    fn test_speed_decode() {
        // 0x55 = 85 km/h, 85 / 1.609 = 52.82 MPH
        assert!((decode_f64(Decoder::VehicleSpeed, "55") - 52.8278).abs() < 1e-3);
    }

    #[test]
    fn test_timing_advance_decode() {
        assert!((decode_f64(Decoder::TimingAdvance, "80") - 0.0).abs() < 1e-9);
        assert!((decode_f64(Decoder::TimingAdvance, "90") - 8.0).abs() < 1e-9);
        assert!((decode_f64(Decoder::TimingAdvance, "00") + 64.0).abs() < 1e-9);
    }

    #[test]
    fn test_seconds_to_minutes_decode() {
        // 0x012C = 300 s = 5 min; 0x0077 = 119 s = 1 min (truncated)
        assert_eq!(decode_i64(Decoder::SecondsToMinutes, "012C"), 5);
        assert_eq!(decode_i64(Decoder::SecondsToMinutes, "0077"), 1);
    }

    #[test]
    fn test_temperature_decode() {
        // 0x73 = 115, so temp = 115 - 40 = 75°C
        assert_eq!(decode_i64(Decoder::TemperatureCelsius, "73"), 75);
        assert_eq!(decode_i64(Decoder::TemperatureCelsius, "00"), -40);
    }

    #[test]
    fn test_fuel_trim_truncation() {
        // Integer arithmetic, kept exactly as the original formula
        assert_eq!(decode_i64(Decoder::FuelTrimPercent, "80"), 0);
        assert_eq!(decode_i64(Decoder::FuelTrimPercent, "00"), -100);
        assert_eq!(decode_i64(Decoder::FuelTrimPercent, "FF"), 99);
        // 0x90 = 144, (144-128)*100/128 = 1600/128 = 12 (truncated, not 12.5)
        assert_eq!(decode_i64(Decoder::FuelTrimPercent, "90"), 12);
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(
            Decoder::Passthrough.decode("BEEF").unwrap(),
            DecodedValue::Text("BEEF".to_string())
        );
    }

    #[test]
    fn test_bitstring_decode() {
        assert_eq!(
            Decoder::BitString.decode("8A").unwrap(),
            DecodedValue::Text("10001010".to_string())
        );
        assert_eq!(
            Decoder::BitString.decode("BE1FA813").unwrap(),
            DecodedValue::Text("10111110000111111010100000010011".to_string())
        );
    }

    #[test]
    fn test_dtc_status_placeholder() {
        assert_eq!(
            Decoder::DtcStatus.decode("8107FF00").unwrap(),
            DecodedValue::Text("#".to_string())
        );
    }

    #[test]
    fn test_invalid_hex_rejected() {
        assert_eq!(
            Decoder::EngineRpm.decode("ZZ"),
            Err(DecodeError::InvalidHex("ZZ".to_string()))
        );
        assert_eq!(
            Decoder::EngineRpm.decode(""),
            Err(DecodeError::InvalidHex(String::new()))
        );
        assert!(Decoder::BitString.decode("8G").is_err());
    }

    #[test]
    fn test_no_rounding_in_decoder() {
        // Decoders return full precision; rounding happens at format time
        let v = decode_f64(Decoder::VehicleSpeed, "01");
        assert!((v - 0.6215040397762586).abs() < 1e-12);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn fuel_trim_stays_bounded(x in 0u8..=255) {
                let v = decode_i64(Decoder::FuelTrimPercent, &format!("{:02X}", x));
                prop_assert!((-100..=99).contains(&v));
            }

            #[test]
            fn decode_never_panics_on_garbage(raw in "[ -~]{0,12}") {
                let _ = Decoder::EngineRpm.decode(&raw);
                let _ = Decoder::BitString.decode(&raw);
                let _ = Decoder::DtcStatus.decode(&raw);
            }

            #[test]
            fn bitstring_expands_four_bits_per_digit(raw in "[0-9A-F]{1,8}") {
                match Decoder::BitString.decode(&raw).unwrap() {
                    DecodedValue::Text(bits) => prop_assert_eq!(bits.len(), raw.len() * 4),
                    other => prop_assert!(false, "expected text, got {:?}", other),
                }
            }
        }
    }
}
