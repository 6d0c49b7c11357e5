//! Sensor Definitions and Classification

use obd_decode::Decoder;
use serde::{Deserialize, Serialize};

/// Display range and safe operating limits for a sensor.
///
/// `min`/`max` bound the expected value range (gauge scaling); the safe
/// limits are the thresholds used for classification. A value outside
/// `[lower_safe, upper_safe]` is flagged, not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    /// Lowest expected value (display scaling)
    pub min: f64,
    /// Highest expected value (display scaling)
    pub max: f64,
    /// Lower bound of the safe operating range
    pub lower_safe: f64,
    /// Upper bound of the safe operating range
    pub upper_safe: f64,
}

impl Limits {
    /// Classify a value against the safe operating range
    pub fn classify(&self, value: f64) -> Classification {
        if value >= self.lower_safe && value <= self.upper_safe {
            Classification::Safe
        } else if value > self.upper_safe {
            Classification::TooHigh
        } else {
            Classification::TooLow
        }
    }
}

/// Safety classification of a reading, consumed by the display layer for
/// gauge colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Within the safe operating range (green)
    Safe,
    /// Above the upper safe limit (red)
    TooHigh,
    /// Below the lower safe limit (yellow)
    TooLow,
    /// Within range but the warm-up countdown has not elapsed (amber)
    Warming,
}

/// Variant of sensor behaviour layered on the base reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SensorKind {
    /// Value and min/max tracking only
    Plain,
    /// Adds classification against safe limits
    Limited(Limits),
    /// Adds the oil warm-up readiness state machine on top of limits.
    /// Used for coolant temperature as a proxy when the vehicle exposes
    /// no oil temperature PID.
    CoolantProxy(Limits),
}

impl SensorKind {
    /// Safe limits, for the kinds that carry them
    pub fn limits(&self) -> Option<&Limits> {
        match self {
            SensorKind::Plain => None,
            SensorKind::Limited(limits) | SensorKind::CoolantProxy(limits) => Some(limits),
        }
    }
}

/// Immutable definition of one sensor, built once at registry construction.
/// Registry order defines the default display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorDefinition {
    /// Unique key, stable across the registry
    pub short_id: &'static str,
    /// Human-readable display name
    pub name: &'static str,
    /// Mode-01 query string; `None` for debug-only placeholders
    pub command: Option<&'static str>,
    /// Decoding formula for raw responses
    pub decoder: Decoder,
    /// Unit label appended verbatim to the formatted value
    pub unit: &'static str,
    /// Whether the sensor is eligible for display
    pub enabled: bool,
    /// Behaviour variant
    pub kind: SensorKind,
}
