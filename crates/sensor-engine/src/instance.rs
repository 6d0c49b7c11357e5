//! Per-session Sensor State

use crate::definition::{Classification, SensorDefinition, SensorKind};
use crate::readiness::{ReadinessConfig, ReadinessState, WarmupPhase};
use obd_decode::{DecodeError, DecodedValue};

/// Mutable state for one sensor during a connection session.
///
/// Created at connection time, dropped at disconnect. All mutation happens
/// inside [`update`](Self::update) under `&mut self`, so a reader always
/// observes a complete state, never a half-applied update.
#[derive(Debug, Clone)]
pub struct SensorInstance {
    definition: SensorDefinition,
    value: DecodedValue,
    min_recorded: f64,
    max_recorded: f64,
    readiness: Option<ReadinessState>,
}

impl SensorInstance {
    /// Create a fresh instance for a definition
    pub fn new(definition: SensorDefinition) -> Self {
        let readiness = match definition.kind {
            SensorKind::CoolantProxy(_) => {
                Some(ReadinessState::new(ReadinessConfig::default()))
            }
            _ => None,
        };
        Self {
            definition,
            value: DecodedValue::Float(0.0),
            min_recorded: f64::INFINITY,
            max_recorded: f64::NEG_INFINITY,
            readiness,
        }
    }

    /// The definition this instance tracks
    pub fn definition(&self) -> &SensorDefinition {
        &self.definition
    }

    /// Latest decoded value
    pub fn value(&self) -> &DecodedValue {
        &self.value
    }

    /// Lowest value observed this session (+inf before the first update)
    pub fn min_recorded(&self) -> f64 {
        self.min_recorded
    }

    /// Highest value observed this session (-inf before the first update)
    pub fn max_recorded(&self) -> f64 {
        self.max_recorded
    }

    /// Warm-up state, for readiness sensors
    pub fn readiness(&self) -> Option<&ReadinessState> {
        self.readiness.as_ref()
    }

    /// Apply a raw response. On decode failure nothing changes and the
    /// previous value is retained; the error is returned for the caller
    /// to handle.
    pub fn update(&mut self, raw: &str, now: u64) -> Result<(), DecodeError> {
        let value = self.definition.decoder.decode(raw)?;

        if let Some(v) = value.as_f64() {
            if v < self.min_recorded {
                self.min_recorded = v;
            }
            if v > self.max_recorded {
                self.max_recorded = v;
            }
            if let (Some(readiness), Some(limits)) =
                (self.readiness.as_mut(), self.definition.kind.limits())
            {
                readiness.observe(v, limits.lower_safe, now);
            }
        }

        self.value = value;
        Ok(())
    }

    /// Safety classification of the current value; `None` for sensors
    /// without limits or with non-numeric values
    pub fn classification(&self) -> Option<Classification> {
        let limits = self.definition.kind.limits()?;
        let v = self.value.as_f64()?;

        match &self.readiness {
            None => Some(limits.classify(v)),
            Some(readiness) => {
                // Readiness layers an amber "warming" band over the base
                // rule; overheating wins regardless of readiness.
                if readiness.is_ready() && v <= limits.upper_safe {
                    Some(Classification::Safe)
                } else if v > limits.upper_safe {
                    Some(Classification::TooHigh)
                } else if !readiness.is_ready()
                    && v >= limits.lower_safe
                    && v <= limits.upper_safe
                {
                    Some(Classification::Warming)
                } else {
                    Some(Classification::TooLow)
                }
            }
        }
    }

    /// Render the current value for display: two decimals for fractional
    /// values, none for integral ones, unit appended verbatim. Readiness
    /// sensors append the oil warm-up indicator. Debug placeholders
    /// without a command render as "NULL".
    pub fn formatted_value(&self, now: u64) -> String {
        if self.definition.command.is_none() {
            return "NULL".to_string();
        }

        let mut formatted = match &self.value {
            DecodedValue::Float(v) => format!("{:.2}", v),
            DecodedValue::Int(v) => v.to_string(),
            DecodedValue::Text(s) => s.clone(),
        };
        formatted.push_str(self.definition.unit);

        if let Some(readiness) = &self.readiness {
            formatted.push_str("\nOIL:");
            match readiness.phase() {
                WarmupPhase::Ready => formatted.push_str("OK"),
                WarmupPhase::Warming => {
                    let left = readiness.remaining_secs(now).unwrap_or(0);
                    formatted.push_str(&format!("{}s", left));
                }
                WarmupPhase::Cold => formatted.push_str("WAIT"),
            }
        }

        formatted
    }
}
