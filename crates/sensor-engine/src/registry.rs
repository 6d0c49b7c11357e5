//! Sensor Registry
//!
//! The ordered table of every sensor the dashboard knows about. Ordering is
//! significant: it defines the default display order, and the enabled-only
//! view preserves it.

use crate::definition::{Limits, SensorDefinition, SensorKind};
use crate::error::RegistryError;
use obd_decode::Decoder;
use std::collections::HashSet;
use tracing::info;

/// Immutable, ordered collection of sensor definitions, validated at
/// construction
#[derive(Debug, Clone)]
pub struct Registry {
    definitions: Vec<SensorDefinition>,
}

impl Registry {
    /// Build a registry from a definition list, validating that short ids
    /// are unique and command codes are well-formed mode-01 queries
    pub fn new(definitions: Vec<SensorDefinition>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for def in &definitions {
            if !seen.insert(def.short_id) {
                return Err(RegistryError::DuplicateShortId(def.short_id.to_string()));
            }
            if let Some(command) = def.command {
                if !is_valid_command(command) {
                    return Err(RegistryError::MalformedCommand {
                        short_id: def.short_id.to_string(),
                        command: command.to_string(),
                    });
                }
            }
        }

        info!(sensors = definitions.len(), "sensor registry built");
        Ok(Self { definitions })
    }

    /// Build the standard mode-01 sensor table
    pub fn standard() -> Result<Self, RegistryError> {
        Self::new(standard_definitions())
    }

    /// All definitions, in display order
    pub fn definitions(&self) -> &[SensorDefinition] {
        &self.definitions
    }

    /// Only the enabled definitions, preserving display order
    pub fn enabled(&self) -> impl Iterator<Item = &SensorDefinition> {
        self.definitions.iter().filter(|d| d.enabled)
    }

    /// Look up a definition by short id
    pub fn get(&self, short_id: &str) -> Option<&SensorDefinition> {
        self.definitions.iter().find(|d| d.short_id == short_id)
    }
}

/// Mode-01 commands are 4-5 hex characters with the "01" mode prefix
/// (a trailing digit requests a fixed frame count from the adapter)
fn is_valid_command(command: &str) -> bool {
    (4..=5).contains(&command.len())
        && command.starts_with("01")
        && command.bytes().all(|b| b.is_ascii_hexdigit())
}

fn plain(
    short_id: &'static str,
    name: &'static str,
    command: &'static str,
    decoder: Decoder,
    unit: &'static str,
    enabled: bool,
) -> SensorDefinition {
    SensorDefinition {
        short_id,
        name,
        command: Some(command),
        decoder,
        unit,
        enabled,
        kind: SensorKind::Plain,
    }
}

#[allow(clippy::too_many_arguments)]
fn limited(
    short_id: &'static str,
    name: &'static str,
    command: &'static str,
    decoder: Decoder,
    unit: &'static str,
    limits: Limits,
    enabled: bool,
) -> SensorDefinition {
    SensorDefinition {
        short_id,
        name,
        command: Some(command),
        decoder,
        unit,
        enabled,
        kind: SensorKind::Limited(limits),
    }
}

/// The standard table. Ordering matters.
fn standard_definitions() -> Vec<SensorDefinition> {
    use Decoder::*;

    vec![
        plain("pids", "Supported PIDs", "0100", BitString, "", true),
        plain("dtc_status", "S-S DTC Cleared", "0101", DtcStatus, "", false),
        plain("dtc_ff", "DTC C-F-F", "0102", Passthrough, "", false),
        plain("fuel_status", "Fuel System Stat", "0103", Passthrough, "", false),
        plain("load", "Calc Load Value", "01041", PercentScale, "", true),
        // 90C is optimal coolant temperature
        SensorDefinition {
            short_id: "temp",
            name: "Coolant Temp",
            command: Some("0105"),
            decoder: TemperatureCelsius,
            unit: "C",
            enabled: true,
            kind: SensorKind::CoolantProxy(Limits {
                min: 0.0,
                max: 140.0,
                lower_safe: 88.0,
                upper_safe: 99.0,
            }),
        },
        plain("short_term_fuel_trim_1", "S-T Fuel Trim", "0106", FuelTrimPercent, "%", false),
        plain("long_term_fuel_trim_1", "L-T Fuel Trim", "0107", FuelTrimPercent, "%", false),
        plain("short_term_fuel_trim_2", "S-T Fuel Trim", "0108", FuelTrimPercent, "%", false),
        plain("long_term_fuel_trim_2", "L-T Fuel Trim", "0109", FuelTrimPercent, "%", false),
        plain("fuel_pressure", "FuelRail Pressure", "010A", Passthrough, "", false),
        plain("manifold_pressure", "Intk Manifold", "010B", ManifoldPressure, "psi", true),
        // 5k RPM is redline
        limited(
            "rpm",
            "Engine RPM",
            "010C1",
            EngineRpm,
            "",
            Limits {
                min: 0.0,
                max: 5500.0,
                lower_safe: 1000.0,
                upper_safe: 4650.0,
            },
            true,
        ),
        limited(
            "speed",
            "Vehicle Speed",
            "010D1",
            VehicleSpeed,
            "MPH",
            Limits {
                min: 0.0,
                max: 160.0,
                lower_safe: 0.0,
                upper_safe: 70.0,
            },
            true,
        ),
        plain("timing_advance", "Timing Advance", "010E", TimingAdvance, "degrees", false),
        plain("intake_air_temp", "Intake Air Temp", "010F", TemperatureCelsius, "C", false),
        plain("maf", "AirFlow Rate(MAF)", "0110", MassAirflow, "lb/min", true),
        plain("throttle_pos", "Throttle Position", "01111", PercentScale, "%", false),
        plain("secondary_air_status", "2nd Air Status", "0112", Passthrough, "", false),
        plain("o2_sensor_positions", "Loc of O2 sensors", "0113", Passthrough, "", false),
        plain("o211", "O2 Sensor: 1 - 1", "0114", FuelTrimPercent, "%", false),
        plain("o212", "O2 Sensor: 1 - 2", "0115", FuelTrimPercent, "%", false),
        plain("o213", "O2 Sensor: 1 - 3", "0116", FuelTrimPercent, "%", false),
        plain("o214", "O2 Sensor: 1 - 4", "0117", FuelTrimPercent, "%", false),
        plain("o221", "O2 Sensor: 2 - 1", "0118", FuelTrimPercent, "%", false),
        plain("o222", "O2 Sensor: 2 - 2", "0119", FuelTrimPercent, "%", false),
        plain("o223", "O2 Sensor: 2 - 3", "011A", FuelTrimPercent, "%", false),
        plain("o224", "O2 Sensor: 2 - 4", "011B", FuelTrimPercent, "%", false),
        plain("obd_standard", "OBD Designation", "011C", Passthrough, "", false),
        plain("o2_sensor_position_b", "Loc of O2 sensor", "011D", Passthrough, "", false),
        plain("aux_input", "Aux input status", "011E", Passthrough, "", false),
        plain("engine_time", "Engine Start MIN", "011F", SecondsToMinutes, "min", true),
        plain("engine_mil_time", "Engine Run MIL", "014D", SecondsToMinutes, "min", false),
    ]
}
