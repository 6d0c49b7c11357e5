//! Connection Session
//!
//! A [`Session`] owns one [`SensorInstance`] per registry definition for the
//! lifetime of a vehicle connection. Polling pulls raw responses from a
//! caller-supplied [`RawSource`] (the serial transport) and feeds them
//! through the instances; the display layer reads formatted values and
//! classifications back out.

use crate::error::EngineError;
use crate::instance::SensorInstance;
use crate::registry::Registry;
use tracing::warn;

/// Source of raw hexadecimal response payloads, implemented by the
/// transport layer
pub trait RawSource {
    /// Query the bus with a mode-01 command and return the response
    /// payload (hex characters after the echoed mode/PID bytes)
    fn query_raw(&mut self, command: &str) -> Result<String, EngineError>;
}

/// Counters from one polling pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollOutcome {
    /// Sensors successfully updated
    pub updated: usize,
    /// Sensors skipped due to transport or decode failure (previous
    /// values retained)
    pub failed: usize,
}

/// Per-connection sensor state, created at connection time and dropped
/// at disconnect
#[derive(Debug)]
pub struct Session {
    instances: Vec<SensorInstance>,
}

impl Session {
    /// Create fresh instances for every definition in the registry,
    /// preserving registry order
    pub fn new(registry: &Registry) -> Self {
        let instances = registry
            .definitions()
            .iter()
            .cloned()
            .map(SensorInstance::new)
            .collect();
        Self { instances }
    }

    /// All instances, in registry order
    pub fn instances(&self) -> &[SensorInstance] {
        &self.instances
    }

    /// Instances whose definitions are enabled, in registry order
    pub fn enabled_instances(&self) -> impl Iterator<Item = &SensorInstance> {
        self.instances.iter().filter(|i| i.definition().enabled)
    }

    /// Look up an instance by short id
    pub fn get(&self, short_id: &str) -> Option<&SensorInstance> {
        self.instances
            .iter()
            .find(|i| i.definition().short_id == short_id)
    }

    /// Mutable lookup, for callers driving updates themselves
    pub fn get_mut(&mut self, short_id: &str) -> Option<&mut SensorInstance> {
        self.instances
            .iter_mut()
            .find(|i| i.definition().short_id == short_id)
    }

    /// Query and update every enabled sensor that carries a command.
    /// A failed query or decode is logged and skipped; the sensor keeps
    /// its previous value.
    pub fn poll_enabled<S: RawSource>(&mut self, source: &mut S, now: u64) -> PollOutcome {
        let mut outcome = PollOutcome::default();

        for instance in &mut self.instances {
            let (enabled, command, short_id) = {
                let def = instance.definition();
                (def.enabled, def.command, def.short_id)
            };
            if !enabled {
                continue;
            }
            let Some(command) = command else {
                continue;
            };

            match source.query_raw(command) {
                Ok(raw) => match instance.update(&raw, now) {
                    Ok(()) => outcome.updated += 1,
                    Err(e) => {
                        warn!(sensor = short_id, error = %e, "decode failed, keeping previous value");
                        outcome.failed += 1;
                    }
                },
                Err(e) => {
                    warn!(sensor = short_id, error = %e, "query failed");
                    outcome.failed += 1;
                }
            }
        }

        outcome
    }
}
