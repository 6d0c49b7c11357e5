//! Oil Warm-up Readiness State Machine
//!
//! Oil warms up slower than coolant. On vehicles with no oil temperature
//! PID, the coolant sensor acts as a proxy: once coolant has held at or
//! above its lower safe limit for the warm-up delay, the oil is inferred
//! ready. A drop back below the limit (minus a tolerance, e.g. after the
//! engine is switched off) restarts the countdown.
//!
//! Time is injected by the caller on every update so the machine stays
//! deterministic under test.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Warm-up timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadinessConfig {
    /// Seconds the value must hold at or above the lower safe limit
    /// before the oil is inferred warm (default: 5 minutes)
    pub warmup_delay_secs: u64,
    /// How far below the lower safe limit the value must drop before the
    /// countdown resets
    pub drop_tolerance: f64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            warmup_delay_secs: 300,
            drop_tolerance: 4.0,
        }
    }
}

/// Observable phase of the warm-up machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarmupPhase {
    /// Value has not yet reached the lower safe limit
    Cold,
    /// At temperature, countdown running
    Warming,
    /// Countdown elapsed while at temperature
    Ready,
}

/// Warm-up tracking state for one readiness sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessState {
    config: ReadinessConfig,
    reached_op_temp: bool,
    ready: bool,
    /// When the value last rose to operating temperature (unix seconds);
    /// `None` until it does
    reached_at: Option<u64>,
}

impl ReadinessState {
    /// Create a fresh (cold) state
    pub fn new(config: ReadinessConfig) -> Self {
        Self {
            config,
            reached_op_temp: false,
            ready: false,
            reached_at: None,
        }
    }

    /// Feed one reading through the machine. Checks run in a fixed order
    /// (rise, drop, ready), each seeing the state left by the previous one.
    pub fn observe(&mut self, value: f64, lower_safe: f64, now: u64) {
        if !self.reached_op_temp && value >= lower_safe {
            self.reached_op_temp = true;
            self.reached_at = Some(now);
            debug!(value, now, "reached operating temperature, warm-up countdown started");
        }

        if self.reached_op_temp && value < lower_safe - self.config.drop_tolerance {
            // Normally only happens after the engine is switched off
            self.reached_op_temp = false;
            self.ready = false;
            self.reached_at = None;
            warn!(value, lower_safe, "temperature dropped, warm-up countdown reset");
        }

        if let Some(reached_at) = self.reached_at {
            if self.reached_op_temp && now >= reached_at + self.config.warmup_delay_secs {
                if !self.ready {
                    debug!(now, "warm-up delay elapsed, oil inferred ready");
                }
                self.ready = true;
            }
        }
    }

    /// Current phase
    pub fn phase(&self) -> WarmupPhase {
        if !self.reached_op_temp {
            WarmupPhase::Cold
        } else if self.ready {
            WarmupPhase::Ready
        } else {
            WarmupPhase::Warming
        }
    }

    /// Seconds left on the countdown; `None` unless warming
    pub fn remaining_secs(&self, now: u64) -> Option<u64> {
        match (self.phase(), self.reached_at) {
            (WarmupPhase::Warming, Some(reached_at)) => {
                Some((reached_at + self.config.warmup_delay_secs).saturating_sub(now))
            }
            _ => None,
        }
    }

    /// Whether the warm-up countdown has completed
    pub fn is_ready(&self) -> bool {
        self.ready
    }
}
