//! OBD-II Sensor Engine
//!
//! Holds the ordered registry of sensor definitions, tracks per-session
//! readings with lifetime min/max, classifies values against safe operating
//! limits, and runs the coolant-proxy oil warm-up readiness state machine
//! for vehicles without an oil temperature PID.

mod definition;
mod error;
mod instance;
mod readiness;
mod registry;
mod session;

pub use definition::{Classification, Limits, SensorDefinition, SensorKind};
pub use error::{EngineError, RegistryError};
pub use instance::SensorInstance;
pub use readiness::{ReadinessConfig, ReadinessState, WarmupPhase};
pub use registry::Registry;
pub use session::{PollOutcome, RawSource, Session};
