//! Telemetry errors.

#![allow(missing_docs)]

use smol_str::SmolStr;
use thiserror::Error;

use crate::sensor::SensorKind;

/// Errors raised by simulator construction and control.
///
/// Everything here is a precondition violation: once a simulator exists, its
/// tick operations are infallible in-memory mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TelemetryError {
    /// Sensor catalog declares no types.
    #[error("sensor catalog has no types")]
    EmptyTypeCatalog,

    /// Sensor catalog declares no positions.
    #[error("sensor catalog has no positions")]
    EmptyPositionCatalog,

    /// A type declares an empty or inverted value range.
    #[error("invalid value range for {kind}: [{min}, {max}]")]
    InvalidValueRange { kind: SensorKind, min: f64, max: f64 },

    /// Sensor count must be positive.
    #[error("sensor count must be positive")]
    ZeroSensorCount,

    /// Alert message pool is empty.
    #[error("alert message pool is empty")]
    EmptyMessagePool,

    /// Alert retention cap must be positive.
    #[error("alert cap must be positive")]
    ZeroAlertCap,

    /// A probability parameter is outside [0, 1].
    #[error("probability '{name}' out of range: {value}")]
    ProbabilityRange { name: &'static str, value: f64 },

    /// Threshold table is missing a kind or orders thresholds wrongly.
    #[error("invalid threshold table for {kind}: {reason}")]
    InvalidThresholds { kind: SensorKind, reason: SmolStr },

    /// Configuration value error.
    #[error("invalid config '{0}'")]
    InvalidConfig(SmolStr),

    /// Configuration file could not be read.
    #[error("config read error '{0}'")]
    ConfigRead(SmolStr),

    /// Thread spawn error.
    #[error("thread spawn error '{0}'")]
    ThreadSpawn(SmolStr),

    /// Runner control channel error.
    #[error("runner control error '{0}'")]
    ControlError(SmolStr),
}
