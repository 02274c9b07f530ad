//! `tunmon-telemetry` - simulated tunnel-monitoring telemetry core.
//!
//! Owns the two collections the dashboard views read (sensor records and a
//! bounded alert log), mutates them on fixed cadences with bounded random
//! drift, and derives every sensor status from a pure threshold classifier.
//! Nothing here touches real hardware; all values are drawn from a seedable
//! RNG so runs can be reproduced exactly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod alert;
pub mod classify;
pub mod clock;
pub mod config;
pub mod error;
pub mod metrics;
pub mod runner;
pub mod sensor;
pub mod simulator;

pub use error::TelemetryError;
pub use simulator::{Simulator, TelemetrySnapshot};
