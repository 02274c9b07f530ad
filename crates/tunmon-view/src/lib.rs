//! `tunmon-view` - read-only rendering over telemetry snapshots.
//!
//! Everything here takes a [`tunmon_telemetry::TelemetrySnapshot`] by shared
//! reference and produces text, so rendering cannot mutate the data it
//! displays.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Snapshot rendering into text fragments and JSON.
pub mod render;

pub use render::{alert_list, device_list, metrics_summary, render_json, render_text};
