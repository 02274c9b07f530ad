//! Simulator configuration loading.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use smol_str::SmolStr;

use crate::alert::default_message_pool;
use crate::classify::ThresholdSpec;
use crate::clock::SimTime;
use crate::error::TelemetryError;
use crate::sensor::SensorKind;

/// Simulator configuration.
///
/// Defaults match the mock dashboard: 128 sensors refreshed every 5 s, a new
/// alert every 30 s, 50 retained alerts, one scheduling tick per second.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Number of sensors seeded at startup.
    pub sensor_count: usize,
    /// Base scheduling tick, milliseconds.
    pub tick_interval_ms: u64,
    /// Sensor refresh cadence, milliseconds.
    pub sensor_interval_ms: u64,
    /// Alert generation cadence, milliseconds.
    pub alert_interval_ms: u64,
    /// Maximum retained alerts.
    pub alert_cap: usize,
    /// Alerts seeded into the backlog at startup.
    pub alert_backlog: usize,
    /// Per-sensor probability that a refresh pass touches it.
    pub refresh_probability: f64,
    /// Probability that a seeded sensor starts online.
    pub online_probability: f64,
    /// Relative drift bound per refresh (0.1 = plus/minus 10%).
    pub drift_fraction: f64,
    /// RNG seed; omit for an OS-seeded run.
    pub seed: Option<u64>,
    /// Default log filter for the CLI.
    pub log_level: SmolStr,
    /// Per-kind threshold overrides applied over the stock table.
    pub thresholds: IndexMap<SensorKind, ThresholdSpec>,
    /// Alert message pool.
    pub messages: Vec<SmolStr>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            sensor_count: 128,
            tick_interval_ms: 1_000,
            sensor_interval_ms: 5_000,
            alert_interval_ms: 30_000,
            alert_cap: 50,
            alert_backlog: 15,
            refresh_probability: 0.90,
            online_probability: 0.98,
            drift_fraction: 0.10,
            seed: None,
            log_level: "info".into(),
            thresholds: IndexMap::new(),
            messages: default_message_pool(),
        }
    }
}

impl SimConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, TelemetryError> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            TelemetryError::ConfigRead(format!("{}: {err}", path.display()).into())
        })?;
        let config: SimConfig = toml::from_str(&text)
            .map_err(|err| TelemetryError::InvalidConfig(err.to_string().into()))?;
        config.validate()?;
        Ok(config)
    }

    /// Fail fast on degenerate values.
    pub fn validate(&self) -> Result<(), TelemetryError> {
        if self.sensor_count == 0 {
            return Err(TelemetryError::ZeroSensorCount);
        }
        if self.alert_cap == 0 {
            return Err(TelemetryError::ZeroAlertCap);
        }
        if self.messages.is_empty() {
            return Err(TelemetryError::EmptyMessagePool);
        }
        for (name, value) in [
            ("tick_interval_ms", self.tick_interval_ms),
            ("sensor_interval_ms", self.sensor_interval_ms),
            ("alert_interval_ms", self.alert_interval_ms),
        ] {
            if value == 0 {
                return Err(TelemetryError::InvalidConfig(
                    format!("{name} must be positive").into(),
                ));
            }
        }
        for (name, value) in [
            ("refresh_probability", self.refresh_probability),
            ("online_probability", self.online_probability),
            ("drift_fraction", self.drift_fraction),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(TelemetryError::ProbabilityRange { name, value });
            }
        }
        Ok(())
    }

    /// Base scheduling tick.
    #[must_use]
    pub fn tick_interval(&self) -> SimTime {
        millis(self.tick_interval_ms)
    }

    /// Sensor refresh cadence.
    #[must_use]
    pub fn sensor_interval(&self) -> SimTime {
        millis(self.sensor_interval_ms)
    }

    /// Alert generation cadence.
    #[must_use]
    pub fn alert_interval(&self) -> SimTime {
        millis(self.alert_interval_ms)
    }
}

fn millis(ms: u64) -> SimTime {
    SimTime::from_millis(i64::try_from(ms).unwrap_or(i64::MAX))
}
