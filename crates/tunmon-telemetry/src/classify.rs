//! Threshold-based status classification.
//!
//! The classifier is the only source of sensor status: refreshes feed every
//! new value through [`StatusClassifier::classify`], so status can never
//! drift away from the measured value.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::TelemetryError;
use crate::sensor::{SensorKind, SensorStatus};

/// Which end of the scale is dangerous for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Large values escalate (displacement, strain, pressure, temperature,
    /// tilt).
    HighIsBad,
    /// Small values escalate (hydraulic ram load dropping away).
    LowIsBad,
}

impl SensorKind {
    /// Escalation direction for this kind.
    #[must_use]
    pub fn direction(self) -> Direction {
        match self {
            SensorKind::Hydraulic => Direction::LowIsBad,
            _ => Direction::HighIsBad,
        }
    }
}

/// Warning and critical thresholds for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdSpec {
    /// Boundary between normal and warning.
    pub warning: f64,
    /// Boundary between warning and critical.
    pub critical: f64,
}

/// Pure `(kind, value) -> status` mapping over a validated threshold table.
#[derive(Debug, Clone)]
pub struct StatusClassifier {
    table: IndexMap<SensorKind, ThresholdSpec>,
}

impl StatusClassifier {
    /// Build a classifier from a complete table, validating every entry.
    pub fn new(
        table: IndexMap<SensorKind, ThresholdSpec>,
    ) -> Result<Self, TelemetryError> {
        for kind in SensorKind::ALL {
            let Some(spec) = table.get(&kind) else {
                return Err(TelemetryError::InvalidThresholds {
                    kind,
                    reason: "no thresholds declared".into(),
                });
            };
            if !spec.warning.is_finite() || !spec.critical.is_finite() {
                return Err(TelemetryError::InvalidThresholds {
                    kind,
                    reason: "thresholds must be finite".into(),
                });
            }
            let ordered = match kind.direction() {
                Direction::HighIsBad => spec.warning < spec.critical,
                Direction::LowIsBad => spec.warning > spec.critical,
            };
            if !ordered {
                return Err(TelemetryError::InvalidThresholds {
                    kind,
                    reason: "warning threshold must be less severe than critical".into(),
                });
            }
        }
        Ok(Self { table })
    }

    /// The default table with configured overrides applied on top.
    pub fn with_overrides(
        overrides: &IndexMap<SensorKind, ThresholdSpec>,
    ) -> Result<Self, TelemetryError> {
        let mut table = default_table();
        for (kind, spec) in overrides {
            table.insert(*kind, *spec);
        }
        Self::new(table)
    }

    /// The stock tunnel-monitoring thresholds.
    #[must_use]
    pub fn tunnel_default() -> Self {
        Self {
            table: default_table(),
        }
    }

    /// Map a value to its severity. Pure: identical inputs always yield
    /// identical output.
    #[must_use]
    pub fn classify(&self, kind: SensorKind, value: f64) -> SensorStatus {
        let spec = self.table[&kind];
        match kind.direction() {
            Direction::HighIsBad => {
                if value > spec.critical {
                    SensorStatus::Critical
                } else if value > spec.warning {
                    SensorStatus::Warning
                } else {
                    SensorStatus::Normal
                }
            }
            Direction::LowIsBad => {
                if value < spec.critical {
                    SensorStatus::Critical
                } else if value < spec.warning {
                    SensorStatus::Warning
                } else {
                    SensorStatus::Normal
                }
            }
        }
    }

    /// Thresholds in effect for a kind.
    #[must_use]
    pub fn spec(&self, kind: SensorKind) -> ThresholdSpec {
        self.table[&kind]
    }
}

fn default_table() -> IndexMap<SensorKind, ThresholdSpec> {
    IndexMap::from([
        (
            SensorKind::Displacement,
            ThresholdSpec {
                warning: 3.5,
                critical: 4.5,
            },
        ),
        (
            SensorKind::Strain,
            ThresholdSpec {
                warning: 400.0,
                critical: 450.0,
            },
        ),
        (
            SensorKind::Pressure,
            ThresholdSpec {
                warning: 85.0,
                critical: 95.0,
            },
        ),
        (
            SensorKind::Temperature,
            ThresholdSpec {
                warning: 32.0,
                critical: 34.0,
            },
        ),
        (
            SensorKind::Tilt,
            ThresholdSpec {
                warning: 0.35,
                critical: 0.5,
            },
        ),
        (
            SensorKind::Hydraulic,
            ThresholdSpec {
                warning: 62.0,
                critical: 55.0,
            },
        ),
    ])
}
