//! Sensor records and catalogs.

use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::clock::SimTime;
use crate::error::TelemetryError;

/// Measurement kind of a simulated sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    /// Structural displacement, millimetres.
    Displacement,
    /// Strain, microstrain.
    Strain,
    /// Ground pressure, megapascals.
    Pressure,
    /// Ambient temperature, degrees Celsius.
    Temperature,
    /// Lining tilt, degrees.
    Tilt,
    /// Hydraulic ram load, kilonewtons.
    Hydraulic,
}

impl SensorKind {
    /// Every kind, in catalog order.
    pub const ALL: [SensorKind; 6] = [
        SensorKind::Displacement,
        SensorKind::Strain,
        SensorKind::Pressure,
        SensorKind::Temperature,
        SensorKind::Tilt,
        SensorKind::Hydraulic,
    ];

    /// Stable lowercase name, as used in config files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SensorKind::Displacement => "displacement",
            SensorKind::Strain => "strain",
            SensorKind::Pressure => "pressure",
            SensorKind::Temperature => "temperature",
            SensorKind::Tilt => "tilt",
            SensorKind::Hydraulic => "hydraulic",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity derived from a sensor value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    #[allow(missing_docs)]
    Normal,
    #[allow(missing_docs)]
    Warning,
    #[allow(missing_docs)]
    Critical,
}

impl SensorStatus {
    /// Stable lowercase name for display.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SensorStatus::Normal => "normal",
            SensorStatus::Warning => "warning",
            SensorStatus::Critical => "critical",
        }
    }
}

impl fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One simulated measurement point.
///
/// `status` is always the classifier's output for `(kind, value)`; it is
/// never written independently of a refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sensor {
    /// Unique id, `S001`-style.
    pub id: SmolStr,
    /// Human label, catalog label plus ordinal.
    pub name: SmolStr,
    /// Measurement kind.
    pub kind: SensorKind,
    /// Mounting position label.
    pub position: SmolStr,
    /// Unit of `value`.
    pub unit: SmolStr,
    /// Current simulated value.
    pub value: f64,
    /// Derived severity.
    pub status: SensorStatus,
    /// Whether the sensor responds to refreshes.
    pub is_online: bool,
    /// Simulation time of the last refresh that touched this sensor.
    pub last_update: SimTime,
}

/// Declared value range and labels for one sensor kind.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    /// Measurement kind.
    pub kind: SensorKind,
    /// Display label, e.g. "Displacement sensor".
    pub label: SmolStr,
    /// Unit string.
    pub unit: SmolStr,
    /// Lower bound of the initial value draw.
    pub min: f64,
    /// Upper bound of the initial value draw.
    pub max: f64,
}

/// Catalog of sensor types and mounting positions.
///
/// Seeding distributes sensors round-robin over both lists, so their order
/// is part of the contract.
#[derive(Debug, Clone)]
pub struct SensorCatalog {
    types: Vec<TypeSpec>,
    positions: Vec<SmolStr>,
}

impl SensorCatalog {
    /// Build a catalog, failing fast on empty lists or degenerate ranges.
    pub fn new(
        types: Vec<TypeSpec>,
        positions: Vec<SmolStr>,
    ) -> Result<Self, TelemetryError> {
        if types.is_empty() {
            return Err(TelemetryError::EmptyTypeCatalog);
        }
        if positions.is_empty() {
            return Err(TelemetryError::EmptyPositionCatalog);
        }
        for spec in &types {
            if !spec.min.is_finite() || !spec.max.is_finite() || spec.min >= spec.max {
                return Err(TelemetryError::InvalidValueRange {
                    kind: spec.kind,
                    min: spec.min,
                    max: spec.max,
                });
            }
        }
        Ok(Self { types, positions })
    }

    /// The default tunnel instrumentation layout: six kinds spread over
    /// crown, sidewall and invert stations.
    #[must_use]
    pub fn tunnel_default() -> Self {
        let types = vec![
            TypeSpec {
                kind: SensorKind::Displacement,
                label: "Displacement sensor".into(),
                unit: "mm".into(),
                min: 0.0,
                max: 10.0,
            },
            TypeSpec {
                kind: SensorKind::Strain,
                label: "Strain gauge".into(),
                unit: "με".into(),
                min: 0.0,
                max: 500.0,
            },
            TypeSpec {
                kind: SensorKind::Pressure,
                label: "Pressure cell".into(),
                unit: "MPa".into(),
                min: 0.0,
                max: 100.0,
            },
            TypeSpec {
                kind: SensorKind::Temperature,
                label: "Temperature probe".into(),
                unit: "°C".into(),
                min: 20.0,
                max: 35.0,
            },
            TypeSpec {
                kind: SensorKind::Tilt,
                label: "Tilt meter".into(),
                unit: "°".into(),
                min: 0.0,
                max: 0.6,
            },
            TypeSpec {
                kind: SensorKind::Hydraulic,
                label: "Hydraulic ram".into(),
                unit: "kN".into(),
                min: 40.0,
                max: 90.0,
            },
        ];
        let positions = vec![
            "Crown - north".into(),
            "Crown - south".into(),
            "Crown - center".into(),
            "Sidewall - east".into(),
            "Sidewall - west".into(),
            "Invert - north".into(),
            "Invert - south".into(),
            "Invert - center".into(),
        ];
        Self::new(types, positions).expect("default catalog is valid")
    }

    /// Declared sensor types, in round-robin order.
    #[must_use]
    pub fn types(&self) -> &[TypeSpec] {
        &self.types
    }

    /// Mounting positions, in round-robin order.
    #[must_use]
    pub fn positions(&self) -> &[SmolStr] {
        &self.positions
    }
}
