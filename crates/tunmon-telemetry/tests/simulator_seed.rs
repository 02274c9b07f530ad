//! Seeding: round-robin catalog assignment, value ranges, backlog shape.

use tunmon_telemetry::classify::StatusClassifier;
use tunmon_telemetry::config::SimConfig;
use tunmon_telemetry::error::TelemetryError;
use tunmon_telemetry::sensor::{SensorCatalog, SensorKind, TypeSpec};
use tunmon_telemetry::Simulator;

fn seeded_config(seed: u64) -> SimConfig {
    SimConfig {
        seed: Some(seed),
        ..SimConfig::default()
    }
}

fn four_kind_catalog() -> SensorCatalog {
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
            unit: "ue".into(),
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
            unit: "C".into(),
            min: 20.0,
            max: 35.0,
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
    SensorCatalog::new(types, positions).unwrap()
}

#[test]
fn sensors_are_assigned_round_robin() {
    let catalog = four_kind_catalog();
    let simulator = Simulator::new(&seeded_config(7), &catalog).unwrap();
    let sensors = simulator.sensors();
    assert_eq!(sensors.len(), 128);

    let types = catalog.types();
    let positions = catalog.positions();
    for (i, sensor) in sensors.iter().enumerate() {
        assert_eq!(sensor.kind, types[i % types.len()].kind, "sensor {i}");
        assert_eq!(
            sensor.position,
            positions[i % positions.len()],
            "sensor {i}"
        );
    }
}

#[test]
fn ids_and_names_follow_seed_order() {
    let catalog = four_kind_catalog();
    let simulator = Simulator::new(&seeded_config(7), &catalog).unwrap();
    let sensors = simulator.sensors();

    assert_eq!(sensors[0].id, "S001");
    assert_eq!(sensors[127].id, "S128");
    assert_eq!(sensors[0].name, "Displacement sensor 1");
    assert_eq!(sensors[1].name, "Strain gauge 1");
    assert_eq!(sensors[4].name, "Displacement sensor 2");
}

#[test]
fn initial_values_stay_in_declared_ranges() {
    let catalog = four_kind_catalog();
    let simulator = Simulator::new(&seeded_config(11), &catalog).unwrap();
    let types = catalog.types();
    for (i, sensor) in simulator.sensors().iter().enumerate() {
        let spec = &types[i % types.len()];
        assert!(
            sensor.value >= spec.min && sensor.value <= spec.max,
            "sensor {i} value {} outside {}..={}",
            sensor.value,
            spec.min,
            spec.max
        );
    }
}

#[test]
fn initial_statuses_match_the_classifier() {
    let catalog = SensorCatalog::tunnel_default();
    let simulator = Simulator::new(&seeded_config(3), &catalog).unwrap();
    let classifier = StatusClassifier::tunnel_default();
    for sensor in simulator.sensors() {
        assert_eq!(
            sensor.status,
            classifier.classify(sensor.kind, sensor.value),
            "{}",
            sensor.id
        );
    }
}

#[test]
fn backlog_is_seeded_in_the_past_and_sorted() {
    let catalog = SensorCatalog::tunnel_default();
    let simulator = Simulator::new(&seeded_config(42), &catalog).unwrap();
    let alerts = simulator.alerts();
    assert_eq!(alerts.len(), 15);
    for alert in alerts {
        assert!(alert.time <= tunmon_telemetry::clock::SimTime::ZERO);
    }
    for pair in alerts.windows(2) {
        assert!(pair[0].time >= pair[1].time, "backlog not newest-first");
    }
}

#[test]
fn identical_seeds_produce_identical_state() {
    let catalog = SensorCatalog::tunnel_default();
    let a = Simulator::new(&seeded_config(99), &catalog).unwrap();
    let b = Simulator::new(&seeded_config(99), &catalog).unwrap();
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn zero_sensor_count_rejected() {
    let config = SimConfig {
        sensor_count: 0,
        ..SimConfig::default()
    };
    let err = Simulator::new(&config, &SensorCatalog::tunnel_default()).unwrap_err();
    assert_eq!(err, TelemetryError::ZeroSensorCount);
}

#[test]
fn empty_catalogs_rejected() {
    assert_eq!(
        SensorCatalog::new(Vec::new(), vec!["Crown - north".into()]).unwrap_err(),
        TelemetryError::EmptyTypeCatalog
    );
    let types = vec![TypeSpec {
        kind: SensorKind::Tilt,
        label: "Tilt meter".into(),
        unit: "deg".into(),
        min: 0.0,
        max: 0.6,
    }];
    assert_eq!(
        SensorCatalog::new(types, Vec::new()).unwrap_err(),
        TelemetryError::EmptyPositionCatalog
    );
}

#[test]
fn degenerate_value_range_rejected() {
    let types = vec![TypeSpec {
        kind: SensorKind::Pressure,
        label: "Pressure cell".into(),
        unit: "MPa".into(),
        min: 5.0,
        max: 5.0,
    }];
    let err = SensorCatalog::new(types, vec!["Crown - north".into()]).unwrap_err();
    assert!(matches!(
        err,
        TelemetryError::InvalidValueRange {
            kind: SensorKind::Pressure,
            ..
        }
    ));
}
