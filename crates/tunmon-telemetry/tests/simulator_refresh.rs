//! Refresh passes: drift bounds, offline sensors, status invariant.

use tunmon_telemetry::classify::StatusClassifier;
use tunmon_telemetry::clock::SimTime;
use tunmon_telemetry::config::SimConfig;
use tunmon_telemetry::sensor::SensorCatalog;
use tunmon_telemetry::Simulator;

fn seeded_config(seed: u64) -> SimConfig {
    SimConfig {
        seed: Some(seed),
        ..SimConfig::default()
    }
}

#[test]
fn values_never_drift_below_zero() {
    let catalog = SensorCatalog::tunnel_default();
    let mut simulator = Simulator::new(&seeded_config(5), &catalog).unwrap();
    for step in 1..=200_i64 {
        simulator.set_current_time(SimTime::from_secs(step * 5));
        simulator.refresh_sensors();
    }
    for sensor in simulator.sensors() {
        assert!(sensor.value >= 0.0, "{} drifted to {}", sensor.id, sensor.value);
    }
}

#[test]
fn offline_sensors_are_left_alone() {
    let config = SimConfig {
        seed: Some(21),
        online_probability: 0.0,
        refresh_probability: 1.0,
        ..SimConfig::default()
    };
    let catalog = SensorCatalog::tunnel_default();
    let mut simulator = Simulator::new(&config, &catalog).unwrap();
    let before = simulator.snapshot();

    simulator.set_current_time(SimTime::from_secs(5));
    simulator.refresh_sensors();

    for (old, new) in before.sensors.iter().zip(simulator.sensors()) {
        assert!(!new.is_online);
        assert_eq!(old.value, new.value, "{}", new.id);
        assert_eq!(new.last_update, SimTime::ZERO, "{}", new.id);
    }
}

#[test]
fn refreshed_sensors_are_stamped_and_reclassified() {
    let config = SimConfig {
        seed: Some(8),
        online_probability: 1.0,
        refresh_probability: 1.0,
        ..SimConfig::default()
    };
    let catalog = SensorCatalog::tunnel_default();
    let mut simulator = Simulator::new(&config, &catalog).unwrap();
    let now = SimTime::from_secs(5);
    simulator.set_current_time(now);
    simulator.refresh_sensors();

    let classifier = StatusClassifier::tunnel_default();
    for sensor in simulator.sensors() {
        assert_eq!(sensor.last_update, now, "{}", sensor.id);
        assert_eq!(
            sensor.status,
            classifier.classify(sensor.kind, sensor.value),
            "{}",
            sensor.id
        );
    }
}

#[test]
fn drift_stays_within_the_configured_fraction() {
    let config = SimConfig {
        seed: Some(13),
        online_probability: 1.0,
        refresh_probability: 1.0,
        drift_fraction: 0.10,
        ..SimConfig::default()
    };
    let catalog = SensorCatalog::tunnel_default();
    let mut simulator = Simulator::new(&config, &catalog).unwrap();
    let before: Vec<f64> = simulator.sensors().iter().map(|s| s.value).collect();

    simulator.set_current_time(SimTime::from_secs(5));
    simulator.refresh_sensors();

    for (old, sensor) in before.iter().zip(simulator.sensors()) {
        let spread = old * 0.10;
        let low = (old - spread).max(0.0);
        let high = old + spread;
        assert!(
            sensor.value >= low && sensor.value <= high,
            "{} moved {} -> {}",
            sensor.id,
            old,
            sensor.value
        );
    }
}
