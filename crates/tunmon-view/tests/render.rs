//! Rendering over a handcrafted snapshot.

use expect_test::expect;
use smol_str::SmolStr;

use tunmon_telemetry::alert::{Alert, AlertLevel};
use tunmon_telemetry::clock::SimTime;
use tunmon_telemetry::sensor::{Sensor, SensorKind, SensorStatus};
use tunmon_telemetry::TelemetrySnapshot;
use tunmon_view::{alert_list, device_list, metrics_summary, render_json, render_text};

fn sample_snapshot() -> TelemetrySnapshot {
    TelemetrySnapshot {
        sensors: vec![
            Sensor {
                id: SmolStr::new("S001"),
                name: SmolStr::new("Displacement sensor 1"),
                kind: SensorKind::Displacement,
                position: SmolStr::new("Crown - north"),
                unit: SmolStr::new("mm"),
                value: 3.82,
                status: SensorStatus::Warning,
                is_online: true,
                last_update: SimTime::from_secs(55),
            },
            Sensor {
                id: SmolStr::new("S002"),
                name: SmolStr::new("Hydraulic ram 1"),
                kind: SensorKind::Hydraulic,
                position: SmolStr::new("Invert - center"),
                unit: SmolStr::new("kN"),
                value: 54.2,
                status: SensorStatus::Critical,
                is_online: false,
                last_update: SimTime::ZERO,
            },
        ],
        alerts: vec![
            Alert {
                id: SmolStr::new("A002"),
                level: AlertLevel::Critical,
                message: SmolStr::new("Hydraulic system pressure over limit"),
                time: SimTime::from_secs(30),
                acknowledged: false,
            },
            Alert {
                id: SmolStr::new("A001"),
                level: AlertLevel::Info,
                message: SmolStr::new("Data acquisition delayed"),
                time: SimTime::from_secs(-3600),
                acknowledged: true,
            },
        ],
        tick: 12,
        time: SimTime::from_secs(60),
    }
}

#[test]
fn metrics_summary_counts_active_and_online() {
    let summary = metrics_summary(&sample_snapshot());
    expect![[r#"
        sensors  2 total, 1 online (50.0%)
        alerts   1 active, 2 retained
        tick     12 (t=60.0s)
    "#]]
    .assert_eq(&summary);
}

#[test]
fn device_list_shows_one_line_per_sensor() {
    let listing = device_list(&sample_snapshot());
    assert_eq!(listing.lines().count(), 2);
    let first = listing.lines().next().unwrap();
    assert!(first.starts_with("S001"));
    assert!(first.contains("Displacement sensor 1"));
    assert!(first.contains("3.82"));
    assert!(first.contains("warning"));
    assert!(first.ends_with("online"));
    let second = listing.lines().nth(1).unwrap();
    assert!(second.contains("critical"));
    assert!(second.ends_with("offline"));
}

#[test]
fn alert_list_renders_ages_and_acknowledgement() {
    let listing = alert_list(&sample_snapshot());
    let first = listing.lines().next().unwrap();
    assert!(first.starts_with("[critical]"));
    assert!(first.contains("A002"));
    assert!(first.contains("(30s ago)"));
    assert!(!first.ends_with("ack"));
    let second = listing.lines().nth(1).unwrap();
    assert!(second.contains("A001"));
    assert!(second.contains("(1h ago)"));
    assert!(second.ends_with("ack"));
}

#[test]
fn text_rendering_combines_all_fragments() {
    let snapshot = sample_snapshot();
    let text = render_text(&snapshot);
    assert!(text.contains("sensors  2 total"));
    assert!(text.contains("S002"));
    assert!(text.contains("A001"));
}

#[test]
fn json_rendering_exposes_the_full_snapshot() {
    let snapshot = sample_snapshot();
    let json = render_json(&snapshot).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["tick"], 12);
    assert_eq!(value["sensors"][0]["id"], "S001");
    assert_eq!(value["sensors"][1]["status"], "critical");
    assert_eq!(value["alerts"][0]["level"], "critical");
    assert_eq!(value["alerts"][1]["acknowledged"], true);
}

#[test]
fn rendering_leaves_the_snapshot_untouched() {
    let snapshot = sample_snapshot();
    let before = snapshot.clone();
    let _ = metrics_summary(&snapshot);
    let _ = device_list(&snapshot);
    let _ = alert_list(&snapshot);
    let _ = render_text(&snapshot);
    let _ = render_json(&snapshot).unwrap();
    assert_eq!(snapshot, before);
}
