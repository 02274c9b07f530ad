//! Snapshot rendering into text fragments and JSON.

use std::fmt::Write as _;

use tunmon_telemetry::alert::AlertLevel;
use tunmon_telemetry::clock::SimTime;
use tunmon_telemetry::TelemetrySnapshot;

/// Metrics summary: totals, online rate, active alerts.
///
/// An alert counts as active while it is unacknowledged and above info.
#[must_use]
pub fn metrics_summary(snapshot: &TelemetrySnapshot) -> String {
    let total = snapshot.sensors.len();
    let online = snapshot.sensors.iter().filter(|s| s.is_online).count();
    let rate = if total == 0 {
        0.0
    } else {
        online as f64 / total as f64 * 100.0
    };
    let active = snapshot
        .alerts
        .iter()
        .filter(|a| !a.acknowledged && a.level != AlertLevel::Info)
        .count();

    let mut out = String::new();
    let _ = writeln!(out, "sensors  {total} total, {online} online ({rate:.1}%)");
    let _ = writeln!(
        out,
        "alerts   {active} active, {retained} retained",
        retained = snapshot.alerts.len()
    );
    let _ = writeln!(
        out,
        "tick     {tick} (t={time:.1}s)",
        tick = snapshot.tick,
        time = snapshot.time.as_secs_f64()
    );
    out
}

/// Device list: one line per sensor record.
#[must_use]
pub fn device_list(snapshot: &TelemetrySnapshot) -> String {
    let mut out = String::new();
    for sensor in &snapshot.sensors {
        let link = if sensor.is_online { "online" } else { "offline" };
        let _ = writeln!(
            out,
            "{id:<5} {name:<24} {position:<16} {value:>8.2} {unit:<4} {status:<8} {link}",
            id = sensor.id,
            name = sensor.name,
            position = sensor.position,
            value = sensor.value,
            unit = sensor.unit,
            status = sensor.status,
        );
    }
    out
}

/// Alerts list, newest first.
#[must_use]
pub fn alert_list(snapshot: &TelemetrySnapshot) -> String {
    let mut out = String::new();
    for alert in &snapshot.alerts {
        let ack = if alert.acknowledged { "  ack" } else { "" };
        let _ = writeln!(
            out,
            "[{level:<8}] {id}  {message}  ({age}){ack}",
            level = alert.level,
            id = alert.id,
            message = alert.message,
            age = format_age(snapshot.time, alert.time),
        );
    }
    out
}

/// All three fragments, separated by blank lines.
#[must_use]
pub fn render_text(snapshot: &TelemetrySnapshot) -> String {
    format!(
        "{}\n{}\n{}",
        metrics_summary(snapshot),
        device_list(snapshot),
        alert_list(snapshot)
    )
}

/// Pretty-printed JSON of the full snapshot.
pub fn render_json(snapshot: &TelemetrySnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

fn format_age(now: SimTime, then: SimTime) -> String {
    let secs = now.saturating_sub(then).as_secs_f64().max(0.0);
    if secs < 60.0 {
        format!("{}s ago", secs as u64)
    } else if secs < 3600.0 {
        format!("{}m ago", (secs / 60.0) as u64)
    } else {
        format!("{}h ago", (secs / 3600.0) as u64)
    }
}
