//! The telemetry simulator.
//!
//! One struct owns everything the mock dashboard kept in module globals:
//! the sensor list, the alert log, the RNG, the classifier and the cadence
//! state. Construction fails fast on bad preconditions; after that every
//! operation is an infallible in-memory mutation.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use smol_str::SmolStr;
use tracing::{debug, info, warn};

use crate::alert::{Alert, AlertLevel, AlertLog};
use crate::classify::StatusClassifier;
use crate::clock::SimTime;
use crate::config::SimConfig;
use crate::error::TelemetryError;
use crate::metrics::{MetricsSink, SimMetrics};
use crate::sensor::{Sensor, SensorCatalog};

/// Owned, serializable copy of simulator state for read-only consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetrySnapshot {
    /// Sensor records at snapshot time.
    pub sensors: Vec<Sensor>,
    /// Alerts, newest first.
    pub alerts: Vec<Alert>,
    /// Ticks executed so far.
    pub tick: u64,
    /// Simulation time of the snapshot.
    pub time: SimTime,
}

/// Simulated telemetry source for the monitoring views.
#[derive(Debug)]
pub struct Simulator {
    sensors: Vec<Sensor>,
    alerts: AlertLog,
    classifier: StatusClassifier,
    rng: StdRng,
    refresh_probability: f64,
    drift_fraction: f64,
    message_pool: Vec<SmolStr>,
    sensor_interval: SimTime,
    alert_interval: SimTime,
    sensor_last_run: SimTime,
    alert_last_run: SimTime,
    current_time: SimTime,
    tick_counter: u64,
    metrics: MetricsSink,
}

impl Simulator {
    /// Build a simulator, seeding sensors round-robin over the catalog and
    /// an alert backlog spread over the preceding 24 simulated hours.
    pub fn new(config: &SimConfig, catalog: &SensorCatalog) -> Result<Self, TelemetryError> {
        config.validate()?;
        let classifier = StatusClassifier::with_overrides(&config.thresholds)?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let types = catalog.types();
        let positions = catalog.positions();
        let mut sensors = Vec::with_capacity(config.sensor_count);
        for i in 0..config.sensor_count {
            let spec = &types[i % types.len()];
            let position = positions[i % positions.len()].clone();
            let value = rng.random_range(spec.min..=spec.max);
            sensors.push(Sensor {
                id: format!("S{:03}", i + 1).into(),
                name: format!("{} {}", spec.label, i / types.len() + 1).into(),
                kind: spec.kind,
                position,
                unit: spec.unit.clone(),
                value,
                status: classifier.classify(spec.kind, value),
                is_online: rng.random_bool(config.online_probability),
                last_update: SimTime::ZERO,
            });
        }

        let mut alerts = AlertLog::new(config.alert_cap)?;
        let day = SimTime::from_secs(24 * 3600);
        for _ in 0..config.alert_backlog {
            let offset = rng.random_range(0..=day.as_nanos());
            let time = SimTime::ZERO.saturating_sub(SimTime::from_nanos(offset));
            let level = weighted_level(&mut rng);
            let message = pick_message(&mut rng, &config.messages);
            let id = alerts.record(level, message, time);
            if rng.random_bool(0.7) {
                alerts.acknowledge(&id);
            }
        }
        alerts.sort_descending();

        info!(
            sensors = sensors.len(),
            backlog = alerts.len(),
            "telemetry simulator seeded"
        );

        Ok(Self {
            sensors,
            alerts,
            classifier,
            rng,
            refresh_probability: config.refresh_probability,
            drift_fraction: config.drift_fraction,
            message_pool: config.messages.clone(),
            sensor_interval: config.sensor_interval(),
            alert_interval: config.alert_interval(),
            sensor_last_run: SimTime::ZERO,
            alert_last_run: SimTime::ZERO,
            current_time: SimTime::ZERO,
            tick_counter: 0,
            metrics: MetricsSink::default(),
        })
    }

    /// One refresh pass over the sensor list.
    ///
    /// Each online sensor is touched with the configured probability: the
    /// value drifts uniformly within the drift bound (clamped at zero), the
    /// update timestamp advances and the status is reclassified.
    pub fn refresh_sensors(&mut self) {
        let now = self.current_time;
        let mut touched = 0_u32;
        for sensor in &mut self.sensors {
            if !sensor.is_online {
                continue;
            }
            if !self.rng.random_bool(self.refresh_probability) {
                continue;
            }
            let spread = sensor.value * self.drift_fraction;
            if spread > 0.0 {
                let low = (sensor.value - spread).max(0.0);
                let high = sensor.value + spread;
                sensor.value = self.rng.random_range(low..=high);
            }
            sensor.last_update = now;
            sensor.status = self.classifier.classify(sensor.kind, sensor.value);
            touched += 1;
        }
        self.metrics.record_refresh();
        debug!(touched, time_s = now.as_secs_f64(), "sensor refresh pass");
    }

    /// Raise one alert: weighted severity (critical 30%, warning 35%,
    /// info 35%), uniform message from the pool, prepended under the cap.
    pub fn append_alert(&mut self) {
        let level = weighted_level(&mut self.rng);
        let message = pick_message(&mut self.rng, &self.message_pool);
        let id = self.alerts.record(level, message, self.current_time);
        self.metrics.record_alert();
        info!(%id, %level, "alert raised");
    }

    /// Mark an alert acknowledged. Returns false if it was already evicted.
    pub fn acknowledge(&mut self, id: &str) -> bool {
        self.alerts.acknowledge(id)
    }

    /// One scheduling tick: runs the sensor refresh and alert streams that
    /// are due at the current time, counting missed intervals as overruns.
    pub fn execute_tick(&mut self) {
        let timer = self.metrics.start_timer();
        let now = self.current_time;

        if let Some(missed) = due(now, &mut self.sensor_last_run, self.sensor_interval) {
            if missed > 0 {
                warn!(missed, stream = "sensors", "missed refresh intervals");
                self.metrics.record_overrun(missed);
            }
            self.refresh_sensors();
        }
        if let Some(missed) = due(now, &mut self.alert_last_run, self.alert_interval) {
            if missed > 0 {
                warn!(missed, stream = "alerts", "missed alert intervals");
                self.metrics.record_overrun(missed);
            }
            self.append_alert();
        }

        self.tick_counter = self.tick_counter.saturating_add(1);
        if let Some(start) = timer {
            self.metrics.record_tick(start.elapsed());
        }
    }

    /// Install a shared metrics sink.
    pub fn set_metrics_sink(&mut self, metrics: Arc<Mutex<SimMetrics>>) {
        self.metrics.set_sink(metrics);
    }

    /// Current simulation time.
    #[must_use]
    pub fn current_time(&self) -> SimTime {
        self.current_time
    }

    /// Stamp the simulation time for the next tick.
    pub fn set_current_time(&mut self, time: SimTime) {
        self.current_time = time;
    }

    /// Ticks executed so far.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_counter
    }

    /// Sensor records, read-only.
    #[must_use]
    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    /// Alerts, newest first, read-only.
    #[must_use]
    pub fn alerts(&self) -> &[Alert] {
        self.alerts.entries()
    }

    /// Owned snapshot for renderers and other read-only consumers.
    #[must_use]
    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            sensors: self.sensors.clone(),
            alerts: self.alerts.entries().to_vec(),
            tick: self.tick_counter,
            time: self.current_time,
        }
    }
}

/// Advance a stream's last-run mark if its interval elapsed. Returns the
/// number of missed intervals beyond the first, or `None` when not due.
fn due(now: SimTime, last_run: &mut SimTime, interval: SimTime) -> Option<u64> {
    let elapsed = now.saturating_sub(*last_run).as_nanos();
    let interval = interval.as_nanos();
    if interval <= 0 || elapsed < interval {
        return None;
    }
    let intervals = elapsed / interval;
    *last_run = now;
    Some(u64::try_from(intervals - 1).unwrap_or(0))
}

fn weighted_level(rng: &mut StdRng) -> AlertLevel {
    let draw: f64 = rng.random_range(0.0..1.0);
    if draw < 0.30 {
        AlertLevel::Critical
    } else if draw < 0.65 {
        AlertLevel::Warning
    } else {
        AlertLevel::Info
    }
}

fn pick_message(rng: &mut StdRng, pool: &[SmolStr]) -> SmolStr {
    pool[rng.random_range(0..pool.len())].clone()
}
