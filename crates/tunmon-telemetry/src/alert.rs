//! Bounded alert log and severity levels.

use std::fmt;

use serde::Serialize;
use smol_str::SmolStr;

use crate::clock::SimTime;
use crate::error::TelemetryError;

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    #[allow(missing_docs)]
    Info,
    #[allow(missing_docs)]
    Warning,
    #[allow(missing_docs)]
    Critical,
}

impl AlertLevel {
    /// Stable lowercase name for display.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AlertLevel::Info => "info",
            AlertLevel::Warning => "warning",
            AlertLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One simulated notification event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    /// Unique id, `A001`-style, monotonic across the run.
    pub id: SmolStr,
    /// Severity.
    pub level: AlertLevel,
    /// Message drawn from the configured pool.
    pub message: SmolStr,
    /// Simulation time the alert was raised.
    pub time: SimTime,
    /// Whether an operator acknowledged it.
    pub acknowledged: bool,
}

/// Bounded FIFO of alerts, newest first.
///
/// Prepends keep the list time-descending as long as callers record with
/// non-decreasing timestamps; the cap evicts the oldest entries.
#[derive(Debug, Clone)]
pub struct AlertLog {
    entries: Vec<Alert>,
    cap: usize,
    next_id: u64,
}

impl AlertLog {
    /// Build an empty log with the given retention cap.
    pub fn new(cap: usize) -> Result<Self, TelemetryError> {
        if cap == 0 {
            return Err(TelemetryError::ZeroAlertCap);
        }
        Ok(Self {
            entries: Vec::new(),
            cap,
            next_id: 1,
        })
    }

    /// Record a new alert at the head of the log, evicting past the cap.
    ///
    /// Returns the assigned id.
    pub fn record(
        &mut self,
        level: AlertLevel,
        message: SmolStr,
        time: SimTime,
    ) -> SmolStr {
        let id: SmolStr = format!("A{:03}", self.next_id).into();
        self.next_id = self.next_id.saturating_add(1);
        self.entries.insert(
            0,
            Alert {
                id: id.clone(),
                level,
                message,
                time,
                acknowledged: false,
            },
        );
        self.entries.truncate(self.cap);
        id
    }

    /// Mark an alert acknowledged. Returns false if it was already evicted.
    pub fn acknowledge(&mut self, id: &str) -> bool {
        match self.entries.iter_mut().find(|alert| alert.id == id) {
            Some(alert) => {
                alert.acknowledged = true;
                true
            }
            None => false,
        }
    }

    /// Re-sort the log newest-first. Used once after backlog seeding, which
    /// draws timestamps in arbitrary order.
    pub fn sort_descending(&mut self) {
        self.entries.sort_by(|a, b| b.time.cmp(&a.time));
    }

    /// Alerts, newest first.
    #[must_use]
    pub fn entries(&self) -> &[Alert] {
        &self.entries
    }

    /// Number of retained alerts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retention cap.
    #[must_use]
    pub fn cap(&self) -> usize {
        self.cap
    }
}

/// Default alert message pool, as shipped with the mock dashboard.
#[must_use]
pub fn default_message_pool() -> Vec<SmolStr> {
    [
        "Sensor S001 displacement beyond threshold",
        "Hydraulic cylinder C3 pressure anomaly",
        "Temperature sensor T12 communication lost",
        "Strain gauge ST05 reading fluctuation",
        "System self-check reported an anomaly",
        "Data acquisition delayed",
        "Controller response timeout",
        "Sensor data fluctuation detected",
        "Hydraulic system pressure over limit",
        "Data integrity check failed",
    ]
    .into_iter()
    .map(SmolStr::new)
    .collect()
}
