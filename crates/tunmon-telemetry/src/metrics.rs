//! Tick metrics collection.

#![allow(missing_docs)]

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Duration statistics for refresh ticks.
#[derive(Debug, Clone, Copy)]
pub struct TickStats {
    pub min_ms: f64,
    pub max_ms: f64,
    pub avg_ms: f64,
    pub last_ms: f64,
    samples: u64,
}

impl TickStats {
    pub fn record(&mut self, duration: Duration) {
        let ms = duration.as_secs_f64() * 1000.0;
        self.last_ms = ms;
        if self.samples == 0 {
            self.min_ms = ms;
            self.max_ms = ms;
            self.avg_ms = ms;
        } else {
            if ms < self.min_ms {
                self.min_ms = ms;
            }
            if ms > self.max_ms {
                self.max_ms = ms;
            }
            let total = self.avg_ms * self.samples as f64 + ms;
            self.avg_ms = total / (self.samples as f64 + 1.0);
        }
        self.samples = self.samples.saturating_add(1);
    }

    #[must_use]
    pub fn samples(&self) -> u64 {
        self.samples
    }
}

impl Default for TickStats {
    fn default() -> Self {
        Self {
            min_ms: 0.0,
            max_ms: 0.0,
            avg_ms: 0.0,
            last_ms: 0.0,
            samples: 0,
        }
    }
}

/// Counters and timings accumulated over a simulator run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimMetrics {
    pub ticks: TickStats,
    pub refresh_passes: u64,
    pub alerts_raised: u64,
    pub overruns: u64,
}

impl SimMetrics {
    pub fn record_tick(&mut self, duration: Duration) {
        self.ticks.record(duration);
    }

    pub fn record_refresh(&mut self) {
        self.refresh_passes = self.refresh_passes.saturating_add(1);
    }

    pub fn record_alert(&mut self) {
        self.alerts_raised = self.alerts_raised.saturating_add(1);
    }

    pub fn record_overrun(&mut self, missed: u64) {
        self.overruns = self.overruns.saturating_add(missed);
    }
}

/// Optional metrics recorder. Recording is skipped entirely when no sink is
/// installed.
#[derive(Debug, Default)]
pub(crate) struct MetricsSink {
    sink: Option<Arc<Mutex<SimMetrics>>>,
}

impl MetricsSink {
    pub(crate) fn set_sink(&mut self, metrics: Arc<Mutex<SimMetrics>>) {
        self.sink = Some(metrics);
    }

    pub(crate) fn start_timer(&self) -> Option<Instant> {
        self.sink.as_ref().map(|_| Instant::now())
    }

    pub(crate) fn record_tick(&self, duration: Duration) {
        if let Some(metrics) = self.sink.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_tick(duration);
            }
        }
    }

    pub(crate) fn record_refresh(&self) {
        if let Some(metrics) = self.sink.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_refresh();
            }
        }
    }

    pub(crate) fn record_alert(&self) {
        if let Some(metrics) = self.sink.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_alert();
            }
        }
    }

    pub(crate) fn record_overrun(&self, missed: u64) {
        if let Some(metrics) = self.sink.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_overrun(missed);
            }
        }
    }
}
