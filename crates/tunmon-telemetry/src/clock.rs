//! Simulation timestamps and tick pacing.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;

/// Signed simulation timestamp in nanoseconds.
///
/// Zero is the start of the run. Negative values are valid and used for
/// records seeded into the past (the initial alert backlog).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize,
)]
pub struct SimTime(i64);

impl SimTime {
    /// The start of the run.
    pub const ZERO: SimTime = SimTime(0);

    /// Build a timestamp from nanoseconds.
    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Build a timestamp from milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis.saturating_mul(1_000_000))
    }

    /// Build a timestamp from whole seconds.
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(1_000_000_000))
    }

    /// Nanoseconds since the start of the run.
    #[must_use]
    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    /// Seconds since the start of the run.
    #[must_use]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1e9
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(self, other: SimTime) -> SimTime {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction.
    #[must_use]
    pub const fn saturating_sub(self, other: SimTime) -> SimTime {
        Self(self.0.saturating_sub(other.0))
    }
}

/// How a paced wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The deadline passed.
    DeadlineReached,
    /// A [`Clock::nudge`] preempted the wait before the deadline.
    Nudged,
}

/// Paces the tick runner: supplies the current time and blocks out the gap
/// between ticks.
///
/// A nudge is one-shot. It preempts the pending (or next) wait and is
/// consumed by it, so a nudged runner returns to normal pacing on the wait
/// after that.
pub trait Clock: Send + Sync + 'static {
    /// Current time on this clock.
    fn now(&self) -> SimTime;

    /// Block until `deadline` passes or a nudge arrives.
    fn wait_until(&self, deadline: SimTime) -> WaitOutcome;

    /// Preempt a pending wait so the waiter can act on a control command.
    /// Clocks whose waits are short enough to just run out may ignore this.
    fn nudge(&self) {}
}

/// Wall-clock pacing backed by `std::time::Instant`, anchored at the moment
/// of construction.
#[derive(Debug, Clone)]
pub struct StdClock {
    epoch: Instant,
}

impl StdClock {
    #[must_use]
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StdClock {
    fn now(&self) -> SimTime {
        let nanos = i64::try_from(self.epoch.elapsed().as_nanos()).unwrap_or(i64::MAX);
        SimTime::from_nanos(nanos)
    }

    // Waits here are bounded by the tick interval, so a plain sleep suffices
    // and `nudge` keeps its no-op default.
    fn wait_until(&self, deadline: SimTime) -> WaitOutcome {
        let remaining = deadline.saturating_sub(self.now()).as_nanos();
        if let Ok(remaining) = u64::try_from(remaining) {
            if remaining > 0 {
                thread::sleep(Duration::from_nanos(remaining));
            }
        }
        WaitOutcome::DeadlineReached
    }
}

#[derive(Debug, Default)]
struct ManualShared {
    now: SimTime,
    nudged: bool,
}

#[derive(Debug, Default)]
struct ManualInner {
    shared: Mutex<ManualShared>,
    bell: Condvar,
}

/// Script-driven pacing for tests and the deterministic snapshot mode: time
/// moves only through [`ManualClock::set_time`] and [`ManualClock::advance`].
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    inner: Arc<ManualInner>,
}

impl ManualClock {
    #[must_use]
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time to `time` and ring the bell for any waiter.
    pub fn set_time(&self, time: SimTime) {
        let mut shared = self.lock();
        shared.now = time;
        self.inner.bell.notify_all();
    }

    /// Move time forward by `delta` and ring the bell for any waiter.
    pub fn advance(&self, delta: SimTime) {
        let mut shared = self.lock();
        shared.now = shared.now.saturating_add(delta);
        self.inner.bell.notify_all();
    }

    fn lock(&self) -> MutexGuard<'_, ManualShared> {
        self.inner.shared.lock().expect("manual clock poisoned")
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SimTime {
        self.lock().now
    }

    fn wait_until(&self, deadline: SimTime) -> WaitOutcome {
        let mut shared = self.lock();
        loop {
            if shared.nudged {
                // Consume the nudge; the next wait blocks normally again.
                shared.nudged = false;
                return WaitOutcome::Nudged;
            }
            if shared.now >= deadline {
                return WaitOutcome::DeadlineReached;
            }
            shared = self
                .inner
                .bell
                .wait(shared)
                .expect("manual clock poisoned");
        }
    }

    fn nudge(&self) {
        let mut shared = self.lock();
        shared.nudged = true;
        self.inner.bell.notify_all();
    }
}
