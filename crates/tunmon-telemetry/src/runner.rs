//! Recurring-tick runner with a start/stop lifecycle.
//!
//! The mock dashboard kept a bag of free-floating interval timers; here the
//! periodic work hangs off one runner thread, so pausing, resuming and
//! tearing down stop everything together.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use tracing::info;

use crate::clock::{Clock, SimTime};
use crate::error::TelemetryError;
use crate::simulator::{Simulator, TelemetrySnapshot};

/// Runner execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunnerState {
    /// Not yet spawned.
    #[default]
    Idle,
    /// Ticking on its thread.
    Running,
    /// Suspended; the thread sleeps through intervals without ticking.
    Paused,
    /// Stopped and joinable.
    Stopped,
}

#[derive(Debug, Clone, Copy)]
enum RunnerCommand {
    Pause,
    Resume,
}

/// Drives a simulator with a scheduling clock.
#[derive(Debug)]
pub struct TelemetryRunner<C: Clock + Clone> {
    simulator: Simulator,
    clock: C,
    tick_interval: SimTime,
    command_rx: Option<mpsc::Receiver<RunnerCommand>>,
}

impl<C: Clock + Clone> TelemetryRunner<C> {
    #[must_use]
    #[allow(missing_docs)]
    pub fn new(simulator: Simulator, clock: C, tick_interval: SimTime) -> Self {
        Self {
            simulator,
            clock,
            tick_interval,
            command_rx: None,
        }
    }

    /// Access the underlying simulator.
    #[must_use]
    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }

    /// Mutate the underlying simulator.
    pub fn simulator_mut(&mut self) -> &mut Simulator {
        &mut self.simulator
    }

    /// Execute one tick at the current clock time.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.simulator.set_current_time(now);
        self.simulator.execute_tick();
    }

    /// Spawn the runner in a dedicated OS thread.
    pub fn spawn(self, name: impl Into<String>) -> Result<RunnerHandle<C>, TelemetryError> {
        let stop = Arc::new(AtomicBool::new(false));
        let state = Arc::new(Mutex::new(RunnerState::Idle));
        let snapshot = Arc::new(Mutex::new(self.simulator.snapshot()));
        let clock = self.clock.clone();
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let mut runner = self;
        runner.command_rx = Some(cmd_rx);

        let stop_thread = stop.clone();
        let state_thread = state.clone();
        let snapshot_thread = snapshot.clone();

        let builder = thread::Builder::new().name(name.into());
        let join = builder
            .spawn(move || {
                run_runner_loop(runner, &stop_thread, &state_thread, &snapshot_thread);
            })
            .map_err(|err| TelemetryError::ThreadSpawn(err.to_string().into()))?;

        Ok(RunnerHandle {
            stop,
            state,
            snapshot,
            clock,
            join: Some(join),
            cmd_tx,
        })
    }
}

fn run_runner_loop<C: Clock + Clone>(
    mut runner: TelemetryRunner<C>,
    stop: &AtomicBool,
    state: &Mutex<RunnerState>,
    snapshot: &Mutex<TelemetrySnapshot>,
) {
    let mut paused = false;
    *state.lock().expect("runner state poisoned") = RunnerState::Running;
    info!("telemetry runner started");
    loop {
        if stop.load(Ordering::SeqCst) {
            *state.lock().expect("runner state poisoned") = RunnerState::Stopped;
            info!("telemetry runner stopped");
            break;
        }

        if let Some(commands) = runner.command_rx.as_ref() {
            while let Ok(command) = commands.try_recv() {
                match command {
                    RunnerCommand::Pause => {
                        paused = true;
                        *state.lock().expect("runner state poisoned") = RunnerState::Paused;
                    }
                    RunnerCommand::Resume => {
                        paused = false;
                        *state.lock().expect("runner state poisoned") = RunnerState::Running;
                    }
                }
            }
        }

        let now = runner.clock.now();
        if !paused {
            runner.simulator.set_current_time(now);
            runner.simulator.execute_tick();
            *snapshot.lock().expect("runner snapshot poisoned") = runner.simulator.snapshot();
        }

        let interval = runner.tick_interval.as_nanos();
        if interval <= 0 {
            thread::yield_now();
            continue;
        }
        let deadline = now.saturating_add(runner.tick_interval);
        runner.clock.wait_until(deadline);
    }
}

/// Handle to a running telemetry thread.
#[derive(Debug)]
pub struct RunnerHandle<C: Clock + Clone> {
    stop: Arc<AtomicBool>,
    state: Arc<Mutex<RunnerState>>,
    snapshot: Arc<Mutex<TelemetrySnapshot>>,
    clock: C,
    join: Option<thread::JoinHandle<()>>,
    cmd_tx: mpsc::Sender<RunnerCommand>,
}

impl<C: Clock + Clone> RunnerHandle<C> {
    /// Suspend ticking; the thread keeps sleeping through intervals.
    pub fn pause(&self) -> Result<(), TelemetryError> {
        self.send_command(RunnerCommand::Pause)
    }

    /// Re-arm ticking after a pause.
    pub fn resume(&self) -> Result<(), TelemetryError> {
        self.send_command(RunnerCommand::Resume)
    }

    /// Signal the runner thread to stop. All periodic work stops together.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
        self.clock.nudge();
    }

    /// Current runner state.
    #[must_use]
    pub fn state(&self) -> RunnerState {
        *self.state.lock().expect("runner state poisoned")
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> TelemetrySnapshot {
        self.snapshot
            .lock()
            .expect("runner snapshot poisoned")
            .clone()
    }

    /// Join the runner thread.
    pub fn join(&mut self) -> thread::Result<()> {
        if let Some(join) = self.join.take() {
            return join.join();
        }
        Ok(())
    }

    fn send_command(&self, command: RunnerCommand) -> Result<(), TelemetryError> {
        self.cmd_tx
            .send(command)
            .map_err(|_| TelemetryError::ControlError("command channel closed".into()))?;
        self.clock.nudge();
        Ok(())
    }
}
