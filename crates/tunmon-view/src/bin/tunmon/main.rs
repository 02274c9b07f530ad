//! `tunmon` entry point.

mod cli;

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tunmon_telemetry::clock::{Clock, ManualClock, SimTime, StdClock};
use tunmon_telemetry::config::SimConfig;
use tunmon_telemetry::metrics::SimMetrics;
use tunmon_telemetry::runner::TelemetryRunner;
use tunmon_telemetry::sensor::SensorCatalog;
use tunmon_telemetry::{Simulator, TelemetrySnapshot};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let mut config = match &args.config {
        Some(path) => {
            SimConfig::load(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    init_tracing(config.log_level.as_str());

    match args.command {
        cli::Command::Run { duration } => run(&config, duration, args.json),
        cli::Command::Snapshot { ticks } => snapshot(&config, ticks, args.json),
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Live run: spawn the runner on a wall clock, render on the sensor cadence,
/// tear everything down at the deadline.
fn run(config: &SimConfig, duration: u64, json: bool) -> Result<()> {
    let catalog = SensorCatalog::tunnel_default();
    let mut simulator = Simulator::new(config, &catalog)?;
    let metrics = Arc::new(Mutex::new(SimMetrics::default()));
    simulator.set_metrics_sink(metrics.clone());

    let clock = StdClock::new();
    let runner = TelemetryRunner::new(simulator, clock.clone(), config.tick_interval());
    let mut handle = runner.spawn("tunmon-runner")?;

    let deadline = SimTime::from_secs(i64::try_from(duration).unwrap_or(i64::MAX));
    let step = config.sensor_interval();
    let mut next = step;
    while next <= deadline {
        clock.wait_until(next);
        print_snapshot(&handle.snapshot(), json)?;
        next = next.saturating_add(step);
    }

    handle.stop();
    handle
        .join()
        .map_err(|_| anyhow::anyhow!("runner thread panicked"))?;

    let metrics = metrics.lock().expect("metrics poisoned");
    info!(
        ticks = metrics.ticks.samples(),
        refreshes = metrics.refresh_passes,
        alerts = metrics.alerts_raised,
        overruns = metrics.overruns,
        "run complete"
    );
    Ok(())
}

/// Deterministic run: drive the simulator synchronously on a manual clock.
fn snapshot(config: &SimConfig, ticks: u64, json: bool) -> Result<()> {
    let catalog = SensorCatalog::tunnel_default();
    let simulator = Simulator::new(config, &catalog)?;
    let clock = ManualClock::new();
    let mut runner = TelemetryRunner::new(simulator, clock.clone(), config.tick_interval());
    for _ in 0..ticks {
        clock.advance(config.tick_interval());
        runner.tick();
    }
    print_snapshot(&runner.simulator().snapshot(), json)
}

fn print_snapshot(snapshot: &TelemetrySnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", tunmon_view::render_json(snapshot)?);
    } else {
        println!("{}", tunmon_view::render_text(snapshot));
    }
    Ok(())
}
