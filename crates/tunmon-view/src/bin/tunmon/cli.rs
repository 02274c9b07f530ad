//! CLI definitions for tunmon.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "tunmon",
    version,
    about = "Tunnel-monitoring telemetry simulator",
    after_help = "Examples:\n  tunmon run --duration 30          # live run, render every refresh\n  tunmon snapshot --seed 7 --ticks 40 # deterministic snapshot\n  tunmon snapshot --config sim.toml --json"
)]
pub struct Cli {
    /// Simulator config file (TOML); defaults apply when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// RNG seed override for reproducible runs.
    #[arg(long, global = true)]
    pub seed: Option<u64>,
    /// Emit JSON instead of text fragments.
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the simulator on a wall clock and render each refresh.
    Run {
        /// Run duration in seconds.
        #[arg(long, default_value_t = 60)]
        duration: u64,
    },
    /// Drive the simulator on a manual clock and print the final snapshot.
    Snapshot {
        /// Number of base ticks to execute.
        #[arg(long, default_value_t = 60)]
        ticks: u64,
    },
}
