//! Command line / environment configuration.
//!
//! 起動時に 1 度だけ読み、不正な値はワーカー起動前に弾く。

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use convoy_core::FleetError;
use convoy_core::domain::{RunSettings, WorkerCount};

#[derive(Debug, Parser)]
#[command(
    name = "convoy",
    about = "Process a fleet of trucks across a bounded worker pool"
)]
pub struct Args {
    /// Number of concurrent workers (must be at least 1)
    #[arg(
        long,
        env = "CONVOY_WORKERS",
        default_value_t = 3,
        allow_negative_numbers = true
    )]
    pub workers: i64,

    /// Per-task deadline in milliseconds (omit to run every task to completion)
    #[arg(long, env = "CONVOY_TASK_DEADLINE_MS")]
    pub task_deadline_ms: Option<u64>,

    /// Default simulated transit time per truck, in milliseconds
    #[arg(long, env = "CONVOY_TRANSIT_MS", default_value_t = 1000)]
    pub transit_ms: u64,

    /// JSON fleet definition; the built-in demo fleet is used when omitted
    #[arg(long, env = "CONVOY_FLEET")]
    pub fleet: Option<PathBuf>,

    /// Print the aggregate report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "CONVOY_LOG", default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn run_settings(&self) -> Result<RunSettings, FleetError> {
        Ok(RunSettings {
            workers: WorkerCount::try_from(self.workers)?,
            task_deadline: self.task_deadline_ms.map(Duration::from_millis),
        })
    }

    pub fn transit(&self) -> Duration {
        Duration::from_millis(self.transit_ms)
    }
}
