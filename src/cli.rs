use clap::{Parser, ValueEnum, command};
use std::path::PathBuf;

/// Route a demonstration inflow through one river segment.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Upstream boundary scenario to run
    #[arg(value_enum)]
    pub scenario: Scenario,

    /// Routing period in seconds
    #[arg(short, long, default_value_t = 600.0)]
    pub dt: f64,

    /// Number of timesteps
    #[arg(short, long, default_value_t = 60)]
    pub tsteps: usize,

    /// CSV file the routed series is written to
    #[arg(short, long, default_value = "routing_results.csv")]
    pub output: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum Scenario {
    /// Upstream flow doubles at step 0 and holds
    StepChange,
    /// Short upstream pulse over steps 6..=9
    Pulse,
}

pub fn get_args() -> Args {
    Args::parse()
}
