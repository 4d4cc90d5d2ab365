use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use driveshare_core::matching::MatchingAlgorithmType;

#[derive(Parser)]
#[command(
    name = "driveshare",
    about = "Discrete-event simulation of riders and drivers on a city grid",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay an event log and print the run report
    Run(RunConfig),
    /// Write a seeded synthetic event log
    Generate(GenerateConfig),
}

#[derive(Parser)]
pub struct RunConfig {
    /// Event log to replay.
    pub events: PathBuf,
    /// TOML run configuration.
    #[arg(long, env = "DRIVESHARE_CONFIG")]
    pub config: Option<PathBuf>,
    /// Overrides the matching policy from the configuration file.
    #[arg(long, value_enum)]
    pub matching: Option<MatchingArg>,
    /// Overrides the maximum number of processed events.
    #[arg(long)]
    pub max_steps: Option<usize>,
    /// Overrides the simulation end time.
    #[arg(long)]
    pub end_time: Option<u64>,
    /// Print every recorded activity before the report.
    #[arg(long)]
    pub trace: bool,
    /// Also write the report as JSON to this path.
    #[arg(long)]
    pub report_json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct GenerateConfig {
    /// Number of drivers.
    #[arg(long, default_value_t = 10)]
    pub drivers: usize,
    /// Number of riders.
    #[arg(long, default_value_t = 50)]
    pub riders: usize,
    /// Random seed; omit for a fresh scenario each time.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Side length of the square grid.
    #[arg(long, default_value_t = 20)]
    pub grid_size: i64,
    /// Rider requests are spread over `0..=request_window`.
    #[arg(long, default_value_t = 120)]
    pub request_window: u64,
    /// Output path; the log goes to stdout when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MatchingArg {
    Simple,
    FastestArrival,
}

impl From<MatchingArg> for MatchingAlgorithmType {
    fn from(arg: MatchingArg) -> Self {
        match arg {
            MatchingArg::Simple => MatchingAlgorithmType::Simple,
            MatchingArg::FastestArrival => MatchingAlgorithmType::FastestArrival,
        }
    }
}
