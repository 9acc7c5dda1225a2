use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "greenherbs",
    about = "GreenHerbs — herbal supply-chain traceability",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Session configuration (geofence zones, journey base URL)
    #[arg(long, global = true, default_value = "greenherbs.toml")]
    pub config: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List geofence reference zones
    Zones,
    /// Check a harvest location against a species geofence
    Check(CheckArgs),
    /// Read the simulated ESP8266 field sensor
    Sense(SenseArgs),
    /// Run a scripted session and print dashboard, journeys and ledger
    Run(RunArgs),
    /// Run the bundled demo session
    Demo(ReportArgs),
}

#[derive(Args)]
pub struct CheckArgs {
    #[arg(long)]
    pub species: String,
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
}

#[derive(Args)]
pub struct SenseArgs {
    /// Seed for a reproducible reading
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,
}

#[derive(Args)]
pub struct RunArgs {
    /// Scenario file (TOML)
    pub scenario: PathBuf,
    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Args, Clone)]
pub struct ReportArgs {
    /// Only show these species on the dashboard
    #[arg(long = "species")]
    pub species: Vec<String>,
    /// Only show batches with this status on the dashboard
    #[arg(long = "status", value_enum)]
    pub statuses: Vec<StatusArg>,
    /// Skip per-batch journeys
    #[arg(long)]
    pub no_journeys: bool,
    /// Skip the ledger explorer
    #[arg(long)]
    pub no_ledger: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum StatusArg {
    Active,
    Recalled,
}
