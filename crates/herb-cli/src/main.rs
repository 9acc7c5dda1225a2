use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod scenario;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    commands::run_command(cli)
}
