//! hornsat CLI - Command-line interface for the Horn-SAT engine.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "hornsat")]
#[command(author, version, about = "Linear-time Horn-SAT Solver", long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to $HORNSAT_CONFIG, then ./hornsat.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a Horn formula
    Solve(commands::solve::SolveArgs),
    /// Convert between file formats
    Convert(commands::convert::ConvertArgs),
    /// Solve every formula in a directory
    Batch(commands::batch::BatchArgs),
    /// Run Horn case files against their expectations
    Check(commands::check::CheckArgs),
    /// Profile solver performance
    Profile(commands::profile::ProfileArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Solve(args) => commands::solve::run(args, &config),
        Commands::Convert(args) => commands::convert::run(args, &config),
        Commands::Batch(args) => commands::batch::run(args, &config),
        Commands::Check(args) => commands::check::run(args),
        Commands::Profile(args) => commands::profile::run(args, &config),
    }
}
