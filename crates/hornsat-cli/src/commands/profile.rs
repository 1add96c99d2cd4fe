//! Profile command.

use crate::config::CliConfig;
use clap::Args;
use hornsat_engine::{HornSolver, SolverStats};
use hornsat_format::InputFormat;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Args)]
pub struct ProfileArgs {
    /// Input file path
    #[arg(required = true)]
    pub input: PathBuf,

    /// Input format (auto-detect from extension if not specified)
    #[arg(short, long)]
    pub format: Option<InputFormat>,

    /// Output file for profiling data (JSON)
    #[arg(short, long, default_value = "profile.json")]
    pub output: PathBuf,

    /// Number of runs for averaging
    #[arg(short, long, default_value = "1")]
    pub runs: usize,
}

#[derive(Debug, Serialize)]
pub struct ProfileReport {
    pub file: String,
    pub runs: usize,
    pub variables: usize,
    pub clauses: usize,
    pub edges: usize,
    pub status: &'static str,
    pub trace_len: usize,
    pub build_ms: f64,
    pub mean_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub stats: SolverStats,
}

pub fn run(args: ProfileArgs, config: &CliConfig) -> anyhow::Result<()> {
    tracing::info!("Profiling {} with {} runs", args.input.display(), args.runs);

    let report = profile(&args, config)?;
    fs::write(&args.output, serde_json::to_string_pretty(&report)?)?;

    println!(
        "c {} {}: mean {:.3}ms over {} runs ({} edge visits)",
        report.file, report.status, report.mean_ms, report.runs, report.stats.edge_visits
    );
    tracing::info!("Wrote profile to {}", args.output.display());
    Ok(())
}

pub fn profile(args: &ProfileArgs, config: &CliConfig) -> anyhow::Result<ProfileReport> {
    if args.runs == 0 {
        anyhow::bail!("--runs must be at least 1");
    }
    let formula = super::load_formula(&args.input, args.format, config)?;

    let start = Instant::now();
    let solver = HornSolver::with_config(&formula, config.engine_config())?;
    let build = start.elapsed();

    let mut times = Vec::with_capacity(args.runs);
    let mut last = None;
    for run in 0..args.runs {
        let start = Instant::now();
        let solution = solver.solve();
        let elapsed = start.elapsed();
        tracing::debug!("Run {}: {:?}", run, elapsed);
        times.push(elapsed);
        last = Some(solution);
    }
    let Some(solution) = last else {
        anyhow::bail!("no runs completed");
    };

    let total: Duration = times.iter().sum();
    let ms = |d: Duration| d.as_secs_f64() * 1000.0;
    let store = solver.store();

    Ok(ProfileReport {
        file: args.input.display().to_string(),
        runs: args.runs,
        variables: store.num_vars(),
        clauses: store.num_clauses(),
        edges: store.num_edges(),
        status: if solution.is_sat() { "SAT" } else { "UNSAT" },
        trace_len: solution.trace.len(),
        build_ms: ms(build),
        mean_ms: ms(total) / args.runs as f64,
        min_ms: times.iter().copied().map(ms).fold(f64::INFINITY, f64::min),
        max_ms: times.iter().copied().map(ms).fold(0.0, f64::max),
        stats: solution.stats,
    })
}
