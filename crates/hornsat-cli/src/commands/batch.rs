//! Batch command.

use crate::config::CliConfig;
use clap::Args;
use hornsat_engine::{HornSolver, SatResult, SolverStats};
use hornsat_format::InputFormat;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Input directory containing formula files
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Output directory for results
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Number of parallel workers (0 = auto, default from config)
    #[arg(long)]
    pub workers: Option<usize>,
}

#[derive(Debug, Serialize)]
struct BatchResult {
    file: String,
    status: String,
    time_ms: u128,
    variables: usize,
    clauses: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<SatResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<SolverStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Per-status file counts of a batch run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub sat: usize,
    pub unsat: usize,
    pub failed: usize,
}

pub fn run(args: BatchArgs, config: &CliConfig) -> anyhow::Result<()> {
    let summary = run_batch(&args, config)?;
    println!(
        "c {} files: {} SAT, {} UNSAT, {} failed",
        summary.sat + summary.unsat + summary.failed,
        summary.sat,
        summary.unsat,
        summary.failed
    );
    Ok(())
}

pub fn run_batch(args: &BatchArgs, config: &CliConfig) -> anyhow::Result<BatchSummary> {
    tracing::info!("Starting batch processing from {:?}", args.input_dir);

    if !args.output_dir.exists() {
        fs::create_dir_all(&args.output_dir)?;
    }

    // Collect files
    let mut files = Vec::new();
    for entry in WalkDir::new(&args.input_dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && InputFormat::from_path(path).is_some() {
            files.push(path.to_owned());
        }
    }

    tracing::info!("Found {} files to process", files.len());

    let workers = args.workers.unwrap_or(config.workers);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;

    // Process in parallel
    let results: Vec<BatchResult> = pool.install(|| {
        files
            .par_iter()
            .map(|file_path| process_file(file_path, &args.input_dir, &args.output_dir, config))
            .collect()
    });

    let mut summary = BatchSummary::default();
    for result in &results {
        match result.status.as_str() {
            "SAT" => summary.sat += 1,
            "UNSAT" => summary.unsat += 1,
            _ => summary.failed += 1,
        }
    }

    tracing::info!("Batch processing complete");
    Ok(summary)
}

fn process_file(path: &Path, input_dir: &Path, output_dir: &Path, config: &CliConfig) -> BatchResult {
    let start = Instant::now();
    let filename = path.strip_prefix(input_dir).unwrap_or(path).display().to_string();

    tracing::info!("Processing {}", filename);

    let mut batch_result = match solve_file(path, config) {
        Ok((solver, result, stats)) => BatchResult {
            file: filename.clone(),
            status: if result.is_sat() { "SAT" } else { "UNSAT" }.to_string(),
            time_ms: 0,
            variables: solver.store().num_vars(),
            clauses: solver.store().num_clauses(),
            result: Some(result),
            stats: Some(stats),
            error: None,
        },
        Err(e) => {
            tracing::error!("Failed to process {}: {:#}", filename, e);
            BatchResult {
                file: filename.clone(),
                status: "ERROR".to_string(),
                time_ms: 0,
                variables: 0,
                clauses: 0,
                result: None,
                stats: None,
                error: Some(format!("{e:#}")),
            }
        }
    };
    let duration = start.elapsed();
    batch_result.time_ms = duration.as_millis();

    let result_file = result_path(path, input_dir, output_dir);
    let written = result_file
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|()| fs::File::create(&result_file))
        .map_err(anyhow::Error::from)
        .and_then(|f| serde_json::to_writer_pretty(f, &batch_result).map_err(Into::into));
    if let Err(e) = written {
        tracing::error!("Failed to write {}: {}", result_file.display(), e);
        batch_result.status = "ERROR".to_string();
    }

    tracing::info!(
        "Finished {} [{}] in {}ms",
        filename,
        batch_result.status,
        duration.as_millis()
    );
    batch_result
}

/// Result location for `path`: its path relative to `input_dir`, mirrored
/// under `output_dir`, with `.json` appended to the full file name
/// (`x/p.horn` → `x/p.horn.json`).
fn result_path(path: &Path, input_dir: &Path, output_dir: &Path) -> PathBuf {
    let relative = path
        .strip_prefix(input_dir)
        .unwrap_or_else(|_| Path::new(path.file_name().unwrap_or_default()));
    let mut name = relative.as_os_str().to_owned();
    name.push(".json");
    output_dir.join(name)
}

fn solve_file(
    path: &Path,
    config: &CliConfig,
) -> anyhow::Result<(HornSolver, SatResult, SolverStats)> {
    let formula = super::load_formula(path, None, config)?;
    let solver = HornSolver::with_config(&formula, config.engine_config())?;
    let solution = solver.solve();
    Ok((solver, solution.result, solution.stats))
}
