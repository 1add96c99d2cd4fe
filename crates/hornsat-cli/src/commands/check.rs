//! Check command.

use anyhow::Context;
use clap::Args;
use hornsat_engine::solve;
use hornsat_format::{HornCase, HornCases};
use std::collections::BTreeSet;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Args)]
pub struct CheckArgs {
    /// Case file, or a directory searched for `.case`/`.cases` files
    #[arg(required = true)]
    pub path: PathBuf,
}

/// Outcome of a check run.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub passed: usize,
    pub failures: Vec<String>,
}

pub fn run(args: CheckArgs) -> anyhow::Result<()> {
    let report = check_path(&args.path)?;
    for failure in &report.failures {
        println!("FAIL {failure}");
    }
    println!(
        "c {} passed, {} failed",
        report.passed,
        report.failures.len()
    );
    if !report.failures.is_empty() {
        anyhow::bail!("{} case(s) did not match expectations", report.failures.len());
    }
    Ok(())
}

pub fn check_path(path: &Path) -> anyhow::Result<CheckReport> {
    let files = if path.is_dir() {
        let mut files = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry?;
            let is_case = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == "case" || e == "cases");
            if entry.file_type().is_file() && is_case {
                files.push(entry.into_path());
            }
        }
        files
    } else {
        vec![path.to_path_buf()]
    };

    let mut report = CheckReport::default();
    for file in &files {
        let reader = BufReader::new(fs::File::open(file)?);
        let cases = HornCases::from_reader(reader)
            .with_context(|| format!("Invalid case file {}", file.display()))?
            .into_vec();
        tracing::info!("Checking {} cases from {}", cases.len(), file.display());

        for (i, case) in cases.iter().enumerate() {
            let label = match &case.name {
                Some(name) => format!("{}: {}", file.display(), name),
                None => format!("{}#{}", file.display(), i),
            };
            match check_case(case) {
                Ok(()) => report.passed += 1,
                Err(reason) => report.failures.push(format!("{label}: {reason}")),
            }
        }
    }
    Ok(report)
}

/// Compares a case against its expectations. A clause set that is not Horn
/// matches only when `horn_sat` is absent and no model is expected.
fn check_case(case: &HornCase) -> Result<(), String> {
    let formula = match case.formula() {
        Ok(formula) => formula,
        Err(e) if case.horn_sat.is_none() && case.minimal_model.is_none() => {
            tracing::debug!("Skipping non-Horn case: {}", e);
            return Ok(());
        }
        Err(e) => return Err(e.to_string()),
    };
    let solution = solve(&formula).map_err(|e| e.to_string())?;

    if let Some(expected) = case.horn_sat {
        if solution.is_sat() != expected {
            return Err(format!(
                "expected horn_sat = {expected}, got {}",
                solution.is_sat()
            ));
        }
    }
    if let Some(expected) = &case.minimal_model {
        let expected: BTreeSet<String> = expected.iter().cloned().collect();
        match solution.model() {
            Some(model) if *model == expected => {}
            Some(model) => return Err(format!("expected model {expected:?}, got {model:?}")),
            None => return Err(format!("expected model {expected:?}, got UNSAT")),
        }
    }
    Ok(())
}
