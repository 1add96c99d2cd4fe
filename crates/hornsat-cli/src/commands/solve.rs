//! Solve command.

use crate::config::CliConfig;
use anyhow::Context;
use clap::Args;
use hornsat_engine::{ClauseStore, HornSolver, SatResult};
use hornsat_format::InputFormat;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Args)]
pub struct SolveArgs {
    /// Input file path
    #[arg(required = true)]
    pub input: PathBuf,

    /// Input format (auto-detect from extension if not specified)
    #[arg(short, long)]
    pub format: Option<InputFormat>,

    /// Output file for the result (JSON)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output file for the propagation trace (JSON)
    #[arg(long)]
    pub trace: Option<PathBuf>,

    /// Write the compact `{clauseId, headVariable, stepIndex}` feed instead
    /// of the full trace
    #[arg(long, requires = "trace")]
    pub feed: bool,

    /// Print the derivation of a variable of the model
    #[arg(long)]
    pub explain: Option<String>,
}

pub fn run(args: SolveArgs, config: &CliConfig) -> anyhow::Result<()> {
    let formula = super::load_formula(&args.input, args.format, config)?;

    let solver = HornSolver::with_config(&formula, config.engine_config())?;
    tracing::info!(
        "Problem: {} variables, {} clauses, {} antecedent edges",
        solver.store().num_vars(),
        solver.store().num_clauses(),
        solver.store().num_edges()
    );

    let start = Instant::now();
    let solution = solver.solve();
    let elapsed = start.elapsed();

    for line in result_lines(&solution.result, solver.store()) {
        println!("{line}");
    }

    if let Some(name) = &args.explain {
        let steps = solver.explain(&solution, name);
        if steps.is_empty() {
            println!("c {name} is false");
        }
        for step in steps {
            println!("c {step}");
        }
    }

    if let Some(output) = &args.output {
        let json = serde_json::to_string_pretty(&solution.result)?;
        fs::write(output, json).with_context(|| format!("Failed to write {}", output.display()))?;
    }

    if let Some(path) = &args.trace {
        let json = if args.feed {
            solution.trace.feed_json()?
        } else {
            solution.trace.to_json()?
        };
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote {} trace events to {}", solution.trace.len(), path.display());
    }

    tracing::info!("Solved in {:?}", elapsed);
    println!("c Time: {:.3}s", elapsed.as_secs_f64());

    Ok(())
}

/// Renders a result as `s`/`v`/`c`/`j` lines.
pub fn result_lines(result: &SatResult, store: &ClauseStore) -> Vec<String> {
    match result {
        SatResult::Sat { model } => {
            let vars: Vec<&str> = model.iter().map(String::as_str).collect();
            vec!["s SATISFIABLE".to_string(), format!("v {}", vars.join(" "))]
        }
        SatResult::Unsat {
            conflict_clause,
            justification,
        } => {
            let mut lines = vec![
                "s UNSATISFIABLE".to_string(),
                format!(
                    "c conflict {}: {}",
                    conflict_clause,
                    store.to_spec(*conflict_clause)
                ),
            ];
            lines.extend(justification.iter().map(|step| {
                format!(
                    "j {} {} {}",
                    step.variable,
                    step.clause,
                    store.to_spec(step.clause)
                )
            }));
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hornsat_format::Formula;

    fn lines(formula: &Formula) -> Vec<String> {
        let solver = HornSolver::new(formula).unwrap();
        result_lines(&solver.solve().result, solver.store())
    }

    #[test]
    fn test_sat_lines() {
        let out = lines(&Formula::new().fact("b").rule(["b"], "a"));
        assert_eq!(out, vec!["s SATISFIABLE", "v a b"]);
    }

    #[test]
    fn test_unsat_lines() {
        let out = lines(&Formula::new().fact("a").rule(["a"], "b").goal(["b"]));
        assert_eq!(
            out,
            vec![
                "s UNSATISFIABLE",
                "c conflict #2: b → 0",
                "j a #0 1 → a",
                "j b #1 a → b",
            ]
        );
    }

    #[test]
    fn test_writes_result_and_trace() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("chain.horn");
        fs::write(&input, "-> a\na -> b\n").unwrap();

        let args = SolveArgs {
            input,
            format: None,
            output: Some(dir.path().join("result.json")),
            trace: Some(dir.path().join("trace.json")),
            feed: true,
            explain: Some("b".into()),
        };
        run(args, &CliConfig::default()).unwrap();

        let result: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("result.json")).unwrap())
                .unwrap();
        assert_eq!(result["status"], "sat");
        assert_eq!(result["model"], serde_json::json!(["a", "b"]));

        let feed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("trace.json")).unwrap())
                .unwrap();
        assert_eq!(feed[1]["headVariable"], "b");
        assert_eq!(feed[1]["stepIndex"], 1);
    }
}
