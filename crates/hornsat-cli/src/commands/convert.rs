//! Convert command.

use crate::config::CliConfig;
use anyhow::Context;
use clap::Args;
use hornsat_format::{Formula, HornCase, InputFormat};
use std::fs;
use std::path::PathBuf;

#[derive(Args)]
pub struct ConvertArgs {
    /// Input file path
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output file path
    #[arg(required = true)]
    pub output: PathBuf,

    /// Input format
    #[arg(short = 'f', long)]
    pub from: Option<InputFormat>,

    /// Output format
    #[arg(short = 't', long)]
    pub to: Option<InputFormat>,
}

pub fn run(args: ConvertArgs, config: &CliConfig) -> anyhow::Result<()> {
    let formula = super::load_formula(&args.input, args.from, config)?;

    let output_format = args
        .to
        .or_else(|| InputFormat::from_path(&args.output))
        .unwrap_or(InputFormat::Json);

    // render fully before touching the output file
    let rendered = render(&formula, output_format)
        .with_context(|| format!("Cannot write {} as {}", args.input.display(), output_format))?;
    fs::write(&args.output, rendered)?;

    println!(
        "Converted {} -> {} ({})",
        args.input.display(),
        args.output.display(),
        output_format
    );
    Ok(())
}

/// Renders a formula in `format`. Fails when a variable name cannot be
/// represented in the target notation.
pub fn render(formula: &Formula, format: InputFormat) -> anyhow::Result<Vec<u8>> {
    Ok(match format {
        InputFormat::Json => {
            let mut out = Vec::new();
            formula.to_writer(&mut out)?;
            out
        }
        InputFormat::Horn => formula.to_text()?.into_bytes(),
        InputFormat::Cases => {
            let case = HornCase {
                name: None,
                clause_set: formula.to_literal_clauses()?,
                horn_sat: None,
                minimal_model: None,
            };
            serde_json::to_vec_pretty(&case)?
        }
    })
}
