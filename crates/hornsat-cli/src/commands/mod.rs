//! Subcommands.

pub mod batch;
pub mod check;
pub mod convert;
pub mod profile;
pub mod solve;

use crate::config::CliConfig;
use anyhow::Context;
use hornsat_format::{Formula, InputFormat};
use std::path::Path;

/// Picks the input format: explicit flag, then file extension, then the
/// configured default, then Horn text.
pub fn resolve_format(
    path: &Path,
    explicit: Option<InputFormat>,
    config: &CliConfig,
) -> anyhow::Result<InputFormat> {
    if let Some(format) = explicit.or_else(|| InputFormat::from_path(path)) {
        return Ok(format);
    }
    Ok(config.default_format()?.unwrap_or(InputFormat::Horn))
}

/// Loads a formula file.
pub fn load_formula(
    path: &Path,
    explicit: Option<InputFormat>,
    config: &CliConfig,
) -> anyhow::Result<Formula> {
    let format = resolve_format(path, explicit, config)?;
    tracing::info!("Loading {} as {}", path.display(), format);
    let formula = InputFormat::load(path, Some(format))
        .with_context(|| format!("Failed to load {}", path.display()))?;
    tracing::info!("Loaded {} clauses", formula.len());
    Ok(formula)
}
