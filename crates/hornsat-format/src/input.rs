//! Input format detection and loading.

use crate::cases::HornCases;
use crate::formula::Formula;
use hornsat_base::{Error, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Formats a formula can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Formula JSON.
    Json,
    /// Horn text.
    Horn,
    /// Horn case file holding exactly one case.
    Cases,
}

impl InputFormat {
    /// Guesses the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "horn" | "txt" => Some(Self::Horn),
            "case" | "cases" => Some(Self::Cases),
            _ => None,
        }
    }

    /// Parses `content` in this format.
    pub fn parse(self, content: &str) -> Result<Formula> {
        match self {
            Self::Json => Formula::from_json(content),
            Self::Horn => Formula::from_text(content),
            Self::Cases => {
                let mut cases = HornCases::from_json(content)?.into_vec();
                if cases.len() != 1 {
                    return Err(Error::Serialization(format!(
                        "expected exactly one case, found {}",
                        cases.len()
                    )));
                }
                cases.remove(0).formula()
            }
        }
    }

    /// Reads and parses a file. `format` overrides extension detection;
    /// unknown extensions fall back to Horn text.
    pub fn load(path: &Path, format: Option<Self>) -> Result<Formula> {
        let format = format
            .or_else(|| Self::from_path(path))
            .unwrap_or(Self::Horn);
        let content = std::fs::read_to_string(path)?;
        format.parse(&content)
    }

    /// Canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Horn => "horn",
            Self::Cases => "cases",
        }
    }
}

impl FromStr for InputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "horn" | "text" | "txt" => Ok(Self::Horn),
            "case" | "cases" => Ok(Self::Cases),
            other => Err(Error::Serialization(format!("Unknown format: {other}"))),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
