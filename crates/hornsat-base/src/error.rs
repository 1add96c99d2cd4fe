//! Unified error types for hornsat.

use thiserror::Error;

/// The main error type for hornsat operations.
///
/// Only input-side problems are errors. A contradiction found while solving
/// is a regular `Unsat` outcome and never surfaces here.
#[derive(Debug, Error)]
pub enum Error {
    /// A clause that cannot be a Horn clause, or names an empty variable.
    #[error("Malformed clause #{clause}: {reason}")]
    MalformedClause { clause: usize, reason: String },

    /// Text input could not be parsed.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Shorthand for a [`Error::MalformedClause`].
    pub fn malformed(clause: usize, reason: impl Into<String>) -> Self {
        Self::MalformedClause {
            clause,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
