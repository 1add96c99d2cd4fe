//! Horn case files.
//!
//! A case is a literal-set formula bundled with the outcome it is expected to
//! produce:
//!
//! ```json
//! {"clause_set": [["a"], ["-a", "b"]], "horn_sat": true, "minimal_model": ["a", "b"]}
//! ```
//!
//! A file holds either one case object or an array of them.

use crate::formula::Formula;
use hornsat_base::Result;
use serde::{Deserialize, Serialize};

/// One literal-set formula with optional expectations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HornCase {
    /// Optional label shown in reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Clauses as lists of signed literal strings.
    pub clause_set: Vec<Vec<String>>,
    /// Expected satisfiability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horn_sat: Option<bool>,
    /// Expected minimal model, in any order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimal_model: Option<Vec<String>>,
}

impl HornCase {
    /// Converts the clause set into a formula.
    pub fn formula(&self) -> Result<Formula> {
        Formula::from_literal_clauses(&self.clause_set)
    }
}

/// Contents of a case file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HornCases {
    /// A bare case object.
    Single(HornCase),
    /// An array of cases.
    Many(Vec<HornCase>),
}

impl HornCases {
    /// Parses from JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses from JSON reader.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Flattens into a list of cases.
    #[must_use]
    pub fn into_vec(self) -> Vec<HornCase> {
        match self {
            Self::Single(case) => vec![case],
            Self::Many(cases) => cases,
        }
    }
}
