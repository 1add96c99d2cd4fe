//! Identifier types shared by every stage of a solve.
//!
//! Variables and clauses live in dense arenas; both are addressed by small
//! `Copy` indices rather than references so that the dependency index can
//! point from variables back to clauses without ownership cycles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense index of an interned variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VarId(pub u32);

impl VarId {
    /// Returns the index as `usize` for arena lookups.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Position of a clause in the submitted formula.
///
/// Clause ids are assigned in input order, so they double as the stable
/// identifiers reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClauseId(pub u32);

impl ClauseId {
    /// Returns the index as `usize` for arena lookups.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Canonical shape of a Horn clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClauseKind {
    /// Head with no antecedents: `1 → h`.
    Fact,
    /// Antecedents implying a head: `(a ∧ b) → h`.
    Rule,
    /// Antecedents implying false: `(a ∧ b) → 0`.
    Goal,
}

impl ClauseKind {
    /// Classifies a clause from its antecedent count and head presence.
    ///
    /// A headed clause with no antecedents is a fact no matter how it was
    /// written.
    #[must_use]
    pub const fn classify(antecedents: usize, has_head: bool) -> Self {
        match (antecedents, has_head) {
            (_, false) => Self::Goal,
            (0, true) => Self::Fact,
            (_, true) => Self::Rule,
        }
    }

    /// Returns the upper-case tag used in listings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fact => "FACT",
            Self::Rule => "RULE",
            Self::Goal => "GOAL",
        }
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
