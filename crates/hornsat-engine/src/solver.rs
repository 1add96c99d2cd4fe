//! Horn-SAT solve sessions.

use crate::clause_db::ClauseStore;
use crate::propagate::Propagator;
use crate::report::{JustificationStep, Reporter, SatResult};
use crate::trace::Trace;
use hornsat_base::Result;
use hornsat_format::Formula;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Configuration for the Horn solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Keep the counter decrements of every firing in the trace.
    pub record_counters: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            record_counters: true,
        }
    }
}

/// Solver statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverStats {
    /// Clauses taken off the worklist.
    pub clause_pops: u64,
    /// Clauses ever put on the worklist.
    pub enqueued: u64,
    /// Firings that set a new variable.
    pub firings: u64,
    /// Firings whose head was already true.
    pub redundant_firings: u64,
    /// Dependency edges followed.
    pub edge_visits: u64,
    /// Violated goals found (0 or 1).
    pub conflicts: u64,
}

/// The outcome of one solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Verdict with model or justification.
    pub result: SatResult,
    /// Full propagation log.
    pub trace: Trace,
    /// Work counters.
    pub stats: SolverStats,
}

impl Solution {
    /// Returns whether the formula is satisfiable.
    #[must_use]
    pub fn is_sat(&self) -> bool {
        self.result.is_sat()
    }

    /// The minimal model, if satisfiable.
    #[must_use]
    pub fn model(&self) -> Option<&BTreeSet<String>> {
        self.result.model()
    }
}

/// The main Horn solver.
///
/// Holds only the immutable clause store; every call to [`HornSolver::solve`]
/// allocates its own assignment, counters and trace.
#[derive(Debug, Clone)]
pub struct HornSolver {
    store: ClauseStore,
    config: EngineConfig,
}

impl HornSolver {
    /// Creates a new solver from a formula.
    pub fn new(formula: &Formula) -> Result<Self> {
        Self::with_config(formula, EngineConfig::default())
    }

    /// Creates a new solver with custom configuration.
    pub fn with_config(formula: &Formula, config: EngineConfig) -> Result<Self> {
        Ok(Self::from_store(ClauseStore::build(formula)?, config))
    }

    /// Wraps an already built store.
    #[must_use]
    pub fn from_store(store: ClauseStore, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// The clause store.
    #[must_use]
    pub fn store(&self) -> &ClauseStore {
        &self.store
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Solves the formula.
    #[must_use]
    pub fn solve(&self) -> Solution {
        tracing::debug!(
            "Solving {} clauses over {} variables",
            self.store.num_clauses(),
            self.store.num_vars()
        );

        let state = Propagator::new(&self.store, &self.config).run();
        let result = Reporter::new(&self.store, &state.trace).report(state.outcome, &state.assignment);

        tracing::debug!(
            "Finished: {} after {} steps ({} edge visits)",
            if result.is_sat() { "SAT" } else { "UNSAT" },
            state.trace.len(),
            state.stats.edge_visits
        );

        Solution {
            result,
            trace: state.trace,
            stats: state.stats,
        }
    }

    /// Derivation of `name` in a previous solution's trace. Events the store
    /// does not know (a solution from another solver) are skipped.
    #[must_use]
    pub fn explain(&self, solution: &Solution, name: &str) -> Vec<JustificationStep> {
        Reporter::new(&self.store, &solution.trace).explain_name(name)
    }
}

/// Builds a store for `formula` and solves it once.
pub fn solve(formula: &Formula) -> Result<Solution> {
    Ok(HornSolver::new(formula)?.solve())
}
