//! Model and conflict reporting.
//!
//! Projects a finished propagation onto a [`SatResult`]. Justifications are
//! recovered by walking the trace backward from a clause's antecedents; the
//! propagator is never re-run.

use crate::clause_db::ClauseStore;
use crate::propagate::{Assignment, Outcome};
use crate::trace::Trace;
use hornsat_base::{ClauseId, ClauseKind, VarId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One derivation step of a justification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JustificationStep {
    /// Variable that was set true.
    pub variable: String,
    /// Clause that set it.
    pub clause: ClauseId,
    /// Kind of that clause.
    pub kind: ClauseKind,
    /// Trace step of the firing.
    pub step: usize,
}

impl fmt::Display for JustificationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} via {} {}", self.variable, self.kind.as_str(), self.clause)
    }
}

/// Verdict of a solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SatResult {
    /// Satisfiable; `model` holds exactly the variables of the minimal model.
    Sat { model: BTreeSet<String> },
    /// Unsatisfiable; `conflict_clause` is the violated goal.
    Unsat {
        conflict_clause: ClauseId,
        justification: Vec<JustificationStep>,
    },
}

impl SatResult {
    /// Returns whether the formula is satisfiable.
    #[must_use]
    pub fn is_sat(&self) -> bool {
        matches!(self, Self::Sat { .. })
    }

    /// The minimal model, if satisfiable.
    #[must_use]
    pub fn model(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Sat { model } => Some(model),
            Self::Unsat { .. } => None,
        }
    }

    /// The violated goal, if unsatisfiable.
    #[must_use]
    pub fn conflict_clause(&self) -> Option<ClauseId> {
        match self {
            Self::Sat { .. } => None,
            Self::Unsat {
                conflict_clause, ..
            } => Some(*conflict_clause),
        }
    }

    /// The justification, empty when satisfiable.
    #[must_use]
    pub fn justification(&self) -> &[JustificationStep] {
        match self {
            Self::Sat { .. } => &[],
            Self::Unsat { justification, .. } => justification,
        }
    }
}

/// Read-only view over a store and a finished trace.
pub struct Reporter<'a> {
    store: &'a ClauseStore,
    trace: &'a Trace,
    /// Step that set each variable, indexed by `VarId`.
    reasons: Vec<Option<usize>>,
}

impl<'a> Reporter<'a> {
    /// Indexes the trace by variable.
    ///
    /// Events naming a variable or clause unknown to `store` (a trace taken
    /// from another solver) are ignored.
    #[must_use]
    pub fn new(store: &'a ClauseStore, trace: &'a Trace) -> Self {
        let mut reasons = vec![None; store.num_vars()];
        for event in trace.events() {
            if event.clause.index() >= store.num_clauses() {
                continue;
            }
            if let Some(reason) = reasons.get_mut(event.head.index()) {
                *reason = Some(event.step);
            }
        }
        Self {
            store,
            trace,
            reasons,
        }
    }

    /// Builds the result for a terminal outcome.
    #[must_use]
    pub fn report(&self, outcome: Outcome, assignment: &Assignment) -> SatResult {
        match outcome {
            Outcome::Saturated => SatResult::Sat {
                model: assignment
                    .true_vars()
                    .map(|v| self.store.var_name(v).to_owned())
                    .collect(),
            },
            Outcome::Conflict(clause) => SatResult::Unsat {
                conflict_clause: clause,
                justification: self.justify(clause),
            },
        }
    }

    /// Derivation of every antecedent of `clause`, ordered by step.
    #[must_use]
    pub fn justify(&self, clause: ClauseId) -> Vec<JustificationStep> {
        self.walk(self.store.clause(clause).antecedents.iter().copied())
    }

    /// Derivation of a single variable, ordered by step. Empty if `var` was
    /// never set or is unknown to the store.
    #[must_use]
    pub fn explain(&self, var: VarId) -> Vec<JustificationStep> {
        self.walk(std::iter::once(var))
    }

    /// Like [`Self::explain`], by name. Unknown names yield an empty list.
    #[must_use]
    pub fn explain_name(&self, name: &str) -> Vec<JustificationStep> {
        self.store
            .var_id(name)
            .map(|var| self.explain(var))
            .unwrap_or_default()
    }

    fn walk(&self, roots: impl Iterator<Item = VarId>) -> Vec<JustificationStep> {
        let mut visited = vec![false; self.store.num_vars()];
        let mut stack: Vec<VarId> = roots.collect();
        let mut steps = Vec::new();

        while let Some(var) = stack.pop() {
            let Some(seen) = visited.get_mut(var.index()) else {
                continue;
            };
            if std::mem::replace(seen, true) {
                continue;
            }
            let Some(step) = self.reasons[var.index()] else {
                continue;
            };
            steps.push(step);
            let Some(event) = self.trace.get(step) else {
                continue;
            };
            stack.extend(self.store.clause(event.clause).antecedents.iter().copied());
        }

        steps.sort_unstable();
        steps
            .into_iter()
            .filter_map(|step| self.trace.get(step))
            .map(|event| JustificationStep {
                variable: event.head_name.to_string(),
                clause: event.clause,
                kind: self.store.clause(event.clause).kind(),
                step: event.step,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagate::Propagator;
    use crate::solver::EngineConfig;
    use hornsat_format::Formula;

    fn result(formula: &Formula) -> SatResult {
        let store = ClauseStore::build(formula).unwrap();
        let state = Propagator::new(&store, &EngineConfig::default()).run();
        Reporter::new(&store, &state.trace).report(state.outcome, &state.assignment)
    }

    #[test]
    fn test_chain_justification() {
        let formula = Formula::new().fact("a").rule(["a"], "b").goal(["b"]);
        let result = result(&formula);

        assert_eq!(result.conflict_clause(), Some(ClauseId(2)));
        let shown: Vec<String> = result.justification().iter().map(|s| s.to_string()).collect();
        assert_eq!(shown, vec!["a via FACT #0", "b via RULE #1"]);
    }

    #[test]
    fn test_unrelated_firings_excluded() {
        let formula = Formula::new()
            .fact("noise")
            .fact("a")
            .rule(["noise"], "more")
            .rule(["a"], "b")
            .goal(["b"]);
        let result = result(&formula);

        let vars: Vec<_> = result
            .justification()
            .iter()
            .map(|s| s.variable.as_str())
            .collect();
        assert_eq!(vars, vec!["a", "b"]);
    }

    #[test]
    fn test_shared_antecedent_listed_once() {
        let formula = Formula::new()
            .fact("a")
            .rule(["a"], "b")
            .rule(["a"], "c")
            .goal(["b", "c"]);
        let result = result(&formula);

        let steps: Vec<_> = result.justification().iter().map(|s| s.step).collect();
        assert_eq!(steps, vec![0, 1, 2]);
    }

    #[test]
    fn test_sat_model_is_sorted_set() {
        let formula = Formula::new().fact("z").fact("a").rule(["a"], "m");
        let result = result(&formula);
        let model: Vec<_> = result.model().unwrap().iter().cloned().collect();
        assert_eq!(model, vec!["a", "m", "z"]);
        assert!(result.justification().is_empty());
    }

    #[test]
    fn test_explain() {
        let formula = Formula::new()
            .fact("a")
            .fact("x")
            .rule(["a"], "b")
            .rule(["b", "x"], "c");
        let store = ClauseStore::build(&formula).unwrap();
        let state = Propagator::new(&store, &EngineConfig::default()).run();
        let reporter = Reporter::new(&store, &state.trace);

        let vars: Vec<_> = reporter
            .explain_name("c")
            .into_iter()
            .map(|s| s.variable)
            .collect();
        assert_eq!(vars, vec!["a", "x", "b", "c"]);
        assert!(reporter.explain_name("missing").is_empty());
    }

    #[test]
    fn test_foreign_trace_is_ignored() {
        let big_formula = Formula::new().fact("a").fact("b").rule(["a", "b"], "c");
        let big = ClauseStore::build(&big_formula).unwrap();
        let big_state = Propagator::new(&big, &EngineConfig::default()).run();

        let small = ClauseStore::build(&Formula::new().fact("a")).unwrap();
        let reporter = Reporter::new(&small, &big_state.trace);
        assert_eq!(reporter.explain_name("a").len(), 1);
        assert!(reporter.explain(VarId(7)).is_empty());
    }

    #[test]
    fn test_result_json_shape() {
        let unsat = result(&Formula::new().fact("a").goal(["a"]));
        let json = serde_json::to_value(&unsat).unwrap();
        assert_eq!(json["status"], "unsat");
        assert_eq!(json["conflict_clause"], 1);
        assert_eq!(json["justification"][0]["variable"], "a");
        assert_eq!(json["justification"][0]["clause"], 0);
        assert_eq!(json["justification"][0]["kind"], "fact");

        let sat = result(&Formula::new().fact("a"));
        let json = serde_json::to_value(&sat).unwrap();
        assert_eq!(json["status"], "sat");
        assert_eq!(json["model"][0], "a");
    }
}
