//! Comprehensive tests for the hornsat-engine crate.

use hornsat_base::{ClauseId, ClauseKind};
use hornsat_engine::{solve, ClauseStore, EngineConfig, HornSolver, SatResult};
use hornsat_format::{Formula, HornCases};
use std::collections::BTreeSet;

fn model(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| (*s).to_owned()).collect()
}

fn chain(n: usize) -> Formula {
    let mut formula = Formula::new().fact("v0");
    for i in 1..n {
        formula = formula.rule([format!("v{}", i - 1)], format!("v{i}"));
    }
    formula
}

// =============================================================================
// Reference Scenarios
// =============================================================================

#[test]
fn test_chain_to_goal_is_unsat() {
    let formula = Formula::new().fact("a").rule(["a"], "b").goal(["b"]);
    let solution = solve(&formula).unwrap();

    let SatResult::Unsat {
        conflict_clause,
        justification,
    } = &solution.result
    else {
        panic!("expected UNSAT, got {:?}", solution.result);
    };
    assert_eq!(*conflict_clause, ClauseId(2));

    let pairs: Vec<_> = justification
        .iter()
        .map(|s| (s.variable.as_str(), s.kind))
        .collect();
    assert_eq!(pairs, vec![("a", ClauseKind::Fact), ("b", ClauseKind::Rule)]);
    assert_eq!(justification[0].clause, ClauseId(0));
    assert_eq!(justification[1].clause, ClauseId(1));
}

#[test]
fn test_chain_without_goal_is_sat() {
    let formula = Formula::new().fact("a").rule(["a"], "b");
    let solution = solve(&formula).unwrap();
    assert_eq!(solution.model(), Some(&model(&["a", "b"])));
}

#[test]
fn test_unreachable_rule_derives_nothing() {
    let formula = Formula::new().rule(["a"], "b");
    let solution = solve(&formula).unwrap();
    assert_eq!(solution.model(), Some(&model(&[])));
    assert!(solution.trace.is_empty());
}

#[test]
fn test_empty_formula_has_empty_model() {
    let solution = solve(&Formula::new()).unwrap();
    assert_eq!(solution.result, SatResult::Sat { model: model(&[]) });
    assert_eq!(solution.stats.clause_pops, 0);
}

#[test]
fn test_duplicate_fact_fires_once() {
    let formula = Formula::new().fact("a").fact("a");
    let solution = solve(&formula).unwrap();
    assert_eq!(solution.model(), Some(&model(&["a"])));
    assert_eq!(solution.trace.len(), 1);
    assert_eq!(solution.trace.events()[0].clause, ClauseId(0));
    assert_eq!(solution.stats.redundant_firings, 1);
}

// =============================================================================
// Edge Cases
// =============================================================================

#[test]
fn test_empty_goal_is_immediately_unsat() {
    let formula = Formula::new().goal(Vec::<String>::new()).fact("a");
    let solution = solve(&formula).unwrap();
    assert_eq!(solution.result.conflict_clause(), Some(ClauseId(0)));
    assert!(solution.result.justification().is_empty());
    assert!(solution.trace.is_empty());
}

#[test]
fn test_goal_on_underived_variable_is_sat() {
    let formula = Formula::new().fact("a").goal(["a", "b"]);
    let solution = solve(&formula).unwrap();
    assert_eq!(solution.model(), Some(&model(&["a"])));
}

#[test]
fn test_duplicate_antecedents_need_one_derivation() {
    let formula = Formula::new().fact("a").rule(["a", "a"], "b");
    let solution = solve(&formula).unwrap();
    assert_eq!(solution.model(), Some(&model(&["a", "b"])));
}

#[test]
fn test_cycle_without_base_fact() {
    let formula = Formula::new().rule(["a"], "b").rule(["b"], "a");
    let solution = solve(&formula).unwrap();
    assert_eq!(solution.model(), Some(&model(&[])));
}

#[test]
fn test_self_loop_is_redundant() {
    let formula = Formula::new().fact("a").rule(["a"], "a");
    let solution = solve(&formula).unwrap();
    assert_eq!(solution.trace.len(), 1);
    assert_eq!(solution.stats.redundant_firings, 1);
}

// =============================================================================
// Invariants
// =============================================================================

#[test]
fn test_determinism() {
    let formula = Formula::new()
        .fact("p")
        .fact("q")
        .rule(["p", "q"], "r")
        .rule(["q"], "s")
        .rule(["r", "s"], "t");
    let first = solve(&formula).unwrap();
    for _ in 0..5 {
        let again = solve(&formula).unwrap();
        assert_eq!(again.result, first.result);
        assert_eq!(again.trace, first.trace);
    }
}

#[test]
fn test_fifo_trace_order() {
    let formula = Formula::new()
        .fact("a")
        .fact("b")
        .rule(["a"], "c")
        .rule(["b"], "d");
    let solution = solve(&formula).unwrap();
    let heads: Vec<_> = solution.trace.feed().map(|r| r.head_variable.to_string()).collect();
    assert_eq!(heads, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_model_satisfies_formula_and_every_var_has_a_firing() {
    let formula = Formula::new()
        .fact("a")
        .rule(["a"], "b")
        .rule(["b", "c"], "d")
        .rule(["a", "b"], "e")
        .goal(["c"]);
    let solution = solve(&formula).unwrap();
    let model = solution.model().unwrap();
    assert!(formula.is_model(model));

    let fired: BTreeSet<String> = solution
        .trace
        .events()
        .iter()
        .map(|e| e.head_name.to_string())
        .collect();
    assert_eq!(&fired, model);
}

#[test]
fn test_linear_bound() {
    let formula = chain(500).rule(["v0", "v1", "v2"], "w").goal(["w", "missing"]);
    let store = ClauseStore::build(&formula).unwrap();
    let solution = HornSolver::from_store(store.clone(), EngineConfig::default()).solve();

    let budget = (store.num_edges() + store.num_clauses()) as u64;
    assert!(solution.stats.edge_visits + solution.stats.clause_pops <= budget);
    assert!(solution.stats.enqueued <= store.num_clauses() as u64);
    assert_eq!(solution.trace.len(), 501);
}

#[test]
fn test_concurrent_sessions() {
    let solver = HornSolver::new(&chain(64)).unwrap();
    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| solver.solve())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for solution in &results {
        assert_eq!(solution.model().unwrap().len(), 64);
        assert_eq!(solution.trace, results[0].trace);
    }
}

// =============================================================================
// Horn Cases
// =============================================================================

#[test]
fn test_horn_cases_match_expectations() {
    let cases = HornCases::from_json(
        r#"[
            {"name": "chain", "clause_set": [["a"], ["-a", "b"]], "horn_sat": true, "minimal_model": ["a", "b"]},
            {"name": "refuted", "clause_set": [["a"], ["-a", "b"], ["-b"]], "horn_sat": false},
            {"name": "no facts", "clause_set": [["-a", "b"], ["-b", "-c"]], "horn_sat": true, "minimal_model": []}
        ]"#,
    )
    .unwrap();

    for case in cases.into_vec() {
        let solution = solve(&case.formula().unwrap()).unwrap();
        assert_eq!(Some(solution.is_sat()), case.horn_sat, "{:?}", case.name);
        if let Some(expected) = &case.minimal_model {
            let expected: BTreeSet<String> = expected.iter().cloned().collect();
            assert_eq!(solution.model(), Some(&expected), "{:?}", case.name);
        }
    }
}
