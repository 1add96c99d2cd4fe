//! Cross-format tests for hornsat-format.

use hornsat_base::Error;
use hornsat_format::{ClauseSpec, Formula, HornCases, InputFormat};
use proptest::prelude::*;

fn clause_strategy() -> impl Strategy<Value = ClauseSpec> {
    clause_with_names("[a-z][a-z0-9_]{0,4}")
}

/// Names drawn from letters, the constants and the text syntax characters.
fn hostile_clause_strategy() -> impl Strategy<Value = ClauseSpec> {
    clause_with_names("[ab01 ,&#~¬=>-]{1,3}")
}

fn clause_with_names(name: &'static str) -> impl Strategy<Value = ClauseSpec> {
    (
        prop::collection::vec(name, 0..4),
        prop::option::of(name),
    )
        .prop_map(|(antecedents, head)| match head {
            Some(head) if antecedents.is_empty() => ClauseSpec::fact(head),
            Some(head) => ClauseSpec::rule(antecedents, head),
            None => ClauseSpec::goal(antecedents),
        })
}

proptest! {
    #[test]
    fn text_and_json_preserve_formula(clauses in prop::collection::vec(clause_strategy(), 0..10)) {
        let formula: Formula = clauses.into_iter().collect();

        prop_assert_eq!(&Formula::from_text(&formula.to_text().unwrap()).unwrap(), &formula);
        prop_assert_eq!(&Formula::from_json(&formula.to_json().unwrap()).unwrap(), &formula);
    }

    #[test]
    fn literal_sets_preserve_clause_shape(clauses in prop::collection::vec(clause_strategy(), 0..10)) {
        let formula: Formula = clauses.into_iter().collect();
        let back = Formula::from_literal_clauses(formula.to_literal_clauses().unwrap()).unwrap();

        prop_assert_eq!(back.len(), formula.len());
        for (a, b) in back.iter().zip(formula.iter()) {
            prop_assert_eq!(a.kind(), b.kind());
            prop_assert_eq!(a.head(), b.head());
        }
    }

    #[test]
    fn text_output_reads_back_or_is_refused(clauses in prop::collection::vec(hostile_clause_strategy(), 0..6)) {
        let formula: Formula = clauses.into_iter().collect();
        match formula.to_text() {
            Ok(text) => prop_assert_eq!(&Formula::from_text(&text).unwrap(), &formula),
            Err(err) => prop_assert!(matches!(err, Error::Serialization(_))),
        }
    }

    #[test]
    fn literal_output_reads_back_or_is_refused(clauses in prop::collection::vec(hostile_clause_strategy(), 0..6)) {
        let formula: Formula = clauses.into_iter().collect();
        if let Ok(tokens) = formula.to_literal_clauses() {
            let back = Formula::from_literal_clauses(tokens).unwrap();
            for (a, b) in back.iter().zip(formula.iter()) {
                prop_assert_eq!(a.head(), b.head());
            }
        }
    }
}

#[test]
fn test_constant_names_do_not_change_the_formula() {
    // a variable named 0 would otherwise come back as the constant false
    let formula = Formula::new().fact("0");
    assert!(matches!(formula.to_text(), Err(Error::Serialization(_))));

    for name in ["1", "a b", "-x"] {
        assert!(Formula::new().rule([name], "b").to_text().is_err(), "{name}");
    }
}

#[test]
fn test_same_formula_from_every_notation() {
    let expected = Formula::new().fact("rain").rule(["rain", "cold"], "snow").goal(["snow"]);

    let horn = "-> rain\nrain, cold -> snow\nsnow ->\n";
    let literal = "rain\n-rain -cold snow\n-snow\n";
    let unicode = "1 → rain\nrain ∧ cold → snow\nsnow → 0\n";
    let cases = r#"{"clause_set": [["rain"], ["¬rain", "¬cold", "snow"], ["-snow"]]}"#;

    assert_eq!(InputFormat::Horn.parse(horn).unwrap(), expected);
    assert_eq!(InputFormat::Horn.parse(literal).unwrap(), expected);
    assert_eq!(InputFormat::Horn.parse(unicode).unwrap(), expected);
    assert_eq!(InputFormat::Cases.parse(cases).unwrap(), expected);
}

#[test]
fn test_non_horn_case_rejected() {
    let cases = HornCases::from_json(r#"{"clause_set": [["a", "b"]]}"#).unwrap();
    let err = cases.into_vec()[0].formula().unwrap_err();
    assert!(matches!(err, Error::MalformedClause { clause: 0, .. }));
}

#[test]
fn test_load_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chain.json");
    let formula = Formula::new().fact("a").rule(["a"], "b");
    std::fs::write(&path, formula.to_json().unwrap()).unwrap();

    assert_eq!(InputFormat::load(&path, None).unwrap(), formula);
    assert!(InputFormat::load(&path, Some(InputFormat::Horn)).is_err());
}
