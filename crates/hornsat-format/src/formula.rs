//! Formula JSON format.
//!
//! The native input of the engine: an ordered list of Horn clauses written
//! as facts, rules and goals. Clause order is significant; it fixes clause
//! ids and therefore the order of the propagation trace.

use hornsat_base::{ClauseKind, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A single Horn clause as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ClauseSpec {
    /// `1 → head`
    Fact { head: String },
    /// `(antecedents) → head`
    Rule { antecedents: Vec<String>, head: String },
    /// `(antecedents) → 0`
    Goal { antecedents: Vec<String> },
}

impl ClauseSpec {
    /// Creates a fact.
    pub fn fact(head: impl Into<String>) -> Self {
        Self::Fact { head: head.into() }
    }

    /// Creates a rule.
    pub fn rule<I, S>(antecedents: I, head: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Rule {
            antecedents: antecedents.into_iter().map(Into::into).collect(),
            head: head.into(),
        }
    }

    /// Creates a goal (integrity constraint).
    pub fn goal<I, S>(antecedents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Goal {
            antecedents: antecedents.into_iter().map(Into::into).collect(),
        }
    }

    /// Antecedent names, empty for facts.
    #[must_use]
    pub fn antecedents(&self) -> &[String] {
        match self {
            Self::Fact { .. } => &[],
            Self::Rule { antecedents, .. } | Self::Goal { antecedents } => antecedents,
        }
    }

    /// Head name, `None` for goals.
    #[must_use]
    pub fn head(&self) -> Option<&str> {
        match self {
            Self::Fact { head } | Self::Rule { head, .. } => Some(head),
            Self::Goal { .. } => None,
        }
    }

    /// Canonical kind; a rule without antecedents counts as a fact.
    #[must_use]
    pub fn kind(&self) -> ClauseKind {
        ClauseKind::classify(self.antecedents().len(), self.head().is_some())
    }

    /// Evaluates the clause under `truth`, where unnamed variables are false.
    pub fn is_satisfied_by<F>(&self, truth: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        if !self.antecedents().iter().all(|a| truth(a.as_str())) {
            return true;
        }
        self.head().is_some_and(truth)
    }
}

impl fmt::Display for ClauseSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let antecedents = self.antecedents();
        match antecedents.len() {
            0 => f.write_str("1")?,
            1 => f.write_str(&antecedents[0])?,
            _ => write!(f, "({})", antecedents.join(" ∧ "))?,
        }
        write!(f, " → {}", self.head().unwrap_or("0"))
    }
}

/// An ordered set of Horn clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    /// Clauses in submission order.
    pub clauses: Vec<ClauseSpec>,
}

impl Formula {
    /// Creates an empty formula.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fact.
    #[must_use]
    pub fn fact(mut self, head: impl Into<String>) -> Self {
        self.clauses.push(ClauseSpec::fact(head));
        self
    }

    /// Appends a rule.
    #[must_use]
    pub fn rule<I, S>(mut self, antecedents: I, head: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clauses.push(ClauseSpec::rule(antecedents, head));
        self
    }

    /// Appends a goal.
    #[must_use]
    pub fn goal<I, S>(mut self, antecedents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clauses.push(ClauseSpec::goal(antecedents));
        self
    }

    /// Appends a clause in place.
    pub fn push(&mut self, clause: ClauseSpec) {
        self.clauses.push(clause);
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns whether the formula has no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Iterates over the clauses in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ClauseSpec> {
        self.clauses.iter()
    }

    /// Distinct variable names in first-seen order (antecedents before head).
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for clause in &self.clauses {
            let names = clause.antecedents().iter().map(String::as_str);
            for name in names.chain(clause.head()) {
                if seen.insert(name) {
                    out.push(name);
                }
            }
        }
        out
    }

    /// Indices of the clauses falsified when exactly `true_vars` are true.
    pub fn violated_by<I, S>(&self, true_vars: I) -> Vec<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let owned: Vec<S> = true_vars.into_iter().collect();
        let truth: HashSet<&str> = owned.iter().map(|s| s.as_ref()).collect();
        self.clauses
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_satisfied_by(|name| truth.contains(name)))
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns whether setting exactly `true_vars` to true satisfies every clause.
    pub fn is_model<I, S>(&self, true_vars: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.violated_by(true_vars).is_empty()
    }

    /// Parses from JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses from JSON reader.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes to JSON writer.
    pub fn to_writer<W: std::io::Write>(&self, writer: W) -> Result<()> {
        Ok(serde_json::to_writer_pretty(writer, self)?)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clauses.is_empty() {
            return f.write_str("1");
        }
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" ∧ ")?;
            }
            write!(f, "({clause})")?;
        }
        Ok(())
    }
}

impl FromIterator<ClauseSpec> for Formula {
    fn from_iter<T: IntoIterator<Item = ClauseSpec>>(iter: T) -> Self {
        Self {
            clauses: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Formula {
    type Item = &'a ClauseSpec;
    type IntoIter = std::slice::Iter<'a, ClauseSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Formula {
        Formula::new().fact("a").rule(["a"], "b").goal(["b"])
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(chain()).unwrap();
        assert_eq!(json["clauses"][0]["kind"], "fact");
        assert_eq!(json["clauses"][1]["antecedents"][0], "a");
        assert_eq!(json["clauses"][2]["kind"], "goal");
        assert!(json["clauses"][2].get("head").is_none());
    }

    #[test]
    fn test_from_json() {
        let input = r#"{"clauses":[
            {"kind":"fact","head":"rain"},
            {"kind":"rule","antecedents":["rain","cold"],"head":"snow"}
        ]}"#;
        let formula = Formula::from_json(input).unwrap();
        assert_eq!(formula.len(), 2);
        assert_eq!(formula.clauses[1].kind(), ClauseKind::Rule);
        assert_eq!(formula.clauses[1].head(), Some("snow"));
    }

    #[test]
    fn test_reader_and_writer() {
        let input = br#"{"clauses":[{"kind":"fact","head":"a"},{"kind":"goal","antecedents":["a"]}]}"#;
        let formula = Formula::from_reader(&input[..]).unwrap();
        assert_eq!(formula, Formula::new().fact("a").goal(["a"]));

        let mut out = Vec::new();
        formula.to_writer(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("\"goal\""));
        assert!(Formula::from_reader(&b"{"[..]).is_err());
    }

    #[test]
    fn test_from_json_rejects_unknown_kind() {
        let err = Formula::from_json(r#"{"clauses":[{"kind":"maybe","head":"a"}]}"#);
        assert!(matches!(err, Err(hornsat_base::Error::Serialization(_))));
    }

    #[test]
    fn test_horn_notation() {
        let formula = Formula::new()
            .fact("a")
            .rule(["a", "b"], "c")
            .goal(["c"]);
        assert_eq!(formula.clauses[0].to_string(), "1 → a");
        assert_eq!(formula.clauses[1].to_string(), "(a ∧ b) → c");
        assert_eq!(formula.clauses[2].to_string(), "c → 0");
        assert_eq!(formula.to_string(), "(1 → a) ∧ ((a ∧ b) → c) ∧ (c → 0)");
        assert_eq!(Formula::new().to_string(), "1");
    }

    #[test]
    fn test_empty_rule_is_fact() {
        let clause = ClauseSpec::rule(Vec::<String>::new(), "a");
        assert_eq!(clause.kind(), ClauseKind::Fact);
        assert_eq!(ClauseSpec::goal(Vec::<String>::new()).kind(), ClauseKind::Goal);
    }

    #[test]
    fn test_model_check() {
        let formula = Formula::new().fact("a").rule(["a"], "b");
        assert!(formula.is_model(["a", "b"]));
        assert!(formula.is_model(["a", "b", "unrelated"]));
        assert_eq!(formula.violated_by(["a"]), vec![1]);
        assert_eq!(formula.violated_by(Vec::<String>::new()), vec![0]);
        assert!(!chain().is_model(["a", "b"]));
    }

    #[test]
    fn test_variables_first_seen() {
        let formula = Formula::new().rule(["b", "a"], "c").fact("a").goal(["d"]);
        assert_eq!(formula.variables(), vec!["b", "a", "c", "d"]);
    }
}
