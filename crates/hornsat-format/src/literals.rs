//! Literal-set clauses.
//!
//! A clause written as a set of signed literals: `"x"` is positive, `"-x"`,
//! `"~x"` and `"¬x"` are negative. A set with at most one positive literal
//! is a Horn clause and maps onto exactly one [`ClauseSpec`]:
//!
//! - a single positive literal is a fact,
//! - one positive and some negative literals is a rule,
//! - only negative literals (or none) is a goal.

use crate::formula::{ClauseSpec, Formula};
use hornsat_base::{Error, Result};
use std::fmt;

pub(crate) const NEGATION_PREFIXES: [char; 3] = ['-', '~', '¬'];

/// A possibly negated variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    /// Variable name.
    pub name: String,
    /// Whether the literal is positive.
    pub positive: bool,
}

impl Literal {
    /// Creates a positive literal.
    pub fn pos(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positive: true,
        }
    }

    /// Creates a negative literal.
    pub fn neg(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positive: false,
        }
    }

    /// Parses a signed literal token. Only one negation prefix is read.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        match token.strip_prefix(&NEGATION_PREFIXES[..]) {
            Some(rest) => Self::neg(rest),
            None => Self::pos(token),
        }
    }

    /// Returns the complementary literal.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            name: self.name.clone(),
            positive: !self.positive,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.positive {
            f.write_str("¬")?;
        }
        f.write_str(&self.name)
    }
}

/// A clause as a set of literals. Duplicates collapse, first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiteralClause {
    literals: Vec<Literal>,
}

impl LiteralClause {
    /// Creates a clause from literals.
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        let mut clause = Self::default();
        for lit in literals {
            if !clause.literals.contains(&lit) {
                clause.literals.push(lit);
            }
        }
        clause
    }

    /// Parses a clause from signed literal tokens.
    pub fn parse<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(tokens.into_iter().map(|t| Literal::parse(t.as_ref())))
    }

    /// All literals in insertion order.
    #[must_use]
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Number of distinct literals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Returns whether this is the empty clause.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Positive literals.
    pub fn positive(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter().filter(|l| l.positive)
    }

    /// Negative literals.
    pub fn negative(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter().filter(|l| !l.positive)
    }

    /// At most one positive literal.
    #[must_use]
    pub fn is_horn(&self) -> bool {
        self.positive().count() <= 1
    }

    /// Contains some literal together with its complement.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.positive().any(|p| self.literals.contains(&p.negated()))
    }

    /// Converts to the canonical Horn form. `index` is reported in errors.
    pub fn to_spec(&self, index: usize) -> Result<ClauseSpec> {
        if let Some(empty) = self.literals.iter().find(|l| l.name.is_empty()) {
            return Err(Error::malformed(
                index,
                format!("literal '{empty}' has an empty variable name"),
            ));
        }
        let heads: Vec<&Literal> = self.positive().collect();
        if heads.len() > 1 {
            let names: Vec<&str> = heads.iter().map(|l| l.name.as_str()).collect();
            return Err(Error::malformed(
                index,
                format!(
                    "{} positive literals ({}), a Horn clause allows at most one",
                    heads.len(),
                    names.join(", ")
                ),
            ));
        }
        let antecedents: Vec<String> = self.negative().map(|l| l.name.clone()).collect();
        Ok(match heads.first() {
            Some(head) if antecedents.is_empty() => ClauseSpec::fact(head.name.clone()),
            Some(head) => ClauseSpec::rule(antecedents, head.name.clone()),
            None => ClauseSpec::goal(antecedents),
        })
    }
}

impl From<&ClauseSpec> for LiteralClause {
    fn from(spec: &ClauseSpec) -> Self {
        let negatives = spec.antecedents().iter().map(Literal::neg);
        Self::new(negatives.chain(spec.head().map(Literal::pos)))
    }
}

impl fmt::Display for LiteralClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{lit}")?;
        }
        f.write_str("}")
    }
}

impl Formula {
    /// Builds a formula from literal-set clauses, rejecting non-Horn clauses.
    pub fn from_literal_clauses<C, T, S>(clauses: C) -> Result<Self>
    where
        C: IntoIterator<Item = T>,
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        clauses
            .into_iter()
            .enumerate()
            .map(|(i, tokens)| LiteralClause::parse(tokens).to_spec(i))
            .collect()
    }

    /// Writes every clause as a list of signed literal strings.
    ///
    /// Fails with [`Error::Serialization`] when a token would not parse back
    /// to the same literal, such as a positive literal named `-x` or a name
    /// with surrounding whitespace.
    pub fn to_literal_clauses(&self) -> Result<Vec<Vec<String>>> {
        self.clauses
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                LiteralClause::from(spec)
                    .literals()
                    .iter()
                    .map(|l| {
                        let token = if l.positive {
                            l.name.clone()
                        } else {
                            format!("-{}", l.name)
                        };
                        if Literal::parse(&token) != *l {
                            return Err(Error::Serialization(format!(
                                "clause #{i}: literal {l} cannot be written as a signed token"
                            )));
                        }
                        Ok(token)
                    })
                    .collect::<Result<Vec<String>>>()
            })
            .collect()
    }
}
