//! Horn text format.
//!
//! One clause per line, in either of two notations:
//!
//! ```text
//! # implication form
//! -> rain              # fact
//! rain, cold -> snow   # rule
//! snow ->              # goal
//!
//! # literal form
//! -rain -cold snow
//! ```
//!
//! Antecedents are separated by commas, whitespace, `&` or `∧`. A lone `1`
//! on the left and a lone `0` on the right are the constants true and false.
//! `#` starts a comment that runs to the end of the line.

use crate::formula::{ClauseSpec, Formula};
use crate::literals::{LiteralClause, NEGATION_PREFIXES};
use hornsat_base::{Error, Result};
use std::io::{BufRead, BufReader, Read};

const ARROWS: [&str; 3] = ["->", "→", "=>"];
const SEPARATORS: [char; 3] = [',', '&', '∧'];

impl Formula {
    /// Parses Horn text from a reader.
    pub fn from_text_reader<R: Read>(reader: R) -> Result<Self> {
        let reader = BufReader::new(reader);
        let mut formula = Formula::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            let content = match line.find('#') {
                Some(pos) => &line[..pos],
                None => &line,
            };
            let content = content.trim();
            if content.is_empty() {
                continue;
            }

            let clause = match split_arrow(content) {
                Some((lhs, rhs)) => parse_implication(lhs, rhs, line_no)?,
                None => LiteralClause::parse(tokens(content, &[',']))
                    .to_spec(formula.len())
                    .map_err(|e| Error::Parse {
                        line: line_no,
                        message: e.to_string(),
                    })?,
            };
            formula.push(clause);
        }

        Ok(formula)
    }

    /// Parses Horn text from a string.
    pub fn from_text(s: &str) -> Result<Self> {
        Self::from_text_reader(s.as_bytes())
    }

    /// Renders the formula in implication form.
    ///
    /// Fails with [`Error::Serialization`] when a name would not read back
    /// as itself: the constants `0`/`1`, names holding whitespace, a
    /// separator, `#` or an arrow, and names starting with a negation sign.
    pub fn to_text(&self) -> Result<String> {
        let mut out = String::new();
        out.push_str(&format!("# {} clauses\n", self.len()));
        for (i, clause) in self.clauses.iter().enumerate() {
            for name in clause.antecedents().iter().map(String::as_str).chain(clause.head()) {
                check_text_name(name).map_err(|reason| {
                    Error::Serialization(format!("clause #{i}: variable '{name}' {reason}"))
                })?;
            }
            let lhs = clause.antecedents().join(", ");
            match (lhs.is_empty(), clause.head()) {
                (true, Some(head)) => out.push_str(&format!("-> {head}\n")),
                (true, None) => out.push_str("->\n"),
                (false, Some(head)) => out.push_str(&format!("{lhs} -> {head}\n")),
                (false, None) => out.push_str(&format!("{lhs} ->\n")),
            }
        }
        Ok(out)
    }
}

fn check_text_name(name: &str) -> std::result::Result<(), &'static str> {
    if name.is_empty() {
        return Err("is empty");
    }
    if name == "0" || name == "1" {
        return Err("reads back as a constant in Horn text");
    }
    if name.starts_with(&NEGATION_PREFIXES[..]) {
        return Err("starts with a negation sign");
    }
    if name
        .chars()
        .any(|c| c.is_whitespace() || SEPARATORS.contains(&c) || c == '#')
    {
        return Err("contains whitespace, a separator or '#'");
    }
    if ARROWS.iter().any(|arrow| name.contains(arrow)) {
        return Err("contains an implication arrow");
    }
    Ok(())
}

fn tokens<'a>(s: &'a str, separators: &'a [char]) -> impl Iterator<Item = &'a str> {
    s.split(move |c: char| c.is_whitespace() || separators.contains(&c))
        .filter(|t| !t.is_empty())
}

fn split_arrow(line: &str) -> Option<(&str, &str)> {
    ARROWS
        .iter()
        .find_map(|arrow| line.split_once(arrow))
}

fn parse_implication(lhs: &str, rhs: &str, line: usize) -> Result<ClauseSpec> {
    let err = |message: String| Error::Parse { line, message };

    if split_arrow(rhs).is_some() {
        return Err(err("more than one implication arrow".into()));
    }

    let mut antecedents: Vec<String> = tokens(lhs, &SEPARATORS)
        .map(str::to_string)
        .collect();
    if antecedents == ["1"] {
        antecedents.clear();
    }
    if let Some(bad) = antecedents.iter().find(|a| a.starts_with(&NEGATION_PREFIXES[..])) {
        return Err(err(format!("negated antecedent '{bad}' in implication form")));
    }

    let heads: Vec<&str> = rhs.split_whitespace().collect();
    let head = match heads.as_slice() {
        [] | ["0"] => None,
        [head] => Some(*head),
        many => {
            return Err(err(format!(
                "{} head literals ({}), a Horn clause allows at most one",
                many.len(),
                many.join(", ")
            )))
        }
    };

    Ok(match head {
        Some(head) if antecedents.is_empty() => ClauseSpec::fact(head),
        Some(head) => ClauseSpec::rule(antecedents, head),
        None => ClauseSpec::goal(antecedents),
    })
}
