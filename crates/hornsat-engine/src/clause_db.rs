//! Clause store.
//!
//! Normalized, indexed, immutable representation of a Horn formula. All
//! mutable solving state (assignment, pending counters, worklist) lives in
//! the propagator, never in the clauses.

use hornsat_base::{ClauseId, ClauseKind, Error, Result, VarId, VarTable};
use hornsat_format::{ClauseSpec, Formula};

/// A clause stored in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredClause {
    /// Distinct antecedents in first-seen order.
    pub antecedents: Vec<VarId>,
    /// Head variable, `None` for goals.
    pub head: Option<VarId>,
}

impl StoredClause {
    /// Canonical kind of the clause.
    #[must_use]
    pub fn kind(&self) -> ClauseKind {
        ClauseKind::classify(self.antecedents.len(), self.head.is_some())
    }

    /// Returns whether the clause has no head.
    #[must_use]
    pub fn is_goal(&self) -> bool {
        self.head.is_none()
    }
}

/// Indexed Horn formula for one solving session.
#[derive(Debug, Clone, Default)]
pub struct ClauseStore {
    /// Interned variable names.
    vars: VarTable,
    /// All clauses, indexed by `ClauseId`.
    clauses: Vec<StoredClause>,
    /// For each variable, the clauses listing it as an antecedent.
    dependents: Vec<Vec<ClauseId>>,
    /// Total number of antecedent occurrences after deduplication.
    num_edges: usize,
    /// Per variable, 1 + index of the last clause that listed it. Used to
    /// collapse duplicate antecedents in linear time.
    stamp: Vec<usize>,
}

impl ClauseStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the store from a formula.
    ///
    /// The empty formula is accepted and is satisfied by the empty model.
    /// A name that never occurs as a head is simply never derived, so it is
    /// false in every result; this is not an error.
    pub fn build(formula: &Formula) -> Result<Self> {
        let mut store = Self::new();
        for clause in formula {
            store.add_clause(clause.antecedents(), clause.head())?;
        }
        tracing::debug!(
            "Built clause store: {} variables, {} clauses, {} antecedent edges",
            store.num_vars(),
            store.num_clauses(),
            store.num_edges()
        );
        Ok(store)
    }

    /// Adds a clause given its antecedent names and its positive literals.
    ///
    /// Fails with [`Error::MalformedClause`] when more than one head is given
    /// or a name is empty. Nothing is interned when the clause is rejected.
    pub fn add_clause<A, S, H, T>(&mut self, antecedents: A, heads: H) -> Result<ClauseId>
    where
        A: IntoIterator<Item = S>,
        S: AsRef<str>,
        H: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let index = self.clauses.len();
        let antecedents: Vec<S> = antecedents.into_iter().collect();
        let heads: Vec<T> = heads.into_iter().collect();

        if heads.len() > 1 {
            let names: Vec<&str> = heads.iter().map(|h| h.as_ref()).collect();
            return Err(Error::malformed(
                index,
                format!(
                    "{} head literals ({}), a Horn clause allows at most one",
                    heads.len(),
                    names.join(", ")
                ),
            ));
        }
        let names = antecedents.iter().map(|a| a.as_ref());
        if names.chain(heads.iter().map(|h| h.as_ref())).any(str::is_empty) {
            return Err(Error::malformed(index, "empty variable name"));
        }

        let id = ClauseId(index as u32);
        let mut ids = Vec::with_capacity(antecedents.len());
        for name in &antecedents {
            let var = self.intern(name.as_ref());
            let seen = &mut self.stamp[var.index()];
            if *seen == index + 1 {
                continue;
            }
            *seen = index + 1;
            ids.push(var);
            self.dependents[var.index()].push(id);
        }
        let head = heads.first().map(|h| self.intern(h.as_ref()));

        self.num_edges += ids.len();
        self.clauses.push(StoredClause {
            antecedents: ids,
            head,
        });
        Ok(id)
    }

    fn intern(&mut self, name: &str) -> VarId {
        let var = self.vars.intern(name);
        if var.index() == self.dependents.len() {
            self.dependents.push(Vec::new());
            self.stamp.push(0);
        }
        var
    }

    /// Gets a clause by ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    #[must_use]
    pub fn clause(&self, id: ClauseId) -> &StoredClause {
        &self.clauses[id.index()]
    }

    /// All clauses in id order.
    #[must_use]
    pub fn clauses(&self) -> &[StoredClause] {
        &self.clauses
    }

    /// Clauses listing `var` as an antecedent, in clause order.
    #[must_use]
    pub fn dependents(&self, var: VarId) -> &[ClauseId] {
        &self.dependents[var.index()]
    }

    /// Pending counter a clause starts with: its number of distinct antecedents.
    #[must_use]
    pub fn initial_pending(&self, id: ClauseId) -> u32 {
        self.clause(id).antecedents.len() as u32
    }

    /// Clauses that are ready before anything is derived, in id order.
    pub fn initially_ready(&self) -> impl Iterator<Item = ClauseId> + '_ {
        self.clauses
            .iter()
            .enumerate()
            .filter(|(_, c)| c.antecedents.is_empty())
            .map(|(i, _)| ClauseId(i as u32))
    }

    /// Interned variables.
    #[must_use]
    pub fn vars(&self) -> &VarTable {
        &self.vars
    }

    /// Name of a variable.
    #[must_use]
    pub fn var_name(&self, var: VarId) -> &str {
        self.vars.name(var)
    }

    /// Looks up a variable by name.
    #[must_use]
    pub fn var_id(&self, name: &str) -> Option<VarId> {
        self.vars.get(name)
    }

    /// Number of distinct variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    /// Number of clauses.
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Total antecedent occurrences, the size of the dependency index.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Returns whether the store holds no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Rebuilds the named form of a stored clause, for display.
    #[must_use]
    pub fn to_spec(&self, id: ClauseId) -> ClauseSpec {
        let clause = self.clause(id);
        let antecedents = clause.antecedents.iter().map(|&v| self.var_name(v));
        match clause.head {
            Some(head) if clause.antecedents.is_empty() => ClauseSpec::fact(self.var_name(head)),
            Some(head) => ClauseSpec::rule(antecedents, self.var_name(head)),
            None => ClauseSpec::goal(antecedents),
        }
    }
}
