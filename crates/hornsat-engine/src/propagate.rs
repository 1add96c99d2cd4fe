//! Counter-based Horn propagation.
//!
//! Every clause keeps a pending counter of antecedents not yet true. Setting
//! a variable true decrements the counters of the clauses in its dependency
//! list; a clause whose counter reaches zero joins a FIFO worklist. Popping a
//! headed clause sets its head, popping a goal is a contradiction.
//!
//! Each clause enters the worklist at most once and each dependency edge is
//! followed at most once, so a run is linear in the size of the formula.

use crate::clause_db::ClauseStore;
use crate::solver::{EngineConfig, SolverStats};
use crate::trace::{CounterUpdate, Trace, TraceRecorder};
use hornsat_base::{ClauseId, VarId};

/// FIFO worklist of ready clauses.
#[derive(Debug, Default)]
pub struct PropagationQueue {
    queue: Vec<ClauseId>,
    head: usize,
}

impl PropagationQueue {
    /// Creates a new propagation queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a ready clause.
    pub fn enqueue(&mut self, clause: ClauseId) {
        self.queue.push(clause);
    }

    /// Dequeues the oldest ready clause.
    pub fn dequeue(&mut self) -> Option<ClauseId> {
        let clause = *self.queue.get(self.head)?;
        self.head += 1;
        Some(clause)
    }

    /// Returns whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head >= self.queue.len()
    }

    /// Number of clauses waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len() - self.head
    }

    /// Total number of clauses ever enqueued.
    #[must_use]
    pub fn total_enqueued(&self) -> usize {
        self.queue.len()
    }
}

/// Truth values of one session: every variable is unknown or true.
///
/// There is no explicit false; whatever is not true at the fixpoint is false
/// in the minimal model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<bool>,
    num_true: usize,
}

impl Assignment {
    /// All `num_vars` variables unknown.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            values: vec![false; num_vars],
            num_true: 0,
        }
    }

    /// Returns whether `var` has been derived.
    #[must_use]
    pub fn is_true(&self, var: VarId) -> bool {
        self.values[var.index()]
    }

    /// Sets `var` true. Returns `false` if it already was.
    pub fn set_true(&mut self, var: VarId) -> bool {
        let slot = &mut self.values[var.index()];
        if *slot {
            return false;
        }
        *slot = true;
        self.num_true += 1;
        true
    }

    /// Derived variables in id order.
    pub fn true_vars(&self) -> impl Iterator<Item = VarId> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, &v)| v)
            .map(|(i, _)| VarId(i as u32))
    }

    /// Number of derived variables.
    #[must_use]
    pub fn count_true(&self) -> usize {
        self.num_true
    }

    /// Number of variables tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether no variable is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// How propagation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Worklist drained; the assignment is the minimal model.
    Saturated,
    /// This goal clause had all antecedents true.
    Conflict(ClauseId),
}

/// Everything a finished run leaves behind.
#[derive(Debug, Clone)]
pub struct PropagationState {
    /// Final assignment.
    pub assignment: Assignment,
    /// Final pending counters, indexed by clause.
    pub pending: Vec<u32>,
    /// Sealed event log.
    pub trace: Trace,
    /// Terminal state.
    pub outcome: Outcome,
    /// Work counters.
    pub stats: SolverStats,
}

/// One propagation run over a clause store.
pub struct Propagator<'s> {
    store: &'s ClauseStore,
    pending: Vec<u32>,
    assignment: Assignment,
    queue: PropagationQueue,
    recorder: TraceRecorder,
    record_counters: bool,
    stats: SolverStats,
}

impl<'s> Propagator<'s> {
    /// Prepares a run: counters at their initial values, every clause
    /// without antecedents queued in clause order.
    #[must_use]
    pub fn new(store: &'s ClauseStore, config: &EngineConfig) -> Self {
        let pending = store
            .clauses()
            .iter()
            .map(|c| c.antecedents.len() as u32)
            .collect();
        let mut queue = PropagationQueue::new();
        for clause in store.initially_ready() {
            queue.enqueue(clause);
        }

        Self {
            store,
            pending,
            assignment: Assignment::new(store.num_vars()),
            queue,
            recorder: TraceRecorder::new(),
            record_counters: config.record_counters,
            stats: SolverStats::default(),
        }
    }

    /// Runs to the fixpoint or the first contradiction.
    #[must_use]
    pub fn run(mut self) -> PropagationState {
        let outcome = loop {
            let Some(id) = self.queue.dequeue() else {
                break Outcome::Saturated;
            };
            self.stats.clause_pops += 1;
            debug_assert_eq!(self.pending[id.index()], 0);

            match self.store.clause(id).head {
                Some(head) => self.fire(id, head),
                None => {
                    self.stats.conflicts += 1;
                    tracing::debug!("Goal clause {} violated after {} steps", id, self.recorder.len());
                    break Outcome::Conflict(id);
                }
            }
        };

        self.stats.enqueued = self.queue.total_enqueued() as u64;
        PropagationState {
            assignment: self.assignment,
            pending: self.pending,
            trace: self.recorder.finish(),
            outcome,
            stats: self.stats,
        }
    }

    fn fire(&mut self, id: ClauseId, head: VarId) {
        if !self.assignment.set_true(head) {
            self.stats.redundant_firings += 1;
            tracing::trace!("Clause {} skipped, {} already true", id, self.store.var_name(head));
            return;
        }
        self.stats.firings += 1;

        let mut counters = Vec::new();
        for &dependent in self.store.dependents(head) {
            self.stats.edge_visits += 1;
            let remaining = &mut self.pending[dependent.index()];
            // Antecedents are distinct and a head is set at most once, so
            // each (variable, clause) edge decrements exactly once.
            *remaining -= 1;
            if self.record_counters {
                counters.push(CounterUpdate {
                    clause: dependent,
                    remaining: *remaining,
                });
            }
            if *remaining == 0 {
                self.queue.enqueue(dependent);
            }
        }

        let step = self
            .recorder
            .record(id, head, self.store.vars().shared_name(head), counters);
        tracing::trace!("Step {}: clause {} sets {}", step, id, self.store.var_name(head));
    }
}
