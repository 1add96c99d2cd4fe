//! Propagation trace.
//!
//! The propagator appends one [`TraceEvent`] each time a clause sets its head
//! true. The log is append-only while solving and sealed into a read-only
//! [`Trace`] afterwards; conflict justification and stepwise replay both read
//! it, neither re-runs propagation.

use hornsat_base::{ClauseId, Result, VarId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A pending counter after a decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterUpdate {
    /// Clause whose counter was decremented.
    pub clause: ClauseId,
    /// Antecedents of that clause still not true.
    pub remaining: u32,
}

/// One head assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Position in the log, starting at 0.
    pub step: usize,
    /// Clause that fired.
    pub clause: ClauseId,
    /// Variable newly set true.
    pub head: VarId,
    /// Name of `head`.
    pub head_name: Arc<str>,
    /// Counters decremented by this firing, in dependency-index order.
    /// Empty when counter recording is disabled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub counters: Vec<CounterUpdate>,
}

/// Append-only event log owned by a running propagator.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    events: Vec<TraceEvent>,
}

impl TraceRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event and returns its step index.
    pub fn record(
        &mut self,
        clause: ClauseId,
        head: VarId,
        head_name: Arc<str>,
        counters: Vec<CounterUpdate>,
    ) -> usize {
        let step = self.events.len();
        self.events.push(TraceEvent {
            step,
            clause,
            head,
            head_name,
            counters,
        });
        step
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Seals the log.
    #[must_use]
    pub fn finish(self) -> Trace {
        Trace {
            events: self.events,
        }
    }
}

/// Sealed, read-only propagation log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    events: Vec<TraceEvent>,
}

impl Trace {
    /// All events in firing order.
    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Event at `step`.
    #[must_use]
    pub fn get(&self, step: usize) -> Option<&TraceEvent> {
        self.events.get(step)
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns whether no head was ever set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Replays the log from step 0.
    #[must_use]
    pub fn replay(&self) -> TraceReplay<'_> {
        TraceReplay {
            events: &self.events,
            next: 0,
        }
    }

    /// Compact records for external stepwise consumers.
    pub fn feed(&self) -> impl ExactSizeIterator<Item = TraceRecord> + '_ {
        self.events.iter().map(TraceRecord::from)
    }

    /// Serializes the feed to a JSON array.
    pub fn feed_json(&self) -> Result<String> {
        let records: Vec<TraceRecord> = self.feed().collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }

    /// Serializes the full log, counters included.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Forward cursor over a [`Trace`].
#[derive(Debug, Clone)]
pub struct TraceReplay<'a> {
    events: &'a [TraceEvent],
    next: usize,
}

impl<'a> TraceReplay<'a> {
    /// Index of the event the next call to `next` returns.
    #[must_use]
    pub fn position(&self) -> usize {
        self.next
    }
}

impl<'a> Iterator for TraceReplay<'a> {
    type Item = &'a TraceEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let event = self.events.get(self.next)?;
        self.next += 1;
        Some(event)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.events.len() - self.next;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for TraceReplay<'_> {}

/// `{clauseId, headVariable, stepIndex}` as seen by an animator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceRecord {
    /// Clause that fired.
    pub clause_id: ClauseId,
    /// Variable it set true.
    pub head_variable: Arc<str>,
    /// Position in the log.
    pub step_index: usize,
}

impl From<&TraceEvent> for TraceRecord {
    fn from(event: &TraceEvent) -> Self {
        Self {
            clause_id: event.clause,
            head_variable: Arc::clone(&event.head_name),
            step_index: event.step,
        }
    }
}
