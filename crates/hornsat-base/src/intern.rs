//! Variable interning.
//!
//! Names are arbitrary non-empty strings compared by exact equality. Each
//! distinct name gets the next dense `VarId`, in first-seen order, so two
//! tables fed the same names in the same order agree on every id.

use crate::types::VarId;
use std::collections::HashMap;
use std::sync::Arc;

/// Bidirectional name ↔ `VarId` table for one solving session.
///
/// Names are stored as `Arc<str>` so trace events and results can hand them
/// out without copying the string data.
#[derive(Debug, Clone, Default)]
pub struct VarTable {
    names: Vec<Arc<str>>,
    ids: HashMap<Arc<str>, VarId>,
}

impl VarTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `name`, allocating a fresh one on first sight.
    pub fn intern(&mut self, name: &str) -> VarId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = VarId(self.names.len() as u32);
        let name: Arc<str> = Arc::from(name);
        self.names.push(Arc::clone(&name));
        self.ids.insert(name, id);
        id
    }

    /// Looks up an already interned name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<VarId> {
        self.ids.get(name).copied()
    }

    /// Returns the name of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this table.
    #[must_use]
    pub fn name(&self, id: VarId) -> &str {
        &self.names[id.index()]
    }

    /// Returns a shared handle to the name of `id`.
    #[must_use]
    pub fn shared_name(&self, id: VarId) -> Arc<str> {
        Arc::clone(&self.names[id.index()])
    }

    /// Number of interned variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns whether no variable has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over `(id, name)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (VarId(i as u32), &**name))
    }
}
