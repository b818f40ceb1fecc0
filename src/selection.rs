//! Multi-block selection.
//!
//! A plain click selects one block; an extending click (shift) toggles a
//! block in or out of the current set. The selection only decides which
//! blocks batch operations target. It never influences layout.

use std::collections::BTreeSet;

use crate::model::BlockId;

/// The set of selected block ids. Iteration order is id order, so batch
/// operations over a selection are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<BlockId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`. Without `extend` the selection becomes exactly `{id}`;
    /// with `extend` the id is toggled.
    pub fn select(&mut self, id: BlockId, extend: bool) {
        if !extend {
            self.ids.clear();
            self.ids.insert(id);
        } else if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Replace the selection with every given id.
    pub fn select_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = BlockId>,
    {
        self.ids = ids.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop `id` from the selection. Returns whether it was selected.
    pub fn remove(&mut self, id: &BlockId) -> bool {
        self.ids.remove(id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The selected ids as an owned list, for handing to batch operations.
    pub fn to_vec(&self) -> Vec<BlockId> {
        self.ids.iter().cloned().collect()
    }
}
