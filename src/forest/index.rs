//! Parent index.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use log::debug;

use crate::forest::{Handle, Record};

/// Resolved parent links, derived from the records of a forest.
///
/// The index is either current (every field reflects the records) or stale.
/// Any structural mutation of the forest must call [`ParentIndex::invalidate`].
#[derive(Debug, Default, Clone)]
pub(crate) struct ParentIndex {
    /// Whether the index reflects the records.
    current: bool,
    /// Parent handle for each storage slot.
    ///
    /// `None` is used for roots and removed slots.
    parents: Vec<Option<Handle>>,
    /// Handle of each item id.
    by_item_id: BTreeMap<String, Handle>,
}

impl ParentIndex {
    /// Returns true if the index reflects the records.
    #[inline]
    #[must_use]
    pub(crate) fn is_current(&self) -> bool {
        self.current
    }

    /// Marks the index stale.
    #[inline]
    pub(crate) fn invalidate(&mut self) {
        self.current = false;
    }

    /// Returns the cached parents, if current.
    #[inline]
    #[must_use]
    pub(crate) fn parents(&self) -> Option<&[Option<Handle>]> {
        self.current.then_some(&self.parents[..])
    }

    /// Returns the cached parent of the node.
    ///
    /// Returns `None` for roots, for removed nodes, and while stale.
    #[inline]
    #[must_use]
    pub(crate) fn parent(&self, handle: Handle) -> Option<Handle> {
        self.parents()?.get(handle.index()).copied().flatten()
    }

    /// Looks up an item id.
    ///
    /// Returns `None` while stale, and `Some(lookup_result)` otherwise.
    #[inline]
    #[must_use]
    pub(crate) fn lookup(&self, item_id: &str) -> Option<Option<Handle>> {
        self.current
            .then(|| self.by_item_id.get(item_id).copied())
    }

    /// Rebuilds the index from the records if stale.
    pub(crate) fn refresh<T>(&mut self, records: &[Option<Record<T>>]) {
        if self.current {
            return;
        }

        self.by_item_id.clear();
        for (i, slot) in records.iter().enumerate() {
            let Some(record) = slot else { continue };
            let handle =
                Handle::from_index(i).expect("[validity] stored slots are addressable by handles");
            // Item ids are unique; keep the first one if the caller bypassed that.
            self.by_item_id
                .entry(record.item_id.clone())
                .or_insert(handle);
        }

        self.parents.clear();
        self.parents.reserve(records.len());
        let mut roots = 0;
        for slot in records {
            let parent = match slot {
                Some(record) if !record.parent_id.is_empty() => {
                    self.by_item_id.get(&record.parent_id).copied()
                }
                _ => None,
            };
            if slot.is_some() && parent.is_none() {
                roots += 1;
            }
            self.parents.push(parent);
        }

        self.current = true;
        debug!(
            "parent index rebuilt: {} slots, {} roots",
            records.len(),
            roots
        );
    }
}
