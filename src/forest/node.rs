//! Node.

use alloc::string::String;

use crate::error::InsertError;
use crate::forest::{Forest, Handle, Record};

/// Immutable reference to a node.
///
/// This type guarantees that the handle refers to a node which is present in
/// the forest and is not removed yet.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a, T> {
    /// Forest.
    forest: &'a Forest<T>,
    /// Node handle.
    handle: Handle,
}

impl<'a, T> Node<'a, T> {
    /// Creates a new `Node` object.
    #[must_use]
    pub(super) fn new(forest: &'a Forest<T>, handle: Handle) -> Option<Self> {
        if !forest.is_alive(handle) {
            return None;
        }
        Some(Self { forest, handle })
    }

    /// Creates a new `Node` object for a handle known to be alive.
    #[inline]
    #[must_use]
    pub(super) fn from_alive(forest: &'a Forest<T>, handle: Handle) -> Self {
        debug_assert!(forest.is_alive(handle));
        Self { forest, handle }
    }

    /// Returns the node handle.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Returns the record of the node.
    #[inline]
    #[must_use]
    pub fn record(&self) -> &'a Record<T> {
        self.forest
            .record(self.handle)
            .expect("[validity] the node has been checked to be alive")
    }

    /// Returns a reference to the value of the node.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &'a T {
        &self.record().value
    }

    /// Returns the item id.
    #[inline]
    #[must_use]
    pub fn item_id(&self) -> &'a str {
        &self.record().item_id
    }

    /// Returns the parent id as stored, which may be empty or dangling.
    #[inline]
    #[must_use]
    pub fn parent_id(&self) -> &'a str {
        &self.record().parent_id
    }

    /// Returns the sibling sort key.
    #[inline]
    #[must_use]
    pub fn sort_key(&self) -> &'a str {
        &self.record().sort_key
    }

    /// Returns the handle of the parent.
    ///
    /// Uses the cached parent index if current, and resolves the parent id
    /// by a lookup otherwise. Returns `None` for roots.
    #[must_use]
    pub fn parent_handle(&self) -> Option<Handle> {
        match self.forest.index.parents() {
            Some(parents) => parents.get(self.handle.index()).copied().flatten(),
            None => {
                let parent_id = self.parent_id();
                if parent_id.is_empty() {
                    return None;
                }
                self.forest.find(parent_id)
            }
        }
    }

    /// Returns the parent node.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.parent_handle().map(|handle| {
            Self::new(self.forest, handle).expect("[consistency] the parent must be alive")
        })
    }
}

/// Mutable reference to a node.
///
/// Setters keep the derived caches of the forest consistent.
#[derive(Debug)]
pub struct NodeMut<'a, T> {
    /// Forest.
    forest: &'a mut Forest<T>,
    /// Node handle.
    handle: Handle,
}

impl<'a, T> NodeMut<'a, T> {
    /// Creates a new `NodeMut` object.
    #[must_use]
    pub(super) fn new(forest: &'a mut Forest<T>, handle: Handle) -> Option<Self> {
        if !forest.is_alive(handle) {
            return None;
        }
        Some(Self { forest, handle })
    }

    /// Returns the node handle.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Returns an immutable proxy to the node.
    #[inline]
    #[must_use]
    pub fn as_node(&self) -> Node<'_, T> {
        Node::from_alive(self.forest, self.handle)
    }

    /// Returns a reference to the value of the node.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &T {
        self.as_node().value()
    }

    /// Returns the mutable record.
    fn record_mut(&mut self) -> &mut Record<T> {
        self.forest
            .record_mut(self.handle)
            .expect("[validity] the node has been checked to be alive")
    }

    /// Replaces the value and returns the old one.
    ///
    /// Marks the parent index stale, as every mutation does.
    pub fn set_value(&mut self, value: T) -> T {
        let old = core::mem::replace(&mut self.record_mut().value, value);
        self.forest.index.invalidate();
        old
    }

    /// Changes the item id of the node.
    ///
    /// Children naming the old id lose their parent, and nodes naming the new
    /// id gain one.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError::DuplicateItemId`] if another node already uses
    /// the id. The node is left unchanged in that case.
    pub fn set_item_id(&mut self, item_id: impl Into<String>) -> Result<(), InsertError> {
        let item_id = item_id.into();
        match self.forest.find(&item_id) {
            Some(owner) if owner == self.handle => return Ok(()),
            Some(_) => return Err(InsertError::DuplicateItemId { item_id }),
            None => {}
        }
        self.record_mut().item_id = item_id;
        self.forest.invalidate();
        Ok(())
    }

    /// Changes the parent id of the node.
    ///
    /// No cycle check is done; see [`Forest::is_healthy`].
    pub fn set_parent_id(&mut self, parent_id: impl Into<String>) {
        self.record_mut().parent_id = parent_id.into();
        self.forest.invalidate();
    }

    /// Changes the sibling sort key of the node.
    pub fn set_sort_key(&mut self, sort_key: impl Into<String>) {
        self.record_mut().sort_key = sort_key.into();
        self.forest.index.invalidate();
    }
}
