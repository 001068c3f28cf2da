//! Forest.

mod handle;
mod health;
mod index;
mod node;
mod record;
pub mod render;
pub mod safety;
pub mod text;

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use log::trace;

use crate::error::InsertError;

use self::health::HealthCache;
use self::index::ParentIndex;

pub use self::handle::Handle;
pub use self::node::{Node, NodeMut};
pub use self::record::Record;

/// Forest of records linked by item id and parent id.
///
/// Records are stored in insertion order and addressed by [`Handle`]s.
/// Parent links are plain strings and are resolved lazily: a record may be
/// added before its parent, and a parent id which matches no record makes
/// the record a root.
///
/// Two caches are derived from the records:
///
/// * the parent index, valid while [`Forest::indexes_current`] is true, and
/// * the health flag, valid while [`Forest::health_current`] is true.
///
/// Every structural mutation clears both. Operations reading either cache
/// take `&mut self` and recompute it on demand.
///
/// [`Forest::add`] does not check for cycles. Use [`Forest::safe_add`] to
/// reject cycle-creating records up front, or check [`Forest::is_healthy`]
/// after unchecked insertions.
#[derive(Debug, Clone)]
pub struct Forest<T> {
    /// Records.
    ///
    /// `None` is used for removed nodes, so that handles of the surviving
    /// nodes never shift.
    records: Vec<Option<Record<T>>>,
    /// Number of live records.
    len: usize,
    /// Parent index.
    index: ParentIndex,
    /// Cycle check cache.
    health: HealthCache,
}

impl<T> Forest<T> {
    /// Creates a new empty forest.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkforest::Forest;
    ///
    /// let forest = Forest::<u32>::new();
    /// assert!(forest.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty forest with room for `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Creates a forest from fully-formed records.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError::DuplicateItemId`] for the first record whose
    /// item id was already used by an earlier record.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkforest::{Forest, InsertError, Record};
    ///
    /// let forest = Forest::from_records([
    ///     Record::root("a", "1", "1"),
    ///     Record::new("b", "2", "1", "1"),
    /// ])
    /// .expect("should never fail: item ids are unique");
    /// assert_eq!(forest.len(), 2);
    ///
    /// let dup = Forest::from_records([Record::root("a", "1", "1"), Record::root("b", "1", "2")]);
    /// assert!(matches!(dup, Err(InsertError::DuplicateItemId { .. })));
    /// ```
    pub fn from_records<I>(records: I) -> Result<Self, InsertError>
    where
        I: IntoIterator<Item = Record<T>>,
    {
        let records = records.into_iter();
        let mut forest = Self::with_capacity(records.size_hint().0);
        let mut seen = BTreeSet::new();
        for record in records {
            if !seen.insert(record.item_id.clone()) {
                return Err(InsertError::DuplicateItemId {
                    item_id: record.item_id,
                });
            }
            forest.push(record);
        }
        Ok(forest)
    }

    /// Returns the number of live nodes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the forest has no nodes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the parent index reflects the current records.
    #[inline]
    #[must_use]
    pub fn indexes_current(&self) -> bool {
        self.index.is_current()
    }

    /// Returns true if the cached health flag reflects the current records.
    #[inline]
    #[must_use]
    pub fn health_current(&self) -> bool {
        self.health.is_current()
    }

    /// Returns the record for the handle, if the node is alive.
    #[inline]
    #[must_use]
    fn record(&self, handle: Handle) -> Option<&Record<T>> {
        self.records
            .get(handle.index())
            .and_then(|slot| slot.as_ref())
    }

    /// Returns a mutable reference to the record, if the node is alive.
    #[inline]
    #[must_use]
    fn record_mut(&mut self, handle: Handle) -> Option<&mut Record<T>> {
        self.records
            .get_mut(handle.index())
            .and_then(|slot| slot.as_mut())
    }

    /// Returns true if the node exists and is not yet removed.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, handle: Handle) -> bool {
        self.record(handle).is_some()
    }

    /// Returns a [proxy object][`Node`] to the node.
    #[inline]
    #[must_use]
    pub fn node(&self, handle: Handle) -> Option<Node<'_, T>> {
        Node::new(self, handle)
    }

    /// Returns a [proxy object][`NodeMut`] to the mutable node.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkforest::Forest;
    ///
    /// let mut forest = Forest::new();
    /// forest.add("a", "1", "1", "");
    /// let handle = forest.find("1").expect("should never fail: the node exists");
    ///
    /// let mut node = forest.node_mut(handle).expect("should never fail: the node exists");
    /// node.set_value("b");
    /// assert_eq!(forest.values().copied().collect::<Vec<_>>(), ["b"]);
    /// ```
    #[inline]
    #[must_use]
    pub fn node_mut(&mut self, handle: Handle) -> Option<NodeMut<'_, T>> {
        NodeMut::new(self, handle)
    }

    /// Returns the handle of the node with the given item id.
    ///
    /// Uses the item id map while the parent index is current, and a linear
    /// scan otherwise.
    #[must_use]
    pub fn find(&self, item_id: &str) -> Option<Handle> {
        if let Some(handle) = self.index.lookup(item_id) {
            return handle;
        }
        self.live()
            .find(|(_, record)| record.item_id == item_id)
            .map(|(handle, _)| handle)
    }

    /// Returns the node with the given item id.
    #[inline]
    #[must_use]
    pub fn get_by_item_id(&self, item_id: &str) -> Option<Node<'_, T>> {
        self.find(item_id).and_then(|handle| self.node(handle))
    }

    /// Returns true if a node with the same item id as `candidate` exists.
    ///
    /// Only the identity is compared, not the value or the links.
    #[inline]
    #[must_use]
    pub fn contains_node(&self, candidate: &Record<T>) -> bool {
        self.find(&candidate.item_id).is_some()
    }

    /// Iterates over handles and records of the live nodes in insertion order.
    fn live(&self) -> impl Iterator<Item = (Handle, &Record<T>)> + '_ {
        self.records.iter().enumerate().filter_map(|(i, slot)| {
            let record = slot.as_ref()?;
            let handle =
                Handle::from_index(i).expect("[validity] stored slots are addressable by handles");
            Some((handle, record))
        })
    }

    /// Iterates over the live nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_, T>> + '_ {
        self.live().map(move |(handle, _)| Node::from_alive(self, handle))
    }

    /// Iterates over the records of the live nodes in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &Record<T>> + '_ {
        self.records.iter().filter_map(Option::as_ref)
    }

    /// Iterates over the values of the live nodes in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.records().map(|record| &record.value)
    }

    /// Appends the record without any check.
    fn push(&mut self, record: Record<T>) -> Handle {
        let handle = Handle::from_index(self.records.len()).expect(
            "[precondition] node handle overflowed presumably due to too many node creations",
        );
        self.records.push(Some(record));
        self.len += 1;
        self.invalidate();

        handle
    }

    /// Clears both derived caches.
    #[inline]
    fn invalidate(&mut self) {
        self.index.invalidate();
        self.health.invalidate();
    }

    /// Inserts the record unless its item id is already used.
    ///
    /// Cycles are not checked. Returns the handle of the new node.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError::DuplicateItemId`] if the item id already exists.
    /// The forest is left unchanged in that case.
    pub fn try_add(&mut self, record: Record<T>) -> Result<Handle, InsertError> {
        if self.contains_node(&record) {
            trace!("rejected duplicate item id {:?}", record.item_id);
            return Err(InsertError::DuplicateItemId {
                item_id: record.item_id,
            });
        }
        Ok(self.push(record))
    }

    /// Adds a node unless its item id is already used.
    ///
    /// An empty `parent_id` declares a root. Returns `false` and leaves the
    /// forest unchanged if the item id exists. Cycles are not checked.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkforest::Forest;
    ///
    /// let mut forest = Forest::new();
    /// assert!(forest.add("Electronics", "1", "1", ""));
    /// assert!(!forest.add("Duplicate", "1", "2", ""));
    /// assert_eq!(forest.len(), 1);
    /// ```
    pub fn add(
        &mut self,
        value: T,
        item_id: impl Into<String>,
        sort_key: impl Into<String>,
        parent_id: impl Into<String>,
    ) -> bool {
        self.try_add(Record::new(value, item_id, sort_key, parent_id))
            .is_ok()
    }

    /// Inserts the record if it is new and cannot create a cycle.
    ///
    /// Costs a walk of every ancestor chain; see [`Forest::safe_to_add`].
    ///
    /// # Errors
    ///
    /// * [`InsertError::DuplicateItemId`] if the item id already exists.
    /// * [`InsertError::CausesCycle`] if the record would close a loop of
    ///   parent links.
    pub fn try_safe_add(&mut self, record: Record<T>) -> Result<Handle, InsertError> {
        let safety = self.safe_to_add(&record);
        if safety.already_exists {
            trace!("rejected duplicate item id {:?}", record.item_id);
            return Err(InsertError::DuplicateItemId {
                item_id: record.item_id,
            });
        }
        if !safety.is_safe {
            trace!("rejected cycle-creating item id {:?}", record.item_id);
            return Err(InsertError::CausesCycle {
                item_id: record.item_id,
            });
        }
        Ok(self.push(record))
    }

    /// Adds a node if it is new and cannot create a cycle.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkforest::Forest;
    ///
    /// let mut forest = Forest::new();
    /// assert!(forest.safe_add("A", "1", "1", ""));
    /// // Own parent.
    /// assert!(!forest.safe_add("X", "9", "1", "9"));
    /// assert_eq!(forest.len(), 1);
    /// ```
    pub fn safe_add(
        &mut self,
        value: T,
        item_id: impl Into<String>,
        sort_key: impl Into<String>,
        parent_id: impl Into<String>,
    ) -> bool {
        self.try_safe_add(Record::new(value, item_id, sort_key, parent_id))
            .is_ok()
    }

    /// Removes the node and returns its record.
    ///
    /// Children are kept; their parent id no longer resolves, so they become
    /// roots.
    pub fn remove_handle(&mut self, handle: Handle) -> Option<Record<T>> {
        let record = self.records.get_mut(handle.index())?.take()?;
        trace!("removed item id {:?}", record.item_id);
        self.len -= 1;
        self.invalidate();
        Some(record)
    }

    /// Resolves and caches the parent handle of every node.
    ///
    /// Does nothing while [`Forest::indexes_current`] is true.
    pub fn refresh_parent_indexes(&mut self) {
        self.index.refresh(&self.records);
    }

    /// Returns the cached parent handles indexed by [`Handle::index`].
    ///
    /// Returns `None` while the parent index is stale. Removed slots and
    /// roots hold `None`.
    #[inline]
    #[must_use]
    pub fn cached_parents(&self) -> Option<&[Option<Handle>]> {
        self.index.parents()
    }

    /// Returns the resolved parent of the node.
    ///
    /// Returns `None` for roots and for dead handles.
    #[must_use]
    pub fn parent_of(&mut self, handle: Handle) -> Option<Handle> {
        self.refresh_parent_indexes();
        self.index.parent(handle)
    }

    /// Returns the roots in sibling order.
    #[must_use]
    pub fn roots(&mut self) -> Vec<Handle> {
        self.refresh_parent_indexes();
        self.sorted_children().0
    }

    /// Returns the children of the node in sibling order.
    #[must_use]
    pub fn children(&mut self, handle: Handle) -> Vec<Handle> {
        self.refresh_parent_indexes();
        let mut children = self
            .live()
            .filter(|&(child, _)| self.index.parent(child) == Some(handle))
            .map(|(child, _)| child)
            .collect::<Vec<_>>();
        self.sort_siblings(&mut children);
        children
    }

    /// Returns the depth of the node (`0` for roots).
    ///
    /// Returns `None` if the node is dead or its ancestor chain is cyclic.
    #[must_use]
    pub fn depth(&mut self, handle: Handle) -> Option<usize> {
        if !self.is_alive(handle) {
            return None;
        }
        self.refresh_parent_indexes();
        let mut depth = 0;
        let mut current = handle;
        while let Some(parent) = self.index.parent(current) {
            depth += 1;
            if depth >= self.len {
                return None;
            }
            current = parent;
        }
        Some(depth)
    }

    /// Sorts sibling handles by sort key, keeping insertion order for ties.
    fn sort_siblings(&self, siblings: &mut [Handle]) {
        siblings.sort_by(|&a, &b| self.sort_key_of(a).cmp(self.sort_key_of(b)));
    }

    /// Returns the sort key of a live node.
    #[must_use]
    fn sort_key_of(&self, handle: Handle) -> &str {
        self.record(handle)
            .map(|record| record.sort_key.as_str())
            .expect("[consistency] siblings must be alive")
    }

    /// Groups the live nodes by their resolved parent, in sibling order.
    ///
    /// Returns the roots and the children lists indexed by [`Handle::index`].
    /// The parent index must be current.
    fn sorted_children(&self) -> (Vec<Handle>, Vec<Vec<Handle>>) {
        debug_assert!(
            self.index.is_current(),
            "[precondition] the parent index must be refreshed before grouping"
        );
        let mut roots = Vec::new();
        let mut children = (0..self.records.len())
            .map(|_| Vec::new())
            .collect::<Vec<_>>();
        for (handle, _) in self.live() {
            match self.index.parent(handle) {
                Some(parent) => children[parent.index()].push(handle),
                None => roots.push(handle),
            }
        }
        self.sort_siblings(&mut roots);
        for siblings in &mut children {
            self.sort_siblings(siblings);
        }
        (roots, children)
    }
}

impl<T: PartialEq> Forest<T> {
    /// Returns the handle of the first node holding the value.
    #[must_use]
    pub fn find_value(&self, value: &T) -> Option<Handle> {
        self.live()
            .find(|(_, record)| record.value == *value)
            .map(|(handle, _)| handle)
    }

    /// Returns true if some node holds the value.
    #[inline]
    #[must_use]
    pub fn contains_value(&self, value: &T) -> bool {
        self.find_value(value).is_some()
    }

    /// Removes the first node holding the value.
    ///
    /// Removal does not cascade: children of the removed node become roots.
    /// Returns `false` if no node holds the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkforest::Forest;
    ///
    /// let mut forest = Forest::new();
    /// forest.add("dup", "1", "1", "");
    /// forest.add("dup", "2", "2", "");
    ///
    /// assert!(forest.remove(&"dup"));
    /// assert_eq!(forest.len(), 1);
    /// assert!(forest.find("1").is_none());
    /// assert!(forest.find("2").is_some());
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        match self.find_value(value) {
            Some(handle) => self.remove_handle(handle).is_some(),
            None => false,
        }
    }
}

impl<T> Default for Forest<T> {
    fn default() -> Self {
        Self {
            records: Default::default(),
            len: 0,
            index: Default::default(),
            health: Default::default(),
        }
    }
}

impl<T> Extend<Record<T>> for Forest<T> {
    /// Adds every record with [`Forest::try_add`], skipping duplicates.
    fn extend<I: IntoIterator<Item = Record<T>>>(&mut self, records: I) {
        for record in records {
            // Rejections are traced by `try_add`.
            let _ = self.try_add(record);
        }
    }
}
