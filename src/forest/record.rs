//! Record.

use alloc::string::String;

/// A flat node record: payload plus the string links to place it in a forest.
///
/// Records never refer to each other directly. The parent is named by
/// `parent_id`, which is matched against the `item_id` of other records
/// when the forest resolves its parent index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record<T> {
    /// Payload.
    ///
    /// Values need not be unique.
    pub value: T,
    /// Identity of the node, unique within a forest.
    pub item_id: String,
    /// Item id of the parent.
    ///
    /// Empty for a root. A parent id matching no node also makes a root.
    pub parent_id: String,
    /// Key ordering the node among its siblings.
    pub sort_key: String,
}

impl<T> Record<T> {
    /// Creates a record.
    ///
    /// The argument order follows [`Forest::add`][`crate::Forest::add`].
    #[must_use]
    pub fn new(
        value: T,
        item_id: impl Into<String>,
        sort_key: impl Into<String>,
        parent_id: impl Into<String>,
    ) -> Self {
        Self {
            value,
            item_id: item_id.into(),
            parent_id: parent_id.into(),
            sort_key: sort_key.into(),
        }
    }

    /// Creates a record without a parent.
    #[inline]
    #[must_use]
    pub fn root(value: T, item_id: impl Into<String>, sort_key: impl Into<String>) -> Self {
        Self::new(value, item_id, sort_key, String::new())
    }

    /// Returns true if the record names no parent at all.
    ///
    /// Records with a dangling parent id are roots too, but that can only be
    /// known inside a forest.
    #[inline]
    #[must_use]
    pub fn declares_root(&self) -> bool {
        self.parent_id.is_empty()
    }
}
