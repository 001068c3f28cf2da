//! Errors.

use alloc::string::String;

/// Insertion or identity update rejected by the forest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InsertError {
    /// Another node already owns the item id.
    #[error("item id {item_id:?} is already used by another node")]
    DuplicateItemId {
        /// Rejected item id.
        item_id: String,
    },
    /// The candidate would close a loop of parent links.
    #[error("inserting item id {item_id:?} would create a parent cycle")]
    CausesCycle {
        /// Rejected item id.
        item_id: String,
    },
}

impl InsertError {
    /// Returns the item id of the rejected node.
    #[inline]
    #[must_use]
    pub fn item_id(&self) -> &str {
        match self {
            Self::DuplicateItemId { item_id } | Self::CausesCycle { item_id } => item_id,
        }
    }
}

/// The forest contains a loop of parent links and cannot be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("the forest contains a cycle of parent links")]
pub struct CycleError;
