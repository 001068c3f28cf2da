//! Node handle.

use core::fmt;
use core::num::NonZeroUsize;

/// Position of a node in the forest storage.
///
/// A handle stays valid until its node is removed; removing other nodes does
/// not shift it. Handles of removed nodes are never reused.
///
/// The ordering follows the insertion order of nodes. It says nothing about
/// the tree structure.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(NonZeroUsize);

impl Handle {
    /// Creates a handle from the storage position.
    ///
    /// Returns `None` if the position is `usize::MAX`.
    #[inline]
    #[must_use]
    pub(crate) fn from_index(index: usize) -> Option<Self> {
        index.checked_add(1).and_then(NonZeroUsize::new).map(Self)
    }

    /// Returns the storage position.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0.get() - 1
    }
}

// Prevent `{:#?}` from printing the value in redundant 3 lines.
impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use core::mem;

    #[test]
    fn niche_optimized() {
        assert_eq!(
            mem::size_of::<Handle>(),
            mem::size_of::<Option<Handle>>(),
            "`Option<Handle>` type must have the same size as \
             `Handle` type due to niche optimization"
        );
    }

    #[test]
    fn index_round_trip_at_bounds() {
        assert_eq!(Handle::from_index(0).map(Handle::index), Some(0));
        assert_eq!(
            Handle::from_index(usize::MAX - 1).map(Handle::index),
            Some(usize::MAX - 1)
        );
        assert_eq!(Handle::from_index(usize::MAX), None);
    }
}
