//! Cycle check over resolved parent links.

use alloc::vec;

use log::debug;

use crate::forest::{Forest, Handle};

/// Cached result of the cycle check.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct HealthCache {
    /// Whether `healthy` reflects the records.
    current: bool,
    /// Whether every parent chain ends at a root.
    healthy: bool,
}

impl HealthCache {
    /// Returns true if the cached flag reflects the records.
    #[inline]
    #[must_use]
    pub(crate) fn is_current(&self) -> bool {
        self.current
    }

    /// Marks the flag stale.
    #[inline]
    pub(crate) fn invalidate(&mut self) {
        self.current = false;
    }
}

/// Returns true if following `parents` from every slot reaches a root.
///
/// Each walk records the slots it has visited and fails as soon as one
/// repeats. Slots proven to reach a root are not walked again.
#[must_use]
fn all_chains_terminate(parents: &[Option<Handle>]) -> bool {
    // `0` means "not visited"; walk `w` stamps slots with `w + 1`.
    let mut visited_by = vec![0_usize; parents.len()];
    let mut rooted = vec![false; parents.len()];

    for start in 0..parents.len() {
        if rooted[start] {
            continue;
        }
        let stamp = start + 1;
        let mut current = start;
        loop {
            if rooted[current] {
                break;
            }
            if visited_by[current] == stamp {
                return false;
            }
            visited_by[current] = stamp;
            match parents[current] {
                Some(parent) => current = parent.index(),
                None => break,
            }
        }

        // The walk ended at a root: everything on it is rooted as well.
        let mut current = start;
        while !rooted[current] {
            rooted[current] = true;
            match parents[current] {
                Some(parent) => current = parent.index(),
                None => break,
            }
        }
    }

    true
}

impl<T> Forest<T> {
    /// Returns true if no node is its own ancestor.
    ///
    /// The result is cached until the next structural mutation. The check is
    /// diagnostic only and repairs nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkforest::Forest;
    ///
    /// let mut forest = Forest::new();
    /// forest.add("a", "1", "1", "");
    /// forest.add("b", "2", "1", "1");
    /// assert!(forest.is_healthy());
    ///
    /// // `add` does not check cycles.
    /// forest.add("c", "3", "1", "4");
    /// forest.add("d", "4", "1", "3");
    /// assert!(!forest.is_healthy());
    /// ```
    pub fn is_healthy(&mut self) -> bool {
        if !self.health.is_current() {
            self.refresh_parent_indexes();
            let parents = self
                .index
                .parents()
                .expect("[consistency] the parent index has just been refreshed");
            let healthy = all_chains_terminate(parents);
            debug!("health check over {} nodes: healthy={}", self.len, healthy);
            self.health = HealthCache {
                current: true,
                healthy,
            };
        }
        self.health.healthy
    }
}
