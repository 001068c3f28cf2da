//! Cycle safety check for a node before insertion.

use alloc::collections::{BTreeMap, BTreeSet};

use crate::forest::{Forest, Record};

/// Outcome of [`Forest::safe_to_add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Safety {
    /// Whether the candidate can be inserted.
    pub is_safe: bool,
    /// Whether a node with the candidate's item id already exists.
    pub already_exists: bool,
    /// Whether inserting the candidate would create a cycle.
    ///
    /// `None` when not evaluated, i.e. when the item id already exists.
    pub causes_cycle: Option<bool>,
}

impl Safety {
    /// Candidate whose item id is already taken.
    const EXISTS: Self = Self {
        is_safe: false,
        already_exists: true,
        causes_cycle: None,
    };
}

/// Walks up from `start` following `parent_of`, and returns true if an item id
/// repeats before an id without a known owner (or an empty one) is reached.
#[must_use]
fn walk_repeats<'a>(parent_of: &BTreeMap<&'a str, &'a str>, start: &'a str) -> bool {
    let mut visited = BTreeSet::new();
    let mut current = start;
    loop {
        if !visited.insert(current) {
            return true;
        }
        match parent_of.get(current) {
            Some(&parent) if !parent.is_empty() => current = parent,
            // Unmatched ids end the chain as a root.
            _ => return false,
        }
    }
}

impl<T> Forest<T> {
    /// Checks whether the candidate can be inserted without creating a cycle.
    ///
    /// Parent links are followed by item id rather than through the cached
    /// index, treating the candidate as if it were already stored. The walk
    /// starts from every existing node and from the candidate itself, so a
    /// forest which is already cyclic reports every candidate as unsafe.
    ///
    /// This check does not depend on the cached parent index and leaves the
    /// forest untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkforest::{Forest, Record};
    ///
    /// let mut forest = Forest::new();
    /// forest.add("a", "1", "1", "2");
    ///
    /// // "2" would become the parent of "1", whose child it claims to be.
    /// let safety = forest.safe_to_add(&Record::new("b", "2", "1", "1"));
    /// assert!(!safety.is_safe);
    /// assert_eq!(safety.causes_cycle, Some(true));
    ///
    /// let safety = forest.safe_to_add(&Record::new("a", "1", "1", ""));
    /// assert!(safety.already_exists);
    /// assert_eq!(safety.causes_cycle, None);
    /// ```
    #[must_use]
    pub fn safe_to_add(&self, candidate: &Record<T>) -> Safety {
        if self.contains_node(candidate) {
            return Safety::EXISTS;
        }

        let mut parent_of = self
            .records()
            .map(|record| (record.item_id.as_str(), record.parent_id.as_str()))
            .collect::<BTreeMap<_, _>>();
        parent_of.insert(candidate.item_id.as_str(), candidate.parent_id.as_str());

        let causes_cycle = self
            .records()
            .map(|record| record.item_id.as_str())
            .chain([candidate.item_id.as_str()])
            .any(|start| walk_repeats(&parent_of, start));

        Safety {
            is_safe: !causes_cycle,
            already_exists: false,
            causes_cycle: Some(causes_cycle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_parent_is_unsafe_even_when_alone() {
        let forest = Forest::new();
        let safety = forest.safe_to_add(&Record::new("X", "9", "1", "9"));
        assert_eq!(
            safety,
            Safety {
                is_safe: false,
                already_exists: false,
                causes_cycle: Some(true),
            }
        );
    }

    #[test]
    fn candidate_closing_a_long_loop_is_unsafe() {
        let mut forest = Forest::new();
        forest.add('b', "2", "1", "1");
        forest.add('c', "3", "1", "2");
        forest.add('d', "4", "1", "3");
        assert!(!forest.safe_to_add(&Record::new('a', "1", "1", "4")).is_safe);
        assert!(forest.safe_to_add(&Record::new('a', "1", "1", "")).is_safe);
    }

    #[test]
    fn dangling_parent_is_safe() {
        let mut forest = Forest::new();
        forest.add('a', "1", "1", "");
        let safety = forest.safe_to_add(&Record::new('b', "2", "1", "nowhere"));
        assert_eq!(safety.causes_cycle, Some(false));
        assert!(safety.is_safe);
    }

    #[test]
    fn existing_cycle_taints_every_candidate() {
        let mut forest = Forest::new();
        forest.add('a', "1", "1", "2");
        forest.add('b', "2", "1", "1");
        assert!(!forest.safe_to_add(&Record::root('c', "3", "1")).is_safe);
    }

    #[test]
    fn check_leaves_caches_alone() {
        let mut forest = Forest::new();
        forest.add('a', "1", "1", "");
        forest.refresh_parent_indexes();
        let _ = forest.safe_to_add(&Record::new('b', "2", "1", "1"));
        assert!(forest.indexes_current());
        assert_eq!(forest.len(), 1);
    }
}
