//! Flattening a forest into tree-view rows.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::error::CycleError;
use crate::forest::{Forest, Handle};
use crate::glyph::{resolve_glyph, Line};

/// What to draw in one indentation column of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connector {
    /// Vertical line passing an ancestor level.
    PassThrough,
    /// The row's own level, with more siblings following.
    Branch,
    /// The row's own level, as the last sibling.
    Elbow,
    /// Nothing to draw.
    Blank,
}

impl Connector {
    /// Returns the strokes `[up, right, down, left]` for the connector.
    #[must_use]
    pub fn lines(self, weight: Line) -> [Line; 4] {
        let none = Line::None;
        match self {
            Self::PassThrough => [weight, none, weight, none],
            Self::Branch => [weight, weight, weight, none],
            Self::Elbow => [weight, weight, none, none],
            Self::Blank => [none; 4],
        }
    }

    /// Returns the box-drawing glyph for the connector.
    ///
    /// Returns `None` for [`Connector::Blank`] and for [`Line::None`].
    ///
    /// # Examples
    ///
    /// ```
    /// use linkforest::{Connector, Line};
    ///
    /// assert_eq!(Connector::Branch.glyph(Line::Single), Some('├'));
    /// assert_eq!(Connector::Elbow.glyph(Line::Double), Some('╚'));
    /// assert_eq!(Connector::Blank.glyph(Line::Single), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn glyph(self, weight: Line) -> Option<char> {
        let [up, right, down, left] = self.lines(weight);
        resolve_glyph(up, right, down, left)
    }

    /// Returns true for the connector of the row's own level.
    #[inline]
    #[must_use]
    pub fn is_own_level(self) -> bool {
        matches!(self, Self::Branch | Self::Elbow)
    }
}

/// How ancestor levels are drawn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Guides {
    /// Every ancestor level is a [`Connector::PassThrough`].
    #[default]
    Always,
    /// Ancestor levels below a last sibling are [`Connector::Blank`].
    Trimmed,
}

/// Options for text rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderOptions {
    /// Stroke weight of the connector glyphs.
    pub weight: Line,
    /// How ancestor levels are drawn.
    pub guides: Guides,
    /// Horizontal fill after each connector glyph.
    ///
    /// Branches and elbows are extended with this many horizontal lines and
    /// other columns with spaces. A non-zero value also adds one separating
    /// space to every column.
    pub indent: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            weight: Line::Single,
            guides: Guides::Always,
            indent: 0,
        }
    }
}

/// A row of the flattened forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEntry<'a, T> {
    /// Handle of the node.
    pub handle: Handle,
    /// Value of the node.
    pub value: &'a T,
    /// One connector per level, from the first level below the root down to
    /// the node itself. Empty for roots.
    pub connectors: SmallVec<[Connector; 8]>,
}

impl<T> DisplayEntry<'_, T> {
    /// Returns the depth of the node (`0` for roots).
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.connectors.len()
    }
}

/// Siblings of one level and the position of the next one to emit.
type Frame<'s> = (&'s [Handle], usize);

impl<T> Forest<T> {
    /// Flattens the forest into depth-first pre-order rows.
    ///
    /// Roots come first in sibling order, each followed by its subtree.
    /// Siblings are ordered by sort key, ties by insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError`] if the forest is not healthy
    /// (see [`Forest::is_healthy`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use linkforest::{Connector, Forest, Guides};
    ///
    /// let mut forest = Forest::new();
    /// forest.add("Laptops", "3", "2", "1");
    /// forest.add("Electronics", "1", "1", "");
    /// forest.add("Phones", "2", "1", "1");
    ///
    /// let rows = forest
    ///     .display_entries(Guides::Always)
    ///     .expect("should never fail: the forest is acyclic");
    /// let rows = rows
    ///     .iter()
    ///     .map(|row| (*row.value, row.connectors.to_vec()))
    ///     .collect::<Vec<_>>();
    /// assert_eq!(
    ///     rows,
    ///     [
    ///         ("Electronics", vec![]),
    ///         ("Phones", vec![Connector::Branch]),
    ///         ("Laptops", vec![Connector::Elbow]),
    ///     ]
    /// );
    /// ```
    pub fn display_entries(
        &mut self,
        guides: Guides,
    ) -> Result<Vec<DisplayEntry<'_, T>>, CycleError> {
        if !self.is_healthy() {
            return Err(CycleError);
        }
        let this: &Self = self;
        let (roots, children) = this.sorted_children();

        let mut rows = Vec::with_capacity(this.len);
        let mut stack: Vec<Frame<'_>> = Vec::new();
        stack.push((&roots[..], 0));
        // Whether each node on the current path is the last of its siblings,
        // from the root downwards.
        let mut lasts: Vec<bool> = Vec::new();

        while let Some(frame) = stack.last_mut() {
            let (siblings, pos) = *frame;
            let Some(&handle) = siblings.get(pos) else {
                stack.pop();
                lasts.pop();
                continue;
            };
            frame.1 += 1;
            let depth = stack.len() - 1;
            let is_last = pos + 1 == siblings.len();

            let mut connectors = SmallVec::new();
            if depth > 0 {
                for &ancestor_is_last in &lasts[1..depth] {
                    connectors.push(match guides {
                        Guides::Trimmed if ancestor_is_last => Connector::Blank,
                        _ => Connector::PassThrough,
                    });
                }
                connectors.push(if is_last {
                    Connector::Elbow
                } else {
                    Connector::Branch
                });
            }
            let record = this
                .record(handle)
                .expect("[consistency] grouped nodes must be alive");
            rows.push(DisplayEntry {
                handle,
                value: &record.value,
                connectors,
            });

            let kids = &children[handle.index()];
            if !kids.is_empty() {
                lasts.push(is_last);
                stack.push((kids.as_slice(), 0));
            }
        }

        debug_assert_eq!(rows.len(), this.len, "[consistency] every node is emitted once");
        Ok(rows)
    }
}
