//! Text tree printer.

use core::fmt::{self, Write as _};

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::error::CycleError;
use crate::forest::render::{Connector, DisplayEntry, RenderOptions};
use crate::forest::Forest;
use crate::glyph::{resolve_glyph, Line};

/// Writes the indentation columns of a row.
fn write_prefix<W: fmt::Write>(
    w: &mut W,
    connectors: &[Connector],
    options: &RenderOptions,
) -> fmt::Result {
    let horizontal = resolve_glyph(Line::None, options.weight, Line::None, options.weight);
    for &connector in connectors {
        w.write_char(connector.glyph(options.weight).unwrap_or(' '))?;
        if options.indent == 0 {
            continue;
        }
        let fill = match horizontal {
            Some(line) if connector.is_own_level() => line,
            _ => ' ',
        };
        for _ in 0..options.indent {
            w.write_char(fill)?;
        }
        w.write_char(' ')?;
    }
    Ok(())
}

impl<T> DisplayEntry<'_, T> {
    /// Returns the indentation prefix of the row.
    ///
    /// Each connector is drawn as a glyph, blank when it has none.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkforest::{Forest, Guides, RenderOptions};
    ///
    /// let mut forest = Forest::new();
    /// forest.add("a", "1", "1", "");
    /// forest.add("b", "2", "1", "1");
    /// forest.add("c", "3", "1", "2");
    ///
    /// let options = RenderOptions { indent: 2, ..RenderOptions::default() };
    /// let rows = forest
    ///     .display_entries(options.guides)
    ///     .expect("should never fail: the forest is acyclic");
    /// assert_eq!(rows[2].prefix(&options), "│   └── ");
    /// ```
    #[must_use]
    pub fn prefix(&self, options: &RenderOptions) -> String {
        let mut prefix = String::new();
        write_prefix(&mut prefix, &self.connectors, options)
            .expect("[validity] writing to a `String` never fails");
        prefix
    }
}

/// Tree printer.
///
/// Prints one row per node: the connector prefix followed by the value.
/// Rows are separated by newlines, without a trailing newline.
/// `Display` prints values with `Display`, and `Debug` with `Debug`.
pub struct TreeText<'a, T> {
    /// Rows to print.
    entries: Vec<DisplayEntry<'a, T>>,
    /// Glyph options.
    options: RenderOptions,
}

impl<'a, T> TreeText<'a, T> {
    /// Creates a new `TreeText` object for the rows.
    #[must_use]
    pub fn new(entries: Vec<DisplayEntry<'a, T>>, options: RenderOptions) -> Self {
        Self { entries, options }
    }

    /// Returns the rows.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[DisplayEntry<'a, T>] {
        &self.entries
    }

    /// Writes all rows, formatting values with `value_fmt`.
    fn write_rows<F>(&self, f: &mut fmt::Formatter<'_>, mut value_fmt: F) -> fmt::Result
    where
        F: FnMut(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
    {
        for (i, entry) in self.entries.iter().enumerate() {
            if i != 0 {
                f.write_char('\n')?;
            }
            write_prefix(f, &entry.connectors, &self.options)?;
            value_fmt(entry.value, f)?;
        }
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for TreeText<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_rows(f, |value, f| write!(f, "{}", value))
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeText<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_rows(f, |value, f| write!(f, "{:?}", value))
    }
}

impl<T> Forest<T> {
    /// Returns a printer for the whole forest.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError`] if the forest is not healthy.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkforest::{Forest, Guides, Line, RenderOptions};
    ///
    /// let mut forest = Forest::new();
    /// forest.add("src", "1", "1", "");
    /// forest.add("main.rs", "2", "2", "1");
    /// forest.add("lib.rs", "3", "1", "1");
    /// forest.add("Cargo.toml", "4", "2", "");
    ///
    /// let options = RenderOptions {
    ///     weight: Line::Double,
    ///     guides: Guides::Trimmed,
    ///     indent: 1,
    /// };
    /// let text = forest
    ///     .tree_text(options)
    ///     .expect("should never fail: the forest is acyclic");
    /// assert_eq!(text.to_string(), "src\n╠═ lib.rs\n╚═ main.rs\nCargo.toml");
    /// assert_eq!(
    ///     format!("{:?}", text),
    ///     "\"src\"\n╠═ \"lib.rs\"\n╚═ \"main.rs\"\n\"Cargo.toml\""
    /// );
    /// ```
    pub fn tree_text(&mut self, options: RenderOptions) -> Result<TreeText<'_, T>, CycleError> {
        let entries = self.display_entries(options.guides)?;
        Ok(TreeText::new(entries, options))
    }

    /// Renders the whole forest as text.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError`] if the forest is not healthy.
    pub fn render_text(&mut self, options: &RenderOptions) -> Result<String, CycleError>
    where
        T: fmt::Display,
    {
        self.tree_text(*options).map(|text| text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use smallvec::smallvec;

    use crate::forest::Handle;
    use crate::forest::render::Guides;

    fn prefix_of(connectors: &[Connector], options: &RenderOptions) -> String {
        let mut out = String::new();
        write_prefix(&mut out, connectors, options).unwrap();
        out
    }

    #[test]
    fn compact_prefix_is_one_column_per_level() {
        let options = RenderOptions::default();
        assert_eq!(
            prefix_of(
                &[Connector::PassThrough, Connector::Blank, Connector::Branch],
                &options
            ),
            "│ ├"
        );
    }

    #[test]
    fn indented_prefix_extends_own_level_only() {
        let options = RenderOptions {
            indent: 2,
            guides: Guides::Trimmed,
            ..RenderOptions::default()
        };
        assert_eq!(
            prefix_of(&[Connector::Blank, Connector::Elbow], &options),
            "    └── "
        );
    }

    #[test]
    fn none_weight_draws_nothing() {
        let options = RenderOptions {
            weight: Line::None,
            ..RenderOptions::default()
        };
        assert_eq!(
            prefix_of(&[Connector::PassThrough, Connector::Elbow], &options),
            "  "
        );
    }

    #[test]
    fn rows_are_joined_without_trailing_newline() {
        let a = 1;
        let b = 2;
        let text = TreeText::new(
            alloc::vec![
                DisplayEntry {
                    handle: Handle::from_index(0).unwrap(),
                    value: &a,
                    connectors: smallvec![],
                },
                DisplayEntry {
                    handle: Handle::from_index(1).unwrap(),
                    value: &b,
                    connectors: smallvec![Connector::Elbow],
                },
            ],
            RenderOptions::default(),
        );
        assert_eq!(text.to_string(), "1\n└2");
    }
}
