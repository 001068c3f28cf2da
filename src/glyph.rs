//! Box-drawing character resolver.
//!
//! A glyph is described by the stroke drawn from the cell center towards each
//! of the four edges. Only combinations that exist in the Unicode box-drawing
//! block resolve to a character; everything else is reported as `None`.

/// Stroke weight of a line segment in one direction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    /// No line.
    #[default]
    None,
    /// Single line.
    Single,
    /// Double line.
    Double,
}

impl Line {
    /// Creates a line from the raw weight encoding (`0`, `1`, or `2`).
    ///
    /// Returns `None` for any other value.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkforest::Line;
    ///
    /// assert_eq!(Line::from_weight(2), Some(Line::Double));
    /// assert_eq!(Line::from_weight(3), None);
    /// ```
    #[inline]
    #[must_use]
    pub const fn from_weight(weight: u8) -> Option<Self> {
        match weight {
            0 => Some(Self::None),
            1 => Some(Self::Single),
            2 => Some(Self::Double),
            _ => None,
        }
    }

    /// Returns the raw weight encoding.
    #[inline]
    #[must_use]
    pub const fn weight(self) -> u16 {
        match self {
            Self::None => 0,
            Self::Single => 1,
            Self::Double => 2,
        }
    }

    /// Returns true if a line is drawn.
    #[inline]
    #[must_use]
    pub const fn is_drawn(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Returns true if both ends of an axis are drawn with different weights.
#[inline]
#[must_use]
fn mixed_axis(a: Line, b: Line) -> bool {
    a.is_drawn() && b.is_drawn() && a != b
}

/// Resolves the box-drawing character for the given four strokes.
///
/// Returns `None` when fewer than two directions are drawn, or when an axis
/// (up/down or left/right) mixes single and double weights.
///
/// # Examples
///
/// ```
/// use linkforest::{resolve_glyph, Line};
///
/// assert_eq!(
///     resolve_glyph(Line::Single, Line::Single, Line::Single, Line::None),
///     Some('├')
/// );
/// assert_eq!(
///     resolve_glyph(Line::Single, Line::None, Line::None, Line::None),
///     None
/// );
/// ```
#[must_use]
pub fn resolve_glyph(up: Line, right: Line, down: Line, left: Line) -> Option<char> {
    let drawn = [up, right, down, left]
        .iter()
        .filter(|line| line.is_drawn())
        .count();
    if drawn < 2 || mixed_axis(up, down) || mixed_axis(left, right) {
        return None;
    }

    let key = up.weight() * 1000 + right.weight() * 100 + down.weight() * 10 + left.weight();
    glyph_for_key(key)
}

/// Resolves the glyph from the raw `0`/`1`/`2` weight encoding.
///
/// Returns `None` if any of the weights is out of range.
#[must_use]
pub fn resolve_glyph_raw(up: u8, right: u8, down: u8, left: u8) -> Option<char> {
    resolve_glyph(
        Line::from_weight(up)?,
        Line::from_weight(right)?,
        Line::from_weight(down)?,
        Line::from_weight(left)?,
    )
}

/// Looks up the composed `up right down left` key.
#[must_use]
fn glyph_for_key(key: u16) -> Option<char> {
    let ch = match key {
        // Single.
        1010 => '│',
        101 => '─',
        110 => '┌',
        11 => '┐',
        1100 => '└',
        1001 => '┘',
        1110 => '├',
        1011 => '┤',
        111 => '┬',
        1101 => '┴',
        1111 => '┼',
        // Double.
        2020 => '║',
        202 => '═',
        220 => '╔',
        22 => '╗',
        2200 => '╚',
        2002 => '╝',
        2220 => '╠',
        2022 => '╣',
        222 => '╦',
        2202 => '╩',
        2222 => '╬',
        // Mixed corners.
        210 => '╒',
        120 => '╓',
        12 => '╕',
        21 => '╖',
        1200 => '╘',
        2100 => '╙',
        1002 => '╛',
        2001 => '╜',
        // Mixed tees.
        1210 => '╞',
        2120 => '╟',
        1012 => '╡',
        2021 => '╢',
        212 => '╤',
        121 => '╥',
        1202 => '╧',
        2101 => '╨',
        // Mixed crosses.
        1212 => '╪',
        2121 => '╫',
        _ => return None,
    };
    Some(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// All drawable four-direction combinations.
    fn all_lines() -> impl Iterator<Item = [Line; 4]> {
        const LINES: [Line; 3] = [Line::None, Line::Single, Line::Double];
        LINES.into_iter().flat_map(|up| {
            LINES.into_iter().flat_map(move |right| {
                LINES.into_iter().flat_map(move |down| {
                    LINES
                        .into_iter()
                        .map(move |left| [up, right, down, left])
                })
            })
        })
    }

    #[test]
    fn every_valid_combination_has_a_glyph() {
        let mut resolved = 0;
        for [up, right, down, left] in all_lines() {
            let drawn = [up, right, down, left]
                .iter()
                .filter(|l| l.is_drawn())
                .count();
            let valid = drawn >= 2 && !mixed_axis(up, down) && !mixed_axis(left, right);
            let glyph = resolve_glyph(up, right, down, left);
            assert_eq!(
                glyph.is_some(),
                valid,
                "unexpected result for {:?}",
                [up, right, down, left]
            );
            if glyph.is_some() {
                resolved += 1;
            }
        }
        assert_eq!(resolved, 40);
    }

    #[test]
    fn glyphs_are_distinct() {
        let mut glyphs = all_lines()
            .filter_map(|[u, r, d, l]| resolve_glyph(u, r, d, l))
            .collect::<alloc::vec::Vec<_>>();
        let count = glyphs.len();
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), count);
    }

    #[test]
    fn mixed_straight_axis_is_rejected() {
        assert_eq!(
            resolve_glyph(Line::Single, Line::None, Line::Double, Line::None),
            None
        );
        assert_eq!(
            resolve_glyph(Line::None, Line::Double, Line::None, Line::Single),
            None
        );
    }
}
