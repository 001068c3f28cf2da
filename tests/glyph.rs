//! Tests for box-drawing glyph resolution.

use linkforest::{resolve_glyph, resolve_glyph_raw, Line};
use rstest::rstest;

#[rstest]
#[case::vertical((1, 0, 1, 0), '│')]
#[case::horizontal((0, 1, 0, 1), '─')]
#[case::left_tee((1, 1, 1, 0), '├')]
#[case::right_tee((1, 0, 1, 1), '┤')]
#[case::elbow((1, 1, 0, 0), '└')]
#[case::top_left((0, 1, 1, 0), '┌')]
#[case::cross((1, 1, 1, 1), '┼')]
#[case::double_vertical((2, 0, 2, 0), '║')]
#[case::double_left_tee((2, 2, 2, 0), '╠')]
#[case::double_cross((2, 2, 2, 2), '╬')]
#[case::single_vertical_double_right((1, 2, 1, 0), '╞')]
#[case::double_vertical_single_right((2, 1, 2, 0), '╟')]
#[case::single_up_double_horizontal((1, 2, 0, 2), '╧')]
#[case::double_down_single_left((0, 0, 2, 1), '╖')]
#[case::mixed_cross((2, 1, 2, 1), '╫')]
fn resolves(#[case] lines: (u8, u8, u8, u8), #[case] expected: char) {
    let (up, right, down, left) = lines;
    assert_eq!(resolve_glyph_raw(up, right, down, left), Some(expected));
}

#[rstest]
#[case::nothing((0, 0, 0, 0))]
#[case::up_only((1, 0, 0, 0))]
#[case::left_only((0, 0, 0, 2))]
#[case::mixed_vertical((1, 0, 2, 0))]
#[case::mixed_horizontal((0, 2, 0, 1))]
#[case::mixed_vertical_tee((2, 1, 1, 0))]
#[case::out_of_range((3, 0, 1, 0))]
fn rejects(#[case] lines: (u8, u8, u8, u8)) {
    let (up, right, down, left) = lines;
    assert_eq!(resolve_glyph_raw(up, right, down, left), None);
}

#[test]
fn typed_and_raw_agree() {
    assert_eq!(
        resolve_glyph(Line::Single, Line::Single, Line::Single, Line::None),
        resolve_glyph_raw(1, 1, 1, 0)
    );
    assert_eq!(
        resolve_glyph(Line::Double, Line::None, Line::None, Line::Single),
        Some('╜')
    );
}
