// Chunk: docs/chunks/grapheme_stepping - Grapheme cluster boundary helpers

//! Grapheme cluster boundary detection over line text.
//!
//! Columns in the document are code points, but a caret should skip what
//! users perceive as a single character:
//!
//! - ZWJ emoji sequences: 👨‍👩‍👧 (several code points joined by U+200D)
//! - Combining character sequences: é (e + combining acute)
//! - Regional indicator pairs: 🇺🇸
//!
//! Offsets here are byte offsets into a single line's text. They need not
//! lie on a code-point boundary; a mid-sequence offset snaps to the cluster
//! containing it.

use unicode_segmentation::UnicodeSegmentation;

/// Returns the byte offset of the grapheme boundary immediately before `offset`.
///
/// If `offset` is at the start of a cluster, returns the start of the previous
/// cluster. If it is inside a cluster, returns the start of that cluster.
/// Returns 0 at the start of the text.
pub fn grapheme_boundary_left(text: &str, offset: usize) -> usize {
    if offset == 0 || text.is_empty() {
        return 0;
    }

    let offset = offset.min(text.len());
    let bytes = text.as_bytes();

    // ASCII is always a single-byte cluster when it precedes a boundary,
    // except for the CR of a CRLF pair.
    if text.is_char_boundary(offset) && bytes[offset - 1].is_ascii() && bytes[offset - 1] != b'\n' {
        return offset - 1;
    }

    text.grapheme_indices(true)
        .map(|(start, _)| start)
        .take_while(|&start| start < offset)
        .last()
        .unwrap_or(0)
}

/// Returns the byte offset of the grapheme boundary immediately after `offset`.
///
/// If `offset` is at or inside a cluster, returns the end of that cluster.
/// Returns `text.len()` at or past the end.
pub fn grapheme_boundary_right(text: &str, offset: usize) -> usize {
    if offset >= text.len() {
        return text.len();
    }

    let bytes = text.as_bytes();
    if text.is_char_boundary(offset) && bytes[offset].is_ascii() && bytes[offset] != b'\r' {
        match bytes.get(offset + 1) {
            None => return offset + 1,
            // The next byte may be a combining mark; only ASCII rules it out.
            Some(next) if next.is_ascii() => return offset + 1,
            Some(_) => {}
        }
    }

    text.grapheme_indices(true)
        .map(|(start, grapheme)| start + grapheme.len())
        .find(|&end| end > offset)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAMILY: &str = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";

    #[test]
    fn left_ascii() {
        assert_eq!(grapheme_boundary_left("hello", 5), 4);
        assert_eq!(grapheme_boundary_left("hello", 1), 0);
        assert_eq!(grapheme_boundary_left("hello", 0), 0);
        assert_eq!(grapheme_boundary_left("", 3), 0);
    }

    #[test]
    fn right_ascii() {
        assert_eq!(grapheme_boundary_right("hello", 0), 1);
        assert_eq!(grapheme_boundary_right("hello", 4), 5);
        assert_eq!(grapheme_boundary_right("hello", 5), 5);
        assert_eq!(grapheme_boundary_right("hello", 9), 5);
    }

    #[test]
    fn combining_sequence_is_one_cluster() {
        let text = "ae\u{0301}b";
        // a(0) e(1) U+0301(2..4) b(4)
        assert_eq!(grapheme_boundary_right(text, 1), 4);
        assert_eq!(grapheme_boundary_left(text, 4), 1);
    }

    #[test]
    fn zwj_sequence_is_one_cluster() {
        let text = format!("a{FAMILY}b");
        let end = 1 + FAMILY.len();
        assert_eq!(grapheme_boundary_right(&text, 1), end);
        assert_eq!(grapheme_boundary_left(&text, end), 1);
    }

    #[test]
    fn regional_indicator_pair() {
        let flag = "\u{1F1FA}\u{1F1F8}";
        assert_eq!(grapheme_boundary_right(flag, 0), flag.len());
        assert_eq!(grapheme_boundary_left(flag, flag.len()), 0);
    }

    #[test]
    fn offset_inside_code_point_snaps_to_cluster() {
        let text = "x€y";
        // '€' occupies bytes 1..4
        assert_eq!(grapheme_boundary_right(text, 2), 4);
        assert_eq!(grapheme_boundary_left(text, 2), 1);
    }

    #[test]
    fn crlf_is_one_cluster() {
        let text = "a\r\n";
        assert_eq!(grapheme_boundary_right(text, 1), 3);
    }
}
