// Chunk: docs/chunks/utf8_columns - Code-point columns over raw UTF-8 bytes

//! Code-point arithmetic over the document's byte buffer.
//!
//! A byte starts a code point unless its top two bits are `10`
//! (0x80..=0xBF, a continuation byte). Columns are counts of code-point
//! starts, so a multi-byte sequence always occupies exactly one column.

use crate::gap_buffer::GapBuffer;

/// Returns true for UTF-8 continuation bytes.
pub fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Counts code-point starts in the logical byte range `[start, end)`.
pub(crate) fn count_char_starts(buf: &GapBuffer<u8>, start: usize, end: usize) -> usize {
    let end = end.min(buf.len());
    let mut pos = start;
    let mut count = 0;

    // Walk contiguous runs so the gap is crossed once instead of per byte.
    while pos < end {
        let run = buf.const_data(pos);
        if run.is_empty() {
            break;
        }
        let take = run.len().min(end - pos);
        count += run[..take].iter().filter(|b| !is_continuation(**b)).count();
        pos += take;
    }

    count
}

/// Returns the start of the code point following the one at `pos`.
///
/// Clamps to `buf.len()`.
pub(crate) fn next_char_start(buf: &GapBuffer<u8>, pos: usize) -> usize {
    let len = buf.len();
    if pos >= len {
        return len;
    }

    let mut next = pos + 1;
    while next < len && is_continuation(buf.at(next)) {
        next += 1;
    }
    next
}

/// Returns the start of the code point preceding `pos`.
///
/// Clamps to 0; a `pos` past the end is treated as the end.
pub(crate) fn prev_char_start(buf: &GapBuffer<u8>, pos: usize) -> usize {
    let pos = pos.min(buf.len());
    if pos == 0 {
        return 0;
    }

    let mut prev = pos - 1;
    while prev > 0 && is_continuation(buf.at(prev)) {
        prev -= 1;
    }
    prev
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(s: &str) -> GapBuffer<u8> {
        let mut buf = GapBuffer::new();
        buf.insert_slice(0, s.as_bytes());
        buf
    }

    #[test]
    fn test_is_continuation() {
        assert!(!is_continuation(b'a'));
        assert!(!is_continuation(0xE2));
        assert!(is_continuation(0x80));
        assert!(is_continuation(0xBF));
        assert!(!is_continuation(0xC0));
    }

    #[test]
    fn test_count_char_starts() {
        // 'é' is 2 bytes, '€' is 3 bytes
        let b = buf("aé€b");
        assert_eq!(count_char_starts(&b, 0, 7), 4);
        assert_eq!(count_char_starts(&b, 0, 3), 2);
        assert_eq!(count_char_starts(&b, 1, 6), 2);
        assert_eq!(count_char_starts(&b, 0, 100), 4);
    }

    #[test]
    fn test_count_char_starts_across_gap() {
        let mut b = buf("a€c");
        // Split the euro sign with the gap.
        b.insert(2, 0x82);
        b.remove(2, 1);
        assert_eq!(b.gap_position(), 2);
        assert_eq!(count_char_starts(&b, 0, 5), 3);
    }

    #[test]
    fn test_next_char_start() {
        let b = buf("a€b");
        assert_eq!(next_char_start(&b, 0), 1);
        assert_eq!(next_char_start(&b, 1), 4);
        assert_eq!(next_char_start(&b, 4), 5);
        assert_eq!(next_char_start(&b, 5), 5);
        assert_eq!(next_char_start(&b, 50), 5);
    }

    #[test]
    fn test_prev_char_start() {
        let b = buf("a€b");
        assert_eq!(prev_char_start(&b, 5), 4);
        assert_eq!(prev_char_start(&b, 4), 1);
        assert_eq!(prev_char_start(&b, 1), 0);
        assert_eq!(prev_char_start(&b, 0), 0);
        assert_eq!(prev_char_start(&b, 50), 4);
    }

    #[test]
    fn test_step_from_inside_sequence() {
        let b = buf("€x");
        assert_eq!(next_char_start(&b, 1), 3);
        assert_eq!(prev_char_start(&b, 2), 0);
    }
}
