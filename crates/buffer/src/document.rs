// Chunk: docs/chunks/document_api - Line-indexed UTF-8 document over gap buffers

//! Document is the main public API for text storage.
//!
//! It combines a byte gap buffer (the UTF-8 text) with a line index (the
//! byte offset of every line start) and translates between byte offsets,
//! line numbers and code-point columns.
//!
//! Every mutation repairs the line index before returning and then reports
//! a [`LinesChanged`] both as its return value and to the registered
//! observer, so a layout cache can shift incrementally.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConsistencyError;
use crate::gap_buffer::{GapBuffer, GrowthPolicy};
use crate::grapheme;
use crate::line_index::LineIndex;
use crate::types::{LinesChanged, Position};
use crate::utf8;

/// Allocation settings for the two buffers behind a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Policy for the text bytes.
    pub text: GrowthPolicy,
    /// Policy for the line-start offsets.
    pub lines: GrowthPolicy,
}

/// Callback invoked once per applied mutation.
pub type LinesChangedCallback = Box<dyn FnMut(LinesChanged)>;

/// A mutable UTF-8 document with an incrementally maintained line index.
///
/// Positions are byte offsets in `[0, len()]`. Out-of-range queries degrade
/// to clamped values or empty strings; out-of-range mutations are no-ops and
/// return `None`.
pub struct Document {
    text: GapBuffer<u8>,
    lines: LineIndex,
    on_lines_changed: Option<LinesChangedCallback>,
    /// Mutation counter for sampling debug assertions (debug builds only).
    #[cfg(debug_assertions)]
    debug_mutation_count: u64,
}

impl Document {
    /// Creates an empty document with a single empty line.
    pub fn new() -> Self {
        Self::with_config(DocumentConfig::default())
    }

    pub fn with_config(config: DocumentConfig) -> Self {
        Self {
            text: GapBuffer::with_policy(config.text),
            lines: LineIndex::new(config.lines),
            on_lines_changed: None,
            #[cfg(debug_assertions)]
            debug_mutation_count: 0,
        }
    }

    // ==================== Change notification ====================
    // Chunk: docs/chunks/line_change_notification - Single-subscriber line change callback

    /// Registers the observer notified after every applied mutation.
    ///
    /// Replaces any previously registered observer.
    pub fn set_lines_changed<F>(&mut self, callback: F)
    where
        F: FnMut(LinesChanged) + 'static,
    {
        self.on_lines_changed = Some(Box::new(callback));
    }

    pub fn clear_lines_changed(&mut self) {
        self.on_lines_changed = None;
    }

    // ==================== Accessors ====================

    /// Returns the length of the document in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the number of lines. Always at least 1.
    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    /// Returns the line containing byte offset `pos`.
    ///
    /// An offset on a line start belongs to that line. Offsets past the end
    /// resolve to the last line.
    pub fn line_at(&self, pos: usize) -> usize {
        self.lines.line_at_offset(pos)
    }

    /// Returns the offset where `line` starts, or `len()` if there is no such line.
    pub fn line_start_position(&self, line: usize) -> usize {
        self.lines.line_start(line).unwrap_or_else(|| self.len())
    }

    /// Returns the offset of `line`'s terminating newline, or `len()` for the
    /// last line and for lines out of range.
    pub fn line_end_position(&self, line: usize) -> usize {
        self.lines
            .line_end(line, self.len())
            .unwrap_or_else(|| self.len())
    }

    /// Returns the text of `line` without its newline.
    ///
    /// Returns an empty string if the line is out of bounds.
    pub fn line_text(&self, line: usize) -> String {
        if line >= self.line_count() {
            return String::new();
        }
        let start = self.line_start_position(line);
        let end = self.line_end_position(line);
        self.text(start, end - start)
    }

    /// Returns up to `len` bytes starting at `pos` as a string.
    ///
    /// `len` is clamped to the end of the document, so `text(0, usize::MAX)`
    /// returns everything. A range that splits a code point is decoded lossily.
    pub fn text(&self, pos: usize, len: usize) -> String {
        String::from_utf8_lossy(&self.bytes(pos, len)).into_owned()
    }

    /// Returns up to `len` raw bytes starting at `pos`, clamped like [`text`](Self::text).
    fn bytes(&self, pos: usize, len: usize) -> Vec<u8> {
        if pos > self.len() {
            return Vec::new();
        }
        let len = len.min(self.len() - pos);

        let gap = self.text.gap_position();
        if pos >= gap || pos + len <= gap {
            return self.text.const_data(pos)[..len].to_vec();
        }

        // The range straddles the gap: join the run before it and the run after.
        let head = gap - pos;
        let mut bytes = Vec::with_capacity(len);
        bytes.extend_from_slice(&self.text.const_data(pos)[..head]);
        bytes.extend_from_slice(&self.text.const_data(gap)[..len - head]);
        bytes
    }

    /// Returns the text of `line` only if its bytes are valid UTF-8.
    ///
    /// Byte offsets into the result match document offsets, which a lossy
    /// decode does not guarantee.
    fn exact_line_text(&self, line: usize) -> Option<String> {
        let start = self.line_start_position(line);
        let end = self.line_end_position(line);
        String::from_utf8(self.bytes(start, end - start)).ok()
    }

    /// Returns the entire document as a string.
    pub fn contents(&self) -> String {
        self.text(0, self.len())
    }

    /// Returns the raw bytes before and after the gap, in order.
    ///
    /// Lets a writer stream the document out without an intermediate copy.
    pub fn as_slices(&self) -> (&[u8], &[u8]) {
        self.text.as_slices()
    }

    // ==================== Columns ====================
    // Chunk: docs/chunks/utf8_columns - Code-point columns over raw UTF-8 bytes

    /// Returns the number of code points between the start of `pos`'s line and `pos`.
    pub fn column_at(&self, pos: usize) -> usize {
        let pos = pos.min(self.len());
        let start = self.line_start_position(self.line_at(pos));
        utf8::count_char_starts(&self.text, start, pos)
    }

    /// Returns the start of the next code point, crossing newlines.
    pub fn next_column_position(&self, pos: usize) -> usize {
        utf8::next_char_start(&self.text, pos)
    }

    /// Returns the start of the previous code point, crossing newlines.
    pub fn previous_column_position(&self, pos: usize) -> usize {
        utf8::prev_char_start(&self.text, pos)
    }

    /// Returns the offset of code-point `column` on `line`.
    ///
    /// Columns past the end of the line clamp to the line end. Lines out of
    /// range resolve to `len()`.
    pub fn position_at(&self, line: usize, column: usize) -> usize {
        if line >= self.line_count() {
            return self.len();
        }

        let end = self.line_end_position(line);
        let mut pos = self.line_start_position(line);
        for _ in 0..column {
            if pos >= end {
                break;
            }
            pos = self.next_column_position(pos);
        }
        pos.min(end)
    }

    /// Returns the (line, column) coordinate of byte offset `pos`.
    pub fn line_column(&self, pos: usize) -> Position {
        let pos = pos.min(self.len());
        Position::new(self.line_at(pos), self.column_at(pos))
    }

    /// Returns the byte offset of a (line, column) coordinate.
    pub fn offset_of(&self, position: Position) -> usize {
        self.position_at(position.line, position.col)
    }

    // ==================== Graphemes ====================
    // Chunk: docs/chunks/grapheme_stepping - Grapheme cluster boundary helpers

    /// Returns the offset after the grapheme cluster at `pos`.
    ///
    /// From a line's end this moves past the newline to the next line. On a
    /// line holding invalid UTF-8 this steps one code point instead.
    pub fn next_grapheme_position(&self, pos: usize) -> usize {
        if pos >= self.len() {
            return self.len();
        }

        let line = self.line_at(pos);
        let start = self.line_start_position(line);
        let end = self.line_end_position(line);
        if pos >= end {
            return self.next_column_position(pos);
        }

        let Some(text) = self.exact_line_text(line) else {
            tracing::trace!(line, "invalid UTF-8 on line, stepping by code point");
            return self.next_column_position(pos);
        };
        (start + grapheme::grapheme_boundary_right(&text, pos - start)).min(end)
    }

    /// Returns the offset of the grapheme cluster before `pos`.
    ///
    /// From a line's start this moves onto the previous line's newline. On a
    /// line holding invalid UTF-8 this steps one code point instead.
    pub fn previous_grapheme_position(&self, pos: usize) -> usize {
        let pos = pos.min(self.len());
        if pos == 0 {
            return 0;
        }

        let line = self.line_at(pos);
        let start = self.line_start_position(line);
        if pos == start {
            return self.previous_column_position(pos);
        }

        let Some(text) = self.exact_line_text(line) else {
            tracing::trace!(line, "invalid UTF-8 on line, stepping by code point");
            return self.previous_column_position(pos);
        };
        start + grapheme::grapheme_boundary_left(&text, pos - start)
    }

    // ==================== Validation ====================

    /// Compares the incremental line index against a rebuild from the bytes.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        let actual: Vec<usize> = self.lines.starts().collect();

        match actual.first() {
            Some(0) => {}
            found => {
                return Err(ConsistencyError::FirstLineStart {
                    found: found.copied(),
                })
            }
        }

        for (line, pair) in actual.windows(2).enumerate() {
            if pair[0] >= pair[1] {
                return Err(ConsistencyError::NotIncreasing {
                    line,
                    start: pair[0],
                    next: pair[1],
                });
            }
        }

        let mut expected = LineIndex::default();
        expected.rebuild(self.text.iter());
        if expected.line_count() != actual.len() {
            return Err(ConsistencyError::LineCount {
                expected: expected.line_count(),
                actual: actual.len(),
            });
        }

        for (line, (expected, actual)) in expected.starts().zip(actual).enumerate() {
            if expected != actual {
                return Err(ConsistencyError::LineStart {
                    line,
                    expected,
                    actual,
                });
            }
        }

        Ok(())
    }

    /// Debug assertion: verifies the line index against a fresh rebuild.
    ///
    /// The rebuild is O(n), so only every 64th mutation is checked.
    /// Compiled out in release builds.
    #[cfg(debug_assertions)]
    fn assert_line_index_consistent(&mut self) {
        self.debug_mutation_count += 1;
        if self.debug_mutation_count % 64 != 0 {
            return;
        }
        if let Err(err) = self.check_consistency() {
            panic!(
                "line index drift detected after {} mutations: {err}\n  text len: {}\n  line starts: {:?}",
                self.debug_mutation_count,
                self.len(),
                self.lines.starts().collect::<Vec<_>>(),
            );
        }
    }

    #[cfg(not(debug_assertions))]
    fn assert_line_index_consistent(&mut self) {}

    // ==================== Mutations ====================

    /// Inserts `text` at byte offset `pos`.
    ///
    /// Returns `None` without touching the document when `pos > len()` or
    /// `text` is empty. Otherwise inserting `n` newlines adds exactly `n` lines.
    ///
    /// A `pos` past the end is ignored rather than clamped. Clamping would
    /// hide caller bugs in position bookkeeping.
    pub fn insert(&mut self, pos: usize, text: &str) -> Option<LinesChanged> {
        if pos > self.len() {
            tracing::trace!(pos, len = self.len(), "insert past end ignored");
            return None;
        }
        if text.is_empty() {
            return None;
        }

        let bytes = text.as_bytes();
        let line = self.lines.line_at_offset(pos);
        self.text.insert_slice(pos, bytes);
        let added = self.lines.insert_text(line, pos, bytes);

        tracing::trace!(pos, bytes = bytes.len(), lines_added = added, "insert");
        Some(self.finish_edit(LinesChanged::new(line, added as isize)))
    }

    /// Appends `text` at the end of the document.
    pub fn append(&mut self, text: &str) -> Option<LinesChanged> {
        self.insert(self.len(), text)
    }

    /// Removes `len` bytes starting at `pos`.
    ///
    /// Returns `None` without touching the document when `len == 0` or the
    /// range runs past the end. Removing `n` newlines removes exactly `n` lines.
    pub fn remove(&mut self, pos: usize, len: usize) -> Option<LinesChanged> {
        match pos.checked_add(len) {
            Some(end) if end <= self.len() => {}
            _ => {
                tracing::trace!(pos, remove = len, len = self.len(), "remove past end ignored");
                return None;
            }
        }
        if len == 0 {
            return None;
        }

        let line = self.lines.line_at_offset(pos);
        let removed = self.lines.remove_text(line, pos, len);
        self.text.remove(pos, len);

        tracing::trace!(pos, bytes = len, lines_removed = removed, "remove");
        Some(self.finish_edit(LinesChanged::new(line, -(removed as isize))))
    }

    fn finish_edit(&mut self, change: LinesChanged) -> LinesChanged {
        self.assert_line_index_consistent();
        if let Some(callback) = self.on_lines_changed.as_mut() {
            callback(change);
        }
        change
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for Document {
    /// Loads `content` in one step without notifying any observer.
    fn from(content: &str) -> Self {
        let mut doc = Self::new();
        doc.text.insert_slice(0, content.as_bytes());
        doc.lines.rebuild(content.bytes());
        doc
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (head, tail) = self.as_slices();
        let mut bytes = Vec::with_capacity(self.len());
        bytes.extend_from_slice(head);
        bytes.extend_from_slice(tail);
        f.write_str(&String::from_utf8_lossy(&bytes))
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("len", &self.len())
            .field("line_count", &self.line_count())
            .field("gap_position", &self.text.gap_position())
            .field("observed", &self.on_lines_changed.is_some())
            .finish()
    }
}
