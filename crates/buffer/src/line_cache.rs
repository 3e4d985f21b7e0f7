// Chunk: docs/chunks/line_cache - Per-line cache shifted by line change notifications

//! Per-line cache kept in step with a [`Document`](crate::Document).
//!
//! A layout or highlighting layer stores one computed value per line and
//! feeds every [`LinesChanged`] through [`LineCache::apply`]. Unaffected
//! lines keep their cached values; inserted lines start empty; removed lines
//! are dropped. Entries live in a [`GapBuffer`], so the splice around an
//! edit is as cheap as the text edit itself.

use crate::gap_buffer::GapBuffer;
use crate::types::LinesChanged;

/// One optional cached value per document line.
///
/// `None` means the line needs recomputation.
#[derive(Debug)]
pub struct LineCache<T: Copy> {
    entries: GapBuffer<Option<T>>,
}

impl<T: Copy> LineCache<T> {
    /// Creates a cache for `line_count` lines, all empty.
    pub fn new(line_count: usize) -> Self {
        let mut entries = GapBuffer::with_capacity(line_count + 1);
        entries.insert_slice(0, &vec![None; line_count]);
        Self { entries }
    }

    /// Returns the number of lines tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the cached value for `line`, if present.
    pub fn get(&self, line: usize) -> Option<T> {
        self.entries.at(line)
    }

    /// Stores a computed value. Ignored for lines the cache does not track.
    pub fn set(&mut self, line: usize, value: T) {
        if line < self.len() {
            self.entries[line] = Some(value);
        }
    }

    pub fn invalidate(&mut self, line: usize) {
        if line < self.len() {
            self.entries[line] = None;
        }
    }

    /// Shifts the cache to follow a document mutation.
    ///
    /// The edited line is invalidated. New lines are spliced in empty right
    /// after it; merged-away lines right after it are dropped.
    pub fn apply(&mut self, change: LinesChanged) {
        if change.line >= self.len() {
            tracing::trace!(line = change.line, len = self.len(), "line cache out of step");
            return;
        }

        self.invalidate(change.line);
        if !change.shifts_lines() {
            return;
        }

        let after = change.line + 1;
        let count = change.lines_added.unsigned_abs();
        if change.lines_added > 0 {
            self.entries.insert_slice(after, &vec![None; count]);
        } else {
            let count = count.min(self.len() - after);
            self.entries.remove(after, count);
        }
    }
}
