// Chunk: docs/chunks/line_index - Incremental line-start index

//! Line index for tracking line boundaries in the document.
//!
//! Maintains the byte offsets where each line starts, stored in a
//! [`GapBuffer`] so that splicing starts in or out near an edit stays cheap.
//! Lookup of the line containing an offset is a binary search.

use crate::gap_buffer::{GapBuffer, GrowthPolicy};

/// Tracks line boundaries in a document.
///
/// `starts[0] == 0` always and the starts are strictly increasing. Every
/// start other than the first is the offset just past a `'\n'`.
#[derive(Debug)]
pub struct LineIndex {
    starts: GapBuffer<usize>,
}

impl LineIndex {
    /// Creates an index describing a single empty line.
    pub fn new(policy: GrowthPolicy) -> Self {
        let mut starts = GapBuffer::with_policy(policy);
        starts.insert(0, 0);
        Self { starts }
    }

    /// Rebuilds the index from scratch over `content`.
    ///
    /// O(n) in the content length; used for bulk loads and auditing.
    pub fn rebuild<I>(&mut self, content: I)
    where
        I: IntoIterator<Item = u8>,
    {
        self.starts.clear();
        self.starts.insert(0, 0);
        for (offset, byte) in content.into_iter().enumerate() {
            if byte == b'\n' {
                let line = self.starts.len();
                self.starts.insert(line, offset + 1);
            }
        }
    }

    /// Returns the number of lines. Always at least 1.
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Returns the byte offset where `line` starts, or None if out of bounds.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        (line < self.line_count()).then(|| self.starts.at(line))
    }

    /// Returns the byte offset of the end of `line`.
    ///
    /// For all lines except the last this is the offset of its `'\n'`; for the
    /// last line it is `total_len`.
    pub fn line_end(&self, line: usize, total_len: usize) -> Option<usize> {
        if line >= self.line_count() {
            return None;
        }

        if line + 1 < self.line_count() {
            Some(self.starts.at(line + 1) - 1)
        } else {
            Some(total_len)
        }
    }

    /// Returns the index of the first line starting strictly after `offset`.
    fn first_start_after(&self, offset: usize) -> usize {
        // starts[0] == 0 <= offset, so the answer is at least 1.
        let mut lo = 1;
        let mut hi = self.line_count();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.starts.at(mid) <= offset {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }

    /// Returns the line containing `offset`.
    ///
    /// An offset equal to a line start belongs to the line beginning there.
    /// Offsets past the end resolve to the last line. O(log n).
    pub fn line_at_offset(&self, offset: usize) -> usize {
        self.first_start_after(offset) - 1
    }

    /// Updates the index for `inserted` having been placed at `offset` on `line`.
    ///
    /// Starts after `line` shift forward by the inserted length, then a new
    /// start is spliced in after `line` for each `'\n'` in `inserted`.
    /// Returns the number of lines added.
    pub fn insert_text(&mut self, line: usize, offset: usize, inserted: &[u8]) -> usize {
        let len = inserted.len();
        for i in line + 1..self.line_count() {
            self.starts[i] += len;
        }

        let new_starts: Vec<usize> = inserted
            .iter()
            .enumerate()
            .filter(|(_, byte)| **byte == b'\n')
            .map(|(i, _)| offset + i + 1)
            .collect();
        self.starts.insert_slice(line + 1, &new_starts);

        new_starts.len()
    }

    /// Updates the index for `len` bytes having been removed at `offset` on `line`.
    ///
    /// Lines starting inside `(offset, offset + len]` lost their newline and
    /// are merged away; later starts shift back by `len`. Returns the number
    /// of lines removed.
    pub fn remove_text(&mut self, line: usize, offset: usize, len: usize) -> usize {
        let first = line + 1;
        let last = self.first_start_after(offset + len);
        let removed = last - first;

        self.starts.remove(first, removed);
        for i in first..self.line_count() {
            self.starts[i] -= len;
        }

        removed
    }

    /// Iterates over all line starts in order.
    pub fn starts(&self) -> impl Iterator<Item = usize> + '_ {
        self.starts.iter()
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new(GrowthPolicy::default())
    }
}
