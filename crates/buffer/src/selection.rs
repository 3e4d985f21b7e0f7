// Chunk: docs/chunks/selection_model - Anchor/position selection

//! Anchor/position selection over a [`Document`].
//!
//! The selection spans from `anchor` to `position` (the caret); either may
//! come first. It is a plain value: it does not observe the document, so
//! callers re-clamp it through any setter after edits.

use std::ops::Range;

use crate::document::Document;
use crate::types::{MoveMode, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    anchor: usize,
    position: usize,
}

impl Selection {
    /// Creates a collapsed selection at offset 0.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Returns the caret offset.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns true if anchor and caret coincide.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.position
    }

    /// Returns the selected byte range in document order.
    pub fn range(&self) -> Range<usize> {
        self.anchor.min(self.position)..self.anchor.max(self.position)
    }

    /// Sets both ends, clamping each to `[0, doc.len()]`.
    pub fn set_selection(&mut self, doc: &Document, anchor: usize, position: usize) {
        self.anchor = anchor.min(doc.len());
        self.position = position.min(doc.len());
    }

    /// Moves the caret to `pos`, collapsing or extending per `mode`.
    pub fn set_position(&mut self, doc: &Document, pos: usize, mode: MoveMode) {
        let anchor = match mode {
            MoveMode::MoveAnchor => pos,
            MoveMode::KeepAnchor => self.anchor,
        };
        self.set_selection(doc, anchor, pos);
    }

    /// A non-empty selection collapses instead of stepping when the anchor moves.
    fn collapses(&self, mode: MoveMode) -> bool {
        !self.is_empty() && mode == MoveMode::MoveAnchor
    }

    /// Moves the caret one code point left.
    ///
    /// With an active selection and `MoveAnchor`, collapses to its start instead.
    pub fn move_left(&mut self, doc: &Document, mode: MoveMode) {
        let pos = if self.collapses(mode) {
            self.range().start
        } else {
            doc.previous_column_position(self.position)
        };
        self.set_position(doc, pos, mode);
    }

    /// Moves the caret one code point right.
    ///
    /// With an active selection and `MoveAnchor`, collapses to its end instead.
    pub fn move_right(&mut self, doc: &Document, mode: MoveMode) {
        let pos = if self.collapses(mode) {
            self.range().end
        } else {
            doc.next_column_position(self.position)
        };
        self.set_position(doc, pos, mode);
    }

    pub fn move_to_line_start(&mut self, doc: &Document, mode: MoveMode) {
        let line = doc.line_at(self.position);
        self.set_position(doc, doc.line_start_position(line), mode);
    }

    pub fn move_to_line_end(&mut self, doc: &Document, mode: MoveMode) {
        let line = doc.line_at(self.position);
        self.set_position(doc, doc.line_end_position(line), mode);
    }

    /// Returns the selected text, empty when collapsed.
    pub fn selected_text(&self, doc: &Document) -> String {
        let range = self.range();
        doc.text(range.start, range.len())
    }

    /// Returns the caret's (line, column).
    pub fn line_column(&self, doc: &Document) -> Position {
        doc.line_column(self.position)
    }
}
