// Chunk: docs/chunks/document_api - Line-indexed UTF-8 document over gap buffers

/// Position in the document as (line, column) where both are 0-indexed.
///
/// The column counts code points from the start of the line, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

// Chunk: docs/chunks/line_change_notification - Single-subscriber line change callback

/// Describes how a mutation reshaped the document's lines.
///
/// `line` is the first line touched by the edit. `lines_added` is positive
/// when newlines were inserted and negative when they were removed; lines
/// after `line + |lines_added|` kept their content but moved by
/// `lines_added`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinesChanged {
    pub line: usize,
    pub lines_added: isize,
}

impl LinesChanged {
    pub fn new(line: usize, lines_added: isize) -> Self {
        Self { line, lines_added }
    }

    /// Returns true if lines were inserted or removed, shifting later lines.
    pub fn shifts_lines(&self) -> bool {
        self.lines_added != 0
    }
}

/// How a selection endpoint update treats the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveMode {
    /// Anchor follows the position, collapsing the selection.
    #[default]
    MoveAnchor,
    /// Anchor stays put, extending the selection.
    KeepAnchor,
}
