// Chunk: docs/chunks/line_index - Incremental line-start index

use thiserror::Error;

/// Disagreement between the incremental line index and the bytes it describes.
///
/// Returned by [`Document::check_consistency`](crate::Document::check_consistency).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("first line starts at {found:?}, expected 0")]
    FirstLineStart { found: Option<usize> },

    #[error("line {line} starts at {start} but line {} starts at {next}", .line + 1)]
    NotIncreasing {
        line: usize,
        start: usize,
        next: usize,
    },

    #[error("index has {actual} lines but the text has {expected}")]
    LineCount { expected: usize, actual: usize },

    #[error("line {line} starts at {actual}, expected {expected}")]
    LineStart {
        line: usize,
        expected: usize,
        actual: usize,
    },
}
