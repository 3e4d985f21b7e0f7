// Chunk: docs/chunks/gap_buffer - Generic gap buffer storage
// Chunk: docs/chunks/document_api - Line-indexed UTF-8 document over gap buffers

//! gaptext-buffer: gap-buffered text storage with an incremental line index.
//!
//! This crate is the storage core of a text editor. It keeps UTF-8 bytes in a
//! gap buffer, maintains the offset of every line start as edits happen, and
//! translates between byte offsets, line numbers and code-point columns.
//! Layout, painting and input handling live outside and talk to it only
//! through [`Document`].
//!
//! # Overview
//!
//! - [`GapBuffer`] is the generic storage, used for the text bytes and for
//!   the line starts alike.
//! - [`Document`] is the public edit/query API.
//! - [`Selection`] tracks an anchor/caret pair over a document.
//! - [`LineCache`] keeps per-line derived data in step with edits.
//!
//! # Example
//!
//! ```
//! use gaptext_buffer::{Document, LinesChanged};
//!
//! let mut doc = Document::new();
//! doc.insert(0, "Hello world!");
//! assert_eq!(doc.len(), 12);
//!
//! let change = doc.insert(6, "brave\nnew ");
//! assert_eq!(change, Some(LinesChanged::new(0, 1)));
//! assert_eq!(doc.line_count(), 2);
//! assert_eq!(doc.line_text(1), "new world!");
//! ```
//!
//! # Change Notification
//!
//! Every applied mutation reports a [`LinesChanged`] with the first affected
//! line and the signed number of lines added. It is returned to the caller and
//! also passed to the observer registered with
//! [`Document::set_lines_changed`], exactly once per mutation. Calls that
//! change nothing (out-of-range positions, empty inserts, zero-length
//! removes) return `None` and notify no one.

mod document;
mod error;
mod gap_buffer;
mod grapheme;
mod line_cache;
mod line_index;
mod selection;
mod types;
mod utf8;

pub use document::{Document, DocumentConfig, LinesChangedCallback};
pub use error::ConsistencyError;
pub use gap_buffer::{GapBuffer, GrowthPolicy};
pub use grapheme::{grapheme_boundary_left, grapheme_boundary_right};
pub use line_cache::LineCache;
pub use line_index::LineIndex;
pub use selection::Selection;
pub use types::{LinesChanged, MoveMode, Position};
pub use utf8::is_continuation;
