// Chunk: docs/chunks/document_properties - Shared integration test helpers

#![allow(dead_code)]

use gaptext_buffer::Document;

/// Routes `tracing` output through the test harness' captured writer.
///
/// Safe to call from every test; only the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Asserts every line-level invariant of `doc` against its own contents.
pub fn assert_lines_consistent(doc: &Document) {
    if let Err(err) = doc.check_consistency() {
        panic!("line index inconsistent: {err}");
    }

    let contents = doc.contents();
    assert_eq!(
        doc.line_count(),
        contents.bytes().filter(|b| *b == b'\n').count() + 1,
        "line count disagrees with newline count in {contents:?}"
    );

    for line in 0..doc.line_count() {
        assert_eq!(doc.line_at(doc.line_start_position(line)), line);
        if line + 1 < doc.line_count() {
            assert!(doc.line_start_position(line) < doc.line_start_position(line + 1));
        }
    }
}
