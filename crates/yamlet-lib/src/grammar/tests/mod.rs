//! Production-level suites exercising the public `parse` entry point.

mod anchors_tests;
mod block_scalars_tests;
mod properties_tests;

use crate::{NodeRef, Stream, parse};

/// Parse expecting success.
pub(crate) fn stream(input: &str) -> Stream {
    match parse(input) {
        Ok(stream) => stream,
        Err(err) => panic!("parse failed: {err}\ninput:\n{input}"),
    }
}

/// Parse expecting exactly one document.
pub(crate) fn single(input: &str) -> Stream {
    let stream = stream(input);
    assert_eq!(
        stream.documents().len(),
        1,
        "expected one document\ninput:\n{input}"
    );
    stream
}

pub(crate) fn root(stream: &Stream) -> NodeRef<'_> {
    stream.document(0).expect("document root")
}

/// Parse expecting a fatal error; returns its message.
pub(crate) fn fails(input: &str) -> String {
    match parse(input) {
        Ok(_) => panic!("expected a fatal error\ninput:\n{input}"),
        Err(err) => err.message,
    }
}

/// The scalar value of a mapping entry, by key text.
pub(crate) fn value_of<'a>(node: NodeRef<'a>, key: &str) -> NodeRef<'a> {
    node.lookup(key)
        .unwrap_or_else(|| panic!("missing key {key:?}"))
}
