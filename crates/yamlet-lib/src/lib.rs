//! yamlet: a YAML 1.2 parser producing a representation graph.
//!
//! The parser turns one character stream into any number of documents of
//! scalar, sequence and mapping nodes, with anchors, aliases and tags
//! resolved. Aliases are shared references into an arena graph, so a
//! document like `&a [*a]` comes back as an ordinary cyclic graph.
//!
//! Parsing is a context-parameterised recursive descent over UTF-16 code
//! units with full backtracking; see the `grammar` module for the
//! production-level mapping to the YAML 1.2 specification.
//!
//! # Example
//!
//! ```
//! let stream = yamlet_lib::parse("a: 1\nb: [x, y]\n").expect("valid yaml");
//! let root = stream.document(0).expect("one document");
//! assert_eq!(root.lookup("a").and_then(|n| n.as_str()), Some("1"));
//! assert_eq!(root.lookup("b").map(|n| n.len()), Some(2));
//! ```

mod anchors;
mod chars;
mod engine;
mod grammar;
mod handles;
mod options;
mod resolver;
mod source;

pub mod diagnostics;

#[cfg(test)]
mod chars_tests;

pub use diagnostics::{Warning, render_error, render_warnings};
pub use options::{LineBreak, ParseOptions};
pub use resolver::{ScalarRule, ScalarRules};
pub use yamlet_core::{Graph, NodeData, NodeId, NodeKind, NodeRef, Position};

/// A fatal parse problem. The position is 1-based; columns count UTF-16
/// code units.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {position}")]
pub struct Error {
    pub message: String,
    pub position: Position,
}

pub type Result<T> = std::result::Result<T, Error>;

/// A parsed stream: the node arena, the document roots in order, and the
/// deduplicated warnings.
#[derive(Debug, Clone)]
pub struct Stream {
    graph: Graph,
    roots: Vec<NodeId>,
    warnings: Vec<Warning>,
}

impl Stream {
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Document roots, in stream order.
    pub fn documents(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn document(&self, index: usize) -> Option<NodeRef<'_>> {
        self.roots.get(index).map(|&id| self.graph.node(id))
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_parts(self) -> (Graph, Vec<NodeId>, Vec<Warning>) {
        (self.graph, self.roots, self.warnings)
    }
}

/// Parse with the default options (normalised line breaks, core schema
/// resolver).
pub fn parse(text: &str) -> Result<Stream> {
    parse_with(text, &ParseOptions::default())
}

/// Parse one complete YAML stream. Fatal problems abort with a
/// position-annotated [`Error`]; warnings never do.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Stream> {
    let mut parser = engine::Parser::new(text, options);
    grammar::stream(&mut parser)?;
    let (graph, roots, warnings) = parser.finish();
    Ok(Stream {
        graph,
        roots,
        warnings,
    })
}
