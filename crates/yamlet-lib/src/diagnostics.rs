//! Warnings and diagnostic rendering.
//!
//! Fatal errors abort the parse; warnings are collected, deduplicated by
//! message, and returned alongside the documents. Both can be rendered as
//! annotated snippets against the original source text.

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use serde::Serialize;

use yamlet_core::Position;

use crate::Error;

/// A non-fatal diagnostic. The position points at the first occurrence of
/// the message; later duplicates are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position {
            Some(position) => write!(f, "warning: {} at {position}", self.message),
            None => write!(f, "warning: {}", self.message),
        }
    }
}

/// Byte offset of a 1-based line/column pair; columns count UTF-16 units.
fn byte_offset(source: &str, position: Position) -> Option<usize> {
    let mut line = 1u32;
    let mut column = 1u32;
    let mut iter = source.char_indices().peekable();
    while let Some((i, c)) = iter.next() {
        if line == position.line && column == position.column {
            return Some(i);
        }
        match c {
            '\n' => {
                line += 1;
                column = 1;
            }
            '\r' => {
                if matches!(iter.peek(), Some((_, '\n'))) {
                    iter.next();
                }
                line += 1;
                column = 1;
            }
            _ => column += c.len_utf16() as u32,
        }
    }
    (line == position.line && column == position.column).then_some(source.len())
}

fn render_one(source: &str, level: Level<'_>, message: &str, position: Option<Position>) -> String {
    let renderer = Renderer::plain();
    let Some(offset) = position.and_then(|p| byte_offset(source, p)) else {
        return renderer
            .render(&[Group::with_title(level.primary_title(message))])
            .to_string();
    };
    let end = (offset + 1).min(source.len());
    let snippet = Snippet::source(source)
        .line_start(1)
        .annotation(AnnotationKind::Primary.span(offset..end).label(message));
    let report: Vec<Group> = vec![level.primary_title(message).element(snippet)];
    renderer.render(&report).to_string()
}

/// Render every warning against the source, one annotated snippet each.
pub fn render_warnings(source: &str, warnings: &[Warning]) -> String {
    let mut out = String::new();
    for (i, warning) in warnings.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_one(
            source,
            Level::WARNING,
            &warning.message,
            warning.position,
        ));
    }
    out
}

/// Render a fatal error against the source.
pub fn render_error(source: &str, error: &Error) -> String {
    render_one(source, Level::ERROR, &error.message, Some(error.position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_offset_basic() {
        let src = "ab\ncd";
        assert_eq!(byte_offset(src, Position::new(1, 1)), Some(0));
        assert_eq!(byte_offset(src, Position::new(1, 3)), Some(2));
        assert_eq!(byte_offset(src, Position::new(2, 1)), Some(3));
        assert_eq!(byte_offset(src, Position::new(2, 3)), Some(5));
        assert_eq!(byte_offset(src, Position::new(3, 1)), None);
    }

    #[test]
    fn byte_offset_counts_utf16_columns() {
        // U+1F600 is 4 bytes but 2 UTF-16 units
        let src = "\u{1F600}x";
        assert_eq!(byte_offset(src, Position::new(1, 3)), Some(4));
    }

    #[test]
    fn byte_offset_crlf() {
        let src = "a\r\nb";
        assert_eq!(byte_offset(src, Position::new(2, 1)), Some(3));
    }

    #[test]
    fn warning_display() {
        let w = Warning {
            message: "something odd".into(),
            position: Some(Position::new(2, 5)),
        };
        assert_eq!(w.to_string(), "warning: something odd at line 2, column 5");
    }

    #[test]
    fn rendered_warning_mentions_message_and_line() {
        let src = "a: b\nc: d\n";
        let warnings = vec![Warning {
            message: "suspicious value".into(),
            position: Some(Position::new(2, 4)),
        }];
        let out = render_warnings(src, &warnings);
        assert!(out.contains("suspicious value"));
        assert!(out.contains("c: d"));
    }
}
