//! YAML 1.2 grammar productions.
//!
//! Each production is a method on [`Parser`] parameterised by the current
//! indentation `n` and the context `c`, mirroring the numbered rules of
//! the YAML 1.2 specification (rule numbers in brackets). A production
//! either matches — cursor advanced, `Ok(true)` — or rewinds everything it
//! touched and returns `Ok(false)`. Fatal problems return `Err` and abort
//! the whole parse.
//!
//! This module holds the context types and the spacing productions shared
//! by everything else: indentation, separation, comments and line folding.

mod block;
mod block_scalars;
mod document;
mod flow;
mod node;
mod scalars;

#[cfg(test)]
mod tests;

use crate::chars;
use crate::engine::{Match, Parser};

pub(crate) use document::stream;

/// Context parameter `c`: selects which subproductions apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Context {
    BlockIn,
    BlockOut,
    BlockKey,
    FlowIn,
    FlowOut,
    FlowKey,
    /// Line handling inside a folded block scalar.
    Folded,
}

impl Context {
    /// [136] in-flow(c): the context for entries of a flow collection.
    pub fn in_flow(self) -> Context {
        match self {
            Context::FlowOut | Context::FlowIn => Context::FlowIn,
            Context::BlockKey | Context::FlowKey => Context::FlowKey,
            other => other,
        }
    }

    pub fn is_key(self) -> bool {
        matches!(self, Context::BlockKey | Context::FlowKey)
    }

    /// Whether `ns-plain-safe` excludes flow indicators here.
    pub fn plain_in_flow(self) -> bool {
        matches!(self, Context::FlowIn | Context::FlowKey)
    }
}

/// Chomping indicator `t`: what happens to a block scalar's trailing
/// line breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Chomping {
    Strip,
    Clip,
    Keep,
}

impl Parser<'_> {
    // ------------------------------------------------------------------
    // Indentation
    // ------------------------------------------------------------------

    /// [63] s-indent(n): exactly `n` spaces.
    pub(crate) fn indent_exact(&mut self, n: i32) -> Match {
        self.with_rewind(|p| {
            for _ in 0..n.max(0) {
                if !p.eat_class(chars::is_space) {
                    return Ok(false);
                }
            }
            Ok(true)
        })
    }

    /// [64] s-indent(<n): up to `n - 1` spaces. Always succeeds.
    pub(crate) fn indent_less_than(&mut self, n: i32) -> Match {
        let mut count = 0;
        while count + 1 < n && self.eat(chars::SPACE) {
            count += 1;
        }
        Ok(true)
    }

    /// Spaces at the cursor without consuming them. Only meaningful at the
    /// start of a line.
    pub(crate) fn peek_indent(&self) -> i32 {
        let units = self.src.units();
        let mut i = self.pos;
        while units[i] == chars::SPACE {
            i += 1;
        }
        (i - self.pos) as i32
    }

    // ------------------------------------------------------------------
    // Separation
    // ------------------------------------------------------------------

    /// [66] s-separate-in-line: whitespace, or the start of a line.
    pub(crate) fn separate_in_line(&mut self) -> Match {
        if self.eat_class(chars::is_white) {
            while self.eat_class(chars::is_white) {}
            return Ok(true);
        }
        Ok(self.start_of_line())
    }

    /// [67] s-line-prefix(n,c)
    pub(crate) fn line_prefix(&mut self, n: i32, c: Context) -> Match {
        match c {
            Context::FlowIn | Context::FlowOut => self.flow_line_prefix(n),
            _ => self.indent_exact(n),
        }
    }

    /// [69] s-flow-line-prefix(n): the indentation plus any further
    /// whitespace of a continuation line.
    pub(crate) fn flow_line_prefix(&mut self, n: i32) -> Match {
        self.with_rewind(|p| {
            if !p.indent_exact(n)? {
                return Ok(false);
            }
            while p.eat_class(chars::is_white) {}
            Ok(true)
        })
    }

    /// [80] s-separate(n,c)
    pub(crate) fn separate(&mut self, n: i32, c: Context) -> Match {
        match c {
            Context::BlockKey | Context::FlowKey => self.separate_in_line(),
            _ => self.separate_lines(n),
        }
    }

    /// [81] s-separate-lines(n)
    pub(crate) fn separate_lines(&mut self, n: i32) -> Match {
        if self.with_rewind(|p| {
            if !p.comments()? {
                return Ok(false);
            }
            p.flow_line_prefix(n)
        })? {
            return Ok(true);
        }
        self.separate_in_line()
    }

    // ------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------

    /// [75] c-nb-comment-text
    pub(crate) fn comment_text(&mut self) -> Match {
        if !self.eat(b'#' as u16) {
            return Ok(false);
        }
        while self.eat_span(chars::nb_char) {}
        Ok(true)
    }

    /// [76] b-comment: a (discarded) line break, or the end of input.
    pub(crate) fn break_or_end(&mut self) -> Match {
        if self.eat_break() {
            return Ok(true);
        }
        Ok(self.at_end())
    }

    /// [77] s-b-comment: optional trailing comment, then end of line.
    pub(crate) fn maybe_comment_line(&mut self) -> Match {
        self.with_rewind(|p| {
            p.opt(|p| {
                if !p.separate_in_line()? {
                    return Ok(false);
                }
                p.opt(|p| p.comment_text())?;
                Ok(true)
            })?;
            p.break_or_end()
        })
    }

    /// [78] l-comment: a whole line that holds at most a comment.
    pub(crate) fn comment_line(&mut self) -> Match {
        self.with_rewind(|p| {
            if !p.separate_in_line()? {
                return Ok(false);
            }
            p.opt(|p| p.comment_text())?;
            p.break_or_end()
        })
    }

    /// [79] s-l-comments: end of line, then any number of comment lines.
    pub(crate) fn comments(&mut self) -> Match {
        self.with_rewind(|p| {
            if !p.maybe_comment_line()? && !p.start_of_line() {
                return Ok(false);
            }
            p.star(|p| p.comment_line())
        })
    }

    // ------------------------------------------------------------------
    // Folding
    // ------------------------------------------------------------------

    /// [70] l-empty(n,c): a blank line inside folded content; contributes
    /// one line feed to the scratch buffer.
    pub(crate) fn empty_line(&mut self, n: i32, c: Context) -> Match {
        self.with_rewind(|p| {
            if !p.line_prefix(n, c)? {
                p.indent_less_than(n)?;
            }
            let start = p.pos;
            if !p.eat_break() {
                return Ok(false);
            }
            p.push_input_break(start, p.pos);
            Ok(true)
        })
    }

    /// [71] b-l-trimmed(n,c): a break followed by blank lines. The break
    /// itself is trimmed; every blank line becomes a line feed.
    pub(crate) fn trimmed_breaks(&mut self, n: i32, c: Context) -> Match {
        self.with_rewind(|p| {
            if !p.eat_break() {
                return Ok(false);
            }
            p.plus(|p| p.empty_line(n, c))
        })
    }

    /// [73] b-l-folded(n,c): fold a single break to a space, or turn a
    /// run of blank lines into line feeds.
    pub(crate) fn folded_break(&mut self, n: i32, c: Context) -> Match {
        if self.trimmed_breaks(n, c)? {
            return Ok(true);
        }
        if self.eat_break() {
            self.push_unit(chars::SPACE);
            return Ok(true);
        }
        Ok(false)
    }

    /// [74] s-flow-folded(n): folding between the lines of flow scalars.
    pub(crate) fn flow_folded(&mut self, n: i32) -> Match {
        self.with_rewind(|p| {
            while p.eat_class(chars::is_white) {}
            if !p.folded_break(n, Context::FlowIn)? {
                return Ok(false);
            }
            p.flow_line_prefix(n)
        })
    }

    // ------------------------------------------------------------------
    // Document markers
    // ------------------------------------------------------------------

    /// A `---` or `...` line: three marker characters at the start of a
    /// line, followed by whitespace, a break, or the end of input.
    pub(crate) fn at_document_marker(&self) -> bool {
        if !self.start_of_line() {
            return false;
        }
        let units = self.src.units();
        let marker = &units[self.pos..];
        let lead = marker.first().copied().unwrap_or(0);
        if lead != b'-' as u16 && lead != b'.' as u16 {
            return false;
        }
        if marker.len() < 3 || marker[1] != lead || marker[2] != lead {
            return false;
        }
        let after = self.peek(3);
        chars::is_white(after) || chars::is_break(after) || self.pos + 3 >= self.src.len()
    }
}
