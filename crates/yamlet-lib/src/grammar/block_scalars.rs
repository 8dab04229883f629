//! Literal (`|`) and folded (`>`) block scalars.
//!
//! The header may fix the content indentation; otherwise it is detected
//! by scanning ahead to the first content line. Content is read line by
//! line into the scratch buffer; chomping decides the fate of the
//! trailing breaks only after everything has been read.

use crate::Result;
use crate::chars;
use crate::engine::{Match, Parser, ScalarStyle};
use crate::grammar::{Chomping, Context};

impl Parser<'_> {
    /// [170] c-l+literal(n)
    pub(crate) fn literal_scalar(&mut self, n: i32) -> Match {
        if self.unit() != b'|' as u16 {
            return Ok(false);
        }
        let start = self.pos;
        self.with_rewind(|p| {
            debug_assert!(p.scratch.is_empty(), "scratch must be empty at a scalar");
            p.bump(1);
            let (indent, chomping) = p.block_header(n)?;
            p.block_content(n + indent, chomping, Context::BlockIn)?;
            p.create_scalar(ScalarStyle::Quoted, start);
            Ok(true)
        })
    }

    /// [174] c-l+folded(n)
    pub(crate) fn folded_scalar(&mut self, n: i32) -> Match {
        if self.unit() != b'>' as u16 {
            return Ok(false);
        }
        let start = self.pos;
        self.with_rewind(|p| {
            debug_assert!(p.scratch.is_empty(), "scratch must be empty at a scalar");
            p.bump(1);
            let (indent, chomping) = p.block_header(n)?;
            if chomping == Chomping::Keep {
                p.warn_at(start, "folded scalar with keep chomping ('>+') preserves all trailing line breaks");
            }
            p.block_content(n + indent, chomping, Context::Folded)?;
            p.create_scalar(ScalarStyle::Quoted, start);
            Ok(true)
        })
    }

    /// [162-165] c-b-block-header(m,t): indentation digit and chomping
    /// indicator in either order, then nothing but a comment. Returns the
    /// relative indentation `m`, auto-detected when not given.
    fn block_header(&mut self, n: i32) -> Result<(i32, Chomping)> {
        let mut indent: Option<i32> = None;
        let mut chomping: Option<Chomping> = None;
        loop {
            let u = self.unit();
            if indent.is_none() && chars::is_dec_digit(u) {
                if u == b'0' as u16 {
                    return Err(self.error("the indentation indicator must be between 1 and 9"));
                }
                indent = Some((u - b'0' as u16) as i32);
                self.bump(1);
            } else if chomping.is_none() && u == b'-' as u16 {
                chomping = Some(Chomping::Strip);
                self.bump(1);
            } else if chomping.is_none() && u == b'+' as u16 {
                chomping = Some(Chomping::Keep);
                self.bump(1);
            } else {
                break;
            }
        }
        if !self.maybe_comment_line()? {
            return Err(self.error("unexpected characters in the block scalar header"));
        }
        let indent = match indent {
            Some(m) => m,
            None => self.detect_block_indent(n)?,
        };
        Ok((indent, chomping.unwrap_or(Chomping::Clip)))
    }

    /// Auto-detect the content indentation: scan ahead through blank
    /// lines, remember the widest all-space run, and derive `m` from the
    /// first content line without consuming anything.
    fn detect_block_indent(&mut self, n: i32) -> Result<i32> {
        let units = self.src.units();
        let mut i = self.pos;
        let mut max_blank: i32 = 0;
        loop {
            let line_start = i;
            let mut spaces: i32 = 0;
            while units[i] == chars::SPACE {
                i += 1;
                spaces += 1;
            }
            // blank lines may carry trailing tabs; look past the whitespace
            let mut rest = i;
            while chars::is_white(units[rest]) {
                rest += 1;
            }
            if rest >= self.src.len() {
                break;
            }
            if chars::is_break(units[rest]) {
                max_blank = max_blank.max(spaces);
                i = rest + 1;
                if units[rest] == chars::CR && units[i] == chars::LF {
                    i += 1;
                }
                continue;
            }
            // first content line
            if units[i] == chars::TAB && spaces <= n {
                return Err(self.error_at(
                    i,
                    "a tab character is used for indentation in a block scalar",
                ));
            }
            if max_blank > spaces {
                return Err(self.error_at(
                    line_start,
                    "a leading all-space line is more indented than the first content line of the block scalar",
                ));
            }
            return Ok((spaces - n).max(1));
        }
        Ok((max_blank - n).max(1))
    }

    /// [171-173, 175-182] shared content reader, with `c` either
    /// `block-in` (literal) or `folded`. `indent` is the absolute column
    /// content must reach; breaks between lines are buffered and only
    /// committed once their meaning (fold, feed, trailing) is known.
    fn block_content(&mut self, indent: i32, chomping: Chomping, c: Context) -> Result<()> {
        let mut pending: Vec<(usize, usize)> = Vec::new();
        let mut had_content = false;
        let mut prev_foldable = false;
        loop {
            if self.at_document_marker() {
                break;
            }
            let line_start = self.pos;
            let mut spaces: i32 = 0;
            while spaces < indent && self.unit() == chars::SPACE {
                self.bump(1);
                spaces += 1;
            }
            if chars::is_break(self.unit()) {
                // blank line, possibly under-indented
                let break_start = self.pos;
                self.eat_break();
                pending.push((break_start, self.pos));
                continue;
            }
            if self.at_end() {
                break;
            }
            if spaces < indent {
                // the scalar ends before this line
                self.pos = line_start;
                break;
            }

            // content line at full indentation
            let more_indented = chars::is_white(self.unit());
            match c {
                Context::Folded => {
                    if !had_content {
                        for &(s, e) in &pending {
                            self.push_input_break(s, e);
                        }
                    } else if pending.len() == 1 {
                        let (s, e) = pending[0];
                        if prev_foldable && !more_indented {
                            self.push_unit(chars::SPACE);
                        } else {
                            self.push_input_break(s, e);
                        }
                    } else {
                        // the first break is trimmed; each blank line
                        // contributes a feed
                        for &(s, e) in pending.iter().skip(1) {
                            self.push_input_break(s, e);
                        }
                    }
                }
                _ => {
                    for &(s, e) in &pending {
                        self.push_input_break(s, e);
                    }
                }
            }
            pending.clear();
            had_content = true;
            prev_foldable = !more_indented;

            loop {
                let len = chars::nb_char(self.src.units(), self.pos);
                if len == 0 {
                    break;
                }
                self.push_content(len);
            }
            let break_start = self.pos;
            if self.eat_break() {
                pending.push((break_start, self.pos));
            } else {
                // end of input; a missing final break is never invented
                break;
            }
        }

        match chomping {
            Chomping::Strip => {}
            Chomping::Clip => {
                if had_content && !pending.is_empty() {
                    let (s, e) = pending[0];
                    self.push_input_break(s, e);
                }
            }
            Chomping::Keep => {
                for &(s, e) in &pending {
                    self.push_input_break(s, e);
                }
            }
        }

        // [168] l-trail-comments: comments at lesser indentation belong to
        // the scalar's tail
        self.opt(|p| p.trail_comments(indent))?;
        Ok(())
    }

    fn trail_comments(&mut self, indent: i32) -> Match {
        self.with_rewind(|p| {
            if !p.start_of_line() {
                return Ok(false);
            }
            p.indent_less_than(indent)?;
            if !p.comment_text()? {
                return Ok(false);
            }
            if !p.break_or_end()? {
                return Ok(false);
            }
            p.star(|p| p.comment_line())
        })
    }
}
