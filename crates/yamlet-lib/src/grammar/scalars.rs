//! Plain and quoted flow scalars.
//!
//! All three styles decode into the scratch buffer: escapes are expanded,
//! folded line breaks become spaces or line feeds, and the node is
//! materialised only when the producing rule commits.
//!
//! One deliberate deviation from the YAML 1.2 text is preserved here: a
//! `:` followed by an `ns-plain-safe` character is never part of a plain
//! scalar, so `a:b` reads as a mapping rather than the scalar `a:b`.

use crate::chars;
use crate::engine::{Match, Parser, ScalarStyle};
use crate::grammar::Context;

const QUOTE: u16 = b'\'' as u16;
const DQUOTE: u16 = b'"' as u16;
const BACKSLASH: u16 = b'\\' as u16;

impl Parser<'_> {
    // ------------------------------------------------------------------
    // Plain scalars
    // ------------------------------------------------------------------

    /// [131] ns-plain(n,c), materialised as a node.
    pub(crate) fn plain_scalar_node(&mut self, n: i32, c: Context) -> Match {
        if self.at_document_marker() {
            return Ok(false);
        }
        let start = self.pos;
        self.with_rewind(|p| {
            debug_assert!(p.scratch.is_empty(), "scratch must be empty at a scalar");
            let matched = match c {
                Context::FlowOut | Context::FlowIn => p.plain_multi_line(n, c)?,
                Context::BlockKey | Context::FlowKey => p.plain_one_line(c)?,
                _ => false,
            };
            if !matched {
                return Ok(false);
            }
            p.create_scalar(ScalarStyle::Plain, start);
            Ok(true)
        })
    }

    /// [126] ns-plain-first(c)
    fn plain_first(&mut self, c: Context) -> Match {
        let u = self.unit();
        if u == b'?' as u16 || u == b':' as u16 || u == b'-' as u16 {
            let safe = chars::ns_plain_safe(self.src.units(), self.pos + 1, c.plain_in_flow());
            if safe > 0 {
                self.push_content(1);
                return Ok(true);
            }
            return Ok(false);
        }
        let len = chars::ns_plain_first_sub(self.src.units(), self.pos);
        if len > 0 {
            self.push_content(len);
            return Ok(true);
        }
        Ok(false)
    }

    /// [130] ns-plain-char(c) lookahead. `allow_hash` is true only when the
    /// preceding unit is an ns-char with no intervening whitespace.
    fn plain_char_len(&self, at: usize, c: Context, allow_hash: bool) -> usize {
        let u = self.src.units()[at];
        if u == b':' as u16 {
            // deviation: a ':' about to introduce a value never joins the
            // scalar, even when followed by a plain-safe character
            return 0;
        }
        if u == b'#' as u16 {
            return if allow_hash { 1 } else { 0 };
        }
        chars::ns_plain_safe(self.src.units(), at, c.plain_in_flow())
    }

    /// [132] nb-ns-plain-in-line(c): runs of whitespace are content only
    /// when more plain characters follow on the same line.
    fn plain_in_line(&mut self, c: Context) -> Match {
        loop {
            let mut whites = 0;
            while chars::is_white(self.peek(whites)) {
                whites += 1;
            }
            let len = self.plain_char_len(self.pos + whites, c, whites == 0);
            if len == 0 {
                return Ok(true);
            }
            self.push_content(whites + len);
        }
    }

    /// [133] ns-plain-one-line(c)
    fn plain_one_line(&mut self, c: Context) -> Match {
        if !self.plain_first(c)? {
            return Ok(false);
        }
        self.plain_in_line(c)
    }

    /// [135] ns-plain-multi-line(n,c)
    fn plain_multi_line(&mut self, n: i32, c: Context) -> Match {
        if !self.plain_one_line(c)? {
            return Ok(false);
        }
        self.star(|p| p.plain_next_line(n, c))
    }

    /// [134] s-ns-plain-next-line(n,c)
    fn plain_next_line(&mut self, n: i32, c: Context) -> Match {
        self.with_rewind(|p| {
            if !p.flow_folded(n)? {
                return Ok(false);
            }
            if p.at_document_marker() {
                return Ok(false);
            }
            let len = p.plain_char_len(p.pos, c, false);
            if len == 0 {
                return Ok(false);
            }
            p.push_content(len);
            p.plain_in_line(c)
        })
    }

    // ------------------------------------------------------------------
    // Single-quoted scalars
    // ------------------------------------------------------------------

    /// [120] c-single-quoted(n,c)
    pub(crate) fn single_quoted_node(&mut self, n: i32, c: Context) -> Match {
        if self.unit() != QUOTE {
            return Ok(false);
        }
        let start = self.pos;
        self.with_rewind(|p| {
            debug_assert!(p.scratch.is_empty(), "scratch must be empty at a scalar");
            p.bump(1);
            match c {
                Context::FlowOut | Context::FlowIn => p.single_text_multi(n)?,
                Context::BlockKey | Context::FlowKey => p.single_text_single()?,
                _ => return Ok(false),
            }
            if !p.eat(QUOTE) {
                return p.error_unless(
                    c == Context::FlowOut,
                    "unclosed single-quoted scalar",
                );
            }
            p.create_scalar(ScalarStyle::Quoted, start);
            Ok(true)
        })
    }

    /// [123] nb-single-multi-line(n)
    fn single_text_multi(&mut self, n: i32) -> crate::Result<()> {
        loop {
            let mut whites = 0;
            while chars::is_white(self.peek(whites)) {
                whites += 1;
            }
            let next = self.peek(whites);
            if chars::is_break(next) {
                // trailing whitespace folds away with the break
                self.bump(whites);
                if !self.flow_folded_quoted(n)? {
                    return Ok(());
                }
                continue;
            }
            if next == QUOTE && self.peek(whites + 1) == QUOTE {
                self.push_content(whites);
                self.bump(2);
                self.push_unit(QUOTE);
                continue;
            }
            if next == QUOTE || self.pos + whites >= self.src.len() {
                self.push_content(whites);
                return Ok(());
            }
            self.push_content(whites);
            let len = chars::nb_json(self.src.units(), self.pos);
            if len == 0 {
                return Ok(());
            }
            self.push_content(len);
        }
    }

    /// [122] nb-single-one-line
    fn single_text_single(&mut self) -> crate::Result<()> {
        loop {
            let u = self.unit();
            if u == QUOTE {
                if self.peek(1) == QUOTE {
                    self.bump(2);
                    self.push_unit(QUOTE);
                    continue;
                }
                return Ok(());
            }
            if chars::is_break(u) || self.at_end() {
                return Ok(());
            }
            let len = chars::nb_json(self.src.units(), self.pos);
            if len == 0 {
                return Ok(());
            }
            self.push_content(len);
        }
    }

    // ------------------------------------------------------------------
    // Double-quoted scalars
    // ------------------------------------------------------------------

    /// [109] c-double-quoted(n,c)
    pub(crate) fn double_quoted_node(&mut self, n: i32, c: Context) -> Match {
        if self.unit() != DQUOTE {
            return Ok(false);
        }
        let start = self.pos;
        self.with_rewind(|p| {
            debug_assert!(p.scratch.is_empty(), "scratch must be empty at a scalar");
            p.bump(1);
            match c {
                Context::FlowOut | Context::FlowIn => p.double_text_multi(n)?,
                Context::BlockKey | Context::FlowKey => p.double_text_single()?,
                _ => return Ok(false),
            }
            if !p.eat(DQUOTE) {
                return p.error_unless(
                    c == Context::FlowOut,
                    "unclosed double-quoted scalar",
                );
            }
            p.create_scalar(ScalarStyle::Quoted, start);
            Ok(true)
        })
    }

    /// [116] nb-double-multi-line(n)
    fn double_text_multi(&mut self, n: i32) -> crate::Result<()> {
        loop {
            let mut whites = 0;
            while chars::is_white(self.peek(whites)) {
                whites += 1;
            }
            let next = self.peek(whites);
            if chars::is_break(next) {
                // fold: the whitespace run before the break is dropped
                self.bump(whites);
                if !self.flow_folded_quoted(n)? {
                    return Ok(());
                }
                continue;
            }
            if next == BACKSLASH && chars::is_break(self.peek(whites + 1)) {
                // [112] escaped break: whitespace kept, break swallowed
                self.push_content(whites);
                self.bump(1);
                self.eat_break();
                self.star(|p| p.empty_line(n, Context::FlowIn))?;
                if !self.flow_line_prefix(n)? {
                    return Ok(());
                }
                continue;
            }
            if next == DQUOTE || self.pos + whites >= self.src.len() {
                self.push_content(whites);
                return Ok(());
            }
            self.push_content(whites);
            if self.unit() == BACKSLASH {
                self.double_escape()?;
                continue;
            }
            let len = chars::nb_json(self.src.units(), self.pos);
            if len == 0 {
                return Ok(());
            }
            self.push_content(len);
        }
    }

    /// [111] nb-double-one-line
    fn double_text_single(&mut self) -> crate::Result<()> {
        loop {
            let u = self.unit();
            if u == DQUOTE || chars::is_break(u) || self.at_end() {
                return Ok(());
            }
            if u == BACKSLASH {
                if chars::is_break(self.peek(1)) {
                    return Ok(());
                }
                self.double_escape()?;
                continue;
            }
            let len = chars::nb_json(self.src.units(), self.pos);
            if len == 0 {
                return Ok(());
            }
            self.push_content(len);
        }
    }

    /// Folding shared by both quoted styles; trailing whitespace has
    /// already been dropped by the caller.
    fn flow_folded_quoted(&mut self, n: i32) -> Match {
        self.with_rewind(|p| {
            if !p.folded_break(n, Context::FlowIn)? {
                return Ok(false);
            }
            p.flow_line_prefix(n)
        })
    }

    /// [41-62] c-ns-esc-char. The cursor sits on the backslash.
    fn double_escape(&mut self) -> crate::Result<()> {
        let start = self.pos;
        self.bump(1);
        if self.at_end() {
            return Err(self.invalid_escape(start));
        }
        let u = self.unit();
        self.bump(1);
        let decoded: u16 = match u as u32 {
            0x30 => 0x0000,            // \0
            0x61 => 0x0007,            // \a
            0x62 => 0x0008,            // \b
            0x74 | 0x09 => 0x0009,     // \t, \<TAB>
            0x6E => 0x000A,            // \n
            0x76 => 0x000B,            // \v
            0x66 => 0x000C,            // \f
            0x72 => 0x000D,            // \r
            0x65 => 0x001B,            // \e
            0x20 => 0x0020,            // \<SPACE>
            0x22 => 0x0022,            // \"
            0x2F => 0x002F,            // \/
            0x5C => 0x005C,            // \\
            0x4E => 0x0085,            // \N
            0x5F => 0x00A0,            // \_
            0x4C => 0x2028,            // \L
            0x50 => 0x2029,            // \P
            0x78 => return self.hex_escape(start, 2), // \xXX
            0x75 => return self.hex_escape(start, 4), // \uXXXX
            0x55 => return self.hex_escape(start, 8), // \UXXXXXXXX
            _ => return Err(self.invalid_escape(start)),
        };
        self.push_unit(decoded);
        Ok(())
    }

    fn hex_escape(&mut self, start: usize, digits: u32) -> crate::Result<()> {
        let mut value: u32 = 0;
        for _ in 0..digits {
            let Some(d) = chars::hex_value(self.unit()) else {
                return Err(self.invalid_escape(start));
            };
            value = value * 16 + d;
            self.bump(1);
        }
        if value <= 0xFFFF {
            // includes lone surrogate halves; pairs written as two \u
            // escapes combine in the scratch buffer
            self.push_unit(value as u16);
            return Ok(());
        }
        match char::from_u32(value) {
            Some(c) => {
                self.push_char(c);
                Ok(())
            }
            None => Err(self.error_at(start, format!("\\U{value:08X} is not a valid code point"))),
        }
    }

    /// Best-effort report: show a fixed window of units after the
    /// backslash, even if it splits a surrogate pair.
    fn invalid_escape(&self, start: usize) -> crate::Error {
        let end = (start + 6).min(self.src.len());
        let shown = String::from_utf16_lossy(&self.src.units()[start..end]);
        let shown: String = shown.chars().filter(|c| !c.is_control()).collect();
        self.error_at(start, format!("invalid escape sequence '{shown}'"))
    }
}
