//! Stream framing: document prefixes, directives and document boundaries.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::Result;
use crate::chars;
use crate::engine::{Match, Parser};
use crate::grammar::Context;

/// RFC 4151 tagging entity: `tag:authority,date:`. Only the shape is
/// checked; a mismatch is a warning, never an error.
static TAG_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^tag:[0-9A-Za-z][0-9A-Za-z.-]*(?:@[0-9A-Za-z.-]+)?,\d{4}(?:-\d{2}(?:-\d{2})?)?:")
        .expect("built-in pattern is valid")
});

/// [211] l-yaml-stream — the entry point.
pub(crate) fn stream(p: &mut Parser<'_>) -> Result<()> {
    trace!(units = p.src.len(), "parsing stream");
    p.star(|p| p.document_prefix())?;
    p.with_rewind(|p| p.any_document())?;
    loop {
        let before = p.pos;
        if p.plus(|p| p.document_suffix())? {
            p.star(|p| p.document_prefix())?;
            p.with_rewind(|p| p.any_document())?;
        } else {
            p.star(|p| p.document_prefix())?;
            p.with_rewind(|p| p.explicit_document())?;
        }
        if p.pos == before {
            if p.at_end() {
                break;
            }
            return Err(unexpected_stream_content(p));
        }
    }
    debug!(documents = p.roots.len(), "stream parsed");
    Ok(())
}

fn unexpected_stream_content(p: &Parser<'_>) -> crate::Error {
    let unit = p.unit();
    if unit == chars::BOM {
        return p.error("a byte order mark is only allowed before a document");
    }
    if unit == b'@' as u16 || unit == b'`' as u16 {
        let c = unit as u8 as char;
        return p.error(format!("the reserved indicator '{c}' cannot start a node"));
    }
    p.error("expected a document start, a document separator, or the end of the stream")
}

impl Parser<'_> {
    /// [202] l-document-prefix: an optional BOM and any comment lines.
    fn document_prefix(&mut self) -> Match {
        let before = self.pos;
        self.eat(chars::BOM);
        self.star(|p| p.comment_line())?;
        Ok(self.pos > before)
    }

    /// [205] l-document-suffix: `...` followed by comments.
    fn document_suffix(&mut self) -> Match {
        self.with_rewind(|p| {
            if !p.start_of_line() || !p.eat_ascii("...") {
                return Ok(false);
            }
            p.comments()
        })
    }

    /// [203] c-directives-end: `---` at the start of a line.
    fn directives_end_marker(&mut self) -> Match {
        Ok(self.start_of_line() && self.eat_ascii("---"))
    }

    /// [210] l-any-document
    fn any_document(&mut self) -> Match {
        if self.with_rewind(|p| p.directive_document())? {
            return Ok(true);
        }
        if self.with_rewind(|p| p.explicit_document())? {
            return Ok(true);
        }
        self.with_rewind(|p| p.bare_document())
    }

    /// [209] l-directive-document: directives, then an explicit document.
    fn directive_document(&mut self) -> Match {
        self.with_rewind(|p| {
            p.begin_document();
            if !p.plus(|p| p.directive())? {
                return Ok(false);
            }
            if !p.explicit_body()? {
                return Err(p.error("expected '---' after directives"));
            }
            Ok(true)
        })
    }

    /// [207] l-explicit-document
    fn explicit_document(&mut self) -> Match {
        self.with_rewind(|p| {
            p.begin_document();
            p.explicit_body()
        })
    }

    /// `---` plus a document body; a marker with nothing after it yields a
    /// single empty scalar root.
    fn explicit_body(&mut self) -> Match {
        self.with_rewind(|p| {
            if !p.directives_end_marker()? {
                return Ok(false);
            }
            if p.bare_body()? {
                return Ok(true);
            }
            let marker_end = p.pos;
            if !p.comments()? {
                return Ok(false);
            }
            p.create_scalar(crate::engine::ScalarStyle::Plain, marker_end);
            let root = p.take_value();
            p.roots.push(root);
            debug!(?root, "empty explicit document");
            Ok(true)
        })
    }

    /// [208] l-bare-document
    fn bare_document(&mut self) -> Match {
        self.with_rewind(|p| {
            p.begin_document();
            p.bare_body()
        })
    }

    fn bare_body(&mut self) -> Match {
        self.with_rewind(|p| {
            if !p.block_node(-1, Context::BlockIn)? {
                return Ok(false);
            }
            let root = p.take_value();
            p.roots.push(root);
            debug!(?root, "document parsed");
            Ok(true)
        })
    }

    /// Per-document state: tag handles, anchors, and the `%YAML` guard all
    /// reset at each document boundary.
    fn begin_document(&mut self) {
        self.handles.reset();
        self.anchors.clear();
        self.version_seen = false;
        self.pending = Default::default();
    }

    // ------------------------------------------------------------------
    // Directives
    // ------------------------------------------------------------------

    /// [82] l-directive
    fn directive(&mut self) -> Match {
        if self.unit() != b'%' as u16 {
            return Ok(false);
        }
        let start = self.pos;
        self.bump(1);
        let name_start = self.pos;
        while self.eat_span(chars::ns_char) {}
        let name = self.text_from(name_start);
        if name.is_empty() {
            return Err(self.error("expected a directive name after '%'"));
        }
        match name.as_str() {
            "YAML" => self.yaml_directive(start)?,
            "TAG" => self.tag_directive(start)?,
            _ => self.reserved_directive(start, &name)?,
        }
        if !self.comments()? {
            return Err(self.error("expected a comment or line break after the directive"));
        }
        Ok(true)
    }

    /// [86] ns-yaml-directive
    fn yaml_directive(&mut self, start: usize) -> Result<()> {
        if self.version_seen {
            return Err(self.error_at(start, "duplicate %YAML directive"));
        }
        self.version_seen = true;
        if !self.separate_in_line()? {
            return Err(self.error("expected a version after %YAML"));
        }
        let version_start = self.pos;
        let ok = self.eat_digits() && self.eat(b'.' as u16) && self.eat_digits();
        if !ok {
            return Err(self.error_at(version_start, "malformed %YAML version; expected digits '.' digits"));
        }
        let version = self.text_from(version_start);
        trace!(%version, "%YAML directive");
        if version != "1.2" {
            self.warn_at(
                version_start,
                format!("unsupported YAML version {version}; parsing as 1.2"),
            );
        }
        Ok(())
    }

    fn eat_digits(&mut self) -> bool {
        if !self.eat_class(chars::is_dec_digit) {
            return false;
        }
        while self.eat_class(chars::is_dec_digit) {}
        true
    }

    /// [88] ns-tag-directive
    fn tag_directive(&mut self, start: usize) -> Result<()> {
        if !self.separate_in_line()? {
            return Err(self.error("expected a tag handle after %TAG"));
        }
        let handle = self.tag_handle()?;
        if !self.separate_in_line()? {
            return Err(self.error(format!("expected a tag prefix after %TAG {handle}")));
        }
        let prefix = self.tag_prefix()?;
        trace!(%handle, %prefix, "%TAG directive");
        self.check_global_tag(&prefix, start);
        if !self.handles.add(handle.clone(), prefix) {
            return Err(self.error_at(start, format!("duplicate %TAG handle {handle}")));
        }
        Ok(())
    }

    /// [89] c-tag-handle: `!`, `!!`, or `!word!`.
    fn tag_handle(&mut self) -> Result<String> {
        let start = self.pos;
        if !self.eat(b'!' as u16) {
            return Err(self.error("expected a tag handle starting with '!'"));
        }
        while self.eat_class(chars::is_word_char) {}
        self.eat(b'!' as u16);
        let handle = self.text_from(start);
        if !handle.ends_with('!') {
            return Err(self.error_at(start, format!("malformed tag handle '{handle}'")));
        }
        Ok(handle)
    }

    /// [93] ns-tag-prefix: a local prefix `!…` or a global URI prefix.
    fn tag_prefix(&mut self) -> Result<String> {
        let start = self.pos;
        if self.eat(b'!' as u16) {
            while self.uri_char()? {}
            return Ok(self.text_from(start));
        }
        if !self.uri_char()? {
            return Err(self.error("expected a tag prefix"));
        }
        while self.uri_char()? {}
        Ok(self.text_from(start))
    }

    /// [83] ns-reserved-directive: unknown directives warn, their
    /// parameters are kept only for the warning text.
    fn reserved_directive(&mut self, start: usize, _name: &str) -> Result<()> {
        loop {
            let matched = self.with_rewind(|p| {
                if !p.separate_in_line()? {
                    return Ok(false);
                }
                if !p.eat_span(chars::ns_char) {
                    return Ok(false);
                }
                while p.eat_span(chars::ns_char) {}
                Ok(true)
            })?;
            if !matched {
                break;
            }
        }
        let text = self.text_from(start);
        self.warn_at(start, format!("ignoring unknown directive {text}"));
        Ok(())
    }

    /// [39] ns-uri-char, including the `%XX` escape form.
    pub(crate) fn uri_char(&mut self) -> Match {
        if self.eat_class(chars::is_uri_char_sub) {
            return Ok(true);
        }
        if self.unit() == b'%' as u16 {
            self.uri_escape()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// `%` must introduce exactly two hex digits.
    pub(crate) fn uri_escape(&mut self) -> Result<()> {
        let at = self.pos;
        self.bump(1);
        if chars::is_hex_digit(self.unit()) && chars::is_hex_digit(self.peek(1)) {
            self.bump(2);
            Ok(())
        } else {
            Err(self.error_at(at, "invalid URI escape; '%' must be followed by two hex digits"))
        }
    }

    /// Warn when a `tag:` scheme prefix is not a plausible RFC 4151 tag.
    pub(crate) fn check_global_tag(&mut self, tag: &str, at: usize) {
        if tag.starts_with("tag:") && !TAG_URI.is_match(tag) {
            self.warn_at(at, format!("'{tag}' is not a valid RFC 4151 tag URI"));
        }
    }
}
