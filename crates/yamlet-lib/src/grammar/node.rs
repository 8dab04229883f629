//! Node properties, aliases, and the block/flow node entry points.

use crate::chars;
use crate::engine::{Match, Parser, ScalarStyle};
use crate::grammar::Context;

const BANG: u16 = b'!' as u16;

impl Parser<'_> {
    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    /// [96] c-ns-properties(n,c): a tag and an anchor, in either order.
    /// Both are buffered; the next node created consumes them.
    pub(crate) fn properties(&mut self, n: i32, c: Context) -> Match {
        self.with_rewind(|p| {
            if p.tag_property()? {
                p.opt(|p| {
                    if !p.separate(n, c)? {
                        return Ok(false);
                    }
                    p.anchor_property()
                })?;
                return Ok(true);
            }
            if p.anchor_property()? {
                p.opt(|p| {
                    if !p.separate(n, c)? {
                        return Ok(false);
                    }
                    p.tag_property()
                })?;
                return Ok(true);
            }
            Ok(false)
        })
    }

    /// [97] c-ns-tag-property: verbatim `!<…>`, shorthand `!h!suffix`,
    /// `!!suffix`, `!suffix`, or the non-specific `!`.
    pub(crate) fn tag_property(&mut self) -> Match {
        if self.unit() != BANG {
            return Ok(false);
        }
        let start = self.pos;

        // [98] verbatim tag
        if self.peek(1) == b'<' as u16 {
            self.bump(2);
            let iri_start = self.pos;
            if !self.uri_char()? {
                return Err(self.error("empty verbatim tag"));
            }
            while self.uri_char()? {}
            let iri = self.text_from(iri_start);
            if !self.eat(b'>' as u16) {
                return Err(self.error("unterminated verbatim tag; expected '>'"));
            }
            if iri == "!" {
                return Err(self.error_at(start, "'!<!>' is not a valid verbatim tag"));
            }
            self.check_global_tag(&iri, start);
            self.pending.tag = Some(iri);
            return Ok(true);
        }

        // [99] named handle: !word+! suffix
        let snapshot = self.snapshot();
        self.bump(1);
        let word_start = self.pos;
        while self.eat_class(chars::is_word_char) {}
        if self.pos > word_start && self.eat(BANG) {
            let handle = self.text_from(start);
            let suffix = self.tag_suffix()?;
            if suffix.is_empty() {
                return Err(self.error(format!("expected a tag suffix after handle {handle}")));
            }
            let Some(prefix) = self.handles.resolve(&handle) else {
                return Err(self.error_at(start, format!("undeclared tag handle {handle}")));
            };
            let tag = format!("{prefix}{suffix}");
            self.check_global_tag(&tag, start);
            self.pending.tag = Some(tag);
            return Ok(true);
        }
        self.restore(snapshot);

        // secondary `!!suffix`
        if self.peek(1) == BANG {
            self.bump(2);
            let suffix = self.tag_suffix()?;
            if suffix.is_empty() {
                return Err(self.error("expected a tag suffix after '!!'"));
            }
            let prefix = self
                .handles
                .resolve("!!")
                .expect("the secondary handle is always declared")
                .to_string();
            self.pending.tag = Some(format!("{prefix}{suffix}"));
            return Ok(true);
        }

        // primary `!suffix`, or the bare non-specific `!`
        self.bump(1);
        let suffix = self.tag_suffix()?;
        if suffix.is_empty() {
            self.pending.tag = Some(String::new());
        } else {
            let prefix = self
                .handles
                .resolve("!")
                .expect("the primary handle is always declared")
                .to_string();
            self.pending.tag = Some(format!("{prefix}{suffix}"));
        }
        Ok(true)
    }

    /// [100-ish] ns-tag-char*: suffix characters with `%XX` escapes kept
    /// undecoded.
    fn tag_suffix(&mut self) -> crate::Result<String> {
        let start = self.pos;
        loop {
            if self.eat_class(chars::is_tag_char_sub) {
                continue;
            }
            if self.unit() == b'%' as u16 {
                self.uri_escape()?;
                continue;
            }
            break;
        }
        Ok(self.text_from(start))
    }

    /// [101] c-ns-anchor-property
    pub(crate) fn anchor_property(&mut self) -> Match {
        if !self.eat(b'&' as u16) {
            return Ok(false);
        }
        let start = self.pos;
        if !self.eat_span(chars::ns_anchor_char) {
            return Err(self.error("expected an anchor name after '&'"));
        }
        while self.eat_span(chars::ns_anchor_char) {}
        self.pending.anchor = Some(self.text_from(start));
        Ok(true)
    }

    /// [104] c-ns-alias-node: `*name` resolves against the anchor table;
    /// the shared node lands in the value slot.
    pub(crate) fn alias_node(&mut self) -> Match {
        let start = self.pos;
        if !self.eat(b'*' as u16) {
            return Ok(false);
        }
        let name_start = self.pos;
        if !self.eat_span(chars::ns_anchor_char) {
            return Err(self.error("expected an anchor name after '*'"));
        }
        while self.eat_span(chars::ns_anchor_char) {}
        let name = self.text_from(name_start);
        match self.anchors.lookup(&name) {
            Some(node) => {
                self.pending.value = Some(node);
                Ok(true)
            }
            None => Err(self.error_at(start, format!("unknown anchor '{name}'"))),
        }
    }

    /// [105] e-node: the empty scalar. Consumes pending properties, so a
    /// dangling tag or anchor attaches to it.
    pub(crate) fn empty_node(&mut self) -> Match {
        debug_assert!(self.scratch.is_empty(), "scratch must be empty at a scalar");
        self.create_scalar(ScalarStyle::Plain, self.pos);
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Block nodes
    // ------------------------------------------------------------------

    /// [196] s-l+block-node(n,c)
    pub(crate) fn block_node(&mut self, n: i32, c: Context) -> Match {
        self.enter_nested()?;
        let result = self.block_node_inner(n, c);
        self.exit_nested();
        result
    }

    fn block_node_inner(&mut self, n: i32, c: Context) -> Match {
        if self.block_in_block(n, c)? {
            return Ok(true);
        }
        self.flow_in_block(n)
    }

    /// [197] s-l+flow-in-block(n)
    fn flow_in_block(&mut self, n: i32) -> Match {
        self.with_rewind(|p| {
            if !p.separate(n + 1, Context::FlowOut)? {
                return Ok(false);
            }
            if !p.flow_node(n + 1, Context::FlowOut)? {
                return Ok(false);
            }
            p.comments()
        })
    }

    /// [198] s-l+block-in-block(n,c)
    fn block_in_block(&mut self, n: i32, c: Context) -> Match {
        if self.block_scalar(n, c)? {
            return Ok(true);
        }
        self.block_collection(n, c)
    }

    /// [199] s-l+block-scalar(n,c)
    fn block_scalar(&mut self, n: i32, c: Context) -> Match {
        self.with_rewind(|p| {
            if !p.separate(n + 1, c)? {
                return Ok(false);
            }
            p.opt(|p| {
                if !p.properties(n + 1, c)? {
                    return Ok(false);
                }
                p.separate(n + 1, c)
            })?;
            if p.literal_scalar(n)? {
                return Ok(true);
            }
            p.folded_scalar(n)
        })
    }

    /// [200] s-l+block-collection(n,c)
    fn block_collection(&mut self, n: i32, c: Context) -> Match {
        self.with_rewind(|p| {
            p.opt(|p| {
                if !p.separate(n + 1, c)? {
                    return Ok(false);
                }
                p.properties(n + 1, c)
            })?;
            if !p.comments()? {
                return Ok(false);
            }
            // [201] seq-spaces: block sequences may sit at the parent's
            // indentation inside block-out contexts
            let seq_n = if c == Context::BlockOut { n - 1 } else { n };
            if p.block_sequence(seq_n)? {
                return Ok(true);
            }
            p.block_mapping(n)
        })
    }

    // ------------------------------------------------------------------
    // Flow nodes
    // ------------------------------------------------------------------

    /// [161] ns-flow-node(n,c)
    pub(crate) fn flow_node(&mut self, n: i32, c: Context) -> Match {
        self.enter_nested()?;
        let result = self.flow_node_inner(n, c);
        self.exit_nested();
        result
    }

    fn flow_node_inner(&mut self, n: i32, c: Context) -> Match {
        if self.alias_node()? {
            return Ok(true);
        }
        if self.flow_content(n, c)? {
            return Ok(true);
        }
        self.with_rewind(|p| {
            if !p.properties(n, c)? {
                return Ok(false);
            }
            if p.with_rewind(|p| {
                if !p.separate(n, c)? {
                    return Ok(false);
                }
                p.flow_content(n, c)
            })? {
                return Ok(true);
            }
            p.empty_node()
        })
    }

    /// [159] ns-flow-yaml-node(n,c): like a flow node, but the content may
    /// only be a plain scalar. Used for implicit keys.
    pub(crate) fn flow_yaml_node(&mut self, n: i32, c: Context) -> Match {
        if self.alias_node()? {
            return Ok(true);
        }
        if self.plain_scalar_node(n, c)? {
            return Ok(true);
        }
        self.with_rewind(|p| {
            if !p.properties(n, c)? {
                return Ok(false);
            }
            if p.with_rewind(|p| {
                if !p.separate(n, c)? {
                    return Ok(false);
                }
                p.plain_scalar_node(n, c)
            })? {
                return Ok(true);
            }
            p.empty_node()
        })
    }

    /// [160] c-flow-json-node(n,c): quoted scalars and flow collections,
    /// the key shapes that allow an adjacent `:` value.
    pub(crate) fn flow_json_node(&mut self, n: i32, c: Context) -> Match {
        self.with_rewind(|p| {
            p.opt(|p| {
                if !p.properties(n, c)? {
                    return Ok(false);
                }
                p.separate(n, c)
            })?;
            p.flow_json_content(n, c)
        })
    }

    /// [156] ns-flow-content(n,c)
    fn flow_content(&mut self, n: i32, c: Context) -> Match {
        if self.plain_scalar_node(n, c)? {
            return Ok(true);
        }
        self.flow_json_content(n, c)
    }

    /// [157] c-flow-json-content(n,c)
    fn flow_json_content(&mut self, n: i32, c: Context) -> Match {
        if self.flow_sequence(n, c)? {
            return Ok(true);
        }
        if self.flow_mapping(n, c)? {
            return Ok(true);
        }
        if self.single_quoted_node(n, c)? {
            return Ok(true);
        }
        self.double_quoted_node(n, c)
    }
}
