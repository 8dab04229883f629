//! Block sequences and mappings, compact forms, and implicit keys.

use yamlet_core::NodeId;

use crate::chars;
use crate::engine::{Match, Parser};
use crate::grammar::Context;

const COLON: u16 = b':' as u16;
const DASH: u16 = b'-' as u16;

impl Parser<'_> {
    // ------------------------------------------------------------------
    // Block sequences
    // ------------------------------------------------------------------

    /// [183] l+block-sequence(n): entries at the auto-detected indentation
    /// `n + m`, each introduced by `-`.
    pub(crate) fn block_sequence(&mut self, n: i32) -> Match {
        self.with_rewind(|p| {
            let spaces = p.peek_indent();
            if spaces <= n {
                return Ok(false);
            }
            let indent = spaces;
            if !p.indent_exact(indent)? {
                return Ok(false);
            }
            if !p.at_seq_entry() {
                return Ok(false);
            }
            let seq = p.begin_sequence(p.pos);
            p.block_seq_entry(indent, seq)?;
            p.star(|p| {
                if !p.indent_exact(indent)? {
                    return Ok(false);
                }
                if !p.at_seq_entry() {
                    return Ok(false);
                }
                p.block_seq_entry(indent, seq)
            })?;
            p.finish_collection(seq);
            Ok(true)
        })
    }

    /// `-` not followed by an ns-char.
    fn at_seq_entry(&self) -> bool {
        self.unit() == DASH && chars::ns_char(self.src.units(), self.pos + 1) == 0
    }

    /// [184] c-l-block-seq-entry(n). The caller has already sighted `-`.
    fn block_seq_entry(&mut self, n: i32, seq: NodeId) -> Match {
        self.bump(1);
        if !self.block_indented(n, Context::BlockIn)? {
            return Ok(false);
        }
        let item = self.take_value();
        self.graph.push_item(seq, item);
        Ok(true)
    }

    /// [185] s-l+block-indented(n,c): a compact collection on the same
    /// line, a full block node, or nothing at all.
    pub(crate) fn block_indented(&mut self, n: i32, c: Context) -> Match {
        if self.with_rewind(|p| {
            let before = p.pos;
            while p.eat(chars::SPACE) {}
            let m = (p.pos - before) as i32;
            if p.compact_sequence(n + 1 + m)? {
                return Ok(true);
            }
            p.compact_mapping(n + 1 + m)
        })? {
            return Ok(true);
        }
        if self.block_node(n, c)? {
            return Ok(true);
        }
        self.with_rewind(|p| {
            p.empty_node()?;
            p.comments()
        })
    }

    /// [186] ns-l-compact-sequence(n): first entry on the current line.
    fn compact_sequence(&mut self, n: i32) -> Match {
        if !self.at_seq_entry() {
            return Ok(false);
        }
        self.with_rewind(|p| {
            let seq = p.begin_sequence(p.pos);
            if !p.block_seq_entry(n, seq)? {
                return Ok(false);
            }
            p.star(|p| {
                if !p.indent_exact(n)? {
                    return Ok(false);
                }
                if !p.at_seq_entry() {
                    return Ok(false);
                }
                p.block_seq_entry(n, seq)
            })?;
            p.finish_collection(seq);
            Ok(true)
        })
    }

    // ------------------------------------------------------------------
    // Block mappings
    // ------------------------------------------------------------------

    /// [187] l+block-mapping(n)
    pub(crate) fn block_mapping(&mut self, n: i32) -> Match {
        self.with_rewind(|p| {
            let spaces = p.peek_indent();
            if spaces <= n {
                return Ok(false);
            }
            let indent = spaces;
            if !p.indent_exact(indent)? {
                return Ok(false);
            }
            let map = p.begin_mapping(p.pos);
            if !p.block_map_entry(indent, map)? {
                return Ok(false);
            }
            p.star(|p| {
                if !p.indent_exact(indent)? {
                    return Ok(false);
                }
                p.block_map_entry(indent, map)
            })?;
            p.finish_collection(map);
            Ok(true)
        })
    }

    /// [195] ns-l-compact-mapping(n): first entry on the current line,
    /// used for `- key: value`.
    pub(crate) fn compact_mapping(&mut self, n: i32) -> Match {
        self.with_rewind(|p| {
            let map = p.begin_mapping(p.pos);
            if !p.block_map_entry(n, map)? {
                return Ok(false);
            }
            p.star(|p| {
                if !p.indent_exact(n)? {
                    return Ok(false);
                }
                p.block_map_entry(n, map)
            })?;
            p.finish_collection(map);
            Ok(true)
        })
    }

    /// [188] ns-l-block-map-entry(n)
    fn block_map_entry(&mut self, n: i32, map: NodeId) -> Match {
        if self.block_map_explicit_entry(n, map)? {
            return Ok(true);
        }
        self.block_map_implicit_entry(n, map)
    }

    /// [189-191] explicit entry: `? key` with an optional `: value` line.
    fn block_map_explicit_entry(&mut self, n: i32, map: NodeId) -> Match {
        self.with_rewind(|p| {
            if p.unit() != b'?' as u16 {
                return Ok(false);
            }
            // `?` followed by an ns-char is a plain scalar, not a key
            if chars::ns_char(p.src.units(), p.pos + 1) != 0 {
                return Ok(false);
            }
            p.bump(1);
            if !p.block_indented(n, Context::BlockOut)? {
                return Ok(false);
            }
            let key = p.take_value();
            let value = if p.with_rewind(|p| {
                if !p.indent_exact(n)? {
                    return Ok(false);
                }
                if !p.eat(COLON) {
                    return Ok(false);
                }
                p.block_indented(n, Context::BlockOut)
            })? {
                p.take_value()
            } else {
                p.empty_node()?;
                p.take_value()
            };
            p.graph.push_entry(map, key, value);
            Ok(true)
        })
    }

    /// [192-194] implicit entry: `key: value` on one line.
    fn block_map_implicit_entry(&mut self, n: i32, map: NodeId) -> Match {
        self.with_rewind(|p| {
            let key = if p.with_rewind(|p| p.implicit_json_key(Context::BlockKey))?
                || p.with_rewind(|p| p.implicit_yaml_key(Context::BlockKey))?
            {
                p.take_value()
            } else {
                p.empty_node()?;
                p.take_value()
            };
            if !p.eat(COLON) {
                return Ok(false);
            }
            let value = if p.block_node(n, Context::BlockOut)? {
                p.take_value()
            } else if p.with_rewind(|p| {
                // deviation companion: `a:b` carries its value with no
                // separation after the colon
                if !p.flow_node(n + 1, Context::FlowOut)? {
                    return Ok(false);
                }
                p.comments()
            })? {
                p.take_value()
            } else if p.with_rewind(|p| {
                p.empty_node()?;
                p.comments()
            })? {
                p.take_value()
            } else {
                return Ok(false);
            };
            p.graph.push_entry(map, key, value);
            Ok(true)
        })
    }

    // ------------------------------------------------------------------
    // Implicit keys
    // ------------------------------------------------------------------

    /// [154] ns-s-implicit-yaml-key(c): one line, at most 1024 units. The
    /// length is only enforced when a `:` actually follows, so a long
    /// plain scalar that merely looked like a key rewinds instead of
    /// aborting the parse.
    pub(crate) fn implicit_yaml_key(&mut self, c: Context) -> Match {
        let start = self.pos;
        if !self.flow_yaml_node(0, c)? {
            return Ok(false);
        }
        let end = self.pos;
        while self.eat_class(chars::is_white) {}
        self.check_key_length(start, end)?;
        Ok(true)
    }

    /// [155] c-s-implicit-json-key(c)
    pub(crate) fn implicit_json_key(&mut self, c: Context) -> Match {
        let start = self.pos;
        if !self.flow_json_node(0, c)? {
            return Ok(false);
        }
        let end = self.pos;
        while self.eat_class(chars::is_white) {}
        self.check_key_length(start, end)?;
        Ok(true)
    }

    fn check_key_length(&self, start: usize, end: usize) -> crate::Result<()> {
        if self.unit() == COLON && end - start > 1024 {
            return Err(self.error_at(start, "implicit key is longer than 1024 characters"));
        }
        Ok(())
    }
}
