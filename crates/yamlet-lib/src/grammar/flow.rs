//! Flow collections: `[…]` sequences, `{…}` mappings, and single pairs.
//!
//! Unclosed delimiters are fatal except during speculative key parses,
//! where the production rewinds and an enclosing rule reports the error.

use yamlet_core::{NodeId, tags};

use crate::engine::{Match, Parser};
use crate::grammar::Context;

const COLON: u16 = b':' as u16;
const COMMA: u16 = b',' as u16;

impl Parser<'_> {
    // ------------------------------------------------------------------
    // Sequences
    // ------------------------------------------------------------------

    /// [137] c-flow-sequence(n,c)
    pub(crate) fn flow_sequence(&mut self, n: i32, c: Context) -> Match {
        if self.unit() != b'[' as u16 {
            return Ok(false);
        }
        self.with_rewind(|p| {
            let start = p.pos;
            p.bump(1);
            let seq = p.begin_sequence(start);
            p.opt(|p| p.separate(n, c))?;
            let ic = c.in_flow();
            p.opt(|p| p.flow_seq_entries(n, ic, seq))?;
            p.opt(|p| p.separate(n, ic))?;
            if !p.eat(b']' as u16) {
                return p.error_unless(!c.is_key(), "unclosed flow sequence; expected ']'");
            }
            p.finish_collection(seq);
            Ok(true)
        })
    }

    /// [138] ns-s-flow-seq-entries(n,c)
    fn flow_seq_entries(&mut self, n: i32, c: Context, seq: NodeId) -> Match {
        if !self.flow_seq_entry(n, c)? {
            return Ok(false);
        }
        let item = self.take_value();
        self.graph.push_item(seq, item);
        loop {
            let more = self.with_rewind(|p| {
                p.opt(|p| p.separate(n, c))?;
                if !p.eat(COMMA) {
                    return Ok(false);
                }
                p.opt(|p| p.separate(n, c))?;
                Ok(true)
            })?;
            if !more {
                return Ok(true);
            }
            if !self.with_rewind(|p| p.flow_seq_entry(n, c))? {
                // trailing comma
                return Ok(true);
            }
            let item = self.take_value();
            self.graph.push_item(seq, item);
        }
    }

    /// [139] ns-flow-seq-entry(n,c): a single pair reads as a one-entry
    /// mapping, otherwise any flow node.
    fn flow_seq_entry(&mut self, n: i32, c: Context) -> Match {
        if self.with_rewind(|p| p.flow_pair(n, c))? {
            return Ok(true);
        }
        self.flow_node(n, c)
    }

    // ------------------------------------------------------------------
    // Mappings
    // ------------------------------------------------------------------

    /// [140] c-flow-mapping(n,c)
    pub(crate) fn flow_mapping(&mut self, n: i32, c: Context) -> Match {
        if self.unit() != b'{' as u16 {
            return Ok(false);
        }
        self.with_rewind(|p| {
            let start = p.pos;
            p.bump(1);
            let map = p.begin_mapping(start);
            p.opt(|p| p.separate(n, c))?;
            let ic = c.in_flow();
            p.opt(|p| p.flow_map_entries(n, ic, map))?;
            p.opt(|p| p.separate(n, ic))?;
            if !p.eat(b'}' as u16) {
                return p.error_unless(!c.is_key(), "unclosed flow mapping; expected '}'");
            }
            p.finish_collection(map);
            Ok(true)
        })
    }

    /// [141] ns-s-flow-map-entries(n,c)
    fn flow_map_entries(&mut self, n: i32, c: Context, map: NodeId) -> Match {
        if !self.flow_map_entry(n, c, map)? {
            return Ok(false);
        }
        loop {
            let more = self.with_rewind(|p| {
                p.opt(|p| p.separate(n, c))?;
                if !p.eat(COMMA) {
                    return Ok(false);
                }
                p.opt(|p| p.separate(n, c))?;
                Ok(true)
            })?;
            if !more {
                return Ok(true);
            }
            if !self.with_rewind(|p| p.flow_map_entry(n, c, map))? {
                // trailing comma
                return Ok(true);
            }
        }
    }

    /// [142] ns-flow-map-entry(n,c)
    fn flow_map_entry(&mut self, n: i32, c: Context, map: NodeId) -> Match {
        let explicit = self.with_rewind(|p| {
            if !p.eat(b'?' as u16) {
                return Ok(false);
            }
            if !p.separate(n, c)? {
                return Ok(false);
            }
            if p.flow_map_implicit_entry(n, c, map)? {
                return Ok(true);
            }
            // a lone `?`: null key, null value
            p.empty_node()?;
            let key = p.take_value();
            p.empty_node()?;
            let value = p.take_value();
            p.graph.push_entry(map, key, value);
            Ok(true)
        })?;
        if explicit {
            return Ok(true);
        }
        self.flow_map_implicit_entry(n, c, map)
    }

    /// [144] ns-flow-map-implicit-entry(n,c)
    fn flow_map_implicit_entry(&mut self, n: i32, c: Context, map: NodeId) -> Match {
        if self.with_rewind(|p| p.flow_map_yaml_key_entry(n, c, map))? {
            return Ok(true);
        }
        if self.with_rewind(|p| p.flow_map_json_key_entry(n, c, map))? {
            return Ok(true);
        }
        self.with_rewind(|p| p.flow_map_empty_key_entry(n, c, map))
    }

    /// [145] ns-flow-map-yaml-key-entry(n,c)
    fn flow_map_yaml_key_entry(&mut self, n: i32, c: Context, map: NodeId) -> Match {
        if !self.flow_yaml_node(n, c)? {
            return Ok(false);
        }
        let key = self.take_value();
        let value = if self.with_rewind(|p| {
            p.opt(|p| p.separate(n, c))?;
            p.flow_map_separate_value(n, c)
        })? {
            self.take_value()
        } else {
            self.empty_node()?;
            self.take_value()
        };
        self.graph.push_entry(map, key, value);
        Ok(true)
    }

    /// [146] c-ns-flow-map-empty-key-entry(n,c): `: value`.
    fn flow_map_empty_key_entry(&mut self, n: i32, c: Context, map: NodeId) -> Match {
        if self.unit() != COLON {
            return Ok(false);
        }
        self.empty_node()?;
        let key = self.take_value();
        if !self.flow_map_separate_value(n, c)? {
            return Ok(false);
        }
        let value = self.take_value();
        self.graph.push_entry(map, key, value);
        Ok(true)
    }

    /// [147] c-ns-flow-map-separate-value(n,c). Two departures from the
    /// written grammar, both sides of the plain-scalar `:` deviation: the
    /// "not followed by plain-safe" lookahead is dropped, and the value may
    /// sit directly against the colon.
    fn flow_map_separate_value(&mut self, n: i32, c: Context) -> Match {
        self.with_rewind(|p| {
            if !p.eat(COLON) {
                return Ok(false);
            }
            if p.with_rewind(|p| {
                if !p.separate(n, c)? {
                    return Ok(false);
                }
                p.flow_node(n, c)
            })? {
                return Ok(true);
            }
            if p.with_rewind(|p| p.flow_node(n, c))? {
                return Ok(true);
            }
            p.empty_node()
        })
    }

    /// [149] c-ns-flow-map-json-key-entry(n,c)
    fn flow_map_json_key_entry(&mut self, n: i32, c: Context, map: NodeId) -> Match {
        if !self.flow_json_node(n, c)? {
            return Ok(false);
        }
        let key = self.take_value();
        let value = if self.with_rewind(|p| {
            p.opt(|p| p.separate(n, c))?;
            p.flow_map_adjacent_value(n, c)
        })? {
            self.take_value()
        } else {
            self.empty_node()?;
            self.take_value()
        };
        self.graph.push_entry(map, key, value);
        Ok(true)
    }

    /// [148] c-ns-flow-map-adjacent-value(n,c)
    fn flow_map_adjacent_value(&mut self, n: i32, c: Context) -> Match {
        self.with_rewind(|p| {
            if !p.eat(COLON) {
                return Ok(false);
            }
            if p.with_rewind(|p| {
                p.opt(|p| p.separate(n, c))?;
                p.flow_node(n, c)
            })? {
                return Ok(true);
            }
            p.empty_node()
        })
    }

    // ------------------------------------------------------------------
    // Pairs
    // ------------------------------------------------------------------

    /// [150] ns-flow-pair(n,c): `key: value` as a sequence entry becomes a
    /// single-entry mapping. The key is a true implicit key — one line,
    /// 1024 units.
    fn flow_pair(&mut self, n: i32, c: Context) -> Match {
        let start = self.pos;
        self.with_rewind(|p| {
            // explicit pair: `? key: value`
            if p.eat(b'?' as u16) {
                if !p.separate(n, c)? {
                    return Ok(false);
                }
                let map = p.pair_mapping(start);
                if p.flow_map_implicit_entry(n, c, map)? {
                    p.finish_collection(map);
                    return Ok(true);
                }
                p.empty_node()?;
                let key = p.take_value();
                p.empty_node()?;
                let value = p.take_value();
                p.graph.push_entry(map, key, value);
                p.finish_collection(map);
                return Ok(true);
            }

            // [151-153] implicit pair entries
            if p.with_rewind(|p| p.implicit_yaml_key(Context::FlowKey))? {
                let key = p.take_value();
                if !p.flow_map_separate_value(n, c)? {
                    return Ok(false);
                }
                let value = p.take_value();
                let map = p.pair_mapping(start);
                p.graph.push_entry(map, key, value);
                p.finish_collection(map);
                return Ok(true);
            }
            if p.with_rewind(|p| p.implicit_json_key(Context::FlowKey))? {
                let key = p.take_value();
                if !p.flow_map_adjacent_value(n, c)? {
                    return Ok(false);
                }
                let value = p.take_value();
                let map = p.pair_mapping(start);
                p.graph.push_entry(map, key, value);
                p.finish_collection(map);
                return Ok(true);
            }
            if p.unit() == COLON {
                p.empty_node()?;
                let key = p.take_value();
                if !p.flow_map_separate_value(n, c)? {
                    return Ok(false);
                }
                let value = p.take_value();
                let map = p.pair_mapping(start);
                p.graph.push_entry(map, key, value);
                p.finish_collection(map);
                return Ok(true);
            }
            Ok(false)
        })
    }

    /// A pair's wrapping mapping carries no properties of its own.
    fn pair_mapping(&mut self, start: usize) -> NodeId {
        let position = self.src.position(start);
        self.graph.mapping(tags::MAP.to_string(), position)
    }
}
