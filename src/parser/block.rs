// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Block productions: sequences, mappings, compact collections and the
//! block-node dispatch.

use crate::chars;
use crate::graph::NodeId;

use super::{Context, Matched, Parser};

impl Parser<'_> {
    /// `seq-spaces(n,c)`: a block sequence nested in a mapping may sit
    /// at the mapping's own indentation.
    fn seq_spaces(n: i32, c: Context) -> i32 {
        if c == Context::BlockOut { n - 1 } else { n }
    }

    /// Extra indentation `m` of the collection starting at the cursor:
    /// the run of spaces ahead, relative to `n`.
    fn detect_collection_indent(&self, n: i32) -> i32 {
        let mut count = 0i32;
        let mut offset = 0usize;
        while chars::is_space(self.peek_at(offset)) {
            count += 1;
            offset += 1;
        }
        count - n
    }

    // --- block sequences ---------------------------------------------------

    /// `l+block-sequence(n)`: entries at a fixed auto-detected
    /// indentation `n+m`, `m >= 1`.
    pub(crate) fn l_block_sequence(&mut self, n: i32) -> Matched {
        self.backtrack(|p| {
            let m = p.detect_collection_indent(n);
            if m < 1 {
                return Ok(false);
            }
            let indent = n + m;
            if !p.s_indent(indent)? {
                return Ok(false);
            }
            let seq = p.begin_sequence(p.pos);
            if !p.c_l_block_seq_entry(indent, seq)? {
                return Ok(false);
            }
            p.star(|p| {
                p.backtrack(|p| {
                    if !p.s_indent(indent)? {
                        return Ok(false);
                    }
                    p.c_l_block_seq_entry(indent, seq)
                })
            })?;
            p.graph.set_span_end(seq, p.pos);
            p.pending.value = Some(seq);
            Ok(true)
        })
    }

    /// `c-l-block-seq-entry(n)`: `-` not glued to a non-space, then an
    /// indented node.
    fn c_l_block_seq_entry(&mut self, n: i32, seq: NodeId) -> Matched {
        if !self.eat('-') {
            return Ok(false);
        }
        if chars::ns_char(&self.text, self.pos) > 0 {
            // "-foo" is a plain scalar, not an entry
            self.pos -= 1;
            return Ok(false);
        }
        if !self.s_l_block_indented(n, Context::BlockIn)? {
            return Ok(false);
        }
        let Some(item) = self.pending.value.take() else {
            return Ok(false);
        };
        self.graph.push_item(seq, item);
        Ok(true)
    }

    /// `s-l+block-indented(n,c)`: a compact collection on the indicator
    /// line, a full block node, or nothing.
    pub(crate) fn s_l_block_indented(&mut self, n: i32, c: Context) -> Matched {
        let compact = self.backtrack(|p| {
            let m = p.detect_collection_indent(0);
            if m < 0 {
                return Ok(false);
            }
            if !p.s_indent(m)? {
                return Ok(false);
            }
            if p.backtrack(|p| p.ns_l_compact_sequence(n + 1 + m))? {
                return Ok(true);
            }
            p.ns_l_compact_mapping(n + 1 + m)
        })?;
        if compact {
            return Ok(true);
        }
        if self.s_l_block_node(n, c)? {
            return Ok(true);
        }
        self.e_node()?;
        self.s_l_comments()
    }

    /// `ns-l-compact-sequence(n)`: further entries directly below the
    /// first one.
    fn ns_l_compact_sequence(&mut self, n: i32) -> Matched {
        if self.peek() != u16::from(b'-') {
            return Ok(false);
        }
        let seq = self.begin_sequence(self.pos);
        if !self.c_l_block_seq_entry(n, seq)? {
            return Ok(false);
        }
        self.star(|p| {
            p.backtrack(|p| {
                if !p.s_indent(n)? {
                    return Ok(false);
                }
                p.c_l_block_seq_entry(n, seq)
            })
        })?;
        self.graph.set_span_end(seq, self.pos);
        self.pending.value = Some(seq);
        Ok(true)
    }

    /// `ns-l-compact-mapping(n)`.
    fn ns_l_compact_mapping(&mut self, n: i32) -> Matched {
        let map = self.begin_mapping(self.pos);
        if !self.ns_l_block_map_entry(n, map)? {
            return Ok(false);
        }
        self.star(|p| {
            p.backtrack(|p| {
                if !p.s_indent(n)? {
                    return Ok(false);
                }
                p.ns_l_block_map_entry(n, map)
            })
        })?;
        self.graph.set_span_end(map, self.pos);
        self.pending.value = Some(map);
        Ok(true)
    }

    // --- block mappings ----------------------------------------------------

    /// `l+block-mapping(n)`.
    pub(crate) fn l_block_mapping(&mut self, n: i32) -> Matched {
        self.backtrack(|p| {
            let m = p.detect_collection_indent(n);
            if m < 1 {
                return Ok(false);
            }
            let indent = n + m;
            if !p.s_indent(indent)? {
                return Ok(false);
            }
            let map = p.begin_mapping(p.pos);
            if !p.ns_l_block_map_entry(indent, map)? {
                return Ok(false);
            }
            p.star(|p| {
                p.backtrack(|p| {
                    if !p.s_indent(indent)? {
                        return Ok(false);
                    }
                    p.ns_l_block_map_entry(indent, map)
                })
            })?;
            p.graph.set_span_end(map, p.pos);
            p.pending.value = Some(map);
            Ok(true)
        })
    }

    /// `ns-l-block-map-entry(n)`.
    fn ns_l_block_map_entry(&mut self, n: i32, map: NodeId) -> Matched {
        if self.backtrack(|p| p.c_l_block_map_explicit_entry(n, map))? {
            return Ok(true);
        }
        self.backtrack(|p| p.ns_l_block_map_implicit_entry(n, map))
    }

    /// `c-l-block-map-explicit-entry(n)`: `? key` then optionally
    /// `: value` at the same indentation.
    fn c_l_block_map_explicit_entry(&mut self, n: i32, map: NodeId) -> Matched {
        if !self.eat('?') {
            return Ok(false);
        }
        if chars::ns_char(&self.text, self.pos) > 0 {
            // "?foo" is a plain scalar, not an explicit key
            self.pos -= 1;
            return Ok(false);
        }
        if !self.s_l_block_indented(n, Context::BlockOut)? {
            return Ok(false);
        }
        let Some(key) = self.pending.value.take() else {
            return Ok(false);
        };
        let valued = self.backtrack(|p| {
            if !p.s_indent(n)? {
                return Ok(false);
            }
            if !p.eat(':') {
                return Ok(false);
            }
            p.s_l_block_indented(n, Context::BlockOut)
        })?;
        if !valued {
            self.e_node()?;
        }
        let Some(value) = self.pending.value.take() else {
            return Ok(false);
        };
        self.graph.push_entry(map, key, value);
        Ok(true)
    }

    /// `ns-l-block-map-implicit-entry(n)`.
    fn ns_l_block_map_implicit_entry(&mut self, n: i32, map: NodeId) -> Matched {
        if !self.ns_s_block_map_implicit_key()? {
            if self.peek() != u16::from(b':') {
                return Ok(false);
            }
            self.e_node()?;
        }
        let Some(key) = self.pending.value.take() else {
            return Ok(false);
        };
        if !self.c_l_block_map_implicit_value(n)? {
            return Ok(false);
        }
        let Some(value) = self.pending.value.take() else {
            return Ok(false);
        };
        self.graph.push_entry(map, key, value);
        Ok(true)
    }

    /// `ns-s-block-map-implicit-key`.
    fn ns_s_block_map_implicit_key(&mut self) -> Matched {
        if self.c_s_implicit_json_key(Context::BlockKey)? {
            return Ok(true);
        }
        self.ns_s_implicit_yaml_key(Context::BlockKey)
    }

    /// `c-l-block-map-implicit-value(n)`: `:` then a block node, an
    /// adjacent flow node (the wild-YAML `a:b` reading), or nothing.
    fn c_l_block_map_implicit_value(&mut self, n: i32) -> Matched {
        self.backtrack(|p| {
            if !p.eat(':') {
                return Ok(false);
            }
            if p.s_l_block_node(n, Context::BlockOut)? {
                return Ok(true);
            }
            let adjacent = p.backtrack(|p| {
                if !p.ns_flow_node(n + 1, Context::FlowOut)? {
                    return Ok(false);
                }
                p.s_l_comments()
            })?;
            if adjacent {
                return Ok(true);
            }
            p.e_node()?;
            p.s_l_comments()
        })
    }

    // --- block node dispatch -----------------------------------------------

    /// `s-l+block-node(n,c)`.
    pub(crate) fn s_l_block_node(&mut self, n: i32, c: Context) -> Matched {
        if self.s_l_block_in_block(n, c)? {
            return Ok(true);
        }
        self.s_l_flow_in_block(n)
    }

    /// `s-l+block-in-block(n,c)`.
    fn s_l_block_in_block(&mut self, n: i32, c: Context) -> Matched {
        if self.s_l_block_scalar(n, c)? {
            return Ok(true);
        }
        self.s_l_block_collection(n, c)
    }

    /// `s-l+block-scalar(n,c)`: separation, optional properties, then a
    /// literal or folded scalar.
    fn s_l_block_scalar(&mut self, n: i32, c: Context) -> Matched {
        self.backtrack(|p| {
            if !p.s_separate(n + 1, c)? {
                return Ok(false);
            }
            p.opt(|p| {
                if !p.c_ns_properties(n + 1, c)? {
                    return Ok(false);
                }
                p.s_separate(n + 1, c)
            })?;
            p.forbid_bom()?;
            if p.c_l_literal(n)? {
                return Ok(true);
            }
            p.c_l_folded(n)
        })
    }

    /// `s-l+block-collection(n,c)`: optional properties on the parent
    /// line, end of line, then a sequence or mapping below.
    fn s_l_block_collection(&mut self, n: i32, c: Context) -> Matched {
        self.backtrack(|p| {
            p.opt(|p| {
                if !p.s_separate(n + 1, c)? {
                    return Ok(false);
                }
                p.c_ns_properties(n + 1, c)
            })?;
            if !p.s_l_comments()? {
                return Ok(false);
            }
            if p.l_block_sequence(Self::seq_spaces(n, c))? {
                return Ok(true);
            }
            p.l_block_mapping(n)
        })
    }

    /// `s-l+flow-in-block(n)`: a flow node used as a block node.
    fn s_l_flow_in_block(&mut self, n: i32) -> Matched {
        self.backtrack(|p| {
            if !p.s_separate(n + 1, Context::FlowOut)? {
                return Ok(false);
            }
            p.forbid_bom()?;
            if !p.ns_flow_node(n + 1, Context::FlowOut)? {
                return Ok(false);
            }
            p.s_l_comments()
        })
    }
}
