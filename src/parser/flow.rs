// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Flow productions: alias nodes, flow sequences and mappings,
//! single-pair mappings, and the implicit-key forms.

use crate::chars;
use crate::error::ErrorKind;
use crate::graph::NodeId;

use super::{Context, Matched, Parser};

impl Parser<'_> {
    /// `c-ns-alias-node`: `*name`. The alias site shares the anchored
    /// node's id; an unknown name is fatal.
    pub(crate) fn c_ns_alias_node(&mut self) -> Matched {
        if self.peek() != u16::from(b'*') {
            return Ok(false);
        }
        let start = self.pos;
        self.pos += 1;
        let name_start = self.pos;
        while self.eat_class(chars::ns_anchor_char) > 0 {}
        if self.pos == name_start {
            self.pos = start;
            return Ok(false);
        }
        let name = self.capture(name_start);
        let Some(id) = self.anchors.lookup(&name) else {
            return Err(self.fail_at(ErrorKind::UnknownAnchor(name), start));
        };
        self.pending.value = Some(id);
        Ok(true)
    }

    /// A missing flow closing bracket: fatal at the outermost flow
    /// level, a refusal on speculative paths.
    fn flow_unclosed(&mut self, c: Context, start: usize) -> Matched {
        if c == Context::FlowOut {
            Err(self.fail_at(ErrorKind::UnclosedFlow, start))
        } else {
            Ok(false)
        }
    }

    // --- flow node dispatch ------------------------------------------------

    /// `ns-flow-node(n,c)`.
    pub(crate) fn ns_flow_node(&mut self, n: i32, c: Context) -> Matched {
        self.forbid_bom()?;
        if self.c_ns_alias_node()? {
            return Ok(true);
        }
        if self.ns_flow_content(n, c)? {
            return Ok(true);
        }
        self.backtrack(|p| {
            if !p.c_ns_properties(n, c)? {
                return Ok(false);
            }
            let content = p.backtrack(|p| {
                if !p.s_separate(n, c)? {
                    return Ok(false);
                }
                p.ns_flow_content(n, c)
            })?;
            if !content {
                p.e_scalar()?;
            }
            Ok(true)
        })
    }

    /// `ns-flow-yaml-node(n,c)`: like `ns-flow-node` but the content
    /// may only be a plain scalar (the YAML-style implicit key shape).
    fn ns_flow_yaml_node(&mut self, n: i32, c: Context) -> Matched {
        if self.c_ns_alias_node()? {
            return Ok(true);
        }
        if self.ns_plain(n, c)? {
            return Ok(true);
        }
        self.backtrack(|p| {
            if !p.c_ns_properties(n, c)? {
                return Ok(false);
            }
            let content = p.backtrack(|p| {
                if !p.s_separate(n, c)? {
                    return Ok(false);
                }
                p.ns_plain(n, c)
            })?;
            if !content {
                p.e_scalar()?;
            }
            Ok(true)
        })
    }

    /// `c-flow-json-node(n,c)`: properties, then JSON-like content.
    fn c_flow_json_node(&mut self, n: i32, c: Context) -> Matched {
        self.backtrack(|p| {
            p.opt(|p| {
                if !p.c_ns_properties(n, c)? {
                    return Ok(false);
                }
                p.s_separate(n, c)
            })?;
            p.c_flow_json_content(n, c)
        })
    }

    /// `ns-flow-content(n,c)`.
    fn ns_flow_content(&mut self, n: i32, c: Context) -> Matched {
        if self.ns_plain(n, c)? {
            return Ok(true);
        }
        self.c_flow_json_content(n, c)
    }

    /// `c-flow-json-content(n,c)`.
    fn c_flow_json_content(&mut self, n: i32, c: Context) -> Matched {
        if self.c_flow_sequence(n, c)? {
            return Ok(true);
        }
        if self.c_flow_mapping(n, c)? {
            return Ok(true);
        }
        if self.c_single_quoted(n, c)? {
            return Ok(true);
        }
        self.c_double_quoted(n, c)
    }

    // --- flow sequences ----------------------------------------------------

    /// `c-flow-sequence(n,c)`.
    pub(crate) fn c_flow_sequence(&mut self, n: i32, c: Context) -> Matched {
        self.backtrack(|p| {
            if !p.eat('[') {
                return Ok(false);
            }
            let start = p.pos - 1;
            let seq = p.begin_sequence(start);
            p.opt(|p| p.s_separate(n, c))?;
            let entry_c = c.in_flow_collection();
            p.opt(|p| p.ns_s_flow_seq_entries(n, entry_c, seq))?;
            if !p.eat(']') {
                return p.flow_unclosed(c, start);
            }
            p.graph.set_span_end(seq, p.pos);
            p.pending.value = Some(seq);
            Ok(true)
        })
    }

    /// `ns-s-flow-seq-entries(n,c)`.
    fn ns_s_flow_seq_entries(&mut self, n: i32, c: Context, seq: NodeId) -> Matched {
        if !self.ns_flow_seq_entry(n, c)? {
            return Ok(false);
        }
        let Some(item) = self.pending.value.take() else {
            return Ok(false);
        };
        self.graph.push_item(seq, item);
        self.opt(|p| p.s_separate(n, c))?;
        while self.eat(',') {
            self.opt(|p| p.s_separate(n, c))?;
            if !self.backtrack(|p| p.ns_flow_seq_entry(n, c))? {
                break;
            }
            let Some(item) = self.pending.value.take() else {
                return Ok(false);
            };
            self.graph.push_item(seq, item);
            self.opt(|p| p.s_separate(n, c))?;
        }
        Ok(true)
    }

    /// `ns-flow-seq-entry(n,c)`: a single-pair mapping or any node.
    fn ns_flow_seq_entry(&mut self, n: i32, c: Context) -> Matched {
        if self.ns_flow_pair(n, c)? {
            return Ok(true);
        }
        self.ns_flow_node(n, c)
    }

    // --- flow mappings -----------------------------------------------------

    /// `c-flow-mapping(n,c)`.
    pub(crate) fn c_flow_mapping(&mut self, n: i32, c: Context) -> Matched {
        self.backtrack(|p| {
            if !p.eat('{') {
                return Ok(false);
            }
            let start = p.pos - 1;
            let map = p.begin_mapping(start);
            p.opt(|p| p.s_separate(n, c))?;
            let entry_c = c.in_flow_collection();
            p.opt(|p| p.ns_s_flow_map_entries(n, entry_c, map))?;
            if !p.eat('}') {
                return p.flow_unclosed(c, start);
            }
            p.graph.set_span_end(map, p.pos);
            p.pending.value = Some(map);
            Ok(true)
        })
    }

    fn ns_s_flow_map_entries(&mut self, n: i32, c: Context, map: NodeId) -> Matched {
        if !self.backtrack(|p| p.ns_flow_map_entry(n, c, map))? {
            return Ok(false);
        }
        self.opt(|p| p.s_separate(n, c))?;
        while self.eat(',') {
            self.opt(|p| p.s_separate(n, c))?;
            if !self.backtrack(|p| p.ns_flow_map_entry(n, c, map))? {
                break;
            }
            self.opt(|p| p.s_separate(n, c))?;
        }
        Ok(true)
    }

    /// `ns-flow-map-entry(n,c)`.
    fn ns_flow_map_entry(&mut self, n: i32, c: Context, map: NodeId) -> Matched {
        let explicit = self.backtrack(|p| {
            if !p.eat('?') {
                return Ok(false);
            }
            if !p.s_separate(n, c)? {
                return Ok(false);
            }
            if !p.ns_flow_map_implicit_entry(n, c, map)? {
                // `?` with nothing after it: a null key and null value
                p.e_node()?;
                let Some(key) = p.pending.value.take() else {
                    return Ok(false);
                };
                p.e_node()?;
                let Some(value) = p.pending.value.take() else {
                    return Ok(false);
                };
                p.graph.push_entry(map, key, value);
            }
            Ok(true)
        })?;
        if explicit {
            return Ok(true);
        }
        self.ns_flow_map_implicit_entry(n, c, map)
    }

    /// `ns-flow-map-implicit-entry(n,c)`.
    fn ns_flow_map_implicit_entry(&mut self, n: i32, c: Context, map: NodeId) -> Matched {
        if self.backtrack(|p| p.ns_flow_map_yaml_key_entry(n, c, map))? {
            return Ok(true);
        }
        if self.backtrack(|p| p.c_ns_flow_map_empty_key_entry(n, c, map))? {
            return Ok(true);
        }
        self.backtrack(|p| p.c_ns_flow_map_json_key_entry(n, c, map))
    }

    /// `ns-flow-map-yaml-key-entry(n,c)`.
    fn ns_flow_map_yaml_key_entry(&mut self, n: i32, c: Context, map: NodeId) -> Matched {
        if !self.ns_flow_yaml_node(n, c)? {
            return Ok(false);
        }
        let Some(key) = self.pending.value.take() else {
            return Ok(false);
        };
        let valued = self.backtrack(|p| {
            p.opt(|p| p.s_separate(n, c))?;
            p.c_ns_flow_map_separate_value(n, c)
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

    /// `c-ns-flow-map-empty-key-entry(n,c)`: a value with no key.
    fn c_ns_flow_map_empty_key_entry(&mut self, n: i32, c: Context, map: NodeId) -> Matched {
        if self.peek() != u16::from(b':') {
            return Ok(false);
        }
        self.e_node()?;
        let Some(key) = self.pending.value.take() else {
            return Ok(false);
        };
        if !self.c_ns_flow_map_separate_value(n, c)? {
            return Ok(false);
        }
        let Some(value) = self.pending.value.take() else {
            return Ok(false);
        };
        self.graph.push_entry(map, key, value);
        Ok(true)
    }

    /// `c-ns-flow-map-separate-value(n,c)`: `:` then a separated value,
    /// an adjacent value (the wild-YAML `{a:b}` reading), or nothing.
    fn c_ns_flow_map_separate_value(&mut self, n: i32, c: Context) -> Matched {
        self.backtrack(|p| {
            if !p.eat(':') {
                return Ok(false);
            }
            let valued = p.backtrack(|p| {
                if !p.s_separate(n, c)? {
                    return Ok(false);
                }
                p.ns_flow_node(n, c)
            })?;
            if valued {
                return Ok(true);
            }
            if p.backtrack(|p| p.ns_flow_node(n, c))? {
                return Ok(true);
            }
            p.e_node()
        })
    }

    /// `c-ns-flow-map-json-key-entry(n,c)`.
    fn c_ns_flow_map_json_key_entry(&mut self, n: i32, c: Context, map: NodeId) -> Matched {
        if !self.c_flow_json_node(n, c)? {
            return Ok(false);
        }
        let Some(key) = self.pending.value.take() else {
            return Ok(false);
        };
        let valued = self.backtrack(|p| {
            p.opt(|p| p.s_separate(n, c))?;
            p.c_ns_flow_map_adjacent_value(n, c)
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

    /// `c-ns-flow-map-adjacent-value(n,c)`: after a JSON-like key the
    /// value may sit right against the `:`.
    fn c_ns_flow_map_adjacent_value(&mut self, n: i32, c: Context) -> Matched {
        self.backtrack(|p| {
            if !p.eat(':') {
                return Ok(false);
            }
            let valued = p.backtrack(|p| {
                p.opt(|p| p.s_separate(n, c))?;
                p.ns_flow_node(n, c)
            })?;
            if !valued {
                p.e_node()?;
            }
            Ok(true)
        })
    }

    // --- single-pair mappings ----------------------------------------------

    /// `ns-flow-pair(n,c)`: a `key: value` entry directly inside a flow
    /// sequence, read as a one-entry mapping.
    pub(crate) fn ns_flow_pair(&mut self, n: i32, c: Context) -> Matched {
        self.backtrack(|p| {
            let start = p.pos;
            if p.eat('?') {
                if !p.s_separate(n, c)? {
                    return Ok(false);
                }
                let map = p.begin_mapping(start);
                if !p.ns_flow_map_implicit_entry(n, c, map)? {
                    p.e_node()?;
                    let Some(key) = p.pending.value.take() else {
                        return Ok(false);
                    };
                    p.e_node()?;
                    let Some(value) = p.pending.value.take() else {
                        return Ok(false);
                    };
                    p.graph.push_entry(map, key, value);
                }
                p.graph.set_span_end(map, p.pos);
                p.pending.value = Some(map);
                return Ok(true);
            }
            p.ns_flow_pair_entry(n, c, start)
        })
    }

    /// `ns-flow-pair-entry(n,c)`: implicit single-line keys only.
    fn ns_flow_pair_entry(&mut self, n: i32, c: Context, start: usize) -> Matched {
        // YAML-style key
        let yaml = self.backtrack(|p| {
            if !p.ns_s_implicit_yaml_key(Context::FlowKey)? {
                return Ok(false);
            }
            let Some(key) = p.pending.value.take() else {
                return Ok(false);
            };
            if !p.c_ns_flow_map_separate_value(n, c)? {
                return Ok(false);
            }
            let Some(value) = p.pending.value.take() else {
                return Ok(false);
            };
            let map = p.begin_mapping(start);
            p.graph.push_entry(map, key, value);
            p.graph.set_span_end(map, p.pos);
            p.pending.value = Some(map);
            Ok(true)
        })?;
        if yaml {
            return Ok(true);
        }
        // empty key
        if self.peek() == u16::from(b':') {
            return self.backtrack(|p| {
                p.e_node()?;
                let Some(key) = p.pending.value.take() else {
                    return Ok(false);
                };
                if !p.c_ns_flow_map_separate_value(n, c)? {
                    return Ok(false);
                }
                let Some(value) = p.pending.value.take() else {
                    return Ok(false);
                };
                let map = p.begin_mapping(start);
                p.graph.push_entry(map, key, value);
                p.graph.set_span_end(map, p.pos);
                p.pending.value = Some(map);
                Ok(true)
            });
        }
        // JSON-style key
        self.backtrack(|p| {
            if !p.c_s_implicit_json_key(Context::FlowKey)? {
                return Ok(false);
            }
            let Some(key) = p.pending.value.take() else {
                return Ok(false);
            };
            if !p.c_ns_flow_map_adjacent_value(n, c)? {
                return Ok(false);
            }
            let Some(value) = p.pending.value.take() else {
                return Ok(false);
            };
            let map = p.begin_mapping(start);
            p.graph.push_entry(map, key, value);
            p.graph.set_span_end(map, p.pos);
            p.pending.value = Some(map);
            Ok(true)
        })
    }

    // --- implicit keys -----------------------------------------------------

    /// `ns-s-implicit-yaml-key(c)`: a single-line plain-style key of at
    /// most 1024 characters. Longer keys are fatal, shorter failures
    /// just refuse.
    pub(crate) fn ns_s_implicit_yaml_key(&mut self, c: Context) -> Matched {
        self.backtrack(|p| {
            let start = p.pos;
            if !p.ns_flow_yaml_node(0, c)? {
                return Ok(false);
            }
            let end = p.pos;
            while p.eat_if(chars::is_white) {}
            if p.peek() != u16::from(b':') {
                return Ok(false);
            }
            if end - start > 1024 {
                return Err(p.fail_at(ErrorKind::ImplicitKeyTooLong, start));
            }
            Ok(true)
        })
    }

    /// `c-s-implicit-json-key(c)`.
    pub(crate) fn c_s_implicit_json_key(&mut self, c: Context) -> Matched {
        self.backtrack(|p| {
            let start = p.pos;
            if !p.c_flow_json_node(0, c)? {
                return Ok(false);
            }
            let end = p.pos;
            while p.eat_if(chars::is_white) {}
            if p.peek() != u16::from(b':') {
                return Ok(false);
            }
            if end - start > 1024 {
                return Err(p.fail_at(ErrorKind::ImplicitKeyTooLong, start));
            }
            Ok(true)
        })
    }
}
