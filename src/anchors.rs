// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! The depth-stamped anchor table.
//!
//! Anchors defined during a speculative parse must vanish when the
//! production backtracks; plain scalars that look like flow keys are
//! routinely parsed twice. Every binding is stamped with the depth at
//! which it was added, and `rewind` trims everything at or above a saved
//! depth marker.

use crate::graph::NodeId;

#[derive(Debug, Default)]
pub(crate) struct AnchorTable {
    /// Append-only `(name, node, depth)` bindings.
    entries: Vec<(String, NodeId, usize)>,
    depth: usize,
}

impl AnchorTable {
    /// Record a binding at the current depth and advance the depth.
    /// Redefining a name is legal; `lookup` returns the newest binding.
    pub(crate) fn add(&mut self, name: String, node: NodeId) {
        self.entries.push((name, node, self.depth));
        self.depth += 1;
    }

    /// The most recent binding for `name`, if any.
    pub(crate) fn lookup(&self, name: &str) -> Option<NodeId> {
        self.entries
            .iter()
            .rev()
            .find(|(n, _, _)| n == name)
            .map(|(_, id, _)| *id)
    }

    /// The current depth marker, saved at every rewind point.
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Drop every binding whose depth is at or above `depth`.
    pub(crate) fn rewind(&mut self, depth: usize) {
        let keep = self.entries.partition_point(|(_, _, d)| *d < depth);
        self.entries.truncate(keep);
        self.depth = depth;
    }

    /// Forget all bindings; anchors are scoped to one document.
    pub(crate) fn reset(&mut self) {
        self.entries.clear();
        self.depth = 0;
    }
}

#[cfg(test)]
mod tests {
    use chumsky::span::Span as _;

    use super::*;
    use crate::graph::{Graph, Node, NodeKind};
    use crate::span::{Mark, Span};

    fn node(graph: &mut Graph, text: &str) -> NodeId {
        graph.push(Node {
            tag: crate::tags::STR.to_owned(),
            mark: Mark { line: 1, column: 1 },
            span: Span::new((), 0..0),
            kind: NodeKind::Scalar(text.to_owned()),
        })
    }

    #[test]
    fn test_lookup_returns_newest() {
        let mut graph = Graph::default();
        let first = node(&mut graph, "foo");
        let second = node(&mut graph, "bar");

        let mut anchors = AnchorTable::default();
        anchors.add("a".to_owned(), first);
        anchors.add("a".to_owned(), second);
        assert_eq!(anchors.lookup("a"), Some(second));
        assert_eq!(anchors.lookup("missing"), None);
    }

    #[test]
    fn test_rewind_trims_speculative_bindings() {
        let mut graph = Graph::default();
        let outer = node(&mut graph, "outer");
        let inner = node(&mut graph, "inner");

        let mut anchors = AnchorTable::default();
        anchors.add("keep".to_owned(), outer);
        let marker = anchors.depth();
        anchors.add("drop".to_owned(), inner);

        anchors.rewind(marker);
        assert_eq!(anchors.lookup("keep"), Some(outer));
        assert_eq!(anchors.lookup("drop"), None);
        assert_eq!(anchors.depth(), marker);
    }
}
