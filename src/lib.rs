// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! A YAML 1.2 parser producing a representation graph.
//!
//! This crate parses a YAML character stream into a graph of
//! representation nodes (scalars, sequences, mappings) with anchors,
//! aliases and tags fully resolved:
//! - Aliases share their anchor's node, so the graph may contain
//!   cycles (`&a [*a]`); nodes live in an arena and are addressed by
//!   [`NodeId`], which makes shared and cyclic structure safe to hold.
//! - Every node carries a resolved tag IRI and the 1-based source
//!   position of its first character.
//! - Plain scalars are typed by a configurable, data-driven
//!   [`TagResolver`] (core schema by default).
//!
//! Fatal errors abort the parse; non-fatal findings are returned as
//! deduplicated warnings next to the documents.
//!
//! # Example
//!
//! ```
//! use yaml_graph::{parse, NodeKind};
//!
//! let input = "\
//! name: John
//! age: 30
//! ";
//!
//! let stream = parse(input)?;
//! assert!(stream.warnings.is_empty());
//! let root = stream.root(0).expect("one document");
//! if let NodeKind::Mapping(entries) = &root.kind {
//!     assert_eq!(entries.len(), 2);
//! }
//! let age = stream.graph.mapping_get(stream.roots[0], "age").unwrap();
//! assert_eq!(stream.graph[age].tag, "tag:yaml.org,2002:int");
//! # Ok::<(), yaml_graph::ParseError>(())
//! ```

mod anchors;
mod chars;
mod error;
mod graph;
mod options;
mod parser;
mod resolver;
mod span;
pub mod tags;

pub use error::{ErrorKind, ParseError, Warning};
pub use graph::{Graph, Node, NodeId, NodeKind, Stream};
pub use options::{LineBreak, ParseOptions};
pub use resolver::TagResolver;
pub use span::{Mark, SourceMap, Span};

/// Parse a YAML stream with the default options.
///
/// Returns the representation graph with one root per document plus
/// any warnings, or the first fatal error.
///
/// # Errors
///
/// Any fatal condition aborts the whole parse: malformed syntax,
/// duplicate `%YAML` directives or `%TAG` handles, unknown anchors,
/// tabs used for block indentation, a byte order mark inside a
/// document, over-long implicit keys, and the other cases listed on
/// [`ErrorKind`]. No partial result is returned.
pub fn parse(input: &str) -> Result<Stream, ParseError> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse a YAML stream with explicit [`ParseOptions`].
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Stream, ParseError> {
    parser::parse_stream(input, options)
}

#[cfg(test)]
mod tests;
