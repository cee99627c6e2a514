// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! The YAML grammar, production by production.
//!
//! Every rule is parameterised by the indentation level `n` and the
//! context `c`, mirroring the productions of YAML 1.2 (3rd Edition).
//! The rules drive the engine in `engine.rs`, consume the classes in
//! `chars.rs`, and build the representation graph through the node
//! hooks in this module. Scalars, flow collections and block
//! collections live in their own submodules.

mod block;
mod engine;
mod flow;
mod scalar;

pub(crate) use engine::Matched;

use chumsky::span::Span as _;
use log::debug;

use crate::anchors::AnchorTable;
use crate::chars;
use crate::error::{ErrorKind, ParseError, Warning};
use crate::graph::{Graph, Node, NodeId, NodeKind, Stream};
use crate::options::ParseOptions;
use crate::resolver::TagResolver;
use crate::span::{SourceMap, Span};
use crate::tags::{self, TagTable};

/// The context parameter `c`: which flavour of a production applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Context {
    BlockIn,
    BlockOut,
    FlowIn,
    FlowOut,
    BlockKey,
    FlowKey,
    /// Inside a folded block scalar's content lines.
    Folded,
}

impl Context {
    /// Whether flow indicators are unsafe in plain scalars here.
    pub(crate) fn in_flow(self) -> bool {
        matches!(self, Self::FlowIn | Self::FlowKey)
    }

    /// Whether this is one of the single-line key contexts, which are
    /// the speculative parse paths.
    pub(crate) fn is_key(self) -> bool {
        matches!(self, Self::BlockKey | Self::FlowKey)
    }

    /// `in-flow(c)`: the context for entries of a flow collection.
    pub(crate) fn in_flow_collection(self) -> Self {
        match self {
            Self::FlowOut | Self::FlowIn => Self::FlowIn,
            _ => Self::FlowKey,
        }
    }
}

/// The pending-property slot: everything a rewind point must capture
/// besides the cursor and scratch length.
///
/// `tag` holds the resolved tag IRI; `Some("")` marks the non-specific
/// `!`. `value` is the single most-recently-produced-node slot, not a
/// stack.
#[derive(Debug, Clone, Default)]
pub(crate) struct Pending {
    tag: Option<String>,
    anchor: Option<String>,
    value: Option<NodeId>,
}

/// All mutable parse state. One instance parses one input string.
pub(crate) struct Parser<'a> {
    /// The input as UTF-16 code units plus one `0x0000` sentinel, so
    /// classifiers may look one unit ahead without bounds checks.
    text: Vec<u16>,
    /// Input length, excluding the sentinel.
    len: usize,
    pos: usize,
    /// Decoded characters of the scalar currently being read.
    scratch: String,
    pending: Pending,
    anchors: AnchorTable,
    tags: TagTable,
    graph: Graph,
    roots: Vec<NodeId>,
    map: SourceMap,
    warnings: Vec<Warning>,
    options: &'a ParseOptions,
    /// Whether the current document already had a `%YAML` directive.
    yaml_directive_seen: bool,
    /// The deepest position any failed production reached, for error
    /// reporting. Never rewound.
    furthest: usize,
}

/// Parse a whole stream with the given options.
pub(crate) fn parse_stream(input: &str, options: &ParseOptions) -> Result<Stream, ParseError> {
    let mut parser = Parser::new(input, options);
    parser.l_yaml_stream()?;
    Ok(Stream {
        graph: parser.graph,
        roots: parser.roots,
        warnings: parser.warnings,
    })
}

impl<'a> Parser<'a> {
    fn new(input: &str, options: &'a ParseOptions) -> Self {
        let mut text: Vec<u16> = input.encode_utf16().collect();
        let len = text.len();
        text.push(0);
        let map = SourceMap::new(&text[..len]);
        Self {
            text,
            len,
            pos: 0,
            scratch: String::new(),
            pending: Pending::default(),
            anchors: AnchorTable::default(),
            tags: TagTable::default(),
            graph: Graph::default(),
            roots: Vec::new(),
            map,
            warnings: Vec::new(),
            options,
            yaml_directive_seen: false,
            furthest: 0,
        }
    }

    fn resolver(&self) -> &TagResolver {
        &self.options.resolver
    }

    // --- node hooks --------------------------------------------------------

    /// Materialise a scalar from the scratch buffer.
    ///
    /// Tag selection: an explicit tag wins; the non-specific `!` forces
    /// `!!str`; otherwise the style hint applies (`!!str` for quoted and
    /// block styles); otherwise the value is plain and the injected
    /// resolver decides; the fallback is `!!str`. The pending anchor
    /// attaches to the new node.
    fn create_scalar(&mut self, hint: Option<&str>, start: usize) {
        let value = std::mem::take(&mut self.scratch);
        let tag = match self.pending.tag.take() {
            Some(tag) if tag.is_empty() => tags::STR.to_owned(),
            Some(tag) => tag,
            None => match hint {
                Some(hint) => hint.to_owned(),
                None => self
                    .resolver()
                    .resolve(&value)
                    .unwrap_or(tags::STR)
                    .to_owned(),
            },
        };
        let id = self.graph.push(Node {
            tag,
            mark: self.mark_at(start),
            span: Span::new((), start..self.pos),
            kind: NodeKind::Scalar(value),
        });
        if let Some(name) = self.pending.anchor.take() {
            self.anchors.add(name, id);
        }
        self.pending.value = Some(id);
    }

    /// Create an empty collection node, consuming the pending tag and
    /// anchor. The anchor is registered before any child parses, so an
    /// anchored collection can contain aliases to itself.
    fn begin_collection(&mut self, kind: NodeKind, start: usize) -> NodeId {
        let default_tag = if matches!(kind, NodeKind::Sequence(_)) {
            tags::SEQ
        } else {
            tags::MAP
        };
        let tag = match self.pending.tag.take() {
            Some(tag) if !tag.is_empty() => tag,
            _ => default_tag.to_owned(),
        };
        let id = self.graph.push(Node {
            tag,
            mark: self.mark_at(start),
            span: Span::new((), start..start),
            kind,
        });
        if let Some(name) = self.pending.anchor.take() {
            self.anchors.add(name, id);
        }
        self.pending.value = Some(id);
        id
    }

    fn begin_sequence(&mut self, start: usize) -> NodeId {
        self.begin_collection(NodeKind::Sequence(Vec::new()), start)
    }

    fn begin_mapping(&mut self, start: usize) -> NodeId {
        self.begin_collection(NodeKind::Mapping(Vec::new()), start)
    }

    /// `e-scalar`: the empty scalar. Pending properties with no
    /// following node attach here.
    fn e_scalar(&mut self) -> Matched {
        self.create_scalar(None, self.pos);
        Ok(true)
    }

    fn e_node(&mut self) -> Matched {
        self.e_scalar()
    }

    /// Fatal when the byte order mark appears between tokens inside a
    /// document.
    fn forbid_bom(&mut self) -> Result<(), ParseError> {
        if self.peek() == chars::BOM {
            Err(self.fail(ErrorKind::BomInDocument))
        } else {
            Ok(())
        }
    }

    // --- indentation and separation ----------------------------------------

    /// `s-indent(n)`: exactly `n` spaces.
    fn s_indent(&mut self, n: i32) -> Matched {
        if n <= 0 {
            return Ok(true);
        }
        self.repeat_n(n as usize, |p| Ok(p.eat_if(chars::is_space)))
    }

    /// `s-indent(<n)`: fewer than `n` spaces.
    fn s_indent_lt(&mut self, n: i32) -> Matched {
        let max = usize::try_from(n - 1).unwrap_or(0);
        self.repeat_range(0, max, |p| Ok(p.eat_if(chars::is_space)))
    }

    /// `s-indent(<=n)`.
    fn s_indent_le(&mut self, n: i32) -> Matched {
        let max = usize::try_from(n).unwrap_or(0);
        self.repeat_range(0, max, |p| Ok(p.eat_if(chars::is_space)))
    }

    /// `s-separate-in-line`: white space, or the start of a line.
    fn s_separate_in_line(&mut self) -> Matched {
        if self.eat_if(chars::is_white) {
            while self.eat_if(chars::is_white) {}
            Ok(true)
        } else {
            Ok(self.start_of_line())
        }
    }

    /// `s-line-prefix(n,c)`.
    fn s_line_prefix(&mut self, n: i32, c: Context) -> Matched {
        match c {
            Context::FlowOut | Context::FlowIn | Context::FlowKey => self.s_flow_line_prefix(n),
            _ => self.s_indent(n),
        }
    }

    /// `s-flow-line-prefix(n)`: the indentation plus optional further
    /// white space.
    fn s_flow_line_prefix(&mut self, n: i32) -> Matched {
        if !self.s_indent(n)? {
            return Ok(false);
        }
        while self.eat_if(chars::is_white) {}
        Ok(true)
    }

    /// `l-empty(n,c)`: an empty line, contributing one line feed to the
    /// scalar under construction.
    fn l_empty(&mut self, n: i32, c: Context) -> Matched {
        self.backtrack(|p| {
            if !p.backtrack(|p| p.s_line_prefix(n, c))? {
                p.s_indent_lt(n)?;
            }
            p.b_as_line_feed()
        })
    }

    /// `b-as-line-feed`: a break that is scalar content.
    fn b_as_line_feed(&mut self) -> Matched {
        match self.eat_break() {
            Some(raw) => {
                self.scratch_push_break(raw);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// `b-non-content`: a break that is not content.
    fn b_non_content(&mut self) -> Matched {
        Ok(self.eat_break().is_some())
    }

    /// `b-l-folded(n,c)`: a break and trailing empty lines become line
    /// feeds; a lone break becomes a space.
    fn b_l_folded(&mut self, n: i32, c: Context) -> Matched {
        let trimmed = self.backtrack(|p| {
            if p.eat_break().is_none() {
                return Ok(false);
            }
            p.plus(|p| p.l_empty(n, c))
        })?;
        if trimmed {
            return Ok(true);
        }
        match self.eat_break() {
            Some(_) => {
                self.scratch_push(' ');
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// `s-flow-folded(n)`: folding inside flow scalars. Refuses to fold
    /// onto a document-marker line.
    fn s_flow_folded(&mut self, n: i32) -> Matched {
        self.backtrack(|p| {
            while p.eat_if(chars::is_white) {}
            if !p.b_l_folded(n, Context::FlowIn)? {
                return Ok(false);
            }
            if !p.s_flow_line_prefix(n)? {
                return Ok(false);
            }
            Ok(!p.at_document_marker())
        })
    }

    // --- comments ----------------------------------------------------------

    /// `c-nb-comment-text`.
    fn c_nb_comment_text(&mut self) -> Matched {
        if !self.eat('#') {
            return Ok(false);
        }
        while self.eat_class(chars::nb_char) > 0 {}
        Ok(true)
    }

    /// `b-comment`: a break or the end of input.
    fn b_comment(&mut self) -> Matched {
        if self.at_end() {
            return Ok(true);
        }
        self.b_non_content()
    }

    /// `s-b-comment`: optional trailing comment, then end of line.
    fn s_b_comment(&mut self) -> Matched {
        self.backtrack(|p| {
            p.opt(|p| {
                if !p.s_separate_in_line()? {
                    return Ok(false);
                }
                p.opt(|p| p.c_nb_comment_text())?;
                Ok(true)
            })?;
            p.b_comment()
        })
    }

    /// `l-comment`: a whole comment (or blank) line.
    fn l_comment(&mut self) -> Matched {
        self.backtrack(|p| {
            if !p.s_separate_in_line()? {
                return Ok(false);
            }
            p.opt(|p| p.c_nb_comment_text())?;
            p.b_comment()
        })
    }

    /// `s-l-comments`: end of line, then any number of comment lines.
    fn s_l_comments(&mut self) -> Matched {
        if !(self.s_b_comment()? || self.start_of_line()) {
            return Ok(false);
        }
        self.star(|p| p.l_comment())
    }

    /// `s-separate(n,c)`.
    fn s_separate(&mut self, n: i32, c: Context) -> Matched {
        if c.is_key() {
            self.s_separate_in_line()
        } else {
            self.s_separate_lines(n)
        }
    }

    /// `s-separate-lines(n)`: comments and a fresh line prefix, or
    /// in-line white space.
    fn s_separate_lines(&mut self, n: i32) -> Matched {
        let folded = self.backtrack(|p| {
            if !p.s_l_comments()? {
                return Ok(false);
            }
            p.s_flow_line_prefix(n)
        })?;
        if folded {
            return Ok(true);
        }
        self.s_separate_in_line()
    }

    // --- node properties ---------------------------------------------------

    /// `c-ns-properties(n,c)`: a tag and an anchor, in either order.
    /// Both are buffered in the pending slot for the next node hook.
    fn c_ns_properties(&mut self, n: i32, c: Context) -> Matched {
        if self.c_ns_tag_property()? {
            self.opt(|p| {
                if !p.s_separate(n, c)? {
                    return Ok(false);
                }
                p.c_ns_anchor_property()
            })?;
            return Ok(true);
        }
        if self.c_ns_anchor_property()? {
            self.opt(|p| {
                if !p.s_separate(n, c)? {
                    return Ok(false);
                }
                p.c_ns_tag_property()
            })?;
            return Ok(true);
        }
        Ok(false)
    }

    /// `c-ns-tag-property`: verbatim `!<...>`, a shorthand, or the
    /// non-specific `!`.
    fn c_ns_tag_property(&mut self) -> Matched {
        if self.peek() != u16::from(b'!') {
            return Ok(false);
        }
        let start = self.pos;

        // Verbatim tag: bypasses the prefix table entirely.
        if self.peek_at(1) == u16::from(b'<') {
            self.pos += 2;
            let uri_start = self.pos;
            while self.ns_uri_char()? {}
            let uri = self.capture(uri_start);
            if !self.eat('>') || uri.is_empty() || uri == "!" {
                return Err(self.fail_at(ErrorKind::IllegalVerbatimTag, start));
            }
            self.note_tag_shape(&uri, start);
            self.pending.tag = Some(uri);
            return Ok(true);
        }

        // Shorthand with a named or secondary handle: `!...!suffix`.
        let checkpoint = self.checkpoint();
        self.pos += 1;
        let word_start = self.pos;
        while self.eat_if(chars::is_word_char) {}
        let word_end = self.pos;
        if self.eat('!') {
            let suffix_start = self.pos;
            while self.ns_tag_char()? {}
            if self.pos > suffix_start {
                let handle = format!("!{}!", self.capture_range(word_start, word_end));
                let suffix = self.capture_range(suffix_start, self.pos);
                let mark = self.mark_at(start);
                let tag = self.tags.resolve(&handle, &suffix, mark)?;
                self.note_tag_shape(&tag, start);
                self.pending.tag = Some(tag);
                return Ok(true);
            }
        }
        self.restore(checkpoint);

        // Primary handle `!suffix`, or the bare non-specific `!`.
        self.pos += 1;
        let suffix_start = self.pos;
        while self.ns_tag_char()? {}
        if self.pos > suffix_start {
            let suffix = self.capture_range(suffix_start, self.pos);
            let mark = self.mark_at(start);
            let tag = self.tags.resolve("!", &suffix, mark)?;
            self.pending.tag = Some(tag);
        } else {
            self.pending.tag = Some(String::new());
        }
        Ok(true)
    }

    /// Warn on a global tag that is neither an RFC 4151 tag URI nor a
    /// URI with a scheme.
    fn note_tag_shape(&mut self, tag: &str, pos: usize) {
        if !tags::is_well_formed(tag) {
            self.warn_at(format!("invalid global tag (RFC 4151): '{tag}'"), pos);
        }
    }

    /// `c-ns-anchor-property`: `&name`.
    fn c_ns_anchor_property(&mut self) -> Matched {
        self.backtrack(|p| {
            if !p.eat('&') {
                return Ok(false);
            }
            let start = p.pos;
            while p.eat_class(chars::ns_anchor_char) > 0 {}
            if p.pos == start {
                return Ok(false);
            }
            p.pending.anchor = Some(p.capture(start));
            Ok(true)
        })
    }

    /// `ns-uri-char`: `%` hex hex, or a URI character.
    fn ns_uri_char(&mut self) -> Matched {
        if self.peek() == u16::from(b'%') {
            return self.backtrack(|p| {
                p.pos += 1;
                Ok(p.eat_if(chars::is_hex_digit) && p.eat_if(chars::is_hex_digit))
            });
        }
        Ok(self.eat_if(chars::is_uri_char_sub))
    }

    /// `ns-tag-char`: `%` hex hex, or a tag character.
    fn ns_tag_char(&mut self) -> Matched {
        if self.peek() == u16::from(b'%') {
            return self.backtrack(|p| {
                p.pos += 1;
                Ok(p.eat_if(chars::is_hex_digit) && p.eat_if(chars::is_hex_digit))
            });
        }
        Ok(self.eat_if(chars::is_tag_char_sub))
    }

    // --- directives --------------------------------------------------------

    /// `l-directive`: `%YAML`, `%TAG`, or a reserved directive, each
    /// terminated by end of line.
    fn l_directive(&mut self) -> Matched {
        if self.peek() != u16::from(b'%') || !self.start_of_line() {
            return Ok(false);
        }
        let start = self.pos;
        self.pos += 1;
        let name_start = self.pos;
        while self.eat_class(chars::ns_char) > 0 {}
        let name = self.capture(name_start);
        match name.as_str() {
            "YAML" => self.ns_yaml_directive(start)?,
            "TAG" => self.ns_tag_directive(start)?,
            _ => self.ns_reserved_directive(start, &name)?,
        }
        if !self.s_l_comments()? {
            return Err(self.fail(ErrorKind::InvalidDirective(format!(
                "unexpected content after %{name}"
            ))));
        }
        Ok(true)
    }

    /// `%YAML version`: non-1.2 warns, a duplicate in one document is
    /// fatal.
    fn ns_yaml_directive(&mut self, start: usize) -> Result<(), ParseError> {
        if self.yaml_directive_seen {
            return Err(self.fail_at(ErrorKind::DuplicateYamlDirective, start));
        }
        self.yaml_directive_seen = true;
        if !self.s_separate_in_line()? {
            return Err(self.fail(ErrorKind::InvalidDirective("%YAML needs a version".into())));
        }
        let version_start = self.pos;
        let well_formed = self.plus(|p| Ok(p.eat_if(chars::is_dec_digit)))?
            && self.eat('.')
            && self.plus(|p| Ok(p.eat_if(chars::is_dec_digit)))?;
        if !well_formed {
            return Err(self.fail_at(
                ErrorKind::InvalidDirective("%YAML version must be digits '.' digits".into()),
                version_start,
            ));
        }
        let version = self.capture(version_start);
        debug!("%YAML directive, version {version}");
        if version != "1.2" {
            self.warn_at(format!("YAML version {version} is not 1.2; parsing as 1.2"), start);
        }
        Ok(())
    }

    /// `%TAG handle prefix`: installs a prefix; a duplicate handle is
    /// fatal.
    fn ns_tag_directive(&mut self, start: usize) -> Result<(), ParseError> {
        if !self.s_separate_in_line()? {
            return Err(self.fail(ErrorKind::InvalidDirective("%TAG needs a handle".into())));
        }
        let handle = self.c_tag_handle()?.ok_or_else(|| {
            self.fail(ErrorKind::InvalidDirective("%TAG handle must look like !word*!".into()))
        })?;
        if !self.s_separate_in_line()? {
            return Err(self.fail(ErrorKind::InvalidDirective("%TAG needs a prefix".into())));
        }
        let prefix = self.ns_tag_prefix()?.ok_or_else(|| {
            self.fail(ErrorKind::InvalidDirective("%TAG prefix is not a valid tag or URI".into()))
        })?;
        debug!("%TAG directive, {handle} -> {prefix}");
        let mark = self.mark_at(start);
        self.tags.add(&handle, &prefix, mark)?;
        Ok(())
    }

    /// `c-tag-handle` in directive position: `!`, `!!` or `!word*!`.
    fn c_tag_handle(&mut self) -> Result<Option<String>, ParseError> {
        if !self.eat('!') {
            return Ok(None);
        }
        let word_start = self.pos;
        while self.eat_if(chars::is_word_char) {}
        if self.peek() == u16::from(b'!') {
            let words = self.capture(word_start);
            self.pos += 1;
            Ok(Some(format!("!{words}!")))
        } else {
            self.pos = word_start;
            Ok(Some("!".to_owned()))
        }
    }

    /// `ns-tag-prefix`: a local prefix `!...` or a global prefix.
    fn ns_tag_prefix(&mut self) -> Result<Option<String>, ParseError> {
        let start = self.pos;
        if self.eat('!') {
            while self.ns_uri_char()? {}
            return Ok(Some(self.capture(start)));
        }
        if !self.ns_tag_char()? {
            return Ok(None);
        }
        while self.ns_uri_char()? {}
        Ok(Some(self.capture(start)))
    }

    /// A reserved directive: collected for the warning, otherwise
    /// ignored.
    fn ns_reserved_directive(&mut self, start: usize, name: &str) -> Result<(), ParseError> {
        let mut params = String::new();
        loop {
            let checkpoint = self.checkpoint();
            if !self.s_separate_in_line()? || self.peek() == u16::from(b'#') {
                self.restore(checkpoint);
                break;
            }
            let param_start = self.pos;
            while self.eat_class(chars::ns_char) > 0 {}
            if self.pos == param_start {
                self.restore(checkpoint);
                break;
            }
            params.push(' ');
            params.push_str(&self.capture(param_start));
        }
        self.warn_at(format!("unknown directive %{name}{params}"), start);
        Ok(())
    }

    // --- document framing --------------------------------------------------

    fn at_marker(&self, marker: u8) -> bool {
        if !self.start_of_line() {
            return false;
        }
        let unit = u16::from(marker);
        if self.peek() != unit || self.peek_at(1) != unit || self.peek_at(2) != unit {
            return false;
        }
        let after = self.peek_at(3);
        self.pos + 3 >= self.len || chars::is_white(after) || chars::is_break(after)
    }

    fn at_directives_end(&self) -> bool {
        self.at_marker(b'-')
    }

    fn at_document_end(&self) -> bool {
        self.at_marker(b'.')
    }

    /// Reset per-document state: the tag table gets its defaults back,
    /// anchors go out of scope, and `%YAML` may appear again.
    fn begin_document(&mut self) {
        self.tags.reset();
        self.anchors.reset();
        self.yaml_directive_seen = false;
    }

    /// `l-document-prefix`: byte order marks and comment lines between
    /// documents.
    fn l_document_prefix(&mut self) -> Matched {
        loop {
            let before = self.pos;
            if self.peek() == chars::BOM {
                self.pos += 1;
            }
            self.star(|p| p.l_comment())?;
            if self.pos == before {
                return Ok(true);
            }
        }
    }

    /// `l-document-suffix`: `...` and its trailing comments.
    fn l_document_suffix(&mut self) -> Matched {
        self.backtrack(|p| {
            if !p.at_document_end() {
                return Ok(false);
            }
            p.pos += 3;
            p.s_l_comments()
        })
    }

    /// `l-bare-document`: a whole block node at the virtual indentation
    /// level -1.
    fn l_bare_document(&mut self) -> Matched {
        if !self.backtrack(|p| p.s_l_block_node(-1, Context::BlockIn))? {
            return Ok(false);
        }
        let Some(root) = self.pending.value.take() else {
            return Ok(false);
        };
        self.roots.push(root);
        Ok(true)
    }

    /// `l-explicit-document`: `---` followed by a document or nothing.
    fn l_explicit_document(&mut self) -> Matched {
        if !self.at_directives_end() {
            return Ok(false);
        }
        self.pos += 3;
        debug!("document start marker at {}", self.mark_at(self.pos - 3));
        if self.l_bare_document()? {
            return Ok(true);
        }
        // An empty explicit document is a single null root.
        self.e_node()?;
        let Some(root) = self.pending.value.take() else {
            return Ok(false);
        };
        self.roots.push(root);
        if !self.s_l_comments()? {
            return Err(self.fail(ErrorKind::UnexpectedContent));
        }
        Ok(true)
    }

    /// `l-directive-document`: one or more directives, then an explicit
    /// document.
    fn l_directive_document(&mut self) -> Matched {
        if !self.l_directive()? {
            return Ok(false);
        }
        while self.l_directive()? {}
        if !self.l_explicit_document()? {
            return Err(self.fail(ErrorKind::InvalidDirective(
                "directives must be followed by '---'".into(),
            )));
        }
        Ok(true)
    }

    /// `l-any-document`.
    fn l_any_document(&mut self) -> Matched {
        if self.l_directive_document()? {
            return Ok(true);
        }
        if self.l_explicit_document()? {
            return Ok(true);
        }
        self.l_bare_document()
    }

    /// `l-yaml-stream`: the entry production.
    fn l_yaml_stream(&mut self) -> Matched {
        debug!("parsing YAML stream of {} code units", self.len);
        self.l_document_prefix()?;
        // A bare document is only allowed at the stream start and after
        // an explicit `...`; elsewhere a new document needs `---`.
        let mut bare_allowed = true;
        loop {
            if self.at_end() {
                break;
            }
            if self.l_document_suffix()? {
                self.l_document_prefix()?;
                bare_allowed = true;
                continue;
            }
            self.begin_document();
            let parsed = if bare_allowed {
                self.l_any_document()?
            } else {
                self.l_directive_or_explicit()?
            };
            if !parsed {
                let at = self.furthest.max(self.pos);
                if self.text.get(at).copied() == Some(chars::BOM) {
                    return Err(self.fail_at(ErrorKind::BomInDocument, at));
                }
                self.forbid_bom()?;
                return Err(self.fail_at(ErrorKind::UnexpectedContent, at));
            }
            debug!("document {} complete", self.roots.len());
            bare_allowed = false;
            self.l_document_prefix()?;
        }
        Ok(true)
    }

    /// After a document with no `...` suffix, only an explicit `---`
    /// document may follow; directives here are an error.
    fn l_directive_or_explicit(&mut self) -> Matched {
        if self.peek() == u16::from(b'%') && self.start_of_line() {
            return Err(self.fail(ErrorKind::InvalidDirective(
                "directives require a preceding '...' document end".into(),
            )));
        }
        self.l_explicit_document()
    }
}
