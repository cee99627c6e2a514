// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Parser behavior tests.

use crate::graph::{Node, NodeId, Stream};
use crate::{parse, parse_with_options, ErrorKind, LineBreak, ParseOptions, TagResolver};

fn ok(input: &str) -> Stream {
    match parse(input) {
        Ok(stream) => stream,
        Err(err) => panic!("parse failed: {err}\ninput: {input:?}"),
    }
}

fn root(stream: &Stream) -> &Node {
    &stream.graph[stream.roots[0]]
}

fn text(stream: &Stream, id: NodeId) -> &str {
    stream.graph[id].as_str().expect("scalar node")
}

// --- scalars ---------------------------------------------------------------

#[test]
fn test_empty_input() {
    let stream = ok("");
    assert!(stream.roots.is_empty());
    assert!(stream.warnings.is_empty());
}

#[test]
fn test_plain_scalar() {
    let stream = ok("hello");
    assert_eq!(root(&stream).as_str(), Some("hello"));
    assert_eq!(root(&stream).tag, "tag:yaml.org,2002:str");
}

#[test]
fn test_resolver_typed_scalars() {
    for (input, tag) in [
        ("42", "tag:yaml.org,2002:int"),
        ("0x1F", "tag:yaml.org,2002:int"),
        ("3.14", "tag:yaml.org,2002:float"),
        ("true", "tag:yaml.org,2002:bool"),
        ("~", "tag:yaml.org,2002:null"),
        ("2024-01-15", "tag:yaml.org,2002:timestamp"),
        ("hello", "tag:yaml.org,2002:str"),
    ] {
        let stream = ok(input);
        assert_eq!(root(&stream).tag, tag, "input {input:?}");
    }
}

#[test]
fn test_custom_resolver() {
    let resolver = TagResolver::empty()
        .with_rule("tag:example.com,2024:id", "^id-[0-9]+$")
        .unwrap();
    let options = ParseOptions::default().resolver(resolver);
    let stream = parse_with_options("id-17", &options).unwrap();
    assert_eq!(root(&stream).tag, "tag:example.com,2024:id");
    // No null rule in this resolver: empty scalars are strings.
    let stream = parse_with_options("a:", &options).unwrap();
    let value = stream.graph.mapping_get(stream.roots[0], "a").unwrap();
    assert_eq!(stream.graph[value].tag, "tag:yaml.org,2002:str");
}

#[test]
fn test_multiline_plain_folds() {
    let stream = ok("a: b\n  c\n");
    let value = stream.graph.mapping_get(stream.roots[0], "a").unwrap();
    assert_eq!(text(&stream, value), "b c");
}

#[test]
fn test_single_quoted() {
    let stream = ok("'it''s'");
    assert_eq!(root(&stream).as_str(), Some("it's"));
    assert_eq!(root(&stream).tag, "tag:yaml.org,2002:str");
}

#[test]
fn test_single_quoted_fold() {
    let stream = ok("'a\nb'");
    assert_eq!(root(&stream).as_str(), Some("a b"));
}

#[test]
fn test_double_quoted_escapes() {
    let stream = ok(r#""a\tb\n\x41\u00e9""#);
    assert_eq!(root(&stream).as_str(), Some("a\tb\nA\u{e9}"));
}

#[test]
fn test_double_quoted_long_escape_surrogates() {
    // \U covers the supplementary plane directly.
    let stream = ok(r#""\U0001F600""#);
    assert_eq!(root(&stream).as_str(), Some("\u{1F600}"));
    // A \u surrogate pair combines into one code point.
    let stream = ok(r#""\uD83D\uDE00""#);
    assert_eq!(root(&stream).as_str(), Some("\u{1F600}"));
}

#[test]
fn test_quoted_scalar_is_never_resolved() {
    let stream = ok("\"42\"");
    assert_eq!(root(&stream).tag, "tag:yaml.org,2002:str");
    assert_eq!(root(&stream).as_str(), Some("42"));
}

#[test]
fn test_supplementary_plane_in_plain_scalar() {
    let stream = ok("a: \u{1F600}x");
    let value = stream.graph.mapping_get(stream.roots[0], "a").unwrap();
    assert_eq!(text(&stream, value), "\u{1F600}x");
}

// --- block scalars ---------------------------------------------------------

#[test]
fn test_literal_strip() {
    let stream = ok("|-\n  line1\n  line2\n");
    assert_eq!(root(&stream).as_str(), Some("line1\nline2"));
    assert_eq!(root(&stream).tag, "tag:yaml.org,2002:str");
}

#[test]
fn test_literal_clip_and_keep() {
    let stream = ok("|\n  a\n\n\n");
    assert_eq!(root(&stream).as_str(), Some("a\n"));

    let stream = ok("|+\n  a\n\n");
    assert_eq!(root(&stream).as_str(), Some("a\n\n"));
}

#[test]
fn test_literal_leading_blank_line() {
    let stream = ok("|\n\n  a\n");
    assert_eq!(root(&stream).as_str(), Some("\na\n"));
}

#[test]
fn test_literal_explicit_indent() {
    let stream = ok("a: |2\n   b\n");
    // The third space is beyond the indicated indentation: content.
    let value = stream.graph.mapping_get(stream.roots[0], "a").unwrap();
    assert_eq!(text(&stream, value), " b\n");
}

#[test]
fn test_folded_with_more_indented_line() {
    let stream = ok(">\n  one\n  two\n    indented\n  three\n");
    assert_eq!(root(&stream).as_str(), Some("one two\n  indented\nthree\n"));
}

#[test]
fn test_folded_blank_line_between_paragraphs() {
    let stream = ok(">\n  one\n\n  two\n");
    assert_eq!(root(&stream).as_str(), Some("one\ntwo\n"));
}

#[test]
fn test_folded_keep_warns() {
    let stream = ok(">+\n  a\n");
    assert_eq!(root(&stream).as_str(), Some("a\n"));
    assert_eq!(stream.warnings.len(), 1);
    assert!(stream.warnings[0].message.contains(">+"));
}

#[test]
fn test_block_scalar_in_mapping() {
    let stream = ok("log: |\n  first\n  second\nnext: 1\n");
    let log = stream.graph.mapping_get(stream.roots[0], "log").unwrap();
    assert_eq!(text(&stream, log), "first\nsecond\n");
    assert!(stream.graph.mapping_get(stream.roots[0], "next").is_some());
}

// --- collections -----------------------------------------------------------

#[test]
fn test_block_sequence() {
    let stream = ok("- a\n- b\n- c\n");
    let items = root(&stream).items().expect("sequence");
    assert_eq!(items.len(), 3);
    assert_eq!(text(&stream, items[1]), "b");
    assert_eq!(root(&stream).tag, "tag:yaml.org,2002:seq");
}

#[test]
fn test_nested_block_mapping() {
    let stream = ok("outer:\n  inner: 1\n  other: 2\n");
    let outer = stream.graph.mapping_get(stream.roots[0], "outer").unwrap();
    assert_eq!(stream.graph[outer].entries().unwrap().len(), 2);
}

#[test]
fn test_sequence_under_mapping_key() {
    let stream = ok("items:\n- a\n- b\n");
    let items = stream.graph.mapping_get(stream.roots[0], "items").unwrap();
    assert_eq!(stream.graph[items].items().unwrap().len(), 2);
}

#[test]
fn test_compact_nested_sequence() {
    let stream = ok("- - a\n  - b\n- c\n");
    let items = root(&stream).items().expect("sequence");
    assert_eq!(items.len(), 2);
    assert_eq!(stream.graph[items[0]].items().unwrap().len(), 2);
}

#[test]
fn test_compact_mapping_in_sequence_entry() {
    let stream = ok("- a: 1\n  b: 2\n");
    let items = root(&stream).items().expect("sequence");
    assert_eq!(items.len(), 1);
    assert_eq!(stream.graph[items[0]].entries().unwrap().len(), 2);
}

#[test]
fn test_flow_sequence() {
    let stream = ok("[1, 2, 3]");
    let items = root(&stream).items().expect("sequence");
    assert_eq!(items.len(), 3);
    assert_eq!(stream.graph[items[0]].tag, "tag:yaml.org,2002:int");
}

#[test]
fn test_flow_mapping() {
    let stream = ok("{a: 1, b: 2}");
    assert_eq!(root(&stream).entries().unwrap().len(), 2);
}

#[test]
fn test_empty_flow_collections() {
    let stream = ok("[]");
    assert_eq!(root(&stream).items().unwrap().len(), 0);
    let stream = ok("{}");
    assert_eq!(root(&stream).entries().unwrap().len(), 0);
}

#[test]
fn test_flow_pair_in_sequence() {
    let stream = ok("[a: b, c]");
    let items = root(&stream).items().expect("sequence");
    assert_eq!(items.len(), 2);
    let pair = &stream.graph[items[0]];
    assert_eq!(pair.entries().unwrap().len(), 1);
    assert_eq!(text(&stream, items[1]), "c");
}

#[test]
fn test_explicit_block_key() {
    let stream = ok("? a\n: b\n");
    let entries = root(&stream).entries().expect("mapping");
    assert_eq!(entries.len(), 1);
    assert_eq!(text(&stream, entries[0].0), "a");
    assert_eq!(text(&stream, entries[0].1), "b");
}

#[test]
fn test_explicit_key_without_value() {
    let stream = ok("? a\n? b\n");
    let entries = root(&stream).entries().expect("mapping");
    assert_eq!(entries.len(), 2);
    assert_eq!(stream.graph[entries[0].1].tag, "tag:yaml.org,2002:null");
}

#[test]
fn test_missing_value_is_null() {
    let stream = ok("a:\nb: 1\n");
    let a = stream.graph.mapping_get(stream.roots[0], "a").unwrap();
    assert_eq!(stream.graph[a].tag, "tag:yaml.org,2002:null");
}

#[test]
fn test_comments_are_skipped() {
    let stream = ok("# header\na: b # trailing\n# footer\n");
    let value = stream.graph.mapping_get(stream.roots[0], "a").unwrap();
    assert_eq!(text(&stream, value), "b");
}

// --- anchors, aliases, tags ------------------------------------------------

#[test]
fn test_anchor_alias_shares_node() {
    let stream = ok("a: &x 1\nb: *x\n");
    let a = stream.graph.mapping_get(stream.roots[0], "a").unwrap();
    let b = stream.graph.mapping_get(stream.roots[0], "b").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_anchor_redefinition_resolves_to_newest() {
    let stream = ok("a: &anchor foo\nc: *anchor\nb: &anchor bar\nd: *anchor\n");
    let entries = root(&stream).entries().expect("mapping");
    assert_eq!(entries.len(), 4);
    let (a, c, b, d) = (entries[0].1, entries[1].1, entries[2].1, entries[3].1);
    assert_eq!(a, c);
    assert_eq!(b, d);
    assert_ne!(a, b);
    assert_eq!(text(&stream, c), "foo");
    assert_eq!(text(&stream, d), "bar");
}

#[test]
fn test_cyclic_alias() {
    let stream = ok("&a [*a]");
    let items = root(&stream).items().expect("sequence");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0], stream.roots[0]);
}

#[test]
fn test_anchored_scalar_in_sequence() {
    let stream = ok("- &x a\n- *x\n");
    let items = root(&stream).items().unwrap();
    assert_eq!(items[0], items[1]);
}

#[test]
fn test_non_specific_tag_forces_str() {
    let stream = ok("! 123");
    assert_eq!(root(&stream).tag, "tag:yaml.org,2002:str");
    assert_eq!(root(&stream).as_str(), Some("123"));
}

#[test]
fn test_secondary_tag_shorthand() {
    let stream = ok("!!str 123");
    assert_eq!(root(&stream).tag, "tag:yaml.org,2002:str");
}

#[test]
fn test_verbatim_tag() {
    let stream = ok("!<tag:example.com,2024:foo> x");
    assert_eq!(root(&stream).tag, "tag:example.com,2024:foo");
}

#[test]
fn test_tag_directive_expands_handle() {
    let stream = ok("%TAG !e! tag:example.com,2024:\n---\n!e!point [1, 2]\n");
    assert_eq!(root(&stream).tag, "tag:example.com,2024:point");
    let items = root(&stream).items().expect("sequence");
    assert_eq!(stream.graph[items[0]].tag, "tag:yaml.org,2002:int");
    assert_eq!(stream.graph[items[1]].tag, "tag:yaml.org,2002:int");
    assert!(stream.warnings.is_empty());
}

#[test]
fn test_properties_without_node_attach_to_empty_scalar() {
    let stream = ok("--- &a\n");
    assert_eq!(root(&stream).as_str(), Some(""));
}

#[test]
fn test_anchors_do_not_cross_documents() {
    let err = parse("&a x\n---\n*a\n").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownAnchor(_)));
}

// --- documents -------------------------------------------------------------

#[test]
fn test_lone_document_start_is_null() {
    let stream = ok("---");
    assert_eq!(stream.roots.len(), 1);
    assert_eq!(root(&stream).tag, "tag:yaml.org,2002:null");
    assert_eq!(root(&stream).as_str(), Some(""));
    assert!(stream.warnings.is_empty());
}

#[test]
fn test_document_end_without_document() {
    let stream = ok("...\n");
    assert!(stream.roots.is_empty());
}

#[test]
fn test_multiple_documents() {
    let stream = ok("---\na\n---\nb\n");
    assert_eq!(stream.roots.len(), 2);
    assert_eq!(stream.graph[stream.roots[0]].as_str(), Some("a"));
    assert_eq!(stream.graph[stream.roots[1]].as_str(), Some("b"));
}

#[test]
fn test_bare_document_then_explicit() {
    let stream = ok("a: 1\n---\nb: 2\n");
    assert_eq!(stream.roots.len(), 2);
}

#[test]
fn test_document_suffix_allows_directives() {
    let stream = ok("a\n...\n%TAG !e! tag:example.com,2024:\n---\n!e!x b\n");
    assert_eq!(stream.roots.len(), 2);
    assert_eq!(stream.graph[stream.roots[1]].tag, "tag:example.com,2024:x");
}

#[test]
fn test_plain_scalar_stops_at_document_marker() {
    let stream = ok("a\n---\nb\n");
    assert_eq!(stream.roots.len(), 2);
    assert_eq!(stream.graph[stream.roots[0]].as_str(), Some("a"));
}

#[test]
fn test_leading_bom_is_ignored() {
    let stream = ok("\u{FEFF}a: 1\n");
    assert_eq!(stream.roots.len(), 1);
}

// --- positions -------------------------------------------------------------

#[test]
fn test_node_marks() {
    let stream = ok("foo: bar\n");
    let node = root(&stream);
    assert_eq!((node.mark.line, node.mark.column), (1, 1));
    let entries = node.entries().unwrap();
    let key = &stream.graph[entries[0].0];
    let value = &stream.graph[entries[0].1];
    assert_eq!((key.mark.line, key.mark.column), (1, 1));
    assert_eq!((value.mark.line, value.mark.column), (1, 6));
}

#[test]
fn test_marks_on_later_lines() {
    let stream = ok("a: 1\nb:\n  - x\n");
    let b = stream.graph.mapping_get(stream.roots[0], "b").unwrap();
    let seq = &stream.graph[b];
    assert_eq!((seq.mark.line, seq.mark.column), (3, 3));
}

// --- warnings --------------------------------------------------------------

#[test]
fn test_yaml_version_warning() {
    let stream = ok("%YAML 1.1\n---\nx\n");
    assert_eq!(stream.warnings.len(), 1);
    assert!(stream.warnings[0].message.contains("1.1"));
}

#[test]
fn test_unknown_directive_warning() {
    let stream = ok("%FOO bar baz\n---\nx\n");
    assert_eq!(stream.warnings.len(), 1);
    assert_eq!(stream.warnings[0].message, "unknown directive %FOO bar baz");
}

#[test]
fn test_warnings_are_deduplicated() {
    let stream = ok("%FOO a\n---\nx\n...\n%FOO a\n---\ny\n");
    assert_eq!(stream.warnings.len(), 1);
}

#[test]
fn test_legacy_break_character_warning() {
    let stream = ok("a: b\u{2028}c\n");
    assert!(
        stream
            .warnings
            .iter()
            .any(|w| w.message.contains("U+2028")),
        "warnings: {:?}",
        stream.warnings
    );
}

#[test]
fn test_invalid_global_tag_warning() {
    let stream = ok("%TAG !e! tag:no-date:\n---\n!e!x v\n");
    assert!(
        stream
            .warnings
            .iter()
            .any(|w| w.message.contains("RFC 4151")),
        "warnings: {:?}",
        stream.warnings
    );
}

// --- errors ----------------------------------------------------------------

#[test]
fn test_duplicate_yaml_directive_is_fatal() {
    let err = parse("%YAML 1.2\n%YAML 1.2\n---\nx\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::DuplicateYamlDirective);
    assert_eq!(err.mark.line, 2);
}

#[test]
fn test_duplicate_tag_handle_is_fatal() {
    let err =
        parse("%TAG !e! tag:a.com,2024:\n%TAG !e! tag:b.com,2024:\n---\nx\n").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateTagHandle(_)));
}

#[test]
fn test_undeclared_tag_handle_is_fatal() {
    let err = parse("!e!point x\n").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UndefinedTagHandle(_)));
}

#[test]
fn test_unknown_anchor_is_fatal() {
    let err = parse("a: *nope\n").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownAnchor(_)));
}

#[test]
fn test_unterminated_double_quote_is_fatal() {
    let err = parse("\"abc\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnterminatedScalar);
}

#[test]
fn test_unclosed_flow_sequence_is_fatal() {
    let err = parse("a: [1, 2\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnclosedFlow);
}

#[test]
fn test_invalid_escape_is_fatal() {
    let err = parse("\"a\\qb\"\n").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidEscape(_)));
}

#[test]
fn test_bom_inside_document_is_fatal() {
    let err = parse("a: \u{FEFF}b\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::BomInDocument);
}

#[test]
fn test_reserved_indicator_is_fatal() {
    let err = parse("@anything\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::ReservedIndicator('@'));
}

#[test]
fn test_directive_without_document_end_is_fatal() {
    let err = parse("a: 1\n%YAML 1.2\n---\nb\n").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidDirective(_)));
}

#[test]
fn test_implicit_key_length_limit() {
    let key = "k".repeat(1024);
    let stream = ok(&format!("{key}: v\n"));
    assert_eq!(root(&stream).entries().unwrap().len(), 1);

    let key = "k".repeat(1025);
    let err = parse(&format!("{key}: v\n")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ImplicitKeyTooLong);
}

#[test]
fn test_trailing_content_is_fatal() {
    let err = parse("a: b\n}\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedContent);
}

// --- line break options ----------------------------------------------------

#[test]
fn test_breaks_normalize_by_default() {
    let stream = ok("a: |\n  l1\r\n  l2\n");
    let value = stream.graph.mapping_get(stream.roots[0], "a").unwrap();
    assert_eq!(text(&stream, value), "l1\nl2\n");
}

#[test]
fn test_breaks_kept_raw_when_configured() {
    let options = ParseOptions::default().normalize_line_breaks(false);
    let stream = parse_with_options("a: |\n  l1\r\n  l2\n", &options).unwrap();
    let value = stream.graph.mapping_get(stream.roots[0], "a").unwrap();
    assert_eq!(text(&stream, value), "l1\r\nl2\n");
}

#[test]
fn test_break_target_crlf() {
    let options = ParseOptions::default().line_break(LineBreak::CrLf);
    let stream = parse_with_options("a: |\n  l1\n  l2\n", &options).unwrap();
    let value = stream.graph.mapping_get(stream.roots[0], "a").unwrap();
    assert_eq!(text(&stream, value), "l1\r\nl2\r\n");
}
