// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Tag constants and the handle-to-prefix table for `%TAG` directives.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ErrorKind, ParseError};
use crate::span::Mark;

/// The prefix installed for the `!!` handle.
pub const CORE_PREFIX: &str = "tag:yaml.org,2002:";

/// Default tag for scalars.
pub const STR: &str = "tag:yaml.org,2002:str";
/// Default tag for sequences.
pub const SEQ: &str = "tag:yaml.org,2002:seq";
/// Default tag for mappings.
pub const MAP: &str = "tag:yaml.org,2002:map";

/// RFC 4151 tag URI shape: `tag:authority,date:specific`.
static TAG_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^tag:[0-9a-zA-Z.@%/\-]+,\d{4}(-\d{2}(-\d{2})?)?:")
        .expect("built-in tag URI pattern")
});

/// Returns `true` when a global tag is well formed: either a valid
/// RFC 4151 tag URI or some other URI with a scheme. Local tags
/// (leading `!`) are always fine.
pub(crate) fn is_well_formed(tag: &str) -> bool {
    if tag.starts_with('!') {
        return true;
    }
    if tag.starts_with("tag:") {
        return TAG_URI.is_match(tag);
    }
    // Any other scheme: letter, then letters/digits/+/-/., then ':'.
    let mut bytes = tag.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() => {}
        _ => return false,
    }
    for b in bytes {
        match b {
            b':' => return true,
            b if b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.') => {}
            _ => return false,
        }
    }
    false
}

/// The handle-to-prefix table.
///
/// Reset between documents; `!` and `!!` are always reinstalled.
/// Verbatim `!<...>` tags bypass this table entirely.
#[derive(Debug, Default)]
pub(crate) struct TagTable {
    entries: Vec<(String, String)>,
}

impl TagTable {
    /// Clear the table and reinstall the two default handles.
    pub(crate) fn reset(&mut self) {
        self.entries.clear();
        self.entries.push(("!".to_owned(), "!".to_owned()));
        self.entries.push(("!!".to_owned(), CORE_PREFIX.to_owned()));
    }

    /// Record a `%TAG` binding. Redefinition is fatal.
    pub(crate) fn add(&mut self, handle: &str, prefix: &str, mark: Mark) -> Result<(), ParseError> {
        // The defaults may be overridden once per document.
        let default = matches!(handle, "!" | "!!")
            && self.entries.iter().filter(|(h, _)| h == handle).count() == 1
            && matches!(
                self.entries.iter().find(|(h, _)| h == handle),
                Some((_, p)) if p == "!" || p == CORE_PREFIX
            );
        if self.entries.iter().any(|(h, _)| h == handle) && !default {
            return Err(ParseError::new(
                ErrorKind::DuplicateTagHandle(handle.to_owned()),
                mark,
            ));
        }
        self.entries.push((handle.to_owned(), prefix.to_owned()));
        Ok(())
    }

    /// Expand a `handle` + `suffix` shorthand. Unknown handle is fatal.
    pub(crate) fn resolve(
        &self,
        handle: &str,
        suffix: &str,
        mark: Mark,
    ) -> Result<String, ParseError> {
        let prefix = self
            .entries
            .iter()
            .rev()
            .find(|(h, _)| h == handle)
            .map(|(_, p)| p.as_str())
            .ok_or_else(|| {
                ParseError::new(ErrorKind::UndefinedTagHandle(handle.to_owned()), mark)
            })?;
        Ok(format!("{prefix}{suffix}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark() -> Mark {
        Mark { line: 1, column: 1 }
    }

    #[test]
    fn test_defaults_resolve() {
        let mut table = TagTable::default();
        table.reset();
        assert_eq!(table.resolve("!", "local", mark()).unwrap(), "!local");
        assert_eq!(
            table.resolve("!!", "str", mark()).unwrap(),
            "tag:yaml.org,2002:str"
        );
    }

    #[test]
    fn test_duplicate_handle_is_fatal() {
        let mut table = TagTable::default();
        table.reset();
        table.add("!e!", "tag:example.com,2024:", mark()).unwrap();
        let err = table.add("!e!", "tag:other.com,2024:", mark()).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::DuplicateTagHandle("!e!".to_owned())
        );
    }

    #[test]
    fn test_default_handle_can_be_overridden_once() {
        let mut table = TagTable::default();
        table.reset();
        table.add("!!", "tag:example.com,2024:", mark()).unwrap();
        assert_eq!(
            table.resolve("!!", "point", mark()).unwrap(),
            "tag:example.com,2024:point"
        );
        assert!(table.add("!!", "tag:again.com,2024:", mark()).is_err());
    }

    #[test]
    fn test_unknown_handle_is_fatal() {
        let mut table = TagTable::default();
        table.reset();
        let err = table.resolve("!e!", "x", mark()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UndefinedTagHandle("!e!".to_owned()));
    }

    #[test]
    fn test_reset_drops_document_handles() {
        let mut table = TagTable::default();
        table.reset();
        table.add("!e!", "tag:example.com,2024:", mark()).unwrap();
        table.reset();
        assert!(table.resolve("!e!", "x", mark()).is_err());
    }

    #[test]
    fn test_global_tag_shapes() {
        assert!(is_well_formed("tag:yaml.org,2002:str"));
        assert!(is_well_formed("tag:example.com,2024-01:point"));
        assert!(is_well_formed("!local"));
        assert!(is_well_formed("urn:example:animal"));
        assert!(!is_well_formed("tag:missing-date:str"));
        assert!(!is_well_formed("no-scheme"));
    }
}
