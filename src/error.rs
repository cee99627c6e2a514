// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Error and warning types for YAML parsing.

use crate::span::Mark;
use derive_more::Display;

/// A fatal parse error.
///
/// Fatal errors abort the whole parse; no partial representation graph
/// is returned. The `mark` is the 1-based position of the first
/// offending character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ErrorKind,
    /// Where the error occurred.
    pub mark: Mark,
}

/// The kind of fatal parse error.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ErrorKind {
    /// Content that no production can consume (or trailing content after
    /// a complete document node).
    #[display("unexpected content in document")]
    UnexpectedContent,

    /// Two `%YAML` directives in one document.
    #[display("duplicate %YAML directive")]
    DuplicateYamlDirective,

    /// A directive that does not match its required form.
    #[display("invalid directive: {_0}")]
    InvalidDirective(String),

    /// A `%TAG` directive redefining an existing handle.
    #[display("duplicate tag handle '{_0}'")]
    DuplicateTagHandle(String),

    /// A tag shorthand whose handle was never declared.
    #[display("undeclared tag handle '{_0}'")]
    UndefinedTagHandle(String),

    /// A verbatim tag that is empty or the bare `!`.
    #[display("illegal verbatim tag")]
    IllegalVerbatimTag,

    /// An alias referring to an anchor that is not in scope.
    #[display("unknown anchor '{_0}'")]
    UnknownAnchor(String),

    /// A quoted scalar with no closing quote.
    #[display("unterminated quoted scalar")]
    UnterminatedScalar,

    /// A flow collection with no closing `]` or `}`.
    #[display("unclosed flow collection")]
    UnclosedFlow,

    /// An unrecognised escape sequence in a double-quoted scalar. The
    /// payload quotes the characters after the backslash, best effort.
    #[display("invalid escape sequence '\\{_0}'")]
    InvalidEscape(String),

    /// A TAB character used for block indentation.
    #[display("tab character used for indentation")]
    TabIndentation,

    /// Indentation that contradicts the auto-detected level.
    #[display("invalid indentation")]
    BadIndentation,

    /// A byte order mark appearing inside a document.
    #[display("byte order mark inside a document")]
    BomInDocument,

    /// An implicit key longer than 1024 characters.
    #[display("implicit key longer than 1024 characters")]
    ImplicitKeyTooLong,

    /// A reserved indicator (`@` or `` ` ``) at the start of a plain scalar.
    #[display("reserved indicator '{_0}' cannot start a plain scalar")]
    ReservedIndicator(char),
}

impl ParseError {
    /// Create a new error at the given position.
    #[must_use]
    pub const fn new(kind: ErrorKind, mark: Mark) -> Self {
        Self { kind, mark }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.kind, self.mark)
    }
}

impl std::error::Error for ParseError {}

/// A non-fatal diagnostic collected during parsing.
///
/// Warnings are deduplicated by message and returned alongside a
/// successful parse. The position is included when one was available at
/// the emission site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Human-readable description.
    pub message: String,
    /// Position of the construct that triggered the warning, if known.
    pub mark: Option<Mark>,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.mark {
            Some(mark) => write!(f, "{} at {}", self.message, mark),
            None => write!(f, "{}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::new(ErrorKind::UnterminatedScalar, Mark { line: 3, column: 7 });
        assert_eq!(err.to_string(), "unterminated quoted scalar at line 3, column 7");
    }

    #[test]
    fn test_error_display_with_context() {
        let err = ParseError::new(
            ErrorKind::DuplicateTagHandle("!e!".to_owned()),
            Mark { line: 1, column: 1 },
        );
        assert_eq!(
            err.to_string(),
            "duplicate tag handle '!e!' at line 1, column 1"
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = Warning {
            message: "unknown directive %FOO".to_owned(),
            mark: Some(Mark { line: 2, column: 1 }),
        };
        assert_eq!(warning.to_string(), "unknown directive %FOO at line 2, column 1");

        let bare = Warning {
            message: "custom".to_owned(),
            mark: None,
        };
        assert_eq!(bare.to_string(), "custom");
    }
}
