// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Parse configuration.

use crate::resolver::TagResolver;

/// The target sequence for line-break normalisation.
///
/// Only these three sequences are legal targets, so the option is an
/// enum rather than a free string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineBreak {
    /// `"\n"` (default).
    #[default]
    Lf,
    /// `"\r"`.
    Cr,
    /// `"\r\n"`.
    CrLf,
}

impl LineBreak {
    /// The sequence written into decoded scalar content.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Cr => "\r",
            Self::CrLf => "\r\n",
        }
    }
}

/// Options recognised by the parser.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Replace unescaped line breaks in scalar content with
    /// [`ParseOptions::line_break`] when decoding. Defaults to `true`;
    /// when `false`, breaks are carried through exactly as written
    /// (`\r\n` stays `\r\n`).
    pub normalize_line_breaks: bool,
    /// The normalisation target.
    pub line_break: LineBreak,
    /// Implicit tag resolution rules for plain scalars.
    pub resolver: TagResolver,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            normalize_line_breaks: true,
            line_break: LineBreak::Lf,
            resolver: TagResolver::core_schema(),
        }
    }
}

impl ParseOptions {
    /// Set line-break normalisation.
    #[must_use]
    pub fn normalize_line_breaks(mut self, normalize: bool) -> Self {
        self.normalize_line_breaks = normalize;
        self
    }

    /// Set the normalisation target.
    #[must_use]
    pub fn line_break(mut self, line_break: LineBreak) -> Self {
        self.line_break = line_break;
        self
    }

    /// Replace the tag resolver.
    #[must_use]
    pub fn resolver(mut self, resolver: TagResolver) -> Self {
        self.resolver = resolver;
        self
    }
}
