// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! The generic parsing engine: cursor, scratch buffer, rewinding and
//! the repetition combinators the grammar productions are built from.
//!
//! Rules have the shape `fn(&mut Parser) -> Matched`. `Ok(true)` means
//! the rule matched and may have consumed input and appended to the
//! scratch buffer; `Ok(false)` means it did not match (the caller
//! decides whether anything needs restoring); `Err` is a fatal error
//! that unwinds the whole parse and is never caught by [`Parser::backtrack`].

use crate::chars;
use crate::error::{ErrorKind, ParseError, Warning};
use crate::span::Mark;

use super::{Parser, Pending};

/// Result of running one grammar rule.
pub(crate) type Matched = Result<bool, ParseError>;

/// Everything a failing production must restore. The line-start table
/// and the warning list are deliberately absent.
pub(crate) struct Checkpoint {
    pos: usize,
    scratch_len: usize,
    pending: Pending,
    anchor_depth: usize,
}

impl Parser<'_> {
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            scratch_len: self.scratch.len(),
            pending: self.pending.clone(),
            anchor_depth: self.anchors.depth(),
        }
    }

    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.scratch.truncate(checkpoint.scratch_len);
        self.anchors.rewind(checkpoint.anchor_depth);
        self.pending = checkpoint.pending;
    }

    /// Run `rule`; on `Ok(false)` restore cursor, scratch, pending state
    /// and anchor table to their pre-call snapshot. The deepest failure
    /// position is kept for error reporting; it is never rewound.
    pub(crate) fn backtrack(&mut self, rule: impl FnOnce(&mut Self) -> Matched) -> Matched {
        let checkpoint = self.checkpoint();
        if rule(self)? {
            Ok(true)
        } else {
            if self.pos > self.furthest {
                self.furthest = self.pos;
            }
            self.restore(checkpoint);
            Ok(false)
        }
    }

    /// `rule?`: always matches.
    pub(crate) fn opt(&mut self, rule: impl FnOnce(&mut Self) -> Matched) -> Matched {
        self.backtrack(rule)?;
        Ok(true)
    }

    /// `rule*`: repeat while the rule matches AND advances the cursor.
    /// The advance guard prevents infinite loops on rules that can match
    /// empty input. Always matches.
    pub(crate) fn star(&mut self, mut rule: impl FnMut(&mut Self) -> Matched) -> Matched {
        loop {
            let before = self.pos;
            if !self.backtrack(&mut rule)? || self.pos == before {
                return Ok(true);
            }
        }
    }

    /// `rule+`.
    pub(crate) fn plus(&mut self, mut rule: impl FnMut(&mut Self) -> Matched) -> Matched {
        if !rule(self)? {
            return Ok(false);
        }
        self.star(rule)
    }

    /// `rule{n}`, wrapped in a rewind.
    pub(crate) fn repeat_n(
        &mut self,
        n: usize,
        mut rule: impl FnMut(&mut Self) -> Matched,
    ) -> Matched {
        self.backtrack(|p| {
            for _ in 0..n {
                if !rule(p)? {
                    return Ok(false);
                }
            }
            Ok(true)
        })
    }

    /// `rule{min,max}`, wrapped in a rewind.
    pub(crate) fn repeat_range(
        &mut self,
        min: usize,
        max: usize,
        mut rule: impl FnMut(&mut Self) -> Matched,
    ) -> Matched {
        self.backtrack(|p| {
            for _ in 0..min {
                if !rule(p)? {
                    return Ok(false);
                }
            }
            for _ in min..max {
                let before = p.pos;
                if !p.backtrack(&mut rule)? || p.pos == before {
                    break;
                }
            }
            Ok(true)
        })
    }

    // --- cursor primitives -------------------------------------------------

    /// The code unit under the cursor. The sentinel makes this safe one
    /// unit past the end of input.
    pub(crate) fn peek(&self) -> u16 {
        self.text[self.pos]
    }

    /// The code unit `offset` units ahead (0 past the sentinel).
    pub(crate) fn peek_at(&self, offset: usize) -> u16 {
        self.text.get(self.pos + offset).copied().unwrap_or(0)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.len
    }

    /// True at offset 0 or immediately after a line break.
    pub(crate) fn start_of_line(&self) -> bool {
        self.pos == 0 || chars::is_break(self.text[self.pos - 1])
    }

    /// True when the cursor sits on a `---` or `...` line: the marker at
    /// the start of a line followed by white space, a break or the end
    /// of input.
    pub(crate) fn at_document_marker(&self) -> bool {
        if !self.start_of_line() {
            return false;
        }
        let u = self.peek();
        if (u != u16::from(b'-') && u != u16::from(b'.'))
            || self.peek_at(1) != u
            || self.peek_at(2) != u
        {
            return false;
        }
        let after = self.peek_at(3);
        self.pos + 3 >= self.len || chars::is_white(after) || chars::is_break(after)
    }

    /// Consume one BMP character if it is under the cursor.
    pub(crate) fn eat(&mut self, ch: char) -> bool {
        if self.peek() == ch as u16 {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume one code unit satisfying a sixteen-bit class.
    pub(crate) fn eat_if(&mut self, pred: impl Fn(u16) -> bool) -> bool {
        if !self.at_end() && pred(self.peek()) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a code-point class match (1 or 2 units), returning the
    /// consumed length.
    pub(crate) fn eat_class(&mut self, class: impl Fn(&[u16], usize) -> usize) -> usize {
        let n = class(&self.text, self.pos);
        self.pos += n;
        n
    }

    /// Consume a line break, returning the raw sequence.
    pub(crate) fn eat_break(&mut self) -> Option<&'static str> {
        match self.peek() {
            0x000D => {
                if self.peek_at(1) == 0x000A {
                    self.pos += 2;
                    Some("\r\n")
                } else {
                    self.pos += 1;
                    Some("\r")
                }
            }
            0x000A => {
                self.pos += 1;
                Some("\n")
            }
            _ => None,
        }
    }

    // --- capture and scratch ----------------------------------------------

    /// The input consumed since `start`, decoded lossily (an isolated
    /// surrogate becomes U+FFFD).
    pub(crate) fn capture(&self, start: usize) -> String {
        self.capture_range(start, self.pos)
    }

    /// The input range `[start, end)`, decoded lossily.
    pub(crate) fn capture_range(&self, start: usize, end: usize) -> String {
        String::from_utf16_lossy(&self.text[start..end])
    }

    pub(crate) fn scratch_push(&mut self, c: char) {
        self.scratch.push(c);
    }

    /// Append the input range `[start, end)` to the scratch buffer,
    /// decoded lossily.
    pub(crate) fn scratch_push_range(&mut self, start: usize, end: usize) {
        for c in char::decode_utf16(self.text[start..end].iter().copied()) {
            self.scratch.push(c.unwrap_or(char::REPLACEMENT_CHARACTER));
        }
    }

    /// Append a decoded line break: the configured normalisation target,
    /// or the raw input sequence when normalisation is off.
    pub(crate) fn scratch_push_break(&mut self, raw: &str) {
        if self.options.normalize_line_breaks {
            self.scratch.push_str(self.options.line_break.as_str());
        } else {
            self.scratch.push_str(raw);
        }
    }

    // --- diagnostics -------------------------------------------------------

    pub(crate) fn mark_at(&self, pos: usize) -> Mark {
        self.map.mark(pos)
    }

    pub(crate) fn fail(&self, kind: ErrorKind) -> ParseError {
        self.fail_at(kind, self.pos)
    }

    pub(crate) fn fail_at(&self, kind: ErrorKind, pos: usize) -> ParseError {
        ParseError::new(kind, self.mark_at(pos))
    }

    /// Record a warning, deduplicated by message. Warnings survive
    /// rewinds.
    pub(crate) fn warn_at(&mut self, message: String, pos: usize) {
        if self.warnings.iter().any(|w| w.message == message) {
            return;
        }
        self.warnings.push(Warning {
            message,
            mark: Some(self.mark_at(pos)),
        });
    }

    /// Warn when a character that was a line break in YAML 1.1 is
    /// consumed as plain content.
    pub(crate) fn note_content_unit(&mut self, u: u16, pos: usize) {
        if chars::is_legacy_break(u) {
            self.warn_at(
                format!("U+{u:04X} was a line break in YAML 1.1 but is content in YAML 1.2"),
                pos,
            );
        }
    }
}
