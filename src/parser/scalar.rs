// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Scalar productions: plain, single/double quoted, literal and folded.
//!
//! All scalar content is decoded into the engine's scratch buffer
//! (escapes expanded, folds applied, breaks normalised per the options)
//! and materialised by `create_scalar` when the producing rule
//! succeeds.

use crate::chars;
use crate::error::ErrorKind;
use crate::tags;

use super::{Context, Matched, Parser};

/// Chomping indicator of a block scalar header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Chomping {
    /// `-`: discard every trailing line break.
    Strip,
    /// Default: keep exactly one trailing line break.
    #[default]
    Clip,
    /// `+`: keep every trailing line break.
    Keep,
}

impl Parser<'_> {
    /// Unclosed quoted scalar: fatal, except on the speculative
    /// single-line key paths where it is a plain refusal.
    fn unterminated(&mut self, c: Context, start: usize) -> Matched {
        if c.is_key() {
            Ok(false)
        } else {
            Err(self.fail_at(ErrorKind::UnterminatedScalar, start))
        }
    }

    /// One `nb-char` of raw content into the scratch buffer.
    fn nb_char_content(&mut self) -> Matched {
        let start = self.pos;
        let len = self.eat_class(chars::nb_char);
        if len == 0 {
            return Ok(false);
        }
        self.scratch_push_range(start, self.pos);
        self.note_content_unit(self.text[start], start);
        Ok(true)
    }

    // --- plain scalars -----------------------------------------------------

    /// `ns-plain(n,c)`: multi-line in flow-out/flow-in, single-line in
    /// the key contexts.
    pub(crate) fn ns_plain(&mut self, n: i32, c: Context) -> Matched {
        self.backtrack(|p| {
            if p.at_document_marker() {
                return Ok(false);
            }
            let start = p.pos;
            if !p.ns_plain_first(c)? {
                return Ok(false);
            }
            p.nb_ns_plain_in_line(c)?;
            if matches!(c, Context::FlowOut | Context::FlowIn) {
                p.star(|p| p.s_ns_plain_next_line(n, c))?;
            }
            p.create_scalar(None, start);
            Ok(true)
        })
    }

    /// `ns-plain-first(c)`. The reserved indicators `@` and `` ` ``
    /// can never start a plain scalar and are fatal.
    fn ns_plain_first(&mut self, c: Context) -> Matched {
        let u = self.peek();
        if u == u16::from(b'@') || u == u16::from(b'`') {
            let indicator = if u == u16::from(b'@') { '@' } else { '`' };
            return Err(self.fail(ErrorKind::ReservedIndicator(indicator)));
        }
        let len = chars::ns_plain_first_sub(&self.text, self.pos);
        if len > 0 {
            let start = self.pos;
            self.pos += len;
            self.scratch_push_range(start, self.pos);
            self.note_content_unit(u, start);
            return Ok(true);
        }
        // '?', ':' or '-' may start a plain scalar when glued to a
        // plain-safe character.
        if matches!(u, 0x3F | 0x3A | 0x2D)
            && chars::ns_plain_safe(&self.text, self.pos + 1, c.in_flow()) > 0
        {
            self.pos += 1;
            self.scratch_push_range(self.pos - 1, self.pos);
            return Ok(true);
        }
        Ok(false)
    }

    /// `nb-ns-plain-in-line(c)`: runs of white space each glued to one
    /// more plain character.
    fn nb_ns_plain_in_line(&mut self, c: Context) -> Matched {
        self.star(|p| {
            p.backtrack(|p| {
                let ws_start = p.pos;
                while p.eat_if(chars::is_white) {}
                let had_white = p.pos > ws_start;
                p.scratch_push_range(ws_start, p.pos);
                let char_start = p.pos;
                if !p.ns_plain_char(c, had_white) {
                    return Ok(false);
                }
                p.scratch_push_range(char_start, p.pos);
                p.note_content_unit(p.text[char_start], char_start);
                Ok(true)
            })
        })
    }

    /// `ns-plain-char(c)`, cursor only.
    ///
    /// A `:` glued to a following plain-safe character continues the
    /// scalar only in flow-out; in the key and flow-in contexts the `:`
    /// terminates it, so wild-YAML inputs like `{a:b}` and `a:b` read
    /// as mappings while `a: http://x` keeps the URL as one scalar.
    fn ns_plain_char(&mut self, c: Context, after_white: bool) -> bool {
        match self.peek() {
            0x3A => {
                if c == Context::FlowOut
                    && chars::ns_plain_safe(&self.text, self.pos + 1, c.in_flow()) > 0
                {
                    self.pos += 1;
                    true
                } else {
                    false
                }
            }
            0x23 => {
                // '#' is content only when glued to the previous character
                if after_white {
                    false
                } else {
                    self.pos += 1;
                    true
                }
            }
            _ => {
                let len = chars::ns_plain_safe(&self.text, self.pos, c.in_flow());
                if len > 0 {
                    self.pos += len;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// `s-ns-plain-next-line(n,c)`: fold onto a continuation line.
    fn s_ns_plain_next_line(&mut self, n: i32, c: Context) -> Matched {
        self.backtrack(|p| {
            if !p.s_flow_folded(n)? {
                return Ok(false);
            }
            let char_start = p.pos;
            if !p.ns_plain_char(c, true) {
                return Ok(false);
            }
            p.scratch_push_range(char_start, p.pos);
            p.note_content_unit(p.text[char_start], char_start);
            p.nb_ns_plain_in_line(c)
        })
    }

    // --- single-quoted scalars ---------------------------------------------

    /// `c-single-quoted(n,c)`.
    pub(crate) fn c_single_quoted(&mut self, n: i32, c: Context) -> Matched {
        self.backtrack(|p| {
            if !p.eat('\'') {
                return Ok(false);
            }
            let start = p.pos - 1;
            if c.is_key() {
                p.star(|p| p.nb_single_char())?;
            } else {
                p.nb_single_multi_line(n)?;
            }
            if !p.eat('\'') {
                return p.unterminated(c, start);
            }
            p.create_scalar(Some(tags::STR), start);
            Ok(true)
        })
    }

    /// `nb-single-char`: the quoted quote `''`, or any JSON character
    /// other than `'`.
    fn nb_single_char(&mut self) -> Matched {
        if self.peek() == u16::from(b'\'') {
            if self.peek_at(1) == u16::from(b'\'') {
                self.scratch_push('\'');
                self.pos += 2;
                return Ok(true);
            }
            return Ok(false);
        }
        let start = self.pos;
        let len = chars::nb_json(&self.text, self.pos);
        if len == 0 {
            return Ok(false);
        }
        self.pos += len;
        self.scratch_push_range(start, self.pos);
        self.note_content_unit(self.text[start], start);
        Ok(true)
    }

    fn ns_single_char(&mut self) -> Matched {
        if chars::is_white(self.peek()) {
            return Ok(false);
        }
        self.nb_single_char()
    }

    /// `nb-ns-single-in-line`.
    fn nb_ns_single_in_line(&mut self) -> Matched {
        self.star(|p| {
            p.backtrack(|p| {
                let ws_start = p.pos;
                while p.eat_if(chars::is_white) {}
                p.scratch_push_range(ws_start, p.pos);
                p.ns_single_char()
            })
        })
    }

    /// `nb-single-multi-line(n)`: in-line text, then folded
    /// continuation lines or trailing white space.
    fn nb_single_multi_line(&mut self, n: i32) -> Matched {
        self.nb_ns_single_in_line()?;
        loop {
            let folded = self.backtrack(|p| p.s_flow_folded(n))?;
            if folded {
                let more = self.backtrack(|p| {
                    if !p.ns_single_char()? {
                        return Ok(false);
                    }
                    p.nb_ns_single_in_line()
                })?;
                if more {
                    continue;
                }
                return Ok(true);
            }
            let ws = self.pos;
            while self.eat_if(chars::is_white) {}
            self.scratch_push_range(ws, self.pos);
            return Ok(true);
        }
    }

    // --- double-quoted scalars ---------------------------------------------

    /// `c-double-quoted(n,c)`.
    pub(crate) fn c_double_quoted(&mut self, n: i32, c: Context) -> Matched {
        self.backtrack(|p| {
            if !p.eat('"') {
                return Ok(false);
            }
            let start = p.pos - 1;
            if c.is_key() {
                p.star(|p| p.nb_double_char())?;
            } else {
                p.nb_double_multi_line(n)?;
            }
            if !p.eat('"') {
                return p.unterminated(c, start);
            }
            p.create_scalar(Some(tags::STR), start);
            Ok(true)
        })
    }

    /// `nb-double-char`: an escape sequence, or any JSON character
    /// other than `\` and `"`. An escaped real line break is left to
    /// the multi-line structure.
    fn nb_double_char(&mut self) -> Matched {
        let u = self.peek();
        if u == u16::from(b'\\') {
            if chars::is_break(self.peek_at(1)) {
                return Ok(false);
            }
            return self.c_ns_esc_char();
        }
        if u == u16::from(b'"') {
            return Ok(false);
        }
        let start = self.pos;
        let len = chars::nb_json(&self.text, self.pos);
        if len == 0 {
            return Ok(false);
        }
        self.pos += len;
        self.scratch_push_range(start, self.pos);
        self.note_content_unit(u, start);
        Ok(true)
    }

    fn ns_double_char(&mut self) -> Matched {
        if chars::is_white(self.peek()) {
            return Ok(false);
        }
        self.nb_double_char()
    }

    /// `c-ns-esc-char`: decode one escape sequence into the scratch
    /// buffer. Unknown escapes are fatal.
    fn c_ns_esc_char(&mut self) -> Matched {
        let start = self.pos;
        self.pos += 1; // the backslash
        let u = self.peek();
        self.pos += 1;
        let decoded = match u {
            0x30 => Some('\0'),        // \0
            0x61 => Some('\x07'),      // \a
            0x62 => Some('\x08'),      // \b
            0x74 | 0x09 => Some('\t'), // \t or an escaped tab
            0x6E => Some('\n'),        // \n
            0x76 => Some('\x0B'),      // \v
            0x66 => Some('\x0C'),      // \f
            0x72 => Some('\r'),        // \r
            0x65 => Some('\x1B'),      // \e
            0x20 => Some(' '),
            0x22 => Some('"'),
            0x2F => Some('/'),
            0x5C => Some('\\'),
            0x4E => Some('\u{0085}'),  // \N
            0x5F => Some('\u{00A0}'),  // \_
            0x4C => Some('\u{2028}'),  // \L
            0x50 => Some('\u{2029}'),  // \P
            _ => None,
        };
        if let Some(ch) = decoded {
            self.scratch_push(ch);
            return Ok(true);
        }
        match u {
            0x78 => self.esc_hex(2, start), // \xXX
            0x75 => self.esc_hex(4, start), // \uXXXX
            0x55 => self.esc_hex(8, start), // \UXXXXXXXX
            _ => Err(self.invalid_escape(start)),
        }
    }

    /// Read `digits` hex digits and push the code point. A `\u` high
    /// surrogate combines with an immediately following `\u` low
    /// surrogate; an isolated half degrades to U+FFFD.
    fn esc_hex(&mut self, digits: usize, start: usize) -> Matched {
        let value = self.hex_value(digits, start)?;
        if digits == 4 && chars::is_high_surrogate(value as u16) {
            if self.peek() == u16::from(b'\\') && self.peek_at(1) == u16::from(b'u') {
                let pair_start = self.pos;
                self.pos += 2;
                let low = self.hex_value(4, pair_start)?;
                if chars::is_low_surrogate(low as u16) {
                    let code = 0x10000 + ((value - 0xD800) << 10) + (low - 0xDC00);
                    self.scratch_push(
                        char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
                    );
                    return Ok(true);
                }
                // Not a low half after all: rewind and emit the
                // isolated high surrogate below.
                self.pos = pair_start;
            }
            self.scratch_push(char::REPLACEMENT_CHARACTER);
            return Ok(true);
        }
        match char::from_u32(value) {
            Some(ch) => {
                self.scratch_push(ch);
                Ok(true)
            }
            None if chars::is_low_surrogate(value as u16) && digits == 4 => {
                self.scratch_push(char::REPLACEMENT_CHARACTER);
                Ok(true)
            }
            None => Err(self.invalid_escape(start)),
        }
    }

    fn hex_value(&mut self, digits: usize, start: usize) -> Result<u32, crate::error::ParseError> {
        let mut value: u32 = 0;
        for _ in 0..digits {
            let u = self.peek();
            if !chars::is_hex_digit(u) {
                return Err(self.invalid_escape(start));
            }
            let digit = match u {
                0x30..=0x39 => u32::from(u) - 0x30,
                0x41..=0x46 => u32::from(u) - 0x41 + 10,
                _ => u32::from(u) - 0x61 + 10,
            };
            value = value * 16 + digit;
            self.pos += 1;
        }
        Ok(value)
    }

    /// Best-effort context for an invalid escape: up to four code units
    /// after the backslash, decoded lossily (the window may cross a
    /// surrogate boundary).
    fn invalid_escape(&mut self, start: usize) -> crate::error::ParseError {
        let end = (start + 5).min(self.len);
        let context = self.capture_range(start + 1, end);
        self.fail_at(ErrorKind::InvalidEscape(context), start)
    }

    /// `nb-double-multi-line(n)`.
    fn nb_double_multi_line(&mut self, n: i32) -> Matched {
        self.nb_ns_double_in_line()?;
        loop {
            let folded = self.backtrack(|p| p.s_double_break(n))?;
            if folded {
                let more = self.backtrack(|p| {
                    if !p.ns_double_char()? {
                        return Ok(false);
                    }
                    p.nb_ns_double_in_line()
                })?;
                if more {
                    continue;
                }
                return Ok(true);
            }
            let ws = self.pos;
            while self.eat_if(chars::is_white) {}
            self.scratch_push_range(ws, self.pos);
            return Ok(true);
        }
    }

    fn nb_ns_double_in_line(&mut self) -> Matched {
        self.star(|p| {
            p.backtrack(|p| {
                let ws_start = p.pos;
                while p.eat_if(chars::is_white) {}
                p.scratch_push_range(ws_start, p.pos);
                p.ns_double_char()
            })
        })
    }

    /// `s-double-break(n)`: an escaped break or a fold.
    fn s_double_break(&mut self, n: i32) -> Matched {
        if self.backtrack(|p| p.s_double_escaped(n))? {
            return Ok(true);
        }
        self.s_flow_folded(n)
    }

    /// `s-double-escaped(n)`: trailing white space is content, the
    /// escaped break and any empty lines are not.
    fn s_double_escaped(&mut self, n: i32) -> Matched {
        let ws_start = self.pos;
        while self.eat_if(chars::is_white) {}
        if self.peek() != u16::from(b'\\') || !chars::is_break(self.peek_at(1)) {
            return Ok(false);
        }
        self.scratch_push_range(ws_start, self.pos);
        self.pos += 1;
        self.b_non_content()?;
        self.star(|p| p.l_empty(n, Context::FlowIn))?;
        if !self.s_flow_line_prefix(n)? {
            return Ok(false);
        }
        Ok(!self.at_document_marker())
    }

    // --- block scalars -----------------------------------------------------

    /// `c-l+literal(n)`.
    pub(crate) fn c_l_literal(&mut self, n: i32) -> Matched {
        self.backtrack(|p| {
            if !p.eat('|') {
                return Ok(false);
            }
            let start = p.pos - 1;
            let Some((m, t)) = p.block_header(n)? else {
                return Ok(false);
            };
            if !p.l_literal_content(n + m, t)? {
                return Ok(false);
            }
            p.create_scalar(Some(tags::STR), start);
            Ok(true)
        })
    }

    /// `c-l+folded(n)`. `>+` is legal but unusual enough to warn.
    pub(crate) fn c_l_folded(&mut self, n: i32) -> Matched {
        self.backtrack(|p| {
            if !p.eat('>') {
                return Ok(false);
            }
            let start = p.pos - 1;
            let Some((m, t)) = p.block_header(n)? else {
                return Ok(false);
            };
            if t == Chomping::Keep {
                p.warn_at("folded block scalar with keep chomping (>+)".to_owned(), start);
            }
            if !p.l_folded_content(n + m, t)? {
                return Ok(false);
            }
            p.create_scalar(Some(tags::STR), start);
            Ok(true)
        })
    }

    /// `c-b-block-header(m,t)`: optional indentation digit and chomping
    /// indicator in either order, then end of line. Returns `None` when
    /// the header is malformed.
    fn block_header(
        &mut self,
        n: i32,
    ) -> Result<Option<(i32, Chomping)>, crate::error::ParseError> {
        let mut explicit: Option<i32> = None;
        let mut chomping = Chomping::Clip;
        let u = self.peek();
        if (0x31..=0x39).contains(&u) {
            explicit = Some(i32::from(u) - 0x30);
            self.pos += 1;
            match self.peek() {
                0x2D => {
                    chomping = Chomping::Strip;
                    self.pos += 1;
                }
                0x2B => {
                    chomping = Chomping::Keep;
                    self.pos += 1;
                }
                _ => {}
            }
        } else if u == 0x2D || u == 0x2B {
            chomping = if u == 0x2D { Chomping::Strip } else { Chomping::Keep };
            self.pos += 1;
            let d = self.peek();
            if (0x31..=0x39).contains(&d) {
                explicit = Some(i32::from(d) - 0x30);
                self.pos += 1;
            }
        }
        if !self.s_b_comment()? {
            return Ok(None);
        }
        let m = match explicit {
            Some(m) => m,
            None => self.auto_detect_indentation(n)?,
        };
        Ok(Some((m, chomping)))
    }

    /// Scan forward through leading blank lines, record the widest run
    /// of spaces, rewind, and derive the content indentation.
    ///
    /// A TAB inside the scanned indentation is fatal (there is no
    /// explicit indicator to overrule it), as is a blank line indented
    /// deeper than the first content line.
    fn auto_detect_indentation(&mut self, n: i32) -> Result<i32, crate::error::ParseError> {
        let saved = self.pos;
        let mut widest: i32 = 0;
        let detected: i32;
        loop {
            let line_start = self.pos;
            let mut run: i32 = 0;
            while self.eat(' ') {
                run += 1;
            }
            if self.peek() == 0x0009 {
                return Err(self.fail_at(ErrorKind::TabIndentation, self.pos));
            }
            if self.at_end() {
                detected = widest;
                break;
            }
            if chars::is_break(self.peek()) {
                widest = widest.max(run);
                self.eat_break();
                continue;
            }
            if widest > run {
                return Err(self.fail_at(ErrorKind::BadIndentation, line_start));
            }
            detected = run;
            break;
        }
        self.pos = saved;
        Ok((detected - n).max(1))
    }

    /// `l-literal-content(n,t)`.
    fn l_literal_content(&mut self, n: i32, t: Chomping) -> Matched {
        self.backtrack(|p| {
            p.opt(|p| {
                p.backtrack(|p| {
                    if !p.l_nb_literal_text(n)? {
                        return Ok(false);
                    }
                    p.star(|p| p.b_nb_literal_next(n))?;
                    p.b_chomped_last(t)
                })
            })?;
            p.l_chomped_empty(n, t)
        })
    }

    /// `l-nb-literal-text(n)`: empty lines become feeds, then one line
    /// of raw content.
    fn l_nb_literal_text(&mut self, n: i32) -> Matched {
        self.backtrack(|p| {
            p.star(|p| p.l_empty(n, Context::BlockIn))?;
            if p.at_document_marker() {
                return Ok(false);
            }
            if !p.s_indent(n)? {
                return Ok(false);
            }
            p.plus(|p| p.nb_char_content())
        })
    }

    /// `b-nb-literal-next(n)`.
    fn b_nb_literal_next(&mut self, n: i32) -> Matched {
        self.backtrack(|p| {
            if !p.b_as_line_feed()? {
                return Ok(false);
            }
            p.l_nb_literal_text(n)
        })
    }

    /// `b-chomped-last(t)`: the break after the last content line. At
    /// the end of input there may be no break at all, and none is
    /// invented.
    fn b_chomped_last(&mut self, t: Chomping) -> Matched {
        if self.at_end() {
            return Ok(true);
        }
        match t {
            Chomping::Strip => self.b_non_content(),
            Chomping::Clip | Chomping::Keep => self.b_as_line_feed(),
        }
    }

    /// `l-chomped-empty(n,t)`: trailing empty lines are content only
    /// under keep.
    fn l_chomped_empty(&mut self, n: i32, t: Chomping) -> Matched {
        if t == Chomping::Keep {
            self.star(|p| p.l_empty(n, Context::BlockIn))?;
        } else {
            self.star(|p| {
                p.backtrack(|p| {
                    p.s_indent_le(n)?;
                    p.b_non_content()
                })
            })?;
        }
        self.opt(|p| p.l_trail_comments(n))?;
        Ok(true)
    }

    /// `l-trail-comments(n)`: comments less indented than the scalar.
    fn l_trail_comments(&mut self, n: i32) -> Matched {
        self.backtrack(|p| {
            if !p.start_of_line() {
                return Ok(false);
            }
            p.s_indent_lt(n)?;
            if !p.c_nb_comment_text()? {
                return Ok(false);
            }
            p.b_comment()?;
            p.star(|p| p.l_comment())
        })
    }

    /// `s-nb-folded-text(n)`: a line at the base indentation starting
    /// with a non-space character.
    fn s_nb_folded_text(&mut self, n: i32) -> Matched {
        self.backtrack(|p| {
            if p.at_document_marker() {
                return Ok(false);
            }
            if !p.s_indent(n)? {
                return Ok(false);
            }
            let start = p.pos;
            if p.eat_class(chars::ns_char) == 0 {
                return Ok(false);
            }
            p.scratch_push_range(start, p.pos);
            p.note_content_unit(p.text[start], start);
            p.star(|p| p.nb_char_content())
        })
    }

    /// `l-nb-folded-lines(n)`: folded lines joined by single spaces.
    fn l_nb_folded_lines(&mut self, n: i32) -> Matched {
        if !self.s_nb_folded_text(n)? {
            return Ok(false);
        }
        self.star(|p| {
            p.backtrack(|p| {
                if !p.b_l_folded(n, Context::Folded)? {
                    return Ok(false);
                }
                p.s_nb_folded_text(n)
            })
        })
    }

    /// `s-nb-spaced-text(n)`: a more-indented line; its extra white
    /// space is preserved verbatim.
    fn s_nb_spaced_text(&mut self, n: i32) -> Matched {
        self.backtrack(|p| {
            if p.at_document_marker() {
                return Ok(false);
            }
            if !p.s_indent(n)? {
                return Ok(false);
            }
            let start = p.pos;
            if !p.eat_if(chars::is_white) {
                return Ok(false);
            }
            p.scratch_push_range(start, p.pos);
            p.star(|p| p.nb_char_content())
        })
    }

    /// `b-l-spaced(n)`: breaks around spaced lines are never folded to
    /// spaces.
    fn b_l_spaced(&mut self, n: i32) -> Matched {
        if !self.b_as_line_feed()? {
            return Ok(false);
        }
        self.star(|p| p.l_empty(n, Context::Folded))
    }

    /// `l-nb-spaced-lines(n)`.
    fn l_nb_spaced_lines(&mut self, n: i32) -> Matched {
        if !self.s_nb_spaced_text(n)? {
            return Ok(false);
        }
        self.star(|p| {
            p.backtrack(|p| {
                if !p.b_l_spaced(n)? {
                    return Ok(false);
                }
                p.s_nb_spaced_text(n)
            })
        })
    }

    /// `l-nb-same-lines(n)`: a run of lines at one indentation flavour.
    fn l_nb_same_lines(&mut self, n: i32) -> Matched {
        self.backtrack(|p| {
            p.star(|p| p.l_empty(n, Context::Folded))?;
            if p.backtrack(|p| p.l_nb_folded_lines(n))? {
                return Ok(true);
            }
            p.l_nb_spaced_lines(n)
        })
    }

    /// `l-nb-diff-lines(n)`: flavour changes keep their line breaks.
    fn l_nb_diff_lines(&mut self, n: i32) -> Matched {
        if !self.l_nb_same_lines(n)? {
            return Ok(false);
        }
        self.star(|p| {
            p.backtrack(|p| {
                if !p.b_as_line_feed()? {
                    return Ok(false);
                }
                p.l_nb_same_lines(n)
            })
        })
    }

    /// `l-folded-content(n,t)`.
    fn l_folded_content(&mut self, n: i32, t: Chomping) -> Matched {
        self.backtrack(|p| {
            p.opt(|p| {
                p.backtrack(|p| {
                    if !p.l_nb_diff_lines(n)? {
                        return Ok(false);
                    }
                    p.b_chomped_last(t)
                })
            })?;
            p.l_chomped_empty(n, t)
        })
    }
}
