//! Pull-based JSON token reader.
//!
//! The reader turns text into a flat stream of [`Token`]s and knows nothing
//! about nesting; the decoder drives it and owns the grammar. Every token is
//! returned together with the byte offset where it starts so that failures can
//! be reported as a line/column position.
//!
//! Lexical rules follow RFC 8259 exactly: only space, tab, LF and CR count as
//! whitespace, numerals may not carry leading zeros or a leading `+`, strings
//! may not contain raw control characters, and `\u` escapes must form valid
//! scalar values (surrogate pairs are combined, lone surrogates rejected).

use crate::error::{JastError, Result};
use std::borrow::Cow;

/// One lexical unit of a JSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    Colon,
    Comma,
    /// String contents with escapes already decoded. Borrowed when the source
    /// contained no escapes.
    String(Cow<'a, str>),
    /// A numeral as written. `integral` is false when the lexeme has a
    /// fractional part or an exponent.
    Number { lexeme: &'a str, integral: bool },
    True,
    False,
    Null,
    EndDocument,
}

impl Token<'_> {
    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::BeginObject => "'{'".to_string(),
            Token::EndObject => "'}'".to_string(),
            Token::BeginArray => "'['".to_string(),
            Token::EndArray => "']'".to_string(),
            Token::Colon => "':'".to_string(),
            Token::Comma => "','".to_string(),
            Token::String(_) => "string".to_string(),
            Token::Number { lexeme, .. } => format!("number {lexeme}"),
            Token::True => "'true'".to_string(),
            Token::False => "'false'".to_string(),
            Token::Null => "'null'".to_string(),
            Token::EndDocument => "end of input".to_string(),
        }
    }
}

/// Streaming tokenizer over a complete in-memory document.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(src: &'a str) -> Self {
        Reader { src, pos: 0 }
    }

    /// Byte offset of the next unread character.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Read the next token and the byte offset it starts at.
    ///
    /// After the input is exhausted every call returns `EndDocument`.
    pub fn next_token(&mut self) -> Result<(Token<'a>, usize)> {
        self.skip_whitespace();
        let start = self.pos;
        let Some(&byte) = self.src.as_bytes().get(start) else {
            return Ok((Token::EndDocument, start));
        };

        let token = match byte {
            b'{' => self.punct(Token::BeginObject),
            b'}' => self.punct(Token::EndObject),
            b'[' => self.punct(Token::BeginArray),
            b']' => self.punct(Token::EndArray),
            b':' => self.punct(Token::Colon),
            b',' => self.punct(Token::Comma),
            b'"' => Token::String(self.read_string()?),
            b'-' | b'0'..=b'9' => self.read_number()?,
            b't' => self.read_literal("true", Token::True)?,
            b'f' => self.read_literal("false", Token::False)?,
            b'n' => self.read_literal("null", Token::Null)?,
            _ => {
                let ch = self.src[start..].chars().next().unwrap_or('\u{FFFD}');
                return Err(self.error_at(start, format!("unexpected character {ch:?}")));
            }
        };
        Ok((token, start))
    }

    /// 1-based `(line, column)` of a byte offset in the source.
    pub fn position(&self, offset: usize) -> (usize, usize) {
        locate(self.src, offset)
    }

    /// Build a `MalformedInput` error located at `offset`.
    pub fn error_at(&self, offset: usize, message: impl Into<String>) -> JastError {
        let (line, column) = self.position(offset);
        JastError::MalformedInput {
            line,
            column,
            message: message.into(),
        }
    }

    fn punct(&mut self, token: Token<'a>) -> Token<'a> {
        self.pos += 1;
        token
    }

    fn peek_byte(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek_byte() {
            self.pos += 1;
        }
    }

    fn read_literal(&mut self, word: &'static str, token: Token<'a>) -> Result<Token<'a>> {
        if self.src[self.pos..].starts_with(word) {
            self.pos += word.len();
            Ok(token)
        } else {
            Err(self.error_at(self.pos, format!("invalid literal, expected '{word}'")))
        }
    }

    /// Numeral grammar: `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
    fn read_number(&mut self) -> Result<Token<'a>> {
        let start = self.pos;
        let mut integral = true;

        if self.peek_byte() == Some(b'-') {
            self.pos += 1;
        }
        match self.peek_byte() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return Err(self.error_at(self.pos, "expected digit in number")),
        }

        if self.peek_byte() == Some(b'.') {
            self.pos += 1;
            integral = false;
            if !matches!(self.peek_byte(), Some(b'0'..=b'9')) {
                return Err(self.error_at(self.pos, "expected digit after decimal point"));
            }
            self.skip_digits();
        }

        if let Some(b'e' | b'E') = self.peek_byte() {
            self.pos += 1;
            integral = false;
            if let Some(b'+' | b'-') = self.peek_byte() {
                self.pos += 1;
            }
            if !matches!(self.peek_byte(), Some(b'0'..=b'9')) {
                return Err(self.error_at(self.pos, "expected digit in exponent"));
            }
            self.skip_digits();
        }

        Ok(Token::Number {
            lexeme: &self.src[start..self.pos],
            integral,
        })
    }

    fn skip_digits(&mut self) {
        while let Some(b'0'..=b'9') = self.peek_byte() {
            self.pos += 1;
        }
    }

    /// Read a string starting at the opening quote.
    ///
    /// Strings without escapes are borrowed straight from the source.
    fn read_string(&mut self) -> Result<Cow<'a, str>> {
        let open = self.pos;
        self.pos += 1;
        let content_start = self.pos;
        let bytes = self.src.as_bytes();

        // Fast path: scan to the closing quote unless an escape shows up.
        loop {
            match bytes.get(self.pos) {
                None => return Err(self.error_at(open, "unterminated string")),
                Some(b'"') => {
                    let s = &self.src[content_start..self.pos];
                    self.pos += 1;
                    return Ok(Cow::Borrowed(s));
                }
                Some(b'\\') => break,
                Some(&b) if b < 0x20 => {
                    return Err(self.error_at(self.pos, "control character in string"));
                }
                Some(_) => self.pos += 1,
            }
        }

        let mut out = String::with_capacity(self.pos - content_start + 16);
        out.push_str(&self.src[content_start..self.pos]);
        loop {
            match bytes.get(self.pos) {
                None => return Err(self.error_at(open, "unterminated string")),
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(Cow::Owned(out));
                }
                Some(b'\\') => {
                    let escape_at = self.pos;
                    self.pos += 1;
                    let decoded = match bytes.get(self.pos) {
                        Some(b'"') => '"',
                        Some(b'\\') => '\\',
                        Some(b'/') => '/',
                        Some(b'b') => '\u{0008}',
                        Some(b'f') => '\u{000C}',
                        Some(b'n') => '\n',
                        Some(b'r') => '\r',
                        Some(b't') => '\t',
                        Some(b'u') => {
                            self.pos += 1;
                            out.push(self.read_unicode_escape(escape_at)?);
                            continue;
                        }
                        _ => return Err(self.error_at(escape_at, "invalid escape sequence")),
                    };
                    self.pos += 1;
                    out.push(decoded);
                }
                Some(&b) if b < 0x20 => {
                    return Err(self.error_at(self.pos, "control character in string"));
                }
                Some(_) => {
                    // Copy the run up to the next quote or backslash in one go.
                    let run_start = self.pos;
                    while let Some(&b) = bytes.get(self.pos) {
                        if b == b'"' || b == b'\\' || b < 0x20 {
                            break;
                        }
                        self.pos += 1;
                    }
                    out.push_str(&self.src[run_start..self.pos]);
                }
            }
        }
    }

    /// Decode the hex digits of a `\u` escape (the reader sits just past the
    /// `u`), combining a surrogate pair when one follows.
    fn read_unicode_escape(&mut self, escape_at: usize) -> Result<char> {
        let high = self.read_hex4(escape_at)?;
        let code = match high {
            0xD800..=0xDBFF => {
                if !self.src[self.pos..].starts_with("\\u") {
                    return Err(self.error_at(escape_at, "unpaired surrogate in \\u escape"));
                }
                let low_at = self.pos;
                self.pos += 2;
                let low = self.read_hex4(low_at)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.error_at(low_at, "invalid low surrogate in \\u escape"));
                }
                0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(self.error_at(escape_at, "unpaired surrogate in \\u escape"));
            }
            _ => u32::from(high),
        };
        char::from_u32(code).ok_or_else(|| self.error_at(escape_at, "invalid \\u escape"))
    }

    fn read_hex4(&mut self, escape_at: usize) -> Result<u16> {
        let digits = self
            .src
            .get(self.pos..self.pos + 4)
            .filter(|d| d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| self.error_at(escape_at, "expected four hex digits in \\u escape"))?;
        let value = u16::from_str_radix(digits, 16)
            .map_err(|_| self.error_at(escape_at, "expected four hex digits in \\u escape"))?;
        self.pos += 4;
        Ok(value)
    }
}

/// Translate a byte offset into a 1-based `(line, column)` pair.
///
/// Lines are split on LF; columns count characters.
pub fn locate(src: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(src.len());
    while !src.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &src[..offset];
    let line = before.bytes().filter(|&b| b == b'\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
