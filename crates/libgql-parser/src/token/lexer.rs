//! A lexer that turns GraphQL source text into a flat sequence of
//! [`Token`]s.
//!
//! The lexer never fails. Characters that cannot begin any token (and
//! malformed numbers) are emitted as [`TokenKind::Unknown`] tokens so the
//! parser can report them with a precise position and keep going.
//!
//! Ignored tokens (whitespace, line terminators, commas, the byte order
//! mark, and `#` comments) produce no token. Since every [`Token`] records
//! its own byte offset, skipping them still leaves enough information to
//! recover line/column pairs later via [`Pos::to_position()`].
//!
//! ```rust
//! use libgql_parser::token::TokenKind;
//!
//! let kinds: Vec<_> = libgql_parser::lex("{ name }")
//!     .into_iter()
//!     .map(|t| t.kind)
//!     .collect();
//! assert_eq!(kinds, vec![
//!     TokenKind::CurlyBraceOpen,
//!     TokenKind::Name,
//!     TokenKind::CurlyBraceClose,
//! ]);
//! ```

use crate::Pos;
use crate::token::Token;
use crate::token::TokenKind;

/// Lexes `input` into a vector of tokens, stopping at end of input.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// An iterator over the tokens of a GraphQL source string.
pub struct Lexer<'src> {
    /// The full source text being lexed.
    source: &'src str,

    /// Current byte offset from the start of `source`.
    curr_byte_offset: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            curr_byte_offset: 0,
        }
    }

    // =========================================================================
    // Scanning helpers
    // =========================================================================

    fn bytes(&self) -> &'src [u8] {
        self.source.as_bytes()
    }

    fn peek_byte(&self) -> Option<u8> {
        self.peek_byte_nth(0)
    }

    fn peek_byte_nth(&self, n: usize) -> Option<u8> {
        self.bytes().get(self.curr_byte_offset + n).copied()
    }

    fn remaining(&self) -> &'src str {
        &self.source[self.curr_byte_offset..]
    }

    fn consume_while(&mut self, pred: impl Fn(u8) -> bool) {
        while let Some(b) = self.peek_byte()
            && pred(b)
        {
            self.curr_byte_offset += 1;
        }
    }

    fn make_token(&self, kind: TokenKind, start: usize) -> Token<'src> {
        Token::new(
            kind,
            &self.source[start..self.curr_byte_offset],
            Pos::new(start),
        )
    }

    fn punctuator(&mut self, kind: TokenKind, len: usize) -> Token<'src> {
        let start = self.curr_byte_offset;
        self.curr_byte_offset += len;
        self.make_token(kind, start)
    }

    // =========================================================================
    // Ignored tokens
    // =========================================================================

    /// Skips whitespace, line terminators, commas, byte order marks, and
    /// comments.
    fn skip_ignored(&mut self) {
        loop {
            match self.peek_byte() {
                Some(b' ' | b'\t' | b'\n' | b'\r' | b',') => {
                    self.curr_byte_offset += 1;
                },
                Some(b'#') => self.skip_comment(),
                Some(0xEF) if self.remaining().starts_with('\u{FEFF}') => {
                    self.curr_byte_offset += '\u{FEFF}'.len_utf8();
                },
                _ => return,
            }
        }
    }

    /// Skips a `#` comment up to (but not including) the line terminator.
    fn skip_comment(&mut self) {
        let rest = &self.bytes()[self.curr_byte_offset..];
        match memchr::memchr2(b'\n', b'\r', rest) {
            Some(idx) => self.curr_byte_offset += idx,
            None => self.curr_byte_offset = self.source.len(),
        }
    }

    // =========================================================================
    // Token lexing
    // =========================================================================

    fn next_token(&mut self) -> Option<Token<'src>> {
        self.skip_ignored();

        let byte = self.peek_byte()?;
        let token = match byte {
            b'!' => self.punctuator(TokenKind::Bang, 1),
            b'$' => self.punctuator(TokenKind::Dollar, 1),
            b'(' => self.punctuator(TokenKind::ParenOpen, 1),
            b')' => self.punctuator(TokenKind::ParenClose, 1),
            b':' => self.punctuator(TokenKind::Colon, 1),
            b'=' => self.punctuator(TokenKind::Equals, 1),
            b'@' => self.punctuator(TokenKind::At, 1),
            b'[' => self.punctuator(TokenKind::SquareBracketOpen, 1),
            b']' => self.punctuator(TokenKind::SquareBracketClose, 1),
            b'{' => self.punctuator(TokenKind::CurlyBraceOpen, 1),
            b'}' => self.punctuator(TokenKind::CurlyBraceClose, 1),
            b'|' => self.punctuator(TokenKind::Pipe, 1),

            b'.' => {
                if self.remaining().starts_with("...") {
                    self.punctuator(TokenKind::Ellipsis, 3)
                } else {
                    self.punctuator(TokenKind::Unknown, 1)
                }
            },

            b'"' => {
                if self.remaining().starts_with("\"\"\"") {
                    self.lex_block_string()
                } else {
                    self.lex_string()
                }
            },

            b if is_name_start(b) => self.lex_name(),
            b'-' | b'0'..=b'9' => self.lex_number(),

            _ => self.lex_unknown_char(),
        };
        Some(token)
    }

    /// Lexes a single character that cannot begin a token.
    fn lex_unknown_char(&mut self) -> Token<'src> {
        let start = self.curr_byte_offset;
        let ch_len = self
            .remaining()
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.curr_byte_offset += ch_len;
        self.make_token(TokenKind::Unknown, start)
    }

    /// Lexes a name matching `/[_A-Za-z][_0-9A-Za-z]*/`.
    ///
    /// `true`, `false`, and `null` are ordinary names at this level.
    fn lex_name(&mut self) -> Token<'src> {
        let start = self.curr_byte_offset;
        self.curr_byte_offset += 1;
        self.consume_while(is_name_continue);
        self.make_token(TokenKind::Name, start)
    }

    /// Lexes an integer or float literal.
    ///
    /// Handles:
    /// - Optional negative sign: `-`
    /// - Integer part: `0` or `[1-9][0-9]*`
    /// - Optional fractional part: `.[0-9]+`
    /// - Optional exponent: `[eE][+-]?[0-9]+`
    ///
    /// A `.` that is not followed by a digit ends the number, so `1.` lexes
    /// as an integer followed by an unknown `.`.
    fn lex_number(&mut self) -> Token<'src> {
        let start = self.curr_byte_offset;
        let mut is_float = false;

        if self.peek_byte() == Some(b'-') {
            self.curr_byte_offset += 1;
        }

        match self.peek_byte() {
            Some(b'0') => {
                self.curr_byte_offset += 1;
                if matches!(self.peek_byte(), Some(b) if b.is_ascii_digit()) {
                    return self.lex_number_error(start);
                }
            },
            Some(b) if b.is_ascii_digit() => {
                self.consume_while(|b| b.is_ascii_digit());
            },
            // A lone `-`.
            _ => return self.make_token(TokenKind::Unknown, start),
        }

        if self.peek_byte() == Some(b'.')
            && matches!(self.peek_byte_nth(1), Some(b) if b.is_ascii_digit())
        {
            is_float = true;
            self.curr_byte_offset += 1;
            self.consume_while(|b| b.is_ascii_digit());
        }

        if matches!(self.peek_byte(), Some(b'e' | b'E')) {
            is_float = true;
            self.curr_byte_offset += 1;
            if matches!(self.peek_byte(), Some(b'+' | b'-')) {
                self.curr_byte_offset += 1;
            }
            if !matches!(self.peek_byte(), Some(b) if b.is_ascii_digit()) {
                return self.lex_number_error(start);
            }
            self.consume_while(|b| b.is_ascii_digit());
        }

        // `123abc` and `1.5.3` are not two tokens: the number must not run
        // straight into a name start or another `.`.
        if let Some(b) = self.peek_byte()
            && (is_name_start(b) || (b == b'.' && is_float))
        {
            return self.lex_number_error(start);
        }

        let kind = if is_float {
            TokenKind::FloatValue
        } else {
            TokenKind::IntValue
        };
        self.make_token(kind, start)
    }

    /// Consumes the rest of a malformed number and emits it as a single
    /// `Unknown` token.
    fn lex_number_error(&mut self, start: usize) -> Token<'src> {
        self.consume_while(|b| {
            b.is_ascii_alphanumeric() || matches!(b, b'.' | b'+' | b'-' | b'_')
        });
        // Never swallow a following `...` spread.
        if let Some(dots) = self.source[start..self.curr_byte_offset].find("...") {
            self.curr_byte_offset = start + dots;
        }
        self.make_token(TokenKind::Unknown, start)
    }

    /// Lexes a `"..."` string.
    ///
    /// The token ends after the closing `"`, or just before an unescaped line
    /// terminator (or at end of input) when the string is unterminated. The
    /// parser reports unterminated strings when it cooks the literal.
    fn lex_string(&mut self) -> Token<'src> {
        let start = self.curr_byte_offset;
        self.curr_byte_offset += 1;

        while let Some(b) = self.peek_byte() {
            match b {
                b'"' => {
                    self.curr_byte_offset += 1;
                    break;
                },
                b'\n' | b'\r' => break,
                b'\\' => {
                    self.curr_byte_offset += 1;
                    // An escaped quote or backslash never terminates the
                    // string; an escaped line terminator is left for the
                    // newline check above.
                    if matches!(self.peek_byte(), Some(b'"' | b'\\')) {
                        self.curr_byte_offset += 1;
                    }
                },
                _ => self.curr_byte_offset += 1,
            }
        }

        self.make_token(TokenKind::StringValue, start)
    }

    /// Lexes a `"""..."""` block string, treating `\"""` as escaped.
    fn lex_block_string(&mut self) -> Token<'src> {
        let start = self.curr_byte_offset;
        self.curr_byte_offset += 3;

        loop {
            let rest = &self.bytes()[self.curr_byte_offset..];
            let Some(idx) = memchr::memchr2(b'"', b'\\', rest) else {
                self.curr_byte_offset = self.source.len();
                break;
            };
            self.curr_byte_offset += idx;

            if self.remaining().starts_with("\\\"\"\"") {
                self.curr_byte_offset += 4;
            } else if self.remaining().starts_with("\"\"\"") {
                self.curr_byte_offset += 3;
                break;
            } else {
                self.curr_byte_offset += 1;
            }
        }

        self.make_token(TokenKind::BlockStringValue, start)
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        self.next_token()
    }
}

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_name_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
