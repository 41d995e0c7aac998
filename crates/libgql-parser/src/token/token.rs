use crate::Pos;
use crate::token::TokenKind;

/// A single lexical token.
///
/// `text` borrows the exact source slice the token was lexed from, so
/// literal tokens carry their raw (un-cooked) text. String literals include
/// their surrounding quotes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub start: Pos,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str, start: Pos) -> Self {
        Self { kind, text, start }
    }

    /// Returns the byte offset one past the last byte of this token.
    pub fn end(&self) -> Pos {
        Pos::new(self.start.byte_offset() + self.text.len())
    }

    /// Returns `true` if this is a `Name` token spelled exactly `keyword`.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Name && self.text == keyword
    }
}
