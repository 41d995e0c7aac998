/// The kind of a GraphQL token.
///
/// Literal tokens store no payload here; their raw text lives on
/// [`Token::text`](crate::token::Token). The lexer never fails: characters
/// it cannot place into any other kind become [`TokenKind::Unknown`] tokens
/// and are reported by the parser.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    // =========================================================================
    // Punctuators
    // =========================================================================
    /// `!`
    Bang,
    /// `$`
    Dollar,
    /// `(`
    ParenOpen,
    /// `)`
    ParenClose,
    /// `...`
    Ellipsis,
    /// `:`
    Colon,
    /// `=`
    Equals,
    /// `@`
    At,
    /// `[`
    SquareBracketOpen,
    /// `]`
    SquareBracketClose,
    /// `{`
    CurlyBraceOpen,
    /// `}`
    CurlyBraceClose,
    /// `|`
    Pipe,

    // =========================================================================
    // Literals
    // =========================================================================
    /// A name matching `[A-Za-z_][A-Za-z0-9_]*`. `true`, `false`, and
    /// `null` are lexed as names; the parser gives them meaning.
    Name,
    /// An integer literal, including an optional leading `-`.
    IntValue,
    /// A float literal, including an optional leading `-`.
    FloatValue,
    /// A `"..."` string literal. May be unterminated if the line (or input)
    /// ended before the closing quote.
    StringValue,
    /// A `"""..."""` block string literal. May be unterminated if the input
    /// ended before the closing `"""`.
    BlockStringValue,

    /// A character (or malformed number) that does not begin any valid
    /// token.
    Unknown,
}

impl TokenKind {
    /// Returns `true` if this token is a punctuator.
    pub fn is_punctuator(&self) -> bool {
        self.as_punctuator_str().is_some()
    }

    /// Returns the source spelling of this token kind if it is a punctuator.
    pub fn as_punctuator_str(&self) -> Option<&'static str> {
        match self {
            TokenKind::Bang => Some("!"),
            TokenKind::Dollar => Some("$"),
            TokenKind::ParenOpen => Some("("),
            TokenKind::ParenClose => Some(")"),
            TokenKind::Ellipsis => Some("..."),
            TokenKind::Colon => Some(":"),
            TokenKind::Equals => Some("="),
            TokenKind::At => Some("@"),
            TokenKind::SquareBracketOpen => Some("["),
            TokenKind::SquareBracketClose => Some("]"),
            TokenKind::CurlyBraceOpen => Some("{"),
            TokenKind::CurlyBraceClose => Some("}"),
            TokenKind::Pipe => Some("|"),

            TokenKind::Name
            | TokenKind::IntValue
            | TokenKind::FloatValue
            | TokenKind::StringValue
            | TokenKind::BlockStringValue
            | TokenKind::Unknown => None,
        }
    }

    /// Returns `true` for string and block string literals.
    pub fn is_string(&self) -> bool {
        matches!(self, TokenKind::StringValue | TokenKind::BlockStringValue)
    }

    /// Returns the closing delimiter matching this opening delimiter.
    pub fn closing_delimiter(&self) -> Option<TokenKind> {
        match self {
            TokenKind::ParenOpen => Some(TokenKind::ParenClose),
            TokenKind::SquareBracketOpen => Some(TokenKind::SquareBracketClose),
            TokenKind::CurlyBraceOpen => Some(TokenKind::CurlyBraceClose),
            _ => None,
        }
    }

    /// Returns `true` for `)`, `]`, and `}`.
    pub fn is_closing_delimiter(&self) -> bool {
        matches!(
            self,
            TokenKind::ParenClose
                | TokenKind::SquareBracketClose
                | TokenKind::CurlyBraceClose
        )
    }

    /// A short human-readable description used in diagnostics.
    pub fn description(&self) -> &'static str {
        if let Some(punct) = self.as_punctuator_str() {
            return punct;
        }
        match self {
            TokenKind::Name => "name",
            TokenKind::IntValue => "integer",
            TokenKind::FloatValue => "float",
            TokenKind::StringValue => "string",
            TokenKind::BlockStringValue => "block string",
            _ => "unknown character",
        }
    }
}
