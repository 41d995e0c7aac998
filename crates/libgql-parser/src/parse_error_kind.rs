use crate::ReservedNameContext;
use crate::token::StringLiteralError;

/// Categorizes parse errors for programmatic handling.
///
/// Each variant carries only the data needed for programmatic decisions.
/// Human-readable context lives in the owning
/// [`ParseError`](crate::ParseError)'s message and notes.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    /// Expected specific token(s) but found something else.
    ///
    /// ```text
    /// query { user(id 1) { name } }
    ///                 ^ expected `:`, found `1`
    /// ```
    #[error("unexpected token: `{found}`")]
    UnexpectedToken {
        expected: Vec<String>,
        found: String,
    },

    /// The document ended before a complete construct was parsed.
    #[error("unexpected end of input")]
    UnexpectedEof { expected: Vec<String> },

    /// A delimiter was opened but never closed.
    #[error("unclosed delimiter: `{delimiter}`")]
    UnclosedDelimiter { delimiter: String },

    /// A closing delimiter did not match the most recently opened one.
    ///
    /// ```text
    /// query { field(arg: [1, 2)) }
    ///                         ^ expected `]`, found `)`
    /// ```
    #[error("mismatched delimiter")]
    MismatchedDelimiter { expected: String, found: String },

    /// The lexer produced an `Unknown` token: a character outside the
    /// grammar or a malformed number.
    #[error("invalid token: `{text}`")]
    InvalidToken { text: String },

    /// A string literal could not be cooked.
    #[error("invalid string literal")]
    InvalidString(StringLiteralError),

    /// A reserved name was used where it is not allowed.
    ///
    /// ```text
    /// fragment on on User { name }
    ///          ^^ fragment name cannot be `on`
    /// ```
    #[error("reserved name: `{name}`")]
    ReservedName {
        name: String,
        context: ReservedNameContext,
    },

    /// A definition keyword outside the supported subset (`interface`,
    /// `union`, `directive`, `schema`, `extend`).
    #[error("unsupported definition: `{keyword}`")]
    UnsupportedDefinition { keyword: String },

    /// `{ }` selection sets and `()` argument lists are not allowed.
    #[error("invalid empty construct: `{construct}`")]
    InvalidEmptyConstruct { construct: String },

    /// The input exceeded [`ParserOptions::max_document_size`](crate::ParserOptions).
    /// Terminal.
    #[error("document too large")]
    DocumentTooLarge { size: usize, limit: usize },

    /// Nesting exceeded [`ParserOptions::max_recursion_depth`](crate::ParserOptions).
    /// Terminal.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded { limit: usize },

    /// Catch-all for syntax errors without a dedicated variant.
    #[error("invalid syntax")]
    InvalidSyntax,
}

impl ParseErrorKind {
    /// Terminal errors abort the parse; no document is produced.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::DocumentTooLarge { .. } | Self::RecursionLimitExceeded { .. }
        )
    }
}
