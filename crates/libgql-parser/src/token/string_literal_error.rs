/// Errors produced while cooking the raw text of a string literal into its
/// value.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum StringLiteralError {
    #[error("unterminated string literal")]
    Unterminated,

    #[error("invalid escape sequence `{0}`")]
    InvalidEscapeSequence(String),

    #[error("invalid unicode escape `{0}`")]
    InvalidUnicodeEscape(String),

    #[error("invalid character {0:?} in string literal")]
    InvalidCharacter(char),
}
