//! Token types and the lexer that produces them.

mod lexer;
mod string_literal;
mod string_literal_error;
mod token;
mod token_kind;

pub use lexer::Lexer;
pub use lexer::lex;
pub use string_literal::cook_string_literal;
pub use string_literal_error::StringLiteralError;
pub use token::Token;
pub use token_kind::TokenKind;

#[cfg(test)]
mod tests;
