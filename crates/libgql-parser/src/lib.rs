//! A GraphQL lexer and recursive-descent parser for schema documents,
//! executable documents, and documents that mix both together.
//!
//! Every AST node retains the byte offset ([`Pos`]) at which it starts.
//! Offsets are converted to 1-based line/column pairs lazily via
//! [`Pos::to_position()`], so the AST never carries a line table.
//!
//! ```
//! use libgql_parser::parse;
//!
//! let source = "query Hero { hero { name } }";
//! let result = parse(source);
//! assert!(result.is_ok());
//!
//! let doc = result.into_valid_ast().unwrap();
//! assert_eq!(doc.operations().count(), 1);
//! ```

pub mod ast;
mod parse_error;
mod parse_error_kind;
mod parse_result;
mod parser;
mod parser_options;
mod pos;
mod reserved_name_context;
pub mod token;

pub use parse_error::ParseError;
pub use parse_error::ParseErrorNote;
pub use parse_error::ParseErrorNoteKind;
pub use parse_error::ParseErrorNotes;
pub use parse_error_kind::ParseErrorKind;
pub use parse_result::ParseResult;
pub use parser::Parser;
pub use parser_options::ParserOptions;
pub use pos::Pos;
pub use pos::SourcePosition;
pub use reserved_name_context::ReservedNameContext;
pub use smallvec::SmallVec;
pub use smallvec::smallvec;
pub use token::lex;

/// Parses `source` into a [`ast::Document`] using the default
/// [`ParserOptions`].
///
/// The returned [`ParseResult`] may carry both a (partial) document and
/// errors; use [`ParseResult::valid_ast()`] when only fully valid input is
/// acceptable.
pub fn parse(source: &str) -> ParseResult<ast::Document> {
    Parser::new(source).parse_document()
}

/// Parses `source` with explicit limits on document size and nesting depth.
pub fn parse_with_options(
    source: &str,
    options: ParserOptions,
) -> ParseResult<ast::Document> {
    Parser::with_options(source, options).parse_document()
}

#[cfg(test)]
mod tests;
