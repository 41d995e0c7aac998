//! Result type for parses that may produce partial results.

use crate::ParseError;
use std::path::Path;

/// The result of a parse.
///
/// Unlike `Result<T, E>`, a `ParseResult` can hold both a (recovered) AST
/// and errors, so several independent syntax errors can be reported from one
/// pass. Terminal errors (document too large, nesting too deep) leave no AST.
///
/// ```
/// let source = "query { a } query { b(x: ) }";
/// let result = libgql_parser::parse(source);
///
/// assert!(result.valid_ast().is_none());
/// assert!(result.ast().is_some());
/// assert_eq!(result.errors.len(), 1);
/// ```
#[derive(Debug)]
pub struct ParseResult<TAst> {
    ast: Option<TAst>,
    pub errors: Vec<ParseError>,
}

impl<TAst> ParseResult<TAst> {
    pub(crate) fn ok(ast: TAst) -> Self {
        Self {
            ast: Some(ast),
            errors: Vec::new(),
        }
    }

    pub(crate) fn err(errors: Vec<ParseError>) -> Self {
        Self { ast: None, errors }
    }

    pub(crate) fn recovered(ast: TAst, errors: Vec<ParseError>) -> Self {
        Self {
            ast: Some(ast),
            errors,
        }
    }

    /// Returns the AST only if parsing produced no errors.
    pub fn valid_ast(&self) -> Option<&TAst> {
        if self.errors.is_empty() {
            self.ast.as_ref()
        } else {
            None
        }
    }

    /// Returns the AST if present, even if it was produced by recovery.
    pub fn ast(&self) -> Option<&TAst> {
        self.ast.as_ref()
    }

    pub fn into_valid_ast(self) -> Option<TAst> {
        if self.errors.is_empty() {
            self.ast
        } else {
            None
        }
    }

    pub fn into_ast(self) -> Option<TAst> {
        self.ast
    }

    pub fn is_ok(&self) -> bool {
        self.ast.is_some() && self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Formats every error as a detailed diagnostic, joined into one
    /// multi-line message.
    pub fn format_errors(&self, source: &str, file: Option<&Path>) -> String {
        self.errors
            .iter()
            .map(|e| e.format_detailed(source, file))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<TAst> From<ParseResult<TAst>> for Result<TAst, Vec<ParseError>> {
    /// Treats recovered ASTs as errors.
    fn from(result: ParseResult<TAst>) -> Self {
        if result.errors.is_empty() {
            match result.ast {
                Some(ast) => Ok(ast),
                None => Err(Vec::new()),
            }
        } else {
            Err(result.errors)
        }
    }
}
