//! Source locations attached to schema and request errors.

use libgql_parser::Pos;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;

/// A 1-based position within an operation document, as reported in GraphQL
/// responses (`{"line": 1, "column": 5}`).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}
impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Resolves `pos` against the document text it was parsed from.
    pub fn from_pos(source: &str, pos: Pos) -> Self {
        let position = pos.to_position(source);
        Self::new(position.line(), position.column())
    }
}
impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A position within a schema file (or an in-memory schema string when
/// `file` is `None`).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FilePosition {
    pub file: Option<PathBuf>,
    pub line: usize,
    pub col: usize,
}
impl FilePosition {
    pub fn from_pos(file: Option<&Path>, source: &str, pos: Pos) -> Self {
        let position = pos.to_position(source);
        Self {
            file: file.map(Path::to_path_buf),
            line: position.line(),
            col: position.column(),
        }
    }
}
impl std::fmt::Display for FilePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file.display(), self.line, self.col),
            None => write!(f, "{}:{}", self.line, self.col),
        }
    }
}

/// Where a schema element was defined.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum SchemaDefLocation {
    /// Builtin scalars, directives, and introspection types.
    GraphQLBuiltIn,
    Schema(FilePosition),
}
impl std::fmt::Display for SchemaDefLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GraphQLBuiltIn => f.write_str("<builtin>"),
            Self::Schema(pos) => write!(f, "{pos}"),
        }
    }
}
