/// Resource limits applied by the [`Parser`](crate::Parser).
///
/// Both limits are terminal: exceeding either one aborts the parse with a
/// single error and no AST.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParserOptions {
    /// Maximum accepted document size in bytes.
    pub max_document_size: usize,

    /// Maximum nesting depth shared by values, selection sets, and type
    /// references.
    ///
    /// Guards against stack exhaustion from inputs like `[[[[[...` or
    /// `{ a { a { a ...`. Real-world documents rarely nest more than 15
    /// levels deep.
    pub max_recursion_depth: usize,
}

impl ParserOptions {
    pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 1024 * 1024;
    pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 64;
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_document_size: Self::DEFAULT_MAX_DOCUMENT_SIZE,
            max_recursion_depth: Self::DEFAULT_MAX_RECURSION_DEPTH,
        }
    }
}
