/// A byte offset into the source text of a GraphQL document.
///
/// `Pos` is the only location information stored on tokens and AST nodes.
/// Human-readable line/column information is derived on demand with
/// [`Pos::to_position()`], which re-scans the original source text. This
/// keeps AST nodes small and decoupled from any particular line table.
///
/// Offsets are stored as `u32`. Documents are bounded by
/// [`ParserOptions::max_document_size`](crate::ParserOptions), which is far
/// below 4 GiB.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Pos(u32);

impl Pos {
    /// Creates a `Pos` from a byte offset, saturating at `u32::MAX`.
    pub fn new(byte_offset: usize) -> Self {
        Self(u32::try_from(byte_offset).unwrap_or(u32::MAX))
    }

    /// Returns the 0-based byte offset.
    pub fn byte_offset(&self) -> usize {
        self.0 as usize
    }

    /// Resolves this byte offset into a 1-based [`SourcePosition`] against
    /// the source text it was produced from.
    ///
    /// `\r\n` counts as a single line break; lone `\r` and `\n` each break
    /// a line. Columns count characters (not bytes). Offsets past the end of
    /// `source` resolve to the position just after the last character, and
    /// offsets that fall inside a multi-byte character resolve to that
    /// character's position.
    pub fn to_position(&self, source: &str) -> SourcePosition {
        let target = self.byte_offset().min(source.len());
        let mut line = 1;
        let mut column = 1;
        let mut prev_was_cr = false;

        for (idx, ch) in source.char_indices() {
            if idx >= target {
                break;
            }
            match ch {
                // Second half of a `\r\n` pair: the line was already bumped.
                '\n' if prev_was_cr => {},
                '\n' | '\r' => {
                    line += 1;
                    column = 1;
                },
                _ => column += 1,
            }
            prev_was_cr = ch == '\r';
        }

        SourcePosition::new(line, column)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// A 1-based line/column pair within a GraphQL source document.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SourcePosition {
    line: usize,
    column: usize,
}

impl SourcePosition {
    /// Creates a new `SourcePosition` from 1-based line and column numbers.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Returns the 1-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the 1-based column, counted in characters.
    pub fn column(&self) -> usize {
        self.column
    }
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
