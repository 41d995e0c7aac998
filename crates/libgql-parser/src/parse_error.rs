use crate::ParseErrorKind;
use crate::Pos;
use crate::SmallVec;
use std::path::Path;

/// Distinguishes explanatory notes from actionable suggestions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseErrorNoteKind {
    General,
    Help,
}

/// Additional context attached to a [`ParseError`], optionally pointing at
/// a related location (e.g. where an unclosed delimiter was opened).
#[derive(Clone, Debug, PartialEq)]
pub struct ParseErrorNote {
    pub kind: ParseErrorNoteKind,
    pub message: String,
    pub pos: Option<Pos>,
}

impl ParseErrorNote {
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            kind: ParseErrorNoteKind::General,
            message: message.into(),
            pos: None,
        }
    }

    pub fn general_at(message: impl Into<String>, pos: Pos) -> Self {
        Self {
            kind: ParseErrorNoteKind::General,
            message: message.into(),
            pos: Some(pos),
        }
    }

    pub fn help(message: impl Into<String>) -> Self {
        Self {
            kind: ParseErrorNoteKind::Help,
            message: message.into(),
            pos: None,
        }
    }
}

/// Most errors carry zero to two notes.
pub type ParseErrorNotes = SmallVec<[ParseErrorNote; 2]>;

/// A parse error: a byte offset, a message, and a categorized kind.
///
/// Line/column information is not stored. It is resolved against the
/// original source only when the error is formatted.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pos: Pos,
    /// Length in bytes of the offending source text (at least 1), used to
    /// underline it.
    len: usize,
    message: String,
    kind: ParseErrorKind,
    notes: ParseErrorNotes,
}

impl ParseError {
    pub fn new(pos: Pos, message: impl Into<String>, kind: ParseErrorKind) -> Self {
        Self {
            pos,
            len: 1,
            message: message.into(),
            kind,
            notes: ParseErrorNotes::new(),
        }
    }

    pub(crate) fn with_len(mut self, len: usize) -> Self {
        self.len = len.max(1);
        self
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn notes(&self) -> &ParseErrorNotes {
        &self.notes
    }

    pub fn add_note(&mut self, note: ParseErrorNote) {
        self.notes.push(note);
    }

    /// Formats this error as a single line:
    ///
    /// ```text
    /// query.graphql:5:12: error: expected `:` after argument name
    /// ```
    pub fn format_oneline(&self, source: &str, file: Option<&Path>) -> String {
        let position = self.pos.to_position(source);
        format!("{}:{position}: error: {}", display_file(file), self.message)
    }

    /// Formats this error as a multi-line diagnostic with a source snippet:
    ///
    /// ```text
    /// error: expected `:` after argument name
    ///   --> query.graphql:1:17
    ///    |
    ///  1 | query { user(id 1) { name } }
    ///    |                 ^
    ///    = help: arguments are written as `name: value`
    /// ```
    pub fn format_detailed(&self, source: &str, file: Option<&Path>) -> String {
        let position = self.pos.to_position(source);
        let mut output = format!(
            "error: {}\n  --> {}:{position}\n",
            self.message,
            display_file(file),
        );

        let underline_len = source
            .get(self.pos.byte_offset()..)
            .map(|rest| {
                rest.char_indices()
                    .take_while(|(idx, ch)| *idx < self.len && *ch != '\n' && *ch != '\r')
                    .count()
            })
            .unwrap_or(1)
            .max(1);
        output.push_str(&format_snippet(source, self.pos, '^', underline_len));

        for note in &self.notes {
            let prefix = match note.kind {
                ParseErrorNoteKind::General => "note",
                ParseErrorNoteKind::Help => "help",
            };
            output.push_str(&format!("   = {prefix}: {}\n", note.message));
            if let Some(note_pos) = note.pos {
                output.push_str(&format_snippet(source, note_pos, '-', 1));
            }
        }

        output
    }
}

fn display_file(file: Option<&Path>) -> String {
    file.map(|p| p.display().to_string())
        .unwrap_or_else(|| "<input>".to_string())
}

fn format_snippet(source: &str, pos: Pos, marker: char, marker_len: usize) -> String {
    let position = pos.to_position(source);
    let Some(line_content) = source.lines().nth(position.line() - 1) else {
        return String::new();
    };
    let line_num = position.line();
    let width = line_num.to_string().len().max(2);

    format!(
        "{:>width$} |\n{line_num:>width$} | {line_content}\n{:>width$} | {:>padding$}{}\n",
        "",
        "",
        "",
        marker.to_string().repeat(marker_len),
        padding = position.column() - 1,
    )
}
