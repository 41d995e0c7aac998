//! Recursive descent parser for GraphQL documents.
//!
//! The parser lexes the whole input up front and then walks the token
//! vector with one token of lookahead (two where a `... on` inline fragment
//! has to be told apart from a fragment spread).
//!
//! # Error Recovery
//!
//! Most grammar rules have a `parse_*` method returning `Result<T, ()>`,
//! where `Err(())` means an error was already recorded. Delimited lists
//! (arguments, selection sets, field definitions, ...) are parsed by
//! [`Parser::group()`], which on a malformed element skips forward to the
//! next plausible element or to the matching closing delimiter, tracking
//! bracket balance along the way. One malformed element therefore does not
//! hide errors in the rest of the document.
//!
//! Exceeding the document size or nesting depth limit aborts the parse: the
//! result carries exactly one error and no AST.

use crate::ParseError;
use crate::ParseErrorKind;
use crate::ParseErrorNote;
use crate::ParseResult;
use crate::ParserOptions;
use crate::Pos;
use crate::ReservedNameContext;
use crate::ast;
use crate::token::Token;
use crate::token::TokenKind;
use crate::token::cook_string_literal;
use smallvec::SmallVec;

// =============================================================================
// Delimiter tracking for error recovery
// =============================================================================

/// Context in which a delimiter was opened.
#[derive(Clone, Copy, Debug)]
enum DelimiterContext {
    /// `{ field ... }` in operations/fragments
    SelectionSet,
    /// `(arg: value)` on a field
    FieldArguments,
    /// `@directive(arg: value)`
    DirectiveArguments,
    /// `($var: Type)` in an operation header
    VariableDefinitions,
    /// `[value, ...]`
    ListValue,
    /// `{ field: value }`
    ObjectValue,
    /// `[Type]`
    ListType,
    /// `type Foo { ... }`
    FieldsDefinition,
    /// `(name: Type)` on a field definition
    ArgumentDefinitions,
    /// `enum Foo { ... }`
    EnumValues,
    /// `input Foo { ... }`
    InputFieldsDefinition,
}

impl DelimiterContext {
    fn description(&self) -> &'static str {
        match self {
            Self::SelectionSet => "selection set",
            Self::FieldArguments => "field arguments",
            Self::DirectiveArguments => "directive arguments",
            Self::VariableDefinitions => "variable definitions",
            Self::ListValue => "list value",
            Self::ObjectValue => "object value",
            Self::ListType => "list type",
            Self::FieldsDefinition => "fields definition",
            Self::ArgumentDefinitions => "argument definitions",
            Self::EnumValues => "enum values definition",
            Self::InputFieldsDefinition => "input fields definition",
        }
    }

    /// List and object literals may be empty; every other group needs at
    /// least one element.
    fn allows_empty(&self) -> bool {
        matches!(self, Self::ListValue | Self::ObjectValue)
    }

    /// Whether `token` can begin a new element of this group. Recovery
    /// resumes at such tokens.
    fn is_resume_point(&self, token: &Token<'_>) -> bool {
        match self {
            Self::SelectionSet => {
                matches!(token.kind, TokenKind::Name | TokenKind::Ellipsis)
            },
            Self::FieldArguments | Self::DirectiveArguments | Self::ObjectValue => {
                token.kind == TokenKind::Name
            },
            Self::VariableDefinitions => token.kind == TokenKind::Dollar,
            Self::ListValue => matches!(
                token.kind,
                TokenKind::Dollar
                    | TokenKind::IntValue
                    | TokenKind::FloatValue
                    | TokenKind::StringValue
                    | TokenKind::BlockStringValue
                    | TokenKind::Name
                    | TokenKind::SquareBracketOpen
                    | TokenKind::CurlyBraceOpen
            ),
            Self::ListType => false,
            Self::FieldsDefinition
            | Self::ArgumentDefinitions
            | Self::EnumValues
            | Self::InputFieldsDefinition => {
                token.kind == TokenKind::Name || token.kind.is_string()
            },
        }
    }
}

/// Tracks an open delimiter for error recovery.
#[derive(Clone, Debug)]
struct OpenDelimiter {
    kind: TokenKind,
    pos: Pos,
    context: DelimiterContext,
}

/// Where a value is being parsed, determining whether variables are
/// allowed.
#[derive(Clone, Copy, Debug)]
enum ConstContext {
    AllowVariables,
    VariableDefaultValue,
    InputDefaultValue,
    SchemaDirectiveArgument,
}

impl ConstContext {
    fn forbidden_description(&self) -> Option<&'static str> {
        match self {
            Self::AllowVariables => None,
            Self::VariableDefaultValue => Some("variable default values"),
            Self::InputDefaultValue => Some("input value default values"),
            Self::SchemaDirectiveArgument => Some("schema directive arguments"),
        }
    }
}

// =============================================================================
// Main parser struct
// =============================================================================

/// A recursive descent parser for GraphQL documents.
///
/// A single document may freely mix operations, fragments, and type
/// definitions; separating executable from schema content is left to the
/// schema builder and validator.
///
/// ```
/// use libgql_parser::Parser;
/// use libgql_parser::ast;
///
/// let result = Parser::new("type Query { hello: String }").parse_document();
/// let doc = result.valid_ast().unwrap();
/// assert!(matches!(doc.definitions[0], ast::Definition::Type(_)));
/// ```
pub struct Parser<'src> {
    source: &'src str,
    options: ParserOptions,

    tokens: Vec<Token<'src>>,
    cursor: usize,

    errors: Vec<ParseError>,

    /// Stack of open delimiters. Most documents nest fewer than 8
    /// delimiters deep.
    delimiter_stack: SmallVec<[OpenDelimiter; 8]>,

    /// Shared nesting depth of values, selection sets, and type references.
    recursion_depth: usize,

    /// Set once a terminal error has been recorded; every parse method then
    /// unwinds without recording anything else.
    terminal_error: Option<ParseError>,

    /// Set once an end-of-input error has been recorded. Enclosing
    /// constructs that are consequently also unfinished stay quiet.
    eof_reported: bool,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self::with_options(source, ParserOptions::default())
    }

    pub fn with_options(source: &'src str, options: ParserOptions) -> Self {
        Self {
            source,
            options,
            tokens: Vec::new(),
            cursor: 0,
            errors: Vec::new(),
            delimiter_stack: SmallVec::new(),
            recursion_depth: 0,
            terminal_error: None,
            eof_reported: false,
        }
    }

    /// Parses the whole input as a document of definitions.
    pub fn parse_document(mut self) -> ParseResult<ast::Document> {
        if self.source.len() > self.options.max_document_size {
            log::debug!(
                "rejecting {}-byte document (limit {})",
                self.source.len(),
                self.options.max_document_size,
            );
            return ParseResult::err(vec![ParseError::new(
                Pos::new(0),
                format!(
                    "document is {} bytes, exceeding the maximum of {} bytes",
                    self.source.len(),
                    self.options.max_document_size,
                ),
                ParseErrorKind::DocumentTooLarge {
                    size: self.source.len(),
                    limit: self.options.max_document_size,
                },
            )]);
        }

        self.tokens = crate::lex(self.source);
        log::trace!("lexed {} tokens", self.tokens.len());

        let mut definitions = Vec::new();
        while self.terminal_error.is_none() && !self.is_at_end() {
            let start_cursor = self.cursor;
            match self.parse_definition() {
                Ok(Some(def)) => definitions.push(def),
                Ok(None) => {},
                Err(()) => {
                    if self.cursor == start_cursor {
                        self.bump();
                    }
                    self.recover_to_next_definition();
                },
            }
        }

        if let Some(terminal) = self.terminal_error {
            return ParseResult::err(vec![terminal]);
        }

        let document = ast::Document { definitions };
        if self.errors.is_empty() {
            ParseResult::ok(document)
        } else {
            ParseResult::recovered(document, self.errors)
        }
    }

    // =========================================================================
    // Token access
    // =========================================================================

    fn peek(&self) -> Option<Token<'src>> {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> Option<Token<'src>> {
        self.tokens.get(self.cursor + n).copied()
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn peek_is_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    fn is_at_end(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn bump(&mut self) -> Option<Token<'src>> {
        let token = self.peek()?;
        self.cursor += 1;
        Some(token)
    }

    fn eof_pos(&self) -> Pos {
        Pos::new(self.source.len())
    }

    fn is_aborted(&self) -> bool {
        self.terminal_error.is_some()
    }

    // =========================================================================
    // Error recording and recovery
    // =========================================================================

    fn record_error(&mut self, error: ParseError) {
        if self.is_aborted() {
            return;
        }
        let is_eof_error = matches!(
            error.kind(),
            ParseErrorKind::UnexpectedEof { .. } | ParseErrorKind::UnclosedDelimiter { .. }
        ) && error.pos() == self.eof_pos();
        if is_eof_error {
            if self.eof_reported {
                return;
            }
            self.eof_reported = true;
        }
        self.errors.push(error);
    }

    fn record_terminal_error(&mut self, error: ParseError) {
        if self.terminal_error.is_none() {
            log::debug!("aborting parse: {}", error.message());
            self.terminal_error = Some(error);
        }
    }

    /// Records an "expected X" error against the next token without
    /// consuming it.
    fn record_unexpected(&mut self, expected: &str) {
        let Some(token) = self.peek() else {
            let error = ParseError::new(
                self.eof_pos(),
                format!("expected {expected}, found end of input"),
                ParseErrorKind::UnexpectedEof {
                    expected: vec![expected.to_string()],
                },
            );
            self.record_error(error);
            return;
        };

        if token.kind == TokenKind::Unknown {
            self.record_invalid_token(token);
            return;
        }

        let found = token_display(&token);
        let error = ParseError::new(
            token.start,
            format!("expected {expected}, found `{found}`"),
            ParseErrorKind::UnexpectedToken {
                expected: vec![expected.to_string()],
                found,
            },
        )
        .with_len(token.text.len());
        self.record_error(error);
    }

    fn record_invalid_token(&mut self, token: Token<'src>) {
        let starts_number = token.text.len() > 1
            && token
                .text
                .starts_with(|c: char| c.is_ascii_digit() || c == '-');
        let message = if starts_number {
            format!("invalid number `{}`", token.text)
        } else {
            format!("unexpected character `{}`", token.text)
        };
        let mut error = ParseError::new(
            token.start,
            message,
            ParseErrorKind::InvalidToken {
                text: token.text.to_string(),
            },
        )
        .with_len(token.text.len());
        if token.text == "." {
            error.add_note(ParseErrorNote::help(
                "a `.` must either be part of a `...` spread or followed by \
                 fraction digits",
            ));
        } else if token.text.starts_with("-0") || token.text.starts_with('0') {
            error.add_note(ParseErrorNote::help(
                "integers may not have leading zeros",
            ));
        }
        self.record_error(error);
    }

    /// Skips tokens until something that looks like the start of a new
    /// definition.
    fn recover_to_next_definition(&mut self) {
        while let Some(token) = self.peek() {
            let is_start = match token.kind {
                TokenKind::CurlyBraceOpen => true,
                TokenKind::Name => self.looks_like_definition_start(token.text, 1),
                TokenKind::StringValue | TokenKind::BlockStringValue => self
                    .peek_nth(1)
                    .is_some_and(|next| {
                        next.kind == TokenKind::Name
                            && is_type_definition_keyword(next.text)
                            && self.looks_like_definition_start(next.text, 2)
                    }),
                _ => false,
            };
            if is_start {
                break;
            }
            self.bump();
        }
        self.delimiter_stack.clear();
    }

    /// Whether `keyword` (located `offset - 1` tokens ahead) starts a
    /// definition, judged by the token following it. Avoids treating field
    /// names like `type: String` as recovery points.
    fn looks_like_definition_start(&self, keyword: &str, offset: usize) -> bool {
        let next = self.peek_nth(offset);
        let next_kind = next.map(|t| t.kind);
        match keyword {
            "query" | "mutation" | "subscription" => {
                next.is_none()
                    || matches!(
                        next_kind,
                        Some(
                            TokenKind::Name
                                | TokenKind::CurlyBraceOpen
                                | TokenKind::ParenOpen
                                | TokenKind::At
                        )
                    )
            },
            "fragment" => next.is_some_and(|t| t.kind == TokenKind::Name && t.text != "on"),
            "type" | "scalar" | "enum" | "input" | "interface" | "union" => {
                next_kind == Some(TokenKind::Name)
            },
            "directive" => next_kind == Some(TokenKind::At),
            "schema" => matches!(
                next_kind,
                Some(TokenKind::CurlyBraceOpen | TokenKind::At)
            ),
            "extend" => next.is_some_and(|t| {
                t.kind == TokenKind::Name
                    && (is_type_definition_keyword(t.text)
                        || matches!(t.text, "interface" | "union" | "schema"))
            }),
            _ => false,
        }
    }

    fn push_delimiter(&mut self, kind: TokenKind, pos: Pos, context: DelimiterContext) {
        self.delimiter_stack.push(OpenDelimiter { kind, pos, context });
    }

    fn pop_delimiter(&mut self) -> Option<OpenDelimiter> {
        self.delimiter_stack.pop()
    }

    /// Builds an "unclosed delimiter" error for the innermost open delimiter.
    fn unclosed_delimiter_error(&self, at: Pos, delim: &OpenDelimiter) -> ParseError {
        let open = delim.kind.as_punctuator_str().unwrap_or("?");
        let mut error = ParseError::new(
            at,
            format!("unclosed `{open}` in {}", delim.context.description()),
            ParseErrorKind::UnclosedDelimiter {
                delimiter: open.to_string(),
            },
        );
        error.add_note(ParseErrorNote::general_at(
            format!("opening `{open}` here"),
            delim.pos,
        ));
        error
    }

    // =========================================================================
    // Token expectation helpers
    // =========================================================================

    /// Consumes a token of `kind` or records an error without consuming.
    fn expect(&mut self, kind: TokenKind) -> Result<Token<'src>, ()> {
        if self.peek_is(kind) {
            return self.bump().ok_or(());
        }
        self.record_unexpected(&format!("`{}`", kind.description()));
        Err(())
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<Token<'src>, ()> {
        if self.peek_is_keyword(keyword) {
            return self.bump().ok_or(());
        }
        self.record_unexpected(&format!("`{keyword}`"));
        Err(())
    }

    /// Consumes a name. Keywords such as `query`, `on`, or `true` are valid
    /// names in this position.
    fn expect_name(&mut self, what: &str) -> Result<ast::Name, ()> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Name => {
                self.bump();
                Ok(ast::Name::new(token.text, token.start))
            },
            _ => {
                self.record_unexpected(what);
                Err(())
            },
        }
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    /// Increments the nesting depth, aborting the parse once it exceeds the
    /// configured limit. Callers must pair a successful call with
    /// [`exit_recursion()`](Self::exit_recursion).
    fn enter_recursion(&mut self) -> Result<(), ()> {
        if self.is_aborted() {
            return Err(());
        }
        if self.recursion_depth >= self.options.max_recursion_depth {
            let pos = self.peek().map_or_else(|| self.eof_pos(), |t| t.start);
            let limit = self.options.max_recursion_depth;
            self.record_terminal_error(ParseError::new(
                pos,
                format!("maximum nesting depth of {limit} exceeded"),
                ParseErrorKind::RecursionLimitExceeded { limit },
            ));
            return Err(());
        }
        self.recursion_depth += 1;
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.recursion_depth -= 1;
    }

    // =========================================================================
    // Delimited groups
    // =========================================================================

    /// Parses `open item* close`, recovering from malformed items.
    ///
    /// When `item` fails, tokens are skipped (respecting nested delimiters)
    /// until the next token that can start an item, or until this group's
    /// closing delimiter. A closing delimiter that belongs to an enclosing
    /// group means this group was left unclosed: that is reported and
    /// `Err(())` returned without consuming it. Reaching end of input also
    /// returns `Err(())`. Otherwise the (possibly partial) items are
    /// returned together with the position of the opening delimiter.
    fn group<T>(
        &mut self,
        open: TokenKind,
        context: DelimiterContext,
        mut item: impl FnMut(&mut Self) -> Result<T, ()>,
    ) -> Result<(Vec<T>, Pos), ()> {
        let open_token = self.expect(open)?;
        let close = open.closing_delimiter().ok_or(())?;
        self.push_delimiter(open, open_token.start, context);

        let mut items = Vec::new();
        let mut had_item_error = false;
        loop {
            if self.is_aborted() {
                self.pop_delimiter();
                return Err(());
            }

            let Some(token) = self.peek() else {
                if let Some(delim) = self.pop_delimiter() {
                    let error = self.unclosed_delimiter_error(self.eof_pos(), &delim);
                    self.record_error(error);
                }
                return Err(());
            };

            if token.kind == close {
                self.bump();
                self.pop_delimiter();
                break;
            }

            if token.kind.is_closing_delimiter() {
                if self.closes_enclosing_delimiter(token.kind) {
                    if let Some(delim) = self.pop_delimiter() {
                        let error = self.unclosed_delimiter_error(token.start, &delim);
                        self.record_error(error);
                    }
                    return Err(());
                }
                let expected = close.description().to_string();
                let found = token.text.to_string();
                self.record_error(ParseError::new(
                    token.start,
                    format!("expected `{expected}`, found `{found}`"),
                    ParseErrorKind::MismatchedDelimiter { expected, found },
                ));
                self.bump();
                continue;
            }

            let start_cursor = self.cursor;
            match item(self) {
                Ok(value) => items.push(value),
                Err(()) => {
                    if self.is_aborted() {
                        self.pop_delimiter();
                        return Err(());
                    }
                    had_item_error = true;
                    self.skip_to_group_recovery_point(context, start_cursor);
                },
            }
        }

        if items.is_empty() && !had_item_error && !context.allows_empty() {
            let construct = context.description().to_string();
            self.record_error(
                ParseError::new(
                    open_token.start,
                    format!("{construct} cannot be empty"),
                    ParseErrorKind::InvalidEmptyConstruct { construct },
                )
                .with_len(self.cursor_pos_offset(open_token.start)),
            );
        }

        Ok((items, open_token.start))
    }

    /// Byte distance from `from` to the end of the previous token.
    fn cursor_pos_offset(&self, from: Pos) -> usize {
        self.cursor
            .checked_sub(1)
            .and_then(|idx| self.tokens.get(idx))
            .map_or(1, |t| t.end().byte_offset().saturating_sub(from.byte_offset()))
    }

    /// Whether `closer` matches a delimiter opened outside the innermost one.
    fn closes_enclosing_delimiter(&self, closer: TokenKind) -> bool {
        let depth = self.delimiter_stack.len();
        self.delimiter_stack[..depth.saturating_sub(1)]
            .iter()
            .any(|delim| delim.kind.closing_delimiter() == Some(closer))
    }

    /// Skips past a malformed group element.
    ///
    /// Stops (without consuming) at any closing delimiter at the group's own
    /// nesting level, or at a token that can start a new element once at
    /// least one token has been consumed since the element began.
    fn skip_to_group_recovery_point(&mut self, context: DelimiterContext, start_cursor: usize) {
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            if depth == 0 {
                if token.kind.is_closing_delimiter() {
                    return;
                }
                if self.cursor > start_cursor && context.is_resume_point(&token) {
                    return;
                }
            }
            if token.kind.closing_delimiter().is_some() {
                depth += 1;
            } else if token.kind.is_closing_delimiter() {
                depth -= 1;
            }
            self.bump();
        }
    }

    // =========================================================================
    // Definitions
    // =========================================================================

    /// Parses one definition. `Ok(None)` means an unsupported definition was
    /// reported and skipped.
    fn parse_definition(&mut self) -> Result<Option<ast::Definition>, ()> {
        let Some(token) = self.peek() else {
            return Err(());
        };

        match token.kind {
            TokenKind::CurlyBraceOpen => {
                let op = self.parse_shorthand_operation()?;
                Ok(Some(ast::Definition::Operation(op)))
            },
            TokenKind::StringValue | TokenKind::BlockStringValue => {
                let description = self.parse_description();
                match self.peek() {
                    Some(next) if next.kind == TokenKind::Name && is_type_definition_keyword(next.text) => {
                        let def = self.parse_type_definition(description, token.start)?;
                        Ok(Some(ast::Definition::Type(def)))
                    },
                    Some(next) if next.kind == TokenKind::Name && is_unsupported_definition_keyword(next.text) => {
                        self.skip_unsupported_definition();
                        Ok(None)
                    },
                    _ => {
                        self.record_unexpected("a type definition after description");
                        Err(())
                    },
                }
            },
            TokenKind::Name => match token.text {
                "query" | "mutation" | "subscription" => {
                    let op = self.parse_operation_definition()?;
                    Ok(Some(ast::Definition::Operation(op)))
                },
                "fragment" => {
                    let frag = self.parse_fragment_definition()?;
                    Ok(Some(ast::Definition::Fragment(frag)))
                },
                keyword if is_type_definition_keyword(keyword) => {
                    let def = self.parse_type_definition(None, token.start)?;
                    Ok(Some(ast::Definition::Type(def)))
                },
                keyword if is_unsupported_definition_keyword(keyword) => {
                    self.skip_unsupported_definition();
                    Ok(None)
                },
                _ => {
                    self.record_unexpected("a definition");
                    Err(())
                },
            },
            _ => {
                self.record_unexpected("a definition");
                Err(())
            },
        }
    }

    /// Reports an `interface`/`union`/`directive`/`schema`/`extend`
    /// definition and skips it, including any `{ ... }` body.
    fn skip_unsupported_definition(&mut self) {
        let Some(keyword) = self.bump() else {
            return;
        };
        self.record_error(
            ParseError::new(
                keyword.start,
                format!("`{}` definitions are not supported", keyword.text),
                ParseErrorKind::UnsupportedDefinition {
                    keyword: keyword.text.to_string(),
                },
            )
            .with_len(keyword.text.len()),
        );
        if keyword.text == "extend" {
            // The extended definition's own keyword.
            self.bump();
        }

        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            if depth == 0
                && token.kind == TokenKind::Name
                && self.looks_like_definition_start(token.text, 1)
            {
                return;
            }
            self.bump();
            match token.kind {
                TokenKind::CurlyBraceOpen | TokenKind::ParenOpen | TokenKind::SquareBracketOpen => {
                    depth += 1;
                },
                TokenKind::CurlyBraceClose | TokenKind::ParenClose | TokenKind::SquareBracketClose => {
                    depth = depth.saturating_sub(1);
                    // A closed `{ ... }` body ends the definition.
                    if depth == 0 && token.kind == TokenKind::CurlyBraceClose {
                        return;
                    }
                },
                _ => {},
            }
        }
    }

    fn parse_description(&mut self) -> Option<String> {
        let token = self.peek().filter(|t| t.kind.is_string())?;
        self.bump();
        Some(self.cook_string(token))
    }

    /// Cooks a string token, recording an error (and falling back to the raw
    /// text between the quotes) when it is malformed.
    fn cook_string(&mut self, token: Token<'src>) -> String {
        match cook_string_literal(token.text) {
            Ok(value) => value,
            Err(err) => {
                self.record_error(
                    ParseError::new(
                        token.start,
                        format!("invalid string literal: {err}"),
                        ParseErrorKind::InvalidString(err),
                    )
                    .with_len(token.text.len()),
                );
                token.text.trim_matches('"').to_string()
            },
        }
    }

    // =========================================================================
    // Operations and fragments
    // =========================================================================

    fn parse_shorthand_operation(&mut self) -> Result<ast::OperationDefinition, ()> {
        let pos = self.peek().map_or_else(|| self.eof_pos(), |t| t.start);
        let selection_set = self.parse_selection_set()?;
        Ok(ast::OperationDefinition {
            operation_type: ast::OperationType::Query,
            name: None,
            variable_definitions: Vec::new(),
            directives: Vec::new(),
            selection_set,
            is_shorthand: true,
            pos,
        })
    }

    fn parse_operation_definition(&mut self) -> Result<ast::OperationDefinition, ()> {
        let keyword = self.bump().ok_or(())?;
        let operation_type = ast::OperationType::from_keyword(keyword.text).ok_or(())?;

        let name = if self.peek_is(TokenKind::Name) {
            Some(self.expect_name("operation name")?)
        } else {
            None
        };

        let variable_definitions = if self.peek_is(TokenKind::ParenOpen) {
            self.group(
                TokenKind::ParenOpen,
                DelimiterContext::VariableDefinitions,
                Self::parse_variable_definition,
            )?
            .0
        } else {
            Vec::new()
        };

        let directives = self.parse_directives(ConstContext::AllowVariables)?;
        let selection_set = self.parse_selection_set()?;

        Ok(ast::OperationDefinition {
            operation_type,
            name,
            variable_definitions,
            directives,
            selection_set,
            is_shorthand: false,
            pos: keyword.start,
        })
    }

    fn parse_variable_definition(&mut self) -> Result<ast::VariableDefinition, ()> {
        let dollar = self.expect(TokenKind::Dollar)?;
        let name = self.expect_name("variable name")?;
        self.expect(TokenKind::Colon)?;
        let var_type = self.parse_type_ref()?;
        let default_value = if self.peek_is(TokenKind::Equals) {
            self.bump();
            Some(self.parse_value(ConstContext::VariableDefaultValue)?)
        } else {
            None
        };
        let directives = self.parse_directives(ConstContext::VariableDefaultValue)?;
        Ok(ast::VariableDefinition {
            name,
            var_type,
            default_value,
            directives,
            pos: dollar.start,
        })
    }

    fn parse_fragment_definition(&mut self) -> Result<ast::FragmentDefinition, ()> {
        let keyword = self.expect_keyword("fragment")?;
        let name = self.expect_name("fragment name")?;
        if name.value == "on" {
            let mut error = ParseError::new(
                name.pos,
                "fragment name cannot be `on`",
                ParseErrorKind::ReservedName {
                    name: name.value.clone(),
                    context: ReservedNameContext::FragmentName,
                },
            )
            .with_len(2);
            error.add_note(ParseErrorNote::help(
                "fragments are declared as `fragment Name on Type { ... }`",
            ));
            self.record_error(error);
        }
        self.expect_keyword("on")?;
        let type_condition = self.expect_name("type condition")?;
        let directives = self.parse_directives(ConstContext::AllowVariables)?;
        let selection_set = self.parse_selection_set()?;
        Ok(ast::FragmentDefinition {
            name,
            type_condition,
            directives,
            selection_set,
            pos: keyword.start,
        })
    }

    // =========================================================================
    // Selections
    // =========================================================================

    fn parse_selection_set(&mut self) -> Result<ast::SelectionSet, ()> {
        self.enter_recursion()?;
        let result = self.group(
            TokenKind::CurlyBraceOpen,
            DelimiterContext::SelectionSet,
            Self::parse_selection,
        );
        self.exit_recursion();
        let (selections, pos) = result?;
        Ok(ast::SelectionSet { selections, pos })
    }

    fn parse_selection(&mut self) -> Result<ast::Selection, ()> {
        match self.peek().map(|t| t.kind) {
            Some(TokenKind::Ellipsis) => self.parse_fragment_selection(),
            Some(TokenKind::Name) => Ok(ast::Selection::Field(self.parse_field()?)),
            _ => {
                self.record_unexpected("a field, fragment spread, or inline fragment");
                Err(())
            },
        }
    }

    /// Parses what follows `...`: either `on Type ...`, a directive or
    /// selection set (inline fragments), or a fragment name (spread).
    fn parse_fragment_selection(&mut self) -> Result<ast::Selection, ()> {
        let ellipsis = self.expect(TokenKind::Ellipsis)?;

        let type_condition = match self.peek() {
            Some(token) if token.is_keyword("on") => {
                self.bump();
                Some(self.expect_name("type condition")?)
            },
            Some(token) if token.kind == TokenKind::Name => {
                self.bump();
                let name = ast::Name::new(token.text, token.start);
                let directives = self.parse_directives(ConstContext::AllowVariables)?;
                return Ok(ast::Selection::FragmentSpread(ast::FragmentSpread {
                    name,
                    directives,
                    pos: ellipsis.start,
                }));
            },
            _ => None,
        };

        let directives = self.parse_directives(ConstContext::AllowVariables)?;
        let selection_set = self.parse_selection_set()?;
        Ok(ast::Selection::InlineFragment(ast::InlineFragment {
            type_condition,
            directives,
            selection_set,
            pos: ellipsis.start,
        }))
    }

    fn parse_field(&mut self) -> Result<ast::Field, ()> {
        let first = self.expect_name("field name")?;
        let pos = first.pos;
        let (alias, name) = if self.peek_is(TokenKind::Colon) {
            self.bump();
            (Some(first), self.expect_name("field name after alias")?)
        } else {
            (None, first)
        };

        let arguments = self.parse_arguments(
            DelimiterContext::FieldArguments,
            ConstContext::AllowVariables,
        )?;
        let directives = self.parse_directives(ConstContext::AllowVariables)?;
        let selection_set = if self.peek_is(TokenKind::CurlyBraceOpen) {
            Some(self.parse_selection_set()?)
        } else {
            None
        };

        Ok(ast::Field {
            alias,
            name,
            arguments,
            directives,
            selection_set,
            pos,
        })
    }

    fn parse_arguments(
        &mut self,
        delimiter_context: DelimiterContext,
        const_context: ConstContext,
    ) -> Result<Vec<ast::Argument>, ()> {
        if !self.peek_is(TokenKind::ParenOpen) {
            return Ok(Vec::new());
        }
        let (arguments, _) = self.group(TokenKind::ParenOpen, delimiter_context, |p| {
            p.parse_argument(const_context)
        })?;
        Ok(arguments)
    }

    fn parse_argument(&mut self, context: ConstContext) -> Result<ast::Argument, ()> {
        let name = self.expect_name("argument name")?;
        self.expect(TokenKind::Colon)?;
        let value = self.parse_value(context)?;
        Ok(ast::Argument { name, value })
    }

    fn parse_directives(
        &mut self,
        context: ConstContext,
    ) -> Result<Vec<ast::DirectiveAnnotation>, ()> {
        let mut directives = Vec::new();
        while self.peek_is(TokenKind::At) {
            let at = self.expect(TokenKind::At)?;
            let name = self.expect_name("directive name")?;
            let arguments = self.parse_arguments(DelimiterContext::DirectiveArguments, context)?;
            directives.push(ast::DirectiveAnnotation {
                name,
                arguments,
                pos: at.start,
            });
        }
        Ok(directives)
    }

    // =========================================================================
    // Values
    // =========================================================================

    fn parse_value(&mut self, context: ConstContext) -> Result<ast::InputValue, ()> {
        self.enter_recursion()?;
        let result = self.parse_value_impl(context);
        self.exit_recursion();
        result
    }

    fn parse_value_impl(&mut self, context: ConstContext) -> Result<ast::InputValue, ()> {
        let Some(token) = self.peek() else {
            self.record_unexpected("a value");
            return Err(());
        };
        let pos = token.start;

        match token.kind {
            TokenKind::Dollar => {
                self.bump();
                let name = self.expect_name("variable name")?;
                if let Some(forbidden_in) = context.forbidden_description() {
                    self.record_error(
                        ParseError::new(
                            pos,
                            format!("variables are not allowed in {forbidden_in}"),
                            ParseErrorKind::InvalidSyntax,
                        )
                        .with_len(1 + name.value.len()),
                    );
                }
                Ok(ast::InputValue::new(
                    ast::InputValueKind::Variable(name.value),
                    pos,
                ))
            },
            TokenKind::IntValue => {
                self.bump();
                Ok(ast::InputValue::scalar(ast::ScalarKind::Int, token.text, pos))
            },
            TokenKind::FloatValue => {
                self.bump();
                Ok(ast::InputValue::scalar(ast::ScalarKind::Float, token.text, pos))
            },
            TokenKind::StringValue | TokenKind::BlockStringValue => {
                self.bump();
                let value = self.cook_string(token);
                Ok(ast::InputValue::scalar(ast::ScalarKind::String, value, pos))
            },
            TokenKind::Name => {
                self.bump();
                Ok(match token.text {
                    "null" => ast::InputValue::null(pos),
                    "true" | "false" => {
                        ast::InputValue::scalar(ast::ScalarKind::Boolean, token.text, pos)
                    },
                    _ => ast::InputValue::scalar(ast::ScalarKind::Enum, token.text, pos),
                })
            },
            TokenKind::SquareBracketOpen => {
                let (items, pos) = self.group(
                    TokenKind::SquareBracketOpen,
                    DelimiterContext::ListValue,
                    |p| p.parse_value(context),
                )?;
                Ok(ast::InputValue::new(ast::InputValueKind::List(items), pos))
            },
            TokenKind::CurlyBraceOpen => {
                let (fields, pos) = self.group(
                    TokenKind::CurlyBraceOpen,
                    DelimiterContext::ObjectValue,
                    |p| p.parse_object_field(context),
                )?;
                Ok(ast::InputValue::new(ast::InputValueKind::Object(fields), pos))
            },
            _ => {
                self.record_unexpected("a value");
                Err(())
            },
        }
    }

    fn parse_object_field(&mut self, context: ConstContext) -> Result<ast::ObjectField, ()> {
        let name = self.expect_name("object field name")?;
        self.expect(TokenKind::Colon)?;
        let value = self.parse_value(context)?;
        Ok(ast::ObjectField { name, value })
    }

    // =========================================================================
    // Type references
    // =========================================================================

    fn parse_type_ref(&mut self) -> Result<ast::TypeRef, ()> {
        self.enter_recursion()?;
        let result = self.parse_type_ref_impl();
        self.exit_recursion();
        result
    }

    fn parse_type_ref_impl(&mut self) -> Result<ast::TypeRef, ()> {
        let start = self.peek().map_or_else(|| self.eof_pos(), |t| t.start);

        let inner = if self.peek_is(TokenKind::SquareBracketOpen) {
            let open = self.expect(TokenKind::SquareBracketOpen)?;
            self.push_delimiter(TokenKind::SquareBracketOpen, open.start, DelimiterContext::ListType);
            let element = self.parse_type_ref();
            let close = element.and_then(|element| {
                self.expect(TokenKind::SquareBracketClose)
                    .map(|_| element)
            });
            self.pop_delimiter();
            ast::TypeRef::List(Box::new(close?), open.start)
        } else {
            ast::TypeRef::Named(self.expect_name("a type")?)
        };

        if self.peek_is(TokenKind::Bang) {
            self.bump();
            Ok(ast::TypeRef::NonNull(Box::new(inner), start))
        } else {
            Ok(inner)
        }
    }

    // =========================================================================
    // Type definitions
    // =========================================================================

    fn parse_type_definition(
        &mut self,
        description: Option<String>,
        pos: Pos,
    ) -> Result<ast::TypeDefinition, ()> {
        let keyword = self.bump().ok_or(())?;
        match keyword.text {
            "scalar" => {
                let name = self.expect_name("scalar name")?;
                let directives = self.parse_directives(ConstContext::SchemaDirectiveArgument)?;
                Ok(ast::TypeDefinition::Scalar(ast::ScalarTypeDefinition {
                    description,
                    name,
                    directives,
                    pos,
                }))
            },
            "type" => {
                let name = self.expect_name("object type name")?;
                if self.peek_is_keyword("implements") {
                    self.skip_implements_clause();
                }
                let directives = self.parse_directives(ConstContext::SchemaDirectiveArgument)?;
                let fields = if self.peek_is(TokenKind::CurlyBraceOpen) {
                    self.group(
                        TokenKind::CurlyBraceOpen,
                        DelimiterContext::FieldsDefinition,
                        Self::parse_field_definition,
                    )?
                    .0
                } else {
                    Vec::new()
                };
                Ok(ast::TypeDefinition::Object(ast::ObjectTypeDefinition {
                    description,
                    name,
                    directives,
                    fields,
                    pos,
                }))
            },
            "enum" => {
                let name = self.expect_name("enum name")?;
                let directives = self.parse_directives(ConstContext::SchemaDirectiveArgument)?;
                let values = if self.peek_is(TokenKind::CurlyBraceOpen) {
                    self.group(
                        TokenKind::CurlyBraceOpen,
                        DelimiterContext::EnumValues,
                        Self::parse_enum_value_definition,
                    )?
                    .0
                } else {
                    Vec::new()
                };
                Ok(ast::TypeDefinition::Enum(ast::EnumTypeDefinition {
                    description,
                    name,
                    directives,
                    values,
                    pos,
                }))
            },
            "input" => {
                let name = self.expect_name("input object name")?;
                let directives = self.parse_directives(ConstContext::SchemaDirectiveArgument)?;
                let fields = if self.peek_is(TokenKind::CurlyBraceOpen) {
                    self.group(
                        TokenKind::CurlyBraceOpen,
                        DelimiterContext::InputFieldsDefinition,
                        Self::parse_input_value_definition,
                    )?
                    .0
                } else {
                    Vec::new()
                };
                Ok(ast::TypeDefinition::InputObject(ast::InputObjectTypeDefinition {
                    description,
                    name,
                    directives,
                    fields,
                    pos,
                }))
            },
            _ => {
                self.cursor -= 1;
                self.record_unexpected("a type definition");
                Err(())
            },
        }
    }

    /// Reports and skips `implements A & B`; interfaces are not supported.
    fn skip_implements_clause(&mut self) {
        let Some(keyword) = self.bump() else {
            return;
        };
        self.record_error(
            ParseError::new(
                keyword.start,
                "interfaces are not supported; `implements` is not allowed",
                ParseErrorKind::UnsupportedDefinition {
                    keyword: "implements".to_string(),
                },
            )
            .with_len(keyword.text.len()),
        );
        while let Some(token) = self.peek() {
            let is_interface_list_token = token.kind == TokenKind::Name
                || (token.kind == TokenKind::Unknown && token.text == "&");
            if !is_interface_list_token {
                break;
            }
            self.bump();
        }
    }

    fn parse_field_definition(&mut self) -> Result<ast::FieldDefinition, ()> {
        let pos = self.peek().map_or_else(|| self.eof_pos(), |t| t.start);
        let description = self.parse_description();
        let name = self.expect_name("field name")?;
        let arguments = if self.peek_is(TokenKind::ParenOpen) {
            self.group(
                TokenKind::ParenOpen,
                DelimiterContext::ArgumentDefinitions,
                Self::parse_input_value_definition,
            )?
            .0
        } else {
            Vec::new()
        };
        self.expect(TokenKind::Colon)?;
        let field_type = self.parse_type_ref()?;
        let directives = self.parse_directives(ConstContext::SchemaDirectiveArgument)?;
        Ok(ast::FieldDefinition {
            description,
            name,
            arguments,
            field_type,
            directives,
            pos,
        })
    }

    fn parse_input_value_definition(&mut self) -> Result<ast::InputValueDefinition, ()> {
        let pos = self.peek().map_or_else(|| self.eof_pos(), |t| t.start);
        let description = self.parse_description();
        let name = self.expect_name("input value name")?;
        self.expect(TokenKind::Colon)?;
        let value_type = self.parse_type_ref()?;
        let default_value = if self.peek_is(TokenKind::Equals) {
            self.bump();
            Some(self.parse_value(ConstContext::InputDefaultValue)?)
        } else {
            None
        };
        let directives = self.parse_directives(ConstContext::SchemaDirectiveArgument)?;
        Ok(ast::InputValueDefinition {
            description,
            name,
            value_type,
            default_value,
            directives,
            pos,
        })
    }

    fn parse_enum_value_definition(&mut self) -> Result<ast::EnumValueDefinition, ()> {
        let pos = self.peek().map_or_else(|| self.eof_pos(), |t| t.start);
        let description = self.parse_description();
        let name = self.expect_name("enum value")?;
        if matches!(name.value.as_str(), "true" | "false" | "null") {
            self.record_error(
                ParseError::new(
                    name.pos,
                    format!("enum value cannot be `{}`", name.value),
                    ParseErrorKind::ReservedName {
                        name: name.value.clone(),
                        context: ReservedNameContext::EnumValue,
                    },
                )
                .with_len(name.value.len()),
            );
        }
        let directives = self.parse_directives(ConstContext::SchemaDirectiveArgument)?;
        Ok(ast::EnumValueDefinition {
            description,
            name,
            directives,
            pos,
        })
    }
}

fn is_type_definition_keyword(text: &str) -> bool {
    matches!(text, "scalar" | "type" | "enum" | "input")
}

fn is_unsupported_definition_keyword(text: &str) -> bool {
    matches!(text, "interface" | "union" | "directive" | "schema" | "extend")
}

/// Renders a token for "found `...`" messages.
fn token_display(token: &Token<'_>) -> String {
    match token.kind {
        TokenKind::StringValue | TokenKind::BlockStringValue => "string".to_string(),
        _ => token.text.to_string(),
    }
}
