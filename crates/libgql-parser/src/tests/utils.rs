//! Various test utils.

use crate::ParseError;
use crate::ast;
use crate::parse;

/// Parses `source`, panicking with rendered diagnostics if it has errors.
pub fn parse_ok(source: &str) -> ast::Document {
    let result = parse(source);
    if result.has_errors() {
        panic!(
            "unexpected parse errors:\n{}",
            result.format_errors(source, None),
        );
    }
    result.into_valid_ast().expect("no errors implies a valid AST")
}

/// Parses `source` and returns its errors, asserting there is at least one.
pub fn parse_errors(source: &str) -> Vec<ParseError> {
    let result = parse(source);
    assert!(result.has_errors(), "expected errors parsing {source:?}");
    result.errors
}

/// Returns the only operation in `doc`.
pub fn only_operation(doc: &ast::Document) -> &ast::OperationDefinition {
    let mut ops = doc.operations();
    let op = ops.next().expect("document has an operation");
    assert!(ops.next().is_none(), "document has more than one operation");
    op
}

/// Returns the selection at `idx` as a field.
pub fn field_at(selection_set: &ast::SelectionSet, idx: usize) -> &ast::Field {
    match &selection_set.selections[idx] {
        ast::Selection::Field(field) => field,
        other => panic!("expected a field at {idx}, found {other:?}"),
    }
}
