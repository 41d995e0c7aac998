//! Tests for parsing value literals.

use crate::ast::InputValue;
use crate::ast::InputValueKind;
use crate::ast::ScalarKind;
use crate::tests::utils::field_at;
use crate::tests::utils::only_operation;
use crate::tests::utils::parse_ok;

fn argument_value(value: &str) -> InputValue {
    let doc = parse_ok(&format!("{{ f(v: {value}) }}"));
    field_at(&only_operation(&doc).selection_set, 0).arguments[0]
        .value
        .clone()
}

fn scalar(value: &str) -> (ScalarKind, String) {
    match argument_value(value).kind {
        InputValueKind::Scalar(kind, text) => (kind, text),
        other => panic!("expected a scalar, found {other:?}"),
    }
}

/// Verifies each scalar literal class and that number text is kept verbatim.
#[test]
fn scalar_literals() {
    assert_eq!(scalar("-42"), (ScalarKind::Int, "-42".to_string()));
    assert_eq!(scalar("1.50e+10"), (ScalarKind::Float, "1.50e+10".to_string()));
    assert_eq!(scalar("true"), (ScalarKind::Boolean, "true".to_string()));
    assert_eq!(scalar("false"), (ScalarKind::Boolean, "false".to_string()));
    assert_eq!(scalar("RED"), (ScalarKind::Enum, "RED".to_string()));
    assert_eq!(scalar(r#""tab\there""#), (ScalarKind::String, "tab\there".to_string()));
}

/// Verifies that integer literals outside 32 bits still parse.
#[test]
fn out_of_range_integer_is_syntactically_valid() {
    assert_eq!(scalar("99999999999999999999").0, ScalarKind::Int);
}

/// Verifies that `null` is its own value kind, not an enum.
#[test]
fn null_literal() {
    assert!(argument_value("null").is_null());
}

/// Verifies that block strings are dedented.
#[test]
fn block_string_literal() {
    let (kind, text) = scalar("\"\"\"\n    first\n      second\n  \"\"\"");
    assert_eq!(kind, ScalarKind::String);
    assert_eq!(text, "first\n  second");
}

/// Verifies nested lists and objects, including empty ones.
#[test]
fn list_and_object_literals() {
    let value = argument_value("{ a: [], b: {}, c: [[1], [2, 3]], d: { e: $var } }");
    assert_eq!(value.to_string(), "{a: [], b: {}, c: [[1], [2, 3]], d: {e: $var}}");
}

/// Verifies that duplicate object fields are preserved for validation.
#[test]
fn duplicate_object_fields_are_kept() {
    let InputValueKind::Object(fields) = argument_value("{ a: 1, a: 2 }").kind else {
        panic!("expected an object");
    };
    assert_eq!(fields.len(), 2);
}

/// Verifies that commas are insignificant between list items.
#[test]
fn commas_are_optional() {
    let with = argument_value("[1, 2, 3]");
    let without = argument_value("[1 2 3]");
    assert!(with.is_equivalent(&without));
}
