//! Tests for [`InputValue`] rendering, comparison, variable traversal, and
//! JSON deserialization.

use crate::Pos;
use crate::ast::InputValue;
use crate::ast::InputValueKind;
use crate::ast::ScalarKind;
use crate::parse;

/// Parses `{ f(a: <value>) }` and returns the argument value.
fn parse_value(value: &str) -> InputValue {
    let source = format!("{{ f(a: {value}) }}");
    let doc = parse(&source)
        .into_valid_ast()
        .expect("value should parse");
    let op = doc.operations().next().expect("one operation");
    let crate::ast::Selection::Field(field) = &op.selection_set.selections[0] else {
        panic!("expected a field");
    };
    field.arguments[0].value.clone()
}

// =============================================================================
// Display
// =============================================================================

/// Verifies that values render back to GraphQL syntax.
#[test]
fn display_renders_graphql_syntax() {
    let value = parse_value(r#"{ name: "a\"b", tags: [ONE, $two, null], n: -1.5e3 }"#);
    assert_eq!(
        value.to_string(),
        r#"{name: "a\"b", tags: [ONE, $two, null], n: -1.5e3}"#,
    );
}

/// Verifies that control characters are escaped when rendering strings.
#[test]
fn display_escapes_control_characters() {
    let value = InputValue::scalar(ScalarKind::String, "line\nnext\u{0001}", Pos::default());
    assert_eq!(value.to_string(), r#""line\nnext\u0001""#);
}

// =============================================================================
// Equivalence and variables
// =============================================================================

/// Verifies that equivalence ignores positions but not field order.
#[test]
fn equivalence_ignores_positions() {
    let a = parse_value("{ x: 1, y: [true] }");
    let b = parse_value("{x:1,y:[  true  ]}");
    let reordered = parse_value("{ y: [true], x: 1 }");
    assert_ne!(a.pos, Pos::new(0));
    assert!(a.is_equivalent(&b));
    assert!(!a.is_equivalent(&reordered));
}

/// Verifies that `1` and `"1"` are never equivalent.
#[test]
fn equivalence_distinguishes_scalar_kinds() {
    assert!(!parse_value("1").is_equivalent(&parse_value("\"1\"")));
    assert!(!parse_value("RED").is_equivalent(&parse_value("\"RED\"")));
}

/// Verifies that variables are visited in source order at any depth.
#[test]
fn visit_variables_finds_nested_variables() {
    let value = parse_value("{ a: $first, b: [1, { c: $second }] }");
    let mut seen = Vec::new();
    value.visit_variables(&mut |name, _| seen.push(name.to_string()));
    assert_eq!(seen, vec!["first", "second"]);
    assert!(value.contains_variables());
    assert!(!parse_value("[1, 2]").contains_variables());
}

// =============================================================================
// JSON deserialization
// =============================================================================

/// Verifies that JSON maps onto GraphQL literals while keeping number text.
#[test]
fn deserializes_json_values() {
    let value: InputValue =
        serde_json::from_str(r#"{"id": 7, "ratio": 0.5, "ok": true, "name": "x", "none": null, "list": [1]}"#)
            .expect("valid json");
    let InputValueKind::Object(fields) = &value.kind else {
        panic!("expected an object, got {value:?}");
    };
    let kinds: Vec<_> = fields
        .iter()
        .map(|f| (f.name.as_str(), f.value.kind.clone()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("id", InputValueKind::Scalar(ScalarKind::Int, "7".to_string())),
            ("ratio", InputValueKind::Scalar(ScalarKind::Float, "0.5".to_string())),
            ("ok", InputValueKind::Scalar(ScalarKind::Boolean, "true".to_string())),
            ("name", InputValueKind::Scalar(ScalarKind::String, "x".to_string())),
            ("none", InputValueKind::Null),
            (
                "list",
                InputValueKind::List(vec![InputValue::scalar(
                    ScalarKind::Int,
                    "1",
                    Pos::default(),
                )]),
            ),
        ],
    );
}
