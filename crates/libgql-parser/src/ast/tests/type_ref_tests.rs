//! Tests for [`TypeRef`] rendering and comparison.

use crate::ast::Definition;
use crate::ast::TypeRef;
use crate::parse;

fn variable_type(source_type: &str) -> TypeRef {
    let source = format!("query Q($v: {source_type}) {{ a }}");
    let doc = parse(&source).into_valid_ast().expect("valid document");
    let Definition::Operation(op) = &doc.definitions[0] else {
        panic!("expected an operation");
    };
    op.variable_definitions[0].var_type.clone()
}

/// Verifies that type references render as written.
#[test]
fn display_round_trips_wrappers() {
    for written in ["Int", "Int!", "[Int]", "[Int!]!", "[[String]!]"] {
        assert_eq!(variable_type(written).to_string(), written);
    }
}

/// Verifies that equivalence ignores positions but not wrappers.
#[test]
fn equivalence_compares_structure() {
    let a = variable_type("[Int!]");
    let b = variable_type("[ Int ! ]");
    assert!(a.is_equivalent(&b));
    assert!(!a.is_equivalent(&variable_type("[Int]")));
    assert!(!a.is_equivalent(&variable_type("[Int!]!")));
    assert_eq!(a.innermost_name().as_str(), "Int");
    assert!(variable_type("Int!").is_non_null());
}
