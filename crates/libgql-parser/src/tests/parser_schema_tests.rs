//! Tests for parsing scalar, object, enum, and input object definitions.

use crate::ast;
use crate::tests::utils::parse_ok;

fn only_type(doc: &ast::Document) -> &ast::TypeDefinition {
    let mut defs = doc.type_definitions();
    let def = defs.next().expect("document has a type definition");
    assert!(defs.next().is_none());
    def
}

/// Verifies scalar definitions with descriptions and directives.
#[test]
fn scalar_definition() {
    let doc = parse_ok(r#""An ISO-8601 timestamp" scalar DateTime @specifiedBy(url: "x")"#);
    let ast::TypeDefinition::Scalar(scalar) = only_type(&doc) else {
        panic!("expected a scalar");
    };
    assert_eq!(scalar.name.as_str(), "DateTime");
    assert_eq!(scalar.description.as_deref(), Some("An ISO-8601 timestamp"));
    assert_eq!(scalar.directives[0].name.as_str(), "specifiedBy");
}

/// Verifies object types with field arguments, defaults, and descriptions.
#[test]
fn object_definition_with_arguments() {
    let doc = parse_ok(
        r#"
        """
        The root query.
        """
        type Query {
          "Looks up a user."
          user(
            "The user id."
            id: ID!
            includeDeleted: Boolean = false
          ): User
          users(first: Int = 10): [User!]!
        }
        "#,
    );
    let ast::TypeDefinition::Object(obj) = only_type(&doc) else {
        panic!("expected an object type");
    };
    assert_eq!(obj.description.as_deref(), Some("The root query."));
    assert_eq!(obj.fields.len(), 2);

    let user = &obj.fields[0];
    assert_eq!(user.description.as_deref(), Some("Looks up a user."));
    assert_eq!(user.field_type.to_string(), "User");
    assert_eq!(user.arguments.len(), 2);
    assert_eq!(user.arguments[0].description.as_deref(), Some("The user id."));
    assert_eq!(user.arguments[0].value_type.to_string(), "ID!");
    assert_eq!(
        user.arguments[1].default_value.as_ref().map(ToString::to_string),
        Some("false".to_string()),
    );

    assert_eq!(obj.fields[1].field_type.to_string(), "[User!]!");
}

/// Verifies that an object type's position covers its description.
#[test]
fn type_definition_position_starts_at_description() {
    let doc = parse_ok("  \"doc\" type A { a: Int }");
    assert_eq!(only_type(&doc).pos().byte_offset(), 2);
}

/// Verifies enum definitions with per-value descriptions and directives.
#[test]
fn enum_definition() {
    let doc = parse_ok(r#"enum Color { "Warm." RED GREEN @deprecated(reason: "no") BLUE }"#);
    let ast::TypeDefinition::Enum(color) = only_type(&doc) else {
        panic!("expected an enum");
    };
    let names: Vec<_> = color.values.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["RED", "GREEN", "BLUE"]);
    assert_eq!(color.values[0].description.as_deref(), Some("Warm."));
    assert_eq!(color.values[1].directives.len(), 1);
}

/// Verifies input object definitions with defaulted fields.
#[test]
fn input_object_definition() {
    let doc = parse_ok("input Point { x: Float! = 0.0, y: Float! = 0.0, label: String }");
    let ast::TypeDefinition::InputObject(point) = only_type(&doc) else {
        panic!("expected an input object");
    };
    assert_eq!(point.fields.len(), 3);
    assert_eq!(point.fields[0].value_type.to_string(), "Float!");
    assert!(point.fields[2].default_value.is_none());
}

/// Verifies that a field named `type` does not confuse the parser.
#[test]
fn keyword_named_fields() {
    let doc = parse_ok("type Query { type: String input: Int enum: Boolean }");
    let ast::TypeDefinition::Object(obj) = only_type(&doc) else {
        panic!("expected an object type");
    };
    let names: Vec<_> = obj.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["type", "input", "enum"]);
}
