
use crate::ast;

/// Parses `text` as the value of an argument, so that it can be coerced as
/// a literal.
fn literal(text: &str) -> ast::InputValue {
    let source = format!("{{ f(v: {text}) }}");
    let document = libgql_parser::parse(&source)
        .into_valid_ast()
        .unwrap_or_else(|| panic!("`{text}` is not a valid literal"));
    let operation = document.operations().next().expect("one operation");
    let Some(ast::Selection::Field(field)) = operation.selection_set.selections.first() else {
        panic!("expected a field selection");
    };
    field.arguments[0].value.clone()
}

fn json(value: serde_json::Value) -> ast::InputValue {
    serde_json::from_value(value).expect("JSON converts to an input value")
}
