use crate::ast::DirectiveAnnotation;
use crate::ast::InputValue;
use crate::ast::Name;
use crate::ast::TypeRef;
use crate::Pos;

/// `$name: Type = default @directives` in an operation header.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition {
    /// The variable name, without the leading `$`.
    pub name: Name,
    pub var_type: TypeRef,
    pub default_value: Option<InputValue>,
    pub directives: Vec<DirectiveAnnotation>,
    /// Position of the `$`.
    pub pos: Pos,
}
