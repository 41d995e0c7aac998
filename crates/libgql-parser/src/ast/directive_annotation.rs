use crate::ast::Argument;
use crate::ast::Name;
use crate::Pos;

/// A directive applied at some location, e.g. `@skip(if: $cond)`.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveAnnotation {
    /// The directive name, without the leading `@`.
    pub name: Name,
    pub arguments: Vec<Argument>,
    /// Position of the `@`.
    pub pos: Pos,
}

impl DirectiveAnnotation {
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}
