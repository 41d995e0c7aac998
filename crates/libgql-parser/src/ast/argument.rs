use crate::ast::InputValue;
use crate::ast::Name;
use crate::Pos;

/// A `name: value` argument of a field or directive.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub name: Name,
    pub value: InputValue,
}

impl Argument {
    pub fn pos(&self) -> Pos {
        self.name.pos
    }
}

impl std::fmt::Display for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}
