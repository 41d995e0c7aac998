use crate::ast::DirectiveAnnotation;
use crate::ast::Name;
use crate::ast::SelectionSet;
use crate::Pos;

/// `fragment Name on Type @directives { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDefinition {
    pub name: Name,
    pub type_condition: Name,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: SelectionSet,
    pub pos: Pos,
}
