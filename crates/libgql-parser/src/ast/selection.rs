use crate::ast::Argument;
use crate::ast::DirectiveAnnotation;
use crate::ast::Name;
use crate::Pos;

/// A `{ ... }` block of selections.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionSet {
    pub selections: Vec<Selection>,
    /// Position of the `{`.
    pub pos: Pos,
}

impl SelectionSet {
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

impl Selection {
    pub fn pos(&self) -> Pos {
        match self {
            Self::Field(field) => field.pos,
            Self::FragmentSpread(spread) => spread.pos,
            Self::InlineFragment(inline) => inline.pos,
        }
    }

    pub fn directives(&self) -> &[DirectiveAnnotation] {
        match self {
            Self::Field(field) => &field.directives,
            Self::FragmentSpread(spread) => &spread.directives,
            Self::InlineFragment(inline) => &inline.directives,
        }
    }
}

/// `alias: name(args) @directives { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub alias: Option<Name>,
    pub name: Name,
    pub arguments: Vec<Argument>,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: Option<SelectionSet>,
    /// Position of the alias if present, otherwise of the name.
    pub pos: Pos,
}

impl Field {
    /// The key this field's result is stored under: the alias if present,
    /// otherwise the field name.
    pub fn response_key(&self) -> &str {
        self.alias.as_ref().unwrap_or(&self.name).as_str()
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}

/// `...FragmentName @directives`
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    pub name: Name,
    pub directives: Vec<DirectiveAnnotation>,
    /// Position of the `...`.
    pub pos: Pos,
}

/// `... on Type @directives { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    pub type_condition: Option<Name>,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: SelectionSet,
    /// Position of the `...`.
    pub pos: Pos,
}
