use crate::ast::FragmentDefinition;
use crate::ast::OperationDefinition;
use crate::ast::TypeDefinition;
use crate::Pos;

/// A parsed GraphQL document: an ordered sequence of definitions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

impl Document {
    pub fn operations(&self) -> impl Iterator<Item = &OperationDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Operation(op) => Some(op),
            _ => None,
        })
    }

    pub fn fragments(&self) -> impl Iterator<Item = &FragmentDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Fragment(frag) => Some(frag),
            _ => None,
        })
    }

    pub fn type_definitions(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Type(type_def) => Some(type_def),
            _ => None,
        })
    }

    /// Finds the first fragment definition with the given name.
    pub fn fragment(&self, name: &str) -> Option<&FragmentDefinition> {
        self.fragments().find(|frag| frag.name == name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Definition {
    Operation(OperationDefinition),
    Fragment(FragmentDefinition),
    Type(TypeDefinition),
}

impl Definition {
    pub fn pos(&self) -> Pos {
        match self {
            Self::Operation(op) => op.pos,
            Self::Fragment(frag) => frag.pos,
            Self::Type(type_def) => type_def.pos(),
        }
    }

    pub fn is_executable(&self) -> bool {
        !matches!(self, Self::Type(_))
    }
}
