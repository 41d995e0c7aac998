use crate::ast::Name;
use crate::Pos;

/// A type reference as written in source: `Foo`, `[Foo]`, `Foo!`, `[Foo!]!`.
///
/// The parser never produces `NonNull(NonNull(_))`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeRef {
    Named(Name),
    /// `[inner]`, positioned at the `[`.
    List(Box<TypeRef>, Pos),
    /// `inner!`, positioned at the start of `inner`.
    NonNull(Box<TypeRef>, Pos),
}

impl TypeRef {
    pub fn pos(&self) -> Pos {
        match self {
            Self::Named(name) => name.pos,
            Self::List(_, pos) | Self::NonNull(_, pos) => *pos,
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(..))
    }

    /// The named type at the core of any list/non-null wrappers.
    pub fn innermost_name(&self) -> &Name {
        match self {
            Self::Named(name) => name,
            Self::List(inner, _) | Self::NonNull(inner, _) => inner.innermost_name(),
        }
    }

    /// Structural equality ignoring source positions.
    pub fn is_equivalent(&self, other: &TypeRef) -> bool {
        match (self, other) {
            (Self::Named(a), Self::Named(b)) => a.value == b.value,
            (Self::List(a, _), Self::List(b, _))
            | (Self::NonNull(a, _), Self::NonNull(b, _)) => a.is_equivalent(b),
            _ => false,
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::List(inner, _) => write!(f, "[{inner}]"),
            Self::NonNull(inner, _) => write!(f, "{inner}!"),
        }
    }
}
