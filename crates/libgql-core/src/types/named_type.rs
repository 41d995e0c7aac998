use crate::types::BuiltinScalar;
use crate::types::EnumType;
use crate::types::InputObjectType;
use crate::types::ObjectType;

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarType {
    pub name: String,
    pub description: Option<String>,
    /// Set for the five scalars every schema starts with.
    pub builtin: Option<BuiltinScalar>,
}

/// The `__TypeKind` of a named type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NamedTypeKind {
    Scalar,
    Object,
    Enum,
    InputObject,
}
impl NamedTypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::Enum => "ENUM",
            Self::InputObject => "INPUT_OBJECT",
        }
    }
}

/// A type that appears in a schema under its own name.
#[derive(Clone, Debug, PartialEq)]
pub enum NamedType {
    Scalar(ScalarType),
    Object(ObjectType),
    Enum(EnumType),
    InputObject(InputObjectType),
}
impl NamedType {
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(t) => &t.name,
            Self::Object(t) => &t.name,
            Self::Enum(t) => &t.name,
            Self::InputObject(t) => &t.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Scalar(t) => t.description.as_deref(),
            Self::Object(t) => t.description.as_deref(),
            Self::Enum(t) => t.description.as_deref(),
            Self::InputObject(t) => t.description.as_deref(),
        }
    }

    pub fn kind(&self) -> NamedTypeKind {
        match self {
            Self::Scalar(_) => NamedTypeKind::Scalar,
            Self::Object(_) => NamedTypeKind::Object,
            Self::Enum(_) => NamedTypeKind::Enum,
            Self::InputObject(_) => NamedTypeKind::InputObject,
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarType> {
        match self {
            Self::Scalar(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            Self::Object(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            Self::Enum(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_input_object(&self) -> Option<&InputObjectType> {
        match self {
            Self::InputObject(t) => Some(t),
            _ => None,
        }
    }

    pub fn builtin_scalar(&self) -> Option<BuiltinScalar> {
        self.as_scalar().and_then(|s| s.builtin)
    }

    /// Names starting with `__` belong to the introspection system.
    pub fn is_introspection_type(&self) -> bool {
        self.name().starts_with("__")
    }
}
