use crate::ast::DirectiveAnnotation;
use crate::ast::InputValue;
use crate::ast::Name;
use crate::ast::TypeRef;
use crate::Pos;

/// A `scalar`, `type`, `enum`, or `input` definition.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeDefinition {
    Scalar(ScalarTypeDefinition),
    Object(ObjectTypeDefinition),
    Enum(EnumTypeDefinition),
    InputObject(InputObjectTypeDefinition),
}

impl TypeDefinition {
    pub fn name(&self) -> &Name {
        match self {
            Self::Scalar(def) => &def.name,
            Self::Object(def) => &def.name,
            Self::Enum(def) => &def.name,
            Self::InputObject(def) => &def.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Scalar(def) => def.description.as_deref(),
            Self::Object(def) => def.description.as_deref(),
            Self::Enum(def) => def.description.as_deref(),
            Self::InputObject(def) => def.description.as_deref(),
        }
    }

    pub fn directives(&self) -> &[DirectiveAnnotation] {
        match self {
            Self::Scalar(def) => &def.directives,
            Self::Object(def) => &def.directives,
            Self::Enum(def) => &def.directives,
            Self::InputObject(def) => &def.directives,
        }
    }

    /// Position of the description if present, otherwise of the keyword.
    pub fn pos(&self) -> Pos {
        match self {
            Self::Scalar(def) => def.pos,
            Self::Object(def) => def.pos,
            Self::Enum(def) => def.pos,
            Self::InputObject(def) => def.pos,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarTypeDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub directives: Vec<DirectiveAnnotation>,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub directives: Vec<DirectiveAnnotation>,
    pub fields: Vec<FieldDefinition>,
    pub pos: Pos,
}

/// `name(args): Type @directives` inside an object type.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub arguments: Vec<InputValueDefinition>,
    pub field_type: TypeRef,
    pub directives: Vec<DirectiveAnnotation>,
    pub pos: Pos,
}

/// An argument or input-object field definition: `name: Type = default`.
#[derive(Clone, Debug, PartialEq)]
pub struct InputValueDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub value_type: TypeRef,
    pub default_value: Option<InputValue>,
    pub directives: Vec<DirectiveAnnotation>,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumTypeDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub directives: Vec<DirectiveAnnotation>,
    pub values: Vec<EnumValueDefinition>,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumValueDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub directives: Vec<DirectiveAnnotation>,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectTypeDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub directives: Vec<DirectiveAnnotation>,
    pub fields: Vec<InputValueDefinition>,
    pub pos: Pos,
}
