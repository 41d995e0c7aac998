mod builtin_scalar;
mod deprecation_state;
mod directive_definition;
mod enum_type;
mod gql_type;
mod input_object_type;
mod input_value_definition;
mod named_type;
mod object_type;
mod type_registry;

pub use builtin_scalar::BuiltinScalar;
pub use deprecation_state::DeprecationState;
pub(crate) use deprecation_state::DEFAULT_DEPRECATION_REASON;
pub use directive_definition::DirectiveDefinition;
pub use directive_definition::DirectiveLocation;
pub use enum_type::EnumType;
pub use enum_type::EnumValue;
pub use gql_type::GqlType;
pub use input_object_type::InputObjectType;
pub use input_value_definition::InputValueDefinition;
pub use named_type::NamedType;
pub use named_type::NamedTypeKind;
pub use named_type::ScalarType;
pub use object_type::ObjectType;
pub use object_type::ObjectTypeField;
pub use type_registry::TypeRegistry;
pub use type_registry::TypeShape;

#[cfg(test)]
mod tests;
