//! The abstract syntax tree produced by the [`Parser`](crate::Parser).
//!
//! Every node owns its data and records the byte offset ([`Pos`]) at which
//! it starts. Nodes are immutable once parsed and are owned exclusively by
//! their [`Document`].
//!
//! [`Pos`]: crate::Pos

mod argument;
mod directive_annotation;
mod document;
mod fragment_definition;
mod name;
mod operation_definition;
mod selection;
mod type_definition;
mod type_ref;
mod value;
mod value_json;
mod variable_definition;

pub use argument::Argument;
pub use directive_annotation::DirectiveAnnotation;
pub use document::Definition;
pub use document::Document;
pub use fragment_definition::FragmentDefinition;
pub use name::Name;
pub use operation_definition::OperationDefinition;
pub use operation_definition::OperationType;
pub use selection::Field;
pub use selection::FragmentSpread;
pub use selection::InlineFragment;
pub use selection::Selection;
pub use selection::SelectionSet;
pub use type_definition::EnumTypeDefinition;
pub use type_definition::EnumValueDefinition;
pub use type_definition::FieldDefinition;
pub use type_definition::InputObjectTypeDefinition;
pub use type_definition::InputValueDefinition;
pub use type_definition::ObjectTypeDefinition;
pub use type_definition::ScalarTypeDefinition;
pub use type_definition::TypeDefinition;
pub use type_ref::TypeRef;
pub use value::InputValue;
pub use value::InputValueKind;
pub use value::ObjectField;
pub use value::ScalarKind;
pub use variable_definition::VariableDefinition;

#[cfg(test)]
mod tests;
