//! Resolvers for the `__schema` and `__type` meta fields, reading straight
//! from the schema's type table.

use crate::execution::FieldError;
use crate::execution::ResolveContext;
use crate::execution::Resolved;
use crate::execution::Resolver;
use crate::execution::SelectedField;
use crate::schema::Schema;
use crate::types::DirectiveDefinition;
use crate::types::EnumValue;
use crate::types::GqlType;
use crate::types::InputValueDefinition;
use crate::types::NamedType;
use crate::types::ObjectTypeField;
use crate::value::Value;

type Result<'r> = std::result::Result<Resolved<'r>, FieldError>;

pub(super) fn schema(schema: &Schema) -> Resolved<'_> {
    Resolved::object(SchemaMeta { schema })
}

pub(super) fn type_by_name<'s>(schema: &'s Schema, name: Option<&str>) -> Resolved<'s> {
    match name.and_then(|name| schema.type_by_name(name)) {
        Some(ty) => Resolved::object(TypeMeta { schema, ty }),
        None => Resolved::Null,
    }
}

fn unknown_field(type_name: &str, field: &SelectedField) -> FieldError {
    FieldError::new(format!(
        "`{type_name}` has no field `{}`",
        field.field_name,
    ))
}

fn include_deprecated(field: &SelectedField) -> bool {
    field
        .argument("includeDeprecated")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

struct SchemaMeta<'s> {
    schema: &'s Schema,
}

impl Resolver for SchemaMeta<'_> {
    fn resolve_field(&self, _ctx: &ResolveContext<'_>, field: &SelectedField) -> Result<'_> {
        let schema = self.schema;
        let type_meta = |ty: GqlType| Resolved::object(TypeMeta { schema, ty });

        Ok(match field.field_name.as_str() {
            "description" => Resolved::Null,
            "types" => Resolved::List(
                schema
                    .types()
                    .filter_map(|named| schema.type_by_name(named.name()))
                    .map(type_meta)
                    .collect(),
            ),
            "queryType" => type_meta(schema.query_type()),
            "mutationType" => schema.mutation_type().map_or(Resolved::Null, type_meta),
            "subscriptionType" => schema.subscription_type().map_or(Resolved::Null, type_meta),
            "directives" => Resolved::List(
                schema
                    .directives()
                    .map(|directive| Resolved::object(DirectiveMeta { schema, directive }))
                    .collect(),
            ),
            _ => return Err(unknown_field("__Schema", field)),
        })
    }
}

struct TypeMeta<'s> {
    schema: &'s Schema,
    ty: GqlType,
}
impl<'s> TypeMeta<'s> {
    /// The named type, unless this is a list or non-null wrapper.
    fn named(&self) -> Option<&'s NamedType> {
        if self.ty.is_non_null() || self.schema.is_list(self.ty) {
            return None;
        }
        self.schema.named_type(self.ty)
    }

    fn kind(&self) -> &'static str {
        if self.ty.is_non_null() {
            "NON_NULL"
        } else if self.schema.is_list(self.ty) {
            "LIST"
        } else {
            self.named().map_or("SCALAR", |named| named.kind().as_str())
        }
    }
}

impl Resolver for TypeMeta<'_> {
    fn resolve_field(&self, _ctx: &ResolveContext<'_>, field: &SelectedField) -> Result<'_> {
        let schema = self.schema;
        let named = self.named();

        Ok(match field.field_name.as_str() {
            "kind" => Resolved::from(self.kind()),
            "name" => Resolved::from(named.map(NamedType::name)),
            "description" => Resolved::from(named.and_then(NamedType::description)),
            "specifiedByURL" => Resolved::Null,
            "fields" => match named.and_then(NamedType::as_object) {
                Some(object) => {
                    let include_deprecated = include_deprecated(field);
                    Resolved::List(
                        object
                            .fields
                            .values()
                            .filter(|f| include_deprecated || !f.deprecation.is_deprecated())
                            .map(|f| Resolved::object(FieldMeta { schema, field: f }))
                            .collect(),
                    )
                },
                None => Resolved::Null,
            },
            "interfaces" => match named.and_then(NamedType::as_object) {
                Some(_) => Resolved::List(vec![]),
                None => Resolved::Null,
            },
            "possibleTypes" => Resolved::Null,
            "enumValues" => match named.and_then(NamedType::as_enum) {
                Some(enum_type) => {
                    let include_deprecated = include_deprecated(field);
                    Resolved::List(
                        enum_type
                            .values
                            .values()
                            .filter(|v| include_deprecated || !v.deprecation.is_deprecated())
                            .map(|value| Resolved::object(EnumValueMeta { value }))
                            .collect(),
                    )
                },
                None => Resolved::Null,
            },
            "inputFields" => match named.and_then(NamedType::as_input_object) {
                Some(input_object) => Resolved::List(
                    input_object
                        .fields
                        .values()
                        .map(|value| Resolved::object(InputValueMeta { schema, value }))
                        .collect(),
                ),
                None => Resolved::Null,
            },
            "ofType" => {
                let of_type = if self.ty.is_non_null() {
                    Some(self.ty.to_nullable())
                } else {
                    schema.list_element(self.ty)
                };
                match of_type {
                    Some(ty) => Resolved::object(TypeMeta { schema, ty }),
                    None => Resolved::Null,
                }
            },
            _ => return Err(unknown_field("__Type", field)),
        })
    }
}

struct FieldMeta<'s> {
    schema: &'s Schema,
    field: &'s ObjectTypeField,
}

impl Resolver for FieldMeta<'_> {
    fn resolve_field(&self, _ctx: &ResolveContext<'_>, field: &SelectedField) -> Result<'_> {
        let schema = self.schema;
        let definition = self.field;

        Ok(match field.field_name.as_str() {
            "name" => Resolved::from(definition.name.as_str()),
            "description" => Resolved::from(definition.description.as_deref()),
            "args" => Resolved::List(
                definition
                    .args
                    .values()
                    .map(|value| Resolved::object(InputValueMeta { schema, value }))
                    .collect(),
            ),
            "type" => Resolved::object(TypeMeta {
                schema,
                ty: definition.ty,
            }),
            "isDeprecated" => Resolved::from(definition.deprecation.is_deprecated()),
            "deprecationReason" => Resolved::from(definition.deprecation.reason()),
            _ => return Err(unknown_field("__Field", field)),
        })
    }
}

struct InputValueMeta<'s> {
    schema: &'s Schema,
    value: &'s InputValueDefinition,
}

impl Resolver for InputValueMeta<'_> {
    fn resolve_field(&self, _ctx: &ResolveContext<'_>, field: &SelectedField) -> Result<'_> {
        let schema = self.schema;
        let definition = self.value;

        Ok(match field.field_name.as_str() {
            "name" => Resolved::from(definition.name.as_str()),
            "description" => Resolved::from(definition.description.as_deref()),
            "type" => Resolved::object(TypeMeta {
                schema,
                ty: definition.ty,
            }),
            "defaultValue" => {
                if definition.has_default() {
                    Resolved::from(definition.default_value.to_input_value(schema).to_string())
                } else {
                    Resolved::Null
                }
            },
            _ => return Err(unknown_field("__InputValue", field)),
        })
    }
}

struct EnumValueMeta<'s> {
    value: &'s EnumValue,
}

impl Resolver for EnumValueMeta<'_> {
    fn resolve_field(&self, _ctx: &ResolveContext<'_>, field: &SelectedField) -> Result<'_> {
        let value = self.value;

        Ok(match field.field_name.as_str() {
            "name" => Resolved::from(value.name.as_str()),
            "description" => Resolved::from(value.description.as_deref()),
            "isDeprecated" => Resolved::from(value.deprecation.is_deprecated()),
            "deprecationReason" => Resolved::from(value.deprecation.reason()),
            _ => return Err(unknown_field("__EnumValue", field)),
        })
    }
}

struct DirectiveMeta<'s> {
    schema: &'s Schema,
    directive: &'s DirectiveDefinition,
}

impl Resolver for DirectiveMeta<'_> {
    fn resolve_field(&self, _ctx: &ResolveContext<'_>, field: &SelectedField) -> Result<'_> {
        let schema = self.schema;
        let directive = self.directive;

        Ok(match field.field_name.as_str() {
            "name" => Resolved::from(directive.name.as_str()),
            "description" => Resolved::from(directive.description.as_deref()),
            "locations" => Resolved::list(directive.locations.iter().map(|location| location.as_str())),
            "args" => Resolved::List(
                directive
                    .args
                    .values()
                    .map(|value| Resolved::object(InputValueMeta { schema, value }))
                    .collect(),
            ),
            "isRepeatable" => Resolved::from(false),
            _ => return Err(unknown_field("__Directive", field)),
        })
    }
}
