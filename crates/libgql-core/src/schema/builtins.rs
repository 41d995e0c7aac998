use crate::types::BuiltinScalar;
use crate::types::DEFAULT_DEPRECATION_REASON;
use crate::types::DirectiveDefinition;
use crate::types::DirectiveLocation;
use crate::types::InputValueDefinition;
use crate::types::TypeRegistry;
use crate::value::Value;
use indexmap::IndexMap;

/// The introspection meta types, added to every schema so that
/// `__schema` and `__type` queries validate and resolve like any other
/// field. Interfaces and unions are not supported, so `interfaces` and
/// `possibleTypes` only ever produce an empty list and null.
pub(crate) const INTROSPECTION_SDL: &str = r#"
type __Schema {
  description: String
  types: [__Type!]!
  queryType: __Type!
  mutationType: __Type
  subscriptionType: __Type
  directives: [__Directive!]!
}

type __Type {
  kind: __TypeKind!
  name: String
  description: String
  specifiedByURL: String
  fields(includeDeprecated: Boolean = false): [__Field!]
  interfaces: [__Type!]
  possibleTypes: [__Type!]
  enumValues(includeDeprecated: Boolean = false): [__EnumValue!]
  inputFields: [__InputValue!]
  ofType: __Type
}

type __Field {
  name: String!
  description: String
  args: [__InputValue!]!
  type: __Type!
  isDeprecated: Boolean!
  deprecationReason: String
}

type __InputValue {
  name: String!
  description: String
  type: __Type!
  defaultValue: String
}

type __EnumValue {
  name: String!
  description: String
  isDeprecated: Boolean!
  deprecationReason: String
}

type __Directive {
  name: String!
  description: String
  locations: [__DirectiveLocation!]!
  args: [__InputValue!]!
  isRepeatable: Boolean!
}

enum __TypeKind {
  SCALAR
  OBJECT
  INTERFACE
  UNION
  ENUM
  INPUT_OBJECT
  LIST
  NON_NULL
}

enum __DirectiveLocation {
  QUERY
  MUTATION
  SUBSCRIPTION
  FIELD
  FRAGMENT_DEFINITION
  FRAGMENT_SPREAD
  INLINE_FRAGMENT
  VARIABLE_DEFINITION
  SCHEMA
  SCALAR
  OBJECT
  FIELD_DEFINITION
  ARGUMENT_DEFINITION
  INTERFACE
  UNION
  ENUM
  ENUM_VALUE
  INPUT_OBJECT
  INPUT_FIELD_DEFINITION
}
"#;

pub(crate) fn builtin_scalar_description(scalar: BuiltinScalar) -> &'static str {
    match scalar {
        BuiltinScalar::Boolean => "The `Boolean` scalar type represents `true` or `false`.",
        BuiltinScalar::Float => {
            "The `Float` scalar type represents signed double-precision fractional values."
        },
        BuiltinScalar::ID => {
            "The `ID` scalar type represents a unique identifier, serialized as a string."
        },
        BuiltinScalar::Int => {
            "The `Int` scalar type represents non-fractional signed whole numeric values \
            between -(2^31) and 2^31 - 1."
        },
        BuiltinScalar::String => {
            "The `String` scalar type represents textual data as UTF-8 character sequences."
        },
    }
}

/// Builds `@skip`, `@include`, and `@deprecated` against `registry`, which
/// must already hold the builtin scalars.
pub(crate) fn builtin_directives(registry: &TypeRegistry) -> IndexMap<String, DirectiveDefinition> {
    let boolean = registry.named(BuiltinScalar::Boolean.name());
    let string = registry.named(BuiltinScalar::String.name());

    let conditional = |name: &str, description: &str| DirectiveDefinition {
        name: name.to_string(),
        description: Some(description.to_string()),
        args: IndexMap::from([(
            "if".to_string(),
            InputValueDefinition::new("if", boolean.to_non_null()),
        )]),
        locations: vec![
            DirectiveLocation::Field,
            DirectiveLocation::FragmentSpread,
            DirectiveLocation::InlineFragment,
        ],
    };

    let deprecated = DirectiveDefinition {
        name: "deprecated".to_string(),
        description: Some(
            "Marks an element of a GraphQL schema as no longer supported.".to_string(),
        ),
        args: IndexMap::from([(
            "reason".to_string(),
            InputValueDefinition::new("reason", string)
                .with_default(Value::scalar(string, DEFAULT_DEPRECATION_REASON)),
        )]),
        locations: vec![DirectiveLocation::FieldDefinition, DirectiveLocation::EnumValue],
    };

    IndexMap::from([
        (
            "skip".to_string(),
            conditional("skip", "Directs the executor to skip this field or fragment when the `if` argument is true."),
        ),
        (
            "include".to_string(),
            conditional("include", "Directs the executor to include this field or fragment only when the `if` argument is true."),
        ),
        ("deprecated".to_string(), deprecated),
    ])
}
