use crate::loc;
use crate::types::DirectiveLocation;
use thiserror::Error;

/// A problem with one definition of an otherwise well-formed schema.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TypeValidationError {
    #[error(
        "Input object fields may refer to input object types only if the \
        resulting chain of types can be broken by at least one nullable \
        field. Unbroken input-object cycle found: {}",
        circular_field_path.join(" -> "),
    )]
    CircularInputFieldChain {
        circular_field_path: Vec<String>,
    },

    #[error("The `{type_name}.{field_name}` argument `{argument_name}` is defined more than once")]
    DuplicateArgumentName {
        type_name: String,
        field_name: String,
        argument_name: String,
        def1: loc::FilePosition,
        def2: loc::FilePosition,
    },

    #[error("The `{directive_name}` directive is applied more than once at {location}")]
    DuplicateDirective {
        directive_name: String,
        location: loc::FilePosition,
    },

    #[error("The `{enum_name}` enum defines the `{value_name}` value more than once")]
    DuplicateEnumValueName {
        enum_name: String,
        value_name: String,
        def1: loc::FilePosition,
        def2: loc::FilePosition,
    },

    #[error("The `{type_name}` type defines the `{field_name}` field more than once")]
    DuplicateFieldName {
        type_name: String,
        field_name: String,
        def1: loc::FilePosition,
        def2: loc::FilePosition,
    },

    #[error("The `{type_name}` type must define at least one {member_kind}")]
    EmptyTypeDefinition {
        type_name: String,
        member_kind: &'static str,
        location: loc::FilePosition,
    },

    #[error(
        "Output fields can not be declared with an input type: The \
        `{parent_type_name}.{field_name}` field is an output field, but the \
        `{input_type_name}` type is an input object type"
    )]
    InputTypeUsedAsOutput {
        def_location: loc::FilePosition,
        field_name: String,
        input_type_name: String,
        parent_type_name: String,
    },

    #[error("Invalid default value for `{owner}`: {}", errors.join("; "))]
    InvalidDefaultValue {
        owner: String,
        location: loc::FilePosition,
        errors: Vec<String>,
    },

    #[error("Invalid argument for the `@{directive_name}` directive: {message}")]
    InvalidDirectiveArgument {
        directive_name: String,
        message: String,
        location: loc::FilePosition,
    },

    #[error("Names must not start with `__`: `{name}` defined on `{type_name}`")]
    InvalidDunderPrefixedName {
        name: String,
        type_name: String,
        location: loc::FilePosition,
    },

    #[error("The `@{directive_name}` directive may not be used at {directive_location} locations")]
    MisplacedDirective {
        directive_name: String,
        directive_location: DirectiveLocation,
        location: loc::FilePosition,
    },

    #[error(
        "Arguments and input fields can only be declared with input types: \
        `{owner}` is declared with `{output_type_name}`, which is an object type"
    )]
    OutputTypeUsedAsInput {
        def_location: loc::FilePosition,
        owner: String,
        output_type_name: String,
    },

    #[error("Reference to an undefined type `{undefined_type_name}` at {ref_location}")]
    UndefinedTypeName {
        ref_location: loc::FilePosition,
        undefined_type_name: String,
    },

    #[error("Unknown directive `@{directive_name}` at {location}")]
    UnknownDirective {
        directive_name: String,
        location: loc::FilePosition,
    },
}
