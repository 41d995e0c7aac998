use crate::loc::SourceLocation;
use crate::response::GraphQLError;
use crate::response::ResponsePath;
use crate::types::DirectiveLocation;
use thiserror::Error;

#[derive(Clone, Debug, Error, Eq, Hash, PartialEq)]
pub enum ValidationErrorKind {
    #[error("The {definition_kind} definition `{name}` is not executable")]
    NonExecutableDefinition {
        definition_kind: &'static str,
        name: String,
    },

    #[error("This anonymous operation must be the only defined operation")]
    AnonymousOperationNotAlone,

    #[error("There can be only one operation named `{operation_name}`")]
    DuplicateOperationName {
        operation_name: String,
    },

    #[error("There can be only one fragment named `{fragment_name}`")]
    DuplicateFragmentName {
        fragment_name: String,
    },

    #[error("Cannot spread fragment `{fragment_name}` within itself{}", format_cycle(.via))]
    FragmentCycle {
        fragment_name: String,
        via: Vec<String>,
    },

    #[error("Subscription operations are not supported")]
    SubscriptionNotSupported,

    #[error("The schema does not define a `Mutation` root type")]
    MutationNotSupported,

    #[error("There can be only one variable named `${variable_name}`")]
    DuplicateVariableName {
        variable_name: String,
    },

    #[error("Variable `${variable_name}` has the unknown type `{type_name}`")]
    UnknownVariableType {
        variable_name: String,
        type_name: String,
    },

    #[error("Variable `${variable_name}` cannot be of the non-input type `{type_name}`")]
    VariableNotInputType {
        variable_name: String,
        type_name: String,
    },

    #[error("Invalid default value for variable `${variable_name}`: {message}")]
    InvalidVariableDefault {
        variable_name: String,
        message: String,
    },

    #[error("Variable `${variable_name}` is never used{}", format_operation(.operation_name))]
    UnusedVariable {
        variable_name: String,
        operation_name: Option<String>,
    },

    #[error("Variable `${variable_name}` is not defined{}", format_operation(.operation_name))]
    UndefinedVariable {
        variable_name: String,
        operation_name: Option<String>,
    },

    #[error(
        "Variable `${variable_name}` of type `{variable_type}` used in position expecting \
         type `{expected_type}`"
    )]
    VariableTypeMismatch {
        variable_name: String,
        variable_type: String,
        expected_type: String,
    },

    #[error("Fragment `{fragment_name}` is never used")]
    UnusedFragment {
        fragment_name: String,
    },

    #[error("Unknown fragment `{fragment_name}`")]
    UnknownFragment {
        fragment_name: String,
    },

    #[error("Unknown type `{type_name}` in fragment type condition")]
    UnknownFragmentType {
        type_name: String,
    },

    #[error("Fragments cannot condition on the non-composite type `{type_name}`")]
    FragmentOnNonCompositeType {
        type_name: String,
    },

    #[error(
        "Fragment{} cannot be spread here as objects of type `{parent_type}` can never be of \
         type `{fragment_type}`",
        format_fragment(.fragment_name)
    )]
    ImpossibleFragmentSpread {
        fragment_name: Option<String>,
        parent_type: String,
        fragment_type: String,
    },

    #[error("Cannot query field `{field_name}` on type `{type_name}`")]
    UnknownField {
        field_name: String,
        type_name: String,
    },

    #[error("Field `{field_name}` of type `{type_name}` must have a selection of subfields")]
    MissingSelectionSet {
        field_name: String,
        type_name: String,
    },

    #[error("Field `{field_name}` must not have a selection since type `{type_name}` has no subfields")]
    UnexpectedSelectionSet {
        field_name: String,
        type_name: String,
    },

    #[error("Unknown argument `{argument_name}` on `{owner}`")]
    UnknownArgument {
        argument_name: String,
        owner: String,
    },

    #[error("There can be only one argument named `{argument_name}`")]
    DuplicateArgument {
        argument_name: String,
    },

    #[error("Argument `{argument_name}` of type `{type_name}` is required on `{owner}` but not provided")]
    MissingRequiredArgument {
        argument_name: String,
        type_name: String,
        owner: String,
    },

    #[error("Invalid value for argument `{argument_name}`: {message}")]
    InvalidArgumentValue {
        argument_name: String,
        message: String,
    },

    #[error("Unknown directive `@{directive_name}`")]
    UnknownDirective {
        directive_name: String,
    },

    #[error("Directive `@{directive_name}` may not be used on {location}")]
    MisplacedDirective {
        directive_name: String,
        location: DirectiveLocation,
    },

    #[error("The directive `@{directive_name}` can only be used once at this location")]
    DuplicateDirective {
        directive_name: String,
    },

    #[error("Fields `{response_key}` conflict because {reason}")]
    FieldsConflict {
        response_key: String,
        reason: String,
    },
}

fn format_cycle(via: &[String]) -> String {
    if via.is_empty() {
        String::new()
    } else {
        let names: Vec<String> = via.iter().map(|name| format!("`{name}`")).collect();
        format!(" via {}", names.join(", "))
    }
}

fn format_operation(operation_name: &Option<String>) -> String {
    match operation_name {
        Some(name) => format!(" in operation `{name}`"),
        None => String::new(),
    }
}

fn format_fragment(fragment_name: &Option<String>) -> String {
    match fragment_name {
        Some(name) => format!(" `{name}`"),
        None => String::new(),
    }
}

/// A rule violation found in an operation document.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub locations: Vec<SourceLocation>,
    /// The response path of the offending field, for errors about fields and
    /// their arguments.
    pub path: Option<ResponsePath>,
}
impl ValidationError {
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(location) = self.locations.first() {
            write!(f, " ({location})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for GraphQLError {
    fn from(err: ValidationError) -> Self {
        let message = err.message();
        let mut gql_error = GraphQLError::new(message).with_locations(err.locations);
        gql_error.path = err.path;
        gql_error
    }
}
