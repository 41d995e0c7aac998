use crate::execution::FieldError;
use crate::response::GraphQLError;
use thiserror::Error;

/// Why a single field could not produce a value.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ExecutionError {
    #[error(transparent)]
    Resolver(#[from] FieldError),

    #[error("Cannot return null for non-nullable field `{field_name}` of type `{type_name}`")]
    NullForNonNull {
        field_name: String,
        type_name: String,
    },

    #[error("`{type_name}` cannot represent value {value}")]
    InvalidLeafValue {
        type_name: String,
        value: String,
    },

    /// The host returned a value whose shape does not match the declared
    /// type (e.g. an object for a list field).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Why an operation could not be prepared for execution.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("The document does not contain any operations")]
    NoOperation,

    #[error("An operation name must be provided when the document contains multiple operations")]
    OperationNameRequired,

    #[error("Unknown operation named `{operation_name}`")]
    UnknownOperation {
        operation_name: String,
    },

    #[error("Subscription operations are not supported")]
    SubscriptionNotSupported,

    #[error("The schema does not define a `Mutation` root type")]
    MutationNotSupported,
}

impl From<RequestError> for GraphQLError {
    fn from(err: RequestError) -> Self {
        GraphQLError::new(err.to_string())
    }
}
