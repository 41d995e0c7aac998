use crate::response::PathSegment;
use libgql_parser::Pos;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum CoercionErrorKind {
    #[error("Expected a value of type `{type_name}`, found null")]
    NullForNonNull {
        type_name: String,
    },

    #[error("`{type_name}` cannot represent {found}")]
    InvalidScalar {
        type_name: String,
        found: String,
    },

    #[error("`Int` cannot represent the non 32-bit signed integer value {value}")]
    IntOutOfRange {
        value: String,
    },

    #[error("`Float` cannot represent the non-finite value {value}")]
    NonFiniteFloat {
        value: String,
    },

    #[error("Value `{value}` does not exist in the `{enum_name}` enum")]
    UnknownEnumValue {
        enum_name: String,
        value: String,
    },

    #[error("Enum `{enum_name}` cannot represent {found}")]
    InvalidEnumValue {
        enum_name: String,
        found: String,
    },

    #[error("Expected an input object of type `{type_name}`, found {found}")]
    ExpectedInputObject {
        type_name: String,
        found: String,
    },

    #[error("Field `{field_name}` is not defined by the `{type_name}` input type")]
    UnknownInputField {
        type_name: String,
        field_name: String,
    },

    #[error("Field `{field_name}` of `{type_name}` is supplied more than once")]
    DuplicateInputField {
        type_name: String,
        field_name: String,
    },

    #[error("Field `{type_name}.{field_name}` of required type `{field_type}` was not provided")]
    MissingRequiredField {
        type_name: String,
        field_name: String,
        field_type: String,
    },

    #[error("Argument `{argument_name}` of required type `{argument_type}` was not provided")]
    MissingRequiredArgument {
        argument_name: String,
        argument_type: String,
    },

    #[error("Variable `${variable_name}` of required type `{variable_type}` was not provided")]
    MissingVariableValue {
        variable_name: String,
        variable_type: String,
    },

    #[error("Variable `${variable_name}` cannot be used in a constant value")]
    VariableNotAllowed {
        variable_name: String,
    },

    #[error("Variable `${variable_name}` has the unknown type `{type_name}`")]
    UnknownVariableType {
        variable_name: String,
        type_name: String,
    },

    #[error("No argument or input field of the schema accepts values of type `{type_name}`")]
    UnacceptedListType {
        type_name: String,
    },

    #[error("`{type_name}` is not an input type")]
    NotAnInputType {
        type_name: String,
    },
}

/// A failure to coerce one (possibly nested) input value.
#[derive(Clone, Debug, PartialEq)]
pub struct CoercionError {
    pub kind: CoercionErrorKind,
    /// Where the offending value was written. Values that came from JSON
    /// variables report [`Pos::default()`].
    pub pos: Pos,
    /// The argument, variable, field names and list indices leading to the
    /// offending value.
    pub path: Vec<PathSegment>,
}
impl CoercionError {
    pub fn new(kind: CoercionErrorKind, pos: Pos) -> Self {
        Self {
            kind,
            pos,
            path: vec![],
        }
    }

    /// Renders the path as `arg.field[0]`.
    pub fn path_string(&self) -> String {
        let mut rendered = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Key(key) => {
                    if !rendered.is_empty() {
                        rendered.push('.');
                    }
                    rendered.push_str(key);
                },
                PathSegment::Index(idx) => rendered.push_str(&format!("[{idx}]")),
            }
        }
        rendered
    }
}
impl std::fmt::Display for CoercionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} (at `{}`)", self.kind, self.path_string())
        }
    }
}
impl std::error::Error for CoercionError {}
