use crate::execution::RequestContext;
use crate::execution::SelectedField;
use crate::response::ResponsePath;
use crate::schema::Schema;
use crate::types::GqlType;
use std::fmt;
use thiserror::Error;

/// The host side of execution: produces the value of one field of one
/// object.
///
/// The executor calls [`resolve_field()`](Self::resolve_field) once per
/// selected field, depth first and in response order. Nested objects are
/// returned as further resolvers, which may borrow from the one that
/// produced them.
pub trait Resolver {
    fn resolve_field(
        &self,
        ctx: &ResolveContext<'_>,
        field: &SelectedField,
    ) -> Result<Resolved<'_>, FieldError>;
}

/// What the executor hands a [`Resolver`] along with each field.
#[derive(Clone, Copy, Debug)]
pub struct ResolveContext<'a> {
    pub schema: &'a Schema,
    /// The object type the field is selected on.
    pub parent_type: GqlType,
    /// The response path of the field being resolved.
    pub path: &'a ResponsePath,
    /// Caller-supplied cancellation and deadline information. The executor
    /// never acts on it; resolvers may.
    pub request: &'a RequestContext,
}

/// A host value for one field, before it is completed against the field's
/// declared type.
pub enum Resolved<'r> {
    Null,
    Scalar(HostScalar),
    List(Vec<Resolved<'r>>),
    Object(Box<dyn Resolver + 'r>),
}
impl<'r> Resolved<'r> {
    pub fn object(resolver: impl Resolver + 'r) -> Self {
        Self::Object(Box::new(resolver))
    }

    pub fn list<T: Into<Resolved<'r>>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Debug for Resolved<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Scalar(scalar) => f.debug_tuple("Scalar").field(scalar).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Object(_) => f.write_str("Object(..)"),
        }
    }
}

impl From<HostScalar> for Resolved<'_> {
    fn from(scalar: HostScalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<bool> for Resolved<'_> {
    fn from(value: bool) -> Self {
        Self::Scalar(HostScalar::Boolean(value))
    }
}

impl From<i32> for Resolved<'_> {
    fn from(value: i32) -> Self {
        Self::Scalar(HostScalar::Int(value.into()))
    }
}

impl From<i64> for Resolved<'_> {
    fn from(value: i64) -> Self {
        Self::Scalar(HostScalar::Int(value))
    }
}

impl From<f64> for Resolved<'_> {
    fn from(value: f64) -> Self {
        Self::Scalar(HostScalar::Float(value))
    }
}

impl From<String> for Resolved<'_> {
    fn from(value: String) -> Self {
        Self::Scalar(HostScalar::String(value))
    }
}

impl From<&str> for Resolved<'_> {
    fn from(value: &str) -> Self {
        Self::Scalar(HostScalar::String(value.to_string()))
    }
}

impl<'r, T: Into<Resolved<'r>>> From<Option<T>> for Resolved<'r> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A leaf value as the host produced it.
#[derive(Clone, Debug, PartialEq)]
pub enum HostScalar {
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for HostScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value:?}"),
        }
    }
}

/// An error a [`Resolver`] reports for one field. It becomes an entry of
/// the response's `errors` list and the field resolves to null.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{message}")]
pub struct FieldError {
    pub message: String,
}
impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for FieldError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for FieldError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
