use crate::types::GqlType;
use crate::value::Value;

/// An argument or input-object field.
///
/// `default_value` is always present. A declaration without an explicit
/// default holds a typed null; when its type is also non-null that null is
/// the "required" sentinel (see [`Value::required()`]) and the value must be
/// supplied by the caller. Coercion relies on the sentinel alone to tell
/// "no default" apart from "defaults to null".
#[derive(Clone, Debug, PartialEq)]
pub struct InputValueDefinition {
    pub name: String,
    pub ty: GqlType,
    pub default_value: Value,
    pub description: Option<String>,
    has_explicit_default: bool,
}
impl InputValueDefinition {
    /// Creates a definition with no explicit default.
    pub fn new(name: impl Into<String>, ty: GqlType) -> Self {
        let default_value = if ty.is_non_null() {
            Value::required(ty)
        } else {
            Value::null(ty)
        };
        Self {
            name: name.into(),
            ty,
            default_value,
            description: None,
            has_explicit_default: false,
        }
    }

    pub fn with_default(mut self, default_value: Value) -> Self {
        self.default_value = default_value;
        self.has_explicit_default = true;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// `true` when the value must be supplied: the type is non-null and no
    /// default was declared.
    pub fn is_required(&self) -> bool {
        self.default_value.is_required_sentinel()
    }

    /// Whether the declaration carries an explicit default, `= null`
    /// included.
    pub fn has_default(&self) -> bool {
        self.has_explicit_default
    }
}
