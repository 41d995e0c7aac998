use crate::ast;
use crate::schema::Schema;
use crate::types::BuiltinScalar;
use crate::types::GqlType;
use indexmap::IndexMap;
use libgql_parser::Pos;

/// A typed runtime datum: a coerced input value or a completed result.
///
/// Scalars (and enum values) are held in their canonical string form
/// (`"true"`, `"42"`, `"3.14"`, `"RED"`) whatever their origin, and only
/// turned back into JSON literals by [`Value::to_json()`].
#[derive(Clone, Debug, PartialEq)]
pub struct Value {
    pub ty: GqlType,
    pub data: ValueData,
    required: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ValueData {
    Null,
    Scalar(String),
    List(Vec<Value>),
    /// Completed object fields in response order.
    Fields(Vec<(String, Value)>),
    /// A coerced input object, in declared field order.
    Map(IndexMap<String, Value>),
}

impl Value {
    pub fn new(ty: GqlType, data: ValueData) -> Self {
        Self {
            ty,
            data,
            required: false,
        }
    }

    pub fn null(ty: GqlType) -> Self {
        Self::new(ty, ValueData::Null)
    }

    /// The typed null stored as the default of a non-null argument or input
    /// field that declares no default. It marks the value as one the caller
    /// has to supply.
    pub fn required(ty: GqlType) -> Self {
        Self {
            ty,
            data: ValueData::Null,
            required: true,
        }
    }

    pub fn scalar(ty: GqlType, text: impl Into<String>) -> Self {
        Self::new(ty, ValueData::Scalar(text.into()))
    }

    pub fn list(ty: GqlType, items: Vec<Value>) -> Self {
        Self::new(ty, ValueData::List(items))
    }

    pub fn is_null(&self) -> bool {
        matches!(self.data, ValueData::Null)
    }

    pub fn is_required_sentinel(&self) -> bool {
        self.required
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match &self.data {
            ValueData::Scalar(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match &self.data {
            ValueData::List(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a field of an object result or an input object.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match &self.data {
            ValueData::Fields(fields) => {
                fields.iter().find(|(key, _)| key == name).map(|(_, v)| v)
            },
            ValueData::Map(map) => map.get(name),
            _ => None,
        }
    }

    /// Reads a coerced `Boolean`.
    pub fn as_bool(&self) -> Option<bool> {
        match self.as_scalar()? {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    /// Renders this value as JSON.
    ///
    /// Builtin `Boolean`, `Int`, and `Float` scalars become JSON literals;
    /// every other scalar and all enum values become JSON strings.
    pub fn to_json(&self, schema: &Schema) -> serde_json::Value {
        match &self.data {
            ValueData::Null => serde_json::Value::Null,
            ValueData::Scalar(text) => scalar_to_json(schema.builtin_scalar(self.ty), text),
            ValueData::List(items) => {
                serde_json::Value::Array(items.iter().map(|v| v.to_json(schema)).collect())
            },
            ValueData::Fields(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(key, v)| (key.clone(), v.to_json(schema)))
                    .collect(),
            ),
            ValueData::Map(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, v)| (key.clone(), v.to_json(schema)))
                    .collect(),
            ),
        }
    }

    /// Turns this value back into the literal that denotes it, so that it
    /// can be printed (introspection's `defaultValue`) or coerced again.
    pub fn to_input_value(&self, schema: &Schema) -> ast::InputValue {
        let pos = Pos::default();
        let kind = match &self.data {
            ValueData::Null => ast::InputValueKind::Null,
            ValueData::Scalar(text) => {
                let scalar_kind = if schema.is_enum(self.ty) {
                    ast::ScalarKind::Enum
                } else {
                    match schema.builtin_scalar(self.ty) {
                        Some(BuiltinScalar::Int) => ast::ScalarKind::Int,
                        Some(BuiltinScalar::Float) => ast::ScalarKind::Float,
                        Some(BuiltinScalar::Boolean) => ast::ScalarKind::Boolean,
                        _ => ast::ScalarKind::String,
                    }
                };
                ast::InputValueKind::Scalar(scalar_kind, text.clone())
            },
            ValueData::List(items) => ast::InputValueKind::List(
                items.iter().map(|v| v.to_input_value(schema)).collect(),
            ),
            ValueData::Fields(fields) => ast::InputValueKind::Object(
                fields
                    .iter()
                    .map(|(key, v)| object_field(key, v.to_input_value(schema)))
                    .collect(),
            ),
            ValueData::Map(map) => ast::InputValueKind::Object(
                map.iter()
                    .map(|(key, v)| object_field(key, v.to_input_value(schema)))
                    .collect(),
            ),
        };
        ast::InputValue::new(kind, pos)
    }
}

fn object_field(name: &str, value: ast::InputValue) -> ast::ObjectField {
    ast::ObjectField {
        name: ast::Name::new(name, Pos::default()),
        value,
    }
}

fn scalar_to_json(builtin: Option<BuiltinScalar>, text: &str) -> serde_json::Value {
    match builtin {
        Some(BuiltinScalar::Boolean) => match text {
            "true" => serde_json::Value::Bool(true),
            "false" => serde_json::Value::Bool(false),
            _ => serde_json::Value::String(text.to_string()),
        },
        Some(BuiltinScalar::Int) => match text.parse::<i64>() {
            Ok(int) => serde_json::Value::from(int),
            Err(_) => serde_json::Value::String(text.to_string()),
        },
        Some(BuiltinScalar::Float) => text
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(serde_json::Value::Number)
            .unwrap_or_else(|| serde_json::Value::String(text.to_string())),
        _ => serde_json::Value::String(text.to_string()),
    }
}
