use crate::execution::FieldError;
use crate::execution::HostScalar;
use crate::execution::ResolveContext;
use crate::execution::Resolved;
use crate::execution::Resolver;
use crate::execution::SelectedField;

/// Resolves fields by reading them from a JSON object tree.
///
/// A field resolves to the member of the same name (matched exactly, then
/// ignoring ASCII case), or to null when there is none. Arguments are
/// ignored. Nested objects resolve through further `JsonResolver`s that
/// borrow from the same tree.
///
/// ```
/// use libgql_core::execution::JsonResolver;
///
/// let root = serde_json::json!({ "hero": { "name": "R2-D2" } });
/// let resolver = JsonResolver::new(&root);
/// # let _ = resolver;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct JsonResolver<'v> {
    value: &'v serde_json::Value,
}
impl<'v> JsonResolver<'v> {
    pub fn new(value: &'v serde_json::Value) -> Self {
        Self { value }
    }

    fn member(&self, name: &str) -> Option<&'v serde_json::Value> {
        let serde_json::Value::Object(members) = self.value else {
            return None;
        };
        members.get(name).or_else(|| {
            members
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
    }
}

impl Resolver for JsonResolver<'_> {
    fn resolve_field(
        &self,
        _ctx: &ResolveContext<'_>,
        field: &SelectedField,
    ) -> Result<Resolved<'_>, FieldError> {
        if !self.value.is_object() {
            return Err(FieldError::new(format!(
                "cannot read field `{}` from a non-object JSON value",
                field.field_name,
            )));
        }
        Ok(self.member(&field.field_name).map_or(Resolved::Null, json_to_resolved))
    }
}

fn json_to_resolved(value: &serde_json::Value) -> Resolved<'_> {
    match value {
        serde_json::Value::Null => Resolved::Null,
        serde_json::Value::Bool(value) => Resolved::Scalar(HostScalar::Boolean(*value)),
        serde_json::Value::Number(number) => match number.as_i64() {
            Some(int) => Resolved::Scalar(HostScalar::Int(int)),
            None => Resolved::Scalar(HostScalar::Float(number.as_f64().unwrap_or(f64::NAN))),
        },
        serde_json::Value::String(text) => Resolved::Scalar(HostScalar::String(text.clone())),
        serde_json::Value::Array(items) => Resolved::List(items.iter().map(json_to_resolved).collect()),
        serde_json::Value::Object(_) => Resolved::object(JsonResolver::new(value)),
    }
}
