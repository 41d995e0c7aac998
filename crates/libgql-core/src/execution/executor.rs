use crate::execution::ExecutionError;
use crate::execution::HostScalar;
use crate::execution::PreparedOperation;
use crate::execution::RequestContext;
use crate::execution::ResolveContext;
use crate::execution::Resolved;
use crate::execution::Resolver;
use crate::execution::SelectedField;
use crate::execution::SelectionSet;
use crate::execution::introspection;
use crate::response::GraphQLError;
use crate::response::ResponsePath;
use crate::schema::Schema;
use crate::types::BuiltinScalar;
use crate::types::GqlType;
use crate::value::Value;
use crate::value::ValueData;

/// The outcome of [`execute()`].
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionResult {
    /// The result tree, or `None` when a null propagated up to the root.
    pub data: Option<Value>,
    pub errors: Vec<GraphQLError>,
}
impl ExecutionResult {
    /// The `data` entry of a response.
    pub fn data_json(&self, schema: &Schema) -> serde_json::Value {
        self.data
            .as_ref()
            .map_or(serde_json::Value::Null, |data| data.to_json(schema))
    }
}

/// Runs a prepared operation against `resolver`, the resolver of the root
/// object.
///
/// Fields are resolved one at a time, depth first, in response order. A
/// field whose resolver fails, or whose value cannot be completed, is
/// recorded as an error at its response path and becomes null. A null in a
/// non-null position makes the enclosing object null instead, up to the
/// nearest nullable field (or the whole `data`).
pub fn execute(
    resolver: &dyn Resolver,
    prepared: &PreparedOperation<'_>,
    ctx: &RequestContext,
) -> ExecutionResult {
    let mut executor = Executor {
        schema: prepared.schema,
        request: ctx,
        errors: vec![],
    };

    log::debug!(
        "executing {} `{}`",
        prepared.operation_type.as_str(),
        prepared.operation_name.as_deref().unwrap_or("<anonymous>"),
    );
    let data = executor.execute_selection_set(
        resolver,
        prepared.root_type,
        &prepared.selection_set,
        &ResponsePath::new(),
    );
    log::debug!("execution finished with {} field error(s)", executor.errors.len());

    ExecutionResult {
        data,
        errors: executor.errors,
    }
}

/// Why a value could not be completed.
enum Incomplete {
    /// A new error, not yet recorded.
    Failed(ExecutionError),
    /// A non-null violation further down, already recorded.
    NullPropagated,
}

impl From<ExecutionError> for Incomplete {
    fn from(err: ExecutionError) -> Self {
        Self::Failed(err)
    }
}

struct Executor<'e> {
    schema: &'e Schema,
    request: &'e RequestContext,
    errors: Vec<GraphQLError>,
}
impl<'e> Executor<'e> {
    /// Returns `None` when one of the fields was null in a non-null
    /// position. Sibling fields are still executed so that their errors are
    /// reported.
    fn execute_selection_set(
        &mut self,
        resolver: &dyn Resolver,
        object_type: GqlType,
        selection_set: &SelectionSet,
        path: &ResponsePath,
    ) -> Option<Value> {
        let mut fields = Vec::with_capacity(selection_set.len());
        let mut propagated = false;

        for field in selection_set.fields() {
            let field_path = path.with_key(&field.response_key);
            match self.execute_field(resolver, object_type, field, &field_path) {
                Some(value) => fields.push((field.response_key.clone(), value)),
                None => propagated = true,
            }
        }

        (!propagated).then(|| Value::new(object_type, ValueData::Fields(fields)))
    }

    fn execute_field(
        &mut self,
        resolver: &dyn Resolver,
        object_type: GqlType,
        field: &SelectedField,
        path: &ResponsePath,
    ) -> Option<Value> {
        let resolved = self.resolve(resolver, object_type, field, path);
        let completed = match resolved {
            Ok(resolved) => self.complete_value(field.field_type, field, resolved, path),
            Err(err) => Err(Incomplete::Failed(err)),
        };

        match completed {
            Ok(value) => Some(value),
            Err(incomplete) => {
                if let Incomplete::Failed(err) = incomplete {
                    self.record(err, field, path);
                }
                self.null_or_propagate(field.field_type)
            },
        }
    }

    fn resolve<'r>(
        &self,
        resolver: &'r dyn Resolver,
        object_type: GqlType,
        field: &SelectedField,
        path: &ResponsePath,
    ) -> Result<Resolved<'r>, ExecutionError>
    where
        'e: 'r,
    {
        let schema = self.schema;
        if field.field_name == "__typename" {
            return Ok(Resolved::from(schema.type_name(object_type.to_nullable())));
        }
        if object_type.to_nullable() == schema.query_type() {
            match field.field_name.as_str() {
                "__schema" => return Ok(introspection::schema(schema)),
                "__type" => {
                    let name = field.argument("name").and_then(Value::as_scalar);
                    return Ok(introspection::type_by_name(schema, name));
                },
                _ => {},
            }
        }

        let ctx = ResolveContext {
            schema,
            parent_type: object_type,
            path,
            request: self.request,
        };
        Ok(resolver.resolve_field(&ctx, field)?)
    }

    fn complete_value(
        &mut self,
        ty: GqlType,
        field: &SelectedField,
        resolved: Resolved<'_>,
        path: &ResponsePath,
    ) -> Result<Value, Incomplete> {
        let schema = self.schema;

        if resolved.is_null() {
            if ty.is_non_null() {
                return Err(ExecutionError::NullForNonNull {
                    field_name: field.response_key.clone(),
                    type_name: schema.type_name(ty),
                }
                .into());
            }
            return Ok(Value::null(ty));
        }

        if let Some(element_type) = schema.list_element(ty) {
            let Resolved::List(items) = resolved else {
                return Err(ExecutionError::Internal(format!(
                    "expected a list for field `{}` of type `{}`",
                    field.response_key,
                    schema.type_name(ty),
                ))
                .into());
            };
            let mut completed = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                let item_path = path.with_index(index);
                match self.complete_value(element_type, field, item, &item_path) {
                    Ok(value) => completed.push(value),
                    Err(incomplete) => {
                        if let Incomplete::Failed(err) = incomplete {
                            self.record(err, field, &item_path);
                        }
                        match self.null_or_propagate(element_type) {
                            Some(null) => completed.push(null),
                            None => return Err(Incomplete::NullPropagated),
                        }
                    },
                }
            }
            return Ok(Value::list(ty, completed));
        }

        if schema.is_leaf(ty) {
            return match resolved {
                Resolved::Scalar(scalar) => Ok(self.complete_leaf(ty, scalar)?),
                other => Err(ExecutionError::InvalidLeafValue {
                    type_name: schema.type_name(ty),
                    value: format!("{other:?}"),
                }
                .into()),
            };
        }

        let Resolved::Object(child) = resolved else {
            return Err(ExecutionError::Internal(format!(
                "expected an object for field `{}` of type `{}`",
                field.response_key,
                schema.type_name(ty),
            ))
            .into());
        };
        let Some(selection_set) = &field.selection_set else {
            return Err(ExecutionError::Internal(format!(
                "field `{}` of object type has no selection set",
                field.response_key,
            ))
            .into());
        };
        match self.execute_selection_set(child.as_ref(), ty.to_nullable(), selection_set, path) {
            Some(mut value) => {
                value.ty = ty;
                Ok(value)
            },
            None => Err(Incomplete::NullPropagated),
        }
    }

    /// Serializes a host scalar as a value of the leaf type `ty`.
    fn complete_leaf(&self, ty: GqlType, scalar: HostScalar) -> Result<Value, ExecutionError> {
        let schema = self.schema;
        let invalid = |scalar: &HostScalar| ExecutionError::InvalidLeafValue {
            type_name: schema.type_name(ty.to_nullable()),
            value: scalar.to_string(),
        };

        if let Some(enum_type) = schema.enum_type(ty) {
            return match scalar {
                HostScalar::String(name) if enum_type.value(&name).is_some() => {
                    Ok(Value::scalar(ty, name))
                },
                other => Err(invalid(&other)),
            };
        }

        let text = match (schema.builtin_scalar(ty), &scalar) {
            (Some(BuiltinScalar::Boolean), HostScalar::Boolean(value)) => value.to_string(),
            (Some(BuiltinScalar::Boolean), HostScalar::Int(value)) => (*value != 0).to_string(),

            (Some(BuiltinScalar::Int), HostScalar::Int(value)) => i32::try_from(*value)
                .map_err(|_| invalid(&scalar))?
                .to_string(),
            (Some(BuiltinScalar::Int), HostScalar::Float(value)) => integral_i32(*value)
                .ok_or_else(|| invalid(&scalar))?
                .to_string(),
            (Some(BuiltinScalar::Int), HostScalar::Boolean(value)) => i32::from(*value).to_string(),
            (Some(BuiltinScalar::Int), HostScalar::String(text)) => text
                .trim()
                .parse::<i32>()
                .map_err(|_| invalid(&scalar))?
                .to_string(),

            (Some(BuiltinScalar::Float), HostScalar::Int(value)) => (*value as f64).to_string(),
            (Some(BuiltinScalar::Float), HostScalar::Float(value)) if value.is_finite() => {
                value.to_string()
            },
            (Some(BuiltinScalar::Float), HostScalar::Boolean(value)) => {
                f64::from(u8::from(*value)).to_string()
            },
            (Some(BuiltinScalar::Float), HostScalar::String(text)) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| invalid(&scalar))?
                .to_string(),

            (Some(BuiltinScalar::ID), HostScalar::String(text)) => text.clone(),
            (Some(BuiltinScalar::ID), HostScalar::Int(value)) => value.to_string(),

            (Some(BuiltinScalar::String), HostScalar::String(text)) => text.clone(),
            (Some(BuiltinScalar::String), HostScalar::Boolean(value)) => value.to_string(),
            (Some(BuiltinScalar::String), HostScalar::Int(value)) => value.to_string(),
            (Some(BuiltinScalar::String), HostScalar::Float(value)) => value.to_string(),

            (None, HostScalar::String(text)) => text.clone(),
            (None, HostScalar::Boolean(value)) => value.to_string(),
            (None, HostScalar::Int(value)) => value.to_string(),
            (None, HostScalar::Float(value)) => value.to_string(),

            _ => return Err(invalid(&scalar)),
        };
        Ok(Value::scalar(ty, text))
    }

    fn null_or_propagate(&self, ty: GqlType) -> Option<Value> {
        (!ty.is_non_null()).then(|| Value::null(ty))
    }

    fn record(&mut self, err: ExecutionError, field: &SelectedField, path: &ResponsePath) {
        log::trace!("field error at `{path}`: {err}");
        self.errors.push(
            GraphQLError::new(err.to_string())
                .with_locations(vec![field.location])
                .with_path(path.clone()),
        );
    }
}

fn integral_i32(value: f64) -> Option<i32> {
    if value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    Some(value as i32)
}
