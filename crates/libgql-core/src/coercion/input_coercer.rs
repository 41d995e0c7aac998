use crate::ast;
use crate::coercion::CoercionError;
use crate::coercion::CoercionErrorKind;
use crate::response::PathSegment;
use crate::schema::Schema;
use crate::types::BuiltinScalar;
use crate::types::EnumType;
use crate::types::GqlType;
use crate::types::InputObjectType;
use crate::types::InputValueDefinition;
use crate::types::NamedType;
use crate::types::ScalarType;
use crate::value::Value;
use crate::value::ValueData;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Coerced variable values of one operation, by variable name. Variables
/// that were neither supplied nor defaulted are absent.
pub type Variables = IndexMap<String, Value>;

type Result<T> = std::result::Result<T, Vec<CoercionError>>;

/// Where an input value came from.
///
/// JSON has no enum literals and a single number type, so JSON input may
/// supply an enum value as a string and an `Int` as an integral float.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputSource {
    Literal,
    Json,
}

#[derive(Clone, Copy, Debug)]
enum VariableScope<'a> {
    /// Constant context: any variable reference is an error.
    Forbidden,
    Bound(&'a Variables),
    /// Validation: variables are checked separately and accepted here.
    Unchecked,
}

/// Coerces a literal against `ty`.
///
/// With `variables` set to `None` the literal must be constant (schema
/// default values). Otherwise variable references are replaced by their
/// already coerced values, and references to absent variables are treated
/// as if the value had not been supplied at all.
pub fn coerce_input_value(
    schema: &Schema,
    ty: GqlType,
    value: &ast::InputValue,
    variables: Option<&Variables>,
) -> Result<Value> {
    let scope = variables.map_or(VariableScope::Forbidden, VariableScope::Bound);
    let mut coercer = InputCoercer::new(schema, InputSource::Literal, scope);
    let coerced = coercer.coerce(ty, value);
    coercer.finish(coerced)
}

/// Coerces a value decoded from JSON (e.g. one request variable).
pub fn coerce_json_value(schema: &Schema, ty: GqlType, value: &ast::InputValue) -> Result<Value> {
    let mut coercer = InputCoercer::new(schema, InputSource::Json, VariableScope::Forbidden);
    let coerced = coercer.coerce(ty, value);
    coercer.finish(coerced)
}

/// Checks a literal during validation and returns every problem found.
/// Variable references are not checked here.
pub(crate) fn check_literal(schema: &Schema, ty: GqlType, value: &ast::InputValue) -> Vec<CoercionError> {
    let mut coercer = InputCoercer::new(schema, InputSource::Literal, VariableScope::Unchecked);
    coercer.coerce(ty, value);
    coercer.errors
}

/// Checks a variable's default value against the variable's declared type
/// during validation.
pub(crate) fn check_variable_default(
    schema: &Schema,
    type_ref: &ast::TypeRef,
    value: &ast::InputValue,
) -> Vec<CoercionError> {
    let mut coercer = InputCoercer::new(schema, InputSource::Literal, VariableScope::Unchecked);
    coercer.coerce_declared(type_ref, value);
    coercer.errors
}

/// Coerces the request's variables against the operation's variable
/// definitions.
///
/// Supplied values are coerced as JSON input. A variable that is not
/// supplied takes its declared default; a non-null variable with neither is
/// an error; any other variable is left out of the result.
///
/// Declared types are followed as written and never registered with the
/// schema.
pub fn coerce_variable_values(
    schema: &Schema,
    operation: &ast::OperationDefinition,
    raw: Option<&IndexMap<String, ast::InputValue>>,
) -> Result<Variables> {
    let mut variables = Variables::new();
    let mut errors = vec![];

    for var_def in &operation.variable_definitions {
        let name = var_def.name.as_str();
        let var_type = &var_def.var_type;
        if schema.type_ref_named(var_type).is_none() {
            errors.push(CoercionError::new(
                CoercionErrorKind::UnknownVariableType {
                    variable_name: name.to_string(),
                    type_name: var_type.to_string(),
                },
                var_def.pos,
            ));
            continue;
        }

        let coerced = if let Some(supplied) = raw.and_then(|raw| raw.get(name)) {
            let mut coercer = InputCoercer::new(schema, InputSource::Json, VariableScope::Forbidden);
            let coerced = coercer.coerce_declared(var_type, supplied);
            coercer.finish(coerced)
        } else if let Some(default_value) = &var_def.default_value {
            let mut coercer = InputCoercer::new(schema, InputSource::Literal, VariableScope::Forbidden);
            let coerced = coercer.coerce_declared(var_type, default_value);
            coercer.finish(coerced)
        } else if var_type.is_non_null() {
            errors.push(CoercionError::new(
                CoercionErrorKind::MissingVariableValue {
                    variable_name: name.to_string(),
                    variable_type: var_type.to_string(),
                },
                var_def.pos,
            ));
            continue;
        } else {
            continue;
        };

        match coerced {
            Ok(value) => {
                variables.insert(name.to_string(), value);
            },
            Err(var_errors) => errors.extend(var_errors.into_iter().map(|mut err| {
                err.path.insert(0, PathSegment::Key(format!("${name}")));
                if err.pos == Default::default() {
                    err.pos = var_def.pos;
                }
                err
            })),
        }
    }

    if errors.is_empty() {
        Ok(variables)
    } else {
        Err(errors)
    }
}

/// Coerces the arguments supplied to a field or directive.
///
/// The result holds every declared argument: supplied ones coerced, the
/// rest taken from their defaults. `pos` locates the field or directive for
/// errors about missing arguments.
pub fn coerce_argument_values(
    schema: &Schema,
    definitions: &IndexMap<String, InputValueDefinition>,
    arguments: &[ast::Argument],
    variables: Option<&Variables>,
    pos: libgql_parser::Pos,
) -> Result<IndexMap<String, Value>> {
    let scope = variables.map_or(VariableScope::Forbidden, VariableScope::Bound);
    let mut coercer = InputCoercer::new(schema, InputSource::Literal, scope);
    let mut coerced = IndexMap::new();

    for (name, definition) in definitions {
        let supplied = arguments
            .iter()
            .find(|arg| arg.name == name.as_str())
            .map(|arg| &arg.value)
            .filter(|value| !coercer.is_absent_variable(value));

        let value = match supplied {
            Some(value) => {
                coercer.path.push(PathSegment::Key(name.clone()));
                let value = coercer.coerce(definition.ty, value);
                coercer.path.pop();
                value
            },
            None if definition.is_required() => {
                coercer.push_error(
                    CoercionErrorKind::MissingRequiredArgument {
                        argument_name: name.clone(),
                        argument_type: schema.type_name(definition.ty),
                    },
                    pos,
                );
                None
            },
            None => Some(definition.default_value.clone()),
        };
        if let Some(value) = value {
            coerced.insert(name.clone(), value);
        }
    }

    coercer.finish(Some(coerced))
}

struct InputCoercer<'a> {
    schema: &'a Schema,
    source: InputSource,
    variables: VariableScope<'a>,
    path: Vec<PathSegment>,
    errors: Vec<CoercionError>,
}
impl<'a> InputCoercer<'a> {
    fn new(schema: &'a Schema, source: InputSource, variables: VariableScope<'a>) -> Self {
        Self {
            schema,
            source,
            variables,
            path: vec![],
            errors: vec![],
        }
    }

    fn finish<T>(self, coerced: Option<T>) -> Result<T> {
        match coerced {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(self.errors),
        }
    }

    fn push_error(&mut self, kind: CoercionErrorKind, pos: libgql_parser::Pos) {
        self.errors.push(CoercionError {
            kind,
            pos,
            path: self.path.clone(),
        });
    }

    /// A reference to a variable that has no value in the bound scope.
    fn is_absent_variable(&self, value: &ast::InputValue) -> bool {
        match (value.as_variable(), self.variables) {
            (Some(name), VariableScope::Bound(vars)) => !vars.contains_key(name),
            _ => false,
        }
    }

    /// Coerces `value` against `ty`, recording errors and returning `None`
    /// when the value cannot be coerced.
    fn coerce(&mut self, ty: GqlType, value: &ast::InputValue) -> Option<Value> {
        match &value.kind {
            ast::InputValueKind::Null => self.coerce_null(ty, value.pos),
            ast::InputValueKind::Variable(name) => self.coerce_variable(ty, name, value.pos),
            _ => {
                if let Some(element) = self.schema.list_element(ty) {
                    return self.coerce_list(ty, element, value);
                }
                match self.schema.named_type(ty) {
                    Some(NamedType::Scalar(scalar)) => self.coerce_scalar(ty, scalar, value),
                    Some(NamedType::Enum(enum_type)) => self.coerce_enum(ty, enum_type, value),
                    Some(NamedType::InputObject(input)) => self.coerce_input_object(ty, input, value),
                    Some(NamedType::Object(_)) | None => {
                        self.push_error(
                            CoercionErrorKind::NotAnInputType {
                                type_name: self.schema.type_name(ty),
                            },
                            value.pos,
                        );
                        None
                    },
                }
            },
        }
    }

    /// Coerces `value` against a type written in a document, following its
    /// list and non-null wrappers as written.
    ///
    /// Lists get the tightest existing type that accepts them. Positions
    /// re-type a variable's value when it is used, so the list type only
    /// has to be honest, not exact.
    fn coerce_declared(&mut self, type_ref: &ast::TypeRef, value: &ast::InputValue) -> Option<Value> {
        match type_ref {
            ast::TypeRef::Named(name) => match self.schema.type_by_name(name.as_str()) {
                Some(ty) => self.coerce(ty, value),
                None => {
                    self.push_error(
                        CoercionErrorKind::NotAnInputType {
                            type_name: name.as_str().to_string(),
                        },
                        value.pos,
                    );
                    None
                },
            },
            ast::TypeRef::NonNull(inner, _) => {
                if value.is_null() {
                    self.push_error(
                        CoercionErrorKind::NullForNonNull {
                            type_name: type_ref.to_string(),
                        },
                        value.pos,
                    );
                    return None;
                }
                let coerced = self.coerce_declared(inner, value)?;
                Some(Value::new(coerced.ty.to_non_null(), coerced.data))
            },
            ast::TypeRef::List(inner, _) => {
                let Some(ty) = self.schema.existing_types_accepting(type_ref).first().copied() else {
                    self.push_error(
                        CoercionErrorKind::UnacceptedListType {
                            type_name: type_ref.to_string(),
                        },
                        value.pos,
                    );
                    return None;
                };
                match &value.kind {
                    ast::InputValueKind::Null => Some(Value::null(ty)),
                    ast::InputValueKind::List(items) => {
                        let mut coerced = Vec::with_capacity(items.len());
                        let mut failed = false;
                        for (idx, item) in items.iter().enumerate() {
                            self.path.push(PathSegment::Index(idx));
                            let item_value = self.coerce_declared(inner, item);
                            self.path.pop();
                            match item_value {
                                Some(item_value) => coerced.push(item_value),
                                None => failed = true,
                            }
                        }
                        (!failed).then(|| Value::list(ty, coerced))
                    },
                    _ => {
                        let single = self.coerce_declared(inner, value)?;
                        Some(Value::list(ty, vec![single]))
                    },
                }
            },
        }
    }

    fn coerce_null(&mut self, ty: GqlType, pos: libgql_parser::Pos) -> Option<Value> {
        if ty.is_non_null() {
            self.push_error(
                CoercionErrorKind::NullForNonNull {
                    type_name: self.schema.type_name(ty),
                },
                pos,
            );
            return None;
        }
        Some(Value::null(ty))
    }

    fn coerce_variable(&mut self, ty: GqlType, name: &str, pos: libgql_parser::Pos) -> Option<Value> {
        match self.variables {
            VariableScope::Forbidden => {
                self.push_error(
                    CoercionErrorKind::VariableNotAllowed {
                        variable_name: name.to_string(),
                    },
                    pos,
                );
                None
            },
            VariableScope::Unchecked => Some(Value::null(ty.to_nullable())),
            VariableScope::Bound(vars) => match vars.get(name) {
                Some(bound) if !bound.is_null() => Some(self.adapt_bound_value(ty, bound)),
                _ => self.coerce_null(ty, pos),
            },
        }
    }

    /// Re-types a variable's value for the position it is used in, wrapping
    /// it into lists where the position expects a deeper list.
    fn adapt_bound_value(&self, ty: GqlType, bound: &Value) -> Value {
        let Some(element) = self.schema.list_element(ty) else {
            return Value::new(ty, bound.data.clone());
        };
        match &bound.data {
            ValueData::List(items) => Value::list(
                ty,
                items
                    .iter()
                    .map(|item| {
                        if item.is_null() {
                            Value::null(element)
                        } else {
                            self.adapt_bound_value(element, item)
                        }
                    })
                    .collect(),
            ),
            _ => Value::list(ty, vec![self.adapt_bound_value(element, bound)]),
        }
    }

    fn coerce_list(&mut self, ty: GqlType, element: GqlType, value: &ast::InputValue) -> Option<Value> {
        let ast::InputValueKind::List(items) = &value.kind else {
            // A single value where a list is expected becomes a one-element
            // list; nested list types wrap recursively.
            let single = self.coerce(element, value)?;
            return Some(Value::list(ty, vec![single]));
        };

        let mut coerced = Vec::with_capacity(items.len());
        let mut failed = false;
        for (idx, item) in items.iter().enumerate() {
            self.path.push(PathSegment::Index(idx));
            let item_value = if self.is_absent_variable(item) {
                self.coerce_null(element, item.pos)
            } else {
                self.coerce(element, item)
            };
            self.path.pop();
            match item_value {
                Some(item_value) => coerced.push(item_value),
                None => failed = true,
            }
        }
        (!failed).then(|| Value::list(ty, coerced))
    }

    fn coerce_scalar(&mut self, ty: GqlType, scalar: &ScalarType, value: &ast::InputValue) -> Option<Value> {
        let ast::InputValueKind::Scalar(kind, text) = &value.kind else {
            self.push_error(
                CoercionErrorKind::InvalidScalar {
                    type_name: scalar.name.clone(),
                    found: describe_value(value),
                },
                value.pos,
            );
            return None;
        };

        let invalid = || CoercionErrorKind::InvalidScalar {
            type_name: scalar.name.clone(),
            found: describe_value(value),
        };
        let canonical = match scalar.builtin {
            Some(BuiltinScalar::Int) => self.coerce_int(*kind, text).unwrap_or_else(|| Err(invalid())),
            Some(BuiltinScalar::Float) => coerce_float(*kind, text).unwrap_or_else(|| Err(invalid())),
            Some(BuiltinScalar::String) => {
                (*kind == ast::ScalarKind::String).then(|| text.clone()).ok_or_else(invalid)
            },
            Some(BuiltinScalar::Boolean) => {
                (*kind == ast::ScalarKind::Boolean).then(|| text.clone()).ok_or_else(invalid)
            },
            Some(BuiltinScalar::ID) => matches!(kind, ast::ScalarKind::String | ast::ScalarKind::Int)
                .then(|| text.clone())
                .ok_or_else(invalid),
            // Custom scalars accept any scalar literal as-is.
            None => Ok(text.clone()),
        };

        match canonical {
            Ok(canonical) => Some(Value::scalar(ty, canonical)),
            Err(kind) => {
                self.push_error(kind, value.pos);
                None
            },
        }
    }

    /// `None` when the literal is not an integer at all.
    fn coerce_int(
        &self,
        kind: ast::ScalarKind,
        text: &str,
    ) -> Option<std::result::Result<String, CoercionErrorKind>> {
        let out_of_range = || CoercionErrorKind::IntOutOfRange {
            value: text.to_string(),
        };
        match kind {
            ast::ScalarKind::Int => Some(
                text.parse::<i32>()
                    .map(|int| int.to_string())
                    .map_err(|_| out_of_range()),
            ),
            // JSON numbers like `4.0` still denote integers.
            ast::ScalarKind::Float if self.source == InputSource::Json => {
                let float = text.parse::<f64>().ok()?;
                if float.fract() != 0.0 || !float.is_finite() {
                    return None;
                }
                if float < f64::from(i32::MIN) || float > f64::from(i32::MAX) {
                    return Some(Err(out_of_range()));
                }
                Some(Ok((float as i32).to_string()))
            },
            _ => None,
        }
    }

    fn coerce_enum(&mut self, ty: GqlType, enum_type: &EnumType, value: &ast::InputValue) -> Option<Value> {
        let name = match &value.kind {
            ast::InputValueKind::Scalar(ast::ScalarKind::Enum, name) => Some(name),
            ast::InputValueKind::Scalar(ast::ScalarKind::String, name)
                if self.source == InputSource::Json =>
            {
                Some(name)
            },
            _ => None,
        };
        let Some(name) = name else {
            self.push_error(
                CoercionErrorKind::InvalidEnumValue {
                    enum_name: enum_type.name.clone(),
                    found: describe_value(value),
                },
                value.pos,
            );
            return None;
        };
        if enum_type.value(name).is_none() {
            self.push_error(
                CoercionErrorKind::UnknownEnumValue {
                    enum_name: enum_type.name.clone(),
                    value: name.clone(),
                },
                value.pos,
            );
            return None;
        }
        Some(Value::scalar(ty, name.clone()))
    }

    fn coerce_input_object(
        &mut self,
        ty: GqlType,
        input: &InputObjectType,
        value: &ast::InputValue,
    ) -> Option<Value> {
        let ast::InputValueKind::Object(supplied) = &value.kind else {
            self.push_error(
                CoercionErrorKind::ExpectedInputObject {
                    type_name: input.name.clone(),
                    found: describe_value(value),
                },
                value.pos,
            );
            return None;
        };

        let error_count = self.errors.len();
        let mut seen = HashSet::new();
        for field in supplied {
            let field_name = field.name.as_str();
            if input.field(field_name).is_none() {
                self.push_error(
                    CoercionErrorKind::UnknownInputField {
                        type_name: input.name.clone(),
                        field_name: field_name.to_string(),
                    },
                    field.name.pos,
                );
            } else if !seen.insert(field_name) {
                self.push_error(
                    CoercionErrorKind::DuplicateInputField {
                        type_name: input.name.clone(),
                        field_name: field_name.to_string(),
                    },
                    field.name.pos,
                );
            }
        }

        let mut coerced = IndexMap::new();
        for (field_name, definition) in &input.fields {
            let supplied_value = supplied
                .iter()
                .find(|field| field.name == field_name.as_str())
                .map(|field| &field.value)
                .filter(|value| !self.is_absent_variable(value));

            match supplied_value {
                Some(field_value) => {
                    self.path.push(PathSegment::Key(field_name.clone()));
                    let field_coerced = self.coerce(definition.ty, field_value);
                    self.path.pop();
                    if let Some(field_coerced) = field_coerced {
                        coerced.insert(field_name.clone(), field_coerced);
                    }
                },
                None if definition.is_required() => {
                    self.push_error(
                        CoercionErrorKind::MissingRequiredField {
                            type_name: input.name.clone(),
                            field_name: field_name.clone(),
                            field_type: self.schema.type_name(definition.ty),
                        },
                        value.pos,
                    );
                },
                None => {
                    coerced.insert(field_name.clone(), definition.default_value.clone());
                },
            }
        }

        (self.errors.len() == error_count).then(|| Value::new(ty, ValueData::Map(coerced)))
    }
}

/// `None` when the literal is not a number at all.
fn coerce_float(
    kind: ast::ScalarKind,
    text: &str,
) -> Option<std::result::Result<String, CoercionErrorKind>> {
    if !matches!(kind, ast::ScalarKind::Int | ast::ScalarKind::Float) {
        return None;
    }
    let float = text.parse::<f64>().ok()?;
    if !float.is_finite() {
        return Some(Err(CoercionErrorKind::NonFiniteFloat {
            value: text.to_string(),
        }));
    }
    Some(Ok(float.to_string()))
}

/// A short description of a value for error messages.
fn describe_value(value: &ast::InputValue) -> String {
    match &value.kind {
        ast::InputValueKind::Null => "null".to_string(),
        ast::InputValueKind::Variable(name) => format!("the variable `${name}`"),
        ast::InputValueKind::Scalar(kind, _) => format!("the {} value {value}", kind.description()),
        ast::InputValueKind::List(_) => format!("the list {value}"),
        ast::InputValueKind::Object(_) => format!("the object {value}"),
    }
}
