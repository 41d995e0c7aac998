use crate::execution::FieldError;
use crate::execution::ResolveContext;
use crate::execution::Resolved;
use crate::execution::Resolver;
use crate::execution::SelectedField;
use indexmap::IndexMap;
use std::sync::Arc;

/// A function producing the value of one field of a `T`.
pub type FieldHandler<T> = dyn for<'t> Fn(&'t T, &ResolveContext<'_>, &SelectedField) -> Result<Resolved<'t>, FieldError>
    + Send
    + Sync;

/// Field handlers for one host type, registered by field name.
///
/// ```
/// use libgql_core::execution::FieldHandlers;
/// use libgql_core::execution::Resolved;
///
/// struct Droid {
///     name: String,
/// }
///
/// let handlers = FieldHandlers::<Droid>::new()
///     .on("name", |droid, _ctx, _field| Ok(Resolved::from(droid.name.as_str())));
/// assert!(handlers.handler("name").is_some());
/// assert!(handlers.handler("NAME").is_some());
/// ```
pub struct FieldHandlers<T> {
    handlers: IndexMap<String, Box<FieldHandler<T>>>,
}
impl<T> FieldHandlers<T> {
    pub fn new() -> Self {
        Self {
            handlers: IndexMap::new(),
        }
    }

    /// Registers `handler` for the field `field_name`, replacing any handler
    /// registered for it before.
    pub fn on<F>(mut self, field_name: &str, handler: F) -> Self
    where
        F: for<'t> Fn(&'t T, &ResolveContext<'_>, &SelectedField) -> Result<Resolved<'t>, FieldError>
            + Send
            + Sync
            + 'static,
    {
        self.handlers.insert(field_name.to_string(), Box::new(handler));
        self
    }

    /// Finds the handler for `field_name`: an exact match first, then one
    /// whose name differs only in ASCII case.
    pub fn handler(&self, field_name: &str) -> Option<&FieldHandler<T>> {
        self.handlers
            .get(field_name)
            .or_else(|| {
                self.handlers
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(field_name))
                    .map(|(_, handler)| handler)
            })
            .map(Box::as_ref)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

impl<T> Default for FieldHandlers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for FieldHandlers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldHandlers")
            .field("fields", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A host value paired with the handlers that resolve its fields.
pub struct ObjectResolver<T> {
    value: T,
    handlers: Arc<FieldHandlers<T>>,
}
impl<T> ObjectResolver<T> {
    pub fn new(value: T, handlers: Arc<FieldHandlers<T>>) -> Self {
        Self { value, handlers }
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T> Resolver for ObjectResolver<T> {
    fn resolve_field(
        &self,
        ctx: &ResolveContext<'_>,
        field: &SelectedField,
    ) -> Result<Resolved<'_>, FieldError> {
        let handler = self.handlers.handler(&field.field_name).ok_or_else(|| {
            FieldError::new(format!(
                "no handler is registered for field `{}` of `{}`",
                field.field_name,
                ctx.schema.type_name(ctx.parent_type),
            ))
        })?;
        handler(&self.value, ctx, field)
    }
}
