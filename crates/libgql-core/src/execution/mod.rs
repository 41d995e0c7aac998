//! Executing prepared operations against host [`Resolver`]s.
//!
//! Execution runs in two steps. [`prepare_operation()`] picks the operation,
//! coerces the request's variables, and builds the merged [`SelectionSet`]
//! of the root type. [`execute()`] then walks that selection set, asking the
//! host for each field's value and completing it against the field's
//! declared type.

mod execution_error;
mod executor;
mod field_handlers;
mod introspection;
mod json_resolver;
mod prepared_operation;
mod request_context;
mod resolver;
mod selection_set;

pub use execution_error::ExecutionError;
pub use execution_error::RequestError;
pub use executor::ExecutionResult;
pub use executor::execute;
pub use field_handlers::FieldHandler;
pub use field_handlers::FieldHandlers;
pub use field_handlers::ObjectResolver;
pub use json_resolver::JsonResolver;
pub use prepared_operation::PreparedOperation;
pub use prepared_operation::prepare_operation;
pub use request_context::RequestContext;
pub use resolver::FieldError;
pub use resolver::HostScalar;
pub use resolver::ResolveContext;
pub use resolver::Resolved;
pub use resolver::Resolver;
pub use selection_set::SelectedField;
pub use selection_set::SelectionScope;
pub use selection_set::SelectionSet;
pub use selection_set::build_selection_set;

#[cfg(test)]
mod tests;
