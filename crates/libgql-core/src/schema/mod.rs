mod builtins;
mod schema;
mod schema_builder;
mod type_validation_error;

pub(crate) use schema::MetaFields;
pub use schema::Schema;
pub use schema_builder::SchemaBuildError;
pub use schema_builder::SchemaBuilder;
pub use type_validation_error::TypeValidationError;

#[cfg(test)]
mod tests;
