//! The type system, validator, input coercion, and executor behind the
//! `libgql` crate.
//!
//! The usual flow through this crate is:
//!
//! 1. Build a [`Schema`](schema::Schema) from SDL with a
//!    [`SchemaBuilder`](schema::SchemaBuilder).
//! 2. Parse an operation document with [`ast`] parsing from
//!    `libgql-parser` and check it with [`validation::validate()`].
//! 3. Prepare the chosen operation (variable coercion and selection set
//!    merging) and run it against a host
//!    [`Resolver`](execution::Resolver) with [`execution::execute()`].
//!
//! [`execute_request()`] runs all of these steps for a single
//! [`Request`] and produces a serializable [`Response`].

pub mod coercion;
pub mod execution;
mod file_reader;
pub mod loc;
mod request;
mod response;
pub mod schema;
pub mod types;
pub mod validation;
mod value;

pub use file_reader::ReadContentError;
pub use libgql_parser::ast;
pub use request::Request;
pub use request::execute_request;
pub use response::GraphQLError;
pub use response::PathSegment;
pub use response::Response;
pub use response::ResponsePath;
pub use value::Value;
pub use value::ValueData;
