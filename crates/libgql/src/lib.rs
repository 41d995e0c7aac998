//! A GraphQL engine: load a schema from SDL, validate operation documents
//! against it, and execute requests against host-provided resolvers.
//!
//! ```
//! use libgql::Request;
//! use libgql::execute_request;
//! use libgql::execution::JsonResolver;
//! use libgql::execution::RequestContext;
//! use libgql::schema::Schema;
//!
//! let schema = Schema::from_str("type Query { greeting: String }").unwrap();
//! let root = serde_json::json!({ "greeting": "hello" });
//!
//! let response = execute_request(
//!     &schema,
//!     &JsonResolver::new(&root),
//!     &Request::new("{ greeting }"),
//!     &RequestContext::new(),
//! );
//! assert_eq!(response.to_json().to_string(), r#"{"data":{"greeting":"hello"}}"#);
//! ```

pub use libgql_core::*;

/// The lexer and parser behind [`ast`], for callers that want to parse
/// documents (and inspect recovered syntax errors) directly.
pub mod parser {
    pub use libgql_parser::*;
}
