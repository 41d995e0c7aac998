mod introspection_tests;

use crate::Request;
use crate::execute_request;
use crate::execution::JsonResolver;
use crate::execution::RequestContext;
use crate::schema::Schema;

/// Runs `query` against a JSON root object and returns the JSON response.
fn run_json(schema: &Schema, root: &serde_json::Value, query: &str) -> serde_json::Value {
    run_request(schema, root, &Request::new(query))
}

fn run_request(schema: &Schema, root: &serde_json::Value, request: &Request) -> serde_json::Value {
    let resolver = JsonResolver::new(root);
    execute_request(schema, &resolver, request, &RequestContext::new()).to_json()
}
