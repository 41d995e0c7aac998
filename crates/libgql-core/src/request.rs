use crate::ast;
use crate::execution;
use crate::execution::RequestContext;
use crate::execution::Resolver;
use crate::loc::SourceLocation;
use crate::response::GraphQLError;
use crate::response::Response;
use crate::schema::Schema;
use crate::validation;
use indexmap::IndexMap;
use serde::Deserialize;

/// A GraphQL request as it arrives over the wire:
/// `{"query": "...", "operationName": "...", "variables": {...}}`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub query: String,
    #[serde(default)]
    pub operation_name: Option<String>,
    #[serde(default)]
    pub variables: Option<IndexMap<String, ast::InputValue>>,
}
impl Request {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_operation_name(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = Some(operation_name.into());
        self
    }

    pub fn with_variables(mut self, variables: IndexMap<String, ast::InputValue>) -> Self {
        self.variables = Some(variables);
        self
    }
}

/// Parses, validates, prepares, and executes `request` against `schema`,
/// using `resolver` for the root object.
///
/// Parse, validation, and variable errors stop the request before
/// execution and produce a response without `data`. Field errors produce a
/// response with both.
pub fn execute_request(
    schema: &Schema,
    resolver: &dyn Resolver,
    request: &Request,
    ctx: &RequestContext,
) -> Response {
    let source = request.query.as_str();

    let parse_result = libgql_parser::parse(source);
    if parse_result.has_errors() {
        let errors = parse_result
            .errors
            .iter()
            .map(|err| {
                GraphQLError::new(err.message())
                    .with_locations(vec![SourceLocation::from_pos(source, err.pos())])
            })
            .collect();
        return Response::from_errors(errors);
    }
    let Some(document) = parse_result.into_valid_ast() else {
        return Response::from_errors(vec![GraphQLError::new("The query could not be parsed")]);
    };

    let validation_errors = validation::validate(schema, &document, source);
    if !validation_errors.is_empty() {
        return Response::from_errors(validation_errors.into_iter().map(Into::into).collect());
    }

    let prepared = match execution::prepare_operation(
        schema,
        &document,
        source,
        request.operation_name.as_deref(),
        request.variables.as_ref(),
    ) {
        Ok(prepared) => prepared,
        Err(errors) => return Response::from_errors(errors),
    };

    let result = execution::execute(resolver, &prepared, ctx);
    Response::from_data(result.data_json(schema), result.errors)
}
