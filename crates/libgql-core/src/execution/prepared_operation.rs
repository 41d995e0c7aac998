use crate::ast;
use crate::coercion;
use crate::coercion::Variables;
use crate::execution::RequestError;
use crate::execution::SelectionScope;
use crate::execution::SelectionSet;
use crate::execution::build_selection_set;
use crate::loc::SourceLocation;
use crate::response::GraphQLError;
use crate::schema::Schema;
use crate::types::GqlType;
use indexmap::IndexMap;

/// A validated operation, ready to execute: variables coerced and the root
/// selection set built.
#[derive(Clone, Debug)]
pub struct PreparedOperation<'s> {
    pub schema: &'s Schema,
    pub operation_type: ast::OperationType,
    pub operation_name: Option<String>,
    pub root_type: GqlType,
    pub variables: Variables,
    pub selection_set: SelectionSet,
}

/// Picks the operation to run from `document`, coerces the request's
/// variables against it, and builds its root selection set.
///
/// `document` must already have passed [`validate()`]. With no
/// `operation_name` the document must hold exactly one operation.
///
/// [`validate()`]: crate::validation::validate
pub fn prepare_operation<'s>(
    schema: &'s Schema,
    document: &ast::Document,
    source: &str,
    operation_name: Option<&str>,
    raw_variables: Option<&IndexMap<String, ast::InputValue>>,
) -> Result<PreparedOperation<'s>, Vec<GraphQLError>> {
    let operation = select_operation(document, operation_name).map_err(|err| vec![err.into()])?;

    let root_type = match operation.operation_type {
        ast::OperationType::Query => schema.query_type(),
        ast::OperationType::Mutation => schema
            .mutation_type()
            .ok_or_else(|| vec![RequestError::MutationNotSupported.into()])?,
        ast::OperationType::Subscription => {
            return Err(vec![RequestError::SubscriptionNotSupported.into()]);
        },
    };

    let variables =
        coercion::coerce_variable_values(schema, operation, raw_variables).map_err(|errors| {
            errors
                .into_iter()
                .map(|err| {
                    GraphQLError::new(err.to_string())
                        .with_locations(vec![SourceLocation::from_pos(source, err.pos)])
                })
                .collect::<Vec<_>>()
        })?;

    let scope = SelectionScope {
        schema,
        document,
        source,
        variables: &variables,
    };
    let (selection_set, errors) = build_selection_set(&scope, root_type, &operation.selection_set);
    if !errors.is_empty() {
        return Err(errors);
    }

    log::debug!(
        "prepared {} `{}` with {} variable(s) and {} root field(s)",
        operation.operation_type.as_str(),
        operation.name_str().unwrap_or("<anonymous>"),
        variables.len(),
        selection_set.len(),
    );

    Ok(PreparedOperation {
        schema,
        operation_type: operation.operation_type,
        operation_name: operation.name_str().map(str::to_string),
        root_type,
        variables,
        selection_set,
    })
}

fn select_operation<'d>(
    document: &'d ast::Document,
    operation_name: Option<&str>,
) -> Result<&'d ast::OperationDefinition, RequestError> {
    match operation_name {
        Some(name) => document
            .operations()
            .find(|op| op.name_str() == Some(name))
            .ok_or_else(|| RequestError::UnknownOperation {
                operation_name: name.to_string(),
            }),
        None => {
            let mut operations = document.operations();
            let first = operations.next().ok_or(RequestError::NoOperation)?;
            if operations.next().is_some() {
                return Err(RequestError::OperationNameRequired);
            }
            Ok(first)
        },
    }
}
