use crate::ast;
use crate::coercion;
use crate::coercion::CoercionError;
use crate::coercion::Variables;
use crate::loc::SourceLocation;
use crate::response::GraphQLError;
use crate::schema::Schema;
use crate::types::GqlType;
use crate::value::Value;
use indexmap::IndexMap;
use libgql_parser::Pos;
use std::collections::HashSet;

/// The fields of one selection set after fragments have been inlined,
/// `@skip`/`@include` applied, and same-keyed fields merged, in response
/// order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionSet {
    fields: Vec<SelectedField>,
}
impl SelectionSet {
    pub fn fields(&self) -> &[SelectedField] {
        &self.fields
    }

    pub fn field(&self, response_key: &str) -> Option<&SelectedField> {
        self.fields.iter().find(|field| field.response_key == response_key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// One entry of a [`SelectionSet`]: a field with its arguments coerced and
/// its sub-selections merged.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedField {
    pub response_key: String,
    pub field_name: String,
    /// Where the first occurrence of this response key was written.
    pub location: SourceLocation,
    /// Every declared argument, supplied or defaulted.
    pub arguments: IndexMap<String, Value>,
    /// Present for fields of object type (or lists of them).
    pub selection_set: Option<SelectionSet>,
    pub field_type: GqlType,
}
impl SelectedField {
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }
}

/// Everything needed to turn document selection sets into
/// [`SelectionSet`]s for one operation.
#[derive(Clone, Copy, Debug)]
pub struct SelectionScope<'a> {
    pub schema: &'a Schema,
    pub document: &'a ast::Document,
    /// The document's source text, for error locations.
    pub source: &'a str,
    pub variables: &'a Variables,
}

/// Builds the merged selection set of `selection_set` as selected on the
/// object type `parent_type`.
///
/// Fields sharing a response key are merged: the first occurrence supplies
/// the arguments and location, and the sub-selections of all occurrences
/// are combined. Fragments apply only when their type condition is
/// `parent_type`. Argument coercion failures are returned alongside the
/// (partial) result; the operation should not run when there are any.
pub fn build_selection_set(
    scope: &SelectionScope<'_>,
    parent_type: GqlType,
    selection_set: &ast::SelectionSet,
) -> (SelectionSet, Vec<GraphQLError>) {
    let mut builder = SelectionSetBuilder {
        scope: *scope,
        errors: vec![],
    };
    let built = builder.build(parent_type, &[selection_set]);
    (built, builder.errors)
}

struct SelectionSetBuilder<'a> {
    scope: SelectionScope<'a>,
    errors: Vec<GraphQLError>,
}
impl<'a> SelectionSetBuilder<'a> {
    fn build(&mut self, parent_type: GqlType, selection_sets: &[&'a ast::SelectionSet]) -> SelectionSet {
        let schema = self.scope.schema;
        let mut grouped: IndexMap<&'a str, Vec<&'a ast::Field>> = IndexMap::new();
        let mut visited_fragments = HashSet::new();
        for selection_set in selection_sets {
            self.collect_fields(parent_type, selection_set, &mut grouped, &mut visited_fragments);
        }

        let mut fields = Vec::with_capacity(grouped.len());
        for (response_key, occurrences) in grouped {
            let first = occurrences[0];
            let Some(definition) = schema.field(parent_type, first.name.as_str()) else {
                log::trace!(
                    "dropping unknown field `{}` on `{}`",
                    first.name.as_str(),
                    schema.type_name(parent_type),
                );
                continue;
            };

            let arguments = match coercion::coerce_argument_values(
                schema,
                &definition.args,
                &first.arguments,
                Some(self.scope.variables),
                first.pos,
            ) {
                Ok(arguments) => arguments,
                Err(errors) => {
                    self.push_coercion_errors(errors, first.pos);
                    IndexMap::new()
                },
            };

            let sub_selections: Vec<&'a ast::SelectionSet> = occurrences
                .iter()
                .filter_map(|field| field.selection_set.as_ref())
                .collect();
            let selection_set = schema.is_composite(definition.ty).then(|| {
                self.build(schema.innermost_type(definition.ty), &sub_selections)
            });

            fields.push(SelectedField {
                response_key: response_key.to_string(),
                field_name: first.name.as_str().to_string(),
                location: SourceLocation::from_pos(self.scope.source, first.pos),
                arguments,
                selection_set,
                field_type: definition.ty,
            });
        }

        SelectionSet { fields }
    }

    fn collect_fields(
        &mut self,
        parent_type: GqlType,
        selection_set: &'a ast::SelectionSet,
        grouped: &mut IndexMap<&'a str, Vec<&'a ast::Field>>,
        visited_fragments: &mut HashSet<&'a str>,
    ) {
        let schema = self.scope.schema;
        for selection in &selection_set.selections {
            if !self.should_include(selection.directives(), selection.pos()) {
                continue;
            }
            match selection {
                ast::Selection::Field(field) => {
                    grouped.entry(field.response_key()).or_default().push(field);
                },
                ast::Selection::FragmentSpread(spread) => {
                    let name = spread.name.as_str();
                    if !visited_fragments.insert(name) {
                        continue;
                    }
                    let Some(fragment) = self.scope.document.fragment(name) else {
                        continue;
                    };
                    if schema.type_by_name(fragment.type_condition.as_str()) != Some(parent_type.to_nullable()) {
                        continue;
                    }
                    self.collect_fields(parent_type, &fragment.selection_set, grouped, visited_fragments);
                },
                ast::Selection::InlineFragment(inline) => {
                    if let Some(condition) = &inline.type_condition
                        && schema.type_by_name(condition.as_str()) != Some(parent_type.to_nullable())
                    {
                        continue;
                    }
                    self.collect_fields(parent_type, &inline.selection_set, grouped, visited_fragments);
                },
            }
        }
    }

    /// Applies `@skip(if:)` and `@include(if:)`.
    fn should_include(&mut self, directives: &[ast::DirectiveAnnotation], pos: Pos) -> bool {
        let schema = self.scope.schema;
        for annotation in directives {
            let name = annotation.name.as_str();
            let Some(definition) = schema.directive(name).filter(|_| name == "skip" || name == "include")
            else {
                continue;
            };
            let condition = match coercion::coerce_argument_values(
                schema,
                &definition.args,
                &annotation.arguments,
                Some(self.scope.variables),
                annotation.pos,
            ) {
                Ok(arguments) => arguments.get("if").and_then(Value::as_bool),
                Err(errors) => {
                    self.push_coercion_errors(errors, pos);
                    None
                },
            };
            match (name, condition) {
                ("skip", Some(true)) | ("include", Some(false)) => return false,
                _ => {},
            }
        }
        true
    }

    fn push_coercion_errors(&mut self, errors: Vec<CoercionError>, fallback: Pos) {
        let source = self.scope.source;
        self.errors.extend(errors.into_iter().map(|err| {
            let pos = if err.pos == Pos::default() { fallback } else { err.pos };
            GraphQLError::new(err.to_string())
                .with_locations(vec![SourceLocation::from_pos(source, pos)])
        }));
    }
}
