use crate::ast;
use crate::loc::SourceLocation;
use crate::response::ResponsePath;
use crate::schema::Schema;
use crate::types::DirectiveDefinition;
use crate::types::DirectiveLocation;
use crate::validation::ValidationError;
use crate::validation::ValidationErrorKind;
use crate::validation::fields_can_merge;
use crate::validation::operation_validator::OperationValidator;
use indexmap::IndexMap;
use indexmap::IndexSet;
use libgql_parser::Pos;
use std::collections::HashMap;
use std::collections::HashSet;

/// Checks an operation document against `schema` and returns every rule
/// violation found, in discovery order and without duplicates.
///
/// `source` is the text `document` was parsed from. It is only used to turn
/// node positions into the line/column locations errors carry.
///
/// Structural problems (type definitions, anonymous or duplicated
/// operations, duplicated fragments) and fragment cycles stop validation
/// early. Everything after that is checked per operation, and the results
/// are merged.
pub fn validate(schema: &Schema, document: &ast::Document, source: &str) -> Vec<ValidationError> {
    let mut ctx = ValidationContext::new(schema, document, source);

    check_definitions(&mut ctx);
    if ctx.has_errors() {
        return ctx.finish();
    }

    check_fragment_cycles(&mut ctx);
    if ctx.has_errors() {
        return ctx.finish();
    }

    check_fragment_definitions(&mut ctx);
    for operation in document.operations() {
        OperationValidator::new(&mut ctx, operation).validate();
    }
    check_unused_fragments(&mut ctx);

    for operation in document.operations() {
        for (kind, positions) in fields_can_merge::find_conflicts(schema, document, operation) {
            ctx.report(kind, &positions);
        }
    }

    ctx.finish()
}

pub(super) struct ValidationContext<'a> {
    pub(super) schema: &'a Schema,
    pub(super) document: &'a ast::Document,
    source: &'a str,
    /// Fragments reached from at least one operation.
    pub(super) used_fragments: HashSet<&'a str>,
    errors: IndexSet<ValidationError>,
}
impl<'a> ValidationContext<'a> {
    fn new(schema: &'a Schema, document: &'a ast::Document, source: &'a str) -> Self {
        Self {
            schema,
            document,
            source,
            used_fragments: HashSet::new(),
            errors: IndexSet::new(),
        }
    }

    pub(super) fn report(&mut self, kind: ValidationErrorKind, positions: &[Pos]) {
        self.push(kind, positions, None);
    }

    /// Reports an error concerning the field at `path`.
    pub(super) fn report_at(
        &mut self,
        kind: ValidationErrorKind,
        positions: &[Pos],
        path: &ResponsePath,
    ) {
        let path = (!path.is_empty()).then(|| path.clone());
        self.push(kind, positions, path);
    }

    fn push(&mut self, kind: ValidationErrorKind, positions: &[Pos], path: Option<ResponsePath>) {
        let locations = positions
            .iter()
            .map(|pos| SourceLocation::from_pos(self.source, *pos))
            .collect();
        self.errors.insert(ValidationError {
            kind,
            locations,
            path,
        });
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn finish(self) -> Vec<ValidationError> {
        log::debug!(
            "validated {} operation(s): {} error(s)",
            self.document.operations().count(),
            self.errors.len(),
        );
        self.errors.into_iter().collect()
    }
}

/// Reports unknown, misplaced, and repeated directives and returns the
/// annotations that passed, paired with their definitions.
pub(super) fn check_directive_placement<'a>(
    ctx: &mut ValidationContext<'a>,
    directives: &'a [ast::DirectiveAnnotation],
    location: DirectiveLocation,
) -> Vec<(&'a ast::DirectiveAnnotation, &'a DirectiveDefinition)> {
    let schema = ctx.schema;
    let mut seen: HashMap<&str, Pos> = HashMap::new();
    let mut placed = vec![];

    for annotation in directives {
        let name = annotation.name.as_str();
        let Some(definition) = schema.directive(name) else {
            ctx.report(
                ValidationErrorKind::UnknownDirective {
                    directive_name: name.to_string(),
                },
                &[annotation.pos],
            );
            continue;
        };
        if !definition.is_valid_at(location) {
            ctx.report(
                ValidationErrorKind::MisplacedDirective {
                    directive_name: name.to_string(),
                    location,
                },
                &[annotation.pos],
            );
            continue;
        }
        if let Some(first) = seen.insert(name, annotation.pos) {
            ctx.report(
                ValidationErrorKind::DuplicateDirective {
                    directive_name: name.to_string(),
                },
                &[first, annotation.pos],
            );
            continue;
        }
        placed.push((annotation, definition));
    }

    placed
}

// =============================================================================
// Document structure
// =============================================================================

fn check_definitions(ctx: &mut ValidationContext<'_>) {
    let document = ctx.document;

    for definition in &document.definitions {
        if let ast::Definition::Type(type_def) = definition {
            let definition_kind = match type_def {
                ast::TypeDefinition::Scalar(_) => "scalar",
                ast::TypeDefinition::Object(_) => "type",
                ast::TypeDefinition::Enum(_) => "enum",
                ast::TypeDefinition::InputObject(_) => "input",
            };
            ctx.report(
                ValidationErrorKind::NonExecutableDefinition {
                    definition_kind,
                    name: type_def.name().as_str().to_string(),
                },
                &[type_def.pos()],
            );
        }
    }

    let operations: Vec<&ast::OperationDefinition> = document.operations().collect();
    if operations.len() > 1 {
        for operation in operations.iter().filter(|op| op.name.is_none()) {
            ctx.report(ValidationErrorKind::AnonymousOperationNotAlone, &[operation.pos]);
        }
    }

    let mut operation_names: IndexMap<&str, Vec<Pos>> = IndexMap::new();
    for name in operations.iter().filter_map(|op| op.name.as_ref()) {
        operation_names.entry(name.as_str()).or_default().push(name.pos);
    }
    for (name, positions) in operation_names {
        if positions.len() > 1 {
            ctx.report(
                ValidationErrorKind::DuplicateOperationName {
                    operation_name: name.to_string(),
                },
                &positions,
            );
        }
    }

    let mut fragment_names: IndexMap<&str, Vec<Pos>> = IndexMap::new();
    for fragment in document.fragments() {
        fragment_names
            .entry(fragment.name.as_str())
            .or_default()
            .push(fragment.name.pos);
    }
    for (name, positions) in fragment_names {
        if positions.len() > 1 {
            ctx.report(
                ValidationErrorKind::DuplicateFragmentName {
                    fragment_name: name.to_string(),
                },
                &positions,
            );
        }
    }
}

// =============================================================================
// Fragments
// =============================================================================

fn check_fragment_cycles(ctx: &mut ValidationContext<'_>) {
    let document = ctx.document;
    let mut detector = CycleDetector {
        document,
        visited: HashSet::new(),
        spread_path: vec![],
        path_index: HashMap::new(),
        cycles: vec![],
    };
    for fragment in document.fragments() {
        detector.visit(fragment);
    }
    for (kind, positions) in detector.cycles {
        ctx.report(kind, &positions);
    }
}

struct CycleDetector<'a> {
    document: &'a ast::Document,
    visited: HashSet<&'a str>,
    /// The spreads followed from the fragment the current walk started at.
    spread_path: Vec<&'a ast::FragmentSpread>,
    /// Fragments on the current walk, by their depth in `spread_path`.
    path_index: HashMap<&'a str, usize>,
    cycles: Vec<(ValidationErrorKind, Vec<Pos>)>,
}
impl<'a> CycleDetector<'a> {
    fn visit(&mut self, fragment: &'a ast::FragmentDefinition) {
        let name = fragment.name.as_str();
        if !self.visited.insert(name) {
            return;
        }

        let mut spreads = vec![];
        collect_spreads(&fragment.selection_set, &mut spreads);
        if spreads.is_empty() {
            return;
        }

        self.path_index.insert(name, self.spread_path.len());
        for spread in spreads {
            let spread_name = spread.name.as_str();
            self.spread_path.push(spread);
            match self.path_index.get(spread_name) {
                None => {
                    if let Some(target) = self.document.fragment(spread_name) {
                        self.visit(target);
                    }
                },
                Some(&index) => {
                    let cycle = &self.spread_path[index..];
                    let via = cycle[..cycle.len() - 1]
                        .iter()
                        .map(|spread| spread.name.as_str().to_string())
                        .collect();
                    self.cycles.push((
                        ValidationErrorKind::FragmentCycle {
                            fragment_name: spread_name.to_string(),
                            via,
                        },
                        cycle.iter().map(|spread| spread.pos).collect(),
                    ));
                },
            }
            self.spread_path.pop();
        }
        self.path_index.remove(name);
    }
}

fn collect_spreads<'a>(selection_set: &'a ast::SelectionSet, spreads: &mut Vec<&'a ast::FragmentSpread>) {
    for selection in &selection_set.selections {
        match selection {
            ast::Selection::Field(field) => {
                if let Some(sub_selection) = &field.selection_set {
                    collect_spreads(sub_selection, spreads);
                }
            },
            ast::Selection::FragmentSpread(spread) => spreads.push(spread),
            ast::Selection::InlineFragment(inline) => {
                collect_spreads(&inline.selection_set, spreads);
            },
        }
    }
}

/// Checks what can be checked about a fragment without knowing where it is
/// spread: its type condition and its own directives.
fn check_fragment_definitions(ctx: &mut ValidationContext<'_>) {
    let document = ctx.document;
    let schema = ctx.schema;

    for fragment in document.fragments() {
        check_directive_placement(ctx, &fragment.directives, DirectiveLocation::FragmentDefinition);

        let condition = &fragment.type_condition;
        match schema.type_by_name(condition.as_str()) {
            None => ctx.report(
                ValidationErrorKind::UnknownFragmentType {
                    type_name: condition.as_str().to_string(),
                },
                &[condition.pos],
            ),
            Some(ty) if !schema.is_composite(ty) => ctx.report(
                ValidationErrorKind::FragmentOnNonCompositeType {
                    type_name: condition.as_str().to_string(),
                },
                &[condition.pos],
            ),
            Some(_) => {},
        }
    }
}

fn check_unused_fragments(ctx: &mut ValidationContext<'_>) {
    let document = ctx.document;
    for fragment in document.fragments() {
        if !ctx.used_fragments.contains(fragment.name.as_str()) {
            ctx.report(
                ValidationErrorKind::UnusedFragment {
                    fragment_name: fragment.name.as_str().to_string(),
                },
                &[fragment.pos],
            );
        }
    }
}
