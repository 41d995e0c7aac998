use crate::ast;
use crate::schema::Schema;
use crate::types::GqlType;
use crate::types::ObjectTypeField;
use crate::validation::ValidationErrorKind;
use indexmap::IndexMap;
use indexmap::IndexSet;
use libgql_parser::Pos;
use std::collections::HashMap;
use std::collections::HashSet;

/// A field selection together with the type it was selected on.
#[derive(Clone, Copy)]
struct SelectedOn<'a> {
    parent_type: GqlType,
    field: &'a ast::Field,
    definition: Option<&'a ObjectTypeField>,
}

#[derive(Clone)]
struct Conflict {
    reason: String,
    positions: Vec<Pos>,
}

type FieldsByKey<'a> = IndexMap<&'a str, Vec<SelectedOn<'a>>>;

/// Identifies one comparison: both fields (by position and the type they
/// were selected on) and whether their parents are already exclusive.
type ComparisonKey = (Pos, GqlType, Pos, GqlType, bool);

/// Finds every pair of same-keyed fields in `operation` that could not be
/// merged into one response entry.
///
/// Two fields sharing a response key must name the same field with the same
/// arguments when they may be selected on the same object, and must always
/// produce responses of the same shape (matching list and non-null
/// wrapping, the same leaf type, mergeable sub-selections).
pub(super) fn find_conflicts(
    schema: &Schema,
    document: &ast::Document,
    operation: &ast::OperationDefinition,
) -> Vec<(ValidationErrorKind, Vec<Pos>)> {
    let Some(root_type) = schema.root_type(operation.operation_type) else {
        return vec![];
    };
    if operation.operation_type == ast::OperationType::Subscription {
        return vec![];
    }
    let mut finder = ConflictFinder {
        schema,
        document,
        checked_sets: HashSet::new(),
        compared: HashMap::new(),
    };
    let mut conflicts = vec![];
    finder.check_selection_set(&operation.selection_set, root_type, &mut conflicts);
    conflicts
}

/// Fragments are expanded in place, so one fragment body is reached
/// through every spread of it. Both memos below keep each selection set
/// and each pair of fields to a single visit, which keeps nested fragment
/// chains linear instead of doubling per level.
struct ConflictFinder<'a> {
    schema: &'a Schema,
    document: &'a ast::Document,
    /// Selection sets already checked, by position and parent type.
    checked_sets: HashSet<(Pos, GqlType)>,
    compared: HashMap<ComparisonKey, Option<Conflict>>,
}
impl<'a> ConflictFinder<'a> {
    fn check_selection_set(
        &mut self,
        selection_set: &'a ast::SelectionSet,
        parent_type: GqlType,
        conflicts: &mut Vec<(ValidationErrorKind, Vec<Pos>)>,
    ) {
        if !self.checked_sets.insert((selection_set.pos, parent_type)) {
            return;
        }
        let fields = self.collect_fields(selection_set, parent_type);

        for (response_key, group) in &fields {
            for (i, first) in group.iter().enumerate() {
                for second in &group[i + 1..] {
                    if let Some(conflict) = self.find_conflict(*first, *second, false) {
                        conflicts.push((
                            ValidationErrorKind::FieldsConflict {
                                response_key: response_key.to_string(),
                                reason: conflict.reason,
                            },
                            conflict.positions,
                        ));
                    }
                }
            }
        }

        for selected in fields.values().flatten() {
            if let (Some(sub_selection), Some(definition)) =
                (&selected.field.selection_set, selected.definition)
            {
                let field_type = self.schema.innermost_type(definition.ty);
                self.check_selection_set(sub_selection, field_type, conflicts);
            }
        }
    }

    /// Gathers the fields of `selection_set` by response key, looking
    /// through fragment spreads and inline fragments.
    fn collect_fields(&self, selection_set: &'a ast::SelectionSet, parent_type: GqlType) -> FieldsByKey<'a> {
        let mut fields = FieldsByKey::new();
        let mut visited_fragments = HashSet::new();
        self.collect_fields_into(selection_set, parent_type, &mut fields, &mut visited_fragments);
        fields
    }

    fn collect_fields_into(
        &self,
        selection_set: &'a ast::SelectionSet,
        parent_type: GqlType,
        fields: &mut FieldsByKey<'a>,
        visited_fragments: &mut HashSet<&'a str>,
    ) {
        for selection in &selection_set.selections {
            match selection {
                ast::Selection::Field(field) => {
                    fields.entry(field.response_key()).or_default().push(SelectedOn {
                        parent_type,
                        field,
                        definition: self.schema.field(parent_type, field.name.as_str()),
                    });
                },
                ast::Selection::FragmentSpread(spread) => {
                    if !visited_fragments.insert(spread.name.as_str()) {
                        continue;
                    }
                    let Some(fragment) = self.document.fragment(spread.name.as_str()) else {
                        continue;
                    };
                    let Some(fragment_type) = self.schema.type_by_name(fragment.type_condition.as_str())
                    else {
                        continue;
                    };
                    self.collect_fields_into(&fragment.selection_set, fragment_type, fields, visited_fragments);
                },
                ast::Selection::InlineFragment(inline) => {
                    let fragment_type = match &inline.type_condition {
                        Some(condition) => match self.schema.type_by_name(condition.as_str()) {
                            Some(ty) => ty,
                            None => continue,
                        },
                        None => parent_type,
                    };
                    self.collect_fields_into(&inline.selection_set, fragment_type, fields, visited_fragments);
                },
            }
        }
    }

    fn find_conflict(
        &mut self,
        first: SelectedOn<'a>,
        second: SelectedOn<'a>,
        parents_exclusive: bool,
    ) -> Option<Conflict> {
        let key = (
            first.field.pos,
            first.parent_type,
            second.field.pos,
            second.parent_type,
            parents_exclusive,
        );
        if let Some(known) = self.compared.get(&key) {
            return known.clone();
        }
        let conflict = self.compare_fields(first, second, parents_exclusive);
        self.compared.insert(key, conflict.clone());
        conflict
    }

    fn compare_fields(
        &mut self,
        first: SelectedOn<'a>,
        second: SelectedOn<'a>,
        parents_exclusive: bool,
    ) -> Option<Conflict> {
        let schema = self.schema;
        let positions = vec![first.field.pos, second.field.pos];

        // Fields on two different object types can never both apply to one
        // object, so only their response shapes need to agree.
        let exclusive =
            parents_exclusive || first.parent_type.to_nullable() != second.parent_type.to_nullable();

        if !exclusive {
            let (first_name, second_name) = (first.field.name.as_str(), second.field.name.as_str());
            if first_name != second_name {
                return Some(Conflict {
                    reason: format!("`{first_name}` and `{second_name}` are different fields"),
                    positions,
                });
            }
            if !same_arguments(first.field, second.field) {
                return Some(Conflict {
                    reason: "they have differing arguments".to_string(),
                    positions,
                });
            }
        }

        let (Some(first_def), Some(second_def)) = (first.definition, second.definition) else {
            return None;
        };
        if types_conflict(schema, first_def.ty, second_def.ty) {
            return Some(Conflict {
                reason: format!(
                    "they return conflicting types `{}` and `{}`",
                    schema.type_name(first_def.ty),
                    schema.type_name(second_def.ty),
                ),
                positions,
            });
        }

        let (Some(first_sub), Some(second_sub)) =
            (&first.field.selection_set, &second.field.selection_set)
        else {
            return None;
        };
        let first_fields = self.collect_fields(first_sub, schema.innermost_type(first_def.ty));
        let second_fields = self.collect_fields(second_sub, schema.innermost_type(second_def.ty));

        // Sub-conflicts reached through several spreads of one fragment
        // repeat each other; keep one copy of each reason and position.
        let mut reasons = IndexSet::new();
        let mut all_positions: IndexSet<Pos> = positions.into_iter().collect();
        for (response_key, first_group) in &first_fields {
            let Some(second_group) = second_fields.get(response_key) else {
                continue;
            };
            for first_sub_field in first_group {
                for second_sub_field in second_group {
                    if let Some(conflict) = self.find_conflict(*first_sub_field, *second_sub_field, exclusive) {
                        reasons.insert(format!("subfields `{response_key}` conflict because {}", conflict.reason));
                        all_positions.extend(conflict.positions);
                    }
                }
            }
        }

        if reasons.is_empty() {
            return None;
        }
        Some(Conflict {
            reason: reasons.into_iter().collect::<Vec<_>>().join(" and "),
            positions: all_positions.into_iter().collect(),
        })
    }
}

fn same_arguments(first: &ast::Field, second: &ast::Field) -> bool {
    first.arguments.len() == second.arguments.len()
        && first.arguments.iter().all(|argument| {
            second
                .argument(argument.name.as_str())
                .is_some_and(|other| argument.value.is_equivalent(&other.value))
        })
}

/// Whether values of the two types could not share one response entry.
fn types_conflict(schema: &Schema, first: GqlType, second: GqlType) -> bool {
    if first.is_non_null() != second.is_non_null() {
        return true;
    }
    let (first, second) = (first.to_nullable(), second.to_nullable());
    match (schema.list_element(first), schema.list_element(second)) {
        (Some(first_element), Some(second_element)) => {
            types_conflict(schema, first_element, second_element)
        },
        (None, None) => (schema.is_leaf(first) || schema.is_leaf(second)) && first != second,
        _ => true,
    }
}
