use crate::ast;
use crate::coercion;
use crate::response::ResponsePath;
use crate::types::DirectiveLocation;
use crate::types::GqlType;
use crate::types::InputValueDefinition;
use crate::validation::ValidationErrorKind;
use crate::validation::validator::ValidationContext;
use crate::validation::validator::check_directive_placement;
use indexmap::IndexMap;
use libgql_parser::Pos;
use std::collections::HashMap;
use std::collections::HashSet;

struct DefinedVariable<'a> {
    definition: &'a ast::VariableDefinition,
    /// False when the declared type is unknown or not an input type.
    usable: bool,
}

/// Walks one operation (and every fragment it reaches) checking variables,
/// fields, arguments, directives, fragment spreads, and argument literals.
pub(super) struct OperationValidator<'c, 'a> {
    ctx: &'c mut ValidationContext<'a>,
    operation: &'a ast::OperationDefinition,
    variables: IndexMap<&'a str, DefinedVariable<'a>>,
    used_variables: HashSet<String>,
    visited_fragments: HashSet<&'a str>,
}
impl<'c, 'a> OperationValidator<'c, 'a> {
    pub(super) fn new(
        ctx: &'c mut ValidationContext<'a>,
        operation: &'a ast::OperationDefinition,
    ) -> Self {
        Self {
            ctx,
            operation,
            variables: IndexMap::new(),
            used_variables: HashSet::new(),
            visited_fragments: HashSet::new(),
        }
    }

    pub(super) fn validate(mut self) {
        let operation = self.operation;
        let schema = self.ctx.schema;
        let root_path = ResponsePath::new();

        self.check_variable_definitions();

        let (root_type, location) = match operation.operation_type {
            ast::OperationType::Query => (Some(schema.query_type()), DirectiveLocation::Query),
            ast::OperationType::Mutation => {
                if schema.mutation_type().is_none() {
                    self.ctx
                        .report(ValidationErrorKind::MutationNotSupported, &[operation.pos]);
                }
                (schema.mutation_type(), DirectiveLocation::Mutation)
            },
            ast::OperationType::Subscription => {
                self.ctx
                    .report(ValidationErrorKind::SubscriptionNotSupported, &[operation.pos]);
                (None, DirectiveLocation::Subscription)
            },
        };

        self.check_directives(&operation.directives, location, &root_path);

        // Without a root type the selection set can't be checked, and every
        // variable would look unused.
        let Some(root_type) = root_type else {
            return;
        };
        self.check_selection_set(&operation.selection_set, root_type, &root_path);
        self.check_unused_variables();
    }

    fn operation_name(&self) -> Option<String> {
        self.operation.name_str().map(str::to_string)
    }

    // =========================================================================
    // Variables
    // =========================================================================

    fn check_variable_definitions(&mut self) {
        let schema = self.ctx.schema;
        let operation = self.operation;
        let root_path = ResponsePath::new();

        for var_def in &operation.variable_definitions {
            let name = var_def.name.as_str();
            if let Some(existing) = self.variables.get(name) {
                let first = existing.definition.pos;
                self.ctx.report(
                    ValidationErrorKind::DuplicateVariableName {
                        variable_name: name.to_string(),
                    },
                    &[first, var_def.pos],
                );
                continue;
            }

            self.check_directives(&var_def.directives, DirectiveLocation::VariableDefinition, &root_path);

            let usable = match schema.type_ref_named(&var_def.var_type) {
                None => {
                    let type_name = var_def.var_type.innermost_name();
                    self.ctx.report(
                        ValidationErrorKind::UnknownVariableType {
                            variable_name: name.to_string(),
                            type_name: type_name.as_str().to_string(),
                        },
                        &[type_name.pos],
                    );
                    false
                },
                Some(named) if !schema.is_input_type(named) => {
                    self.ctx.report(
                        ValidationErrorKind::VariableNotInputType {
                            variable_name: name.to_string(),
                            type_name: var_def.var_type.to_string(),
                        },
                        &[var_def.var_type.pos()],
                    );
                    false
                },
                Some(_) => {
                    if let Some(default_value) = &var_def.default_value {
                        for err in coercion::check_variable_default(schema, &var_def.var_type, default_value) {
                            self.ctx.report(
                                ValidationErrorKind::InvalidVariableDefault {
                                    variable_name: name.to_string(),
                                    message: err.to_string(),
                                },
                                &[err.pos],
                            );
                        }
                    }
                    true
                },
            };
            self.variables.insert(name, DefinedVariable {
                definition: var_def,
                usable,
            });
        }
    }

    fn check_unused_variables(&mut self) {
        let operation_name = self.operation_name();
        let unused: Vec<&'a ast::VariableDefinition> = self
            .variables
            .values()
            .map(|defined| defined.definition)
            .filter(|definition| !self.used_variables.contains(definition.name.as_str()))
            .collect();

        for definition in unused {
            self.ctx.report(
                ValidationErrorKind::UnusedVariable {
                    variable_name: definition.name.as_str().to_string(),
                    operation_name: operation_name.clone(),
                },
                &[definition.pos],
            );
        }
    }

    fn mark_variables_used(&mut self, value: &ast::InputValue) {
        value.visit_variables(&mut |name, _| {
            self.used_variables.insert(name.to_string());
        });
    }

    /// Finds the variable references inside `value` and checks each one
    /// against the type of the position it sits in.
    fn check_variable_usages(
        &mut self,
        value: &ast::InputValue,
        location_type: GqlType,
        location_has_default: bool,
        path: &ResponsePath,
    ) {
        let schema = self.ctx.schema;
        match &value.kind {
            ast::InputValueKind::Variable(name) => {
                self.check_variable_usage(name, value.pos, location_type, location_has_default, path);
            },
            ast::InputValueKind::List(items) => match schema.list_element(location_type) {
                Some(element_type) => {
                    for item in items {
                        self.check_variable_usages(item, element_type, false, path);
                    }
                },
                None => self.mark_variables_used(value),
            },
            ast::InputValueKind::Object(fields) => {
                // A lone object in list position is coerced as its element.
                let mut object_type = location_type;
                while let Some(element_type) = schema.list_element(object_type) {
                    object_type = element_type;
                }
                let input_object = schema.input_object_type(object_type);
                for field in fields {
                    match input_object.and_then(|object| object.field(field.name.as_str())) {
                        Some(field_def) => self.check_variable_usages(
                            &field.value,
                            field_def.ty,
                            field_def.has_default(),
                            path,
                        ),
                        None => self.mark_variables_used(&field.value),
                    }
                }
            },
            ast::InputValueKind::Null | ast::InputValueKind::Scalar(..) => {},
        }
    }

    fn check_variable_usage(
        &mut self,
        name: &str,
        pos: Pos,
        location_type: GqlType,
        location_has_default: bool,
        path: &ResponsePath,
    ) {
        self.used_variables.insert(name.to_string());
        let schema = self.ctx.schema;

        let Some((definition, usable)) = self
            .variables
            .get(name)
            .map(|defined| (defined.definition, defined.usable))
        else {
            let operation_name = self.operation_name();
            let operation_pos = self.operation.pos;
            self.ctx.report_at(
                ValidationErrorKind::UndefinedVariable {
                    variable_name: name.to_string(),
                    operation_name,
                },
                &[pos, operation_pos],
                path,
            );
            return;
        };
        if !usable {
            return;
        }
        let variable_type = &definition.var_type;

        // A nullable variable may only fill a non-null position that has a
        // default of its own, and only when the variable defaults to a
        // non-null value.
        let has_non_null_default = definition
            .default_value
            .as_ref()
            .is_some_and(|default_value| !default_value.is_null());
        let effective_location = if location_type.is_non_null()
            && !variable_type.is_non_null()
            && has_non_null_default
            && location_has_default
        {
            location_type.to_nullable()
        } else {
            location_type
        };

        if !schema.is_type_ref_compatible(effective_location, variable_type) {
            self.ctx.report_at(
                ValidationErrorKind::VariableTypeMismatch {
                    variable_name: name.to_string(),
                    variable_type: variable_type.to_string(),
                    expected_type: schema.type_name(location_type),
                },
                &[definition.pos, pos],
                path,
            );
        }
    }

    // =========================================================================
    // Directives and arguments
    // =========================================================================

    fn check_directives(
        &mut self,
        directives: &'a [ast::DirectiveAnnotation],
        location: DirectiveLocation,
        path: &ResponsePath,
    ) {
        for annotation in directives {
            // Variables passed to rejected directives still count as used.
            for argument in &annotation.arguments {
                self.mark_variables_used(&argument.value);
            }
        }
        for (annotation, definition) in check_directive_placement(self.ctx, directives, location) {
            let owner = format!("@{}", definition.name);
            self.check_arguments(&definition.args, &annotation.arguments, &owner, annotation.pos, path);
        }
    }

    fn check_arguments(
        &mut self,
        definitions: &IndexMap<String, InputValueDefinition>,
        arguments: &'a [ast::Argument],
        owner: &str,
        pos: Pos,
        path: &ResponsePath,
    ) {
        let schema = self.ctx.schema;
        let mut seen: HashMap<&str, Pos> = HashMap::new();

        for argument in arguments {
            let name = argument.name.as_str();
            if let Some(first) = seen.insert(name, argument.pos()) {
                self.ctx.report_at(
                    ValidationErrorKind::DuplicateArgument {
                        argument_name: name.to_string(),
                    },
                    &[first, argument.pos()],
                    path,
                );
                continue;
            }

            let Some(definition) = definitions.get(name) else {
                self.mark_variables_used(&argument.value);
                self.ctx.report_at(
                    ValidationErrorKind::UnknownArgument {
                        argument_name: name.to_string(),
                        owner: owner.to_string(),
                    },
                    &[argument.pos()],
                    path,
                );
                continue;
            };

            self.check_variable_usages(&argument.value, definition.ty, definition.has_default(), path);
            if argument.value.as_variable().is_none() {
                for err in coercion::check_literal(schema, definition.ty, &argument.value) {
                    self.ctx.report_at(
                        ValidationErrorKind::InvalidArgumentValue {
                            argument_name: name.to_string(),
                            message: err.to_string(),
                        },
                        &[err.pos],
                        path,
                    );
                }
            }
        }

        for (name, definition) in definitions {
            if definition.is_required() && !seen.contains_key(name.as_str()) {
                self.ctx.report_at(
                    ValidationErrorKind::MissingRequiredArgument {
                        argument_name: name.clone(),
                        type_name: schema.type_name(definition.ty),
                        owner: owner.to_string(),
                    },
                    &[pos],
                    path,
                );
            }
        }
    }

    // =========================================================================
    // Selections
    // =========================================================================

    fn check_selection_set(
        &mut self,
        selection_set: &'a ast::SelectionSet,
        parent_type: GqlType,
        path: &ResponsePath,
    ) {
        for selection in &selection_set.selections {
            match selection {
                ast::Selection::Field(field) => self.check_field(field, parent_type, path),
                ast::Selection::FragmentSpread(spread) => {
                    self.check_fragment_spread(spread, parent_type, path)
                },
                ast::Selection::InlineFragment(inline) => {
                    self.check_inline_fragment(inline, parent_type, path)
                },
            }
        }
    }

    fn check_field(&mut self, field: &'a ast::Field, parent_type: GqlType, path: &ResponsePath) {
        let schema = self.ctx.schema;
        let field_path = path.with_key(field.response_key());
        let field_name = field.name.as_str();
        let parent_name = schema.type_name(parent_type.to_nullable());

        self.check_directives(&field.directives, DirectiveLocation::Field, &field_path);

        let Some(definition) = schema.field(parent_type, field_name) else {
            for argument in &field.arguments {
                self.mark_variables_used(&argument.value);
            }
            self.ctx.report_at(
                ValidationErrorKind::UnknownField {
                    field_name: field_name.to_string(),
                    type_name: parent_name,
                },
                &[field.pos],
                &field_path,
            );
            return;
        };

        let owner = format!("{parent_name}.{field_name}");
        self.check_arguments(&definition.args, &field.arguments, &owner, field.pos, &field_path);

        let field_type = definition.ty;
        let is_composite = schema.is_composite(field_type);
        match &field.selection_set {
            Some(selection_set) if !is_composite => self.ctx.report_at(
                ValidationErrorKind::UnexpectedSelectionSet {
                    field_name: field_name.to_string(),
                    type_name: schema.type_name(field_type),
                },
                &[selection_set.pos],
                &field_path,
            ),
            Some(selection_set) if !selection_set.is_empty() => {
                self.check_selection_set(selection_set, schema.innermost_type(field_type), &field_path);
            },
            _ if is_composite => self.ctx.report_at(
                ValidationErrorKind::MissingSelectionSet {
                    field_name: field_name.to_string(),
                    type_name: schema.type_name(field_type),
                },
                &[field.pos],
                &field_path,
            ),
            _ => {},
        }
    }

    fn check_fragment_spread(
        &mut self,
        spread: &'a ast::FragmentSpread,
        parent_type: GqlType,
        path: &ResponsePath,
    ) {
        let schema = self.ctx.schema;
        let document = self.ctx.document;
        self.check_directives(&spread.directives, DirectiveLocation::FragmentSpread, path);

        let Some(fragment) = document.fragment(spread.name.as_str()) else {
            self.ctx.report(
                ValidationErrorKind::UnknownFragment {
                    fragment_name: spread.name.as_str().to_string(),
                },
                &[spread.pos],
            );
            return;
        };
        let fragment_name = fragment.name.as_str();
        self.ctx.used_fragments.insert(fragment_name);

        // Unknown and non-composite conditions are reported with the
        // fragment definition.
        let Some(fragment_type) = schema
            .type_by_name(fragment.type_condition.as_str())
            .filter(|ty| schema.is_composite(*ty))
        else {
            return;
        };

        if fragment_type != parent_type.to_nullable() {
            self.ctx.report(
                ValidationErrorKind::ImpossibleFragmentSpread {
                    fragment_name: Some(fragment_name.to_string()),
                    parent_type: schema.type_name(parent_type.to_nullable()),
                    fragment_type: schema.type_name(fragment_type),
                },
                &[spread.pos],
            );
        }

        if self.visited_fragments.insert(fragment_name) {
            self.check_selection_set(&fragment.selection_set, fragment_type, path);
        }
    }

    fn check_inline_fragment(
        &mut self,
        inline: &'a ast::InlineFragment,
        parent_type: GqlType,
        path: &ResponsePath,
    ) {
        let schema = self.ctx.schema;
        self.check_directives(&inline.directives, DirectiveLocation::InlineFragment, path);

        let fragment_type = match &inline.type_condition {
            None => parent_type,
            Some(condition) => match schema.type_by_name(condition.as_str()) {
                None => {
                    self.ctx.report(
                        ValidationErrorKind::UnknownFragmentType {
                            type_name: condition.as_str().to_string(),
                        },
                        &[condition.pos],
                    );
                    return;
                },
                Some(ty) if !schema.is_composite(ty) => {
                    self.ctx.report(
                        ValidationErrorKind::FragmentOnNonCompositeType {
                            type_name: condition.as_str().to_string(),
                        },
                        &[condition.pos],
                    );
                    return;
                },
                Some(ty) => {
                    if ty != parent_type.to_nullable() {
                        self.ctx.report(
                            ValidationErrorKind::ImpossibleFragmentSpread {
                                fragment_name: None,
                                parent_type: schema.type_name(parent_type.to_nullable()),
                                fragment_type: schema.type_name(ty),
                            },
                            &[inline.pos],
                        );
                    }
                    ty
                },
            },
        };

        self.check_selection_set(&inline.selection_set, fragment_type, path);
    }
}
