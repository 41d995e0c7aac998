use crate::ast;
use crate::coercion;
use crate::file_reader;
use crate::loc;
use crate::schema::MetaFields;
use crate::schema::Schema;
use crate::schema::TypeValidationError;
use crate::schema::builtins;
use crate::types::BuiltinScalar;
use crate::types::DEFAULT_DEPRECATION_REASON;
use crate::types::DeprecationState;
use crate::types::DirectiveDefinition;
use crate::types::DirectiveLocation;
use crate::types::EnumType;
use crate::types::EnumValue;
use crate::types::GqlType;
use crate::types::InputObjectType;
use crate::types::InputValueDefinition;
use crate::types::NamedType;
use crate::types::ObjectType;
use crate::types::ObjectTypeField;
use crate::types::ScalarType;
use crate::types::TypeRegistry;
use crate::value::Value;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

type Result<T> = std::result::Result<T, SchemaBuildError>;

#[derive(Debug)]
struct LoadedDocument {
    file_path: Option<PathBuf>,
    content: String,
    document: ast::Document,
    /// Set for the introspection document, whose names may start with `__`.
    builtin: bool,
}
impl LoadedDocument {
    fn position(&self, pos: libgql_parser::Pos) -> loc::FilePosition {
        loc::FilePosition::from_pos(self.file_path.as_deref(), &self.content, pos)
    }
}

/// Utility for building a [`Schema`] from one or more SDL documents.
///
/// ```
/// use libgql_core::schema::SchemaBuilder;
///
/// let schema = SchemaBuilder::new()
///     .load_str(None, "type Query { hero: Character }")
///     .unwrap()
///     .load_str(None, "type Character { name: String! }")
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert!(schema.get_type("Character").is_some());
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    documents: Vec<LoadedDocument>,
}
impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `SchemaBuilder::new().load_str(file_path, content)`.
    pub fn from_str(file_path: Option<&Path>, content: &str) -> Result<Self> {
        Self::new().load_str(file_path, content)
    }

    pub fn load_file(self, file_path: impl AsRef<Path>) -> Result<Self> {
        self.load_files(vec![file_path])
    }

    pub fn load_files<P: AsRef<Path>>(
        mut self,
        file_paths: impl IntoIterator<Item = P>,
    ) -> Result<Self> {
        for file_path in file_paths {
            let file_path = file_path.as_ref();
            let content = file_reader::read_content(file_path)
                .map_err(|err| SchemaBuildError::SchemaFileReadError(Box::new(err)))?;
            self = self.load_str(Some(file_path), content.as_str())?;
        }
        Ok(self)
    }

    /// Parses `content` and queues its type definitions for [`build()`].
    ///
    /// Operations and fragments are rejected: a schema document may only
    /// hold `scalar`, `type`, `enum`, and `input` definitions.
    ///
    /// [`build()`]: Self::build
    pub fn load_str(mut self, file_path: Option<&Path>, content: &str) -> Result<Self> {
        let document = parse_schema_document(file_path, content)?;
        let loaded = LoadedDocument {
            file_path: file_path.map(Path::to_path_buf),
            content: content.to_string(),
            document,
            builtin: false,
        };

        if let Some(def) = loaded.document.definitions.iter().find(|def| def.is_executable()) {
            return Err(SchemaBuildError::NonSchemaDefinition {
                location: loaded.position(def.pos()),
            });
        }

        log::trace!(
            "loaded {} schema definition(s) from {}",
            loaded.document.definitions.len(),
            file_path.map_or_else(|| "<input>".to_string(), |p| p.display().to_string()),
        );
        self.documents.push(loaded);
        Ok(self)
    }

    pub fn build(self) -> Result<Schema> {
        if self.documents.iter().all(|doc| doc.document.definitions.is_empty()) {
            return Err(SchemaBuildError::EmptyDocument);
        }

        let introspection = LoadedDocument {
            file_path: None,
            content: builtins::INTROSPECTION_SDL.to_string(),
            document: parse_schema_document(None, builtins::INTROSPECTION_SDL)?,
            builtin: true,
        };
        let mut documents = vec![introspection];
        documents.extend(self.documents);

        let mut visitor = TypeDefVisitor::new();
        for doc in &documents {
            for type_def in doc.document.type_definitions() {
                visitor.register(doc, type_def)?;
            }
        }

        let query_type = match visitor.types.get("Query") {
            Some(NamedType::Object(_)) => visitor.registry.named("Query"),
            _ => return Err(SchemaBuildError::NoQueryTypeDefined),
        };

        for doc in &documents {
            for type_def in doc.document.type_definitions() {
                visitor.resolve(doc, type_def);
            }
        }

        let TypeDefVisitor {
            registry,
            types,
            directives,
            pending_defaults,
            mut errors,
            ..
        } = visitor;

        let root_if_object = |name: &str| match types.get(name) {
            Some(NamedType::Object(_)) => registry.lookup_named(name),
            _ => None,
        };
        let mutation_type = root_if_object("Mutation");
        let subscription_type = root_if_object("Subscription");
        let meta_fields = meta_fields(&registry);

        let mut schema = Schema {
            registry,
            types,
            directives,
            query_type,
            mutation_type,
            subscription_type,
            meta_fields,
        };

        apply_pending_defaults(&mut schema, pending_defaults, &mut errors);
        errors.extend(find_circular_input_chains(&schema));

        if !errors.is_empty() {
            log::debug!("schema build failed with {} type error(s)", errors.len());
            return Err(SchemaBuildError::TypeValidationErrors { errors });
        }

        log::debug!(
            "built schema with {} types ({} user-defined)",
            schema.types.len(),
            schema
                .types()
                .filter(|t| !t.is_introspection_type() && t.builtin_scalar().is_none())
                .count(),
        );
        Ok(schema)
    }
}

fn parse_schema_document(file_path: Option<&Path>, content: &str) -> Result<ast::Document> {
    let result = libgql_parser::parse(content);
    if result.has_errors() {
        return Err(SchemaBuildError::ParseError {
            file: file_path.map(Path::to_path_buf),
            message: result.format_errors(content, file_path),
            errors: result.errors,
        });
    }
    result.into_valid_ast().ok_or_else(|| SchemaBuildError::ParseError {
        file: file_path.map(Path::to_path_buf),
        message: "the schema document could not be parsed".to_string(),
        errors: vec![],
    })
}

// =============================================================================
// Definition visiting
// =============================================================================

#[derive(Debug)]
enum DefaultOwner {
    InputField {
        type_name: String,
        field_name: String,
    },
    Argument {
        type_name: String,
        field_name: String,
        arg_name: String,
    },
}
impl std::fmt::Display for DefaultOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputField { type_name, field_name } => write!(f, "{type_name}.{field_name}"),
            Self::Argument { type_name, field_name, arg_name } => {
                write!(f, "{type_name}.{field_name}({arg_name}:)")
            },
        }
    }
}

/// A default value literal waiting to be coerced once every type exists.
#[derive(Debug)]
struct PendingDefault {
    owner: DefaultOwner,
    ty: GqlType,
    literal: ast::InputValue,
    location: loc::FilePosition,
}

struct TypeDefVisitor {
    registry: TypeRegistry,
    types: IndexMap<String, NamedType>,
    type_locations: HashMap<String, loc::SchemaDefLocation>,
    directives: IndexMap<String, DirectiveDefinition>,
    pending_defaults: Vec<PendingDefault>,
    errors: Vec<TypeValidationError>,
}
impl TypeDefVisitor {
    fn new() -> Self {
        let registry = TypeRegistry::new();
        let mut types = IndexMap::new();
        let mut type_locations = HashMap::new();
        for scalar in BuiltinScalar::ALL {
            registry.named(scalar.name());
            types.insert(
                scalar.name().to_string(),
                NamedType::Scalar(ScalarType {
                    name: scalar.name().to_string(),
                    description: Some(builtins::builtin_scalar_description(scalar).to_string()),
                    builtin: Some(scalar),
                }),
            );
            type_locations.insert(scalar.name().to_string(), loc::SchemaDefLocation::GraphQLBuiltIn);
        }
        let directives = builtins::builtin_directives(&registry);

        Self {
            registry,
            types,
            type_locations,
            directives,
            pending_defaults: vec![],
            errors: vec![],
        }
    }

    /// First pass: claims the name of `type_def` with an empty placeholder.
    fn register(&mut self, doc: &LoadedDocument, type_def: &ast::TypeDefinition) -> Result<()> {
        let name = type_def.name();
        let location = if doc.builtin {
            loc::SchemaDefLocation::GraphQLBuiltIn
        } else {
            loc::SchemaDefLocation::Schema(doc.position(name.pos))
        };

        if name.is_reserved() && !doc.builtin {
            return Err(SchemaBuildError::InvalidDunderPrefixedTypeName {
                type_name: name.value.clone(),
                def_location: location,
            });
        }
        if BuiltinScalar::from_name(name.as_str()).is_some() {
            return Err(SchemaBuildError::BuiltinTypeRedefinition {
                type_name: name.value.clone(),
                def_location: location,
            });
        }
        if let Some(existing) = self.type_locations.get(name.as_str()) {
            return Err(SchemaBuildError::DuplicateTypeDefinition {
                type_name: name.value.clone(),
                def1: existing.clone(),
                def2: location,
            });
        }

        let description = type_def.description().map(str::to_string);
        let name_str = name.value.clone();
        let placeholder = match type_def {
            ast::TypeDefinition::Scalar(_) => NamedType::Scalar(ScalarType {
                name: name_str.clone(),
                description,
                builtin: None,
            }),
            ast::TypeDefinition::Object(_) => NamedType::Object(ObjectType {
                name: name_str.clone(),
                description,
                fields: IndexMap::new(),
            }),
            ast::TypeDefinition::Enum(_) => NamedType::Enum(EnumType {
                name: name_str.clone(),
                description,
                values: IndexMap::new(),
            }),
            ast::TypeDefinition::InputObject(_) => NamedType::InputObject(InputObjectType {
                name: name_str.clone(),
                description,
                fields: IndexMap::new(),
            }),
        };

        self.registry.named(&name_str);
        self.types.insert(name_str.clone(), placeholder);
        self.type_locations.insert(name_str, location);
        Ok(())
    }

    /// Second pass: fills in fields, arguments, and values now that every
    /// type name is known.
    fn resolve(&mut self, doc: &LoadedDocument, type_def: &ast::TypeDefinition) {
        let type_name = type_def.name().value.clone();
        let resolved = match type_def {
            ast::TypeDefinition::Scalar(def) => {
                self.check_directives(doc, &def.directives, DirectiveLocation::Scalar);
                return;
            },
            ast::TypeDefinition::Object(def) => {
                self.check_directives(doc, &def.directives, DirectiveLocation::Object);
                if def.fields.is_empty() {
                    self.push_empty_error(doc, &def.name, "field");
                }
                let fields = self.resolve_object_fields(doc, &type_name, &def.fields);
                NamedType::Object(ObjectType {
                    name: type_name.clone(),
                    description: def.description.clone(),
                    fields,
                })
            },
            ast::TypeDefinition::Enum(def) => {
                self.check_directives(doc, &def.directives, DirectiveLocation::Enum);
                if def.values.is_empty() {
                    self.push_empty_error(doc, &def.name, "value");
                }
                let values = self.resolve_enum_values(doc, &type_name, &def.values);
                NamedType::Enum(EnumType {
                    name: type_name.clone(),
                    description: def.description.clone(),
                    values,
                })
            },
            ast::TypeDefinition::InputObject(def) => {
                self.check_directives(doc, &def.directives, DirectiveLocation::InputObject);
                if def.fields.is_empty() {
                    self.push_empty_error(doc, &def.name, "input field");
                }
                let fields = self.resolve_input_fields(doc, &type_name, &def.fields);
                NamedType::InputObject(InputObjectType {
                    name: type_name.clone(),
                    description: def.description.clone(),
                    fields,
                })
            },
        };
        self.types.insert(type_name, resolved);
    }

    fn push_empty_error(&mut self, doc: &LoadedDocument, name: &ast::Name, member_kind: &'static str) {
        self.errors.push(TypeValidationError::EmptyTypeDefinition {
            type_name: name.value.clone(),
            member_kind,
            location: doc.position(name.pos),
        });
    }

    fn check_dunder_name(&mut self, doc: &LoadedDocument, type_name: &str, name: &ast::Name) -> bool {
        if name.is_reserved() && !doc.builtin {
            self.errors.push(TypeValidationError::InvalidDunderPrefixedName {
                name: name.value.clone(),
                type_name: type_name.to_string(),
                location: doc.position(name.pos),
            });
            return false;
        }
        true
    }

    fn resolve_type_ref(&mut self, doc: &LoadedDocument, type_ref: &ast::TypeRef) -> Option<GqlType> {
        match type_ref {
            ast::TypeRef::Named(name) => {
                if !self.types.contains_key(name.as_str()) {
                    self.errors.push(TypeValidationError::UndefinedTypeName {
                        ref_location: doc.position(name.pos),
                        undefined_type_name: name.value.clone(),
                    });
                    return None;
                }
                self.registry.lookup_named(name.as_str())
            },
            ast::TypeRef::List(inner, _) => {
                let element = self.resolve_type_ref(doc, inner)?;
                Some(self.registry.list_of(element))
            },
            ast::TypeRef::NonNull(inner, _) => {
                Some(self.resolve_type_ref(doc, inner)?.to_non_null())
            },
        }
    }

    fn resolve_object_fields(
        &mut self,
        doc: &LoadedDocument,
        type_name: &str,
        field_defs: &[ast::FieldDefinition],
    ) -> IndexMap<String, ObjectTypeField> {
        let mut fields = IndexMap::new();
        let mut field_locations: HashMap<&str, loc::FilePosition> = HashMap::new();

        for field_def in field_defs {
            let field_name = field_def.name.as_str();
            let location = doc.position(field_def.name.pos);
            if !self.check_dunder_name(doc, type_name, &field_def.name) {
                continue;
            }
            if let Some(def1) = field_locations.get(field_name) {
                self.errors.push(TypeValidationError::DuplicateFieldName {
                    type_name: type_name.to_string(),
                    field_name: field_name.to_string(),
                    def1: def1.clone(),
                    def2: location,
                });
                continue;
            }
            field_locations.insert(field_name, location.clone());

            let deprecation = self.check_directives(
                doc,
                &field_def.directives,
                DirectiveLocation::FieldDefinition,
            );
            let args = self.resolve_arguments(doc, type_name, field_name, &field_def.arguments);
            let Some(ty) = self.resolve_type_ref(doc, &field_def.field_type) else {
                continue;
            };
            let innermost = field_def.field_type.innermost_name();
            if let Some(NamedType::InputObject(_)) = self.types.get(innermost.as_str()) {
                self.errors.push(TypeValidationError::InputTypeUsedAsOutput {
                    def_location: location,
                    field_name: field_name.to_string(),
                    input_type_name: innermost.value.clone(),
                    parent_type_name: type_name.to_string(),
                });
                continue;
            }

            fields.insert(
                field_name.to_string(),
                ObjectTypeField {
                    name: field_name.to_string(),
                    ty,
                    args,
                    deprecation,
                    description: field_def.description.clone(),
                },
            );
        }
        fields
    }

    fn resolve_arguments(
        &mut self,
        doc: &LoadedDocument,
        type_name: &str,
        field_name: &str,
        arg_defs: &[ast::InputValueDefinition],
    ) -> IndexMap<String, InputValueDefinition> {
        let mut args = IndexMap::new();
        let mut arg_locations: HashMap<&str, loc::FilePosition> = HashMap::new();

        for arg_def in arg_defs {
            let arg_name = arg_def.name.as_str();
            let location = doc.position(arg_def.name.pos);
            if !self.check_dunder_name(doc, type_name, &arg_def.name) {
                continue;
            }
            if let Some(def1) = arg_locations.get(arg_name) {
                self.errors.push(TypeValidationError::DuplicateArgumentName {
                    type_name: type_name.to_string(),
                    field_name: field_name.to_string(),
                    argument_name: arg_name.to_string(),
                    def1: def1.clone(),
                    def2: location,
                });
                continue;
            }
            arg_locations.insert(arg_name, location.clone());

            let owner = DefaultOwner::Argument {
                type_name: type_name.to_string(),
                field_name: field_name.to_string(),
                arg_name: arg_name.to_string(),
            };
            if let Some(definition) = self.resolve_input_value(doc, owner, arg_def, location) {
                args.insert(arg_name.to_string(), definition);
            }
        }
        args
    }

    fn resolve_input_fields(
        &mut self,
        doc: &LoadedDocument,
        type_name: &str,
        field_defs: &[ast::InputValueDefinition],
    ) -> IndexMap<String, InputValueDefinition> {
        let mut fields = IndexMap::new();
        let mut field_locations: HashMap<&str, loc::FilePosition> = HashMap::new();

        for field_def in field_defs {
            let field_name = field_def.name.as_str();
            let location = doc.position(field_def.name.pos);
            if !self.check_dunder_name(doc, type_name, &field_def.name) {
                continue;
            }
            if let Some(def1) = field_locations.get(field_name) {
                self.errors.push(TypeValidationError::DuplicateFieldName {
                    type_name: type_name.to_string(),
                    field_name: field_name.to_string(),
                    def1: def1.clone(),
                    def2: location,
                });
                continue;
            }
            field_locations.insert(field_name, location.clone());

            let owner = DefaultOwner::InputField {
                type_name: type_name.to_string(),
                field_name: field_name.to_string(),
            };
            if let Some(definition) = self.resolve_input_value(doc, owner, field_def, location) {
                fields.insert(field_name.to_string(), definition);
            }
        }
        fields
    }

    /// Shared by arguments and input fields.
    fn resolve_input_value(
        &mut self,
        doc: &LoadedDocument,
        owner: DefaultOwner,
        def: &ast::InputValueDefinition,
        location: loc::FilePosition,
    ) -> Option<InputValueDefinition> {
        let directive_location = match owner {
            DefaultOwner::Argument { .. } => DirectiveLocation::ArgumentDefinition,
            DefaultOwner::InputField { .. } => DirectiveLocation::InputFieldDefinition,
        };
        self.check_directives(doc, &def.directives, directive_location);

        let ty = self.resolve_type_ref(doc, &def.value_type)?;
        let innermost = def.value_type.innermost_name();
        if let Some(NamedType::Object(_)) = self.types.get(innermost.as_str()) {
            self.errors.push(TypeValidationError::OutputTypeUsedAsInput {
                def_location: location,
                owner: owner.to_string(),
                output_type_name: innermost.value.clone(),
            });
            return None;
        }

        let mut definition = InputValueDefinition::new(def.name.value.clone(), ty)
            .with_description(def.description.clone());
        if let Some(literal) = &def.default_value {
            // Replaced by the coerced default once every type is resolved.
            definition = definition.with_default(Value::null(ty));
            self.pending_defaults.push(PendingDefault {
                owner,
                ty,
                literal: literal.clone(),
                location,
            });
        }
        Some(definition)
    }

    fn resolve_enum_values(
        &mut self,
        doc: &LoadedDocument,
        enum_name: &str,
        value_defs: &[ast::EnumValueDefinition],
    ) -> IndexMap<String, EnumValue> {
        let mut values = IndexMap::new();
        let mut value_locations: HashMap<&str, loc::FilePosition> = HashMap::new();

        for value_def in value_defs {
            let value_name = value_def.name.as_str();
            let location = doc.position(value_def.name.pos);
            if !self.check_dunder_name(doc, enum_name, &value_def.name) {
                continue;
            }
            if let Some(def1) = value_locations.get(value_name) {
                self.errors.push(TypeValidationError::DuplicateEnumValueName {
                    enum_name: enum_name.to_string(),
                    value_name: value_name.to_string(),
                    def1: def1.clone(),
                    def2: location,
                });
                continue;
            }
            value_locations.insert(value_name, location);

            let deprecation =
                self.check_directives(doc, &value_def.directives, DirectiveLocation::EnumValue);
            values.insert(
                value_name.to_string(),
                EnumValue {
                    name: value_name.to_string(),
                    description: value_def.description.clone(),
                    deprecation,
                },
            );
        }
        values
    }

    /// Checks the directives applied to a definition and reports the
    /// deprecation state they declare.
    fn check_directives(
        &mut self,
        doc: &LoadedDocument,
        directives: &[ast::DirectiveAnnotation],
        directive_location: DirectiveLocation,
    ) -> DeprecationState {
        let mut deprecation = DeprecationState::NotDeprecated;
        let mut seen = HashSet::new();

        for directive in directives {
            let name = directive.name.as_str();
            let location = doc.position(directive.pos);
            let Some(definition) = self.directives.get(name) else {
                self.errors.push(TypeValidationError::UnknownDirective {
                    directive_name: name.to_string(),
                    location,
                });
                continue;
            };
            if !definition.is_valid_at(directive_location) {
                self.errors.push(TypeValidationError::MisplacedDirective {
                    directive_name: name.to_string(),
                    directive_location,
                    location,
                });
                continue;
            }
            if !seen.insert(name) {
                self.errors.push(TypeValidationError::DuplicateDirective {
                    directive_name: name.to_string(),
                    location,
                });
                continue;
            }
            if name == "deprecated" {
                deprecation = self.deprecation_from_directive(directive, location);
            }
        }
        deprecation
    }

    fn deprecation_from_directive(
        &mut self,
        directive: &ast::DirectiveAnnotation,
        location: loc::FilePosition,
    ) -> DeprecationState {
        let mut reason = Some(DEFAULT_DEPRECATION_REASON.to_string());
        for arg in &directive.arguments {
            match (arg.name.as_str(), &arg.value.kind) {
                ("reason", ast::InputValueKind::Scalar(ast::ScalarKind::String, text)) => {
                    reason = Some(text.clone());
                },
                ("reason", ast::InputValueKind::Null) => reason = None,
                ("reason", _) => self.errors.push(TypeValidationError::InvalidDirectiveArgument {
                    directive_name: "deprecated".to_string(),
                    message: format!("`reason` must be a string, found `{}`", arg.value),
                    location: location.clone(),
                }),
                (other, _) => self.errors.push(TypeValidationError::InvalidDirectiveArgument {
                    directive_name: "deprecated".to_string(),
                    message: format!("unknown argument `{other}`"),
                    location: location.clone(),
                }),
            }
        }
        DeprecationState::Deprecated(reason)
    }
}

fn meta_fields(registry: &TypeRegistry) -> MetaFields {
    let meta_field = |name: &str, ty: GqlType, description: &str| ObjectTypeField {
        name: name.to_string(),
        ty,
        args: IndexMap::new(),
        deprecation: DeprecationState::NotDeprecated,
        description: Some(description.to_string()),
    };
    let string = registry.named(BuiltinScalar::String.name());

    let mut type_ = meta_field(
        "__type",
        registry.named("__Type"),
        "Request the type information of a single type.",
    );
    type_.args.insert(
        "name".to_string(),
        InputValueDefinition::new("name", string.to_non_null()),
    );

    MetaFields {
        typename: meta_field(
            "__typename",
            string.to_non_null(),
            "The name of the current Object type at runtime.",
        ),
        schema: meta_field(
            "__schema",
            registry.named("__Schema").to_non_null(),
            "Access the current type schema of this server.",
        ),
        type_,
    }
}

// =============================================================================
// Post-resolution passes
// =============================================================================

/// Coerces every default literal against its declared type.
///
/// Input-object field defaults go first, ordered so that a type's defaults
/// are final before any type that embeds it is processed. Argument defaults
/// can then pick up fully defaulted input objects.
fn apply_pending_defaults(
    schema: &mut Schema,
    pending: Vec<PendingDefault>,
    errors: &mut Vec<TypeValidationError>,
) {
    let order = input_object_dependency_order(schema);
    let rank: HashMap<&str, usize> = order
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.as_str(), idx))
        .collect();

    let (mut input_field_defaults, argument_defaults): (Vec<_>, Vec<_>) = pending
        .into_iter()
        .partition(|p| matches!(p.owner, DefaultOwner::InputField { .. }));
    input_field_defaults.sort_by_key(|p| match &p.owner {
        DefaultOwner::InputField { type_name, .. } => {
            rank.get(type_name.as_str()).copied().unwrap_or(usize::MAX)
        },
        DefaultOwner::Argument { .. } => usize::MAX,
    });

    for pending in input_field_defaults.into_iter().chain(argument_defaults) {
        let coerced = coercion::coerce_input_value(schema, pending.ty, &pending.literal, None);
        let value = match coerced {
            Ok(value) => value,
            Err(coercion_errors) => {
                errors.push(TypeValidationError::InvalidDefaultValue {
                    owner: pending.owner.to_string(),
                    location: pending.location,
                    errors: coercion_errors.iter().map(ToString::to_string).collect(),
                });
                continue;
            },
        };

        let slot = match &pending.owner {
            DefaultOwner::InputField { type_name, field_name } => match schema.types.get_mut(type_name) {
                Some(NamedType::InputObject(input)) => input.fields.get_mut(field_name),
                _ => None,
            },
            DefaultOwner::Argument { type_name, field_name, arg_name } => match schema.types.get_mut(type_name) {
                Some(NamedType::Object(object)) => object
                    .fields
                    .get_mut(field_name)
                    .and_then(|field| field.args.get_mut(arg_name)),
                _ => None,
            },
        };
        if let Some(definition) = slot {
            definition.default_value = value;
        }
    }
}

/// Input object names in post-order over the "has a field of type" graph.
fn input_object_dependency_order(schema: &Schema) -> Vec<String> {
    fn visit<'a>(
        schema: &'a Schema,
        input: &'a InputObjectType,
        visited: &mut HashSet<&'a str>,
        order: &mut Vec<String>,
    ) {
        if !visited.insert(input.name.as_str()) {
            return;
        }
        for field in input.fields.values() {
            if let Some(nested) = schema.input_object_type(field.ty) {
                visit(schema, nested, visited, order);
            }
        }
        order.push(input.name.clone());
    }

    let mut visited = HashSet::new();
    let mut order = vec![];
    for named in schema.types.values() {
        if let NamedType::InputObject(input) = named {
            visit(schema, input, &mut visited, &mut order);
        }
    }
    order
}

/// Finds input objects that can never be supplied because a chain of
/// non-null, non-list fields leads back to the starting type.
fn find_circular_input_chains(schema: &Schema) -> Vec<TypeValidationError> {
    fn walk<'a>(
        schema: &'a Schema,
        start: &'a str,
        input: &'a InputObjectType,
        path: &mut Vec<String>,
        on_path: &mut HashSet<&'a str>,
        found: &mut Vec<Vec<String>>,
    ) {
        for field in input.fields.values() {
            if field.ty.is_nullable() || schema.is_list(field.ty) {
                continue;
            }
            let Some(nested) = schema.input_object_type(field.ty) else {
                continue;
            };
            path.push(format!("{}.{}", input.name, field.name));
            if nested.name == start {
                let mut cycle = path.clone();
                cycle.push(start.to_string());
                found.push(cycle);
            } else if on_path.insert(nested.name.as_str()) {
                walk(schema, start, nested, path, on_path, found);
                on_path.remove(nested.name.as_str());
            }
            path.pop();
        }
    }

    let mut reported: HashSet<Vec<String>> = HashSet::new();
    let mut errors = vec![];
    for named in schema.types.values() {
        let NamedType::InputObject(input) = named else {
            continue;
        };
        let mut found = vec![];
        let mut on_path = HashSet::from([input.name.as_str()]);
        walk(schema, &input.name, input, &mut vec![], &mut on_path, &mut found);
        for cycle in found {
            // Each rotation of the same cycle is reported only once.
            let mut members: Vec<String> = cycle[..cycle.len() - 1].to_vec();
            members.sort();
            if reported.insert(members) {
                errors.push(TypeValidationError::CircularInputFieldChain {
                    circular_field_path: cycle,
                });
            }
        }
    }
    errors
}

#[derive(Debug, Error, PartialEq)]
pub enum SchemaBuildError {
    #[error("Attempted to redefine the builtin `{type_name}` type")]
    BuiltinTypeRedefinition {
        type_name: String,
        def_location: loc::SchemaDefLocation,
    },

    #[error("Multiple GraphQL types named `{type_name}` were defined ({def1} and {def2})")]
    DuplicateTypeDefinition {
        type_name: String,
        def1: loc::SchemaDefLocation,
        def2: loc::SchemaDefLocation,
    },

    #[error("No schema definitions were provided")]
    EmptyDocument,

    #[error("Type names must not start with `__`: `{type_name}`")]
    InvalidDunderPrefixedTypeName {
        type_name: String,
        def_location: loc::SchemaDefLocation,
    },

    #[error("Attempted to build a schema that has no `Query` object type defined")]
    NoQueryTypeDefined,

    #[error("Schema documents may only contain type definitions, found an operation or fragment at {location}")]
    NonSchemaDefinition {
        location: loc::FilePosition,
    },

    #[error("Error parsing schema:\n{message}")]
    ParseError {
        file: Option<PathBuf>,
        message: String,
        errors: Vec<libgql_parser::ParseError>,
    },

    #[error("Failure while trying to read a schema file from disk")]
    SchemaFileReadError(Box<file_reader::ReadContentError>),

    #[error(
        "Encountered the following type-validation errors while building the \
        schema:\n\n{}",
        errors.iter()
            .map(|s| format!("  * {s}"))
            .collect::<Vec<_>>()
            .join("\n"),
    )]
    TypeValidationErrors {
        errors: Vec<TypeValidationError>,
    },
}
