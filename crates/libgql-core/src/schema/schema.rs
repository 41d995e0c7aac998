use crate::ast;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaBuilder;
use crate::types::BuiltinScalar;
use crate::types::DirectiveDefinition;
use crate::types::EnumType;
use crate::types::GqlType;
use crate::types::InputObjectType;
use crate::types::NamedType;
use crate::types::NamedTypeKind;
use crate::types::ObjectType;
use crate::types::ObjectTypeField;
use crate::types::TypeRegistry;
use crate::types::TypeShape;
use indexmap::IndexMap;

/// A fully checked, immutable GraphQL schema.
///
/// `Schema` is `Send + Sync` and is meant to be built once and then shared
/// by reference across every request that runs against it. The only
/// mutation it permits after [`SchemaBuilder::build()`] is the memoized
/// creation of list types through [`Schema::list_of()`]. Validation and
/// execution never call it: type references in requests resolve against
/// the types the schema already has.
#[derive(Debug)]
pub struct Schema {
    pub(crate) registry: TypeRegistry,
    pub(crate) types: IndexMap<String, NamedType>,
    pub(crate) directives: IndexMap<String, DirectiveDefinition>,
    pub(crate) query_type: GqlType,
    pub(crate) mutation_type: Option<GqlType>,
    pub(crate) subscription_type: Option<GqlType>,
    pub(crate) meta_fields: MetaFields,
}
impl Schema {
    /// Helper function that just delegates to [`SchemaBuilder::new()`].
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Builds a schema from a single in-memory SDL string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, SchemaBuildError> {
        SchemaBuilder::from_str(None, content)?.build()
    }

    // =========================================================================
    // Roots, types, and directives
    // =========================================================================

    /// The nullable handle of the `Query` root type.
    pub fn query_type(&self) -> GqlType {
        self.query_type
    }

    pub fn mutation_type(&self) -> Option<GqlType> {
        self.mutation_type
    }

    pub fn subscription_type(&self) -> Option<GqlType> {
        self.subscription_type
    }

    pub fn root_type(&self, operation_type: ast::OperationType) -> Option<GqlType> {
        match operation_type {
            ast::OperationType::Query => Some(self.query_type),
            ast::OperationType::Mutation => self.mutation_type,
            ast::OperationType::Subscription => self.subscription_type,
        }
    }

    /// Every named type, builtins and introspection types included, in
    /// definition order.
    pub fn types(&self) -> impl Iterator<Item = &NamedType> {
        self.types.values()
    }

    pub fn get_type(&self, name: &str) -> Option<&NamedType> {
        self.types.get(name)
    }

    /// The nullable handle of the named type `name`, if it is defined.
    pub fn type_by_name(&self, name: &str) -> Option<GqlType> {
        if !self.types.contains_key(name) {
            return None;
        }
        self.registry.lookup_named(name)
    }

    pub fn directives(&self) -> impl Iterator<Item = &DirectiveDefinition> {
        self.directives.values()
    }

    pub fn directive(&self, name: &str) -> Option<&DirectiveDefinition> {
        self.directives.get(name)
    }

    // =========================================================================
    // Type structure
    // =========================================================================

    /// The nullable list type with elements of type `element`.
    pub fn list_of(&self, element: GqlType) -> GqlType {
        self.registry.list_of(element)
    }

    /// For a list type (of either nullability), its element type.
    pub fn list_element(&self, ty: GqlType) -> Option<GqlType> {
        match self.registry.shape(ty)? {
            TypeShape::List(element) => Some(element),
            TypeShape::Named(_) => None,
        }
    }

    /// Strips every list wrapper from `ty` and returns the nullable handle
    /// of the named type underneath.
    pub fn innermost_type(&self, mut ty: GqlType) -> GqlType {
        while let Some(element) = self.list_element(ty) {
            ty = element;
        }
        ty.to_nullable()
    }

    /// The named type underneath any list wrappers of `ty`.
    pub fn named_type(&self, ty: GqlType) -> Option<&NamedType> {
        match self.registry.shape(self.innermost_type(ty))? {
            TypeShape::Named(name) => self.types.get(&*name),
            TypeShape::List(_) => None,
        }
    }

    /// Looks up the field `name` selected on the object type `parent`.
    ///
    /// Besides the fields the type declares, this knows `__typename` (on
    /// every object type) and `__schema` and `__type` (on the query root).
    pub fn field(&self, parent: GqlType, name: &str) -> Option<&ObjectTypeField> {
        let object = self.object_type(parent)?;
        let is_query_root = self.innermost_type(parent) == self.query_type;
        match name {
            "__typename" => Some(&self.meta_fields.typename),
            "__schema" if is_query_root => Some(&self.meta_fields.schema),
            "__type" if is_query_root => Some(&self.meta_fields.type_),
            _ => object.field(name),
        }
    }

    pub fn object_type(&self, ty: GqlType) -> Option<&ObjectType> {
        self.named_type(ty).and_then(NamedType::as_object)
    }

    pub fn enum_type(&self, ty: GqlType) -> Option<&EnumType> {
        self.named_type(ty).and_then(NamedType::as_enum)
    }

    pub fn input_object_type(&self, ty: GqlType) -> Option<&InputObjectType> {
        self.named_type(ty).and_then(NamedType::as_input_object)
    }

    pub fn builtin_scalar(&self, ty: GqlType) -> Option<BuiltinScalar> {
        self.named_type(ty).and_then(NamedType::builtin_scalar)
    }

    /// The named type at the core of a type reference written in a
    /// document, or `None` when this schema does not define it.
    pub fn type_ref_named(&self, type_ref: &ast::TypeRef) -> Option<GqlType> {
        self.type_by_name(type_ref.innermost_name().as_str())
    }

    /// Resolves a type reference written in a document to a type this
    /// schema already has.
    ///
    /// List types are looked up, never created: a list shape no field,
    /// argument, or input field declares resolves to `None` even when its
    /// named type exists. Documents come from clients, and a built schema
    /// does not grow on their behalf.
    pub fn existing_type_from_ref(&self, type_ref: &ast::TypeRef) -> Option<GqlType> {
        match type_ref {
            ast::TypeRef::Named(name) => self.type_by_name(name.as_str()),
            ast::TypeRef::List(inner, _) => {
                self.registry.existing_list_of(self.existing_type_from_ref(inner)?)
            },
            ast::TypeRef::NonNull(inner, _) => Some(self.existing_type_from_ref(inner)?.to_non_null()),
        }
    }

    /// The existing types that accept every value of `type_ref`, tightest
    /// first: the exact type when the schema has it, then the same shape
    /// with fewer non-null markers. Creates no types.
    pub fn existing_types_accepting(&self, type_ref: &ast::TypeRef) -> Vec<GqlType> {
        match type_ref {
            ast::TypeRef::Named(name) => self.type_by_name(name.as_str()).into_iter().collect(),
            ast::TypeRef::NonNull(inner, _) => {
                let inner = self.existing_types_accepting(inner);
                inner
                    .iter()
                    .map(|ty| ty.to_non_null())
                    .chain(inner.iter().copied())
                    .collect()
            },
            ast::TypeRef::List(inner, _) => self
                .existing_types_accepting(inner)
                .into_iter()
                .filter_map(|element| self.registry.existing_list_of(element))
                .collect(),
        }
    }

    /// [`are_types_compatible()`](Self::are_types_compatible) for a
    /// candidate written as a type reference, compared shape by shape so
    /// that the candidate never has to exist in this schema.
    pub fn is_type_ref_compatible(&self, location: GqlType, candidate: &ast::TypeRef) -> bool {
        match candidate {
            ast::TypeRef::NonNull(inner, _) => self.is_type_ref_compatible(location.to_nullable(), inner),
            _ if location.is_non_null() => false,
            ast::TypeRef::List(inner, _) => self
                .list_element(location)
                .is_some_and(|element| self.is_type_ref_compatible(element, inner)),
            ast::TypeRef::Named(name) => {
                !self.is_list(location) && self.type_by_name(name.as_str()) == Some(location)
            },
        }
    }

    /// The number of distinct types this schema's registry holds.
    pub(crate) fn registered_type_count(&self) -> usize {
        self.registry.len()
    }

    /// Renders `ty` the way it would be written in SDL: `[Int!]!`.
    pub fn type_name(&self, ty: GqlType) -> String {
        let mut rendered = match self.registry.shape(ty) {
            Some(TypeShape::Named(name)) => name.to_string(),
            Some(TypeShape::List(element)) => format!("[{}]", self.type_name(element)),
            None => "<unknown>".to_string(),
        };
        if ty.is_non_null() {
            rendered.push('!');
        }
        rendered
    }

    // =========================================================================
    // Classification
    // =========================================================================

    fn named_kind(&self, ty: GqlType) -> Option<NamedTypeKind> {
        self.named_type(ty).map(NamedType::kind)
    }

    pub fn is_list(&self, ty: GqlType) -> bool {
        self.list_element(ty).is_some()
    }

    pub fn is_scalar(&self, ty: GqlType) -> bool {
        self.named_kind(ty) == Some(NamedTypeKind::Scalar)
    }

    pub fn is_object(&self, ty: GqlType) -> bool {
        self.named_kind(ty) == Some(NamedTypeKind::Object)
    }

    pub fn is_input_object(&self, ty: GqlType) -> bool {
        self.named_kind(ty) == Some(NamedTypeKind::InputObject)
    }

    pub fn is_enum(&self, ty: GqlType) -> bool {
        self.named_kind(ty) == Some(NamedTypeKind::Enum)
    }

    /// Scalars, enums, and input objects (and lists of them).
    pub fn is_input_type(&self, ty: GqlType) -> bool {
        matches!(
            self.named_kind(ty),
            Some(NamedTypeKind::Scalar | NamedTypeKind::Enum | NamedTypeKind::InputObject),
        )
    }

    /// Scalars, enums, and objects (and lists of them).
    pub fn is_output_type(&self, ty: GqlType) -> bool {
        matches!(
            self.named_kind(ty),
            Some(NamedTypeKind::Scalar | NamedTypeKind::Enum | NamedTypeKind::Object),
        )
    }

    pub fn is_leaf(&self, ty: GqlType) -> bool {
        matches!(
            self.named_kind(ty),
            Some(NamedTypeKind::Scalar | NamedTypeKind::Enum),
        )
    }

    /// Types that need a selection set. Only object types qualify since
    /// interfaces and unions are not supported.
    pub fn is_composite(&self, ty: GqlType) -> bool {
        self.is_object(ty)
    }

    /// Whether a value of type `candidate` may flow into a position of type
    /// `location`.
    ///
    /// A non-null location only accepts non-null candidates, a nullable
    /// location accepts either. List wrappers must line up exactly and the
    /// named types underneath must be the same type.
    pub fn are_types_compatible(&self, location: GqlType, candidate: GqlType) -> bool {
        if location.is_non_null() {
            return candidate.is_non_null()
                && self.are_types_compatible(location.to_nullable(), candidate.to_nullable());
        }
        if candidate.is_non_null() {
            return self.are_types_compatible(location, candidate.to_nullable());
        }
        match (self.list_element(location), self.list_element(candidate)) {
            (Some(location_element), Some(candidate_element)) => {
                self.are_types_compatible(location_element, candidate_element)
            },
            (None, None) => location == candidate,
            _ => false,
        }
    }
}

/// Fields every schema answers without declaring them.
#[derive(Debug)]
pub(crate) struct MetaFields {
    pub typename: ObjectTypeField,
    pub schema: ObjectTypeField,
    pub type_: ObjectTypeField,
}
