use crate::types::GqlType;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

static NEXT_REGISTRY_ID: AtomicU32 = AtomicU32::new(1);

/// The structure behind a pair of [`GqlType`] handles.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TypeShape {
    /// A named type (scalar, object, enum, or input object).
    Named(Arc<str>),
    /// A list; holds the element type including its nullability.
    List(GqlType),
}

#[derive(Debug, Default)]
struct RegistryTables {
    shapes: Vec<TypeShape>,
    named: HashMap<Arc<str>, u32>,
}

/// Interns the types of one schema.
///
/// Named types are registered while the schema is built. List types are
/// created on demand by [`list_of()`](Self::list_of), at most once per
/// element type, so repeated calls hand back the same handle. The registry
/// is the only interior mutability in a built schema and is safe to use
/// from several threads at once.
#[derive(Debug)]
pub struct TypeRegistry {
    id: u32,
    tables: RwLock<RegistryTables>,
    list_memo: RwLock<HashMap<GqlType, GqlType>>,
}
impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            tables: RwLock::new(RegistryTables::default()),
            list_memo: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the nullable handle for `name`, registering it if needed.
    pub fn named(&self, name: &str) -> GqlType {
        if let Some(ty) = self.lookup_named(name) {
            return ty;
        }
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(pair) = tables.named.get(name) {
            return self.handle(*pair);
        }
        let pair = tables.shapes.len() as u32;
        let name: Arc<str> = Arc::from(name);
        tables.shapes.push(TypeShape::Named(name.clone()));
        tables.named.insert(name, pair);
        self.handle(pair)
    }

    /// Returns the nullable handle for `name` if it has been registered.
    pub fn lookup_named(&self, name: &str) -> Option<GqlType> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables.named.get(name).map(|pair| self.handle(*pair))
    }

    /// Returns the nullable list type whose elements are `element`.
    ///
    /// `[T]` and `[T!]` are distinct list types.
    pub fn list_of(&self, element: GqlType) -> GqlType {
        if let Some(list) = self
            .list_memo
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&element)
        {
            return *list;
        }

        let mut memo = self.list_memo.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have created it between the two locks.
        if let Some(list) = memo.get(&element) {
            return *list;
        }
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let pair = tables.shapes.len() as u32;
        tables.shapes.push(TypeShape::List(element));
        let list = self.handle(pair);
        memo.insert(element, list);
        list
    }

    /// Returns the nullable list type whose elements are `element` if it has
    /// already been created. Never registers anything.
    pub fn existing_list_of(&self, element: GqlType) -> Option<GqlType> {
        self.list_memo
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&element)
            .copied()
    }

    /// The number of distinct types (nullable/non-null pairs) registered.
    pub fn len(&self) -> usize {
        self.tables.read().unwrap_or_else(PoisonError::into_inner).shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the shape behind `ty`, or `None` for a handle minted by a
    /// different registry.
    pub fn shape(&self, ty: GqlType) -> Option<TypeShape> {
        if ty.registry_id() != self.id {
            return None;
        }
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables.shapes.get(ty.pair_index()).cloned()
    }

    pub fn owns(&self, ty: GqlType) -> bool {
        ty.registry_id() == self.id
    }

    fn handle(&self, pair: u32) -> GqlType {
        GqlType::new(self.id, pair * 2)
    }
}
impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
