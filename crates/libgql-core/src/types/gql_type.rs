/// An interned handle to a type in one schema's [`TypeRegistry`].
///
/// Every structural type (a named type or a list of some element type)
/// owns a pair of adjacent slots in its registry: the nullable variant at
/// an even index and the non-null variant right after it. Flipping
/// nullability is therefore pure arithmetic and always lands on the same
/// partner:
///
/// ```
/// use libgql_core::schema::Schema;
///
/// let schema = Schema::from_str("type Query { a: Int }").unwrap();
/// let int = schema.type_by_name("Int").unwrap();
/// assert_eq!(int.to_non_null().to_nullable(), int);
/// assert_eq!(int.to_non_null().to_non_null(), int.to_non_null());
/// ```
///
/// Equality is handle identity. Handles from two different schemas are
/// never equal, even for types of the same name.
///
/// [`TypeRegistry`]: crate::types::TypeRegistry
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GqlType {
    registry_id: u32,
    index: u32,
}
impl GqlType {
    pub(crate) fn new(registry_id: u32, index: u32) -> Self {
        Self { registry_id, index }
    }

    pub(crate) fn registry_id(&self) -> u32 {
        self.registry_id
    }

    /// The index of the structural pair this type belongs to.
    pub(crate) fn pair_index(&self) -> usize {
        (self.index / 2) as usize
    }

    pub fn is_non_null(&self) -> bool {
        self.index & 1 == 1
    }

    pub fn is_nullable(&self) -> bool {
        !self.is_non_null()
    }

    pub fn to_non_null(self) -> Self {
        Self {
            index: self.index | 1,
            ..self
        }
    }

    pub fn to_nullable(self) -> Self {
        Self {
            index: self.index & !1,
            ..self
        }
    }
}
