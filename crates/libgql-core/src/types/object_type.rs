use crate::types::DeprecationState;
use crate::types::GqlType;
use crate::types::InputValueDefinition;
use indexmap::IndexMap;

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, ObjectTypeField>,
}
impl ObjectType {
    pub fn field(&self, name: &str) -> Option<&ObjectTypeField> {
        self.fields.get(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeField {
    pub name: String,
    pub ty: GqlType,
    pub args: IndexMap<String, InputValueDefinition>,
    pub deprecation: DeprecationState,
    pub description: Option<String>,
}
