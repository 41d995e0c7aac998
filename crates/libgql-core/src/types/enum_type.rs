use crate::types::DeprecationState;
use indexmap::IndexMap;

#[derive(Clone, Debug, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub description: Option<String>,
    pub values: IndexMap<String, EnumValue>,
}
impl EnumType {
    pub fn value(&self, name: &str) -> Option<&EnumValue> {
        self.values.get(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
    pub deprecation: DeprecationState,
}
