use crate::Pos;

/// A GraphQL name together with the position it was written at.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Name {
    pub value: String,
    pub pos: Pos,
}

impl Name {
    pub fn new(value: impl Into<String>, pos: Pos) -> Self {
        Self {
            value: value.into(),
            pos,
        }
    }

    pub fn as_str(&self) -> &str {
        self.value.as_str()
    }

    /// Names starting with `__` are reserved for introspection.
    pub fn is_reserved(&self) -> bool {
        self.value.starts_with("__")
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}
