/// Contexts in which an otherwise valid name is reserved.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReservedNameContext {
    /// `on` cannot name a fragment since it introduces a type condition.
    FragmentName,

    /// `true`, `false`, and `null` cannot be enum values since they would be
    /// ambiguous with the literals of the same spelling.
    EnumValue,
}

impl ReservedNameContext {
    pub fn description(&self) -> &'static str {
        match self {
            Self::FragmentName => "fragment name",
            Self::EnumValue => "enum value",
        }
    }
}

impl std::fmt::Display for ReservedNameContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}
