pub(crate) const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

/// Whether a field or enum value is marked `@deprecated`, and why.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum DeprecationState {
    #[default]
    NotDeprecated,
    Deprecated(Option<String>),
}
impl DeprecationState {
    pub fn is_deprecated(&self) -> bool {
        matches!(self, Self::Deprecated(_))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::NotDeprecated => None,
            Self::Deprecated(reason) => reason.as_deref(),
        }
    }
}
