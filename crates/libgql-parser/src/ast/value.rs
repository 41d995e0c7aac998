use crate::ast::Name;
use crate::Pos;

/// The syntactic class of a scalar literal.
///
/// For `Boolean`, the text is `true` or `false`; for `Enum`, the bare
/// identifier; for `String`, the cooked (unescaped) string value; for `Int`
/// and `Float`, the literal digits exactly as written.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ScalarKind {
    Int,
    Float,
    String,
    Boolean,
    Enum,
}

impl ScalarKind {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Int => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Enum => "enum",
        }
    }
}

/// A value literal (or variable reference) appearing in a document.
#[derive(Clone, Debug, PartialEq)]
pub struct InputValue {
    pub kind: InputValueKind,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputValueKind {
    Null,
    /// `$name`; holds the name without the `$`.
    Variable(String),
    Scalar(ScalarKind, String),
    List(Vec<InputValue>),
    /// Fields in source order. Duplicate names are kept as written and
    /// reported by validation.
    Object(Vec<ObjectField>),
}

/// One `name: value` entry of an input object literal.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectField {
    pub name: Name,
    pub value: InputValue,
}

impl InputValue {
    pub fn new(kind: InputValueKind, pos: Pos) -> Self {
        Self { kind, pos }
    }

    pub fn null(pos: Pos) -> Self {
        Self::new(InputValueKind::Null, pos)
    }

    pub fn scalar(kind: ScalarKind, text: impl Into<String>, pos: Pos) -> Self {
        Self::new(InputValueKind::Scalar(kind, text.into()), pos)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.kind, InputValueKind::Null)
    }

    pub fn as_variable(&self) -> Option<&str> {
        match &self.kind {
            InputValueKind::Variable(name) => Some(name),
            _ => None,
        }
    }

    /// Returns `true` if a variable appears anywhere inside this value.
    pub fn contains_variables(&self) -> bool {
        let mut found = false;
        self.visit_variables(&mut |_, _| found = true);
        found
    }

    /// Calls `visitor` with the name and position of every variable
    /// reference inside this value, in source order.
    pub fn visit_variables(&self, visitor: &mut impl FnMut(&str, Pos)) {
        match &self.kind {
            InputValueKind::Variable(name) => visitor(name, self.pos),
            InputValueKind::List(items) => {
                for item in items {
                    item.visit_variables(visitor);
                }
            },
            InputValueKind::Object(fields) => {
                for field in fields {
                    field.value.visit_variables(visitor);
                }
            },
            InputValueKind::Null | InputValueKind::Scalar(..) => {},
        }
    }

    /// Structural equality that ignores source positions. Object fields are
    /// compared in order.
    pub fn is_equivalent(&self, other: &InputValue) -> bool {
        match (&self.kind, &other.kind) {
            (InputValueKind::Null, InputValueKind::Null) => true,
            (InputValueKind::Variable(a), InputValueKind::Variable(b)) => a == b,
            (InputValueKind::Scalar(ka, a), InputValueKind::Scalar(kb, b)) => {
                ka == kb && a == b
            },
            (InputValueKind::List(a), InputValueKind::List(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|(x, y)| x.is_equivalent(y))
            },
            (InputValueKind::Object(a), InputValueKind::Object(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|(x, y)| {
                        x.name.value == y.name.value && x.value.is_equivalent(&y.value)
                    })
            },
            _ => false,
        }
    }
}

impl std::fmt::Display for InputValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            InputValueKind::Null => f.write_str("null"),
            InputValueKind::Variable(name) => write!(f, "${name}"),
            InputValueKind::Scalar(ScalarKind::String, text) => {
                write_quoted_string(f, text)
            },
            InputValueKind::Scalar(_, text) => f.write_str(text),
            InputValueKind::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            },
            InputValueKind::Object(fields) => {
                f.write_str("{")?;
                for (idx, field) in fields.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.value)?;
                }
                f.write_str("}")
            },
        }
    }
}

/// Writes `value` as a GraphQL string literal.
pub(crate) fn write_quoted_string(
    f: &mut impl std::fmt::Write,
    value: &str,
) -> std::fmt::Result {
    f.write_char('"')?;
    for ch in value.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{0008}' => f.write_str("\\b")?,
            '\u{000C}' => f.write_str("\\f")?,
            c if c < '\u{0020}' => write!(f, "\\u{:04X}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}
