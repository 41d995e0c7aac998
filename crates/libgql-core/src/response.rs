use crate::loc::SourceLocation;
use serde::Serialize;
use std::fmt;

/// One step of a [`ResponsePath`]: a response key or a list index.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// The location of a value inside the response data, from the root down.
///
/// Serializes as a JSON array such as `["hero", "friends", 0, "name"]`.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResponsePath(Vec<PathSegment>);
impl ResponsePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A copy of this path extended by the response key `key`.
    pub fn with_key(&self, key: &str) -> Self {
        self.with(PathSegment::Key(key.to_string()))
    }

    /// A copy of this path extended by the list index `index`.
    pub fn with_index(&self, index: usize) -> Self {
        self.with(PathSegment::Index(index))
    }

    fn with(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(segment);
        Self(segments)
    }
}

impl From<Vec<PathSegment>> for ResponsePath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

/// Renders as `hero.friends[0].name`.
impl fmt::Display for ResponsePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// An entry of a response's `errors` list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<SourceLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<ResponsePath>,
}
impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: vec![],
            path: None,
        }
    }

    pub fn with_locations(mut self, locations: Vec<SourceLocation>) -> Self {
        self.locations = locations;
        self
    }

    pub fn with_path(mut self, path: ResponsePath) -> Self {
        self.path = Some(path);
        self
    }
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(location) = self.locations.first() {
            write!(f, " ({}:{})", location.line, location.column)?;
        }
        if let Some(path) = &self.path {
            write!(f, " at `{path}`")?;
        }
        Ok(())
    }
}

/// The outcome of one request, serializable as a standard GraphQL response.
///
/// `data` is `None` when the request failed before execution started (a
/// parse, validation, or variable coercion error), and `Some(Value::Null)`
/// when a non-null violation propagated all the way to the root.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}
impl Response {
    pub fn from_data(data: serde_json::Value, errors: Vec<GraphQLError>) -> Self {
        Self {
            errors,
            data: Some(data),
        }
    }

    pub fn from_errors(errors: Vec<GraphQLError>) -> Self {
        Self { errors, data: None }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        if !self.errors.is_empty() {
            object.insert(
                "errors".to_string(),
                serde_json::to_value(&self.errors).unwrap_or_default(),
            );
        }
        if let Some(data) = &self.data {
            object.insert("data".to_string(), data.clone());
        }
        serde_json::Value::Object(object)
    }
}
