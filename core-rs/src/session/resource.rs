//! Constructed entities and references to them

use serde_json::Value;
use std::sync::Arc;

use crate::errors::{IesError, Result};
use crate::hierarchy::{EntityKind, LatticeType};

/// A constructed entity
///
/// Owned by the identity cache of the session that built it and handed out
/// as `Arc<Resource>`; two handles denote the same entity exactly when
/// `Arc::ptr_eq` holds.
#[derive(Debug)]
pub struct Resource {
    uri: String,
    kind: EntityKind,
    classes: Vec<String>,
}

impl Resource {
    pub(crate) fn new(uri: String, kind: EntityKind, classes: Vec<String>) -> Self {
        Self { uri, kind, classes }
    }

    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Ontology classes asserted when the entity was built
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[must_use]
    pub fn is_a(&self, kind: EntityKind) -> bool {
        self.kind.is_a(kind)
    }
}

/// Anything a relationship helper accepts for the related node
#[derive(Debug, Clone)]
pub enum Reference {
    Resource(Arc<Resource>),
    Uri(String),
    /// A dynamic value that is neither a URI string nor an entity
    Unsupported { type_name: String },
}

impl From<Arc<Resource>> for Reference {
    fn from(resource: Arc<Resource>) -> Self {
        Reference::Resource(resource)
    }
}

impl From<&Arc<Resource>> for Reference {
    fn from(resource: &Arc<Resource>) -> Self {
        Reference::Resource(Arc::clone(resource))
    }
}

impl From<&str> for Reference {
    fn from(uri: &str) -> Self {
        Reference::Uri(uri.to_string())
    }
}

impl From<String> for Reference {
    fn from(uri: String) -> Self {
        Reference::Uri(uri)
    }
}

impl From<&String> for Reference {
    fn from(uri: &String) -> Self {
        Reference::Uri(uri.clone())
    }
}

impl From<&Value> for Reference {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(uri) => Reference::Uri(uri.clone()),
            other => Reference::Unsupported {
                type_name: json_type_name(other).to_string(),
            },
        }
    }
}

impl From<Value> for Reference {
    fn from(value: Value) -> Self {
        Reference::from(&value)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read an optional class list from a dynamic value
///
/// `null` means "no explicit classes"; anything other than an array of
/// strings is a configuration error.
pub fn parse_class_list(value: &Value) -> Result<Option<Vec<String>>> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(class) => Ok(class.clone()),
                other => Err(IesError::Configuration(format!(
                    "class list entries must be strings, got {}",
                    json_type_name(other)
                ))),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some),
        other => Err(IesError::Configuration(format!(
            "expected a list of classes - to use one class, pass a one-element list (got {})",
            json_type_name(other)
        ))),
    }
}

/// Construction arguments shared by every entity kind
#[derive(Debug, Clone, Default)]
pub struct EntityOptions {
    /// Generated when absent or empty
    pub uri: Option<String>,
    /// `None` asserts the kind's canonical class; an empty list asserts `rdfs:Resource`
    pub classes: Option<Vec<String>>,
    /// ISO8601 start, recorded as a bounding state
    pub start: Option<String>,
    pub end: Option<String>,
    pub label: Option<String>,
}

impl EntityOptions {
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes = Some(classes.into_iter().map(Into::into).collect());
        self
    }

    pub fn starting(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn ending(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Arguments for `Session::create_state`
#[derive(Debug, Clone, Default)]
pub struct StateOptions {
    /// Defaults to the owner kind's default state class
    pub state_class: Option<String>,
    pub uri: Option<String>,
    /// Defaults to `ies:isStateOf`
    pub relation: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub location: Option<Reference>,
}

/// Arguments for `Session::add_participant`
#[derive(Debug, Clone, Default)]
pub struct ParticipationOptions {
    pub uri: Option<String>,
    /// Defaults to `ies:EventParticipant`
    pub participation_type: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}
