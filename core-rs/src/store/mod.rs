/**
 * store module
 *
 * Triple-store collaborators behind one trait:
 * - memory: Oxigraph in-memory graph
 * - sparql: remote SPARQL 1.1 endpoint over HTTP
 */

pub mod memory;
pub mod sparql;

use std::collections::HashMap;
use std::fmt;

use crate::errors::Result;
use crate::ontology::vocab::XSD;

pub use memory::MemoryStore;
pub use sparql::SparqlEndpointStore;

/// Where entity construction writes its triples
///
/// `add_triple` must be idempotent: callers do not promise to send each
/// fact only once.
pub trait TripleStore: Send {
    /// Add a triple; returns whether the store reports it as new
    fn add_triple(&mut self, triple: &Triple) -> Result<bool>;

    fn in_graph(&self, triple: &Triple) -> Result<bool>;

    /// Run a SELECT query; each row maps variable name to IRI or literal value
    fn query(&self, sparql: &str) -> Result<Vec<HashMap<String, String>>>;

    fn serialize(&self, format: SerializationFormat) -> Result<String>;

    fn clear(&mut self) -> Result<()>;

    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// XSD datatypes accepted for literal objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LiteralType {
    #[default]
    String,
    Boolean,
    Decimal,
    Integer,
    Double,
    Float,
    Date,
    Time,
    DateTime,
    DateTimeStamp,
    GYear,
    GYearMonth,
    Duration,
    AnyUri,
    Language,
    Token,
}

impl LiteralType {
    const ALL: &'static [LiteralType] = &[
        Self::String,
        Self::Boolean,
        Self::Decimal,
        Self::Integer,
        Self::Double,
        Self::Float,
        Self::Date,
        Self::Time,
        Self::DateTime,
        Self::DateTimeStamp,
        Self::GYear,
        Self::GYearMonth,
        Self::Duration,
        Self::AnyUri,
        Self::Language,
        Self::Token,
    ];

    /// XSD local name
    #[must_use]
    pub const fn local_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Decimal => "decimal",
            Self::Integer => "integer",
            Self::Double => "double",
            Self::Float => "float",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "dateTime",
            Self::DateTimeStamp => "dateTimeStamp",
            Self::GYear => "gYear",
            Self::GYearMonth => "gYearMonth",
            Self::Duration => "duration",
            Self::AnyUri => "anyURI",
            Self::Language => "language",
            Self::Token => "token",
        }
    }

    #[must_use]
    pub fn uri(&self) -> String {
        format!("{}{}", XSD, self.local_name())
    }

    /// Look up by local name (`"dateTime"`) or prefixed name (`"xsd:dateTime"`).
    /// Unknown names fall back to `xsd:string`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let local = name.trim_start_matches("xsd:").trim_start_matches(XSD);
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.local_name() == local)
            .unwrap_or_default()
    }
}

/// Object position of a triple
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Object {
    Iri(String),
    Literal { value: String, datatype: LiteralType },
}

impl Object {
    pub fn is_literal(&self) -> bool {
        matches!(self, Object::Literal { .. })
    }

    /// SPARQL term syntax
    pub fn to_sparql(&self) -> String {
        match self {
            Object::Iri(iri) => format!("<{}>", iri),
            Object::Literal { value, datatype } => {
                format!("\"{}\"^^<{}>", escape_literal(value), datatype.uri())
            }
        }
    }
}

/// A subject/predicate/object statement with IRI subject and predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Object,
}

impl Triple {
    pub fn iri(subject: impl Into<String>, predicate: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: Object::Iri(object.into()),
        }
    }

    pub fn literal(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        value: impl Into<String>,
        datatype: LiteralType,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: Object::Literal {
                value: value.into(),
                datatype,
            },
        }
    }

    /// `<s> <p> o` for use inside SPARQL data blocks
    pub fn to_sparql(&self) -> String {
        format!("<{}> <{}> {}", self.subject, self.predicate, self.object.to_sparql())
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .", self.to_sparql())
    }
}

/// Output syntax for `TripleStore::serialize`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SerializationFormat {
    #[default]
    NTriples,
    Turtle,
}

impl SerializationFormat {
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::NTriples => "application/n-triples",
            Self::Turtle => "text/turtle",
        }
    }
}

fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}
