//! Error types for IES Core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IesError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to load ontology: {0}")]
    OntologyLoad(String),

    #[error("Ontology query error: {0}")]
    OntologyQuery(String),

    #[error("Unknown type {type_name} in {context}")]
    InvalidArgument { type_name: String, context: String },

    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),

    #[error("{relation} is not supported on {kind}")]
    UnsupportedRelation { kind: String, relation: String },

    #[error("invalid ISO8601 datetime string: {0}")]
    InvalidDateTime(String),

    #[error("Triple store error: {0}")]
    Store(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Session error: {0}")]
    Session(String),
}

impl From<oxigraph::store::StorageError> for IesError {
    fn from(err: oxigraph::store::StorageError) -> Self {
        IesError::Store(err.to_string())
    }
}

impl From<oxigraph::model::IriParseError> for IesError {
    fn from(err: oxigraph::model::IriParseError) -> Self {
        IesError::Store(format!("invalid IRI: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, IesError>;
