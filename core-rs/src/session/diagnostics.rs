//! Collected data-quality warnings
//!
//! Warnings never interrupt construction. Each one is emitted through
//! `tracing` and also kept on the session so callers can inspect them.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// Entity URI failed the syntactic check
    InvalidUri,
    /// Requested class is not in the ontology index
    UnknownClass,
    /// A URI reference was bound to a synthesized placeholder entity
    Placeholder,
    /// Predicate is not a known datatype/object property
    NonOntologyPredicate,
    /// Single-class kind given several classes; the first was kept
    TooManyClasses,
    /// The store refused a triple for an entity with an invalid URI
    StoreRejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}
