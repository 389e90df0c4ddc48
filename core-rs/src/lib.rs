//! # IES Core - typed object factory over the IES ontology
//!
//! Builds typed entities for an RDF knowledge graph that conforms to the
//! IES ontology (`http://ies.data.gov.uk/ontology/ies4#`). Given a list of
//! ontology classes the core picks the most specific constructable kind,
//! keeps exactly one instance per URI for the lifetime of a session and
//! writes the entity's type triples to a pluggable triple store.
//!
//! ## Core Principle
//!
//! **The ontology decides, the lattice constructs**: the subclass closure
//! from the loaded ontology maps any class onto the static `EntityKind`
//! lattice; nothing is inferred beyond `rdfs:subClassOf`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Ontology Index (shared, Arc)      │
//! │   classes · properties · closure    │
//! └─────────────────────────────────────┘
//!           │
//!           ▼
//! ┌─────────────────────────────────────┐
//! │   Session                           │
//! │   TypeHierarchy ─ resolve kind      │
//! │   IdentityCache ─ one per URI       │
//! │   URI minting  ─ token + counter    │
//! └─────────────────────────────────────┘
//!           │
//!           ▼
//!     ┌─────────────┐   ┌──────────────┐
//!     │ MemoryStore │   │ SPARQL store │
//!     │ (oxigraph)  │   │ (HTTP)       │
//!     └─────────────┘   └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use ies_core::{EntityKind, EntityOptions, Session};
//!
//! let mut session = Session::in_memory()?;
//! let person = session.create(EntityKind::Person, EntityOptions::default().labelled("Fred"))?;
//! let state = session.works_for(&person, "http://example.com/orgs#acme", None, None)?;
//!
//! assert!(session.get(person.uri()).is_some());
//! assert!(state.uri().starts_with("http://example.com/rdf/testdata#"));
//! # Ok::<(), ies_core::IesError>(())
//! ```

pub mod config;
pub mod errors;
pub mod hierarchy;
pub mod logging;
pub mod ontology;
pub mod session;
pub mod store;
pub mod uri;

pub use config::{OntologySource, SessionConfig, StoreConfig};
pub use errors::{IesError, Result};
pub use hierarchy::{EntityKind, HierarchyEntry, LatticeType, Resolution, TypeHierarchy};
pub use logging::init_logging;
pub use ontology::OntologyIndex;
pub use session::global::{
    init_default_session, is_default_session_initialised, reset_default_session,
    shutdown_default_session, with_default_session,
};
pub use session::{
    parse_class_list, Diagnostic, DiagnosticKind, EntityOptions, IdentityCache,
    ParticipationOptions, Reference, Resource, Session, StateOptions,
};
pub use store::{
    LiteralType, MemoryStore, Object, SerializationFormat, SparqlEndpointStore, Triple,
    TripleStore,
};
pub use uri::{UriValidator, ValidationResult};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
