/**
 * session module
 *
 * A Session owns everything one working graph needs: the identity cache,
 * the type hierarchy, the triple store and the URI minting state. The
 * ontology index is shared read-only between sessions.
 *
 * - resource: entities, references and construction options
 * - cache: per-session identity cache
 * - diagnostics: collected data-quality warnings
 * - relations: relationship helpers built on reference resolution
 * - global: optional process-wide default session
 */

pub mod cache;
pub mod diagnostics;
pub mod global;
pub mod relations;
pub mod resource;

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::{SessionConfig, StoreConfig};
use crate::errors::{IesError, Result};
use crate::hierarchy::{EntityKind, LatticeType, Resolution, TypeHierarchy};
use crate::ontology::vocab::{DEFAULT_PREFIXES, RDFS_RESOURCE, RDF_TYPE};
use crate::ontology::OntologyIndex;
use crate::store::{MemoryStore, SerializationFormat, SparqlEndpointStore, Triple, TripleStore};
use crate::uri::UriValidator;

pub use cache::IdentityCache;
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use relations::validate_iso8601;
pub use resource::{
    parse_class_list, EntityOptions, ParticipationOptions, Reference, Resource, StateOptions,
};

pub struct Session {
    ontology: Arc<OntologyIndex>,
    hierarchy: TypeHierarchy,
    store: Box<dyn TripleStore>,
    cache: IdentityCache,
    token: Uuid,
    counter: u64,
    prefixes: Vec<(String, String)>,
    diagnostics: Vec<Diagnostic>,
}

impl Session {
    /// Build a session from configuration: load the ontology and open the store
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let ontology = Arc::new(OntologyIndex::from_source(&config.ontology)?);

        let store: Box<dyn TripleStore> = match &config.store {
            StoreConfig::Memory => Box::new(MemoryStore::new()?),
            StoreConfig::SparqlEndpoint {
                host,
                dataset,
                security_label,
            } => Box::new(SparqlEndpointStore::connect(host, dataset, security_label)?),
        };

        Ok(Self::with_parts(ontology, store, &config))
    }

    /// In-memory session over the embedded ontology with default settings
    pub fn in_memory() -> Result<Self> {
        Self::new(SessionConfig::default())
    }

    /// Assemble a session from an already-loaded (possibly shared) index
    /// and any store
    pub fn with_parts(
        ontology: Arc<OntologyIndex>,
        store: Box<dyn TripleStore>,
        config: &SessionConfig,
    ) -> Self {
        let hierarchy: TypeHierarchy = TypeHierarchy::build(&ontology);

        let mut session = Self {
            ontology,
            hierarchy,
            store,
            cache: IdentityCache::new(),
            token: Uuid::new_v4(),
            counter: 0,
            prefixes: Vec::new(),
            diagnostics: Vec::new(),
        };

        for (prefix, namespace) in DEFAULT_PREFIXES {
            session.add_prefix(prefix, namespace);
        }
        for (prefix, namespace) in &config.prefixes {
            session.add_prefix(prefix, namespace);
        }
        session.set_uri_stub(&config.uri_stub);

        info!(token = %session.token.simple(), "session ready");
        session
    }

    pub fn ontology(&self) -> &OntologyIndex {
        &self.ontology
    }

    pub fn hierarchy(&self) -> &TypeHierarchy {
        &self.hierarchy
    }

    pub fn token(&self) -> Uuid {
        self.token
    }

    // --- URI minting -----------------------------------------------------

    /// Fresh URI: `{uri stub}{session token}{context}_{counter:06}`
    ///
    /// Unique within a session; the token keeps sessions apart.
    pub fn generate_uri(&mut self, context: &str) -> String {
        let uri = format!(
            "{}{}{}_{:06}",
            self.uri_stub(),
            self.token.simple(),
            context,
            self.counter
        );
        self.counter += 1;
        uri
    }

    /// `{parent}_{postfix}_{NNN}` with the lowest NNN (from 001) not yet cached
    pub fn mint_dependent_uri(&self, parent: &str, postfix: &str) -> String {
        let mut counter = 1u32;
        loop {
            let uri = format!("{}_{}_{:03}", parent, postfix, counter);
            if !self.cache.contains(&uri) {
                return uri;
            }
            counter += 1;
        }
    }

    /// Full reset: empty the store and cache, new token, counter back to 0
    pub fn clear(&mut self) -> Result<Uuid> {
        self.store.clear()?;
        self.cache.clear();
        self.diagnostics.clear();
        self.token = Uuid::new_v4();
        self.counter = 0;
        info!(token = %self.token.simple(), "session cleared");
        Ok(self.token)
    }

    // --- prefixes --------------------------------------------------------

    /// Namespace for generated URIs (the `:` prefix)
    pub fn uri_stub(&self) -> &str {
        self.prefix(":").unwrap_or_default()
    }

    pub fn set_uri_stub(&mut self, uri_stub: &str) {
        self.add_prefix(":", uri_stub);
    }

    /// Add or replace a prefix; a missing trailing `:` is added
    pub fn add_prefix(&mut self, prefix: &str, namespace: &str) {
        let prefix = if prefix.ends_with(':') {
            prefix.to_string()
        } else {
            format!("{}:", prefix)
        };

        match self.prefixes.iter_mut().find(|(p, _)| *p == prefix) {
            Some(entry) => entry.1 = namespace.to_string(),
            None => self.prefixes.push((prefix, namespace.to_string())),
        }
    }

    pub fn prefix(&self, prefix: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, ns)| ns.as_str())
    }

    /// Prefixes in insertion order
    pub fn prefixes(&self) -> &[(String, String)] {
        &self.prefixes
    }

    /// SPARQL `PREFIX` preamble for every registered prefix
    pub fn format_prefixes(&self) -> String {
        self.prefixes
            .iter()
            .map(|(prefix, namespace)| format!("PREFIX {} <{}> ", prefix, namespace))
            .collect()
    }

    // --- diagnostics -----------------------------------------------------

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn record(&mut self, kind: DiagnosticKind, message: String) {
        self.diagnostics.push(Diagnostic { kind, message });
    }

    // --- triples ---------------------------------------------------------

    /// Write a triple, warning when the predicate is not in the ontology
    pub fn add_triple(&mut self, triple: Triple) -> Result<bool> {
        let known = if triple.object.is_literal() {
            self.ontology.is_known_datatype_property(&triple.predicate)
        } else {
            self.ontology.is_known_object_property(&triple.predicate)
        };

        if !known {
            let what = if triple.object.is_literal() {
                "datatype"
            } else {
                "object"
            };
            warn!(predicate = %triple.predicate, "non-IES {} property used", what);
            self.record(
                DiagnosticKind::NonOntologyPredicate,
                format!("non-IES {} property used: {}", what, triple.predicate),
            );
        }

        self.store.add_triple(&triple)
    }

    pub fn in_graph(&self, triple: &Triple) -> Result<bool> {
        self.store.in_graph(triple)
    }

    /// SELECT/ASK against the session graph, with the session prefixes declared
    pub fn query(&self, sparql: &str) -> Result<Vec<std::collections::HashMap<String, String>>> {
        self.store
            .query(&format!("{}{}", self.format_prefixes(), sparql))
    }

    pub fn serialize(&self, format: SerializationFormat) -> Result<String> {
        self.store.serialize(format)
    }

    pub fn triple_count(&self) -> Result<usize> {
        self.store.len()
    }

    // --- identity & construction ------------------------------------------

    /// Cached entity for `uri`, if one was built in this session
    pub fn get(&self, uri: &str) -> Option<Arc<Resource>> {
        self.cache.get(uri)
    }

    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    /// Most specific entity kind for a class list
    pub fn resolve_kind<S: AsRef<str>>(&self, classes: &[S]) -> Resolution<EntityKind> {
        self.hierarchy.resolve(classes)
    }

    /// Return the cached entity for `uri`, or build, register and type it
    ///
    /// A cache hit returns the existing entity unchanged and ignores
    /// `classes`. `classes` of `None` asserts the kind's canonical class;
    /// an empty list asserts `rdfs:Resource`.
    pub fn intern_or_construct(
        &mut self,
        kind: EntityKind,
        uri: Option<&str>,
        classes: Option<Vec<String>>,
    ) -> Result<Arc<Resource>> {
        self.intern(kind, uri, classes).map(|(resource, _)| resource)
    }

    /// As `intern_or_construct`, also reporting whether the entity is new
    pub(crate) fn intern(
        &mut self,
        kind: EntityKind,
        uri: Option<&str>,
        classes: Option<Vec<String>>,
    ) -> Result<(Arc<Resource>, bool)> {
        let uri = match uri {
            Some(uri) if !uri.is_empty() => uri.to_string(),
            _ => self.generate_uri(""),
        };

        if let Some(existing) = self.cache.get(&uri) {
            return Ok((existing, false));
        }

        let check = UriValidator::validate(&uri);
        if !check.valid {
            error!(uri = %uri, errors = ?check.errors, "Invalid URI");
            self.record(
                DiagnosticKind::InvalidUri,
                format!("Invalid URI: {} ({})", uri, check.errors.join("; ")),
            );
        }

        let mut classes = match classes {
            None => vec![kind.canonical_class()],
            Some(classes) if classes.is_empty() => vec![RDFS_RESOURCE.to_string()],
            Some(classes) => classes,
        };

        if !kind.accepts_multiple_classes() && classes.len() > 1 {
            warn!(%kind, count = classes.len(), "only one class allowed, using the first");
            self.record(
                DiagnosticKind::TooManyClasses,
                format!(
                    "{} takes one class, {} given for {}; using {}",
                    kind,
                    classes.len(),
                    uri,
                    classes[0]
                ),
            );
            classes.truncate(1);
        }

        for class in &classes {
            if !self.ontology.is_known_class(class) {
                warn!(class = %class, "class not in ontology");
                self.record(
                    DiagnosticKind::UnknownClass,
                    format!("class {} not in ontology", class),
                );
            }
        }

        // registered before any triple goes out, so re-entrant lookups see it
        let resource = self
            .cache
            .register(Arc::new(Resource::new(uri, kind, classes)));

        for class in resource.classes() {
            let triple = Triple::iri(resource.uri(), RDF_TYPE, class.as_str());
            match self.add_triple(triple) {
                Ok(_) => {}
                Err(e) if !check.valid => {
                    error!(uri = %resource.uri(), error = %e, "store rejected triple");
                    self.record(
                        DiagnosticKind::StoreRejected,
                        format!("type triple for {} rejected: {}", resource.uri(), e),
                    );
                }
                Err(e) => {
                    // an untyped entity must not be served from the cache
                    self.cache.remove(resource.uri());
                    return Err(e);
                }
            }
        }

        Ok((resource, true))
    }

    /// Instantiate one entity of the given ontology classes
    ///
    /// The most specific kind is resolved from `classes`; `None` or an empty
    /// list means `[rdfs:Resource]`. The classes are asserted as given.
    pub fn instantiate(
        &mut self,
        classes: Option<Vec<String>>,
        uri: Option<&str>,
        context: &str,
    ) -> Result<Arc<Resource>> {
        let classes = match classes {
            Some(classes) if !classes.is_empty() => classes,
            _ => vec![RDFS_RESOURCE.to_string()],
        };

        let Resolution { kind, .. } = self.hierarchy.resolve(&classes);

        let uri = match uri {
            Some(uri) if !uri.is_empty() => uri.to_string(),
            _ => self.generate_uri(context),
        };

        self.intern_or_construct(kind, Some(&uri), Some(classes))
    }

    /// Construct an entity of `kind`, applying its default triples when new
    ///
    /// Label and start/end bounding states are only written for a freshly
    /// built entity; a cache hit is returned as-is.
    pub fn create(&mut self, kind: EntityKind, options: EntityOptions) -> Result<Arc<Resource>> {
        let EntityOptions {
            uri,
            classes,
            start,
            end,
            label,
        } = options;

        let start = start.as_deref().map(validate_iso8601).transpose()?;
        let end = end.as_deref().map(validate_iso8601).transpose()?;

        let (resource, fresh) = self.intern(kind, uri.as_deref(), classes)?;
        if !fresh {
            return Ok(resource);
        }

        if let Some(label) = label {
            self.add_label(&resource, &label)?;
        }
        if let Some(start) = start {
            self.starts_in(&resource, &start, None, None)?;
        }
        if let Some(end) = end {
            self.ends_in(&resource, &end, None, None)?;
        }
        Ok(resource)
    }

    /// Construct an entity by kind name (case-insensitive)
    pub fn create_entity(&mut self, name: &str, options: EntityOptions) -> Result<Arc<Resource>> {
        let kind = EntityKind::from_name(name)
            .ok_or_else(|| IesError::UnknownEntityType(name.to_string()))?;
        self.create(kind, options)
    }

    /// Turn an entity or URI into a usable entity
    ///
    /// Entities pass through. A cached URI returns the cached entity with no
    /// kind check. An unseen URI gets a placeholder of `expected` (or the
    /// root kind) asserting only `rdfs:Resource`, and a warning naming
    /// `context`.
    pub fn resolve_reference(
        &mut self,
        reference: impl Into<Reference>,
        expected: Option<EntityKind>,
        context: &str,
    ) -> Result<Arc<Resource>> {
        match reference.into() {
            Reference::Resource(resource) => Ok(resource),
            Reference::Uri(uri) => {
                if let Some(existing) = self.cache.get(&uri) {
                    return Ok(existing);
                }

                let kind = expected.unwrap_or_else(EntityKind::root);
                warn!(
                    context,
                    uri = %uri,
                    %kind,
                    "String passed instead of object, assumed URI is defined elsewhere"
                );
                self.record(
                    DiagnosticKind::Placeholder,
                    format!(
                        "String passed instead of object in {} - assumed URI is defined elsewhere: {} - base class {} has been inferred",
                        context, uri, kind
                    ),
                );
                self.intern_or_construct(kind, Some(&uri), Some(Vec::new()))
            }
            Reference::Unsupported { type_name } => Err(IesError::InvalidArgument {
                type_name,
                context: context.to_string(),
            }),
        }
    }

    /// Register `class -> [superclass]` facts and rebuild the type hierarchy
    ///
    /// An index shared with other sessions is copied first, so they keep
    /// seeing the unchanged ontology.
    pub fn add_classes(&mut self, classes: &BTreeMap<String, Vec<String>>) {
        Arc::make_mut(&mut self.ontology).add_classes(classes);
        self.hierarchy.rebuild(&self.ontology);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token)
            .field("counter", &self.counter)
            .field("cached", &self.cache.len())
            .field("uri_stub", &self.uri_stub())
            .finish_non_exhaustive()
    }
}
