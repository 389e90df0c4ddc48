/**
 * index.rs
 * Read-mostly class/property index over an RDF ontology
 *
 * The ontology text is parsed once into an Oxigraph store, the facts the
 * entity layer needs are pulled out with SPARQL, and the store is dropped.
 * Subclass closures are computed on demand by BFS over the inverted
 * subClassOf relation and memoised until `add_classes` changes the graph.
 */

use oxigraph::io::RdfFormat;
use oxigraph::model::Term;
use oxigraph::sparql::QueryResults;
use oxigraph::store::Store;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

use crate::config::OntologySource;
use crate::errors::{IesError, Result};
use crate::ontology::vocab::{
    self, OWL_CLASS, OWL_DATATYPE_PROPERTY, OWL_OBJECT_PROPERTY, RDFS_CLASS, RDFS_COMMENT,
    RDFS_LABEL, RDFS_RESOURCE, RDFS_SUB_CLASS_OF, RDFS_SUB_PROPERTY_OF, RDF_PROPERTY, RDF_TYPE,
    TELICENT_PRIMARY_NAME,
};

/// IES core subset shipped with the crate
pub const EMBEDDED_IES_CORE: &str = include_str!("ies4_core.ttl");

pub struct OntologyIndex {
    classes: HashSet<String>,
    properties: HashSet<String>,
    datatype_properties: HashSet<String>,
    object_properties: HashSet<String>,
    /// child -> direct parents
    superclasses: HashMap<String, BTreeSet<String>>,
    /// parent -> direct children
    subclasses: HashMap<String, BTreeSet<String>>,
    closures: RwLock<HashMap<String, Arc<BTreeSet<String>>>>,
}

impl OntologyIndex {
    fn empty() -> Self {
        let mut index = Self {
            classes: HashSet::new(),
            properties: HashSet::new(),
            datatype_properties: HashSet::new(),
            object_properties: HashSet::new(),
            superclasses: HashMap::new(),
            subclasses: HashMap::new(),
            closures: RwLock::new(HashMap::new()),
        };

        for class in [RDFS_CLASS, RDFS_RESOURCE, RDF_PROPERTY, OWL_CLASS] {
            index.classes.insert(class.to_string());
        }
        for prop in [RDF_TYPE, RDFS_SUB_CLASS_OF, RDFS_SUB_PROPERTY_OF] {
            index.object_properties.insert(prop.to_string());
        }
        for prop in [RDFS_LABEL, RDFS_COMMENT, TELICENT_PRIMARY_NAME] {
            index.datatype_properties.insert(prop.to_string());
        }
        index
    }

    /// Index built from the embedded IES core ontology
    pub fn embedded() -> Result<Self> {
        Self::parse(EMBEDDED_IES_CORE, RdfFormat::Turtle)
    }

    /// Index built from Turtle text
    pub fn from_turtle(content: &str) -> Result<Self> {
        Self::parse(content, RdfFormat::Turtle)
    }

    /// Load an ontology file; the RDF syntax is picked from the extension
    /// (Turtle when the extension is missing or unrecognised)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(IesError::OntologyLoad(format!(
                "ontology not found: {}",
                path.display()
            )));
        }

        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(RdfFormat::from_extension)
            .unwrap_or(RdfFormat::Turtle);

        info!(path = %path.display(), ?format, "loading ontology");
        let content = fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Index selected by session configuration
    pub fn from_source(source: &OntologySource) -> Result<Self> {
        match &source.path {
            Some(path) => Self::load(path),
            None => Self::embedded(),
        }
    }

    /// Index built directly from `class -> [superclass]` facts
    ///
    /// Every key and every superclass becomes a known class.
    pub fn from_subclass_map(map: &BTreeMap<String, Vec<String>>) -> Self {
        let mut index = Self::empty();
        index.merge_subclass_facts(map);
        index
    }

    fn parse(content: &str, format: RdfFormat) -> Result<Self> {
        let store = Store::new().map_err(|e| IesError::OntologyLoad(e.to_string()))?;
        store
            .load_from_reader(format, content.as_bytes())
            .map_err(|e| IesError::OntologyLoad(e.to_string()))?;

        let mut index = Self::empty();

        index.classes.extend(select_iris(
            &store,
            &format!("SELECT ?c WHERE {{ {{ ?c a <{}> }} UNION {{ ?c a <{}> }} }}", RDFS_CLASS, OWL_CLASS),
            "c",
        )?);
        index.properties.extend(select_iris(
            &store,
            &format!("SELECT ?p WHERE {{ ?p a <{}> }}", RDF_PROPERTY),
            "p",
        )?);
        index.datatype_properties.extend(select_iris(
            &store,
            &format!("SELECT ?p WHERE {{ ?p a <{}> }}", OWL_DATATYPE_PROPERTY),
            "p",
        )?);
        index.object_properties.extend(select_iris(
            &store,
            &format!("SELECT ?p WHERE {{ ?p a <{}> }}", OWL_OBJECT_PROPERTY),
            "p",
        )?);

        let mut facts: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (child, parent) in select_iri_pairs(
            &store,
            &format!("SELECT ?c ?p WHERE {{ ?c <{}> ?p }}", RDFS_SUB_CLASS_OF),
            "c",
            "p",
        )? {
            facts.entry(child).or_default().push(parent);
        }
        for (child, parents) in &facts {
            index.link(child, parents);
        }

        let dt = index.datatype_properties.clone();
        let obj = index.object_properties.clone();
        index.properties.extend(dt);
        index.properties.extend(obj);

        info!(
            classes = index.classes.len(),
            properties = index.properties.len(),
            "ontology index ready"
        );
        Ok(index)
    }

    fn link(&mut self, child: &str, parents: &[String]) {
        for parent in parents {
            self.superclasses
                .entry(child.to_string())
                .or_default()
                .insert(parent.clone());
            self.subclasses
                .entry(parent.clone())
                .or_default()
                .insert(child.to_string());
        }
    }

    fn merge_subclass_facts(&mut self, map: &BTreeMap<String, Vec<String>>) {
        for (class, parents) in map {
            self.classes.insert(class.clone());
            self.classes.extend(parents.iter().cloned());
            self.link(class, parents);
        }
    }

    /// All known classes that are `class_uri` or a transitive subclass of it
    ///
    /// Always contains `class_uri`. An unknown class is logged and yields a
    /// closure computed from whatever subClassOf facts mention it.
    pub fn subclass_closure(&self, class_uri: &str) -> Arc<BTreeSet<String>> {
        if let Ok(cache) = self.closures.read() {
            if let Some(hit) = cache.get(class_uri) {
                return Arc::clone(hit);
            }
        }

        if !self.classes.contains(class_uri) {
            warn!(class = class_uri, "class not in ontology");
        }

        let closure = Arc::new(self.compute_closure(class_uri));
        if let Ok(mut cache) = self.closures.write() {
            cache.insert(class_uri.to_string(), Arc::clone(&closure));
        }
        closure
    }

    fn compute_closure(&self, root: &str) -> BTreeSet<String> {
        let mut closure = BTreeSet::new();
        let mut queue = VecDeque::new();

        closure.insert(root.to_string());
        queue.push_back(root.to_string());

        // `closure` doubles as the visited set, so cycles terminate
        while let Some(current) = queue.pop_front() {
            if let Some(children) = self.subclasses.get(&current) {
                for child in children {
                    if closure.insert(child.clone()) {
                        queue.push_back(child.clone());
                    }
                }
            }
        }
        closure
    }

    /// Merge `class -> [superclass]` facts and drop memoised closures
    ///
    /// The type hierarchy must be rebuilt afterwards for the new classes to
    /// take part in resolution.
    pub fn add_classes(&mut self, map: &BTreeMap<String, Vec<String>>) {
        self.merge_subclass_facts(map);
        match self.closures.get_mut() {
            Ok(cache) => cache.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
        info!(added = map.len(), "classes registered");
    }

    pub fn is_known_class(&self, uri: &str) -> bool {
        self.classes.contains(uri)
    }

    pub fn is_known_property(&self, uri: &str) -> bool {
        self.properties.contains(uri)
    }

    pub fn is_known_datatype_property(&self, uri: &str) -> bool {
        self.datatype_properties.contains(uri)
    }

    pub fn is_known_object_property(&self, uri: &str) -> bool {
        self.object_properties.contains(uri)
    }

    /// Direct superclasses of a class, sorted
    pub fn superclasses_of(&self, uri: &str) -> Vec<String> {
        self.superclasses
            .get(uri)
            .map(|parents| parents.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Full URI for a short IES class name, warning when it is not known
    pub fn ies_class(&self, short_name: &str) -> String {
        let uri = vocab::ies(short_name);
        if !self.is_known_class(&uri) {
            warn!(class = short_name, "class not in IES ontology");
        }
        uri
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

impl Clone for OntologyIndex {
    fn clone(&self) -> Self {
        Self {
            classes: self.classes.clone(),
            properties: self.properties.clone(),
            datatype_properties: self.datatype_properties.clone(),
            object_properties: self.object_properties.clone(),
            superclasses: self.superclasses.clone(),
            subclasses: self.subclasses.clone(),
            closures: RwLock::new(HashMap::new()),
        }
    }
}

impl std::fmt::Debug for OntologyIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OntologyIndex")
            .field("classes", &self.classes.len())
            .field("properties", &self.properties.len())
            .finish()
    }
}

fn select_rows(store: &Store, query: &str) -> Result<Vec<HashMap<String, Term>>> {
    let results = store
        .query(query)
        .map_err(|e| IesError::OntologyQuery(e.to_string()))?;

    match results {
        QueryResults::Solutions(solutions) => {
            let mut rows = Vec::new();
            for solution in solutions {
                let solution = solution.map_err(|e| IesError::OntologyQuery(e.to_string()))?;
                let mut row = HashMap::new();
                for (var, term) in solution.iter() {
                    row.insert(var.as_str().to_string(), term.clone());
                }
                rows.push(row);
            }
            Ok(rows)
        }
        _ => Err(IesError::OntologyQuery(
            "expected a SELECT query".to_string(),
        )),
    }
}

fn iri_of(term: Option<&Term>) -> Option<String> {
    match term {
        Some(Term::NamedNode(node)) => Some(node.as_str().to_string()),
        _ => None,
    }
}

fn select_iris(store: &Store, query: &str, var: &str) -> Result<BTreeSet<String>> {
    let rows = select_rows(store, query)?;
    debug!(var, rows = rows.len(), "ontology query");
    Ok(rows.iter().filter_map(|row| iri_of(row.get(var))).collect())
}

fn select_iri_pairs(store: &Store, query: &str, a: &str, b: &str) -> Result<Vec<(String, String)>> {
    Ok(select_rows(store, query)?
        .iter()
        .filter_map(|row| Some((iri_of(row.get(a))?, iri_of(row.get(b))?)))
        .collect())
}
