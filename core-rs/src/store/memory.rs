//! In-memory triple store backed by Oxigraph

use oxigraph::io::RdfFormat;
use oxigraph::model::{GraphName, GraphNameRef, Literal, NamedNode, Quad, Term};
use oxigraph::sparql::QueryResults;
use oxigraph::store::Store;
use std::collections::HashMap;
use tracing::debug;

use crate::errors::{IesError, Result};
use crate::store::{Object, SerializationFormat, Triple, TripleStore};

pub struct MemoryStore {
    store: Store,
}

impl MemoryStore {
    pub fn new() -> Result<Self> {
        Ok(Self {
            store: Store::new()?,
        })
    }

    fn quad(triple: &Triple) -> Result<Quad> {
        let subject = NamedNode::new(triple.subject.as_str())?;
        let predicate = NamedNode::new(triple.predicate.as_str())?;
        let object: Term = match &triple.object {
            Object::Iri(iri) => NamedNode::new(iri.as_str())?.into(),
            Object::Literal { value, datatype } => {
                Literal::new_typed_literal(value.as_str(), NamedNode::new(datatype.uri())?).into()
            }
        };
        Ok(Quad::new(subject, predicate, object, GraphName::DefaultGraph))
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

impl TripleStore for MemoryStore {
    fn add_triple(&mut self, triple: &Triple) -> Result<bool> {
        let quad = Self::quad(triple)?;
        let inserted = self.store.insert(&quad)?;
        debug!(%triple, inserted, "add_triple");
        Ok(inserted)
    }

    fn in_graph(&self, triple: &Triple) -> Result<bool> {
        let quad = Self::quad(triple)?;
        Ok(self.store.contains(&quad)?)
    }

    fn query(&self, sparql: &str) -> Result<Vec<HashMap<String, String>>> {
        let results = self
            .store
            .query(sparql)
            .map_err(|e| IesError::Store(e.to_string()))?;

        match results {
            QueryResults::Solutions(solutions) => {
                let mut rows = Vec::new();

                for solution in solutions {
                    let solution = solution.map_err(|e| IesError::Store(e.to_string()))?;

                    let mut row = HashMap::new();
                    for (var, term) in solution.iter() {
                        let value = match term {
                            Term::NamedNode(node) => node.as_str().to_string(),
                            Term::Literal(literal) => literal.value().to_string(),
                            other => other.to_string(),
                        };
                        row.insert(var.as_str().to_string(), value);
                    }
                    rows.push(row);
                }

                Ok(rows)
            }
            QueryResults::Boolean(result) => {
                let mut row = HashMap::new();
                row.insert("result".to_string(), result.to_string());
                Ok(vec![row])
            }
            QueryResults::Graph(_) => Err(IesError::Store(
                "graph queries are not supported, use serialize".to_string(),
            )),
        }
    }

    fn serialize(&self, format: SerializationFormat) -> Result<String> {
        let rdf_format = match format {
            SerializationFormat::NTriples => RdfFormat::NTriples,
            SerializationFormat::Turtle => RdfFormat::Turtle,
        };
        let bytes = self
            .store
            .dump_graph_to_writer(GraphNameRef::DefaultGraph, rdf_format, Vec::new())
            .map_err(|e| IesError::Store(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| IesError::Store(e.to_string()))
    }

    fn clear(&mut self) -> Result<()> {
        self.store.clear()?;
        Ok(())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.store.len()?)
    }
}
