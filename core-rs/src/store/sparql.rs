//! Remote SPARQL 1.1 endpoint store
//!
//! Writes are sent as SPARQL Update (`{host}{dataset}/update`), reads as
//! SPARQL Query (`{host}{dataset}/query`) with JSON results. The core does
//! not retry failed requests; errors surface to the caller as `IesError::Http`.

use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::{IesError, Result};
use crate::store::{SerializationFormat, Triple, TripleStore};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct SparqlJson {
    #[serde(default)]
    boolean: Option<bool>,
    #[serde(default)]
    results: Option<SparqlBindings>,
}

#[derive(Debug, Deserialize)]
struct SparqlBindings {
    bindings: Vec<HashMap<String, SparqlValue>>,
}

#[derive(Debug, Deserialize)]
struct SparqlValue {
    value: String,
}

#[derive(Debug, Clone)]
pub struct SparqlEndpointStore {
    client: Client,
    host: String,
    dataset: String,
    security_label: String,
}

impl SparqlEndpointStore {
    /// Build a store without contacting the endpoint
    pub fn new(host: &str, dataset: &str, security_label: &str) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            host: host.to_string(),
            dataset: dataset.to_string(),
            security_label: security_label.to_string(),
        })
    }

    /// Build a store and check the endpoint answers a trivial query
    pub fn connect(host: &str, dataset: &str, security_label: &str) -> Result<Self> {
        let store = Self::new(host, dataset, security_label)?;
        store
            .select("SELECT * WHERE { ?s ?p ?o } LIMIT 2")
            .map_err(|e| {
                IesError::Configuration(format!(
                    "could not connect to SPARQL endpoint at {}: {}",
                    host, e
                ))
            })?;
        info!(host, dataset, "connected to SPARQL endpoint");
        Ok(store)
    }

    pub fn update_url(&self) -> String {
        format!("{}{}/update", self.host, self.dataset)
    }

    pub fn query_url(&self) -> String {
        format!("{}{}/query", self.host, self.dataset)
    }

    /// POST a SPARQL Update
    pub fn update(&self, update: &str) -> Result<()> {
        debug!(url = %self.update_url(), update, "sparql update");
        self.client
            .post(self.update_url())
            .header("Accept", "*/*")
            .header("Security-Label", self.security_label.as_str())
            .header("Content-Type", "application/sparql-update")
            .body(update.to_string())
            .send()?
            .error_for_status()?;
        Ok(())
    }

    fn select(&self, query: &str) -> Result<SparqlJson> {
        let response = self
            .client
            .get(self.query_url())
            .query(&[("query", query)])
            .header("Accept", "application/sparql-results+json")
            .send()?
            .error_for_status()?;
        Ok(response.json::<SparqlJson>()?)
    }
}

/// `INSERT DATA { ... }` for one triple
pub fn insert_data(triple: &Triple) -> String {
    format!("INSERT DATA {{ {} . }}", triple.to_sparql())
}

/// `ASK { ... }` for one triple
pub fn ask_triple(triple: &Triple) -> String {
    format!("ASK {{ {} . }}", triple.to_sparql())
}

pub const CLEAR_ALL: &str = "DELETE {?s ?p ?o .} WHERE {?s ?p ?o .}";

fn rows(json: SparqlJson) -> Vec<HashMap<String, String>> {
    if let Some(result) = json.boolean {
        let mut row = HashMap::new();
        row.insert("result".to_string(), result.to_string());
        return vec![row];
    }
    json.results
        .map(|r| {
            r.bindings
                .into_iter()
                .map(|binding| binding.into_iter().map(|(k, v)| (k, v.value)).collect())
                .collect()
        })
        .unwrap_or_default()
}

impl TripleStore for SparqlEndpointStore {
    fn add_triple(&mut self, triple: &Triple) -> Result<bool> {
        // the endpoint does not report whether the fact was new
        self.update(&insert_data(triple))?;
        Ok(true)
    }

    fn in_graph(&self, triple: &Triple) -> Result<bool> {
        Ok(self.select(&ask_triple(triple))?.boolean.unwrap_or(false))
    }

    fn query(&self, sparql: &str) -> Result<Vec<HashMap<String, String>>> {
        Ok(rows(self.select(sparql)?))
    }

    fn serialize(&self, format: SerializationFormat) -> Result<String> {
        let body = self
            .client
            .get(self.query_url())
            .query(&[("query", "CONSTRUCT { ?s ?p ?o } WHERE { ?s ?p ?o }")])
            .header("Accept", format.media_type())
            .send()?
            .error_for_status()?
            .text()?;
        Ok(body)
    }

    fn clear(&mut self) -> Result<()> {
        self.update(CLEAR_ALL)
    }

    fn len(&self) -> Result<usize> {
        let rows = rows(self.select("SELECT (COUNT(*) AS ?n) WHERE { ?s ?p ?o }")?);
        rows.first()
            .and_then(|row| row.get("n"))
            .ok_or_else(|| IesError::Store("count query returned no rows".to_string()))?
            .parse::<usize>()
            .map_err(|e| IesError::Store(format!("bad count from endpoint: {}", e)))
    }
}
