/**
 * config.rs
 * Session configuration (YAML format)
 *
 * Format:
 * ```yaml
 * uriStub: http://example.com/rdf/testdata#
 * ontology:
 *   path: ./ies4.ttl
 * store:
 *   mode: sparqlEndpoint
 *   host: http://localhost:3030/
 *   dataset: ds
 *   securityLabel: ""
 * prefixes:
 *   "data:": http://telicent.io/data#
 * ```
 *
 * Every key is optional. A missing ontology path selects the embedded
 * IES core ontology; a missing store selects the in-memory store.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{IesError, Result};
use crate::uri::UriValidator;

pub const DEFAULT_URI_STUB: &str = "http://example.com/rdf/testdata#";
pub const DEFAULT_SPARQL_HOST: &str = "http://localhost:3030/";
pub const DEFAULT_SPARQL_DATASET: &str = "ds";

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Namespace used when minting data URIs
    pub uri_stub: String,
    pub ontology: OntologySource,
    pub store: StoreConfig,
    /// Extra prefixes merged over the defaults
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub prefixes: BTreeMap<String, String>,
}

/// Where the ontology is loaded from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OntologySource {
    /// Turtle file; `None` selects the embedded IES core ontology
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Triple store selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum StoreConfig {
    Memory,
    #[serde(rename_all = "camelCase")]
    SparqlEndpoint {
        #[serde(default = "default_sparql_host")]
        host: String,
        #[serde(default = "default_sparql_dataset")]
        dataset: String,
        #[serde(default)]
        security_label: String,
    },
}

fn default_sparql_host() -> String {
    DEFAULT_SPARQL_HOST.to_string()
}

fn default_sparql_dataset() -> String {
    DEFAULT_SPARQL_DATASET.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Memory
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            uri_stub: DEFAULT_URI_STUB.to_string(),
            ontology: OntologySource::default(),
            store: StoreConfig::default(),
            prefixes: BTreeMap::new(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from a YAML file
    ///
    /// # Example
    /// ```no_run
    /// # use ies_core::SessionConfig;
    /// let config = SessionConfig::load("ies.yaml")?;
    /// # Ok::<(), ies_core::IesError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(IesError::Configuration(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: SessionConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// Ensures:
    /// - uriStub is a non-empty absolute URI
    /// - sparql host and dataset are non-empty when that store is selected
    pub fn validate(&self) -> Result<()> {
        if self.uri_stub.is_empty() {
            return Err(IesError::Configuration(
                "uriStub cannot be empty".to_string(),
            ));
        }

        let stub_check = UriValidator::validate(&self.uri_stub);
        if !stub_check.valid {
            return Err(IesError::Configuration(format!(
                "uriStub is not a valid URI: {}",
                stub_check.errors.join("; ")
            )));
        }

        if let StoreConfig::SparqlEndpoint { host, dataset, .. } = &self.store {
            if host.is_empty() {
                return Err(IesError::Configuration(
                    "store.host cannot be empty".to_string(),
                ));
            }
            if dataset.is_empty() {
                return Err(IesError::Configuration(
                    "store.dataset cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Save configuration as YAML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path.as_ref(), yaml)?;
        Ok(())
    }
}
