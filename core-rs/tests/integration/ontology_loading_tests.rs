//! Integration tests for ontology and configuration loading
//!
//! Tests sessions built from on-disk inputs including:
//! - Custom Turtle ontologies
//! - YAML session configuration
//! - Load failures

use ies_core::ontology::vocab::ies;
use ies_core::{
    EntityKind, EntityOptions, IesError, OntologyIndex, Session, SessionConfig, TypeHierarchy,
};
use std::fs;
use tempfile::TempDir;

const EXTENDED_ONTOLOGY: &str = r#"
@prefix ies: <http://ies.data.gov.uk/ontology/ies4#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix ext: <http://example.com/ext#> .

ies:ExchangedItem a rdfs:Class .
ies:Element a rdfs:Class ; rdfs:subClassOf ies:ExchangedItem .
ies:Entity a rdfs:Class ; rdfs:subClassOf ies:Element .
ies:Asset a rdfs:Class ; rdfs:subClassOf ies:Entity .
ies:ResponsibleActor a rdfs:Class ; rdfs:subClassOf ies:Entity .
ies:Person a rdfs:Class ; rdfs:subClassOf ies:ResponsibleActor .

ext:Astronaut a owl:Class ; rdfs:subClassOf ies:Person .
ext:Rover a rdfs:Class ; rdfs:subClassOf ies:Asset .

ext:callsign a owl:DatatypeProperty .
ext:pilots a owl:ObjectProperty .
"#;

fn write_ontology(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_session_from_yaml_with_custom_ontology() {
    let temp_dir = TempDir::new().unwrap();
    let ontology = write_ontology(&temp_dir, "ext.ttl", EXTENDED_ONTOLOGY);

    // 1. Write the config pointing at the ontology
    let yaml = format!(
        "uriStub: http://example.com/missions#\nontology:\n  path: {}\nprefixes:\n  ext: http://example.com/ext#\n",
        ontology.display()
    );
    let config_path = temp_dir.path().join("ies.yaml");
    fs::write(&config_path, yaml).unwrap();

    // 2. Build the session
    let config = SessionConfig::load(&config_path).unwrap();
    let mut session = Session::new(config).unwrap();
    assert_eq!(session.uri_stub(), "http://example.com/missions#");
    assert_eq!(session.prefix("ext:"), Some("http://example.com/ext#"));

    // 3. Extension classes resolve through the loaded closure
    let astronaut = session
        .instantiate(Some(vec!["http://example.com/ext#Astronaut".to_string()]), None, "_crew")
        .unwrap();
    assert_eq!(astronaut.kind(), EntityKind::Person);
    assert!(astronaut.uri().starts_with("http://example.com/missions#"));

    let rover = session
        .instantiate(Some(vec!["http://example.com/ext#Rover".to_string()]), None, "")
        .unwrap();
    assert_eq!(rover.kind(), EntityKind::Asset);

    // 4. Query with the configured prefix
    let rows = session.query("SELECT ?a WHERE { ?a a ext:Astronaut }").unwrap();
    assert_eq!(rows.len(), 1);
    assert!(session.diagnostics().is_empty());
}

#[test]
fn test_custom_ontology_properties() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_ontology(&temp_dir, "ext.ttl", EXTENDED_ONTOLOGY);
    let index = OntologyIndex::load(&path).unwrap();

    assert!(index.is_known_class("http://example.com/ext#Astronaut"));
    assert!(index.is_known_datatype_property("http://example.com/ext#callsign"));
    assert!(index.is_known_object_property("http://example.com/ext#pilots"));
    assert!(index.is_known_property("http://example.com/ext#pilots"));
    assert!(!index.is_known_class(&ies("Device")));
}

#[test]
fn test_kinds_without_classes_still_mapped() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_ontology(&temp_dir, "ext.ttl", EXTENDED_ONTOLOGY);
    let hierarchy: TypeHierarchy = TypeHierarchy::build(&OntologyIndex::load(&path).unwrap());

    // Device is not in this ontology; its closure is just its own class
    let device = hierarchy.entry_for(EntityKind::Device).unwrap();
    assert_eq!(device.covered.len(), 1);
    assert_eq!(hierarchy.resolve(&[ies("Device")]).kind, EntityKind::Device);
}

#[test]
fn test_unknown_class_in_custom_ontology_is_diagnosed() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_ontology(&temp_dir, "ext.ttl", EXTENDED_ONTOLOGY);

    let mut config = SessionConfig::default();
    config.ontology.path = Some(path);
    let mut session = Session::new(config).unwrap();

    session
        .create(EntityKind::Event, EntityOptions::default())
        .unwrap();
    assert!(session
        .diagnostics()
        .iter()
        .any(|d| d.message.contains("Event")));
}

#[test]
fn test_malformed_ontology_fails_session() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_ontology(&temp_dir, "broken.ttl", "ies:Person a rdfs:Class");

    let mut config = SessionConfig::default();
    config.ontology.path = Some(path);

    let result = Session::new(config);
    assert!(matches!(result, Err(IesError::OntologyLoad(_))));
}

#[test]
fn test_missing_ontology_fails_session() {
    let mut config = SessionConfig::default();
    config.ontology.path = Some("/nonexistent/ies4.ttl".into());

    let result = Session::new(config);
    assert!(matches!(result, Err(IesError::OntologyLoad(_))));
}

#[test]
fn test_invalid_config_fails_session() {
    let config = SessionConfig {
        uri_stub: String::new(),
        ..SessionConfig::default()
    };
    assert!(matches!(Session::new(config), Err(IesError::Configuration(_))));
}

#[test]
fn test_config_round_trip_through_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ies.yaml");

    let mut config = SessionConfig::default();
    config.uri_stub = "http://telicent.io/data#".to_string();
    config.save(&path).unwrap();

    let session = Session::new(SessionConfig::load(&path).unwrap()).unwrap();
    assert_eq!(session.uri_stub(), "http://telicent.io/data#");
}
