//! Integration tests for complete session workflows
//!
//! Tests building a small graph end to end including:
//! - Entity construction by kind and by class list
//! - Cross-references by entity and by URI
//! - Periods and bounding states
//! - Serialization and querying

use ies_core::ontology::vocab::{ies, RDFS_LABEL, RDF_TYPE};
use ies_core::{
    parse_class_list, DiagnosticKind, EntityKind, EntityOptions, LiteralType,
    ParticipationOptions, SerializationFormat, Session, Triple,
};
use serde_json::json;
use std::sync::Arc;

const DATA: &str = "http://example.com/rdf/testdata#";

#[test]
fn test_person_works_for_organisation_built_later() {
    let mut session = Session::in_memory().unwrap();
    let acme_uri = format!("{}acme", DATA);

    // 1. Reference the employer by URI before it exists
    let fred = session
        .create(EntityKind::Person, EntityOptions::default().labelled("Fred"))
        .unwrap();
    let employment = session
        .works_for(&fred, acme_uri.as_str(), Some("2018-05-01"), None)
        .unwrap();

    // 2. Build the employer with the same URI - the placeholder is returned
    let acme = session
        .create(
            EntityKind::Organisation,
            EntityOptions::default().with_uri(&acme_uri).labelled("ACME"),
        )
        .unwrap();
    assert!(Arc::ptr_eq(&acme, &session.get(&acme_uri).unwrap()));
    assert_eq!(acme.kind(), EntityKind::ResponsibleActor);

    // 3. Graph holds the employment chain
    assert!(session
        .in_graph(&Triple::iri(employment.uri(), ies("worksFor"), acme_uri.as_str()))
        .unwrap());
    assert!(session
        .in_graph(&Triple::iri(employment.uri(), ies("isStateOf"), fred.uri()))
        .unwrap());

    let rows = session
        .query(&format!(
            "SELECT ?start WHERE {{ ?start ies:isStartOf <{}> ; ies:inPeriod ?p . ?p ies:iso8601PeriodRepresentation \"2018-05-01\" }}",
            employment.uri()
        ))
        .unwrap();
    assert_eq!(rows.len(), 1);

    // Placeholder was a cache hit on create, so no ACME label was written
    assert!(!session
        .in_graph(&Triple::literal(acme_uri.as_str(), RDFS_LABEL, "ACME", LiteralType::String))
        .unwrap());
}

#[test]
fn test_organisation_first_then_reference() {
    let mut session = Session::in_memory().unwrap();
    let acme = session
        .create(EntityKind::Organisation, EntityOptions::default().labelled("ACME"))
        .unwrap();
    let fred = session.create(EntityKind::Person, EntityOptions::default()).unwrap();

    let employment = session.works_for(&fred, acme.uri(), None, None).unwrap();

    assert!(session
        .in_graph(&Triple::iri(employment.uri(), ies("worksFor"), acme.uri()))
        .unwrap());
    assert!(session
        .diagnostics()
        .iter()
        .all(|d| d.kind != DiagnosticKind::Placeholder));
    assert_eq!(session.cached_count(), 3);
}

#[test]
fn test_phone_call_with_participants() {
    let mut session = Session::in_memory().unwrap();

    let classes = parse_class_list(&json!([ies("PhoneCall")])).unwrap();
    let call = session.instantiate(classes, None, "_call").unwrap();
    assert_eq!(call.kind(), EntityKind::Communication);

    let handset = session
        .instantiate(Some(vec![ies("MobileHandset")]), None, "_handset")
        .unwrap();
    assert_eq!(handset.kind(), EntityKind::Device);

    let caller = session.create(EntityKind::Person, EntityOptions::default()).unwrap();
    session.user_of(&caller, &handset, Some("2020-01-01"), None).unwrap();

    let participation = session
        .add_participant(
            &call,
            &handset,
            ParticipationOptions {
                start: Some("2023-03-01T10:15:00".to_string()),
                ..ParticipationOptions::default()
            },
        )
        .unwrap();

    assert_eq!(participation.kind(), EntityKind::EventParticipant);
    assert!(session
        .in_graph(&Triple::iri(
            participation.uri(),
            RDF_TYPE,
            ies("EventParticipant")
        ))
        .unwrap());
    assert!(session
        .in_graph(&Triple::iri(
            participation.uri(),
            ies("isParticipationOf"),
            handset.uri()
        ))
        .unwrap());
    assert!(session
        .diagnostics()
        .iter()
        .all(|d| d.kind != DiagnosticKind::UnknownClass));
}

#[test]
fn test_serialize_ntriples() {
    let mut session = Session::in_memory().unwrap();
    let uri = format!("{}p1", DATA);
    session
        .create(
            EntityKind::Person,
            EntityOptions::default().with_uri(&uri).labelled("Fred"),
        )
        .unwrap();

    let nt = session.serialize(SerializationFormat::NTriples).unwrap();
    assert!(nt.contains(&format!("<{}> <{}> <{}> .", uri, RDF_TYPE, ies("Person"))));
    assert!(nt.contains("\"Fred\""));
    assert_eq!(nt.lines().filter(|l| !l.trim().is_empty()).count(), 2);
}

#[test]
fn test_create_entity_by_name_with_classes() {
    let mut session = Session::in_memory().unwrap();
    let vehicle = session
        .create_entity(
            "asset",
            EntityOptions::default().with_classes([ies("Vehicle")]),
        )
        .unwrap();

    assert_eq!(vehicle.kind(), EntityKind::Asset);
    assert_eq!(vehicle.classes(), &[ies("Vehicle")]);
    assert!(!session
        .in_graph(&Triple::iri(vehicle.uri(), RDF_TYPE, ies("Asset")))
        .unwrap());
}

#[test]
fn test_clear_restarts_graph() {
    let mut session = Session::in_memory().unwrap();
    let person = session.create(EntityKind::Person, EntityOptions::default()).unwrap();
    session.works_for(&person, "http://example.com/orgs#x", None, None).unwrap();
    assert!(!session.diagnostics().is_empty());

    session.clear().unwrap();

    assert_eq!(session.triple_count().unwrap(), 0);
    assert_eq!(session.cached_count(), 0);
    assert!(session.diagnostics().is_empty());
    assert!(session.get(person.uri()).is_none());
}
