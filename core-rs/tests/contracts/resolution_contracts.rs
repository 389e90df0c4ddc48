// Resolution Contract Tests
//
// These tests verify how ontology classes are mapped onto constructable kinds.
//
// **Problem**: resolution "optimised" to first match instead of deepest match
// **Solution**: contract tests that pin the most specific kind for known classes

use ies_core::ontology::vocab::{ies, RDFS_RESOURCE};
use ies_core::{EntityKind, LatticeType, OntologyIndex, Session, TypeHierarchy};
use std::collections::BTreeMap;

/// WHY: Resolution always returns the deepest kind covering a requested class
/// REASON: A PhoneCall is also an Event and an Element; Communication is the most specific
/// BREAKS: Entities losing the helpers of their most specific kind
#[test]
fn deepest_cover_wins() {
    let hierarchy: TypeHierarchy = TypeHierarchy::build(&OntologyIndex::embedded().unwrap());

    let resolution = hierarchy.resolve(&[ies("PhoneCall")]);
    assert_eq!(resolution.kind, EntityKind::Communication);
    assert_eq!(resolution.level, hierarchy.level_of(EntityKind::Communication).unwrap());

    assert_eq!(hierarchy.resolve(&[ies("Building")]).kind, EntityKind::Location);
    assert_eq!(hierarchy.resolve(&[ies("Employee")]).kind, EntityKind::State);
}

/// WHY: Empty and unknown class lists resolve to the lattice root
/// REASON: Construction must always have a kind to build
/// BREAKS: Callers passing unknown classes getting an error instead of a resource
#[test]
fn no_match_is_root() {
    let hierarchy: TypeHierarchy = TypeHierarchy::build(&OntologyIndex::embedded().unwrap());
    let empty: [&str; 0] = [];

    assert_eq!(hierarchy.resolve(&empty).kind, EntityKind::root());
    assert_eq!(hierarchy.resolve(&empty).level, 0);
    assert_eq!(
        hierarchy.resolve(&["http://example.com/ont#Unicorn"]).kind,
        EntityKind::RdfsResource
    );
    assert_eq!(hierarchy.resolve(&[RDFS_RESOURCE]).kind, EntityKind::RdfsResource);
}

/// WHY: The subclass closure is reflexive and transitive
/// REASON: A kind covers its own class and every class below it at any depth
/// BREAKS: Exact-class requests falling through to a shallower kind
#[test]
fn closure_reflexive_and_transitive() {
    let index = OntologyIndex::embedded().unwrap();

    let entity = index.subclass_closure(&ies("Entity"));
    assert!(entity.contains(&ies("Entity")));
    assert!(entity.contains(&ies("Person")));
    assert!(entity.contains(&ies("MobileHandset")));

    let person = index.subclass_closure(&ies("Person"));
    assert!(!person.contains(&ies("Organisation")));
}

/// WHY: A multiply-derived kind appears once, at its deepest level
/// REASON: Device is both an Asset and a DeviceState; both paths reach level 5
/// BREAKS: Duplicate entries and order-dependent resolution for devices
#[test]
fn multiply_derived_kind_placed_once() {
    let hierarchy: TypeHierarchy = TypeHierarchy::build(&OntologyIndex::embedded().unwrap());

    let device_level = hierarchy.level_of(EntityKind::Device).unwrap();
    assert!(device_level > hierarchy.level_of(EntityKind::Asset).unwrap());
    assert!(device_level > hierarchy.level_of(EntityKind::DeviceState).unwrap());

    let placements: usize = (0..=hierarchy.depth())
        .map(|level| {
            hierarchy
                .entries_at(level)
                .filter(|e| e.kind == EntityKind::Device)
                .count()
        })
        .sum();
    assert_eq!(placements, 1);
    assert_eq!(hierarchy.len(), EntityKind::all().len());

    assert_eq!(hierarchy.resolve(&[ies("MobileHandset")]).kind, EntityKind::Device);
    assert_eq!(hierarchy.resolve(&[ies("DeviceState")]).kind, EntityKind::DeviceState);
}

/// WHY: Ties within a level are broken by ascending class URI
/// REASON: Resolution must not depend on hash or insertion order
/// BREAKS: The same data resolving differently between runs
#[test]
fn same_level_ties_break_by_uri() {
    let hierarchy: TypeHierarchy = TypeHierarchy::build(&OntologyIndex::embedded().unwrap());

    let forward = hierarchy.resolve(&[ies("Person"), ies("Organisation")]);
    let backward = hierarchy.resolve(&[ies("Organisation"), ies("Person")]);

    assert_eq!(forward, backward);
    assert_eq!(forward.kind, EntityKind::Organisation);
}

/// WHY: Registering classes takes effect only after the hierarchy is rebuilt
/// REASON: Closures are cached in the index and the leveled map
/// BREAKS: Newly registered subclasses resolving to the root
#[test]
fn registered_classes_resolve_after_rebuild() {
    let mut session = Session::in_memory().unwrap();
    let smart_meter = "http://example.com/ont#SmartMeter".to_string();

    let before = session
        .instantiate(Some(vec![smart_meter.clone()]), None, "_meter")
        .unwrap();
    assert_eq!(before.kind(), EntityKind::RdfsResource);

    let mut classes = BTreeMap::new();
    classes.insert(smart_meter.clone(), vec![ies("Device")]);
    session.add_classes(&classes);

    let after = session
        .instantiate(Some(vec![smart_meter.clone()]), None, "_meter")
        .unwrap();
    assert_eq!(after.kind(), EntityKind::Device);
    assert_eq!(after.classes(), &[smart_meter]);
}

/// WHY: A session's registrations do not leak into an index it shares
/// REASON: The index is copied on write when other sessions hold it
/// BREAKS: One caller's extension classes changing another's resolution
#[test]
fn shared_index_copied_on_write() {
    use ies_core::{MemoryStore, SessionConfig};
    use std::sync::Arc;

    let index = Arc::new(OntologyIndex::embedded().unwrap());
    let config = SessionConfig::default();
    let mut a = Session::with_parts(Arc::clone(&index), Box::new(MemoryStore::new().unwrap()), &config);
    let b = Session::with_parts(Arc::clone(&index), Box::new(MemoryStore::new().unwrap()), &config);

    let mut classes = BTreeMap::new();
    classes.insert("http://example.com/ont#Drone".to_string(), vec![ies("Device")]);
    a.add_classes(&classes);

    assert!(a.ontology().is_known_class("http://example.com/ont#Drone"));
    assert!(!b.ontology().is_known_class("http://example.com/ont#Drone"));
    assert!(!index.is_known_class("http://example.com/ont#Drone"));
}
