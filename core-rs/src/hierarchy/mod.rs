/**
 * hierarchy module
 *
 * - kind: static lattice of constructable entity kinds (EntityKind)
 * - map: leveled type hierarchy built over the ontology index
 * - resolver: deepest-first base class resolution
 */

pub mod kind;
pub mod map;
pub mod resolver;

pub use kind::{EntityKind, LatticeType};
pub use map::{HierarchyEntry, TypeHierarchy};
pub use resolver::Resolution;
