/**
 * ontology module
 *
 * - vocab: namespace and term constants, default prefix table
 * - index: Ontology Index (classes, properties, rdfs:subClassOf closure)
 *
 * ies4_core.ttl is the IES core subset embedded in the crate and used
 * when no ontology file is configured.
 */

pub mod index;
pub mod vocab;

// Ontology Index (loads Turtle with Oxigraph)
pub use index::{OntologyIndex, EMBEDDED_IES_CORE};

pub use vocab::{ies, IES_BASE};
