//! Namespaces and well-known terms

pub const IES_BASE: &str = "http://ies.data.gov.uk/ontology/ies4#";
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const ISO8601: &str = "http://iso.org/iso8601#";
pub const TELICENT: &str = "http://telicent.io/ontology/";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDF_PROPERTY: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property";
pub const RDFS_RESOURCE: &str = "http://www.w3.org/2000/01/rdf-schema#Resource";
pub const RDFS_CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
pub const RDFS_SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
pub const RDFS_SUB_PROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
pub const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
pub const TELICENT_PRIMARY_NAME: &str = "http://telicent.io/ontology/primaryName";

/// Prefixes every session starts with, in declaration order.
///
/// The `:` entry is replaced by the session's URI stub.
pub const DEFAULT_PREFIXES: &[(&str, &str)] = &[
    ("xsd:", XSD),
    ("dc:", "http://purl.org/dc/elements/1.1/"),
    ("rdf:", RDF),
    ("rdfs:", RDFS),
    ("owl:", OWL),
    ("iso8601:", ISO8601),
    ("iso3166:", "http://iso.org/iso3166#"),
    ("tont:", TELICENT),
    ("e164:", "https://www.itu.int/e164#"),
    ("rfc5322:", "https://ietf.org/rfc5322#"),
    ("ies:", IES_BASE),
];

/// Expand a short IES name (`"Person"` or `"ies:Person"`) to its full URI
#[must_use]
pub fn ies(short_name: &str) -> String {
    format!("{}{}", IES_BASE, short_name.trim_start_matches("ies:"))
}
