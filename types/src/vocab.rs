//! Vocabulary constants
//!
//! IRIs of the LDES, TREE, RDF, XSD and SHACL terms the bucketizers emit.

/// Linked Data Event Streams namespace
pub const LDES: &str = "https://w3id.org/ldes#";

/// TREE hypermedia namespace
pub const TREE: &str = "https://w3id.org/tree#";

/// RDF syntax namespace
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// XML Schema datatypes namespace
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

/// SHACL namespace (property path serialization)
pub const SH: &str = "http://www.w3.org/ns/shacl#";

/// `ldes:bucket` - links a member to the bucket it was assigned to
pub const LDES_BUCKET: &str = "https://w3id.org/ldes#bucket";

pub const TREE_RELATION: &str = "https://w3id.org/tree#relation";
pub const TREE_NODE: &str = "https://w3id.org/tree#node";
pub const TREE_VALUE: &str = "https://w3id.org/tree#value";

/// `tree:Relation` - unconditional "continue reading here" edge
pub const TREE_RELATION_CLASS: &str = "https://w3id.org/tree#Relation";

/// `tree:SubstringRelation` - edge valid for keys continuing with the value
pub const TREE_SUBSTRING_RELATION_CLASS: &str = "https://w3id.org/tree#SubstringRelation";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

pub const SH_INVERSE_PATH: &str = "http://www.w3.org/ns/shacl#inversePath";
