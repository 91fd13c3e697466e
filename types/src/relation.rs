//! Relation descriptors - hypermedia controls between buckets
//!
//! Design Philosophy:
//! - A relation is owned by its source bucket (the registry key)
//! - It only references the target by bucket id, never by pointer
//! - `Relation` edges are unconditional, `Substring` edges carry the
//!   key segment a reader must match to follow them

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::term::Literal;
use crate::vocab::{TREE_RELATION_CLASS, TREE_SUBSTRING_RELATION_CLASS};

/// Kind of edge between two buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationType {
    /// `tree:Relation` - continue reading here
    #[serde(rename = "https://w3id.org/tree#Relation")]
    Relation,
    /// `tree:SubstringRelation` - valid when the next key segment equals the value
    #[serde(rename = "https://w3id.org/tree#SubstringRelation")]
    Substring,
}

impl RelationType {
    /// IRI of the relation class
    pub fn iri(&self) -> &'static str {
        match self {
            RelationType::Relation => TREE_RELATION_CLASS,
            RelationType::Substring => TREE_SUBSTRING_RELATION_CLASS,
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationType::Relation => write!(f, "relation"),
            RelationType::Substring => write!(f, "substring"),
        }
    }
}

/// Outgoing relation of a bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationParameters {
    /// Target bucket id
    pub node_id: String,

    /// Relation kind
    #[serde(rename = "type")]
    pub relation_type: RelationType,

    /// Condition values (only for conditional relations)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<Literal>>,
}

impl RelationParameters {
    /// Unconditional edge to `node_id`
    pub fn relation(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            relation_type: RelationType::Relation,
            value: None,
        }
    }

    /// Substring edge to `node_id`, followed when the next segment equals `segment`
    pub fn substring(node_id: impl Into<String>, segment: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            relation_type: RelationType::Substring,
            value: Some(vec![Literal::string(segment)]),
        }
    }

    /// Values attached to this relation (empty for unconditional edges)
    pub fn values(&self) -> &[Literal] {
        self.value.as_deref().unwrap_or(&[])
    }
}
