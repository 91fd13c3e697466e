//! Exported bucketizer state
//!
//! Plain structured value, one shape for every strategy. Fields a strategy
//! does not use are left out of its export; fields it needs are checked on
//! import (`require_*`).

use serde::{Deserialize, Serialize};

use ldes_types::{Quad, RelationParameters};

use crate::config::BucketizerOptions;
use crate::error::{BucketizerError, BucketizerResult};

/// Snapshot of a bucketizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketizerState {
    /// Relation registry as `(bucket, relations)` pairs
    pub hypermedia_controls: Vec<(String, Vec<RelationParameters>)>,

    /// Member count per bucket
    #[serde(default, alias = "bucketCounter", skip_serializing_if = "Option::is_none")]
    pub bucket_counter_map: Option<Vec<(String, u64)>>,

    /// RDF description of the property path
    #[serde(default)]
    pub property_path_quads: Vec<Quad>,

    /// Options of the exporting instance (informational)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucketizer_options: Option<BucketizerOptions>,

    #[serde(default)]
    pub bucketless_page_number: u64,

    #[serde(default)]
    pub bucketless_page_member_counter: u64,

    /// Round-robin page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u64>,

    /// Round-robin fill level of the active page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_counter: Option<u64>,
}

impl BucketizerState {
    /// Empty state with only the registry set
    pub fn new(hypermedia_controls: Vec<(String, Vec<RelationParameters>)>) -> Self {
        Self {
            hypermedia_controls,
            bucket_counter_map: None,
            property_path_quads: Vec::new(),
            bucketizer_options: None,
            bucketless_page_number: 0,
            bucketless_page_member_counter: 0,
            page_number: None,
            member_counter: None,
        }
    }

    pub fn from_json(json: &str) -> BucketizerResult<Self> {
        serde_json::from_str(json).map_err(|e| BucketizerError::malformed(e.to_string()))
    }

    pub fn from_value(value: serde_json::Value) -> BucketizerResult<Self> {
        serde_json::from_value(value).map_err(|e| BucketizerError::malformed(e.to_string()))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn require_bucket_counters(&self) -> BucketizerResult<&[(String, u64)]> {
        self.bucket_counter_map
            .as_deref()
            .ok_or_else(|| BucketizerError::malformed("missing field `bucketCounterMap`"))
    }

    pub fn require_page(&self) -> BucketizerResult<(u64, u64)> {
        match (self.page_number, self.member_counter) {
            (Some(page_number), Some(member_counter)) => Ok((page_number, member_counter)),
            (None, _) => Err(BucketizerError::malformed("missing field `pageNumber`")),
            (_, None) => Err(BucketizerError::malformed("missing field `memberCounter`")),
        }
    }
}
