//! Relation registry
//!
//! Maps a bucket id to its ordered list of outgoing relations. Buckets are
//! never removed, relations are only appended.

use std::collections::BTreeMap;

use ldes_types::RelationParameters;

/// Hypermedia controls per bucket
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationRegistry {
    controls: BTreeMap<String, Vec<RelationParameters>>,
}

impl RelationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a relation to the outgoing list of `bucket`
    pub fn register(&mut self, bucket: &str, relation: RelationParameters) {
        self.controls
            .entry(bucket.to_string())
            .or_default()
            .push(relation);
    }

    /// Outgoing relations of `bucket` (empty if it has none)
    pub fn get(&self, bucket: &str) -> &[RelationParameters] {
        self.controls.get(bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Snapshot as `(bucket, relations)` pairs, ordered by bucket id
    pub fn to_entries(&self) -> Vec<(String, Vec<RelationParameters>)> {
        self.controls
            .iter()
            .map(|(bucket, relations)| (bucket.clone(), relations.clone()))
            .collect()
    }

    /// Rebuild from snapshot entries; later duplicates of a bucket id win
    pub fn from_entries(entries: Vec<(String, Vec<RelationParameters>)>) -> Self {
        Self {
            controls: entries.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_keeps_order() {
        let mut registry = RelationRegistry::new();
        registry.register("root", RelationParameters::substring("j", "j"));
        registry.register("root", RelationParameters::substring("a", "a"));

        let relations = registry.get("root");
        assert_eq!(relations.len(), 2);
        assert_eq!(relations[0].node_id, "j");
        assert_eq!(relations[1].node_id, "a");
    }

    #[test]
    fn test_unknown_bucket_has_no_relations() {
        let registry = RelationRegistry::new();
        assert!(registry.get("0").is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_entries_roundtrip() {
        let mut registry = RelationRegistry::new();
        registry.register("1", RelationParameters::relation("2"));
        registry.register("0", RelationParameters::relation("1"));

        let entries = registry.to_entries();
        assert_eq!(entries[0].0, "0");
        assert_eq!(RelationRegistry::from_entries(entries), registry);
    }
}
