//! Bucketizer Core
//!
//! Shared machinery of every strategy: options, the relation registry, the
//! statement factory and the fallback pager for members without a
//! partitioning value.
//!
//! # Composition
//!
//! ```text
//! strategy ──► create_relation_parameters ──► set_hypermedia_controls
//!    │                                              │
//!    │                                              ▼
//!    │                                        expand_relation ──► member statements
//!    ▼
//! bucket_statement ──────────────────────────────────────────► member statements
//! ```

use tracing::{debug, trace};

use ldes_types::{Literal, Quad, RelationParameters, RelationType};

use crate::config::BucketizerOptions;
use crate::error::BucketizerResult;
use crate::pager::RoundRobinPager;
use crate::registry::RelationRegistry;
use crate::state::BucketizerState;
use crate::statement::{LdesStatementFactory, StatementFactory};

/// State and helpers shared by all bucketizers
pub struct BucketizerCore {
    options: BucketizerOptions,
    registry: RelationRegistry,
    statements: Box<dyn StatementFactory>,
    property_path_quads: Vec<Quad>,
    bucketless: RoundRobinPager,
}

impl BucketizerCore {
    /// Create with the LDES statement factory
    pub fn new(options: BucketizerOptions) -> BucketizerResult<Self> {
        Self::with_statement_factory(options, Box::new(LdesStatementFactory))
    }

    /// Create with a custom statement factory
    pub fn with_statement_factory(
        options: BucketizerOptions,
        statements: Box<dyn StatementFactory>,
    ) -> BucketizerResult<Self> {
        options.validate()?;

        Ok(Self {
            options,
            registry: RelationRegistry::new(),
            statements,
            property_path_quads: Vec::new(),
            bucketless: RoundRobinPager::new(),
        })
    }

    pub fn options(&self) -> &BucketizerOptions {
        &self.options
    }

    pub fn page_size(&self) -> usize {
        self.options.page_size
    }

    pub fn registry(&self) -> &RelationRegistry {
        &self.registry
    }

    pub fn hypermedia_controls(&self, bucket: &str) -> &[RelationParameters] {
        self.registry.get(bucket)
    }

    pub fn property_path_quads(&self) -> &[Quad] {
        &self.property_path_quads
    }

    pub fn set_property_path_quads(&mut self, quads: Vec<Quad>) {
        self.property_path_quads = quads;
    }

    pub fn bucketless_pager(&self) -> &RoundRobinPager {
        &self.bucketless
    }

    /// Relation descriptor pointing at `target`
    pub fn create_relation_parameters(
        target: impl Into<String>,
        relation_type: RelationType,
        value: Option<Vec<Literal>>,
    ) -> RelationParameters {
        RelationParameters {
            node_id: target.into(),
            relation_type,
            value,
        }
    }

    /// Register `relation` as an outgoing edge of `bucket`
    pub fn set_hypermedia_controls(&mut self, bucket: &str, relation: RelationParameters) {
        debug!(
            bucket = %bucket,
            target = %relation.node_id,
            relation_type = %relation.relation_type,
            "Registered relation"
        );
        self.registry.register(bucket, relation);
    }

    /// Statements describing `relation` leaving `bucket`
    pub fn expand_relation(&self, bucket: &str, relation: &RelationParameters) -> Vec<Quad> {
        self.statements.relation_statements(bucket, relation)
    }

    /// Register a relation and return its statements
    pub fn link(&mut self, bucket: &str, relation: RelationParameters) -> Vec<Quad> {
        let quads = self.expand_relation(bucket, &relation);
        self.set_hypermedia_controls(bucket, relation);
        quads
    }

    /// Assignment statement of `member_id` to `bucket`
    pub fn bucket_statement(&self, member_id: &str, bucket: &str) -> Quad {
        trace!(member_id = %member_id, bucket = %bucket, "Assigned member");
        self.statements.bucket_statement(member_id, bucket)
    }

    /// Round-robin over `<fallbackBucketPrefix>-<n>` buckets
    ///
    /// Used for members without a partitioning value; the strategy's own
    /// counters are not touched.
    pub fn fallback(&mut self, member_id: &str) -> Vec<Quad> {
        let step = self.bucketless.advance(self.options.page_size);
        let bucket = self.bucketless_id(step.page);
        let mut out = Vec::with_capacity(1);

        if let Some(previous) = step.rolled_over_from {
            let previous = self.bucketless_id(previous);
            let relation =
                Self::create_relation_parameters(bucket.as_str(), RelationType::Relation, None);
            out.extend(self.link(&previous, relation));
        }

        debug!(member_id = %member_id, bucket = %bucket, "No partitioning value, applied fallback");
        out.push(self.bucket_statement(member_id, &bucket));
        out
    }

    fn bucketless_id(&self, page: u64) -> String {
        format!("{}-{}", self.options.fallback_bucket_prefix, page)
    }

    /// Export the shared part of the state
    pub fn export_state(&self) -> BucketizerState {
        let mut state = BucketizerState::new(self.registry.to_entries());
        state.property_path_quads = self.property_path_quads.clone();
        state.bucketizer_options = Some(self.options.clone());
        state.bucketless_page_number = self.bucketless.page_number();
        state.bucketless_page_member_counter = self.bucketless.member_counter();
        state
    }

    /// Replace the shared part of the state
    ///
    /// Options are not taken from the snapshot; the instance keeps the ones
    /// it was built with.
    pub fn import_state(&mut self, state: &BucketizerState) {
        self.registry = RelationRegistry::from_entries(state.hypermedia_controls.clone());
        self.property_path_quads = state.property_path_quads.clone();
        self.bucketless = RoundRobinPager::restore(
            state.bucketless_page_number,
            state.bucketless_page_member_counter,
        );

        if let Some(exported) = &state.bucketizer_options {
            if exported != &self.options {
                debug!(
                    exported_page_size = exported.page_size,
                    page_size = self.options.page_size,
                    "Imported state was exported with different options"
                );
            }
        }
    }
}

impl std::fmt::Debug for BucketizerCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BucketizerCore")
            .field("options", &self.options)
            .field("registry", &self.registry)
            .field("bucketless", &self.bucketless)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BucketizerError;
    use ldes_types::vocab::LDES_BUCKET;

    fn bucket_of(quads: &[Quad]) -> Option<&str> {
        quads
            .iter()
            .find(|q| q.predicate.is_named(LDES_BUCKET))
            .map(|q| q.object.value())
    }

    #[test]
    fn test_rejects_invalid_options() {
        let result = BucketizerCore::new(BucketizerOptions::default().page_size(0));
        assert!(matches!(result, Err(BucketizerError::ConfigurationError(_))));
    }

    #[test]
    fn test_fallback_pages() {
        let mut core = BucketizerCore::new(BucketizerOptions::default().page_size(2)).unwrap();

        assert_eq!(bucket_of(&core.fallback("a")), Some("bucketless-0"));
        assert_eq!(bucket_of(&core.fallback("b")), Some("bucketless-0"));

        let quads = core.fallback("c");
        assert_eq!(bucket_of(&quads), Some("bucketless-1"));
        assert_eq!(quads.len(), 4, "relation statements plus assignment");

        let relations = core.hypermedia_controls("bucketless-0");
        assert_eq!(relations, &[RelationParameters::relation("bucketless-1")]);
    }

    #[test]
    fn test_custom_fallback_prefix() {
        let options = BucketizerOptions::default().fallback_bucket_prefix("orphans");
        let mut core = BucketizerCore::new(options).unwrap();
        assert_eq!(bucket_of(&core.fallback("a")), Some("orphans-0"));
    }

    #[test]
    fn test_import_overwrites() {
        let mut core = BucketizerCore::new(BucketizerOptions::default().page_size(1)).unwrap();
        core.fallback("a");
        core.fallback("b");
        assert!(!core.registry().is_empty());

        core.import_state(&BucketizerState::new(Vec::new()));
        assert!(core.registry().is_empty());
        assert_eq!(core.bucketless_pager().page_number(), 0);
        assert_eq!(bucket_of(&core.fallback("c")), Some("bucketless-0"));
    }

    #[test]
    fn test_export_contains_shared_fields() {
        let mut core = BucketizerCore::new(BucketizerOptions::default().page_size(1)).unwrap();
        core.fallback("a");
        core.fallback("b");

        let state = core.export_state();
        assert_eq!(state.bucketless_page_number, 1);
        assert_eq!(state.bucketless_page_member_counter, 1);
        assert_eq!(state.hypermedia_controls.len(), 1);
        assert_eq!(state.bucketizer_options.as_ref().map(|o| o.page_size), Some(1));
    }
}
