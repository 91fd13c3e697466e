//! Substring (prefix-trie) Strategy
//!
//! Members are routed by the normalized string value selected by the
//! property path. The trie is made of buckets: a bucket id is the prefix
//! consumed to reach it, the root is `"root"`.
//!
//! # Routing
//!
//! ```text
//! bucket = root
//!   │
//!   ├─ count < pageSize ──────────────► assign here
//!   ├─ key exhausted ─────────────────► assign here (overflow accepted)
//!   └─ full, characters left
//!        consume next char c, prefix += c
//!        create bucket `prefix` + SubstringRelation(value = c) if missing
//!        bucket = prefix, repeat
//! ```
//!
//! Members without a value go to the core's round-robin fallback buckets
//! and never touch the trie counters.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use bucketizer_core::{
    BucketizerCore, BucketizerOptions, BucketizerResult, BucketizerState, LdesStatementFactory,
    PropertyPath, StatementFactory, ValueExtractor,
};
use ldes_types::{Literal, Quad, RelationType};

use super::Bucketizer;
use crate::kind::BucketizerKind;
use crate::normalize::normalize;

/// Id of the trie root
pub const ROOT_BUCKET: &str = "root";

/// Prefix-trie bucketizer
pub struct SubstringBucketizer {
    core: BucketizerCore,
    extractor: Box<dyn ValueExtractor>,
    bucket_counters: BTreeMap<String, u64>,
}

impl SubstringBucketizer {
    /// Create a new substring bucketizer; `propertyPath` is required
    pub fn new(options: BucketizerOptions) -> BucketizerResult<Self> {
        let path = PropertyPath::parse(options.require_property_path()?)?;
        Self::with_collaborators(options, Box::new(path), Box::new(LdesStatementFactory))
    }

    /// Create with injected extraction and statement collaborators
    pub fn with_collaborators(
        options: BucketizerOptions,
        extractor: Box<dyn ValueExtractor>,
        statements: Box<dyn StatementFactory>,
    ) -> BucketizerResult<Self> {
        let mut core = BucketizerCore::with_statement_factory(options, statements)?;
        core.set_property_path_quads(extractor.description_quads());

        let mut bucket_counters = BTreeMap::new();
        bucket_counters.insert(ROOT_BUCKET.to_string(), 0);

        info!(
            page_size = core.page_size(),
            property_path = ?core.options().property_path,
            "Created substring bucketizer"
        );

        Ok(Self {
            core,
            extractor,
            bucket_counters,
        })
    }

    /// Create and optionally restore a previous state
    pub fn build(
        options: BucketizerOptions,
        state: Option<&BucketizerState>,
    ) -> BucketizerResult<Self> {
        let mut bucketizer = Self::new(options)?;
        if let Some(state) = state {
            bucketizer.import_state(state)?;
        }
        Ok(bucketizer)
    }

    /// Members assigned to `bucket` so far
    pub fn bucket_counter(&self, bucket: &str) -> u64 {
        self.bucket_counters.get(bucket).copied().unwrap_or(0)
    }

    pub fn bucket_counters(&self) -> &BTreeMap<String, u64> {
        &self.bucket_counters
    }

    /// Walk `key` down the trie, splitting full buckets on the way
    fn route(&mut self, key: &str, out: &mut Vec<Quad>) -> String {
        let page_size = self.core.page_size() as u64;
        let mut bucket = ROOT_BUCKET.to_string();
        let mut prefix = String::new();
        let mut remaining = key.chars();

        while self.bucket_counter(&bucket) >= page_size {
            let Some(c) = remaining.next() else {
                debug!(bucket = %bucket, key = %key, "Key exhausted, bucket overflows");
                break;
            };
            prefix.push(c);

            if prefix == ROOT_BUCKET {
                warn!(key = %key, "Prefix equals the root bucket id, continuing from root");
            }

            if !self.bucket_counters.contains_key(&prefix) {
                self.bucket_counters.insert(prefix.clone(), 0);
                let relation = BucketizerCore::create_relation_parameters(
                    prefix.as_str(),
                    RelationType::Substring,
                    Some(vec![Literal::string(c.to_string())]),
                );
                out.extend(self.core.link(&bucket, relation));
                debug!(parent = %bucket, child = %prefix, "Split full bucket");
            }

            bucket.clone_from(&prefix);
        }

        bucket
    }
}

impl Bucketizer for SubstringBucketizer {
    fn assign(&mut self, quads: &[Quad], member_id: &str) -> Vec<Quad> {
        let values = self.extractor.extract(quads, member_id);
        let Some(value) = values.first() else {
            return self.core.fallback(member_id);
        };

        let key = normalize(value.value());
        let mut out = Vec::new();
        let bucket = self.route(&key, &mut out);

        *self.bucket_counters.entry(bucket.clone()).or_insert(0) += 1;
        out.push(self.core.bucket_statement(member_id, &bucket));
        out
    }

    fn export_state(&self) -> BucketizerState {
        let mut state = self.core.export_state();
        state.bucket_counter_map = Some(
            self.bucket_counters
                .iter()
                .map(|(bucket, count)| (bucket.clone(), *count))
                .collect(),
        );
        state
    }

    fn import_state(&mut self, state: &BucketizerState) -> BucketizerResult<()> {
        let counters = state.require_bucket_counters()?;

        self.core.import_state(state);
        self.bucket_counters = counters.iter().cloned().collect();

        info!(
            buckets = self.bucket_counters.len(),
            relations = self.core.registry().len(),
            "Imported substring bucketizer state"
        );
        Ok(())
    }

    fn core(&self) -> &BucketizerCore {
        &self.core
    }

    fn kind(&self) -> BucketizerKind {
        BucketizerKind::Substring
    }

    fn name(&self) -> &'static str {
        "Substring"
    }
}

impl std::fmt::Debug for SubstringBucketizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubstringBucketizer")
            .field("core", &self.core)
            .field("bucket_counters", &self.bucket_counters)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucketizer_core::BucketizerError;
    use ldes_types::vocab::{LDES_BUCKET, XSD_STRING};
    use ldes_types::{RelationParameters, Term};

    const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    const PATH: &str = "(<http://www.w3.org/2000/01/rdf-schema#label>)";

    fn options(page_size: usize) -> BucketizerOptions {
        BucketizerOptions::with_property_path(PATH).page_size(page_size)
    }

    fn member(id: &str, label: &str) -> Vec<Quad> {
        vec![Quad::new(Term::named(id), Term::named(LABEL), Term::named(label))]
    }

    fn assign(bucketizer: &mut SubstringBucketizer, id: &str, label: &str) -> String {
        let mut quads = member(id, label);
        bucketizer.bucketize(&mut quads, id);
        quads
            .iter()
            .find(|q| q.predicate.is_named(LDES_BUCKET))
            .map(|q| q.object.value().to_string())
            .unwrap()
    }

    #[test]
    fn test_requires_property_path() {
        let result = SubstringBucketizer::new(BucketizerOptions::default());
        assert!(matches!(result, Err(BucketizerError::ConfigurationError(_))));

        let result = SubstringBucketizer::new(BucketizerOptions::with_property_path("label"));
        assert!(matches!(result, Err(BucketizerError::ConfigurationError(_))));
    }

    #[test]
    fn test_default_page_size() {
        let options = BucketizerOptions::with_property_path(PATH);
        let bucketizer = SubstringBucketizer::new(options).unwrap();
        assert_eq!(bucketizer.core().page_size(), 50);
        assert_eq!(bucketizer.bucket_counter(ROOT_BUCKET), 0);
    }

    #[test]
    fn test_fills_root_first() {
        let mut bucketizer = SubstringBucketizer::new(options(20)).unwrap();
        assert_eq!(assign(&mut bucketizer, "http://example.org/id/123#456", "John Doe"), "root");
        assert_eq!(assign(&mut bucketizer, "http://example.org/id/123#789", "John Doe"), "root");
        assert_eq!(bucketizer.bucket_counter(ROOT_BUCKET), 2);
    }

    #[test]
    fn test_split_when_full() {
        let mut bucketizer = SubstringBucketizer::new(options(1)).unwrap();
        assert_eq!(assign(&mut bucketizer, "http://example.org/id/1", "John Doe"), "root");
        assert_eq!(assign(&mut bucketizer, "http://example.org/id/2", "John Doe"), "j");
        assert_eq!(assign(&mut bucketizer, "http://example.org/id/3", "Jane Doe"), "ja");

        let expected = RelationParameters {
            node_id: "j".to_string(),
            relation_type: RelationType::Substring,
            value: Some(vec![Literal::typed("j", XSD_STRING)]),
        };
        assert!(bucketizer.hypermedia_controls(ROOT_BUCKET).contains(&expected));
        assert_eq!(
            bucketizer.hypermedia_controls("j"),
            &[RelationParameters::substring("ja", "a")]
        );
    }

    #[test]
    fn test_split_emits_relation_statements() {
        let mut bucketizer = SubstringBucketizer::new(options(1)).unwrap();
        assign(&mut bucketizer, "http://example.org/id/1", "John");

        let mut quads = member("http://example.org/id/2", "John");
        let added = bucketizer.bucketize(&mut quads, "http://example.org/id/2").len();
        assert_eq!(added, 5, "four relation statements plus the assignment");
        assert!(quads.iter().any(|q| q.subject.is_named(ROOT_BUCKET)));
    }

    #[test]
    fn test_spaces_become_plus() {
        let mut bucketizer = SubstringBucketizer::new(options(1)).unwrap();
        assign(&mut bucketizer, "http://example.org/id/1", "John Doe");
        assign(&mut bucketizer, "http://example.org/id/2", "John Doe");
        assert_eq!(assign(&mut bucketizer, "http://example.org/id/3", "J D"), "j+");
        assert_eq!(assign(&mut bucketizer, "http://example.org/id/4", "J  D"), "j+d");
        assert_eq!(
            bucketizer.hypermedia_controls("j+"),
            &[RelationParameters::substring("j+d", "d")]
        );
    }

    #[test]
    fn test_prefix_equal_to_root_id_reuses_root() {
        let mut bucketizer = SubstringBucketizer::new(options(1)).unwrap();
        assign(&mut bucketizer, "http://example.org/id/0", "a");
        let buckets: Vec<String> = (1..=4)
            .map(|i| assign(&mut bucketizer, &format!("http://example.org/id/{}", i), "root"))
            .collect();
        assert_eq!(buckets, vec!["r", "ro", "roo", "root"]);

        // No edge towards the colliding id, the member overflows the root bucket
        assert!(bucketizer.hypermedia_controls("roo").is_empty());
        assert_eq!(bucketizer.bucket_counter(ROOT_BUCKET), 2);

        // Longer keys continue below the root bucket
        assert_eq!(assign(&mut bucketizer, "http://example.org/id/5", "roots"), "roots");
        assert!(bucketizer
            .hypermedia_controls(ROOT_BUCKET)
            .contains(&RelationParameters::substring("roots", "s")));
    }

    #[test]
    fn test_exhausted_key_overflows() {
        let mut bucketizer = SubstringBucketizer::new(options(1)).unwrap();
        assign(&mut bucketizer, "http://example.org/id/1", "John Doe");
        assert_eq!(assign(&mut bucketizer, "http://example.org/id/2", "John Doe"), "j");
        assert_eq!(assign(&mut bucketizer, "http://example.org/id/3", "J"), "j");

        assert_eq!(bucketizer.bucket_counter("j"), 2);
        assert!(bucketizer.hypermedia_controls("j").is_empty());
    }

    #[test]
    fn test_normalized_routing() {
        let mut bucketizer = SubstringBucketizer::new(options(1)).unwrap();
        assign(&mut bucketizer, "http://example.org/id/1", "John Doe");
        assert_eq!(
            assign(&mut bucketizer, "http://example.org/id/2", "\u{0303}\u{0237}"),
            "\u{0237}"
        );

        let mut bucketizer = SubstringBucketizer::new(options(1)).unwrap();
        assign(&mut bucketizer, "http://example.org/id/1", "John Doe");
        assert_eq!(assign(&mut bucketizer, "http://example.org/id/2", "\u{00F1}"), "n");
    }

    #[test]
    fn test_fallback_when_value_missing() {
        let mut bucketizer = SubstringBucketizer::new(options(20)).unwrap();
        let id = "http://example.org/id/123#456";
        let mut quads = vec![Quad::new(
            Term::named(id),
            Term::named("http://purl.org/dc/terms/isVersionOf"),
            Term::named("Test"),
        )];

        bucketizer.bucketize(&mut quads, id);
        let bucket = quads.iter().find(|q| q.predicate.is_named(LDES_BUCKET)).unwrap();
        assert_eq!(bucket.object.value(), "bucketless-0");
        assert_eq!(bucketizer.bucket_counter(ROOT_BUCKET), 0);
    }

    #[test]
    fn test_export_fields() {
        let bucketizer = SubstringBucketizer::new(options(1)).unwrap();
        let json = serde_json::to_value(bucketizer.export_state()).unwrap();
        for field in [
            "hypermediaControls",
            "propertyPathQuads",
            "bucketizerOptions",
            "bucketlessPageNumber",
            "bucketlessPageMemberCounter",
            "bucketCounterMap",
        ] {
            assert!(json.get(field).is_some(), "missing {}", field);
        }
        assert_eq!(json["propertyPathQuads"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_import_minimal_state() {
        let state = BucketizerState::from_json(
            r#"{"hypermediaControls": [], "propertyPathQuads": [], "bucketCounter": []}"#,
        )
        .unwrap();
        let mut bucketizer = SubstringBucketizer::build(options(1), Some(&state)).unwrap();

        assert!(bucketizer.core().registry().is_empty());
        assert!(bucketizer.core().property_path_quads().is_empty());
        assert!(bucketizer.bucket_counters().is_empty());

        assert_eq!(assign(&mut bucketizer, "http://example.org/id/1", "John"), "root");
        assert_eq!(assign(&mut bucketizer, "http://example.org/id/2", "John"), "j");
    }

    #[test]
    fn test_import_without_counters_is_rejected() {
        let mut bucketizer = SubstringBucketizer::new(options(1)).unwrap();
        assign(&mut bucketizer, "http://example.org/id/1", "John");
        let before = bucketizer.export_state();

        let result = bucketizer.import_state(&BucketizerState::new(Vec::new()));
        assert!(matches!(result, Err(BucketizerError::MalformedState(_))));
        assert_eq!(bucketizer.export_state(), before);
    }

    struct FixedKey(&'static str);

    impl ValueExtractor for FixedKey {
        fn extract(&self, _quads: &[Quad], _member_id: &str) -> Vec<Term> {
            vec![Term::literal(Literal::string(self.0))]
        }
    }

    #[test]
    fn test_injected_extractor() {
        let mut bucketizer = SubstringBucketizer::with_collaborators(
            BucketizerOptions::default().page_size(1),
            Box::new(FixedKey("Ab")),
            Box::new(LdesStatementFactory),
        )
        .unwrap();

        let buckets: Vec<String> = (0..4)
            .map(|i| {
                let id = format!("http://example.org/id/{}", i);
                let mut quads = Vec::new();
                bucketizer.bucketize(&mut quads, &id);
                quads[quads.len() - 1].object.value().to_string()
            })
            .collect();
        assert_eq!(buckets, vec!["root", "a", "ab", "ab"]);
        assert!(bucketizer.core().property_path_quads().is_empty());
    }
}
