//! Basic (round-robin) Strategy
//!
//! Fills bucket `n` with `pageSize` members, then opens bucket `n + 1` and
//! links it from bucket `n`. The member that opens the new page carries the
//! link statements so readers crossing the boundary learn about it.

use tracing::{debug, info};

use bucketizer_core::{
    BucketizerCore, BucketizerOptions, BucketizerResult, BucketizerState, RoundRobinPager,
    StatementFactory,
};
use ldes_types::{Quad, RelationType};

use super::Bucketizer;
use crate::kind::BucketizerKind;

/// Round-robin bucketizer
#[derive(Debug)]
pub struct BasicBucketizer {
    core: BucketizerCore,
    pager: RoundRobinPager,
}

impl BasicBucketizer {
    /// Create a new basic bucketizer
    pub fn new(options: BucketizerOptions) -> BucketizerResult<Self> {
        Ok(Self::from_core(BucketizerCore::new(options)?))
    }

    /// Create with a custom statement factory
    pub fn with_statement_factory(
        options: BucketizerOptions,
        statements: Box<dyn StatementFactory>,
    ) -> BucketizerResult<Self> {
        Ok(Self::from_core(BucketizerCore::with_statement_factory(options, statements)?))
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

    fn from_core(core: BucketizerCore) -> Self {
        info!(page_size = core.page_size(), "Created basic bucketizer");
        Self {
            core,
            pager: RoundRobinPager::new(),
        }
    }

    pub fn page_number(&self) -> u64 {
        self.pager.page_number()
    }

    pub fn member_counter(&self) -> u64 {
        self.pager.member_counter()
    }
}

impl Bucketizer for BasicBucketizer {
    fn assign(&mut self, _quads: &[Quad], member_id: &str) -> Vec<Quad> {
        let step = self.pager.advance(self.core.page_size());
        let bucket = step.page.to_string();
        let mut out = Vec::with_capacity(1);

        if let Some(previous) = step.rolled_over_from {
            debug!(from = previous, to = step.page, "Page full, rolled over");
            let relation = BucketizerCore::create_relation_parameters(
                bucket.as_str(),
                RelationType::Relation,
                None,
            );
            out.extend(self.core.link(&previous.to_string(), relation));
        }

        out.push(self.core.bucket_statement(member_id, &bucket));
        out
    }

    fn export_state(&self) -> BucketizerState {
        let mut state = self.core.export_state();
        state.page_number = Some(self.pager.page_number());
        state.member_counter = Some(self.pager.member_counter());
        state
    }

    fn import_state(&mut self, state: &BucketizerState) -> BucketizerResult<()> {
        let (page_number, member_counter) = state.require_page()?;

        self.core.import_state(state);
        self.pager = RoundRobinPager::restore(page_number, member_counter);

        info!(page_number, member_counter, "Imported basic bucketizer state");
        Ok(())
    }

    fn core(&self) -> &BucketizerCore {
        &self.core
    }

    fn kind(&self) -> BucketizerKind {
        BucketizerKind::Basic
    }

    fn name(&self) -> &'static str {
        "Basic"
    }
}
