//! Bucketizing Strategies
//!
//! This module contains the bucket assignment strategies:
//!
//! - `BasicBucketizer`: Fixed-size pages, numbered `0`, `1`, `2`, ...
//! - `SubstringBucketizer`: Prefix trie over a normalized string value
//!
//! # Strategy Hierarchy
//!
//! ```text
//! Member (statements + id)
//!     │
//!     ▼
//! ┌─────────────────────────┐
//! │   Strategy              │  (BasicBucketizer / SubstringBucketizer)
//! │   (Which bucket?)       │
//! └───────────┬─────────────┘
//!             │
//!             ▼
//! ┌─────────────────────────┐
//! │   BucketizerCore        │  registry, statements, fallback pager
//! │   (What to emit?)       │
//! └─────────────────────────┘
//! ```

mod basic;
mod substring;

pub use basic::BasicBucketizer;
pub use substring::{SubstringBucketizer, ROOT_BUCKET};

use bucketizer_core::{BucketizerCore, BucketizerResult, BucketizerState};
use ldes_types::{Quad, RelationParameters};

use crate::kind::BucketizerKind;

/// Trait for bucket assignment strategies
///
/// Calls must be serialized by the caller; see `SharedBucketizer`.
pub trait Bucketizer: Send + Sync {
    /// Decide the bucket of a member and return the statements to add
    fn assign(&mut self, quads: &[Quad], member_id: &str) -> Vec<Quad>;

    /// Snapshot of everything that influences future assignments
    fn export_state(&self) -> BucketizerState;

    /// Replace the current state with `state`
    ///
    /// Nothing is changed when the snapshot lacks a required field.
    fn import_state(&mut self, state: &BucketizerState) -> BucketizerResult<()>;

    /// Shared engine state
    fn core(&self) -> &BucketizerCore;

    fn kind(&self) -> BucketizerKind;

    /// Strategy name for logging
    fn name(&self) -> &'static str;

    /// Append the assignment statements to `quads`, returning the added ones
    fn bucketize<'a>(&mut self, quads: &'a mut Vec<Quad>, member_id: &str) -> &'a [Quad] {
        let added = self.assign(quads, member_id);
        let start = quads.len();
        quads.extend(added);
        &quads[start..]
    }

    fn hypermedia_controls(&self, bucket: &str) -> &[RelationParameters] {
        self.core().hypermedia_controls(bucket)
    }
}
