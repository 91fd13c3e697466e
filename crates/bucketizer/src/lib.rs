//! Bucketizers - assign stream members to linked buckets
//!
//! Each member of an append-only stream is assigned to a named bucket with
//! a bounded capacity; relations between buckets are emitted as TREE
//! hypermedia controls so a consumer can page through the stream.
//!
//! # Architecture
//!
//! ```text
//! Member
//!     │
//!     ▼
//! ┌─────────────────────────┐
//! │   Bucketizer            │  Basic: numbered pages
//! │   (Which bucket?)       │  Substring: prefix trie over a value
//! └───────────┬─────────────┘
//!             │
//!             ▼
//! ┌─────────────────────────┐
//! │   BucketizerCore        │  Registry, statements, fallback paging
//! │   (Which links?)        │
//! └─────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use bucketizer::{build, BucketizerKind, BucketizerOptions};
//!
//! let options = BucketizerOptions::with_property_path("(<http://schema.org/name>)");
//! let mut bucketizer = build(BucketizerKind::Substring, options.clone(), None)?;
//!
//! let added = bucketizer.bucketize(&mut member_quads, member_id);
//!
//! // Persist and resume later
//! let state = bucketizer.export_state();
//! let resumed = build(BucketizerKind::Substring, options, Some(&state))?;
//! ```

// Core modules
mod kind;
mod normalize;
mod shared;

// Strategy module (contains all bucketizers)
mod strategy;

mod factory;


// Re-exports: Key normalization
pub use normalize::normalize;

// Re-exports: Strategy selection and construction
pub use factory::build;
pub use kind::BucketizerKind;

// Re-exports: Strategies
pub use strategy::{BasicBucketizer, Bucketizer, SubstringBucketizer, ROOT_BUCKET};

// Re-exports: Exclusive access
pub use shared::SharedBucketizer;

// Re-exports: Engine contract
pub use bucketizer_core::{
    BucketizerCore, BucketizerError, BucketizerOptions, BucketizerResult, BucketizerState,
    LdesStatementFactory, PropertyPath, StatementFactory, ValueExtractor,
};
