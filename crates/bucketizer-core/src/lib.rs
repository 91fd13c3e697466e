//! Bucketizer Core - engine contract shared by all strategies
//!
//! Provides the relation registry, the fallback pager, the collaborators
//! for value extraction and statement creation, and the state snapshot.

pub mod config;
pub mod engine;
pub mod error;
pub mod pager;
pub mod property_path;
pub mod registry;
pub mod state;
pub mod statement;

pub use config::{BucketizerOptions, DEFAULT_FALLBACK_BUCKET_PREFIX, DEFAULT_PAGE_SIZE};
pub use engine::BucketizerCore;
pub use error::{BucketizerError, BucketizerResult};
pub use pager::{PageStep, RoundRobinPager};
pub use property_path::{PathStep, PropertyPath, ValueExtractor};
pub use registry::RelationRegistry;
pub use state::BucketizerState;
pub use statement::{LdesStatementFactory, StatementFactory};
