//! Bucketizer Factory
//!
//! Builds a strategy from its kind and options, restoring a snapshot when
//! one is given.
//!
//! # Construction
//!
//! ```text
//! (kind, options, state?)
//!        │
//!        ▼
//! options valid for kind? ──No──► ConfigurationError
//!        │
//!       Yes
//!        ▼
//! state given? ──Yes──► import_state ──fails──► MalformedState
//!        │                    │
//!        No                   ▼
//!        └──────────────► Box<dyn Bucketizer>
//! ```

use tracing::info;

use bucketizer_core::{BucketizerOptions, BucketizerResult, BucketizerState};

use crate::kind::BucketizerKind;
use crate::strategy::{BasicBucketizer, Bucketizer, SubstringBucketizer};

/// Build a bucketizer of `kind`
pub fn build(
    kind: BucketizerKind,
    options: BucketizerOptions,
    state: Option<&BucketizerState>,
) -> BucketizerResult<Box<dyn Bucketizer>> {
    if kind.requires_property_path() {
        options.require_property_path()?;
    }

    let bucketizer: Box<dyn Bucketizer> = match kind {
        BucketizerKind::Basic => Box::new(BasicBucketizer::build(options, state)?),
        BucketizerKind::Substring => Box::new(SubstringBucketizer::build(options, state)?),
    };

    info!(
        strategy = bucketizer.name(),
        restored = state.is_some(),
        "Bucketizer ready"
    );
    Ok(bucketizer)
}
