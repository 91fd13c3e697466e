//! Shared bucketizer handle
//!
//! The registry and counters are not safe for concurrent mutation. Callers
//! that ingest from several tasks go through this handle: assignment,
//! export and import all take the same exclusive lock, so a snapshot never
//! observes a half-applied assignment.

use parking_lot::Mutex;
use std::sync::Arc;

use bucketizer_core::{BucketizerResult, BucketizerState};
use ldes_types::Quad;

use crate::strategy::Bucketizer;

/// Cloneable handle serializing access to one bucketizer
#[derive(Clone)]
pub struct SharedBucketizer {
    inner: Arc<Mutex<Box<dyn Bucketizer>>>,
}

impl SharedBucketizer {
    pub fn new(bucketizer: Box<dyn Bucketizer>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(bucketizer)),
        }
    }

    /// Annotate `quads`, returning a copy of the added statements
    pub fn bucketize(&self, quads: &mut Vec<Quad>, member_id: &str) -> Vec<Quad> {
        let mut bucketizer = self.inner.lock();
        bucketizer.bucketize(quads, member_id).to_vec()
    }

    pub fn export_state(&self) -> BucketizerState {
        self.inner.lock().export_state()
    }

    pub fn import_state(&self, state: &BucketizerState) -> BucketizerResult<()> {
        self.inner.lock().import_state(state)
    }

    /// Run `f` with exclusive access
    pub fn with<R>(&self, f: impl FnOnce(&mut dyn Bucketizer) -> R) -> R {
        let mut bucketizer = self.inner.lock();
        f(&mut **bucketizer)
    }
}

impl std::fmt::Debug for SharedBucketizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bucketizer = self.inner.lock();
        f.debug_struct("SharedBucketizer")
            .field("strategy", &bucketizer.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::build;
    use crate::kind::BucketizerKind;
    use bucketizer_core::BucketizerOptions;
    use std::thread;

    #[test]
    fn test_concurrent_ingestion_keeps_counts() {
        let options = BucketizerOptions::default().page_size(10);
        let bucketizer = build(BucketizerKind::Basic, options, None).unwrap();
        let shared = SharedBucketizer::new(bucketizer);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        let mut quads = Vec::new();
                        shared.bucketize(&mut quads, &format!("http://example.org/id/{}-{}", t, i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // 100 members in pages of 10: pages 0..=9, the last one full
        let state = shared.export_state();
        assert_eq!(state.page_number, Some(9));
        assert_eq!(state.member_counter, Some(10));
        assert_eq!(state.hypermedia_controls.len(), 9);
    }

    #[test]
    fn test_exclusive_scope() {
        let bucketizer = build(BucketizerKind::Basic, BucketizerOptions::default(), None).unwrap();
        let shared = SharedBucketizer::new(bucketizer);

        let (state, name) = shared.with(|b| {
            b.bucketize(&mut Vec::new(), "http://example.org/id/1");
            (b.export_state(), b.name())
        });
        assert_eq!(state.member_counter, Some(1));
        assert_eq!(name, "Basic");

        shared.import_state(&state).unwrap();
        assert_eq!(shared.export_state(), state);
    }
}
