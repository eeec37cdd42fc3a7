//! Shared utilities for integration tests.

use async_trait::async_trait;
use std::collections::HashSet;

use hedgerules_edge::store::{Lookup, MemoryStore, RuleStore, StoreError};

/// Build an in-memory store from literal pairs.
pub fn store_of(pairs: &[(&str, &str)]) -> MemoryStore {
    pairs.iter().copied().collect()
}

/// Store wrapper that fails lookups for selected keys, for exercising the
/// "lookup failure is just a miss" path.
#[allow(dead_code)]
pub struct FlakyStore {
    inner: MemoryStore,
    failing: HashSet<String>,
}

impl FlakyStore {
    #[allow(dead_code)]
    pub fn new(inner: MemoryStore, failing: &[&str]) -> Self {
        Self {
            inner,
            failing: failing.iter().map(|k| k.to_string()).collect(),
        }
    }
}

#[async_trait]
impl RuleStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Lookup, StoreError> {
        if self.failing.contains(key) {
            return Err(StoreError::Transport(format!(
                "injected failure for {key}"
            )));
        }
        self.inner.get(key).await
    }
}
