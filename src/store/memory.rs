//! In-memory rule store.
//!
//! Backs the local simulation harness and the test suite. Entries are loaded
//! once at startup (see [`super::snapshot`]) and never mutated afterwards,
//! matching the read-only contract of the production store.

use async_trait::async_trait;
use std::collections::BTreeMap;

use super::{Lookup, RuleStore, StoreError};

/// Immutable key→value store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl RuleStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Lookup, StoreError> {
        match self.entries.get(key) {
            Some(value) => Ok(Lookup::Hit(value.clone())),
            None => Ok(Lookup::Miss),
        }
    }
}
