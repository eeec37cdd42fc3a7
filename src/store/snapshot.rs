//! Store snapshot loading.
//!
//! # Responsibilities
//! - Load a JSON object of key→value rule entries from disk
//! - Enforce the store's hard size constraints before accepting a snapshot
//! - Report summary stats for startup logging
//!
//! # Design Decisions
//! - Syntactic errors (IO, JSON) and semantic violations are separate variants
//! - Validation reports every violation, not just the first
//! - Limits mirror the production store: 512 B keys, 1 KiB entries, 5 MiB total

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use super::MemoryStore;

/// Maximum key size in bytes.
pub const MAX_KEY_BYTES: usize = 512;
/// Maximum key + value size in bytes.
pub const MAX_ENTRY_BYTES: usize = 1024;
/// Maximum total snapshot size in bytes.
pub const MAX_TOTAL_BYTES: usize = 5_242_880;

/// A single snapshot constraint violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotViolation {
    pub key: String,
    pub message: String,
}

impl std::fmt::Display for SnapshotViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Snapshot loading failure.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("reading snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("snapshot invalid: {}", format_violations(.0))]
    Invalid(Vec<SnapshotViolation>),
}

fn format_violations(violations: &[SnapshotViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Summary size information for a loaded snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotStats {
    pub num_keys: usize,
    pub total_bytes: usize,
}

#[derive(Deserialize)]
#[serde(transparent)]
struct RawSnapshot(BTreeMap<String, String>);

/// Number of keys and total byte size of the entries.
pub fn stats(entries: &BTreeMap<String, String>) -> SnapshotStats {
    let total_bytes = entries.iter().map(|(k, v)| k.len() + v.len()).sum();
    SnapshotStats {
        num_keys: entries.len(),
        total_bytes,
    }
}

/// Check all store constraints. Empty when valid.
pub fn validate(entries: &BTreeMap<String, String>) -> Vec<SnapshotViolation> {
    let mut violations = Vec::new();
    let mut total = 0usize;

    for (key, value) in entries {
        let key_size = key.len();
        let entry_size = key_size + value.len();

        if key_size > MAX_KEY_BYTES {
            violations.push(SnapshotViolation {
                key: key.clone(),
                message: format!("key exceeds {MAX_KEY_BYTES} bytes ({key_size} bytes)"),
            });
        }
        if entry_size > MAX_ENTRY_BYTES {
            violations.push(SnapshotViolation {
                key: key.clone(),
                message: format!("key+value exceeds {MAX_ENTRY_BYTES} bytes ({entry_size} bytes)"),
            });
        }
        total += entry_size;
    }

    if total > MAX_TOTAL_BYTES {
        violations.push(SnapshotViolation {
            key: "(total)".to_string(),
            message: format!("total data exceeds {MAX_TOTAL_BYTES} bytes ({total} bytes)"),
        });
    }

    violations
}

/// Load, validate and freeze a snapshot file into a [`MemoryStore`].
pub fn load_snapshot(path: &Path) -> Result<(MemoryStore, SnapshotStats), SnapshotError> {
    let content = std::fs::read_to_string(path)?;
    let RawSnapshot(entries) = serde_json::from_str(&content)?;

    let violations = validate(&entries);
    if !violations.is_empty() {
        return Err(SnapshotError::Invalid(violations));
    }

    let stats = stats(&entries);
    Ok((MemoryStore::new(entries), stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn valid_snapshot_has_no_violations() {
        let e = entries(&[("/", "x-a: 1"), ("/blog/", "x-a: 2")]);
        assert!(validate(&e).is_empty());
        assert_eq!(
            stats(&e),
            SnapshotStats {
                num_keys: 2,
                total_bytes: 1 + 6 + 6 + 6,
            }
        );
    }

    #[test]
    fn oversized_key_reported_by_name() {
        let long_key = format!("/{}", "k".repeat(MAX_KEY_BYTES));
        let e = entries(&[(long_key.as_str(), "v")]);
        let violations = validate(&e);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].key, long_key);
        assert!(violations[0].message.contains("key exceeds"));
    }

    #[test]
    fn oversized_entry_reported() {
        let big_value = "v".repeat(MAX_ENTRY_BYTES);
        let e = entries(&[("/big", big_value.as_str())]);
        let violations = validate(&e);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("key+value exceeds"));
    }

    #[test]
    fn all_violations_reported_not_just_first() {
        let big_value = "v".repeat(MAX_ENTRY_BYTES);
        let e = entries(&[("/a", big_value.as_str()), ("/b", big_value.as_str())]);
        assert_eq!(validate(&e).len(), 2);
    }
}
