//! Specificity-ordered header merging.
//!
//! # Responsibilities
//! - Probe the store once per pattern, in ascending specificity order
//! - Apply parsed entries with last-writer-wins semantics across patterns
//! - Enforce the optional response-header byte budget
//!
//! # Design Decisions
//! - Lookups are strictly sequential; override correctness depends on
//!   applying matches in pattern order, so fan-out is disallowed
//! - A store failure is logged and treated exactly like a miss
//! - The first entry that would exceed the budget stops all further merging,
//!   including later patterns, so emitted headers are never partially written

use std::collections::BTreeMap;

use crate::store::{Lookup, RuleStore};

use super::patterns::{normalize_path, patterns_for};
use super::rules::parse_rule_body;

/// Result of one merge pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Final header name → value mapping after overrides.
    pub headers: BTreeMap<String, String>,
    /// Every pattern that was probed, in probe order.
    pub patterns: Vec<String>,
    /// Indices into `patterns` that produced a store hit.
    pub matched: Vec<usize>,
    /// Cumulative byte cost of every applied entry.
    pub total_bytes: usize,
    /// Whether the budget stopped the merge early.
    pub truncated: bool,
}

/// Merge header rules for `path`, probing `store` per pattern.
///
/// `budget` of `None` merges everything; `Some(n)` stops before the first
/// entry whose cost would push the cumulative total past `n`.
pub async fn merge_headers(
    store: &dyn RuleStore,
    path: &str,
    budget: Option<usize>,
) -> MergeOutcome {
    let path = normalize_path(path);
    let mut outcome = MergeOutcome {
        patterns: patterns_for(&path),
        ..Default::default()
    };

    'patterns: for index in 0..outcome.patterns.len() {
        let pattern = &outcome.patterns[index];
        let body = match store.get(pattern).await {
            // An empty body is treated as no match, like redirects do for
            // empty destinations.
            Ok(Lookup::Hit(body)) if !body.is_empty() => body,
            Ok(_) => {
                tracing::trace!(pattern = %pattern, "no rule for pattern");
                continue;
            }
            Err(error) => {
                // A failed probe must not abort the resolution.
                tracing::debug!(pattern = %pattern, error = %error, "store lookup failed, skipping");
                continue;
            }
        };

        outcome.matched.push(index);

        for entry in parse_rule_body(&body, &path) {
            let cost = entry.cost();
            if let Some(limit) = budget {
                if outcome.total_bytes + cost > limit {
                    tracing::debug!(
                        pattern = %pattern,
                        header = %entry.name,
                        budget = limit,
                        used = outcome.total_bytes,
                        "header budget exhausted, truncating merge"
                    );
                    outcome.truncated = true;
                    break 'patterns;
                }
            }
            // Overwrites still pay full cost; the budget tracks applied
            // entries, not the final map.
            outcome.headers.insert(entry.name, entry.value);
            outcome.total_bytes += cost;
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn outcome_default_is_empty() {
        let outcome = MergeOutcome::default();
        assert!(outcome.headers.is_empty());
        assert!(!outcome.truncated);
    }

    #[tokio::test]
    async fn more_specific_pattern_overrides() {
        let store = MemoryStore::from_iter([
            ("/", "x-a: root\nx-b: root"),
            ("/blog/", "x-a: blog"),
        ]);
        let outcome = merge_headers(&store, "/blog/post.html", None).await;
        assert_eq!(outcome.headers["x-a"], "blog");
        assert_eq!(outcome.headers["x-b"], "root");
        assert_eq!(outcome.matched, vec![0, 1]);
    }

    #[tokio::test]
    async fn budget_stops_all_remaining_patterns() {
        // Each entry costs 3 + 1 + 4 = 8 bytes.
        let store = MemoryStore::from_iter([
            ("/", "x-a: 1\nx-b: 2"),
            ("/docs/", "x-c: 3"),
        ]);
        let outcome = merge_headers(&store, "/docs/page", Some(10)).await;
        assert_eq!(outcome.headers.len(), 1);
        assert_eq!(outcome.headers["x-a"], "1");
        assert_eq!(outcome.total_bytes, 8);
        assert!(outcome.truncated);
    }

    #[tokio::test]
    async fn unbounded_merge_never_truncates() {
        let store = MemoryStore::from_iter([("/", "x-a: 1\nx-b: 2")]);
        let outcome = merge_headers(&store, "/", None).await;
        assert_eq!(outcome.headers.len(), 2);
        assert_eq!(outcome.total_bytes, 16);
        assert!(!outcome.truncated);
    }

    #[tokio::test]
    async fn overwrite_accumulates_cost_of_every_applied_entry() {
        let store = MemoryStore::from_iter([("/", "x-a: 1"), ("/a/", "x-a: 2")]);
        let outcome = merge_headers(&store, "/a/b", None).await;
        assert_eq!(outcome.headers.len(), 1);
        // Both writers paid into the total.
        assert_eq!(outcome.total_bytes, 16);
    }

    #[tokio::test]
    async fn empty_body_is_not_recorded_as_a_match() {
        let store = MemoryStore::from_iter([("/", ""), ("/a/", "x-a: 1")]);
        let outcome = merge_headers(&store, "/a/b", None).await;
        assert_eq!(outcome.matched, vec![1]);
        assert_eq!(outcome.headers["x-a"], "1");
    }

    #[tokio::test]
    async fn miss_everywhere_yields_empty_outcome() {
        let store = MemoryStore::default();
        let outcome = merge_headers(&store, "/nothing/here", None).await;
        assert!(outcome.headers.is_empty());
        assert!(outcome.matched.is_empty());
        assert_eq!(outcome.total_bytes, 0);
    }
}
