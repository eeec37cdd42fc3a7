//! Exact-match redirect resolution.
//!
//! # Responsibilities
//! - Probe the store with the unmodified request URI
//! - Produce a 301 descriptor on a non-empty hit
//!
//! # Design Decisions
//! - No pattern expansion; redirect keys are exact URIs and live in a key
//!   space disjoint from header-rule patterns
//! - An empty stored value falls through like a miss
//! - A store failure falls through with the request unchanged

use crate::event::RedirectResponse;
use crate::store::{Lookup, RuleStore};

/// Look up a redirect for `uri`. `None` means fall through to index
/// rewriting and header merging.
pub async fn resolve_redirect(store: &dyn RuleStore, uri: &str) -> Option<RedirectResponse> {
    match store.get(uri).await {
        Ok(Lookup::Hit(destination)) if !destination.is_empty() => {
            tracing::debug!(uri = %uri, destination = %destination, "redirect matched");
            Some(RedirectResponse::moved_permanently(destination))
        }
        Ok(_) => None,
        Err(error) => {
            tracing::debug!(uri = %uri, error = %error, "redirect lookup failed, continuing");
            None
        }
    }
}
