//! Request/response resolution subsystem.
//!
//! # Data Flow
//! ```text
//! viewer request
//!     → redirect.rs (exact-URI probe; 301 short-circuits everything)
//!     → rewrite.rs (trailing slash → default document)
//!     → forwarded request
//!
//! viewer response
//!     → patterns.rs (path → ordered store keys)
//!     → merge.rs (sequential probes, parse via rules.rs, override by
//!       specificity, optional byte budget)
//!     → diagnostics.rs (optional debug headers)
//!     → response returned to the runtime
//! ```
//!
//! # Design Decisions
//! - One resolver parameterized by budget and debug flags; no per-variant
//!   code paths to drift apart
//! - Store misses and failures are recovered where they occur; the response
//!   side additionally catches any unexpected panic once, at its boundary,
//!   and still returns a usable response
//! - All per-invocation state is created fresh and discarded at the end

use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

pub mod diagnostics;
pub mod merge;
pub mod patterns;
pub mod redirect;
pub mod rewrite;
pub mod rules;

pub use merge::MergeOutcome;

use crate::config::ResolverConfig;
use crate::event::{EdgeRequest, EdgeResponse, RequestOutcome};
use crate::store::RuleStore;

/// Per-deployment resolver: a store handle plus build-time constants.
pub struct Resolver {
    store: Arc<dyn RuleStore>,
    config: ResolverConfig,
}

impl Resolver {
    /// The store handle must be supplied explicitly; there is no discovery.
    pub fn new(store: Arc<dyn RuleStore>, config: ResolverConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Request-side hook: redirect on an exact hit, otherwise rewrite
    /// directory requests to the default document and forward. Never fails;
    /// an unexpected panic during redirect resolution is treated as a miss
    /// and the request falls through to the index rewrite.
    pub async fn viewer_request(&self, request: EdgeRequest) -> RequestOutcome {
        let redirect =
            AssertUnwindSafe(redirect::resolve_redirect(self.store.as_ref(), &request.uri))
                .catch_unwind()
                .await;

        match redirect {
            Ok(Some(redirect)) => return RequestOutcome::Redirect(redirect),
            Ok(None) => {}
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!(uri = %request.uri, error = %message, "redirect resolution failed, continuing to index rewrite");
            }
        }

        let uri = rewrite::rewrite_directory_index(&request.uri, &self.config.index_document);
        RequestOutcome::Forward(EdgeRequest { uri })
    }

    /// Response-side hook: merge header rules for the request path into the
    /// response. Never fails; an unexpected panic below this boundary is
    /// converted into a single bounded `x-hedgerules-error` header and the
    /// response is returned otherwise unmodified.
    pub async fn viewer_response(
        &self,
        request: &EdgeRequest,
        response: EdgeResponse,
    ) -> EdgeResponse {
        let original = response.clone();
        let merged = AssertUnwindSafe(self.apply_header_rules(request, response))
            .catch_unwind()
            .await;

        match merged {
            Ok(response) => response,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!(uri = %request.uri, error = %message, "resolution failed, returning response unmodified");
                let mut response = original;
                diagnostics::apply_error_header(&mut response, &message);
                response
            }
        }
    }

    async fn apply_header_rules(
        &self,
        request: &EdgeRequest,
        mut response: EdgeResponse,
    ) -> EdgeResponse {
        let outcome =
            merge::merge_headers(self.store.as_ref(), &request.uri, self.config.budget()).await;

        for (name, value) in &outcome.headers {
            response.set_header(name.clone(), value.clone());
        }

        if self.config.debug_headers {
            diagnostics::apply_debug_headers(&mut response, &outcome);
        }

        response
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected failure".to_string()
    }
}
