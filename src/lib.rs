//! Edge header-rule resolution library.
//!
//! Resolves, per request/response pair, an optional exact-match redirect and
//! a specificity-ordered merge of response headers sourced from a read-only
//! key-value rule store. The request-side hook redirects or rewrites
//! directory requests to a default document; the response-side hook probes
//! the store along a least-to-most-specific pattern ladder and merges the
//! matched rule bodies under an optional byte budget.

pub mod config;
pub mod event;
pub mod http;
pub mod resolve;
pub mod store;

pub use config::{EdgeConfig, ResolverConfig};
pub use event::{EdgeRequest, EdgeResponse, RedirectResponse, RequestOutcome};
pub use resolve::Resolver;
pub use store::{MemoryStore, RuleStore};
