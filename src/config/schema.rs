//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal config is valid. Values are bound
//! once at startup; there is no runtime reload.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default response-header byte budget.
///
/// The hosting runtime caps total response headers at 8 KB; roughly half is
/// reserved for origin/CDN headers and diagnostics, leaving this for rules.
pub const DEFAULT_HEADER_BUDGET: usize = 4096;

/// Default document appended to directory requests.
pub const DEFAULT_INDEX_DOCUMENT: &str = "index.html";

/// Root configuration for the edge resolver and its local harness.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration for the simulation harness.
    pub listener: ListenerConfig,

    /// Rule store snapshot to serve from.
    pub store: StoreConfig,

    /// Resolution behavior (budget, debug headers, index document).
    pub resolver: ResolverConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Rule store configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to a JSON snapshot of key→value rule entries. When absent the
    /// harness starts with an empty store.
    pub snapshot_path: Option<PathBuf>,
}

/// Resolver constants, bound at construction.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Whether the header byte budget is enforced at all.
    pub budget_enabled: bool,

    /// Byte budget for merged headers when enforcement is enabled.
    pub header_budget: usize,

    /// Emit x-hedgerules-* diagnostic headers.
    pub debug_headers: bool,

    /// Document appended to directory requests.
    pub index_document: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            budget_enabled: true,
            header_budget: DEFAULT_HEADER_BUDGET,
            debug_headers: false,
            index_document: DEFAULT_INDEX_DOCUMENT.to_string(),
        }
    }
}

impl ResolverConfig {
    /// Effective budget: `None` when enforcement is disabled.
    pub fn budget(&self) -> Option<usize> {
        self.budget_enabled.then_some(self.header_budget)
    }
}
