//! Rule store abstraction.
//!
//! # Data Flow
//! ```text
//! resolver probe (pattern or exact URI)
//!     → RuleStore::get (the only suspension point in a resolution)
//!     → Ok(Lookup::Hit)  → rule body handed to the parser
//!     → Ok(Lookup::Miss) → next pattern
//!     → Err(StoreError)  → logged, treated exactly like a miss
//! ```
//!
//! # Design Decisions
//! - The store handle is supplied explicitly at construction; there is no
//!   self-discovery of an associated store
//! - Miss is a normal outcome and gets its own variant rather than an error
//! - Callers branch on the three cases explicitly; a transport failure must
//!   never abort a resolution

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod snapshot;

pub use memory::MemoryStore;
pub use snapshot::{load_snapshot, SnapshotError, SnapshotStats, SnapshotViolation};

/// Result of a single key probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The key exists; the raw stored value.
    Hit(String),
    /// The key does not exist. Expected, not an error.
    Miss,
}

/// Transport-level store failure. Resolution treats this like a miss.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store transport failure: {0}")]
    Transport(String),
}

/// Read-only key-value collaborator holding rule bodies and redirect targets.
///
/// Populated out-of-band; the resolver never writes to it.
#[async_trait]
pub trait RuleStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Lookup, StoreError>;
}
