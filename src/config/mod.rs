//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → EdgeConfig (validated, immutable)
//!     → resolver constants bound at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the resolver's constants are bound at
//!   construction just like a build-time deployment would bind them
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{EdgeConfig, ListenerConfig, ResolverConfig, StoreConfig};
pub use schema::{DEFAULT_HEADER_BUDGET, DEFAULT_INDEX_DOCUMENT};
pub use validation::{validate_config, ValidationError};
