//! HTTP simulation subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route)
//!     → resolver request hook (301 or index rewrite)
//!     → resolver response hook (header merge, diagnostics)
//!     → response to client
//! ```

pub mod server;

pub use server::{build_router, HarnessServer};
