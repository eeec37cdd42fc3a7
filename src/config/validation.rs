//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and shapes before the config is accepted
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function over the parsed config

use std::net::SocketAddr;

use super::schema::EdgeConfig;

/// A single semantic configuration problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check the whole config, collecting every problem found.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address".to_string(),
            message: format!("not a valid socket address: {}", config.listener.bind_address),
        });
    }

    if config.resolver.budget_enabled && config.resolver.header_budget == 0 {
        errors.push(ValidationError {
            field: "resolver.header_budget".to_string(),
            message: "budget is enabled but zero; no header could ever be applied".to_string(),
        });
    }

    if config.resolver.index_document.is_empty() {
        errors.push(ValidationError {
            field: "resolver.index_document".to_string(),
            message: "must not be empty".to_string(),
        });
    } else if config.resolver.index_document.contains('/') {
        errors.push(ValidationError {
            field: "resolver.index_document".to_string(),
            message: "must be a bare document name, not a path".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
