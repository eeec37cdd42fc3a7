//! Event shapes exchanged with the hosting edge runtime.
//!
//! # Responsibilities
//! - Model the request object handed to the request-side hook
//! - Model the response object handed to the response-side hook
//! - Model the redirect descriptor that replaces a request entirely
//!
//! # Design Decisions
//! - Plain serde-derived data, no behavior beyond header accessors
//! - Header values wrapped in `{ value }` to match the runtime's wire shape
//! - `BTreeMap` keyed by lowercase name gives deterministic iteration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Viewer request as seen by the request-side hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRequest {
    /// Request URI path, e.g. `/blog/post.html`.
    pub uri: String,
}

impl EdgeRequest {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

/// A single header value in the runtime's `{ value }` wrapper shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderValue {
    pub value: String,
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        Self { value }
    }
}

/// Viewer response as seen by the response-side hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeResponse {
    #[serde(default)]
    pub headers: BTreeMap<String, HeaderValue>,
}

impl EdgeResponse {
    /// Set a header, replacing any existing value under the same name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(
            name.into(),
            HeaderValue {
                value: value.into(),
            },
        );
    }

    /// Look up a header value by exact (lowercase) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|h| h.value.as_str())
    }
}

/// Redirect descriptor returned in place of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectResponse {
    pub status_code: u16,
    pub status_description: String,
    pub headers: BTreeMap<String, HeaderValue>,
}

impl RedirectResponse {
    /// Permanent redirect to `location`.
    pub fn moved_permanently(location: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("location".to_string(), HeaderValue::from(location.into()));
        Self {
            status_code: 301,
            status_description: "Moved Permanently".to_string(),
            headers,
        }
    }

    /// The `location` header target, if present.
    pub fn location(&self) -> Option<&str> {
        self.headers.get("location").map(|h| h.value.as_str())
    }
}

/// Outcome of the request-side hook: either pass the (possibly rewritten)
/// request through to the origin, or answer with a redirect immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Forward(EdgeRequest),
    Redirect(RedirectResponse),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_descriptor_shape() {
        let redirect = RedirectResponse::moved_permanently("/new-home/");
        assert_eq!(redirect.status_code, 301);
        assert_eq!(redirect.status_description, "Moved Permanently");
        assert_eq!(redirect.location(), Some("/new-home/"));

        let json = serde_json::to_value(&redirect).unwrap();
        assert_eq!(json["statusCode"], 301);
        assert_eq!(json["headers"]["location"]["value"], "/new-home/");
    }

    #[test]
    fn response_set_header_overwrites() {
        let mut response = EdgeResponse::default();
        response.set_header("x-a", "1");
        response.set_header("x-a", "2");
        assert_eq!(response.header("x-a"), Some("2"));
    }
}
