//! Rule body parsing.
//!
//! # Responsibilities
//! - Split a stored rule body into ordered header entries
//! - Normalize names (trimmed, lowercased) and values (trimmed)
//! - Substitute the `{/path}` placeholder with the current request path
//!
//! # Design Decisions
//! - Malformed lines (no separator, empty name) drop silently; rule bodies
//!   are authored out-of-band and the edge must stay permissive
//! - Only the first `{/path}` occurrence per value is substituted

/// Token replaced by the current request path in rule values.
pub const PATH_PLACEHOLDER: &str = "{/path}";

/// One parsed `name: value` rule line, in original line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    /// Trimmed, lowercased header name.
    pub name: String,
    /// Trimmed value with `{/path}` resolved.
    pub value: String,
}

impl HeaderEntry {
    /// Byte cost of this entry against the response-header budget.
    /// The constant accounts for the `: ` separator and line terminator.
    pub fn cost(&self) -> usize {
        self.name.len() + self.value.len() + 4
    }
}

/// Parse a newline-separated rule body against the current request path.
pub fn parse_rule_body(body: &str, path: &str) -> Vec<HeaderEntry> {
    let mut entries = Vec::new();

    for line in body.lines() {
        let line = line.trim();
        let Some(sep) = line.find(':') else {
            continue;
        };

        let name = line[..sep].trim().to_lowercase();
        if name.is_empty() {
            continue;
        }

        let value = line[sep + 1..].trim().replacen(PATH_PLACEHOLDER, path, 1);
        entries.push(HeaderEntry { name, value });
    }

    entries
}
