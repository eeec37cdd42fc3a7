//! Diagnostic response headers.
//!
//! # Responsibilities
//! - Attach debug headers describing what was probed, matched and truncated
//! - Attach the single bounded error header at the recovery boundary
//!
//! # Design Decisions
//! - Applied after the budgeted merge and never counted against the budget;
//!   each value is capped independently so diagnostics cannot blow the
//!   response-header limit themselves
//! - The error header is emitted regardless of the debug flag

use crate::event::EdgeResponse;

use super::merge::MergeOutcome;

pub const HEADER_PATTERNS: &str = "x-hedgerules-patterns";
pub const HEADER_MATCHED: &str = "x-hedgerules-matched";
pub const HEADER_SIZE: &str = "x-hedgerules-size";
pub const HEADER_TRUNCATED: &str = "x-hedgerules-truncated";
pub const HEADER_ERROR: &str = "x-hedgerules-error";

/// Maximum characters per diagnostic header value.
const MAX_DIAGNOSTIC_CHARS: usize = 200;

fn capped(value: &str) -> String {
    value.chars().take(MAX_DIAGNOSTIC_CHARS).collect()
}

/// Collapse CR/LF runs to a single space, then cap the length.
fn bounded_message(message: &str) -> String {
    let mut cleaned = String::with_capacity(message.len());
    let mut in_break = false;
    for ch in message.chars() {
        if ch == '\r' || ch == '\n' {
            if !in_break {
                cleaned.push(' ');
                in_break = true;
            }
        } else {
            cleaned.push(ch);
            in_break = false;
        }
    }
    capped(&cleaned)
}

/// Attach the debug headers for a completed merge.
pub fn apply_debug_headers(response: &mut EdgeResponse, outcome: &MergeOutcome) {
    response.set_header(HEADER_PATTERNS, capped(&outcome.patterns.join(",")));
    let matched: Vec<String> = outcome.matched.iter().map(|i| i.to_string()).collect();
    response.set_header(HEADER_MATCHED, capped(&matched.join(",")));
    response.set_header(HEADER_SIZE, outcome.total_bytes.to_string());
    if outcome.truncated {
        response.set_header(HEADER_TRUNCATED, "true");
    }
}

/// Attach the single bounded error header at the recovery boundary.
pub fn apply_error_header(response: &mut EdgeResponse, message: &str) {
    response.set_header(HEADER_ERROR, bounded_message(message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_headers_reflect_outcome() {
        let outcome = MergeOutcome {
            patterns: vec!["/".into(), "/a/".into(), "/a/b".into()],
            matched: vec![0, 2],
            total_bytes: 42,
            truncated: false,
            ..Default::default()
        };
        let mut response = EdgeResponse::default();
        apply_debug_headers(&mut response, &outcome);

        assert_eq!(response.header(HEADER_PATTERNS), Some("/,/a/,/a/b"));
        assert_eq!(response.header(HEADER_MATCHED), Some("0,2"));
        assert_eq!(response.header(HEADER_SIZE), Some("42"));
        assert_eq!(response.header(HEADER_TRUNCATED), None);
    }

    #[test]
    fn truncated_flag_adds_header() {
        let outcome = MergeOutcome {
            truncated: true,
            ..Default::default()
        };
        let mut response = EdgeResponse::default();
        apply_debug_headers(&mut response, &outcome);
        assert_eq!(response.header(HEADER_TRUNCATED), Some("true"));
    }

    #[test]
    fn long_pattern_list_is_capped_at_200_chars() {
        let outcome = MergeOutcome {
            patterns: (0..100).map(|i| format!("/segment-{i}/")).collect(),
            ..Default::default()
        };
        let mut response = EdgeResponse::default();
        apply_debug_headers(&mut response, &outcome);
        assert_eq!(
            response.header(HEADER_PATTERNS).unwrap().chars().count(),
            200
        );
    }

    #[test]
    fn error_message_is_stripped_and_capped() {
        let mut response = EdgeResponse::default();
        let noisy = format!("boom\r\n\r\nline two {}", "x".repeat(300));
        apply_error_header(&mut response, &noisy);

        let value = response.header(HEADER_ERROR).unwrap();
        assert!(value.starts_with("boom line two"));
        assert!(!value.contains('\n'));
        assert!(value.chars().count() <= 200);
    }
}
