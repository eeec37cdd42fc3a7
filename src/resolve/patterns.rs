//! Lookup pattern generation.
//!
//! # Responsibilities
//! - Turn a request path into the ordered list of store keys to probe
//! - Order keys least to most specific so later matches can override earlier
//!
//! # Design Decisions
//! - Pure function, no I/O, never fails; always emits at least the root key
//! - Specificity order is fixed: root, directory prefixes shallow to deep,
//!   extension wildcard, exact path
//! - Extension case is preserved as authored in the request path

/// Normalize a request path to start with `/`.
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Build the ordered list of store keys for `path`, least to most specific.
///
/// For `/blog/2024/post.html` this yields:
/// `/`, `/blog/`, `/blog/2024/`, `*.html`, `/blog/2024/post.html`.
pub fn patterns_for(path: &str) -> Vec<String> {
    let path = normalize_path(path);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    // Root first, lowest priority.
    let mut patterns = vec!["/".to_string()];

    // Each proper parent directory with trailing slash, shallow to deep.
    for end in 1..segments.len() {
        patterns.push(format!("/{}/", segments[..end].join("/")));
    }

    // Extension wildcard, when the last segment has an interior dot.
    if let Some(last) = segments.last() {
        if let Some(dot) = last.rfind('.') {
            if dot > 0 && dot < last.len() - 1 {
                patterns.push(format!("*.{}", &last[dot + 1..]));
            }
        }
    }

    // Exact path, most specific.
    if path != "/" {
        patterns.push(path);
    }

    patterns
}
