//! Directory index rewriting.
//!
//! Pure request-path transformation applied when no redirect fired: a
//! trailing-slash request fetches the directory's default document.

/// Append `index_document` to `uri` when it names a directory.
pub fn rewrite_directory_index(uri: &str, index_document: &str) -> String {
    if uri.ends_with('/') {
        format!("{uri}{index_document}")
    } else {
        uri.to_string()
    }
}
