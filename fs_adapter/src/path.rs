//! Path normalization
//!
//! Supplied paths are resolved against the mounted root, never the process
//! working directory, and no segment may climb out of the tree.

use repo_api::NodeError;

/// Splits a slash-separated path into entry names.
///
/// Leading and trailing separators are tolerated; the empty path names the
/// root. Any segment that could not name an entry strictly below the root
/// (`.`, `..`, empty, embedded separator or NUL) is rejected.
pub(crate) fn split_path(path: &str) -> Result<Vec<&str>, NodeError> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let segments: Vec<&str> = trimmed.split('/').collect();
    for segment in &segments {
        if !is_valid_name(segment) {
            return Err(NodeError::OutsideRoot {
                path: path.to_string(),
            });
        }
    }

    Ok(segments)
}

/// Returns true if the name is valid for a single directory entry
pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\0')
}
