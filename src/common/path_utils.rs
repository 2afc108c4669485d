//! Cross-platform path utilities for Rigup
//!
//! This module provides utilities for handling paths across different platforms
//! (Windows, macOS, Linux) with consistent behavior.

use std::path::Path;

/// Convert a path to a string with forward slashes
///
/// # Examples
///
/// ```ignore
/// let forward = to_forward_slashes(Path::new("config\\cors.ts"));
/// assert_eq!(forward, "config/cors.ts");
/// ```
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Check if a string looks like a path (contains path separators or relative path indicators)
pub fn is_path_like(s: &str) -> bool {
    s.starts_with("./")
        || s.starts_with("../")
        || s.starts_with('/')
        || s.starts_with(".\\")
        || s.starts_with("..\\")
        || Path::new(s).is_absolute()
        || (!s.starts_with('@') && (s.contains('/') || s.contains('\\')))
}

/// Drop a trailing `?query` suffix, e.g. `./pkg?v=2` -> `./pkg`
pub fn strip_query_suffix(s: &str) -> &str {
    match s.find('?') {
        Some(index) => &s[..index],
        None => s,
    }
}

/// Ensure a relative path never escapes its base via `..` or an absolute prefix
pub fn is_contained_relative(path: &str) -> bool {
    let path = Path::new(path);
    !path.is_absolute()
        && path
            .components()
            .all(|c| matches!(c, std::path::Component::Normal(_) | std::path::Component::CurDir))
}
