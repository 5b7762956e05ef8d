//! Path parsing
//!
//! Absolute paths only: `/` followed by one or more non-empty segments
//! without spaces, separated by `/`, with an optional trailing `/`.

use crate::error::{FsError, Result};

/// Path separator
pub const SEPARATOR: char = '/';

/// Split an absolute path into its segments
///
/// `"/a/b/c/"` and `"/a/b/c"` both yield `["a", "b", "c"]`. The root path
/// `"/"` has no segments and is rejected here; see [`parse_directory_path`].
pub fn parse_path(path: &str) -> Result<Vec<String>> {
    let malformed = || FsError::MalformedPathStructure(path.to_string());

    let trimmed = path.strip_suffix(SEPARATOR).unwrap_or(path);
    let body = trimmed.strip_prefix(SEPARATOR).ok_or_else(malformed)?;
    if body.is_empty() {
        return Err(malformed());
    }

    body.split(SEPARATOR)
        .map(|segment| {
            if segment.is_empty() || segment.contains(' ') {
                Err(malformed())
            } else {
                Ok(segment.to_string())
            }
        })
        .collect()
}

/// Like [`parse_path`], but `"/"` is accepted and names the root
pub fn parse_directory_path(path: &str) -> Result<Vec<String>> {
    if path == "/" {
        return Ok(Vec::new());
    }
    parse_path(path)
}

/// Render segments back into an absolute path
pub fn display_path(segments: &[String]) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push(SEPARATOR);
        out.push_str(segment);
    }
    if out.is_empty() {
        out.push(SEPARATOR);
    }
    out
}
