//! Manifest path segment utilities
//!
//! Manifest paths are relative and always use `/`, regardless of platform.

/// Separator used by every manifest path
pub const SEPARATOR: char = '/';

/// Split a browse location into segments.
///
/// Leading, trailing and repeated separators are dropped, so `"/a//b/"`
/// yields `["a", "b"]`. Manifest paths are never passed through here.
pub fn split_segments(location: &str) -> Vec<&str> {
    location
        .split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Join segments back into a manifest path
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let mut joined = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            joined.push(SEPARATOR);
        }
        joined.push_str(segment.as_ref());
    }
    joined
}
