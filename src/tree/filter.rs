//! Navigation by path segments
//!
//! Lookups miss softly: an unknown location yields an empty level instead of
//! an error, so a stale or mistyped location renders as an empty listing.

use crate::tree::node::{Directory, FileSystemEntry};
use crate::tree::path;

/// Descend one directory per segment.
///
/// No segments returns `fs` itself; any unmatched segment returns an empty level.
pub fn filter<'a, F, S: AsRef<str>>(fs: &'a Directory<F>, segments: &[S]) -> &'a [FileSystemEntry<F>] {
    let mut current: &'a [FileSystemEntry<F>] = fs;
    for segment in segments {
        let segment = segment.as_ref();
        let next = current.iter().find_map(|entry| match entry {
            FileSystemEntry::Directory(dir) if dir.segment == segment => Some(dir.children.as_slice()),
            _ => None,
        });
        match next {
            Some(children) => current = children,
            None => return &[],
        }
    }
    current
}

/// Descend along a slash-separated location such as `"data/win32"`
pub fn filter_location<'a, F>(fs: &'a Directory<F>, location: &str) -> &'a [FileSystemEntry<F>] {
    filter(fs, &path::split_segments(location))
}
