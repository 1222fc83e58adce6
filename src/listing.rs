//! Listing helpers for directory views
//!
//! Human-readable sizes, rows for one directory level and the route list of
//! every directory in a tree.

use crate::manifest::PatchFile;
use crate::tree::node::{Directory, FileSystemEntry};
use crate::tree::path;
use crate::tree::size;
use serde::Serialize;

const SIZE_LABELS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with binary units.
///
/// Values are truncated, not rounded, to two decimals and printed in their
/// shortest form: `0B`, `1KB`, `1.5KB`, `1.99MB`. Anything past the last label
/// stays in TB.
pub fn format_size(bytes: u64) -> String {
    let mut exponent = 0;
    let mut divisor: u128 = 1;
    while exponent < SIZE_LABELS.len() - 1 && u128::from(bytes) >= divisor * 1024 {
        divisor *= 1024;
        exponent += 1;
    }

    let hundredths = u128::from(bytes) * 100 / divisor;
    let whole = hundredths / 100;
    let fraction = hundredths % 100;
    let number = if fraction == 0 {
        whole.to_string()
    } else if fraction % 10 == 0 {
        format!("{}.{}", whole, fraction / 10)
    } else {
        format!("{}.{:02}", whole, fraction)
    };
    format!("{}{}", number, SIZE_LABELS[exponent])
}

/// Kind of a listed entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRow {
    pub name: String,
    pub kind: EntryKind,
    /// File size, or the total beneath a directory
    pub size: u64,
    /// Files only
    pub fingerprint: Option<String>,
}

/// Rows for one directory level, in tree order
pub fn list_directory<F: PatchFile>(dir: &[FileSystemEntry<F>]) -> Vec<ListingRow> {
    dir.iter()
        .map(|entry| match entry {
            FileSystemEntry::Directory(child) => ListingRow {
                name: child.segment.clone(),
                kind: EntryKind::Directory,
                size: size::total_size(&child.children),
                fingerprint: None,
            },
            FileSystemEntry::File(file) => ListingRow {
                name: file.path().to_string(),
                kind: EntryKind::File,
                size: file.size(),
                fingerprint: Some(file.fingerprint().to_string()),
            },
        })
        .collect()
}

/// Slash-joined path of every directory, depth-first
pub fn directory_routes<F>(fs: &Directory<F>) -> Vec<String> {
    let mut routes = Vec::new();
    let mut prefix = Vec::new();
    collect_routes(fs, &mut prefix, &mut routes);
    routes
}

fn collect_routes<'a, F>(dir: &'a Directory<F>, prefix: &mut Vec<&'a str>, routes: &mut Vec<String>) {
    for entry in dir {
        if let FileSystemEntry::Directory(child) = entry {
            prefix.push(&child.segment);
            routes.push(path::join_segments(&prefix[..]));
            collect_routes(&child.children, prefix, routes);
            prefix.pop();
        }
    }
}
