//! Deterministic ordering of every directory level

use crate::manifest::PatchFile;
use crate::tree::collate;
use crate::tree::node::{Directory, FileSystemEntry};
use std::cmp::Ordering;

/// Order two entries: directories first, then by collated name.
///
/// Directories compare by segment, files by their stored path.
pub fn compare_entries<F: PatchFile>(a: &FileSystemEntry<F>, b: &FileSystemEntry<F>) -> Ordering {
    match (a, b) {
        (FileSystemEntry::Directory(_), FileSystemEntry::File(_)) => Ordering::Less,
        (FileSystemEntry::File(_), FileSystemEntry::Directory(_)) => Ordering::Greater,
        (FileSystemEntry::Directory(a), FileSystemEntry::Directory(b)) => {
            collate::compare(&a.segment, &b.segment)
        }
        (FileSystemEntry::File(a), FileSystemEntry::File(b)) => collate::compare(a.path(), b.path()),
    }
}

/// Stable, recursive, in-place sort of every level
pub fn sort_file_system<F: PatchFile>(dir: &mut Directory<F>) {
    dir.sort_by(compare_entries);
    for entry in dir.iter_mut() {
        if let FileSystemEntry::Directory(child) = entry {
            sort_file_system(&mut child.children);
        }
    }
}
