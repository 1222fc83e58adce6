//! Size aggregation
//!
//! Plain recursive sums, recomputed on every call. Callers listing the same
//! unchanged level repeatedly should keep the results themselves. Totals
//! saturate at `u64::MAX`.

use crate::manifest::PatchFile;
use crate::tree::node::FileSystemEntry;

/// Total size of every file beneath `dir`, nested directories included
pub fn total_size<F: PatchFile>(dir: &[FileSystemEntry<F>]) -> u64 {
    dir.iter()
        .fold(0u64, |total, entry| total.saturating_add(entry_size(entry)))
}

/// Size of one entry: the file size, or the total beneath a directory
pub fn entry_size<F: PatchFile>(entry: &FileSystemEntry<F>) -> u64 {
    match entry {
        FileSystemEntry::File(file) => file.size(),
        FileSystemEntry::Directory(dir) => total_size(&dir.children),
    }
}
