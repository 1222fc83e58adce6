//! In-place merging of one tree into another
//!
//! The destination becomes the union of both trees; the source is only read.
//! Anything taken from the source is cloned, so the two trees never share
//! nodes afterwards. Files are always appended, even when a file with the same
//! path already exists: entries from different manifests stay distinct.

use crate::error::TreeError;
use crate::manifest::PatchFile;
use crate::tree::index::DirectoryIndex;
use crate::tree::node::{Directory, DirectoryEntry, FileSystemEntry};
use tracing::{error, trace};

/// Hooks fired while merging, for instrumentation
pub trait MergeObserver {
    /// A level took the fast path; `directories` shared segments are merged directly
    fn fast_path(&mut self, _directories: usize) {}

    /// A source directory was looked up in the destination on the per-entry path
    fn existence_scan(&mut self, _segment: &str) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl MergeObserver for NoopObserver {}

/// Recursive tree merger
#[derive(Debug, Default)]
pub struct TreeMerger<O = NoopObserver> {
    observer: O,
}

impl TreeMerger<NoopObserver> {
    pub fn new() -> Self {
        Self {
            observer: NoopObserver,
        }
    }
}

impl<O: MergeObserver> TreeMerger<O> {
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Merge `src` into `dest`, indexing `dest` first
    pub fn merge<F: PatchFile>(
        &mut self,
        dest: &mut Directory<F>,
        src: &Directory<F>,
    ) -> Result<(), TreeError> {
        let mut index = DirectoryIndex::build(dest);
        self.merge_indexed(dest, &mut index, src)
    }

    /// Merge `src` into `dest` using an existing index of `dest`.
    ///
    /// The index is kept current as directories are appended. When both
    /// levels hold the same directory segments and `src` has no files at this
    /// level, every source directory is known to have a match and the
    /// per-entry existence check is skipped. A match the index promises but
    /// `dest` does not hold is an invariant violation and aborts the merge;
    /// `dest` may then be partially merged and must be discarded.
    pub fn merge_indexed<F: PatchFile>(
        &mut self,
        dest: &mut Directory<F>,
        index: &mut DirectoryIndex,
        src: &Directory<F>,
    ) -> Result<(), TreeError> {
        let src_index = DirectoryIndex::build(src);
        let src_has_files = src.iter().any(|entry| entry.is_file());

        if !src_has_files && index.same_segments(&src_index) {
            self.observer.fast_path(src_index.len());
            trace!(directories = src_index.len(), "Merge fast path");
            for entry in src {
                if let FileSystemEntry::Directory(dir) = entry {
                    let existing = matching_directory(dest, index.position(&dir.segment), dir)?;
                    self.merge(&mut existing.children, &dir.children)?;
                }
            }
            return Ok(());
        }

        for entry in src {
            match entry {
                FileSystemEntry::File(file) => dest.push(FileSystemEntry::File(file.clone())),
                FileSystemEntry::Directory(dir) => {
                    self.observer.existence_scan(&dir.segment);
                    match index.position(&dir.segment) {
                        Some(position) => {
                            let existing = matching_directory(dest, Some(position), dir)?;
                            self.merge(&mut existing.children, &dir.children)?;
                        }
                        None => {
                            index.insert(dir.segment.clone(), dest.len());
                            dest.push(FileSystemEntry::Directory(dir.clone()));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Resolve an indexed position to the destination directory with the same segment
fn matching_directory<'a, F>(
    dest: &'a mut Directory<F>,
    position: Option<usize>,
    wanted: &DirectoryEntry<F>,
) -> Result<&'a mut DirectoryEntry<F>, TreeError> {
    match position.and_then(|p| dest.get_mut(p)) {
        Some(FileSystemEntry::Directory(existing)) if existing.segment == wanted.segment => {
            Ok(existing)
        }
        _ => {
            error!(segment = %wanted.segment, "Merge directory entry is missing");
            Err(TreeError::MergeInvariant {
                segment: wanted.segment.clone(),
            })
        }
    }
}
