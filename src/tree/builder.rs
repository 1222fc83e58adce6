//! Tree builder for expanding flat manifest records into nested directories

use crate::error::TreeError;
use crate::manifest::PatchFile;
use crate::tree::index::DirectoryIndex;
use crate::tree::merge::{MergeObserver, TreeMerger};
use crate::tree::node::{self, DirectoryEntry, FileSystem, FileSystemEntry};
use crate::tree::path;
use crate::tree::sort;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Expanded tree plus the name index of its root level
///
/// The index built during de-duplication is kept so a following merge into
/// this tree does not rebuild it.
#[derive(Debug, Clone)]
pub struct Tree<F> {
    root: FileSystem<F>,
    index: DirectoryIndex,
}

impl<F: PatchFile> Tree<F> {
    pub fn root(&self) -> &FileSystem<F> {
        &self.root
    }

    /// Merge `other` into this tree. `other` is left untouched.
    pub fn merge(&mut self, other: &Tree<F>) -> Result<(), TreeError> {
        TreeMerger::new().merge_indexed(&mut self.root, &mut self.index, &other.root)
    }

    /// Merge with a caller-supplied merger (e.g. one carrying an observer)
    pub fn merge_with<O: MergeObserver>(
        &mut self,
        merger: &mut TreeMerger<O>,
        other: &Tree<F>,
    ) -> Result<(), TreeError> {
        merger.merge_indexed(&mut self.root, &mut self.index, &other.root)
    }

    /// Sort every level and hand the tree over for publication.
    ///
    /// Consuming the tree keeps sorting a one-time, final step.
    pub fn into_sorted(mut self) -> FileSystem<F> {
        sort::sort_file_system(&mut self.root);
        self.root
    }

    /// Unsorted root, in build and merge order
    pub fn into_root(self) -> FileSystem<F> {
        self.root
    }
}

/// Tree builder for expanding flat records into a directory tree
pub struct TreeBuilder<F> {
    entries: FileSystem<F>,
}

impl<F: PatchFile> TreeBuilder<F> {
    /// Create a builder over flat manifest records
    pub fn from_records(records: Vec<F>) -> Self {
        Self {
            entries: node::from_records(records),
        }
    }

    /// Create a builder over an existing, possibly partially expanded tree
    pub fn from_file_system(entries: FileSystem<F>) -> Self {
        Self { entries }
    }

    /// Expand every multi-segment path into a directory chain and collapse
    /// sibling directories that share a segment.
    #[instrument(skip(self), fields(entries = self.entries.len()))]
    pub fn build(self) -> Tree<F> {
        let start = Instant::now();
        let (root, index) = expand_level(self.entries);
        info!(
            top_level = root.len(),
            files = node::file_count(&root),
            duration_ms = start.elapsed().as_millis(),
            "Tree build completed"
        );
        Tree { root, index }
    }
}

/// Expand a file system without keeping the root index
pub fn expand<F: PatchFile>(fs: FileSystem<F>) -> FileSystem<F> {
    expand_level(fs).0
}

fn expand_level<F: PatchFile>(entries: FileSystem<F>) -> (FileSystem<F>, DirectoryIndex) {
    let mut expanded = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            FileSystemEntry::Directory(dir) => {
                let (children, _) = expand_level(dir.children);
                expanded.push(FileSystemEntry::Directory(DirectoryEntry::new(
                    dir.segment,
                    children,
                )));
            }
            FileSystemEntry::File(file) => expanded.push(peel(file)),
        }
    }
    collapse(expanded)
}

/// Peel leading segments off a file path, one directory per segment.
///
/// The chain is built from the leaf upward, so path depth never grows the stack.
fn peel<F: PatchFile>(mut file: F) -> FileSystemEntry<F> {
    let Some((parents, leaf)) = file.path().rsplit_once(path::SEPARATOR) else {
        return FileSystemEntry::File(file);
    };
    let parents: Vec<String> = parents.split(path::SEPARATOR).map(str::to_string).collect();
    let leaf = leaf.to_string();
    file.set_path(leaf);

    let mut entry = FileSystemEntry::File(file);
    for segment in parents.into_iter().rev() {
        entry = FileSystemEntry::Directory(DirectoryEntry::new(segment, vec![entry]));
    }
    entry
}

/// Merge sibling directories sharing a segment.
///
/// Children of duplicates are concatenated onto the first occurrence, then
/// every directory that received extra children is collapsed again one level
/// down. Files and first occurrences keep their input order.
fn collapse<F: PatchFile>(entries: FileSystem<F>) -> (FileSystem<F>, DirectoryIndex) {
    let mut clean: FileSystem<F> = Vec::with_capacity(entries.len());
    let mut index = DirectoryIndex::new();
    let mut grown = BTreeSet::new();

    for entry in entries {
        match entry {
            FileSystemEntry::File(file) => clean.push(FileSystemEntry::File(file)),
            FileSystemEntry::Directory(dir) => match index.position(&dir.segment) {
                Some(position) => {
                    if let Some(FileSystemEntry::Directory(existing)) = clean.get_mut(position) {
                        existing.children.extend(dir.children);
                        grown.insert(position);
                    }
                }
                None => {
                    index.insert(dir.segment.clone(), clean.len());
                    clean.push(FileSystemEntry::Directory(dir));
                }
            },
        }
    }

    if !grown.is_empty() {
        debug!(directories = grown.len(), "Collapsing duplicate directories");
    }
    for position in grown {
        if let Some(FileSystemEntry::Directory(existing)) = clean.get_mut(position) {
            let children = std::mem::take(&mut existing.children);
            existing.children = collapse(children).0;
        }
    }

    (clean, index)
}
