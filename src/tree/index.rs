//! Segment-to-position lookup for one directory level
//!
//! Positions stay valid while the indexed directory is only appended to,
//! which holds for the whole build and merge phase. Sorting invalidates it.

use crate::tree::node::{Directory, FileSystemEntry};
use std::collections::HashMap;

/// Name index of the directory entries at one level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryIndex {
    positions: HashMap<String, usize>,
}

impl DirectoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every directory entry of `dir`. The first occurrence of a segment wins.
    pub fn build<F>(dir: &Directory<F>) -> Self {
        let mut index = Self::new();
        for (position, entry) in dir.iter().enumerate() {
            if let FileSystemEntry::Directory(child) = entry {
                index
                    .positions
                    .entry(child.segment.clone())
                    .or_insert(position);
            }
        }
        index
    }

    /// Position of the directory named `segment`
    pub fn position(&self, segment: &str) -> Option<usize> {
        self.positions.get(segment).copied()
    }

    pub fn contains(&self, segment: &str) -> bool {
        self.positions.contains_key(segment)
    }

    /// Record a directory appended at `position`
    pub fn insert(&mut self, segment: String, position: usize) {
        self.positions.insert(segment, position);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }

    /// True when both levels hold exactly the same set of directory segments
    pub fn same_segments(&self, other: &DirectoryIndex) -> bool {
        self.len() == other.len() && other.segments().all(|segment| self.contains(segment))
    }
}
