//! Patch File Tree
//!
//! Nested directory trees built from flat manifest records: expansion,
//! merging of independently built trees, deterministic ordering, size
//! aggregation and lookup by path segments.

pub mod builder;
pub mod collate;
pub mod filter;
pub mod index;
pub mod merge;
pub mod node;
pub mod path;
pub mod size;
pub mod sort;

pub use builder::{Tree, TreeBuilder};
pub use index::DirectoryIndex;
pub use merge::{MergeObserver, NoopObserver, TreeMerger};
pub use node::{Directory, DirectoryEntry, FileSystem, FileSystemEntry};
