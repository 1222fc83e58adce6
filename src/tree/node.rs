//! Tree node types

use crate::manifest::PatchFile;
use crate::tree::path;
use serde::Serialize;

/// One entry of a directory level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileSystemEntry<F> {
    /// A file record; its stored path is the leaf segment once expanded
    File(F),
    /// A named directory
    Directory(DirectoryEntry<F>),
}

/// A named directory and its children
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry<F> {
    pub segment: String,
    pub children: Directory<F>,
}

/// Ordered entries at one nesting level
pub type Directory<F> = Vec<FileSystemEntry<F>>;

/// A directory used as the unnamed root of a whole tree
pub type FileSystem<F> = Directory<F>;

impl<F> DirectoryEntry<F> {
    pub fn new(segment: impl Into<String>, children: Directory<F>) -> Self {
        Self {
            segment: segment.into(),
            children,
        }
    }
}

impl<F: PatchFile> FileSystemEntry<F> {
    /// Display name: the directory segment or the file's stored path
    pub fn name(&self) -> &str {
        match self {
            FileSystemEntry::File(file) => file.path(),
            FileSystemEntry::Directory(dir) => &dir.segment,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, FileSystemEntry::Directory(_))
    }

    pub fn is_file(&self) -> bool {
        matches!(self, FileSystemEntry::File(_))
    }

    pub fn as_directory(&self) -> Option<&DirectoryEntry<F>> {
        match self {
            FileSystemEntry::Directory(dir) => Some(dir),
            FileSystemEntry::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&F> {
        match self {
            FileSystemEntry::File(file) => Some(file),
            FileSystemEntry::Directory(_) => None,
        }
    }
}

/// Wrap flat records as top-level file entries, ready for expansion
pub fn from_records<F>(records: Vec<F>) -> FileSystem<F> {
    records.into_iter().map(FileSystemEntry::File).collect()
}

/// Depth-first flattening back to records carrying full paths
pub fn flatten<F: PatchFile>(fs: &FileSystem<F>) -> Vec<F> {
    let mut records = Vec::new();
    let mut prefix = Vec::new();
    flatten_into(fs, &mut prefix, &mut records);
    records
}

fn flatten_into<'a, F: PatchFile>(
    dir: &'a Directory<F>,
    prefix: &mut Vec<&'a str>,
    records: &mut Vec<F>,
) {
    for entry in dir {
        match entry {
            FileSystemEntry::File(file) => {
                let mut record = file.clone();
                if !prefix.is_empty() {
                    let mut segments = prefix.clone();
                    segments.push(file.path());
                    record.set_path(path::join_segments(&segments));
                }
                records.push(record);
            }
            FileSystemEntry::Directory(child) => {
                prefix.push(&child.segment);
                flatten_into(&child.children, prefix, records);
                prefix.pop();
            }
        }
    }
}

/// Copy a tree, converting every file record and keeping the shape
pub fn map_files<F, G>(dir: &Directory<F>, convert: &impl Fn(&F) -> G) -> Directory<G> {
    dir.iter()
        .map(|entry| match entry {
            FileSystemEntry::File(file) => FileSystemEntry::File(convert(file)),
            FileSystemEntry::Directory(child) => FileSystemEntry::Directory(DirectoryEntry::new(
                child.segment.clone(),
                map_files(&child.children, convert),
            )),
        })
        .collect()
}

/// Number of file entries anywhere beneath `dir`
pub fn file_count<F>(dir: &Directory<F>) -> usize {
    dir.iter()
        .map(|entry| match entry {
            FileSystemEntry::File(_) => 1,
            FileSystemEntry::Directory(child) => file_count(&child.children),
        })
        .sum()
}
