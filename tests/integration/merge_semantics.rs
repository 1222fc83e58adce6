//! Merge behaviour across manifests

use super::test_utils::{full_paths, game, launcher, names};
use patchtree::manifest::{GamePatchFile, LauncherPatchFile, PatchLocation};
use patchtree::tree::node::{self, FileSystemEntry};
use patchtree::tree::{MergeObserver, TreeBuilder, TreeMerger};

/// Counts merge hooks, keeping the segments that were scanned for
#[derive(Debug, Default)]
struct CountingObserver {
    fast_paths: usize,
    scans: Vec<String>,
}

impl MergeObserver for CountingObserver {
    fn fast_path(&mut self, _directories: usize) {
        self.fast_paths += 1;
    }

    fn existence_scan(&mut self, segment: &str) {
        self.scans.push(segment.to_string());
    }
}

/// Files under the same directory from two manifests end up side by side
#[test]
fn test_merge_then_sort_combines_directory() {
    let mut first = TreeBuilder::from_records(vec![launcher("x/1.txt", 1)]).build();
    let second = TreeBuilder::from_records(vec![launcher("x/2.txt", 2)]).build();
    first.merge(&second).unwrap();
    let fs = first.into_sorted();

    assert_eq!(names(&fs), vec!["x"]);
    let x = fs[0].as_directory().unwrap();
    assert_eq!(names(&x.children), vec!["1.txt", "2.txt"]);
    assert!(x.children.iter().all(FileSystemEntry::is_file));
}

fn classic() -> Vec<GamePatchFile> {
    vec![
        game("win32/0001", 10, PatchLocation::Master),
        game("win32/0002", 20, PatchLocation::Patch),
        game("data/license.txt.pat", 3, PatchLocation::Patch),
    ]
}

fn reboot() -> Vec<GamePatchFile> {
    vec![
        game("win32/0003", 30, PatchLocation::Master),
        game("data/docs/readme.txt.pat", 4, PatchLocation::Patch),
        game("win32/sub/0004", 40, PatchLocation::Master),
    ]
}

/// Matching top-level segments with no top-level files skip the per-entry
/// existence scan and produce the same tree as the per-entry path
#[test]
fn test_fast_path_matches_per_entry_merge() {
    let mut fast = TreeBuilder::from_records(classic()).build();
    let src = TreeBuilder::from_records(reboot()).build();
    let mut merger = TreeMerger::with_observer(CountingObserver::default());
    fast.merge_with(&mut merger, &src).unwrap();
    let observer = merger.into_observer();

    assert!(observer.fast_paths >= 1);
    assert!(!observer.scans.iter().any(|s| s == "win32" || s == "data"));

    // A stray top-level file forces the per-entry path on the root level
    let mut slow = TreeBuilder::from_records(classic()).build();
    let mut with_file = reboot();
    with_file.push(game("top.bin", 0, PatchLocation::Patch));
    let src_with_file = TreeBuilder::from_records(with_file).build();
    let mut merger = TreeMerger::with_observer(CountingObserver::default());
    slow.merge_with(&mut merger, &src_with_file).unwrap();
    let observer = merger.into_observer();
    assert!(observer.scans.iter().any(|s| s == "win32"));
    assert!(observer.scans.iter().any(|s| s == "data"));

    let fast = fast.into_sorted();
    let slow = slow.into_sorted();
    let mut fast_paths = full_paths(&fast);
    let mut slow_paths = full_paths(&slow);
    slow_paths.retain(|p| p != "top.bin");
    fast_paths.sort();
    slow_paths.sort();
    assert_eq!(fast_paths, slow_paths);

    let slow_without_file: Vec<_> = slow.into_iter().filter(|e| e.name() != "top.bin").collect();
    assert_eq!(fast, slow_without_file);
}

/// Merging an empty tree in either direction changes nothing
#[test]
fn test_empty_tree_is_identity() {
    let tree = TreeBuilder::from_records(vec![launcher("a/b.txt", 1), launcher("c.txt", 2)]).build();
    let empty = TreeBuilder::<LauncherPatchFile>::from_records(Vec::new()).build();

    let mut left = tree.clone();
    left.merge(&empty).unwrap();
    assert_eq!(left.into_sorted(), tree.clone().into_sorted());

    let mut right = empty.clone();
    right.merge(&tree).unwrap();
    assert_eq!(right.into_sorted(), tree.into_sorted());
}

/// Grouping of merges over disjoint paths does not matter once sorted
#[test]
fn test_merge_is_associative_on_disjoint_paths() {
    let a = TreeBuilder::from_records(vec![launcher("d/a.txt", 1), launcher("e/x", 1)]).build();
    let b = TreeBuilder::from_records(vec![launcher("d/b.txt", 1), launcher("f", 1)]).build();
    let c = TreeBuilder::from_records(vec![launcher("d/sub/c.txt", 1), launcher("e/y", 1)]).build();

    let mut left = a.clone();
    left.merge(&b).unwrap();
    left.merge(&c).unwrap();

    let mut bc = b.clone();
    bc.merge(&c).unwrap();
    let mut right = a.clone();
    right.merge(&bc).unwrap();

    assert_eq!(left.into_sorted(), right.into_sorted());
}

/// The source tree is untouched and shares nothing with the result
#[test]
fn test_merge_leaves_source_intact() {
    let mut dest = TreeBuilder::from_records(vec![launcher("a/1", 1)]).build();
    let src = TreeBuilder::from_records(vec![launcher("b/2", 2), launcher("a/3", 3)]).build();
    let before = src.root().clone();

    dest.merge(&src).unwrap();
    assert_eq!(src.root(), &before);

    let mut merged = dest.into_sorted();
    if let FileSystemEntry::Directory(b) = &mut merged[1] {
        b.children.clear();
    }
    assert_eq!(src.root(), &before);
    assert_eq!(node::file_count(src.root()), 2);
}

/// Duplicate paths across manifests are kept as separate entries
#[test]
fn test_duplicate_paths_are_kept() {
    let mut first = TreeBuilder::from_records(vec![launcher("a/same", 1)]).build();
    let second = TreeBuilder::from_records(vec![launcher("a/same", 2)]).build();
    first.merge(&second).unwrap();
    let fs = first.into_sorted();
    let sizes: Vec<u64> = node::flatten(&fs).iter().map(|f| f.size).collect();
    assert_eq!(sizes, vec![1, 2]);
}
