//! Properties of built, merged and sorted trees

use patchtree::manifest::LauncherPatchFile;
use patchtree::tree::builder::expand;
use patchtree::tree::filter::filter;
use patchtree::tree::node::{self, FileSystem};
use patchtree::tree::size::total_size;
use patchtree::tree::sort::sort_file_system;
use patchtree::tree::TreeBuilder;
use proptest::prelude::*;

fn record_strategy() -> impl Strategy<Value = LauncherPatchFile> {
    (
        prop::collection::vec("[a-cA-C0-9]{1,2}", 1..4),
        0u64..10_000,
    )
        .prop_map(|(segments, size)| LauncherPatchFile {
            path: segments.join("/"),
            size,
            fingerprint: format!("H{}", size),
        })
}

fn records_strategy() -> impl Strategy<Value = Vec<LauncherPatchFile>> {
    prop::collection::vec(record_strategy(), 0..40)
}

fn sorted(records: Vec<LauncherPatchFile>) -> FileSystem<LauncherPatchFile> {
    TreeBuilder::from_records(records).build().into_sorted()
}

fn sorted_paths(fs: &FileSystem<LauncherPatchFile>) -> Vec<(String, u64)> {
    let mut paths: Vec<(String, u64)> = node::flatten(fs)
        .into_iter()
        .map(|f| (f.path, f.size))
        .collect();
    paths.sort();
    paths
}

/// Every record survives expansion exactly once, sizes included
#[test]
fn test_build_preserves_records_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&records_strategy(), |records| {
            let expected_size: u64 = records.iter().map(|r| r.size).sum();
            let mut expected: Vec<(String, u64)> =
                records.iter().map(|r| (r.path.clone(), r.size)).collect();
            expected.sort();

            let fs = sorted(records);
            prop_assert_eq!(node::file_count(&fs), expected.len());
            prop_assert_eq!(total_size(&fs), expected_size);
            prop_assert_eq!(sorted_paths(&fs), expected);
            Ok(())
        })
        .unwrap();
}

/// Flattening and rebuilding a sorted tree gives the same tree
#[test]
fn test_rebuild_is_idempotent_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&records_strategy(), |records| {
            let fs = sorted(records);
            let mut rebuilt = expand(node::from_records(node::flatten(&fs)));
            sort_file_system(&mut rebuilt);
            prop_assert_eq!(rebuilt, fs);
            Ok(())
        })
        .unwrap();
}

/// Sorting an already sorted tree changes nothing
#[test]
fn test_sort_is_idempotent_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&records_strategy(), |records| {
            let fs = sorted(records);
            let mut again = fs.clone();
            sort_file_system(&mut again);
            prop_assert_eq!(again, fs);
            Ok(())
        })
        .unwrap();
}

/// Merging two trees holds exactly the records of both, and the source is
/// never modified
#[test]
fn test_merge_is_union_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(records_strategy(), records_strategy()), |(left, right)| {
            let mut expected: Vec<(String, u64)> = left
                .iter()
                .chain(right.iter())
                .map(|r| (r.path.clone(), r.size))
                .collect();
            expected.sort();

            let mut dest = TreeBuilder::from_records(left).build();
            let src = TreeBuilder::from_records(right).build();
            let before = src.root().clone();
            dest.merge(&src).unwrap();

            prop_assert_eq!(src.root(), &before);
            prop_assert_eq!(sorted_paths(&dest.into_sorted()), expected);
            Ok(())
        })
        .unwrap();
}

/// Merging with an empty tree is the identity on either side
#[test]
fn test_merge_identity_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&records_strategy(), |records| {
            let tree = TreeBuilder::from_records(records).build();
            let empty = TreeBuilder::from_records(Vec::new()).build();
            let expected = tree.clone().into_sorted();

            let mut left = tree.clone();
            left.merge(&empty).unwrap();
            prop_assert_eq!(left.into_sorted(), expected.clone());

            let mut right = empty;
            right.merge(&tree).unwrap();
            prop_assert_eq!(right.into_sorted(), expected);
            Ok(())
        })
        .unwrap();
}

/// Sibling directory segments stay unique after a merge
#[test]
fn test_merge_keeps_segments_unique_property() {
    fn unique(level: &FileSystem<LauncherPatchFile>) -> bool {
        let mut segments: Vec<&str> = level
            .iter()
            .filter_map(|e| e.as_directory().map(|d| d.segment.as_str()))
            .collect();
        let count = segments.len();
        segments.sort_unstable();
        segments.dedup();
        segments.len() == count
            && level
                .iter()
                .filter_map(|e| e.as_directory())
                .all(|d| unique(&d.children))
    }

    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(records_strategy(), records_strategy()), |(left, right)| {
            let mut dest = TreeBuilder::from_records(left).build();
            dest.merge(&TreeBuilder::from_records(right).build()).unwrap();
            prop_assert!(unique(dest.root()));
            Ok(())
        })
        .unwrap();
}

/// An empty location is the whole tree; an unknown one is empty
#[test]
fn test_filter_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&records_strategy(), |records| {
            let fs = sorted(records);
            let none: [&str; 0] = [];
            prop_assert_eq!(filter(&fs, &none), &fs[..]);
            prop_assert!(filter(&fs, &["zz-not-generated"]).is_empty());
            Ok(())
        })
        .unwrap();
}
