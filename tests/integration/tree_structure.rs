//! Tree expansion from manifest text

use super::test_utils::{full_paths, launcher, names};
use patchtree::manifest::{parse_launcher_list, LauncherPatchFile};
use patchtree::tree::node::FileSystemEntry;
use patchtree::tree::size::total_size;
use patchtree::tree::TreeBuilder;

/// A two-line launcher list expands into nested directories with leaf-only paths
#[test]
fn test_manifest_expands_to_nested_directories() {
    let records = parse_launcher_list("a/b/c.txt\t10\tHASH1\na/d.txt\t5\tHASH2\n").unwrap();
    let fs = TreeBuilder::from_records(records).build().into_root();

    assert_eq!(fs.len(), 1);
    let a = fs[0].as_directory().expect("a is a directory");
    assert_eq!(a.segment, "a");
    assert_eq!(a.children.len(), 2);

    let b = a.children[0].as_directory().expect("b is a directory");
    assert_eq!(b.segment, "b");
    assert_eq!(
        b.children,
        vec![FileSystemEntry::File(LauncherPatchFile {
            path: "c.txt".to_string(),
            size: 10,
            fingerprint: "HASH1".to_string(),
        })]
    );
    assert_eq!(
        a.children[1],
        FileSystemEntry::File(LauncherPatchFile {
            path: "d.txt".to_string(),
            size: 5,
            fingerprint: "HASH2".to_string(),
        })
    );

    assert_eq!(total_size(&fs), 15);
}

/// Siblings never share a directory segment, however the input is ordered
#[test]
fn test_sibling_segments_are_unique() {
    let records = vec![
        launcher("data/one", 1),
        launcher("root.txt", 1),
        launcher("data/sub/two", 1),
        launcher("other/three", 1),
        launcher("data/sub/four", 1),
        launcher("data/five", 1),
    ];
    let fs = TreeBuilder::from_records(records).build().into_sorted();

    fn check(level: &[FileSystemEntry<LauncherPatchFile>]) {
        let mut segments: Vec<&str> = level
            .iter()
            .filter_map(|e| e.as_directory().map(|d| d.segment.as_str()))
            .collect();
        let before = segments.len();
        segments.sort_unstable();
        segments.dedup();
        assert_eq!(segments.len(), before);
        for entry in level {
            if let Some(dir) = entry.as_directory() {
                check(&dir.children);
            }
        }
    }
    check(&fs);

    assert_eq!(names(&fs), vec!["data", "other", "root.txt"]);
    let mut paths = full_paths(&fs);
    paths.sort();
    assert_eq!(
        paths,
        vec![
            "data/five",
            "data/one",
            "data/sub/four",
            "data/sub/two",
            "other/three",
            "root.txt"
        ]
    );
}

/// Empty paths and empty manifests build empty trees
#[test]
fn test_empty_manifest_builds_empty_tree() {
    let records = parse_launcher_list("\r\n\r\n").unwrap();
    assert!(records.is_empty());
    let fs = TreeBuilder::from_records(records).build().into_sorted();
    assert!(fs.is_empty());
    assert_eq!(total_size(&fs), 0);
}

/// A malformed size fails the whole manifest
#[test]
fn test_malformed_size_rejects_manifest() {
    let result = parse_launcher_list("a.txt\t10\tH1\nb.txt\tlots\tH2\n");
    assert!(result.is_err());
}
