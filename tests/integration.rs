//! Integration tests for walks over the real filesystem
//!
//! Listing order on disk is unspecified, so these tests check relative order
//! (parents vs children, levels) rather than exact sequences.

mod harness;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use harness::{TestTree, position, relative_paths};
use stepwalk::test_utils::CountingFileSystem;
use stepwalk::{
    Cursor, ErrorHandler, OsFileSystem, Step, WalkConfig, Walker, collect_entries, start,
};

fn all_dirs() -> BTreeSet<PathBuf> {
    [
        "",
        "dogs",
        "dogs/wild",
        "dogs/domestic",
        "cats",
        "cats/wild",
        "cats/domestic",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

fn walk(tree: &TestTree, config: WalkConfig) -> Vec<PathBuf> {
    let entries = collect_entries(tree.path(), config).unwrap();
    relative_paths(tree.path(), &entries)
}

#[test]
fn test_every_order_visits_every_directory_once() {
    let tree = TestTree::animals();
    for config in [
        WalkConfig::default(),
        WalkConfig::default().breadth_first(),
        WalkConfig::default().bottom_up(),
    ] {
        let paths = walk(&tree, config);
        assert_eq!(paths.len(), 7, "got {:?}", paths);
        let unique: BTreeSet<_> = paths.into_iter().collect();
        assert_eq!(unique, all_dirs());
    }
}

#[test]
fn test_depth_first_keeps_subtrees_together() {
    let tree = TestTree::animals();
    let paths = walk(&tree, WalkConfig::default());

    assert_eq!(paths[0], PathBuf::new());
    for animal in ["dogs", "cats"] {
        let at = position(&paths, animal);
        let mut block: Vec<_> = paths[at + 1..at + 3]
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        block.sort();
        assert_eq!(
            block,
            vec![format!("{}/domestic", animal), format!("{}/wild", animal)]
        );
    }
}

#[test]
fn test_breadth_first_goes_level_by_level() {
    let tree = TestTree::animals();
    let paths = walk(&tree, WalkConfig::default().breadth_first());

    let depths: Vec<_> = paths.iter().map(|p| p.components().count()).collect();
    assert_eq!(depths, vec![0, 1, 1, 2, 2, 2, 2]);
}

#[test]
fn test_bottom_up_yields_children_before_parents() {
    let tree = TestTree::animals();
    let paths = walk(&tree, WalkConfig::default().bottom_up());

    assert_eq!(paths.last(), Some(&PathBuf::new()));
    for animal in ["dogs", "cats"] {
        let parent = position(&paths, animal);
        for kind in ["wild", "domestic"] {
            assert!(position(&paths, &format!("{}/{}", animal, kind)) < parent);
        }
    }
    let first = paths[0].to_string_lossy().into_owned();
    assert!(first.ends_with("wild") || first.ends_with("domestic"));
}

#[test]
fn test_root_entry_partitions_files_and_dirs() {
    let tree = TestTree::animals();
    let entry = start(tree.path(), WalkConfig::default())
        .unwrap()
        .into_entry()
        .unwrap();

    assert_eq!(entry.path, tree.path());
    let mut subdirs = entry.subdirs.clone();
    subdirs.sort();
    assert_eq!(subdirs, vec!["cats", "dogs"]);
    assert_eq!(entry.files, vec!["readme.txt"]);
}

#[test]
fn test_missing_root_yields_nothing() {
    let tree = TestTree::new();
    let missing = tree.path().join("missing");

    let step = start(&missing, WalkConfig::default()).unwrap();
    assert!(step.is_done());
}

#[test]
fn test_missing_root_reported_once_to_pair_handler() {
    let tree = TestTree::new();
    let missing = tree.path().join("missing");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let config = WalkConfig::default().on_error(ErrorHandler::inspect(move |failure| {
        sink.lock()
            .unwrap()
            .push((failure.path.clone(), failure.reason.kind()));
    }));

    let entries = collect_entries(&missing, config).unwrap();

    assert!(entries.is_empty());
    assert_eq!(
        *seen.lock().unwrap(),
        vec![(missing.clone(), std::io::ErrorKind::NotFound)]
    );
}

#[test]
fn test_missing_root_reported_once_to_parts_handler() {
    let tree = TestTree::new();
    let missing = tree.path().join("missing");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let config = WalkConfig::default().on_error(ErrorHandler::from_parts(move |path, reason| {
        sink.lock()
            .unwrap()
            .push((path.to_path_buf(), reason.kind()));
        Ok(())
    }));

    assert!(start(&missing, config).unwrap().is_done());
    assert_eq!(
        *seen.lock().unwrap(),
        vec![(missing.clone(), std::io::ErrorKind::NotFound)]
    );
}

#[test]
fn test_root_that_is_a_file_yields_nothing() {
    let tree = TestTree::new();
    let file = tree.add_file("plain.txt", "x");
    assert!(collect_entries(&file, WalkConfig::default()).unwrap().is_empty());
}

#[test]
fn test_restart_gives_same_sequence() {
    let tree = TestTree::animals();
    tree.add_file("cats/wild/lion.txt", "roar");

    let configs: [fn() -> WalkConfig; 3] = [
        WalkConfig::default,
        || WalkConfig::default().breadth_first(),
        || WalkConfig::default().bottom_up(),
    ];
    for make in configs {
        let first = collect_entries(tree.path(), make()).unwrap();
        let second = collect_entries(tree.path(), make()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_taking_k_entries_lists_k_directories() {
    let tree = TestTree::animals();
    let fs = CountingFileSystem::new(OsFileSystem);

    let taken: Vec<_> = Walker::with_filesystem(WalkConfig::default(), fs.clone())
        .entries(tree.path())
        .take(3)
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(taken.len(), 3);
    assert_eq!(fs.listing_count(), 3);
    let listed: Vec<_> = fs.listed();
    let walked: Vec<_> = taken.iter().map(|e| e.path.clone()).collect();
    assert_eq!(listed, walked);
}

#[test]
fn test_breadth_first_laziness() {
    let tree = TestTree::animals();
    let fs = CountingFileSystem::new(OsFileSystem);

    let mut step = Walker::with_filesystem(WalkConfig::default().breadth_first(), fs.clone())
        .start(tree.path())
        .unwrap();
    assert_eq!(fs.listing_count(), 1);

    if let Step::Yield(_, rest) = step {
        step = rest.resume().unwrap();
    }
    assert!(!step.is_done());
    assert_eq!(fs.listing_count(), 2);
}

#[test]
fn test_cursor_over_real_tree() {
    let tree = TestTree::animals();
    let mut cursor = Cursor::new(tree.path(), WalkConfig::default().bottom_up());

    let first = cursor.advance().unwrap().cloned().unwrap();
    assert!(first.is_leaf());
    assert!(!cursor.is_finished());

    let rest = cursor.run_to_end().unwrap();
    assert_eq!(rest.len(), 7);
    assert_eq!(rest.last().map(|e| e.path.as_path()), Some(tree.path()));
    assert!(cursor.is_finished());
}

#[test]
fn test_child_paths_resolve_on_disk() {
    let tree = TestTree::animals();
    for entry in collect_entries(tree.path(), WalkConfig::default()).unwrap() {
        for dir in entry.subdir_paths() {
            assert!(dir.is_dir(), "{} should be a directory", dir.display());
        }
        for file in entry.file_paths() {
            assert!(file.is_file(), "{} should be a file", file.display());
        }
    }
}
