//! Test harness for stepwalk integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use stepwalk::DirEntry;

pub use stepwalk::test_utils::TestTree;

pub fn run_stepwalk(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = env!("CARGO_BIN_EXE_stepwalk");
    let output = Command::new(binary)
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to run stepwalk");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

/// Paths of the yielded entries relative to `root`, with the root itself as "".
pub fn relative_paths(root: &Path, entries: &[DirEntry]) -> Vec<PathBuf> {
    entries
        .iter()
        .map(|entry| {
            entry
                .path
                .strip_prefix(root)
                .expect("entry outside root")
                .to_path_buf()
        })
        .collect()
}

pub fn position(paths: &[PathBuf], path: &str) -> usize {
    paths
        .iter()
        .position(|p| p == Path::new(path))
        .unwrap_or_else(|| panic!("{} not walked: {:?}", path, paths))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_creates_temp_dir() {
        let tree = TestTree::new();
        assert!(tree.path().exists());
    }

    #[test]
    fn test_harness_add_file() {
        let tree = TestTree::new();
        let file_path = tree.add_file("nested/test.txt", "data");
        assert!(file_path.exists());
    }
}
