//! One directory's listing, split into subdirectories and files

use std::path::{Path, PathBuf};

use serde::Serialize;

/// The listing of a single directory.
///
/// `subdirs` and `files` hold bare names in the order the filesystem
/// returned them. Nothing is sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    pub path: PathBuf,
    pub subdirs: Vec<String>,
    pub files: Vec<String>,
}

impl DirEntry {
    pub fn new(path: impl Into<PathBuf>, subdirs: Vec<String>, files: Vec<String>) -> Self {
        Self {
            path: path.into(),
            subdirs,
            files,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full paths of the subdirectories.
    pub fn subdir_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.subdirs.iter().map(|name| self.path.join(name))
    }

    /// Full paths of the files.
    pub fn file_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.files.iter().map(|name| self.path.join(name))
    }

    /// True when the directory has no subdirectories.
    pub fn is_leaf(&self) -> bool {
        self.subdirs.is_empty()
    }
}
