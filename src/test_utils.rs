//! Test utilities: temporary directory trees and instrumented filesystems.
//!
//! This module is only compiled for tests, benchmarks and the `test-utils`
//! feature.

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use crate::fs::FileSystem;

/// A temporary directory tree on the real filesystem.
///
/// The directory is automatically cleaned up when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a directory, along with any missing parents.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Add a file. Creates parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Create a symlink at `path` pointing to `target` (relative to the tree
    /// root).
    #[cfg(unix)]
    pub fn add_symlink(&self, path: &str, target: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        std::os::unix::fs::symlink(self.dir.path().join(target), &full_path)
            .expect("Failed to create symlink");
        full_path
    }

    /// The `root{dogs{wild,domestic}, cats{wild,domestic}}` tree used across
    /// the order tests, with a file in the root.
    pub fn animals() -> Self {
        let tree = Self::new();
        for dir in ["dogs/wild", "dogs/domestic", "cats/wild", "cats/domestic"] {
            tree.add_dir(dir);
        }
        tree.add_file("readme.txt", "animals");
        tree
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
enum Node {
    Dir(Vec<OsString>),
    File,
    Symlink(PathBuf),
    Denied,
}

/// An in-memory filesystem whose listings come back in insertion order.
///
/// Paths are used as given; there is no current directory. Symlink targets
/// are paths inside the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    nodes: HashMap<PathBuf, Node>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory. Parents are created as needed.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), Node::Dir(Vec::new()));
    }

    /// Add a file. Parents are created as needed.
    pub fn add_file(&mut self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), Node::File);
    }

    /// Add a symlink at `path` pointing to `target`.
    pub fn add_symlink(&mut self, path: impl AsRef<Path>, target: impl AsRef<Path>) {
        self.insert(path.as_ref(), Node::Symlink(target.as_ref().to_path_buf()));
    }

    /// Make listing `path` fail with permission denied. The path still shows
    /// up as a directory in its parent.
    pub fn deny(&mut self, path: impl AsRef<Path>) {
        if let Some(node) = self.nodes.get_mut(path.as_ref()) {
            *node = Node::Denied;
        }
    }

    fn insert(&mut self, path: &Path, node: Node) {
        if self.nodes.contains_key(path) {
            return;
        }
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            if !parent.as_os_str().is_empty() {
                self.add_dir(parent);
                if let Some(Node::Dir(children)) = self.nodes.get_mut(parent) {
                    children.push(name.to_os_string());
                }
            }
        }
        self.nodes.insert(path.to_path_buf(), node);
    }

    /// Resolve every symlink along `path`, including the last component.
    fn resolve(&self, path: &Path) -> Option<PathBuf> {
        let mut current = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(name) => current.push(name),
                other => current.push(other.as_os_str()),
            }
            current = self.follow(current)?;
        }
        Some(current)
    }

    fn follow(&self, mut path: PathBuf) -> Option<PathBuf> {
        for _ in 0..40 {
            match self.nodes.get(&path) {
                Some(Node::Symlink(target)) => path = target.clone(),
                _ => return Some(path),
            }
        }
        None
    }

    fn node(&self, path: &Path) -> Option<&Node> {
        self.resolve(path).and_then(|p| self.nodes.get(&p))
    }
}

impl FileSystem for MemoryFileSystem {
    fn list_directory(&self, path: &Path) -> io::Result<Vec<OsString>> {
        match self.node(path) {
            Some(Node::Dir(children)) => Ok(children.clone()),
            Some(Node::Denied) => Err(io::Error::from(io::ErrorKind::PermissionDenied)),
            Some(Node::File) => Err(io::Error::from(io::ErrorKind::NotADirectory)),
            Some(Node::Symlink(_)) | None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }

    fn is_directory(&self, path: &Path) -> bool {
        matches!(self.node(path), Some(Node::Dir(_) | Node::Denied))
    }

    fn is_symlink(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => match self.resolve(parent) {
                Some(parent) => parent,
                None => return false,
            },
            _ => PathBuf::new(),
        };
        matches!(self.nodes.get(&parent.join(name)), Some(Node::Symlink(_)))
    }
}

/// Wraps a filesystem and records every directory listing.
///
/// Clones share the same log, so keep one clone for assertions and hand
/// the other to the walker.
#[derive(Debug, Clone)]
pub struct CountingFileSystem<F> {
    inner: F,
    listed: Arc<Mutex<Vec<PathBuf>>>,
}

impl<F: FileSystem> CountingFileSystem<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            listed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Paths listed so far, in order.
    pub fn listed(&self) -> Vec<PathBuf> {
        self.listed.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn listing_count(&self) -> usize {
        self.listed.lock().map(|l| l.len()).unwrap_or_default()
    }
}

impl<F: FileSystem> FileSystem for CountingFileSystem<F> {
    fn list_directory(&self, path: &Path) -> io::Result<Vec<OsString>> {
        if let Ok(mut listed) = self.listed.lock() {
            listed.push(path.to_path_buf());
        }
        self.inner.list_directory(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        self.inner.is_directory(path)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        self.inner.is_symlink(path)
    }

    fn join(&self, base: &Path, name: &OsStr) -> PathBuf {
        self.inner.join(base, name)
    }
}
