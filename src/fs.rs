//! Filesystem access used by the walker
//!
//! The walker never touches `std::fs` directly. Everything goes through the
//! [`FileSystem`] trait so tests can count or fake listings.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Operations the walker needs from a filesystem.
pub trait FileSystem {
    /// List the direct children of `path` by name.
    fn list_directory(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Whether `path` is a directory, following symlinks.
    fn is_directory(&self, path: &Path) -> bool;

    /// Whether `path` itself is a symlink (not followed).
    fn is_symlink(&self, path: &Path) -> bool;

    /// Join a listed name onto its parent directory.
    fn join(&self, base: &Path, name: &OsStr) -> PathBuf {
        base.join(name)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn list_directory(&self, path: &Path) -> io::Result<Vec<OsString>> {
        (**self).list_directory(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        (**self).is_directory(path)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        (**self).is_symlink(path)
    }

    fn join(&self, base: &Path, name: &OsStr) -> PathBuf {
        (**self).join(base, name)
    }
}

/// The operating system's filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    /// Names come back in `read_dir` order. A failure on any single entry
    /// fails the whole listing.
    fn list_directory(&self, path: &Path) -> io::Result<Vec<OsString>> {
        fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }

    fn is_directory(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok_and(|meta| meta.is_dir())
    }

    fn is_symlink(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
    }
}
