//! Listing logic shared by every walk order.
//!
//! Each order decides where child paths go in the pending work; reading a
//! directory and splitting its children is the same for all of them.

use std::collections::VecDeque;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::fs::FileSystem;

use super::config::WalkConfig;
use super::entry::DirEntry;
use super::error::{Unreadable, WalkError, dispatch};

/// A listed directory together with the full paths of its subdirectories.
#[derive(Debug)]
pub(crate) struct Listing {
    pub entry: DirEntry,
    pub children: Vec<PathBuf>,
}

/// Filesystem plus configuration: everything a step needs besides the
/// pending work itself.
#[derive(Debug)]
pub(crate) struct BaseTraversal<F> {
    pub fs: F,
    pub config: WalkConfig,
}

impl<F: FileSystem> BaseTraversal<F> {
    pub fn new(fs: F, config: WalkConfig) -> Self {
        Self { fs, config }
    }

    /// Symlinks are skipped outright unless the walk follows them.
    pub fn should_skip(&self, path: &Path) -> bool {
        !self.config.follow_symlinks && self.fs.is_symlink(path)
    }

    /// Get the name of a listed child as a display string.
    pub fn get_name(name: &OsStr) -> String {
        name.to_string_lossy().into_owned()
    }

    /// Read a directory and split its children into subdirectories and files.
    pub fn list_and_partition(&self, path: &Path) -> io::Result<Listing> {
        let names = self.fs.list_directory(path)?;

        let mut subdirs = Vec::new();
        let mut files = Vec::new();
        let mut children = Vec::new();

        for name in names {
            let child = self.fs.join(path, &name);
            if self.fs.is_directory(&child) {
                subdirs.push(Self::get_name(&name));
                children.push(child);
            } else {
                files.push(Self::get_name(&name));
            }
        }

        debug!(
            path = %path.display(),
            subdirs = subdirs.len(),
            files = files.len(),
            "listed directory"
        );

        Ok(Listing {
            entry: DirEntry::new(path, subdirs, files),
            children,
        })
    }

    /// Try to list one pending path.
    ///
    /// Returns `Ok(None)` when the path is a skipped symlink or could not be
    /// listed; the failure has then already gone to the error handler.
    pub fn visit(&mut self, path: &Path) -> Result<Option<Listing>, WalkError> {
        if self.should_skip(path) {
            debug!(path = %path.display(), "skipping symlink");
            return Ok(None);
        }

        match self.list_and_partition(path) {
            Ok(listing) => Ok(Some(listing)),
            Err(reason) => {
                debug!(path = %path.display(), error = %reason, "unreadable directory");
                dispatch(self.config.on_error.as_mut(), Unreadable::new(path, reason))?;
                Ok(None)
            }
        }
    }

    /// Queue children for a top-down walk: in front of the pending work for
    /// depth-first, behind it for breadth-first. Listing order is kept either
    /// way.
    pub fn splice_children(&self, pending: &mut VecDeque<PathBuf>, children: Vec<PathBuf>) {
        if self.config.depth_first {
            for child in children.into_iter().rev() {
                pending.push_front(child);
            }
        } else {
            pending.extend(children);
        }
    }
}
