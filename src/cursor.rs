//! Cursor - accumulates the entries of a walk as it is advanced
//!
//! Holds the current continuation and everything produced so far. It adds no
//! traversal logic of its own.

use std::path::Path;

use crate::fs::{FileSystem, OsFileSystem};
use crate::walk::{Continuation, DirEntry, Step, WalkConfig, WalkError, Walker};

/// Stateful wrapper around a walk.
#[derive(Debug)]
pub struct Cursor<F = OsFileSystem> {
    next: Option<Continuation<F>>,
    results: Vec<DirEntry>,
}

impl Cursor<OsFileSystem> {
    /// Cursor over a walk of the real filesystem. Does no I/O yet.
    pub fn new(root: impl AsRef<Path>, config: WalkConfig) -> Self {
        Self::with_walker(Walker::new(config), root)
    }
}

impl<F: FileSystem> Cursor<F> {
    pub fn with_walker(walker: Walker<F>, root: impl AsRef<Path>) -> Self {
        Self::from_continuation(walker.continuation(root))
    }

    pub fn from_continuation(continuation: Continuation<F>) -> Self {
        Self {
            next: Some(continuation),
            results: Vec::new(),
        }
    }

    /// Run one step. Returns the new entry, or `None` once the walk is over.
    ///
    /// A failing error handler finishes the cursor; entries gathered before
    /// the failure are kept.
    pub fn advance(&mut self) -> Result<Option<&DirEntry>, WalkError> {
        let Some(continuation) = self.next.take() else {
            return Ok(None);
        };
        match continuation.resume()? {
            Step::Yield(entry, rest) => {
                self.next = Some(rest);
                self.results.push(entry);
                Ok(self.results.last())
            }
            Step::Done => Ok(None),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.next.is_none()
    }

    /// The most recently produced entry.
    pub fn latest(&self) -> Option<&DirEntry> {
        self.results.last()
    }

    /// Every entry produced so far, oldest first.
    pub fn results(&self) -> &[DirEntry] {
        &self.results
    }

    pub fn into_results(self) -> Vec<DirEntry> {
        self.results
    }

    /// Advance until the walk is over.
    pub fn run_to_end(&mut self) -> Result<&[DirEntry], WalkError> {
        while self.advance()?.is_some() {}
        Ok(&self.results)
    }
}

impl<F: FileSystem> Iterator for Cursor<F> {
    type Item = Result<DirEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(entry) => entry.cloned().map(Ok),
            Err(e) => Some(Err(e)),
        }
    }
}

/// Walk all of `root` and return every entry in walk order.
pub fn collect_entries(
    root: impl AsRef<Path>,
    config: WalkConfig,
) -> Result<Vec<DirEntry>, WalkError> {
    let mut cursor = Cursor::new(root, config);
    cursor.run_to_end()?;
    Ok(cursor.into_results())
}
