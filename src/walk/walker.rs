//! Walker - resumable, one-directory-per-step traversal
//!
//! A walk is a chain of [`Continuation`] values. Resuming one lists at most
//! the directories needed to reach the next [`DirEntry`] and hands back the
//! entry together with the continuation for the rest of the walk.

use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::fs::{FileSystem, OsFileSystem};

use super::config::{Order, WalkConfig};
use super::entry::DirEntry;
use super::error::WalkError;
use super::traversal::{BaseTraversal, Listing};

/// Outcome of one step.
#[derive(Debug)]
pub enum Step<F = OsFileSystem> {
    /// The next directory, plus the rest of the walk.
    Yield(DirEntry, Continuation<F>),
    /// Nothing left to list.
    Done,
}

impl<F> Step<F> {
    pub fn is_done(&self) -> bool {
        matches!(self, Step::Done)
    }

    /// The yielded entry, dropping the continuation.
    pub fn into_entry(self) -> Option<DirEntry> {
        match self {
            Step::Yield(entry, _) => Some(entry),
            Step::Done => None,
        }
    }
}

/// A directory that has been listed in a bottom-up walk but whose children
/// are not finished yet.
#[derive(Debug)]
struct Frame {
    entry: DirEntry,
    children: VecDeque<PathBuf>,
}

impl From<Listing> for Frame {
    fn from(listing: Listing) -> Self {
        Self {
            entry: listing.entry,
            children: listing.children.into(),
        }
    }
}

/// Work left to do.
#[derive(Debug)]
enum Frontier {
    /// Paths not listed yet. Depth-first pushes children at the front,
    /// breadth-first at the back.
    TopDown { pending: VecDeque<PathBuf> },
    /// `frames` is the chain of directories whose children are still being
    /// walked, innermost last. `pending` only holds paths outside any frame.
    BottomUp {
        pending: VecDeque<PathBuf>,
        frames: Vec<Frame>,
    },
}

/// The rest of a walk.
///
/// Creating one does no I/O. Each [`resume`](Continuation::resume) consumes
/// it and performs exactly one step.
#[derive(Debug)]
pub struct Continuation<F = OsFileSystem> {
    base: BaseTraversal<F>,
    frontier: Frontier,
}

impl<F: FileSystem> Continuation<F> {
    pub fn new(root: impl Into<PathBuf>, config: WalkConfig, fs: F) -> Self {
        let pending = VecDeque::from([root.into()]);
        let frontier = match config.order() {
            Order::BottomUp => {
                if !config.depth_first {
                    debug!("bottom-up walks are always depth-first; ignoring breadth-first");
                }
                Frontier::BottomUp {
                    pending,
                    frames: Vec::new(),
                }
            }
            Order::DepthFirst | Order::BreadthFirst => Frontier::TopDown { pending },
        };
        Self {
            base: BaseTraversal::new(fs, config),
            frontier,
        }
    }

    /// Produce the next directory entry, or [`Step::Done`].
    ///
    /// Unreadable directories and skipped symlinks are absorbed inside the
    /// step. The only error is a failing error handler, which consumes the
    /// walk.
    pub fn resume(mut self) -> Result<Step<F>, WalkError> {
        let next = match &mut self.frontier {
            Frontier::TopDown { pending } => next_top_down(&mut self.base, pending)?,
            Frontier::BottomUp { pending, frames } => {
                next_bottom_up(&mut self.base, pending, frames)?
            }
        };

        match next {
            Some(entry) => {
                trace!(path = %entry.path.display(), "yield");
                Ok(Step::Yield(entry, self))
            }
            None => {
                trace!("walk finished");
                Ok(Step::Done)
            }
        }
    }

    /// Pull-style iterator over the rest of the walk.
    pub fn into_entries(self) -> Entries<F> {
        Entries { next: Some(self) }
    }

    /// Number of paths and open bottom-up frames still waiting.
    pub fn pending_len(&self) -> usize {
        match &self.frontier {
            Frontier::TopDown { pending } => pending.len(),
            Frontier::BottomUp { pending, frames } => {
                pending.len()
                    + frames.len()
                    + frames.iter().map(|f| f.children.len()).sum::<usize>()
            }
        }
    }
}

fn next_top_down<F: FileSystem>(
    base: &mut BaseTraversal<F>,
    pending: &mut VecDeque<PathBuf>,
) -> Result<Option<DirEntry>, WalkError> {
    while let Some(path) = pending.pop_front() {
        if let Some(listing) = base.visit(&path)? {
            base.splice_children(pending, listing.children);
            return Ok(Some(listing.entry));
        }
    }
    Ok(None)
}

/// Descend along the first unfinished child until reaching a directory with
/// nothing left below it, then yield that directory.
fn next_bottom_up<F: FileSystem>(
    base: &mut BaseTraversal<F>,
    pending: &mut VecDeque<PathBuf>,
    frames: &mut Vec<Frame>,
) -> Result<Option<DirEntry>, WalkError> {
    loop {
        let next = match frames.last_mut() {
            Some(frame) => frame.children.pop_front(),
            None => pending.pop_front(),
        };

        match next {
            Some(path) => {
                if let Some(listing) = base.visit(&path)? {
                    frames.push(Frame::from(listing));
                }
            }
            None => return Ok(frames.pop().map(|frame| frame.entry)),
        }
    }
}

/// Iterator adapter over a walk. Ends after the first error.
#[derive(Debug)]
pub struct Entries<F = OsFileSystem> {
    next: Option<Continuation<F>>,
}

impl<F: FileSystem> Iterator for Entries<F> {
    type Item = Result<DirEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        let continuation = self.next.take()?;
        match continuation.resume() {
            Ok(Step::Yield(entry, rest)) => {
                self.next = Some(rest);
                Some(Ok(entry))
            }
            Ok(Step::Done) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl<F: FileSystem> FusedIterator for Entries<F> {}

/// Entry point for walks: owns the configuration and filesystem.
#[derive(Debug)]
pub struct Walker<F = OsFileSystem> {
    config: WalkConfig,
    fs: F,
}

impl Walker<OsFileSystem> {
    pub fn new(config: WalkConfig) -> Self {
        Self::with_filesystem(config, OsFileSystem)
    }
}

impl<F: FileSystem> Walker<F> {
    pub fn with_filesystem(config: WalkConfig, fs: F) -> Self {
        Self { config, fs }
    }

    /// The walk rooted at `root`, not started yet.
    pub fn continuation(self, root: impl AsRef<Path>) -> Continuation<F> {
        let root = root.as_ref();
        debug!(root = %root.display(), order = ?self.config.order(), "starting walk");
        Continuation::new(root, self.config, self.fs)
    }

    /// Take the first step of the walk rooted at `root`.
    pub fn start(self, root: impl AsRef<Path>) -> Result<Step<F>, WalkError> {
        self.continuation(root).resume()
    }

    /// The walk rooted at `root` as an iterator.
    pub fn entries(self, root: impl AsRef<Path>) -> Entries<F> {
        self.continuation(root).into_entries()
    }
}

/// Take the first step of a walk over the real filesystem.
pub fn start(root: impl AsRef<Path>, config: WalkConfig) -> Result<Step, WalkError> {
    Walker::new(config).start(root)
}
