//! Lazy directory tree walking
//!
//! A walk produces one [`DirEntry`] per directory, one step at a time:
//!
//! - [`Walker`] owns the configuration and the filesystem and starts walks
//! - [`Continuation`] is the rest of a walk; resuming it yields a [`Step`]
//! - [`Entries`] adapts a walk to [`Iterator`]
//!
//! Top-down walks keep a queue of pending paths and splice each directory's
//! children in at the front (depth-first) or back (breadth-first). Bottom-up
//! walks keep a stack of listed-but-unfinished directories and yield each one
//! once its last child subtree is done.

mod config;
mod entry;
mod error;
mod traversal;
mod walker;

pub use config::{Order, WalkConfig};
pub use entry::DirEntry;
pub use error::{ErrorHandler, HandlerError, Unreadable, WalkError};
pub use walker::{Continuation, Entries, Step, Walker, start};
