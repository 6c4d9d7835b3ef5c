//! Stepwalk - lazy, resumable directory tree walking, one directory per step

pub mod cursor;
pub mod fs;
pub mod output;
pub mod walk;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use cursor::{Cursor, collect_entries};
pub use fs::{FileSystem, OsFileSystem};
pub use output::{EntryOutput, JsonLinesFormatter, OutputConfig, StreamingFormatter};
pub use walk::{
    Continuation, DirEntry, Entries, ErrorHandler, HandlerError, Order, Step, Unreadable,
    WalkConfig, WalkError, Walker, start,
};
