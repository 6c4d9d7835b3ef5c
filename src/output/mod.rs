//! Entry formatting and display
//!
//! - `config` - Output configuration types
//! - `streaming` - Text formatter with optional colors
//! - `json` - JSON Lines output

mod config;
mod json;
mod streaming;

use std::io;

use crate::walk::DirEntry;

pub use config::OutputConfig;
pub use json::JsonLinesFormatter;
pub use streaming::StreamingFormatter;

/// Receives directory entries as a walk produces them.
pub trait EntryOutput {
    fn output_entry(&mut self, entry: &DirEntry) -> io::Result<()>;

    fn finish(&mut self, dir_count: usize, file_count: usize) -> io::Result<()>;
}
