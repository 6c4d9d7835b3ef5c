//! JSON Lines output

use std::io::{self, Write};

use crate::walk::DirEntry;

use super::EntryOutput;

/// Writes one JSON object per directory entry, one per line.
pub struct JsonLinesFormatter<W: Write> {
    out: W,
}

impl JsonLinesFormatter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonLinesFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EntryOutput for JsonLinesFormatter<W> {
    fn output_entry(&mut self, entry: &DirEntry) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, entry).map_err(io::Error::other)?;
        writeln!(self.out)
    }

    fn finish(&mut self, _dir_count: usize, _file_count: usize) -> io::Result<()> {
        self.out.flush()
    }
}
