//! Streaming text formatter
//!
//! Writes each directory entry as soon as the walk produces it.

use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::walk::DirEntry;

use super::EntryOutput;
use super::config::OutputConfig;

/// Text formatter: a colored header line per directory followed by its
/// subdirectory and file names.
pub struct StreamingFormatter<W: WriteColor = StandardStream> {
    config: OutputConfig,
    out: W,
}

impl StreamingFormatter<StandardStream> {
    pub fn new(config: OutputConfig) -> Self {
        let choice = if config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self::with_writer(config, StandardStream::stdout(choice))
    }
}

impl<W: WriteColor> StreamingFormatter<W> {
    pub fn with_writer(config: OutputConfig, out: W) -> Self {
        Self { config, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_names(&mut self, label: &str, names: &[String]) -> io::Result<()> {
        if names.is_empty() {
            return Ok(());
        }
        writeln!(self.out, "  {}: {}", label, names.join(", "))
    }
}

impl<W: WriteColor> EntryOutput for StreamingFormatter<W> {
    fn output_entry(&mut self, entry: &DirEntry) -> io::Result<()> {
        if self.config.use_color {
            self.out
                .set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        }
        write!(self.out, "{}/", entry.path.display())?;
        self.out.reset()?;
        writeln!(self.out)?;

        self.write_names("dirs", &entry.subdirs)?;
        self.write_names("files", &entry.files)
    }

    fn finish(&mut self, dir_count: usize, file_count: usize) -> io::Result<()> {
        if self.config.show_summary {
            writeln!(self.out)?;
            writeln!(self.out, "{} directories, {} files", dir_count, file_count)?;
        }
        self.out.flush()
    }
}
