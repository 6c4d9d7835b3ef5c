//! CLI entry point for stepwalk

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use stepwalk::{
    EntryOutput, ErrorHandler, JsonLinesFormatter, OutputConfig, StreamingFormatter, WalkConfig,
    WalkError, Walker,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "stepwalk")]
#[command(about = "Walk a directory tree one directory at a time")]
#[command(version)]
struct Args {
    /// Directory to walk
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Visit each level completely before going deeper
    #[arg(long = "breadth-first", conflicts_with = "bottom_up")]
    breadth_first: bool,

    /// Print every directory after all of its descendants
    #[arg(short = 'b', long = "bottom-up")]
    bottom_up: bool,

    /// Descend into symlinked directories (no cycle detection)
    #[arg(short = 'L', long = "follow-symlinks")]
    follow_symlinks: bool,

    /// Stop after N directories
    #[arg(short = 'n', long = "limit", value_name = "N")]
    limit: Option<usize>,

    /// Output one JSON object per directory
    #[arg(long = "json")]
    json: bool,

    /// Do not report unreadable directories
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Walk(#[from] WalkError),
    #[error("error writing output: {0}")]
    Output(#[from] io::Error),
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn walk_config(args: &Args) -> WalkConfig {
    let mut config = WalkConfig {
        depth_first: !args.breadth_first,
        top_down: !args.bottom_up,
        follow_symlinks: args.follow_symlinks,
        ..Default::default()
    };
    if !args.quiet {
        config = config.on_error(ErrorHandler::inspect(|failure| {
            eprintln!("stepwalk: {}", failure);
        }));
    }
    config
}

/// Stream the walk into `output`. Returns (dir_count, file_count).
fn run<O: EntryOutput>(
    walker: Walker,
    root: &Path,
    limit: Option<usize>,
    output: &mut O,
) -> Result<(usize, usize), CliError> {
    let mut dir_count = 0usize;
    let mut file_count = 0usize;

    for entry in walker.entries(root).take(limit.unwrap_or(usize::MAX)) {
        let entry = entry?;
        dir_count += 1;
        file_count += entry.files.len();
        output.output_entry(&entry)?;
    }

    output.finish(dir_count, file_count)?;
    Ok((dir_count, file_count))
}

fn main() {
    let args = Args::parse();
    init_logging();

    let walker = Walker::new(walk_config(&args));

    let result = if args.json {
        let mut formatter = JsonLinesFormatter::stdout();
        run(walker, &args.path, args.limit, &mut formatter)
    } else {
        let output_config = OutputConfig {
            use_color: should_use_color(args.color),
            ..Default::default()
        };
        let mut formatter = StreamingFormatter::new(output_config);
        run(walker, &args.path, args.limit, &mut formatter)
    };

    match result {
        Ok((dirs, files)) => {
            tracing::debug!(dirs, files, "walk complete");
        }
        Err(e) => {
            eprintln!("stepwalk: {}", e);
            process::exit(1);
        }
    }
}
