//! Diagnostic log setup
//!
//! Filtering follows `RUST_LOG`, falling back to [`DEFAULT_FILTER`]. The TUI
//! owns the terminal, so it only logs when a log file is given.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "hgcomb=info";

/// Where diagnostics go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Appended to, created if missing
    File(PathBuf),
    Discard,
}

impl LogTarget {
    /// Target for the terminal UI
    pub fn for_tui(log_file: Option<&Path>) -> Self {
        log_file.map_or(Self::Discard, |path| Self::File(path.to_path_buf()))
    }

    /// Target for the line-oriented subcommands
    pub fn for_cli(log_file: Option<&Path>) -> Self {
        log_file.map_or(Self::Stderr, |path| Self::File(path.to_path_buf()))
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber
pub fn init(target: &LogTarget) -> io::Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());

    let installed = match target {
        LogTarget::Discard => return Ok(()),
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    installed.map_err(io::Error::other)
}
