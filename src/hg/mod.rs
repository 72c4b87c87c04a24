//! hg command execution layer
//!
//! This module handles running hg commands, in the foreground or on the
//! background worker pool, and parsing their output.

pub mod constants;
mod executor;
/// Parser module (public for integration testing)
pub mod parser;
mod template;
mod worker;

pub use executor::{CommandExecutor, CommandRequest, ProcessExecutor, StderrPolicy};
pub use parser::Parser;
pub use template::{FIELD_COUNT, FIELD_SEPARATOR, HgCommands, RECORD_SEPARATOR, Templates};
pub use worker::{Completion, CommandWorker, Ticket};

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::NavigatorError;

/// Errors that can occur while driving hg
#[derive(Error, Debug)]
pub enum HgError {
    #[error("Nothing selected to search for")]
    NoSelection,

    #[error("Not in a saved file")]
    UnsavedFile,

    #[error("{command} wrote to stderr: {stderr}")]
    ProcessFailure { command: String, stderr: String },

    #[error("{command} failed (exit code {exit_code}): {stderr}")]
    CommandFailed {
        command: String,
        stderr: String,
        exit_code: i32,
    },

    #[error("Malformed log record #{index}: {fragment:?}")]
    MalformedRecord { index: usize, fragment: String },

    #[error("Cannot split command line: {0}")]
    InvalidCommand(String),

    #[error("{0} is not installed or not in PATH")]
    ToolNotFound(String),

    #[error("{command} timed out after {secs}s")]
    Timeout { command: String, secs: u64 },

    #[error("Output of {command} is not valid UTF-8")]
    Decode { command: String },

    #[error("Working directory does not exist: {}", .0.display())]
    MissingWorkingDir(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error(transparent)]
    Navigator(#[from] NavigatorError),
}
