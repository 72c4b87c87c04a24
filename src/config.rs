//! Command-line configuration
//!
//! Every knob of the history pipeline is a flag. Flags are global so they
//! may appear before or after the subcommand.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::hg::constants::{DEFAULT_LOG_LIMIT, HG_COMMAND};
use crate::hg::{HgCommands, StderrPolicy};
use crate::model::{AdvancePolicy, WriteMode};
use crate::pipeline::PipelineConfig;

/// Default number of background threads running hg
pub const DEFAULT_WORKERS: usize = 2;

/// Browse a file's Mercurial history and drill into changeset diffs
#[derive(Parser, Debug, Clone)]
#[command(name = "hgcomb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (defaults to `browse`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to browse when no subcommand is given
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub options: Options,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Browse a file's history in the terminal UI
    Browse {
        /// File whose history to browse
        file: Option<PathBuf>,
    },
    /// Print a file's changesets, or the diff of one of them
    Show {
        file: PathBuf,

        /// Position in the list (0 is the newest changeset)
        #[arg(short = 'n', long)]
        index: Option<usize>,
    },
    /// Grep a file's history for a pattern
    Grep { pattern: String, file: PathBuf },
}

/// Flags shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct Options {
    /// hg executable
    #[arg(long, global = true, env = "HGCOMB_HG", default_value = HG_COMMAND)]
    pub hg: String,

    /// Maximum number of changesets to list
    #[arg(long, global = true, default_value_t = DEFAULT_LOG_LIMIT, value_parser = parse_positive)]
    pub limit: usize,

    /// After each diff, offer the next (older) changeset
    #[arg(long, global = true)]
    pub prompt_next: bool,

    /// What happens when advancing past the oldest changeset
    #[arg(long, global = true, value_enum, default_value_t = AdvanceArg::Clamp)]
    pub advance: AdvanceArg,

    /// When hg output on stderr counts as a failure
    #[arg(long, global = true, value_enum, default_value_t = StderrArg::AnyOutput)]
    pub stderr_policy: StderrArg,

    /// Kill hg after this many seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Append to the output panel instead of replacing its content
    #[arg(long, global = true)]
    pub append: bool,

    /// Case-insensitive grep
    #[arg(short = 'i', long, global = true)]
    pub ignore_case: bool,

    /// Background threads running hg
    #[arg(long, global = true, default_value_t = DEFAULT_WORKERS, value_parser = parse_positive)]
    pub workers: usize,

    /// Write diagnostics to this file (the TUI logs nowhere otherwise)
    #[arg(long, global = true, env = "HGCOMB_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// `--advance` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AdvanceArg {
    Clamp,
    Wrap,
    Stop,
}

impl From<AdvanceArg> for AdvancePolicy {
    fn from(arg: AdvanceArg) -> Self {
        match arg {
            AdvanceArg::Clamp => AdvancePolicy::Clamp,
            AdvanceArg::Wrap => AdvancePolicy::Wrap,
            AdvanceArg::Stop => AdvancePolicy::Stop,
        }
    }
}

/// `--stderr-policy` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StderrArg {
    /// Any stderr output fails the command
    AnyOutput,
    /// Only a non-zero exit status fails the command
    ExitStatus,
}

impl From<StderrArg> for StderrPolicy {
    fn from(arg: StderrArg) -> Self {
        match arg {
            StderrArg::AnyOutput => StderrPolicy::AnyOutputFails,
            StderrArg::ExitStatus => StderrPolicy::ExitStatusOnly,
        }
    }
}

fn parse_positive(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl Cli {
    /// The subcommand to run; a bare file (or nothing) means `browse`
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or_else(|| Command::Browse {
            file: self.file.clone(),
        })
    }
}

impl Options {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            commands: HgCommands::new(self.hg.clone()),
            limit: self.limit,
            prompt_for_next: self.prompt_next,
            advance_policy: self.advance.into(),
            stderr_policy: self.stderr_policy.into(),
            timeout: self.timeout_secs.map(Duration::from_secs),
            write_mode: if self.append {
                WriteMode::Append
            } else {
                WriteMode::Replace
            },
            grep_ignore_case: self.ignore_case,
            ..PipelineConfig::default()
        }
    }
}
