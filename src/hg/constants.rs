//! hg-specific constants
//!
//! Centralized definitions for hg command names, flags, and defaults.

/// hg command binary name
pub const HG_COMMAND: &str = "hg";

/// Number of changesets fetched per history run
pub const DEFAULT_LOG_LIMIT: usize = 30;

/// Name of the shared output panel
pub const PANEL_NAME: &str = "hg_log_comber_panel";

/// hg subcommands
pub mod commands {
    pub const LOG: &str = "log";
    pub const GREP: &str = "grep";
}

/// hg command flags
pub mod flags {
    /// Limit number of changesets
    pub const LIMIT: &str = "--limit";
    /// Specify template
    pub const TEMPLATE: &str = "--template";
    /// Show patch
    pub const PATCH: &str = "-p";
    /// Specify revision
    pub const REVISION: &str = "-r";
    /// grep: print user who committed the change
    pub const GREP_USER: &str = "-u";
    /// grep: print date of the change
    pub const GREP_DATE: &str = "-d";
    /// grep: print matching line numbers
    pub const GREP_LINE_NUMBER: &str = "-n";
    /// grep: ignore case when matching
    pub const GREP_IGNORE_CASE: &str = "-i";
}

/// Prefix of the header written above grep output
pub const GREP_BANNER: &str = "[HgGrep]";
