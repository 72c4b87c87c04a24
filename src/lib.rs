//! hgcomb - comb through a file's Mercurial history
//!
//! Lists the changesets that touched a file, shows the patch of the one you
//! pick, and greps the file's history.
//!
//! This library provides:
//! - [`app`]: Terminal UI host
//! - [`config`]: Command-line flags
//! - [`hg`]: hg command building, execution and log parsing
//! - [`keys`]: Key binding definitions
//! - [`logging`]: Diagnostic log setup
//! - [`model`]: Domain models
//! - [`oneshot`]: Line-oriented subcommands
//! - [`pipeline`]: History and grep flows
//! - [`ui`]: User interface components

pub mod app;
pub mod config;
pub mod hg;
pub mod keys;
pub mod logging;
pub mod model;
pub mod oneshot;
pub mod pipeline;
pub mod ui;
