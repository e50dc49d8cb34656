//! Tooling & Integration Layer
//!
//! Command-line front end: flag parsing, config and logging overrides, and the
//! hand-off to the dispatcher.

pub mod cli;

pub use cli::{normalize_flag_prefix, Cli, CliContext};
