//! Command-line interface for album-art-finder.
//!
//! Provides single lookups, whole-library scans and setup helpers.

mod commands;

pub use commands::{Cli, Commands, run_command};
