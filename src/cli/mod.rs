// CLI module for tagtext
//
// Argument parsing, output formatting and command implementations for the
// `tagtext` binary. Library errors are wrapped with `anyhow` context here and
// reported per file.

pub mod commands;
pub mod config;
pub mod output;

pub use config::{Cli, Commands};
pub use output::OutputFormatter;
