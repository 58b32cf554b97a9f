// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `shellstep`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "shellstep",
    version,
    about = "Run the external commands declared in a changelog, with timeouts and output capture.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the changelog file (TOML).
    #[arg(long, value_name = "PATH", default_value = "Changelog.toml")]
    pub changelog: String,

    /// Print the command lines instead of running them.
    ///
    /// Overrides `execution_mode` from the changelog's `[config]` section.
    #[arg(long)]
    pub log_only: bool,

    /// Print every change set's checksum and exit without running anything.
    #[arg(long)]
    pub checksums: bool,

    /// Number of checksum workers (default: available hardware threads).
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SHELLSTEP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
