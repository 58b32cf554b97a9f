// src/errors.rs

//! Crate-wide error type and helpers.

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellstepError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("process '{command}' timed out ({timeout}){}", stderr_suffix(.stderr))]
    Timeout {
        command: String,
        timeout: String,
        stderr: String,
    },

    #[error("{command} returned exit code {code}{}", stderr_suffix(.stderr))]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Error executing command '{command}': {message}")]
    Execution { command: String, message: String },

    #[error("checksum generation failed for {} item(s): {}", .0.len(), join_failures(.0))]
    Checksum(Vec<ChecksumFailure>),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ShellstepError>;

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

fn join_failures(failures: &[ChecksumFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single work item that could not produce its checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumFailure {
    pub item: String,
    pub message: String,
}

impl fmt::Display for ChecksumFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item, self.message)
    }
}

/// Accumulated validation problems.
///
/// Validation never stops at the first problem; everything found is
/// collected so the user can fix the changelog in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Append every error from `other`, prefixing each with `context`.
    pub fn extend_with_context(&mut self, context: &str, other: ValidationErrors) {
        for err in other.errors {
            self.errors.push(format!("{context}: {err}"));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// `Ok(())` when nothing was collected, otherwise a `Validation` error.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ShellstepError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.errors.join("; "))
    }
}
