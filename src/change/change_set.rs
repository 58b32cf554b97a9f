// src/change/change_set.rs

//! A change set: identity, referenced files and an optional command.

use std::fmt;
use std::path::PathBuf;

use anyhow::Result;

use crate::change::command::ExecuteCommandChange;
use crate::checksum::hash::ChecksumBuilder;

#[derive(Debug, Clone)]
pub struct ChangeSet {
    pub id: String,
    pub author: String,
    pub comment: Option<String>,
    /// External files whose content is part of the checksum.
    pub files: Vec<PathBuf>,
    pub command: Option<ExecuteCommandChange>,
    checksum: Option<String>,
}

impl ChangeSet {
    pub fn new(id: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            comment: None,
            files: Vec::new(),
            command: None,
            checksum: None,
        }
    }

    pub fn with_command(mut self, command: ExecuteCommandChange) -> Self {
        self.command = Some(command);
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// `<id>::<author>`, the identity used in logs and errors.
    pub fn key(&self) -> String {
        format!("{}::{}", self.id, self.author)
    }

    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    /// Compute and store the checksum. Running it again on an unchanged
    /// change set yields the same value.
    ///
    /// The comment is not part of the checksum.
    pub fn generate_checksum(&mut self) -> Result<&str> {
        let mut builder = ChecksumBuilder::new();
        builder.field("id", &self.id).field("author", &self.author);

        if let Some(command) = &self.command {
            builder.field("command", &command.command_string());
            if let Some(os) = command.os() {
                builder.field("os", &os.join(","));
            }
            if let Some(timeout) = command.timeout() {
                builder.field("timeout", timeout.trim());
            }
        }

        for path in &self.files {
            builder.file(path)?;
        }

        let checksum = self.checksum.insert(builder.finish());
        Ok(checksum.as_str())
    }
}

impl fmt::Display for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
