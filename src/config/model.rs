// src/config/model.rs

use std::path::Path;

use serde::Deserialize;

use crate::change::{ChangeSet, ExecuteCommandChange};
use crate::types::{ExecutionMode, OutputEncoding};

/// Changelog as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// output_encoding = "UTF-8"
/// execution_mode = "live"
///
/// [[changeset]]
/// id = "1"
/// author = "ops"
/// files = ["sql/seed.sql"]
///
/// [changeset.execute_command]
/// executable = "pg_dump"
/// args = ["--schema-only", "app"]
/// os = "Linux, Mac OS X"
/// timeout = "10m"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChangeLog {
    /// Global behaviour from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// All `[[changeset]]` entries, in declaration order.
    #[serde(default, rename = "changeset")]
    pub changesets: Vec<ChangeSetConfig>,
}

/// `[config]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigSection {
    /// Encoding used to decode captured process output.
    #[serde(default)]
    pub output_encoding: OutputEncoding,

    /// `"live"` (default) or `"log-only"`.
    #[serde(default)]
    pub execution_mode: ExecutionMode,
}

/// `[[changeset]]` entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeSetConfig {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub comment: Option<String>,

    /// External files folded into the checksum, relative to the changelog.
    #[serde(default)]
    pub files: Vec<String>,

    #[serde(default)]
    pub execute_command: Option<CommandConfig>,
}

/// `[changeset.execute_command]` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandConfig {
    /// Required; kept optional here so a missing value is reported as a
    /// validation error rather than a parse error.
    #[serde(default)]
    pub executable: Option<String>,

    #[serde(default)]
    pub args: Vec<String>,

    /// Comma-separated list of OS names the command is limited to.
    #[serde(default)]
    pub os: Option<String>,

    /// e.g. `"10s"`, `"5m"`, `"1h"`; bare numbers are seconds.
    #[serde(default)]
    pub timeout: Option<String>,
}

impl CommandConfig {
    pub fn to_change(&self) -> ExecuteCommandChange {
        let mut change = ExecuteCommandChange::new(self.executable.clone().unwrap_or_default())
            .with_args(self.args.iter().cloned());
        if let Some(os) = &self.os {
            change.set_os(os);
        }
        change.set_timeout(self.timeout.clone());
        change
    }
}

impl ChangeSetConfig {
    /// Build the domain change set, resolving `files` against `base_dir`.
    pub fn to_change_set(&self, base_dir: &Path) -> ChangeSet {
        let mut change_set = ChangeSet::new(self.id.clone(), self.author.clone());
        change_set.comment = self.comment.clone();
        change_set.files = self.files.iter().map(|f| base_dir.join(f)).collect();
        change_set.command = self.execute_command.as_ref().map(CommandConfig::to_change);
        change_set
    }
}

/// A changelog that passed validation.
#[derive(Debug, Clone)]
pub struct ChangeLog {
    pub config: ConfigSection,
    pub changesets: Vec<ChangeSetConfig>,
}

impl ChangeLog {
    /// Construct without validation. Prefer `ChangeLog::try_from(raw)`.
    pub fn new_unchecked(config: ConfigSection, changesets: Vec<ChangeSetConfig>) -> Self {
        Self { config, changesets }
    }

    /// Domain change sets, in declaration order.
    pub fn change_sets(&self, base_dir: &Path) -> Vec<ChangeSet> {
        self.changesets
            .iter()
            .map(|cs| cs.to_change_set(base_dir))
            .collect()
    }
}
