#![allow(dead_code)]

use shellstep::config::{ChangeLog, ChangeSetConfig, CommandConfig, ConfigSection, RawChangeLog};
use shellstep::types::{ExecutionMode, OutputEncoding};

/// Builder for `ChangeLog` to simplify test setup.
pub struct ChangeLogBuilder {
    changelog: RawChangeLog,
}

impl ChangeLogBuilder {
    pub fn new() -> Self {
        Self {
            changelog: RawChangeLog {
                config: ConfigSection::default(),
                changesets: Vec::new(),
            },
        }
    }

    pub fn with_changeset(mut self, changeset: ChangeSetConfig) -> Self {
        self.changelog.changesets.push(changeset);
        self
    }

    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.changelog.config.execution_mode = mode;
        self
    }

    pub fn output_encoding(mut self, encoding: OutputEncoding) -> Self {
        self.changelog.config.output_encoding = encoding;
        self
    }

    /// The unvalidated changelog, for exercising validation itself.
    pub fn build_raw(self) -> RawChangeLog {
        self.changelog
    }

    pub fn build(self) -> ChangeLog {
        ChangeLog::try_from(self.changelog).expect("Failed to build valid changelog from builder")
    }
}

impl Default for ChangeLogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `ChangeSetConfig`.
pub struct ChangeSetBuilder {
    changeset: ChangeSetConfig,
}

impl ChangeSetBuilder {
    pub fn new(id: &str, author: &str) -> Self {
        Self {
            changeset: ChangeSetConfig {
                id: id.to_string(),
                author: author.to_string(),
                comment: None,
                files: vec![],
                execute_command: None,
            },
        }
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.changeset.comment = Some(comment.to_string());
        self
    }

    pub fn file(mut self, path: &str) -> Self {
        self.changeset.files.push(path.to_string());
        self
    }

    pub fn command(mut self, command: CommandConfig) -> Self {
        self.changeset.execute_command = Some(command);
        self
    }

    pub fn build(self) -> ChangeSetConfig {
        self.changeset
    }
}

/// Builder for `CommandConfig`.
pub struct CommandConfigBuilder {
    command: CommandConfig,
}

impl CommandConfigBuilder {
    pub fn new(executable: &str) -> Self {
        Self {
            command: CommandConfig {
                executable: Some(executable.to_string()),
                args: vec![],
                os: None,
                timeout: None,
            },
        }
    }

    /// A command block with no `executable` at all.
    pub fn missing_executable() -> Self {
        Self {
            command: CommandConfig::default(),
        }
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.command.args.push(arg.to_string());
        self
    }

    pub fn os(mut self, os: &str) -> Self {
        self.command.os = Some(os.to_string());
        self
    }

    pub fn timeout(mut self, timeout: &str) -> Self {
        self.command.timeout = Some(timeout.to_string());
        self
    }

    pub fn build(self) -> CommandConfig {
        self.command
    }
}
