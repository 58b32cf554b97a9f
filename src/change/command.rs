// src/change/command.rs

//! The execute-command change: run an external program as a step of a
//! change set.

use std::fmt;
use std::sync::Arc;

use crate::change::gate::{ExecutionContext, GateDecision, PendingCommand, Plan, decide};
use crate::change::hooks::{CommandHooks, DefaultHooks};
use crate::errors::ValidationErrors;
use crate::exec::assemble::command_string;
use crate::exec::policy::{ExitCodePolicy, ResultPolicy};
use crate::exec::timeout::{Timeout, validate_timeout};

/// Declarative description of a command plus its pluggable behaviour.
#[derive(Clone)]
pub struct ExecuteCommandChange {
    executable: String,
    args: Vec<String>,
    os: Option<Vec<String>>,
    timeout: Option<String>,
    hooks: Arc<dyn CommandHooks>,
    policy: Arc<dyn ResultPolicy>,
}

impl ExecuteCommandChange {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            args: Vec::new(),
            os: None,
            timeout: None,
            hooks: Arc::new(DefaultHooks),
            policy: Arc::new(ExitCodePolicy),
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn add_arg(&mut self, arg: impl Into<String>) {
        self.args.push(arg.into());
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.add_arg(arg);
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn os(&self) -> Option<&[String]> {
        self.os.as_deref()
    }

    /// Set the OS filter from a comma-separated list, e.g.
    /// `"Linux, Mac OS X"`. Entries are trimmed; a blank list clears the
    /// filter.
    pub fn set_os(&mut self, os: &str) {
        let list: Vec<String> = os
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        self.os = if list.is_empty() { None } else { Some(list) };
    }

    pub fn with_os(mut self, os: &str) -> Self {
        self.set_os(os);
        self
    }

    pub fn timeout(&self) -> Option<&str> {
        self.timeout.as_deref()
    }

    pub fn set_timeout(&mut self, timeout: Option<String>) {
        self.timeout = timeout;
    }

    pub fn with_timeout(mut self, timeout: impl Into<String>) -> Self {
        self.timeout = Some(timeout.into());
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn CommandHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_policy(mut self, policy: Arc<dyn ResultPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Display form of the command, used in records and messages.
    pub fn command_string(&self) -> String {
        command_string(&self.executable, &self.args)
    }

    /// Resolved timeout; `0` ms when none (or an unparseable one) is set.
    pub fn resolved_timeout(&self) -> Timeout {
        Timeout::from_spec(self.timeout.as_deref())
    }

    pub fn confirmation_message(&self) -> String {
        crate::exec::policy::confirmation_message(&self.command_string())
    }

    /// Check the declaration without running anything.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if self.executable.trim().is_empty() {
            errors.add_error("executable is required");
        }

        if let Some(timeout) = self.timeout.as_deref().filter(|t| !t.is_empty()) {
            if let Err(msg) = validate_timeout(timeout) {
                errors.add_error(msg);
            }
        }

        errors
    }

    /// Decide what to do with this command in the given context.
    pub fn plan(&self, ctx: &ExecutionContext) -> Plan {
        match decide(self.os(), ctx.os_name(), ctx.mode()) {
            GateDecision::Skip => Plan::Skip,
            GateDecision::Record => {
                let record = self.command_string();
                self.hooks.non_executed_cleanup();
                Plan::Record(record)
            }
            GateDecision::Execute => Plan::Run(PendingCommand::new(
                self.hooks.final_command(&self.executable, &self.args),
                self.command_string(),
                self.resolved_timeout(),
                *ctx.controller(),
                Arc::clone(&self.policy),
            )),
        }
    }
}

impl fmt::Debug for ExecuteCommandChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecuteCommandChange")
            .field("executable", &self.executable)
            .field("args", &self.args)
            .field("os", &self.os)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ExecuteCommandChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "external process '{}' {:?}", self.executable, self.args)
    }
}
