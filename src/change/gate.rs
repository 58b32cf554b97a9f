// src/change/gate.rs

//! Deciding whether a command runs, is only recorded, or is skipped.
//!
//! Precedence:
//! 1. an OS filter that does not include the current OS skips the command
//!    entirely (no record either);
//! 2. log-only mode records the command line without running it;
//! 3. otherwise the command runs.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::errors::Result;
use crate::exec::controller::ProcessController;
use crate::exec::policy::ResultPolicy;
use crate::exec::timeout::Timeout;
use crate::types::{ExecutionMode, OutputEncoding};

/// Name of the running OS in the conventional spelling used by OS filters
/// (`Linux`, `Mac OS X`, `Windows`, ...).
pub fn current_os_name() -> String {
    match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "Mac OS X",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        "openbsd" => "OpenBSD",
        "netbsd" => "NetBSD",
        "solaris" => "SunOS",
        other => other,
    }
    .to_string()
}

/// Everything planning needs to know about the surrounding pipeline.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    mode: ExecutionMode,
    os_name: String,
    controller: ProcessController,
}

impl ExecutionContext {
    pub fn new(mode: ExecutionMode, encoding: OutputEncoding) -> Self {
        Self {
            mode,
            os_name: current_os_name(),
            controller: ProcessController::new(encoding),
        }
    }

    /// Pretend to run on a different OS.
    pub fn with_os_name(mut self, os_name: impl Into<String>) -> Self {
        self.os_name = os_name.into();
        self
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn os_name(&self) -> &str {
        &self.os_name
    }

    pub fn controller(&self) -> &ProcessController {
        &self.controller
    }
}

/// Raw gate outcome, before any command-specific work is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Skip,
    Record,
    Execute,
}

pub fn decide(os_filter: Option<&[String]>, os_name: &str, mode: ExecutionMode) -> GateDecision {
    if let Some(filter) = os_filter.filter(|f| !f.is_empty()) {
        if !filter.iter().any(|os| os == os_name) {
            info!("Not executing on os {} when {:?} was specified", os_name, filter);
            return GateDecision::Skip;
        }
    }

    match mode {
        ExecutionMode::LogOnly => GateDecision::Record,
        ExecutionMode::Live => GateDecision::Execute,
    }
}

/// What the pipeline should do with a command change.
#[derive(Debug)]
pub enum Plan {
    /// Nothing to do on this OS.
    Skip,
    /// Log-only mode: the would-be command line.
    Record(String),
    /// Live mode: an action to execute.
    Run(PendingCommand),
}

/// A fully assembled command waiting to be executed.
pub struct PendingCommand {
    argv: Vec<String>,
    command: String,
    timeout: Timeout,
    controller: ProcessController,
    policy: Arc<dyn ResultPolicy>,
}

impl PendingCommand {
    pub(crate) fn new(
        argv: Vec<String>,
        command: String,
        timeout: Timeout,
        controller: ProcessController,
        policy: Arc<dyn ResultPolicy>,
    ) -> Self {
        Self {
            argv,
            command,
            timeout,
            controller,
            policy,
        }
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn timeout(&self) -> &Timeout {
        &self.timeout
    }

    /// Run the process and apply the result policy.
    ///
    /// Returns the confirmation message on success.
    pub async fn run(self) -> Result<String> {
        let output = self.controller.execute(&self.argv, &self.timeout).await?;
        self.policy.evaluate(&self.command, &output)
    }
}

impl fmt::Debug for PendingCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingCommand")
            .field("argv", &self.argv)
            .field("timeout", &self.timeout)
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}
