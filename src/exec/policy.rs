// src/exec/policy.rs

//! Turning a finished process into a verdict.
//!
//! The controller only reports what happened; a [`ResultPolicy`] decides
//! whether that counts as success. Callers with special needs (tools that
//! use non-zero codes for "nothing to do", custom messages, ...) plug in
//! their own policy instead of re-implementing the execution path.

use std::collections::BTreeSet;

use crate::errors::{Result, ShellstepError};
use crate::exec::controller::ExecutionOutput;

pub trait ResultPolicy: Send + Sync {
    /// Return the confirmation message on success, or the failure to
    /// propagate to the pipeline.
    fn evaluate(&self, command: &str, output: &ExecutionOutput) -> Result<String>;
}

/// Confirmation message for a successfully executed command.
pub fn confirmation_message(command: &str) -> String {
    format!("Shell command '{command}' executed")
}

/// Default policy: exit code 0 is success, anything else fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExitCodePolicy;

impl ResultPolicy for ExitCodePolicy {
    fn evaluate(&self, command: &str, output: &ExecutionOutput) -> Result<String> {
        if output.success() {
            Ok(confirmation_message(command))
        } else {
            Err(non_zero_exit(command, output))
        }
    }
}

/// Accepts a fixed set of exit codes in addition to 0.
#[derive(Debug, Clone, Default)]
pub struct TolerateExitCodes {
    accepted: BTreeSet<i32>,
}

impl TolerateExitCodes {
    pub fn new(codes: impl IntoIterator<Item = i32>) -> Self {
        Self {
            accepted: codes.into_iter().collect(),
        }
    }
}

impl ResultPolicy for TolerateExitCodes {
    fn evaluate(&self, command: &str, output: &ExecutionOutput) -> Result<String> {
        if output.success() || self.accepted.contains(&output.exit_code) {
            Ok(confirmation_message(command))
        } else {
            Err(non_zero_exit(command, output))
        }
    }
}

fn non_zero_exit(command: &str, output: &ExecutionOutput) -> ShellstepError {
    ShellstepError::NonZeroExit {
        command: command.to_string(),
        code: output.exit_code,
        stderr: output.stderr.clone(),
    }
}
