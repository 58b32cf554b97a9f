// src/exec/controller.rs

//! Spawning, supervising and reaping one external process.
//!
//! Lifecycle of a single invocation:
//!
//! 1. spawn the child with piped stdout/stderr (inherited environment,
//!    stdin from `/dev/null`);
//! 2. start one [`StreamDrainer`] per pipe;
//! 3. wait for exit, bounded by the configured [`Timeout`] if any; on
//!    expiry the child is killed and a `Timeout` error is returned;
//! 4. stop both drainers (final flush) only once the outcome is known;
//! 5. decode the captured bytes with the configured encoding and log
//!    them. This happens on timeout too, and the timeout error carries
//!    the captured stderr.
//!
//! `kill_on_drop` guarantees the child does not outlive the controller on
//! any early-return path.

use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tokio::process::{Child, Command};
use tracing::{debug, error, info, warn};

use crate::errors::{Result, ShellstepError};
use crate::exec::drain::StreamDrainer;
use crate::exec::timeout::Timeout;
use crate::types::OutputEncoding;

/// Everything observed about a process that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutput {
    /// Exit code, or `-1` when the process was terminated by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl ExecutionOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs argument vectors as supervised child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessController {
    encoding: OutputEncoding,
}

impl ProcessController {
    pub fn new(encoding: OutputEncoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> OutputEncoding {
        self.encoding
    }

    /// Execute `argv` (program followed by its arguments) and capture its
    /// output.
    ///
    /// A non-zero exit is *not* an error here; judging the exit code is the
    /// job of a [`ResultPolicy`](crate::exec::ResultPolicy).
    pub async fn execute(&self, argv: &[String], timeout: &Timeout) -> Result<ExecutionOutput> {
        let command = argv.join(" ");
        let (program, args) = argv.split_first().ok_or_else(|| ShellstepError::Execution {
            command: command.clone(),
            message: "empty command line".to_string(),
        })?;

        info!(command = %command, timeout = %timeout, "starting external process");
        let started = Instant::now();

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ShellstepError::Spawn {
                command: command.clone(),
                source,
            })?;

        let stdout = take_pipe(child.stdout.take(), "stdout", &command)?;
        let stderr = take_pipe(child.stderr.take(), "stderr", &command)?;
        let stdout = StreamDrainer::spawn("stdout", stdout);
        let stderr = StreamDrainer::spawn("stderr", stderr);

        let waited = if timeout.is_unbounded() {
            wait_for_exit(&mut child).await.map(Some)
        } else {
            match tokio::time::timeout(timeout.duration(), wait_for_exit(&mut child)).await {
                Ok(status) => status.map(Some),
                Err(_elapsed) => Ok(None),
            }
        };

        let status = match waited {
            Ok(Some(status)) => status,
            Ok(None) => {
                warn!(command = %command, timeout = %timeout, "process timed out; killing it");
                if let Err(err) = child.kill().await {
                    warn!(command = %command, error = %err, "failed to kill timed-out process");
                }
                let (out, err) = tokio::join!(stdout.finish(), stderr.finish());
                let (out, err) = (self.encoding.decode(&out), self.encoding.decode(&err));
                log_output(&command, &out, &err);
                return Err(ShellstepError::Timeout {
                    command,
                    timeout: timeout.to_string(),
                    stderr: err,
                });
            }
            Err(err) => {
                if let Err(kill_err) = child.kill().await {
                    debug!(command = %command, error = %kill_err, "kill after failed wait");
                }
                let _ = tokio::join!(stdout.finish(), stderr.finish());
                return Err(ShellstepError::Execution {
                    command,
                    message: err.to_string(),
                });
            }
        };

        // Only now is it safe to stop the drainers: the process is gone, so
        // everything it wrote is already in the pipes.
        let (out, err) = tokio::join!(stdout.finish(), stderr.finish());

        let output = ExecutionOutput {
            exit_code: status.code().unwrap_or(-1),
            stdout: self.encoding.decode(&out),
            stderr: self.encoding.decode(&err),
            elapsed: started.elapsed(),
        };

        log_output(&command, &output.stdout, &output.stderr);

        info!(
            command = %command,
            exit_code = output.exit_code,
            elapsed_ms = output.elapsed.as_millis() as u64,
            "external process exited"
        );

        Ok(output)
    }
}

/// Wait for the child to exit, retrying interrupted waits.
async fn wait_for_exit(child: &mut Child) -> io::Result<ExitStatus> {
    loop {
        match child.wait().await {
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                debug!("process wait interrupted; retrying");
            }
            other => return other,
        }
    }
}

/// Surface captured text: stderr (if any) at error level, stdout at info.
fn log_output(command: &str, stdout: &str, stderr: &str) {
    if !stderr.is_empty() {
        error!(command = %command, "{}", stderr);
    }
    info!(command = %command, "{}", stdout);
}

fn take_pipe<T>(pipe: Option<T>, stream: &str, command: &str) -> Result<T> {
    pipe.ok_or_else(|| ShellstepError::Execution {
        command: command.to_string(),
        message: format!("{stream} pipe was not captured"),
    })
}
