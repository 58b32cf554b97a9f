// src/change/hooks.rs

//! Extension points of the execute-command change.

use crate::exec::assemble::command_line;

/// Hooks a caller can supply to customise how a command change behaves
/// without re-implementing planning or execution.
pub trait CommandHooks: Send + Sync {
    /// Produce the final argument vector handed to the OS.
    ///
    /// The default is the executable followed by the declared arguments.
    fn final_command(&self, executable: &str, args: &[String]) -> Vec<String> {
        command_line(executable, args)
    }

    /// Called after a log-only record has been produced.
    fn non_executed_cleanup(&self) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl CommandHooks for DefaultHooks {}
