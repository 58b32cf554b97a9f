// src/change/mod.rs

//! Change sets and the execute-command change.
//!
//! - [`command`] holds the declarative command plus its validation and
//!   planning.
//! - [`gate`] decides between skip / record / run and carries the pending
//!   action.
//! - [`hooks`] exposes the customisation points of a command change.
//! - [`change_set`] groups a command with its identity and external files.

pub mod change_set;
pub mod command;
pub mod gate;
pub mod hooks;

pub use change_set::ChangeSet;
pub use command::ExecuteCommandChange;
pub use gate::{ExecutionContext, GateDecision, PendingCommand, Plan, current_os_name, decide};
pub use hooks::{CommandHooks, DefaultHooks};
