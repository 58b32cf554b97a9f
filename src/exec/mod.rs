// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`timeout`] parses timeout strings and carries the resolved deadline.
//! - [`assemble`] builds the argument vector and its display form.
//! - [`drain`] keeps stdout/stderr pipes empty while a process runs.
//! - [`controller`] spawns, supervises and reaps a single process.
//! - [`policy`] maps exit code + captured output to success or failure.

pub mod assemble;
pub mod controller;
pub mod drain;
pub mod policy;
pub mod timeout;

pub use assemble::{command_line, command_string};
pub use controller::{ExecutionOutput, ProcessController};
pub use drain::StreamDrainer;
pub use policy::{ExitCodePolicy, ResultPolicy, TolerateExitCodes, confirmation_message};
pub use timeout::{Timeout, parse_timeout, timeout_millis, validate_timeout};
