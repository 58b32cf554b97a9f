// src/exec/assemble.rs

//! Command line assembly.
//!
//! Arguments stay discrete tokens all the way to `execve`; nothing here
//! goes through a shell, so whitespace and metacharacters inside an
//! argument are passed through untouched.

/// Executable followed by the arguments, in declaration order.
pub fn command_line(executable: &str, args: &[String]) -> Vec<String> {
    let mut argv = Vec::with_capacity(args.len() + 1);
    argv.push(executable.to_string());
    argv.extend(args.iter().cloned());
    argv
}

/// Human-readable form of the command: tokens joined by single spaces.
///
/// Used for log-only records and in every diagnostic message. Not meant to
/// be re-parsed.
pub fn command_string(executable: &str, args: &[String]) -> String {
    command_line(executable, args).join(" ")
}
