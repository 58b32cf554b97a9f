// src/exec/timeout.rs

//! Timeout strings such as `"10s"`, `"2m"`, `"1h"` or a bare `"5"`.
//!
//! Grammar: optional whitespace, one or more digits, optional whitespace,
//! an optional single unit letter (`s`, `m`, `h`, any case), optional
//! whitespace. A missing unit means seconds.

use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

const SECS_IN_MILLIS: u64 = 1_000;
const MIN_IN_MILLIS: u64 = SECS_IN_MILLIS * 60;
const HOUR_IN_MILLIS: u64 = MIN_IN_MILLIS * 60;

static TIMEOUT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\s*([sSmMhH]?)\s*$").expect("timeout pattern is a valid regex")
});

/// Strictly parse a timeout string into milliseconds.
///
/// Returns `None` if the string does not match the grammar or the value
/// does not fit in `u64` milliseconds.
pub fn parse_timeout(s: &str) -> Option<u64> {
    let caps = TIMEOUT_PATTERN.captures(s)?;
    let value: u64 = caps.get(1)?.as_str().parse().ok()?;

    let multiplier = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(unit) if unit == "h" => HOUR_IN_MILLIS,
        Some(unit) if unit == "m" => MIN_IN_MILLIS,
        _ => SECS_IN_MILLIS,
    };

    value.checked_mul(multiplier)
}

/// Lenient variant used at execution time: anything unparseable means
/// "no timeout" (0). Callers are expected to have run
/// [`validate_timeout`] beforehand.
pub fn timeout_millis(s: &str) -> u64 {
    parse_timeout(s).unwrap_or(0)
}

/// Check a timeout string against the grammar.
pub fn validate_timeout(s: &str) -> Result<(), String> {
    match parse_timeout(s) {
        Some(_) => Ok(()),
        None => Err(format!("Invalid value specified for timeout: {s}")),
    }
}

/// Resolved timeout for one invocation.
///
/// Keeps the user's original spelling (if any) so diagnostics can echo it
/// back verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeout {
    millis: u64,
    spec: Option<String>,
}

impl Timeout {
    /// No deadline: wait for the process however long it takes.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn from_spec(spec: Option<&str>) -> Self {
        match spec.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => Self {
                millis: timeout_millis(s),
                spec: Some(s.to_string()),
            },
            None => Self::unbounded(),
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self { millis, spec: None }
    }

    pub fn millis(&self) -> u64 {
        self.millis
    }

    pub fn is_unbounded(&self) -> bool {
        self.millis == 0
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.millis)
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.spec {
            Some(spec) => f.write_str(spec),
            None => write!(f, "{} ms", self.millis),
        }
    }
}
