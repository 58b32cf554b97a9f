use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Whether commands are actually run or only described.
///
/// - `Live`: spawn the process and judge its exit code (default).
/// - `LogOnly`: the pipeline only wants a textual record of what would run,
///   e.g. when producing an update script for review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ExecutionMode {
    Live,
    LogOnly,
}

impl Default for ExecutionMode {
    fn default() -> Self {
        ExecutionMode::Live
    }
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "live" => Ok(ExecutionMode::Live),
            "log-only" | "log_only" => Ok(ExecutionMode::LogOnly),
            other => Err(format!(
                "invalid execution_mode: {other} (expected \"live\" or \"log-only\")"
            )),
        }
    }
}

impl TryFrom<String> for ExecutionMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Text encoding used to decode captured process output.
///
/// Undecodable input never fails: invalid sequences become U+FFFD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum OutputEncoding {
    Utf8,
    /// ISO-8859-1: every byte maps to the code point of the same value.
    Latin1,
    Ascii,
}

impl Default for OutputEncoding {
    fn default() -> Self {
        OutputEncoding::Utf8
    }
}

impl OutputEncoding {
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            OutputEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            OutputEncoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            OutputEncoding::Ascii => bytes
                .iter()
                .map(|&b| {
                    if b.is_ascii() {
                        char::from(b)
                    } else {
                        char::REPLACEMENT_CHARACTER
                    }
                })
                .collect(),
        }
    }
}

impl FromStr for OutputEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_uppercase();

        match normalized.as_str() {
            "UTF8" => Ok(OutputEncoding::Utf8),
            "ISO88591" | "LATIN1" => Ok(OutputEncoding::Latin1),
            "USASCII" | "ASCII" => Ok(OutputEncoding::Ascii),
            _ => Err(format!(
                "unsupported output_encoding: {} (expected UTF-8, ISO-8859-1 or US-ASCII)",
                s.trim()
            )),
        }
    }
}

impl TryFrom<String> for OutputEncoding {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputEncoding::Utf8 => "UTF-8",
            OutputEncoding::Latin1 => "ISO-8859-1",
            OutputEncoding::Ascii => "US-ASCII",
        };
        f.write_str(name)
    }
}
