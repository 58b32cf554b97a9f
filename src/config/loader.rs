// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{ChangeLog, RawChangeLog};
use crate::errors::Result;

/// Load a changelog from a given path and return the raw `RawChangeLog`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] to
/// also check timeouts, identifiers and required fields.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawChangeLog> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let changelog: RawChangeLog = toml::from_str(&contents)?;

    Ok(changelog)
}

/// Load a changelog from path and validate it.
///
/// All validation problems are reported together as a single
/// `ShellstepError::Validation`.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ChangeLog> {
    let raw = load_from_path(&path)?;
    let changelog = ChangeLog::try_from(raw)?;
    Ok(changelog)
}
