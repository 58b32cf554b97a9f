// src/config/mod.rs

//! Changelog loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a changelog from disk (`loader.rs`).
//! - Validate it before anything runs (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{ChangeLog, ChangeSetConfig, CommandConfig, ConfigSection, RawChangeLog};
pub use validate::validate_changelog;
