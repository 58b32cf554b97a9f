// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{ChangeLog, ChangeSetConfig, RawChangeLog};
use crate::errors::ValidationErrors;

impl TryFrom<RawChangeLog> for ChangeLog {
    type Error = crate::errors::ShellstepError;

    fn try_from(raw: RawChangeLog) -> std::result::Result<Self, Self::Error> {
        validate_changelog(&raw).into_result()?;
        Ok(ChangeLog::new_unchecked(raw.config, raw.changesets))
    }
}

/// Collect every problem in the changelog. Nothing is executed here.
pub fn validate_changelog(raw: &RawChangeLog) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if raw.changesets.is_empty() {
        errors.add_error("changelog must contain at least one [[changeset]] entry");
    }

    let mut seen = HashSet::new();
    for (index, cs) in raw.changesets.iter().enumerate() {
        let context = changeset_context(index, cs);

        if cs.id.trim().is_empty() {
            errors.add_error(format!("{context}: id is required"));
        }
        if cs.author.trim().is_empty() {
            errors.add_error(format!("{context}: author is required"));
        }
        if !seen.insert((cs.id.as_str(), cs.author.as_str())) {
            errors.add_error(format!("{context}: duplicate changeset identifier"));
        }

        if let Some(command) = &cs.execute_command {
            errors.extend_with_context(&context, command.to_change().validate());
        }
    }

    errors
}

fn changeset_context(index: usize, cs: &ChangeSetConfig) -> String {
    if cs.id.is_empty() && cs.author.is_empty() {
        format!("changeset #{}", index + 1)
    } else {
        format!("changeset '{}::{}'", cs.id, cs.author)
    }
}
