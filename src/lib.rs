// src/lib.rs

pub mod change;
pub mod checksum;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::change::{ChangeSet, ExecutionContext, Plan};
use crate::checksum::ChecksumGenerator;
use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::errors::ShellstepError;
use crate::types::ExecutionMode;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - changelog loading + validation (nothing runs if this fails)
/// - parallel checksum generation
/// - planning and executing each command, in declaration order
pub async fn run(args: CliArgs) -> Result<()> {
    let changelog_path = PathBuf::from(&args.changelog);
    let changelog = load_and_validate(&changelog_path)
        .with_context(|| format!("loading changelog {:?}", changelog_path))?;

    let root_dir = changelog_root_dir(&changelog_path);
    let generator = match args.workers {
        Some(0) => {
            return Err(ShellstepError::ConfigError("--workers must be at least 1".to_string()).into());
        }
        Some(n) => ChecksumGenerator::with_workers(n),
        None => ChecksumGenerator::new(),
    };
    let change_sets = generator.generate(changelog.change_sets(&root_dir)).await?;

    if args.checksums {
        print_checksums(&change_sets);
        return Ok(());
    }

    let mode = if args.log_only {
        ExecutionMode::LogOnly
    } else {
        changelog.config.execution_mode
    };
    let ctx = ExecutionContext::new(mode, changelog.config.output_encoding);
    info!(
        mode = ?ctx.mode(),
        os = %ctx.os_name(),
        encoding = %changelog.config.output_encoding,
        changesets = change_sets.len(),
        "applying changelog"
    );

    for change_set in &change_sets {
        apply_change_set(change_set, &ctx)
            .await
            .with_context(|| format!("changeset '{}'", change_set.key()))?;
    }

    Ok(())
}

/// Plan and (if live) execute the command of a single change set.
pub async fn apply_change_set(change_set: &ChangeSet, ctx: &ExecutionContext) -> Result<()> {
    let Some(command) = &change_set.command else {
        debug!(changeset = %change_set, "no command to execute");
        return Ok(());
    };

    match command.plan(ctx) {
        Plan::Skip => {
            debug!(changeset = %change_set, command = %command, "command skipped");
        }
        Plan::Record(record) => {
            println!("-- {record}");
        }
        Plan::Run(pending) => {
            let message = pending.run().await?;
            info!(changeset = %change_set, "{message}");
        }
    }

    Ok(())
}

/// Directory that relative `files` entries are resolved against.
///
/// - If the changelog path has a non-empty parent (e.g. "db/Changelog.toml"),
///   that directory is used.
/// - For a bare filename the current working directory is used.
fn changelog_root_dir(changelog_path: &Path) -> PathBuf {
    match changelog_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

fn print_checksums(change_sets: &[ChangeSet]) {
    for change_set in change_sets {
        println!(
            "{} {}",
            change_set.key(),
            change_set.checksum().unwrap_or("-")
        );
    }
}
