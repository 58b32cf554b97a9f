// src/checksum/batch.rs

//! Bounded-parallel checksum generation.
//!
//! Large changelogs (and change sets referencing many external files) spend
//! most of their startup time hashing. Each item is independent, so items
//! are hashed concurrently on Tokio's blocking pool, with a semaphore
//! capping concurrency at the number of hardware threads.
//!
//! Items are moved into the worker and moved back, so no two workers can
//! ever touch the same item.
//!
//! Failure policy: every item is attempted. Errors and panics are
//! collected and reported together once all workers are done.

use std::any::Any;
use std::num::NonZeroUsize;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::change::ChangeSet;
use crate::errors::{ChecksumFailure, Result, ShellstepError};

/// A self-contained unit of checksum work.
pub trait ChecksumItem: Send + 'static {
    /// Identifier used in logs and failure reports.
    fn label(&self) -> String;

    /// Compute and store this item's checksum. Must be idempotent.
    fn compute(&mut self) -> anyhow::Result<()>;
}

impl ChecksumItem for ChangeSet {
    fn label(&self) -> String {
        self.key()
    }

    fn compute(&mut self) -> anyhow::Result<()> {
        self.generate_checksum().map(|_| ())
    }
}

/// Fixed-size worker pool for [`ChecksumItem`]s.
#[derive(Debug, Clone, Copy)]
pub struct ChecksumGenerator {
    workers: usize,
}

impl Default for ChecksumGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChecksumGenerator {
    /// One worker per available hardware thread.
    pub fn new() -> Self {
        let workers = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self { workers }
    }

    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Compute every item's checksum and return the items in input order.
    ///
    /// Returns only after all submitted items have finished. If any item
    /// failed, the result is a [`ShellstepError::Checksum`] listing all
    /// failures.
    pub async fn generate<T: ChecksumItem>(&self, items: Vec<T>) -> Result<Vec<T>> {
        let total = items.len();
        info!(items = total, workers = self.workers, "generating checksums");

        let permits = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();
        let mut labels = Vec::with_capacity(total);

        for (index, mut item) in items.into_iter().enumerate() {
            labels.push(item.label());
            let permit = Arc::clone(&permits)
                .acquire_owned()
                .await
                .map_err(|e| anyhow!("checksum worker pool closed: {e}"))?;

            tasks.spawn_blocking(move || {
                let _permit = permit;
                let outcome = match catch_unwind(AssertUnwindSafe(|| item.compute())) {
                    Ok(result) => result,
                    Err(payload) => Err(anyhow!("panicked: {}", panic_message(&*payload))),
                };
                (index, item, outcome)
            });
        }

        // No further submissions.
        permits.close();

        let mut slots: Vec<Option<T>> = (0..total).map(|_| None).collect();
        let mut failures = Vec::new();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, item, Ok(()))) => {
                    debug!(item = %labels[index], "checksum computed");
                    slots[index] = Some(item);
                }
                Ok((index, item, Err(err))) => {
                    warn!(item = %labels[index], error = %err, "checksum computation failed");
                    failures.push((
                        index,
                        ChecksumFailure {
                            item: labels[index].clone(),
                            message: format!("{err:#}"),
                        },
                    ));
                    slots[index] = Some(item);
                }
                Err(err) => {
                    warn!(error = %err, "checksum worker did not complete");
                    failures.push((
                        usize::MAX,
                        ChecksumFailure {
                            item: "<unknown>".to_string(),
                            message: err.to_string(),
                        },
                    ));
                }
            }
        }

        if !failures.is_empty() {
            failures.sort_by_key(|(index, _)| *index);
            return Err(ShellstepError::Checksum(
                failures.into_iter().map(|(_, failure)| failure).collect(),
            ));
        }

        info!(items = total, "all checksums generated");
        Ok(slots.into_iter().flatten().collect())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
