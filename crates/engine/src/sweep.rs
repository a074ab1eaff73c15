// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Expiry and sweep of finished or stale items

use crate::coordinator::{normalize_keys, Coordinator};
use crate::error::CoordinationError;
use ax_adapters::{StoreAdapter, StoreError};
use ax_core::{Action, Clock, OperationEvent, Outcome};
use std::time::Duration;

/// A deletion that failed
#[derive(Debug)]
pub struct DeleteFailure {
    pub key: String,
    pub error: StoreError,
}

/// Result of deleting a set of keys, one at a time
#[derive(Debug, Default)]
pub struct DeleteReport {
    pub deleted: Vec<String>,
    pub failed: Vec<DeleteFailure>,
}

impl DeleteReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    fn outcome(&self) -> Outcome {
        if self.is_complete() {
            Outcome::Deleted
        } else {
            Outcome::PartialFailure
        }
    }

    fn summary(&self) -> String {
        let mut message = format!("deleted {}", self.deleted.len());
        if !self.failed.is_empty() {
            let keys: Vec<&str> = self.failed.iter().map(|f| f.key.as_str()).collect();
            message.push_str(&format!(
                ", failed {} ({})",
                self.failed.len(),
                keys.join(", ")
            ));
        }
        message
    }
}

/// Result of a sweep pass
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Items found in the store
    pub examined: usize,
    pub deleted: Vec<String>,
    /// Found but still valid and in progress
    pub retained: Vec<String>,
    pub failed: Vec<DeleteFailure>,
}

impl SweepReport {
    /// Every deletable item was removed
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl<S, C> Coordinator<S, C>
where
    S: StoreAdapter,
    C: Clock,
{
    /// Sweep `keys` using the configured validity window
    pub async fn sweep(&self, keys: &[impl AsRef<str>]) -> Result<SweepReport, CoordinationError> {
        self.sweep_with_window(keys, self.config.validity_window)
            .await
    }

    /// Delete every finished item, and every item not updated within
    /// `valid_for`, among `keys`
    ///
    /// Missing keys are skipped. Only a failing batch read aborts the sweep;
    /// each deletion is attempted regardless of earlier failures and the
    /// failures are collected in the report.
    pub async fn sweep_with_window(
        &self,
        keys: &[impl AsRef<str>],
        valid_for: Duration,
    ) -> Result<SweepReport, CoordinationError> {
        let keys = normalize_keys(keys)?;
        let items = if keys.is_empty() {
            Vec::new()
        } else {
            self.store
                .batch_get(&keys)
                .await
                .map_err(|e| self.fail(Action::Sweep, &keys, e))?
        };

        let now = self.clock.now();
        let (deletable, retained): (Vec<_>, Vec<_>) = items
            .iter()
            .partition(|item| item.is_deletable(valid_for, now));
        let deletable: Vec<String> = deletable.into_iter().map(|i| i.key.clone()).collect();

        let deletions = self.delete_each(&deletable).await;
        let report = SweepReport {
            examined: items.len(),
            deleted: deletions.deleted,
            retained: retained.into_iter().map(|i| i.key.clone()).collect(),
            failed: deletions.failed,
        };

        let outcome = if report.is_complete() {
            Outcome::Deleted
        } else {
            Outcome::PartialFailure
        };
        self.emit(OperationEvent::new(
            Action::Sweep,
            &keys,
            outcome,
            format!(
                "examined {}, deleted {}, retained {}, failed {}",
                report.examined,
                report.deleted.len(),
                report.retained.len(),
                report.failed.len()
            ),
        ));
        Ok(report)
    }

    /// Delete `keys` one at a time, attempting every key
    ///
    /// Deleting an absent key succeeds. Failures are collected, never
    /// propagated.
    pub async fn delete_items(
        &self,
        keys: &[impl AsRef<str>],
    ) -> Result<DeleteReport, CoordinationError> {
        let keys = normalize_keys(keys)?;
        let report = self.delete_each(&keys).await;
        self.emit(OperationEvent::new(
            Action::DeleteItems,
            &keys,
            report.outcome(),
            report.summary(),
        ));
        Ok(report)
    }

    async fn delete_each(&self, keys: &[String]) -> DeleteReport {
        let mut report = DeleteReport::default();
        for key in keys {
            match self.store.delete(key).await {
                Ok(()) => report.deleted.push(key.clone()),
                Err(error) => {
                    tracing::warn!(key = key.as_str(), error = %error, "failed to delete item");
                    report.failed.push(DeleteFailure {
                        key: key.clone(),
                        error,
                    });
                }
            }
        }
        report
    }
}

#[cfg(test)]
#[path = "sweep_tests.rs"]
mod tests;
