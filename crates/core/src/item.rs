// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock item record and execution status
//!
//! One record exists per coordination key. Creating the record claims the key;
//! the status moves from `IN_PROGRESS` to `FINISHED` when the owner is done; the
//! record becomes deletable once finished or once it has not been updated within
//! the validity window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Execution status of a claimed key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    /// Work for the key is being performed by its owner
    InProgress,
    /// Terminal: the owner reported completion
    Finished,
}

impl ExecutionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExecutionStatus::Finished)
    }

    /// Default label used when no custom labels are configured
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::InProgress => "IN_PROGRESS",
            ExecutionStatus::Finished => "FINISHED",
        }
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stored labels for each execution status
///
/// Backends that serialize records write these strings; reading a label that
/// matches neither is treated as a corrupt record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusLabels {
    pub in_progress: String,
    pub finished: String,
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self {
            in_progress: ExecutionStatus::InProgress.as_str().to_string(),
            finished: ExecutionStatus::Finished.as_str().to_string(),
        }
    }
}

impl StatusLabels {
    pub fn new(in_progress: impl Into<String>, finished: impl Into<String>) -> Self {
        Self {
            in_progress: in_progress.into(),
            finished: finished.into(),
        }
    }

    /// Stored label for a status
    pub fn label(&self, status: ExecutionStatus) -> &str {
        match status {
            ExecutionStatus::InProgress => &self.in_progress,
            ExecutionStatus::Finished => &self.finished,
        }
    }

    /// Status for a stored label, if it is one of ours
    pub fn parse(&self, label: &str) -> Option<ExecutionStatus> {
        if label == self.in_progress {
            Some(ExecutionStatus::InProgress)
        } else if label == self.finished {
            Some(ExecutionStatus::Finished)
        } else {
            None
        }
    }

    /// Labels must be non-empty and distinct
    pub fn validate(&self) -> Result<(), String> {
        if self.in_progress.trim().is_empty() || self.finished.trim().is_empty() {
            return Err("status labels must not be empty".to_string());
        }
        if self.in_progress == self.finished {
            return Err(format!(
                "status labels must differ (both are '{}')",
                self.finished
            ));
        }
        Ok(())
    }
}

/// The per-key record representing claim state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockItem {
    /// Partition key; immutable once created
    pub key: String,
    pub status: ExecutionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LockItem {
    /// A freshly claimed item: both timestamps are `now`
    pub fn new(key: impl Into<String>, status: ExecutionStatus, now: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// The item after a status write at `now`
    ///
    /// `updated_at` never moves before `created_at`, even when the writer's
    /// clock is behind the creator's.
    pub fn with_status(&self, status: ExecutionStatus, now: DateTime<Utc>) -> Self {
        Self {
            key: self.key.clone(),
            status,
            created_at: self.created_at,
            updated_at: now.max(self.created_at),
        }
    }

    /// Time since the last status write
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now.signed_duration_since(self.updated_at)
    }

    /// Whether the last write is older than the validity window
    pub fn is_stale(&self, valid_for: Duration, now: DateTime<Utc>) -> bool {
        match chrono::Duration::from_std(valid_for) {
            Ok(window) => self.age(now) > window,
            // A window too large to represent never expires
            Err(_) => false,
        }
    }

    /// Deletable iff finished, or not updated within the validity window
    pub fn is_deletable(&self, valid_for: Duration, now: DateTime<Utc>) -> bool {
        self.status.is_terminal() || self.is_stale(valid_for, now)
    }

    /// Format the age as a human-readable string
    pub fn age_string(&self, now: DateTime<Utc>) -> String {
        let age = self.age(now);
        let minutes = age.num_minutes();
        let hours = age.num_hours();
        let days = age.num_days();

        if days > 0 {
            format!("{}d {}h", days, hours % 24)
        } else if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else if minutes > 0 {
            format!("{}m", minutes)
        } else {
            format!("{}s", age.num_seconds().max(0))
        }
    }
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
