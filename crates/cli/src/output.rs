// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use ax_core::{LockItem, StatusLabels};
use ax_engine::{BarrierOutcome, DeleteFailure, DeleteReport, SweepReport};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

#[derive(Serialize)]
pub struct ItemView {
    key: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    age: String,
}

impl ItemView {
    pub fn new(item: &LockItem, labels: &StatusLabels, now: DateTime<Utc>) -> Self {
        Self {
            key: item.key.clone(),
            status: labels.label(item.status).to_string(),
            created_at: item.created_at,
            updated_at: item.updated_at,
            age: item.age_string(now),
        }
    }
}

impl fmt::Display for ItemView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<24} {:<12} {}", self.key, self.status, self.age)
    }
}

/// Items found plus the keys that had none
#[derive(Serialize)]
pub struct ItemsView {
    items: Vec<ItemView>,
    missing: Vec<String>,
}

impl ItemsView {
    pub fn new(items: Vec<ItemView>, missing: Vec<String>) -> Self {
        Self { items, missing }
    }
}

impl fmt::Display for ItemsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.items.is_empty() {
            write!(f, "{:<24} {:<12} AGE", "KEY", "STATUS")?;
            for item in &self.items {
                write!(f, "\n{}", item)?;
            }
        }
        for (i, key) in self.missing.iter().enumerate() {
            if i > 0 || !self.items.is_empty() {
                writeln!(f)?;
            }
            write!(f, "not found: {}", key)?;
        }
        Ok(())
    }
}

/// Result of a single-key command
#[derive(Serialize)]
pub struct KeyResult {
    key: String,
    result: &'static str,
}

impl KeyResult {
    pub fn new(key: impl Into<String>, result: &'static str) -> Self {
        Self {
            key: key.into(),
            result,
        }
    }
}

impl fmt::Display for KeyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.result, self.key)
    }
}

#[derive(Serialize)]
struct FailureView {
    key: String,
    error: String,
}

fn failure_views(failed: &[DeleteFailure]) -> Vec<FailureView> {
    failed
        .iter()
        .map(|f| FailureView {
            key: f.key.clone(),
            error: f.error.to_string(),
        })
        .collect()
}

#[derive(Serialize)]
pub struct SweepView {
    examined: usize,
    deleted: Vec<String>,
    retained: Vec<String>,
    failed: Vec<FailureView>,
}

impl From<&SweepReport> for SweepView {
    fn from(report: &SweepReport) -> Self {
        Self {
            examined: report.examined,
            deleted: report.deleted.clone(),
            retained: report.retained.clone(),
            failed: failure_views(&report.failed),
        }
    }
}

impl fmt::Display for SweepView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "examined {}, deleted {}, retained {}, failed {}",
            self.examined,
            self.deleted.len(),
            self.retained.len(),
            self.failed.len()
        )?;
        for key in &self.deleted {
            write!(f, "\ndeleted: {}", key)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
pub struct DeleteView {
    deleted: Vec<String>,
    failed: Vec<FailureView>,
}

impl From<&DeleteReport> for DeleteView {
    fn from(report: &DeleteReport) -> Self {
        Self {
            deleted: report.deleted.clone(),
            failed: failure_views(&report.failed),
        }
    }
}

impl fmt::Display for DeleteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "deleted {}, failed {}",
            self.deleted.len(),
            self.failed.len()
        )
    }
}

#[derive(Serialize)]
pub struct WaitView {
    outcome: &'static str,
    remaining: Vec<String>,
}

impl From<&BarrierOutcome> for WaitView {
    fn from(outcome: &BarrierOutcome) -> Self {
        let label = match outcome {
            BarrierOutcome::Completed => "completed",
            BarrierOutcome::TimedOut { .. } => "timed_out",
            BarrierOutcome::Cancelled { .. } => "cancelled",
        };
        Self {
            outcome: label,
            remaining: outcome.remaining().to_vec(),
        }
    }
}

impl fmt::Display for WaitView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.remaining.is_empty() {
            write!(f, "{}", self.outcome)
        } else {
            write!(f, "{}: {}", self.outcome, self.remaining.join(", "))
        }
    }
}

/// Warn on stderr about each failed deletion
pub fn warn_failures(failed: &[DeleteFailure]) {
    for failure in failed {
        eprintln!(
            "warning: failed to delete {}: {}",
            failure.key, failure.error
        );
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
