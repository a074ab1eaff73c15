// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured operation events
//!
//! Every coordinator operation reports exactly one event carrying the action,
//! the keys involved, a short message and the outcome.

use serde::{Deserialize, Serialize};

/// Coordinator operation that produced an event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Acquire,
    MarkStatus,
    GetItems,
    Sweep,
    DeleteItems,
    AwaitAll,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Acquire => "acquire",
            Action::MarkStatus => "mark_status",
            Action::GetItems => "get_items",
            Action::Sweep => "sweep",
            Action::DeleteItems => "delete_items",
            Action::AwaitAll => "await_all",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How an operation ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Conditional create succeeded
    Acquired,
    /// Conditional create found an existing item
    Contended,
    /// Status written
    Updated,
    /// Items read
    Fetched,
    /// Every requested deletion succeeded
    Deleted,
    /// Some deletions failed; the rest were still attempted
    PartialFailure,
    /// Every awaited key reached the terminal status
    Completed,
    /// The barrier deadline passed with keys outstanding
    TimedOut,
    /// The barrier was cancelled by its host
    Cancelled,
    /// An infrastructure error propagated to the caller
    Failed,
}

/// Log severity an outcome deserves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Acquired => "acquired",
            Outcome::Contended => "contended",
            Outcome::Updated => "updated",
            Outcome::Fetched => "fetched",
            Outcome::Deleted => "deleted",
            Outcome::PartialFailure => "partial_failure",
            Outcome::Completed => "completed",
            Outcome::TimedOut => "timed_out",
            Outcome::Cancelled => "cancelled",
            Outcome::Failed => "failed",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Outcome::Acquired
            | Outcome::Updated
            | Outcome::Fetched
            | Outcome::Deleted
            | Outcome::Completed => Severity::Info,
            Outcome::Contended
            | Outcome::PartialFailure
            | Outcome::TimedOut
            | Outcome::Cancelled => Severity::Warn,
            Outcome::Failed => Severity::Error,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One structured record per coordinator operation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationEvent {
    pub action: Action,
    pub keys: Vec<String>,
    pub message: String,
    pub outcome: Outcome,
}

impl OperationEvent {
    pub fn new(
        action: Action,
        keys: impl IntoIterator<Item = impl Into<String>>,
        outcome: Outcome,
        message: impl Into<String>,
    ) -> Self {
        Self {
            action,
            keys: keys.into_iter().map(Into::into).collect(),
            message: message.into(),
            outcome,
        }
    }

    /// Event for an operation on a single key
    pub fn for_key(
        action: Action,
        key: &str,
        outcome: Outcome,
        message: impl Into<String>,
    ) -> Self {
        Self::new(action, [key], outcome, message)
    }

    /// Single-line JSON rendering
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
