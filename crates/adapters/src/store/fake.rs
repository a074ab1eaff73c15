// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake store adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CreateOutcome, StoreAdapter, StoreError, StoreOp};
use async_trait::async_trait;
use ax_core::{ExecutionStatus, LockItem};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Create { key: String, status: ExecutionStatus },
    Get { key: String },
    BatchGet { keys: Vec<String> },
    Update { key: String, status: ExecutionStatus },
    Delete { key: String },
}

impl StoreCall {
    pub fn op(&self) -> StoreOp {
        match self {
            StoreCall::Create { .. } => StoreOp::Create,
            StoreCall::Get { .. } => StoreOp::Get,
            StoreCall::BatchGet { .. } => StoreOp::BatchGet,
            StoreCall::Update { .. } => StoreOp::Update,
            StoreCall::Delete { .. } => StoreOp::Delete,
        }
    }
}

/// Kind of error an injected failure produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Throttled,
    Unavailable,
    PermissionDenied,
}

impl FailureKind {
    fn to_error(self, op: StoreOp, key: &str) -> StoreError {
        let detail = format!("injected {} failure for '{}'", op, key);
        match self {
            FailureKind::Throttled => StoreError::Throttled(detail),
            FailureKind::Unavailable => StoreError::Unavailable(detail),
            FailureKind::PermissionDenied => StoreError::PermissionDenied(detail),
        }
    }
}

#[derive(Debug, Clone)]
struct InjectedFailure {
    op: StoreOp,
    /// `None` matches every key
    key: Option<String>,
    kind: FailureKind,
    /// `None` fails forever
    remaining: Option<u32>,
}

#[derive(Default)]
struct FakeState {
    items: HashMap<String, LockItem>,
    calls: Vec<StoreCall>,
    failures: Vec<InjectedFailure>,
}

impl FakeState {
    fn take_failure(&mut self, op: StoreOp, key: &str) -> Option<StoreError> {
        let index = self.failures.iter().position(|f| {
            f.op == op && f.key.as_deref().map_or(true, |k| k == key)
        })?;
        let failure = &mut self.failures[index];
        let error = failure.kind.to_error(op, key);
        if let Some(remaining) = failure.remaining.as_mut() {
            *remaining -= 1;
            if *remaining == 0 {
                self.failures.remove(index);
            }
        }
        Some(error)
    }
}

/// Fake store for testing
///
/// Behaves like [`super::MemoryStore`] but records every call and can be told
/// to fail specific operations.
#[derive(Clone, Default)]
pub struct FakeStore {
    state: Arc<Mutex<FakeState>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Recorded calls of one operation
    pub fn calls_for(&self, op: StoreOp) -> Vec<StoreCall> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.op() == op)
            .cloned()
            .collect()
    }

    /// Seed an item directly, bypassing the conditional create
    pub fn insert(&self, item: LockItem) {
        self.lock().items.insert(item.key.clone(), item);
    }

    /// Current item for a key
    pub fn item(&self, key: &str) -> Option<LockItem> {
        self.lock().items.get(key).cloned()
    }

    /// Fail `op` on `key` the next `times` calls
    pub fn fail_times(&self, op: StoreOp, key: &str, kind: FailureKind, times: u32) {
        if times == 0 {
            return;
        }
        self.lock().failures.push(InjectedFailure {
            op,
            key: Some(key.to_string()),
            kind,
            remaining: Some(times),
        });
    }

    /// Fail `op` on `key` until cleared
    pub fn fail_always(&self, op: StoreOp, key: &str, kind: FailureKind) {
        self.lock().failures.push(InjectedFailure {
            op,
            key: Some(key.to_string()),
            kind,
            remaining: None,
        });
    }

    /// Fail `op` for every key until cleared
    pub fn fail_all(&self, op: StoreOp, kind: FailureKind) {
        self.lock().failures.push(InjectedFailure {
            op,
            key: None,
            kind,
            remaining: None,
        });
    }

    /// Remove every injected failure
    pub fn clear_failures(&self) {
        self.lock().failures.clear();
    }
}

#[async_trait]
impl StoreAdapter for FakeStore {
    async fn conditional_create(&self, item: &LockItem) -> Result<CreateOutcome, StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Create {
            key: item.key.clone(),
            status: item.status,
        });
        if let Some(error) = state.take_failure(StoreOp::Create, &item.key) {
            return Err(error);
        }

        if state.items.contains_key(&item.key) {
            return Ok(CreateOutcome::AlreadyExists);
        }
        state.items.insert(item.key.clone(), item.clone());
        Ok(CreateOutcome::Created)
    }

    async fn get(&self, key: &str) -> Result<Option<LockItem>, StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Get {
            key: key.to_string(),
        });
        if let Some(error) = state.take_failure(StoreOp::Get, key) {
            return Err(error);
        }
        Ok(state.items.get(key).cloned())
    }

    async fn batch_get(&self, keys: &[String]) -> Result<Vec<LockItem>, StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::BatchGet {
            keys: keys.to_vec(),
        });
        for key in keys {
            if let Some(error) = state.take_failure(StoreOp::BatchGet, key) {
                return Err(error);
            }
        }
        Ok(keys
            .iter()
            .filter_map(|k| state.items.get(k).cloned())
            .collect())
    }

    async fn update_status(
        &self,
        key: &str,
        status: ExecutionStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Update {
            key: key.to_string(),
            status,
        });
        if let Some(error) = state.take_failure(StoreOp::Update, key) {
            return Err(error);
        }

        let updated = state
            .items
            .get(key)
            .map(|current| current.with_status(status, updated_at))
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        state.items.insert(key.to_string(), updated);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Delete {
            key: key.to_string(),
        });
        if let Some(error) = state.take_failure(StoreOp::Delete, key) {
            return Err(error);
        }
        state.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
