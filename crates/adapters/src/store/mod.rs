// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backing store adapters
//!
//! The store holds one [`LockItem`] per key and offers single-key atomicity
//! only: a conditional create, reads, an unconditional status write and an
//! idempotent delete. Retries and backoff for transient failures belong to the
//! adapter, never to the coordination protocol.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FailureKind, FakeStore, StoreCall};

use async_trait::async_trait;
use ax_core::{ExecutionStatus, LockItem};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors from store operations
///
/// A conditional create that finds an existing item is not an error; see
/// [`CreateOutcome::AlreadyExists`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item not found: {0}")]
    NotFound(String),
    #[error("request throttled: {0}")]
    Throttled(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("corrupt item {key}: {reason}")]
    Corrupt { key: String, reason: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Whether retrying the same request later may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Throttled(_) | StoreError::Unavailable(_))
    }
}

/// Result of a conditional create
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreateOutcome {
    /// No item existed; ours is now stored
    Created,
    /// An item for the key already exists; nothing was written
    AlreadyExists,
}

/// Store operation, used for call recording and failure injection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Create,
    Get,
    BatchGet,
    Update,
    Delete,
}

impl StoreOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreOp::Create => "create",
            StoreOp::Get => "get",
            StoreOp::BatchGet => "batch_get",
            StoreOp::Update => "update",
            StoreOp::Delete => "delete",
        }
    }
}

impl std::fmt::Display for StoreOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Adapter for a key-value store with single-key conditional writes
#[async_trait]
pub trait StoreAdapter: Clone + Send + Sync + 'static {
    /// Store `item` only if no item exists for its key
    async fn conditional_create(&self, item: &LockItem) -> Result<CreateOutcome, StoreError>;

    /// Fetch one item; `None` if absent
    async fn get(&self, key: &str) -> Result<Option<LockItem>, StoreError>;

    /// Fetch many items; absent keys are omitted from the result
    async fn batch_get(&self, keys: &[String]) -> Result<Vec<LockItem>, StoreError>;

    /// Overwrite the status and `updated_at` of an item
    ///
    /// No condition is checked. Behaviour for an absent key is backend
    /// specific; the bundled backends return [`StoreError::NotFound`].
    async fn update_status(
        &self,
        key: &str,
        status: ExecutionStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Remove an item; removing an absent key succeeds
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
