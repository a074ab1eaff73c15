// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for coordination operations

use ax_adapters::StoreError;
use ax_core::Action;
use thiserror::Error;

/// Errors that can occur while coordinating through the store
///
/// Contention, barrier timeouts and partial sweep failures are outcomes,
/// not errors.
#[derive(Debug, Error)]
pub enum CoordinationError {
    #[error("{action} failed for [{}]: {source}", .keys.join(", "))]
    Store {
        action: Action,
        keys: Vec<String>,
        #[source]
        source: StoreError,
    },
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

impl CoordinationError {
    pub(crate) fn store(
        action: Action,
        keys: impl IntoIterator<Item = impl Into<String>>,
        source: StoreError,
    ) -> Self {
        CoordinationError::Store {
            action,
            keys: keys.into_iter().map(Into::into).collect(),
            source,
        }
    }

    /// The underlying store error, if any
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            CoordinationError::Store { source, .. } => Some(source),
            CoordinationError::InvalidKey(_) => None,
        }
    }

    /// Whether retrying the whole operation later may succeed
    pub fn is_transient(&self) -> bool {
        self.store_error().is_some_and(StoreError::is_transient)
    }
}
