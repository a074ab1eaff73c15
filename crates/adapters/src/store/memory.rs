// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-local store backend

use super::{CreateOutcome, StoreAdapter, StoreError};
use async_trait::async_trait;
use ax_core::{ExecutionStatus, LockItem};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Store backed by a shared in-memory map
///
/// Clones share the same map, so tasks within one process can coordinate
/// through it. Every operation holds the map lock for its whole duration,
/// which gives the single-key atomicity the protocol needs.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<HashMap<String, LockItem>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items
    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert or replace an item without any condition
    pub fn put(&self, item: LockItem) {
        self.items
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(item.key.clone(), item);
    }
}

#[async_trait]
impl StoreAdapter for MemoryStore {
    async fn conditional_create(&self, item: &LockItem) -> Result<CreateOutcome, StoreError> {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        if items.contains_key(&item.key) {
            return Ok(CreateOutcome::AlreadyExists);
        }
        items.insert(item.key.clone(), item.clone());
        Ok(CreateOutcome::Created)
    }

    async fn get(&self, key: &str) -> Result<Option<LockItem>, StoreError> {
        let items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        Ok(items.get(key).cloned())
    }

    async fn batch_get(&self, keys: &[String]) -> Result<Vec<LockItem>, StoreError> {
        let items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        Ok(keys.iter().filter_map(|k| items.get(k).cloned()).collect())
    }

    async fn update_status(
        &self,
        key: &str,
        status: ExecutionStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        let current = items
            .get(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        let updated = current.with_status(status, updated_at);
        items.insert(key.to_string(), updated);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.items
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
