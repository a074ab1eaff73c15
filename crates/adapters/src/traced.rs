// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced store wrapper for consistent observability

use crate::store::{CreateOutcome, StoreAdapter, StoreError};
use async_trait::async_trait;
use ax_core::{ExecutionStatus, LockItem, StoreConfig};
use chrono::{DateTime, Utc};
use std::time::Instant;
use tracing::Instrument;

/// Wrapper that adds tracing to any StoreAdapter
#[derive(Clone)]
pub struct TracedStore<S> {
    inner: S,
    table: String,
    region: String,
}

impl<S> TracedStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            table: String::new(),
            region: String::new(),
        }
    }

    /// Tag every span with the table and region being accessed
    pub fn with_store_config(mut self, config: &StoreConfig) -> Self {
        self.table = config.table.clone();
        self.region = config.region.clone();
        self
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Log a failed store call; transient failures are warnings
fn log_failure(start: Instant, error: &StoreError, what: &str) {
    if error.is_transient() {
        tracing::warn!(elapsed_ms = elapsed_ms(start), error = %error, "{} failed (transient)", what);
    } else {
        tracing::error!(elapsed_ms = elapsed_ms(start), error = %error, "{} failed", what);
    }
}

#[async_trait]
impl<S: StoreAdapter> StoreAdapter for TracedStore<S> {
    async fn conditional_create(&self, item: &LockItem) -> Result<CreateOutcome, StoreError> {
        let span = tracing::info_span!(
            "store.create",
            table = %self.table,
            region = %self.region,
            key = %item.key
        );

        async {
            tracing::debug!(status = item.status.as_str(), "creating");
            let start = Instant::now();
            let result = self.inner.conditional_create(item).await;

            match &result {
                Ok(CreateOutcome::Created) => {
                    tracing::info!(elapsed_ms = elapsed_ms(start), "item created")
                }
                Ok(CreateOutcome::AlreadyExists) => {
                    tracing::info!(elapsed_ms = elapsed_ms(start), "item already exists")
                }
                Err(e) => log_failure(start, e, "create"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn get(&self, key: &str) -> Result<Option<LockItem>, StoreError> {
        let span = tracing::debug_span!("store.get", table = %self.table, key);

        async {
            let start = Instant::now();
            let result = self.inner.get(key).await;
            match &result {
                Ok(item) => tracing::debug!(
                    elapsed_ms = elapsed_ms(start),
                    found = item.is_some(),
                    "fetched"
                ),
                Err(e) => log_failure(start, e, "get"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn batch_get(&self, keys: &[String]) -> Result<Vec<LockItem>, StoreError> {
        let span = tracing::debug_span!(
            "store.batch_get",
            table = %self.table,
            requested = keys.len()
        );

        async {
            let start = Instant::now();
            let result = self.inner.batch_get(keys).await;
            match &result {
                Ok(items) => tracing::debug!(
                    elapsed_ms = elapsed_ms(start),
                    found = items.len(),
                    "fetched"
                ),
                Err(e) => log_failure(start, e, "batch get"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn update_status(
        &self,
        key: &str,
        status: ExecutionStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let span = tracing::info_span!(
            "store.update",
            table = %self.table,
            region = %self.region,
            key,
            status = status.as_str()
        );

        async {
            let start = Instant::now();
            let result = self.inner.update_status(key, status, updated_at).await;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed_ms(start), "status updated"),
                Err(e) => log_failure(start, e, "update"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let span = tracing::info_span!(
            "store.delete",
            table = %self.table,
            region = %self.region,
            key
        );

        async {
            let start = Instant::now();
            let result = self.inner.delete(key).await;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed_ms(start), "deleted"),
                Err(e) => log_failure(start, e, "delete"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
