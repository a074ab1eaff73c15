// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Acquisition and status lifecycle

use crate::error::CoordinationError;
use ax_adapters::{CreateOutcome, EventSink, StoreAdapter, TracingSink};
use ax_core::{
    Action, Clock, CoordinatorConfig, ExecutionStatus, LockItem, OperationEvent, Outcome,
};
use std::sync::Arc;

/// Runs the coordination protocol against a store
///
/// Every public operation reports exactly one [`OperationEvent`] to the sink.
#[derive(Clone)]
pub struct Coordinator<S, C> {
    pub(crate) store: S,
    pub(crate) clock: C,
    pub(crate) config: CoordinatorConfig,
    sink: Arc<dyn EventSink>,
}

impl<S, C> Coordinator<S, C>
where
    S: StoreAdapter,
    C: Clock,
{
    /// Create a coordinator that reports events through `tracing`
    pub fn new(store: S, clock: C, config: CoordinatorConfig) -> Self {
        Self {
            store,
            clock,
            config,
            sink: Arc::new(TracingSink::new()),
        }
    }

    pub fn with_sink(mut self, sink: impl EventSink) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn emit(&self, event: OperationEvent) {
        self.sink.record(&event);
    }

    /// Report a store failure and wrap it with the operation's context
    pub(crate) fn fail(
        &self,
        action: Action,
        keys: &[String],
        source: ax_adapters::StoreError,
    ) -> CoordinationError {
        self.emit(OperationEvent::new(
            action,
            keys.iter().map(String::as_str),
            Outcome::Failed,
            source.to_string(),
        ));
        CoordinationError::store(action, keys.iter().map(String::as_str), source)
    }

    /// Claim `key` with the default in-progress status
    pub async fn acquire(&self, key: &str) -> Result<bool, CoordinationError> {
        self.acquire_with_status(key, ExecutionStatus::InProgress)
            .await
    }

    /// Claim `key`, storing `status` as its initial status
    ///
    /// Returns `Ok(false)` when an item for the key already exists, whatever
    /// its status or age. Store failures are not retried here.
    pub async fn acquire_with_status(
        &self,
        key: &str,
        status: ExecutionStatus,
    ) -> Result<bool, CoordinationError> {
        validate_key(key)?;
        let item = LockItem::new(key, status, self.clock.now());

        match self.store.conditional_create(&item).await {
            Ok(CreateOutcome::Created) => {
                self.emit(OperationEvent::for_key(
                    Action::Acquire,
                    key,
                    Outcome::Acquired,
                    format!("acquired with status {}", self.config.labels.label(status)),
                ));
                Ok(true)
            }
            Ok(CreateOutcome::AlreadyExists) => {
                self.emit(OperationEvent::for_key(
                    Action::Acquire,
                    key,
                    Outcome::Contended,
                    "execution already claimed",
                ));
                Ok(false)
            }
            Err(e) => Err(self.fail(Action::Acquire, &[key.to_string()], e)),
        }
    }

    /// Overwrite the status of `key`
    ///
    /// The write is unconditional: neither the previous status nor the
    /// original claimant is checked.
    pub async fn mark_status(
        &self,
        key: &str,
        status: ExecutionStatus,
    ) -> Result<(), CoordinationError> {
        validate_key(key)?;

        match self
            .store
            .update_status(key, status, self.clock.now())
            .await
        {
            Ok(()) => {
                self.emit(OperationEvent::for_key(
                    Action::MarkStatus,
                    key,
                    Outcome::Updated,
                    format!("status set to {}", self.config.labels.label(status)),
                ));
                Ok(())
            }
            Err(e) => Err(self.fail(Action::MarkStatus, &[key.to_string()], e)),
        }
    }

    /// Mark `key` finished
    pub async fn mark_finished(&self, key: &str) -> Result<(), CoordinationError> {
        self.mark_status(key, ExecutionStatus::Finished).await
    }

    /// Fetch one item
    pub async fn get(&self, key: &str) -> Result<Option<LockItem>, CoordinationError> {
        validate_key(key)?;
        let keys = [key.to_string()];

        match self.store.get(key).await {
            Ok(item) => {
                let message = if item.is_some() { "found" } else { "not found" };
                self.emit(OperationEvent::new(
                    Action::GetItems,
                    &keys,
                    Outcome::Fetched,
                    message,
                ));
                Ok(item)
            }
            Err(e) => Err(self.fail(Action::GetItems, &keys, e)),
        }
    }

    /// Fetch many items; missing keys are omitted
    pub async fn get_items(
        &self,
        keys: &[impl AsRef<str>],
    ) -> Result<Vec<LockItem>, CoordinationError> {
        let keys = normalize_keys(keys)?;
        if keys.is_empty() {
            self.emit(OperationEvent::new(
                Action::GetItems,
                &keys,
                Outcome::Fetched,
                "no keys requested",
            ));
            return Ok(Vec::new());
        }

        match self.store.batch_get(&keys).await {
            Ok(items) => {
                self.emit(OperationEvent::new(
                    Action::GetItems,
                    &keys,
                    Outcome::Fetched,
                    format!("found {} of {}", items.len(), keys.len()),
                ));
                Ok(items)
            }
            Err(e) => Err(self.fail(Action::GetItems, &keys, e)),
        }
    }
}

pub(crate) fn validate_key(key: &str) -> Result<(), CoordinationError> {
    if key.is_empty() {
        return Err(CoordinationError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Validate keys and drop duplicates, keeping first-seen order
pub(crate) fn normalize_keys(keys: &[impl AsRef<str>]) -> Result<Vec<String>, CoordinationError> {
    let mut out: Vec<String> = Vec::with_capacity(keys.len());
    for key in keys {
        let key = key.as_ref();
        validate_key(key)?;
        if !out.iter().any(|k| k == key) {
            out.push(key.to_string());
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
