// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Completion barrier: poll until every key is finished

use crate::coordinator::{normalize_keys, Coordinator};
use crate::error::CoordinationError;
use ax_adapters::StoreAdapter;
use ax_core::{Action, Clock, CoordinatorConfig, OperationEvent, Outcome};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Deadline and pacing of a barrier wait
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarrierOptions {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl BarrierOptions {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    pub fn from_config(config: &CoordinatorConfig) -> Self {
        Self::new(config.max_wait, config.poll_interval)
    }
}

impl Default for BarrierOptions {
    fn default() -> Self {
        Self::from_config(&CoordinatorConfig::default())
    }
}

/// How a barrier wait ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BarrierOutcome {
    Completed,
    TimedOut { remaining: Vec<String> },
    Cancelled { remaining: Vec<String> },
}

impl BarrierOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, BarrierOutcome::Completed)
    }

    /// Keys that had not finished when the wait ended
    pub fn remaining(&self) -> &[String] {
        match self {
            BarrierOutcome::Completed => &[],
            BarrierOutcome::TimedOut { remaining } | BarrierOutcome::Cancelled { remaining } => {
                remaining
            }
        }
    }

    fn outcome(&self) -> Outcome {
        match self {
            BarrierOutcome::Completed => Outcome::Completed,
            BarrierOutcome::TimedOut { .. } => Outcome::TimedOut,
            BarrierOutcome::Cancelled { .. } => Outcome::Cancelled,
        }
    }
}

impl<S, C> Coordinator<S, C>
where
    S: StoreAdapter,
    C: Clock,
{
    /// Barrier options taken from the coordinator's configuration
    pub fn barrier_options(&self) -> BarrierOptions {
        BarrierOptions::from_config(&self.config)
    }

    /// Wait until every key is finished or `options.timeout` passes
    ///
    /// Returns `Ok(true)` on completion and `Ok(false)` on timeout.
    pub async fn await_all(
        &self,
        keys: &[impl AsRef<str>],
        options: BarrierOptions,
    ) -> Result<bool, CoordinationError> {
        let outcome = self
            .await_all_with(keys, options, CancellationToken::new())
            .await?;
        Ok(outcome.is_completed())
    }

    /// Wait until every key is finished, the deadline passes or `cancel` fires
    ///
    /// Each pass fetches every remaining key and drops the finished ones; a
    /// key with no item stays pending. A pass starts only while the deadline
    /// has not passed, so a zero timeout times out without reading the store,
    /// and a pass in flight always completes. A timeout too large to represent
    /// waits without a deadline. A failed fetch aborts the wait.
    pub async fn await_all_with(
        &self,
        keys: &[impl AsRef<str>],
        options: BarrierOptions,
        cancel: CancellationToken,
    ) -> Result<BarrierOutcome, CoordinationError> {
        let keys = normalize_keys(keys)?;
        let deadline = Instant::now().checked_add(options.timeout);
        let mut remaining = keys.clone();
        let mut passes = 0u32;

        let outcome = loop {
            if remaining.is_empty() {
                break BarrierOutcome::Completed;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                break BarrierOutcome::TimedOut { remaining };
            }

            passes += 1;
            let mut pending = Vec::with_capacity(remaining.len());
            for key in remaining {
                match self.store.get(&key).await {
                    Ok(Some(item)) if item.status.is_terminal() => {}
                    Ok(_) => pending.push(key),
                    Err(e) => return Err(self.fail(Action::AwaitAll, &[key], e)),
                }
            }
            remaining = pending;
            if remaining.is_empty() {
                continue;
            }

            tracing::debug!(
                pass = passes,
                remaining = remaining.len(),
                "waiting for keys to finish"
            );
            let pause = match deadline {
                Some(d) => options
                    .poll_interval
                    .min(d.saturating_duration_since(Instant::now())),
                None => options.poll_interval,
            };
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break BarrierOutcome::Cancelled { remaining },
                _ = tokio::time::sleep(pause) => {}
            }
        };

        self.emit(OperationEvent::new(
            Action::AwaitAll,
            &keys,
            outcome.outcome(),
            match &outcome {
                BarrierOutcome::Completed => format!("all keys finished after {} passes", passes),
                other => format!(
                    "{} of {} keys unfinished after {} passes",
                    other.remaining().len(),
                    keys.len(),
                    passes
                ),
            },
        ));
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "barrier_tests.rs"]
mod tests;
