// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operation event sinks

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::RecordingSink;

use ax_core::{OperationEvent, Severity};

/// Destination for the structured event each coordinator operation emits
///
/// Recording must not fail and must not block for long; it runs inline with
/// the operation that produced the event.
pub trait EventSink: Send + Sync + 'static {
    fn record(&self, event: &OperationEvent);
}

/// Sink that drops every event
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpSink;

impl NoOpSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for NoOpSink {
    fn record(&self, _event: &OperationEvent) {}
}

/// Sink that writes events through `tracing` at their outcome's severity
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TracingSink {
    fn record(&self, event: &OperationEvent) {
        let action = event.action.as_str();
        let outcome = event.outcome.as_str();
        let joined = event.keys.join(",");
        let keys = joined.as_str();
        let message = event.message.as_str();

        match event.outcome.severity() {
            Severity::Info => tracing::info!(action, keys, outcome, "{}", message),
            Severity::Warn => tracing::warn!(action, keys, outcome, "{}", message),
            Severity::Error => tracing::error!(action, keys, outcome, "{}", message),
        }
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
