// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recording event sink for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::EventSink;
use ax_core::{Action, OperationEvent};
use std::sync::{Arc, Mutex};

/// Sink that keeps every event in memory
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<OperationEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded events
    pub fn events(&self) -> Vec<OperationEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Recorded events of one action
    pub fn events_for(&self, action: Action) -> Vec<OperationEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.action == action)
            .collect()
    }

    /// Most recent event, if any
    pub fn last(&self) -> Option<OperationEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }
}

impl EventSink for RecordingSink {
    fn record(&self, event: &OperationEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
    }
}
