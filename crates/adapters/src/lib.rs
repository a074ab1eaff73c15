// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: the backing store and the operation event sink

pub mod sink;
pub mod store;
pub mod traced;

pub use sink::{EventSink, NoOpSink, TracingSink};
pub use store::{CreateOutcome, FileStore, MemoryStore, StoreAdapter, StoreError, StoreOp};
pub use traced::TracedStore;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use sink::RecordingSink;
#[cfg(any(test, feature = "test-support"))]
pub use store::{FailureKind, FakeStore, StoreCall};
