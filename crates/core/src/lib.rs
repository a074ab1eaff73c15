// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ax-core: Core model for atomic execution control
//!
//! This crate provides:
//! - The lock item record and its status state machine
//! - Deletability rules for stale and finished items
//! - Wall-clock abstraction for testable expiry
//! - Coordinator configuration
//! - Structured operation events

pub mod clock;
pub mod config;
pub mod event;
pub mod item;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, CoordinatorConfig, StoreConfig};
pub use event::{Action, OperationEvent, Outcome, Severity};
pub use item::{ExecutionStatus, LockItem, StatusLabels};
