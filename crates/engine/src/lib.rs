// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Atomic execution coordination protocol
//!
//! A [`Coordinator`] drives the protocol over any [`ax_adapters::StoreAdapter`]:
//! - acquisition by conditional create
//! - status transitions
//! - sweeping finished and stale items
//! - a polling completion barrier

mod barrier;
mod coordinator;
mod error;
mod sweep;

pub use barrier::{BarrierOptions, BarrierOutcome};
pub use coordinator::Coordinator;
pub use error::CoordinationError;
pub use sweep::{DeleteFailure, DeleteReport, SweepReport};
pub use tokio_util::sync::CancellationToken;
