// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod items;
pub mod lock;
pub mod wait;

/// Another caller already holds the key
pub const EXIT_CONTENDED: u8 = 3;
/// The barrier deadline passed with keys unfinished
pub const EXIT_TIMED_OUT: u8 = 4;
/// Interrupted by Ctrl-C
pub const EXIT_CANCELLED: u8 = 130;
