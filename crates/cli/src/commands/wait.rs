// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ax wait` - block until every key is finished

use super::{EXIT_CANCELLED, EXIT_TIMED_OUT};
use crate::context::Context;
use crate::error::AxError;
use crate::output::{self, WaitView};
use anyhow::bail;
use ax_engine::{BarrierOutcome, CancellationToken};
use clap::Args;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Args)]
pub struct WaitArgs {
    /// Keys to wait for
    #[arg(required = true)]
    pub keys: Vec<String>,
    /// Give up after this long (e.g. 14m)
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,
    /// Pause between checks (e.g. 20s)
    #[arg(long, value_parser = humantime::parse_duration)]
    pub poll_interval: Option<Duration>,
}

pub async fn wait(ctx: &Context, args: WaitArgs) -> anyhow::Result<ExitCode> {
    let mut options = ctx.coordinator.barrier_options();
    if let Some(timeout) = args.timeout {
        options.timeout = timeout;
    }
    if let Some(interval) = args.poll_interval {
        if interval.is_zero() {
            bail!("--poll-interval must be greater than zero");
        }
        options.poll_interval = interval;
    }

    let token = CancellationToken::new();
    let on_interrupt = token.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted, cancelling wait");
            on_interrupt.cancel();
        }
    });

    let result = ctx
        .coordinator
        .await_all_with(args.keys.as_slice(), options, token)
        .await;
    interrupt.abort();
    let outcome = result.map_err(AxError::coordination)?;

    output::print(&WaitView::from(&outcome), ctx.format);
    Ok(match outcome {
        BarrierOutcome::Completed => ExitCode::SUCCESS,
        BarrierOutcome::TimedOut { .. } => ExitCode::from(EXIT_TIMED_OUT),
        BarrierOutcome::Cancelled { .. } => ExitCode::from(EXIT_CANCELLED),
    })
}
