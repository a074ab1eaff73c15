// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ax get`, `ax sweep` and `ax delete`

use crate::context::Context;
use crate::error::AxError;
use crate::output::{self, DeleteView, ItemView, ItemsView, SweepView};
use ax_core::{Clock, SystemClock};
use clap::Args;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Args)]
pub struct GetArgs {
    /// Keys to fetch
    #[arg(required = true)]
    pub keys: Vec<String>,
}

#[derive(Args)]
pub struct SweepArgs {
    /// Keys to consider
    #[arg(required = true)]
    pub keys: Vec<String>,
    /// Validity window for in-progress items (e.g. 20m, 1h)
    #[arg(long, value_parser = humantime::parse_duration)]
    pub valid_for: Option<Duration>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Keys to delete
    #[arg(required = true)]
    pub keys: Vec<String>,
}

pub async fn get(ctx: &Context, args: GetArgs) -> anyhow::Result<ExitCode> {
    let items = ctx
        .coordinator
        .get_items(args.keys.as_slice())
        .await
        .map_err(AxError::coordination)?;

    let now = SystemClock.now();
    let labels = &ctx.coordinator.config().labels;
    let mut missing: Vec<String> = Vec::new();
    for key in &args.keys {
        if !items.iter().any(|i| &i.key == key) && !missing.contains(key) {
            missing.push(key.clone());
        }
    }
    let views = items
        .iter()
        .map(|item| ItemView::new(item, labels, now))
        .collect();

    output::print(&ItemsView::new(views, missing), ctx.format);
    Ok(ExitCode::SUCCESS)
}

pub async fn sweep(ctx: &Context, args: SweepArgs) -> anyhow::Result<ExitCode> {
    let valid_for = args
        .valid_for
        .unwrap_or(ctx.coordinator.config().validity_window);

    let report = ctx
        .coordinator
        .sweep_with_window(args.keys.as_slice(), valid_for)
        .await
        .map_err(AxError::coordination)?;

    output::warn_failures(&report.failed);
    output::print(&SweepView::from(&report), ctx.format);
    Ok(ExitCode::SUCCESS)
}

pub async fn delete(ctx: &Context, args: DeleteArgs) -> anyhow::Result<ExitCode> {
    let report = ctx
        .coordinator
        .delete_items(args.keys.as_slice())
        .await
        .map_err(AxError::coordination)?;

    output::warn_failures(&report.failed);
    output::print(&DeleteView::from(&report), ctx.format);
    Ok(ExitCode::SUCCESS)
}
