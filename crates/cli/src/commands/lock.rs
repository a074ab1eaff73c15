// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ax acquire` and `ax finish`

use super::EXIT_CONTENDED;
use crate::context::Context;
use crate::error::AxError;
use crate::output::{self, KeyResult};
use ax_core::ExecutionStatus;
use clap::Args;
use std::process::ExitCode;

#[derive(Args)]
pub struct AcquireArgs {
    /// Key to claim
    pub key: String,
    /// Initial status label (defaults to the in-progress label)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct FinishArgs {
    /// Key to update
    pub key: String,
    /// Status label to write (defaults to the finished label)
    #[arg(long)]
    pub status: Option<String>,
}

pub async fn acquire(ctx: &Context, args: AcquireArgs) -> anyhow::Result<ExitCode> {
    let status = match &args.status {
        Some(label) => ctx.parse_status(label)?,
        None => ExecutionStatus::InProgress,
    };

    let acquired = ctx
        .coordinator
        .acquire_with_status(&args.key, status)
        .await
        .map_err(AxError::coordination)?;

    if acquired {
        output::print(&KeyResult::new(args.key, "acquired"), ctx.format);
        Ok(ExitCode::SUCCESS)
    } else {
        output::print(&KeyResult::new(args.key, "contended"), ctx.format);
        Ok(ExitCode::from(EXIT_CONTENDED))
    }
}

pub async fn finish(ctx: &Context, args: FinishArgs) -> anyhow::Result<ExitCode> {
    let status = match &args.status {
        Some(label) => ctx.parse_status(label)?,
        None => ExecutionStatus::Finished,
    };

    ctx.coordinator
        .mark_status(&args.key, status)
        .await
        .map_err(AxError::coordination)?;

    output::print(&KeyResult::new(args.key, "updated"), ctx.format);
    Ok(ExitCode::SUCCESS)
}
