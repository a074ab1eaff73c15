// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ax - atomic execution control over a shared store

mod commands;
mod context;
mod error;
mod output;

use clap::{Parser, Subcommand};
use commands::{items, lock, wait};
use context::{Context, GlobalOptions};
use output::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "ax",
    version,
    about = "Atomic execution control - claim, finish, sweep and wait on shared keys"
)]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Root directory of the file store
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    /// Table holding the lock items
    #[arg(long, global = true)]
    table: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Claim a key; exits 3 if it is already claimed
    Acquire(lock::AcquireArgs),
    /// Mark a key finished
    Finish(lock::FinishArgs),
    /// Show items for keys
    Get(items::GetArgs),
    /// Delete finished and stale items among keys
    Sweep(items::SweepArgs),
    /// Delete items unconditionally
    Delete(items::DeleteArgs),
    /// Wait until every key is finished; exits 4 on timeout
    Wait(wait::WaitArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<error::AxError>() {
                Some(friendly) => eprint!("{}", friendly),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let options = GlobalOptions {
        config: cli.config,
        store_dir: cli.store_dir,
        table: cli.table,
    };
    let ctx = Context::open(&options, cli.format).await?;

    match cli.command {
        Commands::Acquire(args) => lock::acquire(&ctx, args).await,
        Commands::Finish(args) => lock::finish(&ctx, args).await,
        Commands::Get(args) => items::get(&ctx, args).await,
        Commands::Sweep(args) => items::sweep(&ctx, args).await,
        Commands::Delete(args) => items::delete(&ctx, args).await,
        Commands::Wait(args) => wait::wait(&ctx, args).await,
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
