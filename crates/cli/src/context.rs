// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolve configuration and open the coordinator for a command

use crate::error::AxError;
use crate::output::OutputFormat;
use ax_adapters::{FileStore, TracedStore};
use ax_core::{CoordinatorConfig, ExecutionStatus, SystemClock};
use ax_engine::Coordinator;
use std::path::{Path, PathBuf};

/// Directory name used under the platform data directory
const DATA_DIR_NAME: &str = "atomic-exec";

pub type CliCoordinator = Coordinator<TracedStore<FileStore>, SystemClock>;

/// Global flags shared by every subcommand
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub store_dir: Option<PathBuf>,
    pub table: Option<String>,
}

pub struct Context {
    pub coordinator: CliCoordinator,
    pub format: OutputFormat,
}

impl Context {
    pub async fn open(options: &GlobalOptions, format: OutputFormat) -> Result<Self, AxError> {
        let config = resolve_config(options)?;
        let root = resolve_store_dir(options, &config)?;

        let store = FileStore::open(&root, &config.store, config.labels.clone())
            .await
            .map_err(|e| {
                AxError::new(format!("cannot open store at {}", root.display()))
                    .with_context(e.to_string())
                    .with_suggestion("Check that the directory is writable")
                    .with_source(e)
            })?;
        tracing::debug!(dir = %store.dir().display(), "store ready");

        let store = TracedStore::new(store).with_store_config(&config.store);
        Ok(Self {
            coordinator: Coordinator::new(store, SystemClock, config),
            format,
        })
    }

    /// Parse a `--status` value against the configured labels
    pub fn parse_status(&self, label: &str) -> Result<ExecutionStatus, AxError> {
        let labels = &self.coordinator.config().labels;
        labels
            .parse(label)
            .ok_or_else(|| AxError::unknown_status(label, labels))
    }
}

/// Load the config file if one was given, then apply flag overrides
pub fn resolve_config(options: &GlobalOptions) -> Result<CoordinatorConfig, AxError> {
    let mut config = match &options.config {
        Some(path) => CoordinatorConfig::load(path).map_err(|e| AxError::config(path, e))?,
        None => CoordinatorConfig::default(),
    };
    if let Some(table) = &options.table {
        config.store.table = table.clone();
    }
    config
        .validate()
        .map_err(|e| AxError::new(e.to_string()).with_source(e))?;
    Ok(config)
}

/// `--store-dir`, then `store.endpoint`, then the platform data directory
pub fn resolve_store_dir(
    options: &GlobalOptions,
    config: &CoordinatorConfig,
) -> Result<PathBuf, AxError> {
    if let Some(dir) = &options.store_dir {
        return Ok(dir.clone());
    }
    if let Some(endpoint) = &config.store.endpoint {
        return Ok(Path::new(endpoint).to_path_buf());
    }
    dirs::data_local_dir()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .ok_or_else(AxError::no_store_dir)
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
