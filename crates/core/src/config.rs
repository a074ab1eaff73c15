// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator configuration
//!
//! Loaded from TOML with humantime durations:
//!
//! ```toml
//! validity_window = "20m"
//! poll_interval = "20s"
//! max_wait = "14m"
//!
//! [store]
//! table = "executions"
//! primary_key = "execution_id"
//! endpoint = "/var/lib/ax"
//!
//! [labels]
//! in_progress = "IN_PROGRESS"
//! finished = "FINISHED"
//! ```

use crate::item::StatusLabels;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default validity window for in-progress items
pub const DEFAULT_VALIDITY_WINDOW: Duration = Duration::from_secs(20 * 60);
/// Default pause between completion barrier passes
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(20);
/// Default completion barrier deadline
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(840);

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Location and layout of the backing table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Table (collection) holding the lock items
    pub table: String,
    /// Name of the partition-key field in stored records
    pub primary_key: String,
    /// Backend location; for the file store this is the root directory
    pub endpoint: Option<String>,
    /// Region reported by the store; informational for local backends
    pub region: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table: "atomic_executions".to_string(),
            primary_key: "key".to_string(),
            endpoint: None,
            region: "eu-west-1".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = primary_key.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
}

/// Protocol tuning and store location for a coordinator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    pub store: StoreConfig,
    /// How long an in-progress item stays valid after its last update
    #[serde(with = "humantime_serde")]
    pub validity_window: Duration,
    /// Pause between completion barrier passes
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    /// Completion barrier deadline
    #[serde(with = "humantime_serde")]
    pub max_wait: Duration,
    pub labels: StatusLabels,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            validity_window: DEFAULT_VALIDITY_WINDOW,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_wait: DEFAULT_MAX_WAIT,
            labels: StatusLabels::default(),
        }
    }
}

impl CoordinatorConfig {
    pub fn new(store: StoreConfig) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    pub fn with_validity_window(mut self, window: Duration) -> Self {
        self.validity_window = window;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    pub fn with_labels(mut self, labels: StatusLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.table.trim().is_empty() {
            return Err(ConfigError::Invalid("store.table must not be empty".into()));
        }
        if self.store.primary_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "store.primary_key must not be empty".into(),
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "poll_interval must be greater than zero".into(),
            ));
        }
        self.labels.validate().map_err(ConfigError::Invalid)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
