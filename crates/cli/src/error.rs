// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.

use ax_core::StatusLabels;
use ax_engine::CoordinationError;
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct AxError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AxError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for AxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for AxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Builders for the failures users actually hit.
impl AxError {
    /// A `--status` value that matches neither configured label.
    pub fn unknown_status(label: &str, labels: &StatusLabels) -> Self {
        AxError::new(format!("unknown status '{}'", label))
            .with_context(format!(
                "Configured labels are '{}' and '{}'",
                labels.in_progress, labels.finished
            ))
            .with_suggestion(format!("Use --status {}", labels.finished))
    }

    /// No store directory was given and none could be derived.
    pub fn no_store_dir() -> Self {
        AxError::new("no store directory configured")
            .with_context("The platform data directory could not be determined")
            .with_suggestion("Pass --store-dir <path>")
            .with_suggestion("Set store.endpoint in the config file")
    }

    /// The config file could not be loaded.
    pub fn config(path: &Path, source: ax_core::ConfigError) -> Self {
        AxError::new(format!("cannot load config {}", path.display()))
            .with_context(source.to_string())
            .with_suggestion("Durations use humantime syntax, e.g. validity_window = \"20m\"")
            .with_source(source)
    }

    /// A coordination call failed against the store.
    pub fn coordination(source: CoordinationError) -> Self {
        let mut err = AxError::new(source.to_string());
        if source.is_transient() {
            err = err
                .with_context("The store reported a transient failure")
                .with_suggestion("Retry the command");
        }
        if matches!(source, CoordinationError::InvalidKey(_)) {
            err = err.with_suggestion("Keys must be non-empty");
        }
        err.with_source(source)
    }
}
