//! Shared helpers for ax CLI specs.
//!
//! Each spec gets its own temporary project directory; the CLI is always
//! pointed at `<project>/store` so specs never touch the user's data dir.

#![allow(dead_code)]

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Default table name used by the CLI
pub const TABLE: &str = "atomic_executions";

/// A record older than any validity window used in the specs
pub fn stale_record(key: &str, status: &str) -> String {
    serde_json::json!({
        "key": key,
        "status_execution": status,
        "created_at": "2020-01-01T00:00:00.000000Z",
        "updated_at": "2020-01-01T00:00:00.000000Z",
    })
    .to_string()
}

pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn store_dir(&self) -> PathBuf {
        self.path().join("store")
    }

    /// Write a file relative to the project root
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// Write a raw store record for `key` in the default table
    pub fn record(&self, key: &str, json: &str) {
        self.file(&format!("store/{}/{}.json", TABLE, key), json);
    }

    /// Read the raw store record for `key` in the default table
    pub fn read_record(&self, key: &str) -> Option<serde_json::Value> {
        let path = self.store_dir().join(TABLE).join(format!("{}.json", key));
        let raw = std::fs::read_to_string(path).ok()?;
        Some(serde_json::from_str(&raw).unwrap())
    }

    pub fn ax(&self) -> CliBuilder {
        CliBuilder {
            args: Vec::new(),
            store_dir: self.store_dir(),
        }
    }
}

pub struct CliBuilder {
    args: Vec<String>,
    store_dir: PathBuf,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    fn run(self) -> Assert {
        Command::cargo_bin("ax")
            .unwrap()
            .arg("--store-dir")
            .arg(&self.store_dir)
            .args(&self.args)
            .env_remove("RUST_LOG")
            .timeout(std::time::Duration::from_secs(30))
            .assert()
    }

    /// Run and expect exit 0
    pub fn passes(self) -> RunAssert {
        RunAssert(self.run().success())
    }

    /// Run and expect a non-zero exit
    pub fn fails(self) -> RunAssert {
        RunAssert(self.run().failure())
    }

    /// Run and expect a specific exit code
    pub fn exits(self, code: i32) -> RunAssert {
        RunAssert(self.run().code(code))
    }
}

pub struct RunAssert(Assert);

impl RunAssert {
    pub fn stdout_has(self, expected: &str) -> Self {
        RunAssert(self.0.stdout(predicate::str::contains(expected)))
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        RunAssert(self.0.stdout(predicate::str::contains(unexpected).not()))
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        RunAssert(self.0.stderr(predicate::str::contains(expected)))
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.0.get_output().stdout).to_string();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.0.get_output().stdout).unwrap()
    }
}
