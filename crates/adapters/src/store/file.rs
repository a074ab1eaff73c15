// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed store: one JSON record per key
//!
//! Records live under `<root>/<table>/<stem>.json`, where the stem is the
//! escaped key, or a digest of the key when the escaped form is too long for a
//! file name. Every write goes to a
//! uniquely named temp file first:
//! - conditional create hard-links the temp file onto the record path, which
//!   fails atomically if the record exists
//! - status updates rename the temp file over the record
//!
//! so readers never observe a partially written record.

use super::{CreateOutcome, StoreAdapter, StoreError};
use async_trait::async_trait;
use ax_core::{ExecutionStatus, LockItem, StatusLabels, StoreConfig};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Record field holding the status label
pub const STATUS_FIELD: &str = "status_execution";
/// Record field holding the creation timestamp
pub const CREATED_AT_FIELD: &str = "created_at";
/// Record field holding the last-update timestamp
pub const UPDATED_AT_FIELD: &str = "updated_at";

/// Longest escaped key used verbatim as a file stem
pub const MAX_STEM_LEN: usize = 200;

/// Store keeping each item in its own JSON file
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
    primary_key: String,
    labels: StatusLabels,
}

impl FileStore {
    /// Open (creating if needed) the table directory under `root`
    pub async fn open(
        root: impl Into<PathBuf>,
        config: &StoreConfig,
        labels: StatusLabels,
    ) -> Result<Self, StoreError> {
        let dir = root.into().join(&config.table);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| io_error(e, &dir))?;

        tracing::debug!(
            dir = %dir.display(),
            primary_key = %config.primary_key,
            region = %config.region,
            "opened file store"
        );

        Ok(Self {
            dir,
            primary_key: config.primary_key.clone(),
            labels,
        })
    }

    /// Directory holding this table's records
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record for `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", record_stem(key)))
    }

    fn temp_path(&self) -> PathBuf {
        self.dir
            .join(format!(".{}.tmp", uuid::Uuid::new_v4().simple()))
    }

    fn encode(&self, item: &LockItem) -> Result<Vec<u8>, StoreError> {
        let mut record = Map::new();
        record.insert(self.primary_key.clone(), Value::String(item.key.clone()));
        record.insert(
            STATUS_FIELD.to_string(),
            Value::String(self.labels.label(item.status).to_string()),
        );
        record.insert(
            CREATED_AT_FIELD.to_string(),
            Value::String(item.created_at.to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
        record.insert(
            UPDATED_AT_FIELD.to_string(),
            Value::String(item.updated_at.to_rfc3339_opts(SecondsFormat::Micros, true)),
        );

        serde_json::to_vec_pretty(&Value::Object(record)).map_err(|e| StoreError::Corrupt {
            key: item.key.clone(),
            reason: format!("failed to serialize record: {}", e),
        })
    }

    fn decode(&self, key: &str, bytes: &[u8]) -> Result<LockItem, StoreError> {
        let corrupt = |reason: String| StoreError::Corrupt {
            key: key.to_string(),
            reason,
        };

        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| corrupt(format!("invalid json: {}", e)))?;
        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .ok_or_else(|| corrupt(format!("missing field '{}'", name)))
        };
        let timestamp = |name: &str| -> Result<DateTime<Utc>, StoreError> {
            let raw = field(name)?;
            DateTime::parse_from_rfc3339(raw)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| corrupt(format!("invalid {} '{}': {}", name, raw, e)))
        };

        let stored_key = field(&self.primary_key)?;
        if stored_key != key {
            return Err(corrupt(format!("record belongs to key '{}'", stored_key)));
        }
        let label = field(STATUS_FIELD)?;
        let status = self
            .labels
            .parse(label)
            .ok_or_else(|| corrupt(format!("unknown status label '{}'", label)))?;

        Ok(LockItem {
            key: key.to_string(),
            status,
            created_at: timestamp(CREATED_AT_FIELD)?,
            updated_at: timestamp(UPDATED_AT_FIELD)?,
        })
    }

    async fn read(&self, key: &str) -> Result<Option<LockItem>, StoreError> {
        let path = self.path_for(key);
        match fs::read(&path).await {
            Ok(bytes) => self.decode(key, &bytes).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(e, &path)),
        }
    }

    async fn write_temp(&self, item: &LockItem) -> Result<PathBuf, StoreError> {
        let bytes = self.encode(item)?;
        let tmp = self.temp_path();
        fs::write(&tmp, bytes)
            .await
            .map_err(|e| io_error(e, &tmp))?;
        Ok(tmp)
    }
}

#[async_trait]
impl StoreAdapter for FileStore {
    async fn conditional_create(&self, item: &LockItem) -> Result<CreateOutcome, StoreError> {
        let tmp = self.write_temp(item).await?;
        let target = self.path_for(&item.key);

        let linked = fs::hard_link(&tmp, &target).await;
        // The temp name is unique to this call; losing it only leaves a stray file
        let _ = fs::remove_file(&tmp).await;

        match linked {
            Ok(()) => Ok(CreateOutcome::Created),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(CreateOutcome::AlreadyExists),
            Err(e) => Err(io_error(e, &target)),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<LockItem>, StoreError> {
        self.read(key).await
    }

    async fn batch_get(&self, keys: &[String]) -> Result<Vec<LockItem>, StoreError> {
        let mut items = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(item) = self.read(key).await? {
                items.push(item);
            }
        }
        Ok(items)
    }

    async fn update_status(
        &self,
        key: &str,
        status: ExecutionStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let current = self
            .read(key)
            .await?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        let updated = current.with_status(status, updated_at);

        let tmp = self.write_temp(&updated).await?;
        let target = self.path_for(key);
        if let Err(e) = fs::rename(&tmp, &target).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(io_error(e, &target));
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(e, &path)),
        }
    }
}

/// Map a key to a file-name-safe stem
///
/// ASCII alphanumerics, `-` and `_` pass through; every other byte becomes
/// `%XX`. The mapping is injective, so distinct keys never share a file.
pub fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

/// File stem for `key`
///
/// Escaped keys longer than [`MAX_STEM_LEN`] are named `~<sha256 hex>`
/// instead. `~` is always escaped by [`encode_key`], so the two forms never
/// collide; a digest collision is caught when the record's stored key is
/// checked on read.
pub fn record_stem(key: &str) -> String {
    let encoded = encode_key(key);
    if encoded.len() <= MAX_STEM_LEN {
        return encoded;
    }
    let digest = Sha256::digest(key.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    format!("~{}", hex)
}

fn io_error(e: std::io::Error, path: &Path) -> StoreError {
    match e.kind() {
        ErrorKind::PermissionDenied => StoreError::PermissionDenied(path.display().to_string()),
        _ => StoreError::Io(e),
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
