// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn defaults_match_protocol_constants() {
    let config = CoordinatorConfig::default();
    assert_eq!(config.validity_window, Duration::from_secs(1200));
    assert_eq!(config.poll_interval, Duration::from_secs(20));
    assert_eq!(config.max_wait, Duration::from_secs(840));
    assert_eq!(config.labels, StatusLabels::default());
    assert_eq!(config.store.primary_key, "key");
    assert!(config.validate().is_ok());
}

#[test]
fn builder_overrides_fields() {
    let config = CoordinatorConfig::new(StoreConfig::new("jobs").with_endpoint("/tmp/ax"))
        .with_validity_window(Duration::from_secs(60))
        .with_poll_interval(Duration::from_secs(1))
        .with_max_wait(Duration::from_secs(5))
        .with_labels(StatusLabels::new("RUNNING", "DONE"));

    assert_eq!(config.store.table, "jobs");
    assert_eq!(config.store.endpoint.as_deref(), Some("/tmp/ax"));
    assert_eq!(config.validity_window, Duration::from_secs(60));
    assert_eq!(config.poll_interval, Duration::from_secs(1));
    assert_eq!(config.max_wait, Duration::from_secs(5));
    assert_eq!(config.labels.finished, "DONE");
}

#[test]
fn parses_full_document() {
    let config = CoordinatorConfig::from_toml_str(
        r#"
        validity_window = "5m"
        poll_interval = "2s"
        max_wait = "1m 30s"

        [store]
        table = "executions"
        primary_key = "execution_id"
        endpoint = "/var/lib/ax"
        region = "us-east-1"

        [labels]
        in_progress = "RUNNING"
        finished = "DONE"
        "#,
    )
    .unwrap();

    assert_eq!(config.validity_window, Duration::from_secs(300));
    assert_eq!(config.poll_interval, Duration::from_secs(2));
    assert_eq!(config.max_wait, Duration::from_secs(90));
    assert_eq!(config.store.primary_key, "execution_id");
    assert_eq!(config.store.region, "us-east-1");
    assert_eq!(config.labels, StatusLabels::new("RUNNING", "DONE"));
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let config = CoordinatorConfig::from_toml_str("[store]\ntable = \"jobs\"\n").unwrap();
    assert_eq!(config.store.table, "jobs");
    assert_eq!(config.store.primary_key, "key");
    assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
}

#[test]
fn rejects_zero_poll_interval() {
    let err = CoordinatorConfig::from_toml_str("poll_interval = \"0s\"").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("poll_interval")));
}

#[test]
fn rejects_identical_labels() {
    let err = CoordinatorConfig::from_toml_str("[labels]\nin_progress = \"X\"\nfinished = \"X\"")
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn rejects_malformed_duration() {
    let err = CoordinatorConfig::from_toml_str("max_wait = \"soon\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_reads_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ax.toml");
    std::fs::write(&path, "[store]\ntable = \"from-file\"\n").unwrap();

    let config = CoordinatorConfig::load(&path).unwrap();
    assert_eq!(config.store.table, "from-file");
}

#[test]
fn load_missing_file_reports_path() {
    let err = CoordinatorConfig::load(Path::new("/nonexistent/ax.toml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/ax.toml"));
}
