//! Error reporting specs

use crate::prelude::*;

#[test]
fn unknown_status_label_is_rejected() {
    let project = Project::empty();
    project
        .ax()
        .args(&["acquire", "job", "--status", "PAUSED"])
        .exits(1)
        .stderr_has("unknown status 'PAUSED'")
        .stderr_has("--status FINISHED");
    assert!(project.read_record("job").is_none());
}

#[test]
fn empty_key_is_rejected() {
    Project::empty()
        .ax()
        .args(&["acquire", ""])
        .exits(1)
        .stderr_has("invalid key");
}

#[test]
fn missing_config_file_is_reported() {
    Project::empty()
        .ax()
        .args(&["--config", "/nonexistent/ax.toml", "get", "job"])
        .exits(1)
        .stderr_has("cannot load config");
}

#[test]
fn invalid_config_durations_are_reported() {
    let project = Project::empty();
    project.file("ax.toml", "poll_interval = \"soon\"\n");
    let config = project.path().join("ax.toml");

    project
        .ax()
        .args(&["--config", config.to_str().unwrap(), "get", "job"])
        .exits(1)
        .stderr_has("humantime syntax");
}

#[test]
fn corrupt_record_fails_reads() {
    let project = Project::empty();
    project.record("job", "{ not json");

    project
        .ax()
        .args(&["get", "job"])
        .exits(1)
        .stderr_has("corrupt item job");
}

#[test]
fn finishing_unknown_key_fails() {
    Project::empty()
        .ax()
        .args(&["finish", "ghost"])
        .exits(1)
        .stderr_has("item not found");
}
