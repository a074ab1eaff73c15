//! Sweep and delete specs
//!
//! Finished items and items older than the validity window are removed;
//! fresh in-progress items stay.

use crate::prelude::*;

#[test]
fn sweep_removes_finished_and_keeps_fresh() {
    let project = Project::empty();
    project.ax().args(&["acquire", "done"]).passes();
    project.ax().args(&["finish", "done"]).passes();
    project.ax().args(&["acquire", "running"]).passes();

    project
        .ax()
        .args(&["sweep", "done", "running", "missing"])
        .passes()
        .stdout_has("examined 2, deleted 1, retained 1, failed 0")
        .stdout_has("deleted: done");

    assert!(project.read_record("done").is_none());
    assert!(project.read_record("running").is_some());
}

#[test]
fn sweep_removes_stale_in_progress_items() {
    let project = Project::empty();
    project.record("old", &stale_record("old", "IN_PROGRESS"));

    project
        .ax()
        .args(&["sweep", "old"])
        .passes()
        .stdout_has("deleted: old");

    assert!(project.read_record("old").is_none());
}

#[test]
fn valid_for_flag_controls_staleness() {
    let project = Project::empty();
    project.record("old", &stale_record("old", "IN_PROGRESS"));

    // Ten years covers the 2020 timestamp
    project
        .ax()
        .args(&["sweep", "old", "--valid-for", "3650days"])
        .passes()
        .stdout_has("retained 1");

    assert!(project.read_record("old").is_some());
}

#[test]
fn sweep_of_missing_keys_is_a_no_op() {
    Project::empty()
        .ax()
        .args(&["sweep", "nothing-here"])
        .passes()
        .stdout_has("examined 0, deleted 0");
}

#[test]
fn sweep_json_report() {
    let project = Project::empty();
    project.record("old", &stale_record("old", "FINISHED"));

    let json = project
        .ax()
        .args(&["--format", "json", "sweep", "old"])
        .passes()
        .stdout_json();

    assert_eq!(json["examined"], 1);
    assert_eq!(json["deleted"], serde_json::json!(["old"]));
    assert_eq!(json["failed"], serde_json::json!([]));
}

#[test]
fn delete_removes_regardless_of_status() {
    let project = Project::empty();
    project.ax().args(&["acquire", "job"]).passes();

    project
        .ax()
        .args(&["delete", "job", "never-existed"])
        .passes()
        .stdout_eq("deleted 2, failed 0\n");

    assert!(project.read_record("job").is_none());
    project.ax().args(&["acquire", "job"]).passes();
}
