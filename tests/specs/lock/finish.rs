//! Finish specs

use crate::prelude::*;

#[test]
fn finish_marks_item_finished() {
    let project = Project::empty();
    project.ax().args(&["acquire", "job"]).passes();

    project
        .ax()
        .args(&["finish", "job"])
        .passes()
        .stdout_eq("updated: job\n");

    let record = project.read_record("job").unwrap();
    assert_eq!(record["status_execution"], "FINISHED");
    assert!(record["updated_at"].as_str() >= record["created_at"].as_str());
}

#[test]
fn finish_can_set_status_back_to_in_progress() {
    let project = Project::empty();
    project.ax().args(&["acquire", "job"]).passes();
    project.ax().args(&["finish", "job"]).passes();

    project
        .ax()
        .args(&["finish", "job", "--status", "IN_PROGRESS"])
        .passes();

    assert_eq!(
        project.read_record("job").unwrap()["status_execution"],
        "IN_PROGRESS"
    );
}

#[test]
fn finished_key_is_still_contended() {
    let project = Project::empty();
    project.ax().args(&["acquire", "job"]).passes();
    project.ax().args(&["finish", "job"]).passes();

    project.ax().args(&["acquire", "job"]).exits(3);
}
