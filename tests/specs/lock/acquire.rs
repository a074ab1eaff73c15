//! Acquire specs
//!
//! The first caller to claim a key wins; later callers see contention.

use crate::prelude::*;

#[test]
fn first_acquire_wins() {
    let project = Project::empty();
    project
        .ax()
        .args(&["acquire", "job-42"])
        .passes()
        .stdout_eq("acquired: job-42\n");

    let record = project.read_record("job-42").unwrap();
    assert_eq!(record["key"], "job-42");
    assert_eq!(record["status_execution"], "IN_PROGRESS");
    assert_eq!(record["created_at"], record["updated_at"]);
}

#[test]
fn second_acquire_is_contended() {
    let project = Project::empty();
    project.ax().args(&["acquire", "job-42"]).passes();

    project
        .ax()
        .args(&["acquire", "job-42"])
        .exits(3)
        .stdout_eq("contended: job-42\n")
        .stderr_has("execution already claimed");
}

#[test]
fn acquire_with_initial_status() {
    let project = Project::empty();
    project
        .ax()
        .args(&["acquire", "job", "--status", "FINISHED"])
        .passes();

    assert_eq!(
        project.read_record("job").unwrap()["status_execution"],
        "FINISHED"
    );
}

#[test]
fn acquire_json_output() {
    let project = Project::empty();
    let out = project
        .ax()
        .args(&["--format", "json", "acquire", "job"])
        .passes();

    let json = out.stdout_json();
    assert_eq!(json["key"], "job");
    assert_eq!(json["result"], "acquired");
}

#[test]
fn tables_are_independent() {
    let project = Project::empty();
    project.ax().args(&["acquire", "job"]).passes();
    project
        .ax()
        .args(&["--table", "other", "acquire", "job"])
        .passes();

    assert!(project.store_dir().join("other").join("job.json").is_file());
}

#[test]
fn custom_labels_and_primary_key_from_config() {
    let project = Project::empty();
    project.file(
        "ax.toml",
        r#"
[store]
primary_key = "execution_id"

[labels]
in_progress = "RUNNING"
finished = "DONE"
"#,
    );
    let config = project.path().join("ax.toml");
    let config = config.to_str().unwrap();

    project.ax().args(&["--config", config, "acquire", "job"]).passes();
    project
        .ax()
        .args(&["--config", config, "finish", "job", "--status", "DONE"])
        .passes();

    let record = project.read_record("job").unwrap();
    assert_eq!(record["execution_id"], "job");
    assert_eq!(record["status_execution"], "DONE");
}
