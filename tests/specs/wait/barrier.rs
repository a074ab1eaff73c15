//! Wait specs
//!
//! `ax wait` blocks until every key is finished or the timeout passes.

use crate::prelude::*;

#[test]
fn wait_returns_when_all_finished() {
    let project = Project::empty();
    for key in ["k1", "k2"] {
        project.ax().args(&["acquire", key]).passes();
        project.ax().args(&["finish", key]).passes();
    }

    project
        .ax()
        .args(&["wait", "k1", "k2", "--timeout", "5s"])
        .passes()
        .stdout_eq("completed\n");
}

#[test]
fn wait_times_out_on_unfinished_key() {
    let project = Project::empty();
    project.ax().args(&["acquire", "k1"]).passes();
    project.ax().args(&["acquire", "k2"]).passes();
    project.ax().args(&["finish", "k2"]).passes();

    project
        .ax()
        .args(&["wait", "k1", "k2", "--timeout", "1s", "--poll-interval", "200ms"])
        .exits(4)
        .stdout_eq("timed_out: k1\n");
}

#[test]
fn wait_treats_missing_key_as_unfinished() {
    Project::empty()
        .ax()
        .args(&["--format", "json", "wait", "ghost", "--timeout", "300ms", "--poll-interval", "100ms"])
        .exits(4)
        .stdout_has("\"timed_out\"")
        .stdout_has("ghost");
}

#[test]
fn wait_sees_a_key_finished_by_another_process() {
    let project = Project::empty();
    project.ax().args(&["acquire", "job"]).passes();

    let store_dir = project.store_dir();
    let finisher = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(500));
        assert_cmd::Command::cargo_bin("ax")
            .unwrap()
            .arg("--store-dir")
            .arg(&store_dir)
            .args(["finish", "job"])
            .assert()
            .success();
    });

    project
        .ax()
        .args(&["wait", "job", "--timeout", "20s", "--poll-interval", "100ms"])
        .passes()
        .stdout_eq("completed\n");
    finisher.join().unwrap();
}

#[test]
fn zero_poll_interval_is_rejected() {
    Project::empty()
        .ax()
        .args(&["wait", "job", "--poll-interval", "0s"])
        .exits(1)
        .stderr_has("--poll-interval must be greater than zero");
}
