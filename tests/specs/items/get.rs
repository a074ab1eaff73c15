//! Get specs

use crate::prelude::*;

#[test]
fn get_lists_items_and_missing_keys() {
    let project = Project::empty();
    project.ax().args(&["acquire", "a"]).passes();

    project
        .ax()
        .args(&["get", "a", "b"])
        .passes()
        .stdout_has("KEY")
        .stdout_has("IN_PROGRESS")
        .stdout_has("not found: b");
}

#[test]
fn get_json_separates_items_and_missing() {
    let project = Project::empty();
    project.ax().args(&["acquire", "a"]).passes();
    project.ax().args(&["finish", "a"]).passes();

    let json = project
        .ax()
        .args(&["--format", "json", "get", "a", "b"])
        .passes()
        .stdout_json();

    assert_eq!(json["items"][0]["key"], "a");
    assert_eq!(json["items"][0]["status"], "FINISHED");
    assert_eq!(json["missing"], serde_json::json!(["b"]));
}

#[test]
fn get_requires_a_key() {
    Project::empty().ax().args(&["get"]).fails();
}
