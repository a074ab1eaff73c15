//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_every_subcommand() {
    let mut out = Project::empty().ax().args(&["--help"]).passes();
    for command in ["acquire", "finish", "get", "sweep", "delete", "wait"] {
        out = out.stdout_has(command);
    }
}

#[test]
fn version_flag_prints_name() {
    Project::empty()
        .ax()
        .args(&["--version"])
        .passes()
        .stdout_has("ax");
}

#[test]
fn subcommand_is_required() {
    Project::empty().ax().fails().stderr_has("Usage");
}
