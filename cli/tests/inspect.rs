//! # deployzip CLI Inspect Integration Tests
//!
//! File: cli/tests/inspect.rs
//!
//! Integration tests for `deployzip inspect`.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_inspect_lists_packed_entries() {
    let temp = tempdir().unwrap();
    write_deploy_tree(&temp.path().join("deploy"));
    deployzip_cmd()
        .current_dir(temp.path())
        .args(["pack", "--no-config"])
        .assert()
        .success();

    deployzip_cmd()
        .current_dir(temp.path())
        .args(["inspect", "deploy.zip"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(".config/settings.json")
                .and(predicate::str::contains("assets/app.js"))
                .and(predicate::str::contains("3 files")),
        );
}

#[test]
fn test_inspect_rejects_non_archive() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("readme.txt");
    fs::write(&path, "not an archive").unwrap();

    deployzip_cmd()
        .arg("inspect")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognised archive format"));
}
