//! # deployzip CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Top-level behaviour of the `deployzip` binary: `--help`, `--version` and
//! rejection of unknown subcommands.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_main_help_flag() {
    deployzip_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pack").and(predicate::str::contains("verify")));
}

#[test]
fn test_main_version_flag() {
    deployzip_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_subcommand_fails() {
    deployzip_cmd().arg("upload").assert().failure();
}
