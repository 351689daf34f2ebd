//! # deployzip CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`pack.rs`, `inspect.rs`,
//! `verify.rs`, `main_tests.rs`). Each of those files is compiled as a
//! separate test crate and runs the compiled `deployzip` binary.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;

/// Returns an `assert_cmd::Command` for the `deployzip` binary of this test run.
///
/// Configuration files are ignored by the tests that pass `--no-config`; the
/// working directory is left to the caller.
pub fn deployzip_cmd() -> Command {
    Command::cargo_bin("deployzip").expect("Failed to find deployzip binary for testing")
}

/// Writes a small deploy tree: `index.html`, `.config/settings.json` and
/// `assets/app.js`.
pub fn write_deploy_tree(root: &Path) {
    fs::create_dir_all(root.join(".config")).expect("create .config");
    fs::create_dir_all(root.join("assets")).expect("create assets");
    fs::write(root.join("index.html"), "<html>home</html>").expect("write index");
    fs::write(root.join(".config/settings.json"), r#"{"env":"prod"}"#).expect("write settings");
    fs::write(root.join("assets/app.js"), "console.log('app');").expect("write app.js");
}
