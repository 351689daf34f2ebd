//! # deployzip CLI Pack Integration Tests
//!
//! File: cli/tests/pack.rs
//!
//! ## Overview
//!
//! Integration tests for `deployzip pack`: archive contents, entry naming,
//! the empty-source case, failure modes and configuration files. Archives are
//! opened with the `zip`, `tar` and `flate2` crates to check what a standard
//! reader would see.
//!

mod common;
use common::*;
use flate2::read::GzDecoder;
use predicates::prelude::*;
use std::fs;
use std::io::Read;
use std::path::Path;
use tempfile::tempdir;

fn zip_entries(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut archive =
        zip::ZipArchive::new(fs::File::open(path).expect("open zip")).expect("read zip");
    (0..archive.len())
        .map(|i| {
            let mut entry = archive.by_index(i).expect("zip entry");
            let mut data = Vec::new();
            entry.read_to_end(&mut data).expect("read entry");
            (entry.name().to_string(), data)
        })
        .collect()
}

fn tar_gz_names(path: &Path) -> Vec<String> {
    let file = fs::File::open(path).expect("open tarball");
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    archive
        .entries()
        .expect("tar entries")
        .map(|e| {
            e.expect("tar entry")
                .path()
                .expect("entry path")
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

/// `deploy/` with `index.html` and `.config/settings.json` yields exactly
/// those two entries, keeping the leading dot.
#[test]
fn test_pack_keeps_dot_directories() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("deploy");
    fs::create_dir_all(source.join(".config")).unwrap();
    fs::write(source.join("index.html"), "index").unwrap();
    fs::write(source.join(".config/settings.json"), "{}").unwrap();

    deployzip_cmd()
        .current_dir(temp.path())
        .args(["pack", "--no-config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive created: deploy.zip (2 files, zip)"));

    let names: Vec<String> = zip_entries(&temp.path().join("deploy.zip"))
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec![".config/settings.json", "index.html"]);
}

#[test]
fn test_pack_round_trips_contents() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("site");
    write_deploy_tree(&source);
    let output = temp.path().join("site.zip");

    deployzip_cmd()
        .args(["pack", "--no-config"])
        .arg(&source)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let entries = zip_entries(&output);
    assert_eq!(entries.len(), 3);
    for (name, data) in entries {
        assert!(!name.starts_with("./") && !name.contains('\\'), "{name}");
        assert_eq!(data, fs::read(source.join(&name)).unwrap(), "{name}");
    }
}

#[test]
fn test_pack_tar_gz_from_extension() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("site");
    write_deploy_tree(&source);
    let output = temp.path().join("site.tar.gz");

    deployzip_cmd()
        .args(["pack", "--no-config"])
        .arg(&source)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("tar-gz"));

    assert_eq!(
        tar_gz_names(&output),
        vec![".config/settings.json", "assets/app.js", "index.html"]
    );
}

#[test]
fn test_pack_empty_source() {
    let temp = tempdir().unwrap();
    fs::create_dir(temp.path().join("deploy")).unwrap();

    deployzip_cmd()
        .current_dir(temp.path())
        .args(["pack", "--no-config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(0 files"));

    assert!(zip_entries(&temp.path().join("deploy.zip")).is_empty());
}

#[test]
fn test_pack_missing_source_fails_without_output() {
    let temp = tempdir().unwrap();

    deployzip_cmd()
        .current_dir(temp.path())
        .args(["pack", "--no-config", "missing", "-o", "out.zip"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not exist or is not a directory"));

    assert!(!temp.path().join("out.zip").exists());
}

#[test]
fn test_pack_missing_output_parent_fails() {
    let temp = tempdir().unwrap();
    write_deploy_tree(&temp.path().join("deploy"));

    deployzip_cmd()
        .current_dir(temp.path())
        .args(["pack", "--no-config", "-o", "nowhere/deploy.zip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot write archive"));
}

#[test]
fn test_pack_reads_explicit_config_file() {
    let temp = tempdir().unwrap();
    write_deploy_tree(&temp.path().join("build"));
    let config = temp.path().join("release.toml");
    fs::write(
        &config,
        "[pack]\nsource = \"build\"\noutput = \"release.tgz\"\nlevel = 9\n",
    )
    .unwrap();

    deployzip_cmd()
        .arg("pack")
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    assert_eq!(tar_gz_names(&temp.path().join("release.tgz")).len(), 3);
}

#[test]
fn test_pack_rejects_invalid_config() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("bad.toml");
    fs::write(&config, "[pack]\nlevel = 42\n").unwrap();

    deployzip_cmd()
        .arg("pack")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid compression level"));
}
