//! # deployzip Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` that attach the path to any failure:
//!
//! - **`read_file_to_string`**: reads a text file (configuration), adding
//!   `anyhow` context.
//! - **`read_source_file`**: reads one source file for archiving, classifying
//!   the failure as an `ArchiveError`.
//! - **`resolve_destination`**: checks that an archive destination can be
//!   created and returns its absolute form. The parent directory is never
//!   created on the caller's behalf.
//!
use crate::core::error::{ArchiveError, Result};
use anyhow::Context;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be found, opened, or read, with
/// context naming the file.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Reads the bytes of a file from the source tree.
pub fn read_source_file(path: &Path) -> std::result::Result<Vec<u8>, ArchiveError> {
    fs::read(path).map_err(|e| ArchiveError::reading(path, e))
}

/// Resolves the absolute path an archive will be written to.
///
/// The parent directory must already exist and be a directory; a bare file
/// name refers to the current working directory. The destination itself must
/// not be an existing directory.
///
/// # Errors
///
/// Returns `ArchiveError::DestinationUnwritable` when the parent is missing
/// or not a directory, or when the destination names a directory.
pub fn resolve_destination(destination: &Path) -> std::result::Result<PathBuf, ArchiveError> {
    let unwritable = |reason: String| ArchiveError::DestinationUnwritable {
        path: destination.to_path_buf(),
        reason,
    };

    let file_name = destination
        .file_name()
        .ok_or_else(|| unwritable("destination has no file name".to_string()))?;
    let parent = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if !parent.is_dir() {
        return Err(unwritable(format!(
            "parent directory {:?} does not exist",
            parent
        )));
    }
    let parent = parent.canonicalize().map_err(|e| match e.kind() {
        io::ErrorKind::PermissionDenied => ArchiveError::PermissionDenied {
            path: destination.to_path_buf(),
            source: e,
        },
        _ => unwritable(e.to_string()),
    })?;

    let resolved = parent.join(file_name);
    if resolved.is_dir() {
        return Err(unwritable("destination is a directory".to_string()));
    }
    debug!("Resolved destination {:?} to {:?}", destination, resolved);
    Ok(resolved)
}
