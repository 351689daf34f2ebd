//! # Source Tree Enumeration (`common::fs::walk`)
//!
//! File: cli/src/common/fs/walk.rs
//!
//! ## Overview
//!
//! Enumerates the regular files under a directory, the input to both
//! `pack` and `verify`. Traversal uses `walkdir` with entries sorted by file
//! name at every level, so two runs over an unchanged tree produce the same
//! order. Directories and symbolic links are never yielded.
//!
//! Two files may not share an entry name. On Unix a file literally named
//! `a\b` normalizes to the same name as `a/b`, as can two non-UTF-8 names;
//! such trees are rejected with `ArchiveError::DuplicateEntry`.
//!
use crate::common::archive::path::archive_name;
use crate::core::error::ArchiveError;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// A regular file found under the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Full path on disk.
    pub path: PathBuf,
    /// Normalized archive-relative name.
    pub name: String,
}

/// Lists every regular file under `root` in deterministic order.
///
/// Files whose path equals one in `exclude` are skipped; `pack` uses this to
/// keep an existing archive out of its own source tree.
///
/// # Errors
///
/// - `ArchiveError::SourceNotFound` if `root` is missing or not a directory.
/// - `ArchiveError::PermissionDenied` / `ArchiveError::Io` if a directory
///   cannot be read during traversal.
/// - `ArchiveError::DuplicateEntry` if two files normalize to the same name.
pub fn collect_files(root: &Path, exclude: &[PathBuf]) -> Result<Vec<SourceFile>, ArchiveError> {
    if !root.is_dir() {
        return Err(ArchiveError::SourceNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            ArchiveError::reading(&path, io::Error::from(e))
        })?;

        if !entry.file_type().is_file() {
            if entry.file_type().is_symlink() {
                debug!("Skipping symbolic link {:?}", entry.path());
            }
            continue;
        }
        if exclude.iter().any(|p| p == entry.path()) {
            debug!("Excluding {:?} from the source tree", entry.path());
            continue;
        }

        match archive_name(root, entry.path()) {
            Some(name) => {
                if let Some(first) = seen.insert(name.clone(), entry.path().to_path_buf()) {
                    return Err(ArchiveError::DuplicateEntry {
                        name,
                        first,
                        second: entry.path().to_path_buf(),
                    });
                }
                trace!("Found {} at {:?}", name, entry.path());
                files.push(SourceFile {
                    path: entry.path().to_path_buf(),
                    name,
                });
            }
            None => debug!("Skipping {:?}: not under {:?}", entry.path(), root),
        }
    }

    debug!("Collected {} files under {:?}", files.len(), root);
    Ok(files)
}
