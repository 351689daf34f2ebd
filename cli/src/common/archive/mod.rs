//! # deployzip Archive Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! This module builds and reads deployment archives. The entry point is
//! `build_archive`, which packs every regular file under a source directory
//! into a single archive at a destination path.
//!
//! ## Architecture
//!
//! - **`path`**: the entry-name normalization rule shared by all formats.
//! - **`zip`**: `ZipSink`, writing Deflate-compressed zip entries.
//! - **`tar`**: `TarGzSink`, writing a gzipped tarball.
//! - **`reader`**: reads either format back (used by `inspect` and `verify`).
//!
//! `build_archive` runs in three phases:
//! 1. Enumerate the source tree (`common::fs::walk`). Nothing is written yet,
//!    so a missing source leaves the destination untouched.
//! 2. Stream every file into an `ArchiveSink` backed by a temporary file in
//!    the destination's directory.
//! 3. Finalize the container, fsync it and rename it onto the destination.
//!    Dropping the temporary file on any earlier error removes it.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{self, ArchiveFormat, PackOptions};
//! use std::path::Path;
//!
//! let options = PackOptions { format: ArchiveFormat::Zip, level: 9 };
//! let count = archive::build_archive(Path::new("deploy"), Path::new("deploy.zip"), &options)?;
//! println!("{} files archived", count);
//! ```
//!
use crate::common::fs::{io, walk};
use crate::core::error::ArchiveError;
use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

pub mod path;
pub mod reader;
pub mod tar;
pub mod zip;

/// Default Deflate compression level.
pub const DEFAULT_LEVEL: u32 = 6;

/// Container format of the produced archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ArchiveFormat {
    /// Zip container with Deflate-compressed entries.
    #[default]
    Zip,
    /// Tar container inside a gzip stream.
    TarGz,
}

impl ArchiveFormat {
    /// Infers the format from a destination file name.
    pub fn from_destination(destination: &Path) -> Self {
        let name = destination
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            ArchiveFormat::TarGz
        } else {
            ArchiveFormat::Zip
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveFormat::Zip => write!(f, "zip"),
            ArchiveFormat::TarGz => write!(f, "tar-gz"),
        }
    }
}

/// Per-call settings for `build_archive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackOptions {
    pub format: ArchiveFormat,
    /// Deflate level, 0 (store-like, fastest) through 9 (smallest).
    pub level: u32,
}

impl Default for PackOptions {
    fn default() -> Self {
        PackOptions {
            format: ArchiveFormat::Zip,
            level: DEFAULT_LEVEL,
        }
    }
}

/// A container being written into `W` (the temporary file, in `build_archive`).
///
/// Failures writing to `W` are reported as `DestinationUnwritable` (or
/// `PermissionDenied`), whichever format is being written.
pub trait ArchiveSink<W> {
    /// Appends one file under the given entry name.
    fn append(&mut self, name: &str, source: &Path) -> Result<(), ArchiveError>;

    /// Writes the container trailer and hands back the underlying writer.
    fn finish(self: Box<Self>) -> Result<W, ArchiveError>;
}

fn open_sink(
    format: ArchiveFormat,
    level: u32,
    temp: NamedTempFile,
    destination: &Path,
) -> Box<dyn ArchiveSink<NamedTempFile>> {
    match format {
        ArchiveFormat::Zip => Box::new(zip::ZipSink::new(temp, level, destination)),
        ArchiveFormat::TarGz => Box::new(tar::TarGzSink::new(temp, level, destination)),
    }
}

/// # Build Deployment Archive (`build_archive`)
///
/// Packs every regular file under `source_dir` into a new archive at
/// `destination`, replacing any file already there. Entry names are the
/// files' paths relative to `source_dir`, normalized by
/// `path::normalize_relative_path`.
///
/// ## Returns
///
/// The number of entries written. An empty source directory is a valid input
/// and yields an empty archive.
///
/// ## Errors
///
/// - `ArchiveError::SourceNotFound` if `source_dir` is missing or not a
///   directory. Nothing is created at `destination`.
/// - `ArchiveError::PermissionDenied` if a source file cannot be read or the
///   destination cannot be written.
/// - `ArchiveError::DestinationUnwritable` if the destination's parent does
///   not exist, a write fails, or the final rename fails.
///
/// On any error the destination is left as it was before the call.
pub fn build_archive(
    source_dir: &Path,
    destination: &Path,
    options: &PackOptions,
) -> Result<usize, ArchiveError> {
    info!(
        "Packing {:?} into {:?} ({}, level {})",
        source_dir, destination, options.format, options.level
    );

    // Fail on a missing source before touching the destination.
    let root = source_dir.canonicalize().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory => {
            ArchiveError::SourceNotFound {
                path: source_dir.to_path_buf(),
            }
        }
        _ => ArchiveError::reading(source_dir, e),
    })?;
    if !root.is_dir() {
        return Err(ArchiveError::SourceNotFound {
            path: source_dir.to_path_buf(),
        });
    }
    let target = io::resolve_destination(destination)?;
    let files = walk::collect_files(&root, &[target.clone()])?;

    let parent = target.parent().unwrap_or(Path::new("."));
    let temp = tempfile::Builder::new()
        .prefix(".deployzip-")
        .suffix(".part")
        .tempfile_in(parent)
        .map_err(|e| ArchiveError::writing(destination, e))?;
    debug!("Writing to temporary file {:?}", temp.path());

    let mut sink = open_sink(options.format, options.level, temp, destination);
    for file in &files {
        debug!("Adding {}", file.name);
        sink.append(&file.name, &file.path)?;
    }
    let temp = sink.finish()?;

    temp.as_file()
        .sync_all()
        .map_err(|e| ArchiveError::writing(destination, e))?;
    temp.persist(&target)
        .map_err(|e| ArchiveError::writing(destination, e.error))?;

    info!("Wrote {} entries to {:?}", files.len(), target);
    Ok(files.len())
}
