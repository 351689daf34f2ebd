//! # deployzip Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout deployzip. There are
//! two layers:
//!
//! - `ArchiveError`: the typed error returned by the archive builder
//!   (`common::archive::build_archive`). Callers can match on the variant to
//!   tell a missing source apart from an unwritable destination.
//! - `DeployError`: command-level failures (configuration, unreadable
//!   archives, verification) raised by the command handlers.
//! - `Result<T>`: a type alias for `anyhow::Result<T>` used by the command
//!   handlers, so both error types can be propagated with added context.
//!
//! ## Examples
//!
//! ```rust
//! match build_archive(&source, &dest, &PackOptions::default()) {
//!     Ok(count) => println!("{} files archived", count),
//!     Err(ArchiveError::SourceNotFound { path }) => eprintln!("No such directory: {}", path.display()),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while building an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Source directory '{}' does not exist or is not a directory.", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Permission denied: '{}'", .path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write archive '{}': {reason}", .path.display())]
    DestinationUnwritable { path: PathBuf, reason: String },

    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Entry name '{name}' is produced by both '{}' and '{}'", .first.display(), .second.display())]
    DuplicateEntry {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Zip encoding failed: {source}")]
    Zip {
        #[from]
        source: zip::result::ZipError,
    },
}

impl ArchiveError {
    /// Classifies an I/O error hit while reading from the source tree.
    pub fn reading(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => ArchiveError::PermissionDenied {
                path: path.to_path_buf(),
                source,
            },
            _ => ArchiveError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// Classifies an I/O error hit while writing the archive at `path`.
    pub fn writing(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => ArchiveError::PermissionDenied {
                path: path.to_path_buf(),
                source,
            },
            _ => ArchiveError::DestinationUnwritable {
                path: path.to_path_buf(),
                reason: source.to_string(),
            },
        }
    }

    /// Classifies an error from the zip writer. I/O failures on the
    /// underlying file are write failures; anything else is the encoder's.
    pub fn zip_writing(path: &Path, source: zip::result::ZipError) -> Self {
        match source {
            zip::result::ZipError::Io(e) => ArchiveError::writing(path, e),
            other => ArchiveError::Zip { source: other },
        }
    }
}

/// Command-level errors for deployzip.
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unrecognised archive format: '{}'", .path.display())]
    UnknownFormat { path: PathBuf },

    #[error("Archive '{}' does not match source '{}' ({mismatches} discrepancies).", .archive.display(), .source_dir.display())]
    Verification {
        archive: PathBuf,
        source_dir: PathBuf,
        mismatches: usize,
    },
}

/// Type alias for Result using anyhow::Error for command handlers.
pub type Result<T> = anyhow::Result<T>;
