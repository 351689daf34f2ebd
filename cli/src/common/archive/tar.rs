//! # deployzip TAR Archive Writer (`common::archive::tar`)
//!
//! File: cli/src/common/archive/tar.rs
//!
//! ## Overview
//!
//! Writes the `tar-gz` output format: a TAR container compressed as one gzip
//! stream, for deploy targets that take tarballs instead of zip files.
//!
//! ## Architecture
//!
//! The `tar` crate builds the container and `flate2` supplies the gzip
//! encoder, layered as `tar::Builder<GzEncoder<NamedTempFile>>`:
//!
//! - Each file is added with an explicit header (size, mode, mtime) under its
//!   normalized entry name. Directories get no entries of their own.
//! - Long names are handled by the `tar` crate's GNU extensions.
//! - `finish` writes the TAR end-of-archive records, then the gzip footer,
//!   and returns the underlying temporary file.
//!
use super::ArchiveSink;
use crate::common::fs::io::read_source_file;
use crate::core::error::ArchiveError;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Streams files into a gzipped TAR container, normally held in a temporary file.
pub struct TarGzSink<W: Write> {
    builder: ::tar::Builder<GzEncoder<W>>,
    destination: PathBuf,
}

impl<W: Write> TarGzSink<W> {
    pub fn new(temp: W, level: u32, destination: &Path) -> Self {
        // Wrap the temporary file with a Gzip encoder at the requested level.
        let enc = GzEncoder::new(temp, Compression::new(level));
        TarGzSink {
            builder: ::tar::Builder::new(enc),
            destination: destination.to_path_buf(),
        }
    }
}

/// Builds the header for a regular file of `size` bytes.
fn file_header(source: &Path, size: u64) -> ::tar::Header {
    let mut header = ::tar::Header::new_gnu();
    header.set_entry_type(::tar::EntryType::Regular);
    header.set_size(size);

    let metadata = fs::metadata(source).ok();
    let mtime = metadata
        .as_ref()
        .and_then(|m| m.modified().ok())
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map_or(0, |d| d.as_secs());
    header.set_mtime(mtime);

    #[cfg(unix)]
    let mode = {
        use std::os::unix::fs::PermissionsExt;
        metadata.map_or(0o644, |m| m.permissions().mode() & 0o777)
    };
    #[cfg(not(unix))]
    let mode = 0o644;
    header.set_mode(mode);

    header
}

impl<W: Write> ArchiveSink<W> for TarGzSink<W> {
    fn append(&mut self, name: &str, source: &Path) -> Result<(), ArchiveError> {
        let data = read_source_file(source)?;
        let mut header = file_header(source, data.len() as u64);
        // `append_data` sets the path (with long-name extensions) and checksum.
        self.builder
            .append_data(&mut header, name, data.as_slice())
            .map_err(|e| ArchiveError::writing(&self.destination, e))
    }

    fn finish(self: Box<Self>) -> Result<W, ArchiveError> {
        let destination = self.destination;
        // Finalize the TAR archive structure and recover the Gzip encoder.
        let encoder = self
            .builder
            .into_inner()
            .map_err(|e| ArchiveError::writing(&destination, e))?;
        // Finish the Gzip stream, flushing the footer into the temporary file.
        encoder
            .finish()
            .map_err(|e| ArchiveError::writing(&destination, e))
    }
}
