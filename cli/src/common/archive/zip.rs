//! # Zip Archive Writer (`common::archive::zip`)
//!
//! File: cli/src/common/archive/zip.rs
//!
//! ## Overview
//!
//! Writes the default output format: a zip container whose entries are
//! Deflate-compressed, readable by any standard unzip tool and accepted by
//! hosting services that take zipped deploy bundles.
//!
//! Entry timestamps are left at the zip default so that the archive depends
//! only on the file names and contents. On Unix each entry records the source
//! file's permission bits.
//!
use super::ArchiveSink;
use crate::common::fs::io::read_source_file;
use crate::core::error::ArchiveError;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};
use ::zip::write::SimpleFileOptions;
use ::zip::{CompressionMethod, ZipWriter};

/// Streams files into a zip container, normally held in a temporary file.
pub struct ZipSink<W: Write + Seek> {
    writer: ZipWriter<W>,
    options: SimpleFileOptions,
    destination: PathBuf,
}

impl<W: Write + Seek> ZipSink<W> {
    /// Level 0 stores entries uncompressed; the Deflate encoder accepts 1-9.
    pub fn new(temp: W, level: u32, destination: &Path) -> Self {
        let options = if level == 0 {
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
        } else {
            SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(i64::from(level)))
        };
        ZipSink {
            writer: ZipWriter::new(temp),
            options,
            destination: destination.to_path_buf(),
        }
    }
}

#[cfg(unix)]
fn permissions_of(source: &Path) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(source)
        .ok()
        .map(|m| m.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn permissions_of(_source: &Path) -> Option<u32> {
    None
}

impl<W: Write + Seek> ArchiveSink<W> for ZipSink<W> {
    fn append(&mut self, name: &str, source: &Path) -> Result<(), ArchiveError> {
        let data = read_source_file(source)?;
        let mut options = self.options.clone();
        if data.len() as u64 >= u64::from(u32::MAX) {
            options = options.large_file(true);
        }
        if let Some(mode) = permissions_of(source) {
            options = options.unix_permissions(mode);
        }

        self.writer
            .start_file(name, options)
            .map_err(|e| ArchiveError::zip_writing(&self.destination, e))?;
        self.writer
            .write_all(&data)
            .map_err(|e| ArchiveError::writing(&self.destination, e))?;
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<W, ArchiveError> {
        let destination = self.destination;
        self.writer
            .finish()
            .map_err(|e| ArchiveError::zip_writing(&destination, e))
    }
}
