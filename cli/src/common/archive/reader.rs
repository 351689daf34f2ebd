//! # Archive Reader (`common::archive::reader`)
//!
//! File: cli/src/common/archive/reader.rs
//!
//! ## Overview
//!
//! Reads an archive produced by `build_archive`. `list_archive` walks the
//! entry headers only, for `inspect`; `read_archive` also decompresses every
//! entry into memory, for `verify` to compare with a source tree. The
//! format is detected from the file's leading bytes rather than its name:
//! `PK` opens a zip archive and `1f 8b` opens a gzipped tarball.
//!
//! Directory entries are skipped. File entries are returned in archive order.
//!
use super::ArchiveFormat;
use crate::core::error::{DeployError, Result};
use anyhow::Context;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use tracing::debug;

/// One file entry read back from an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedEntry {
    pub name: String,
    pub contents: Vec<u8>,
}

/// Header information for one file entry, without its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryListing {
    pub name: String,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// Stored size; only zip records this per entry.
    pub compressed_size: Option<u64>,
}

/// Detects the container format from the first bytes of `file`.
pub fn detect_format(path: &Path, file: &mut File) -> Result<ArchiveFormat> {
    let mut magic = [0u8; 2];
    let read = file
        .read(&mut magic)
        .with_context(|| format!("Failed to read archive {:?}", path))?;
    file.seek(SeekFrom::Start(0))
        .with_context(|| format!("Failed to rewind archive {:?}", path))?;

    match (read, magic) {
        (2, [b'P', b'K']) => Ok(ArchiveFormat::Zip),
        (2, [0x1f, 0x8b]) => Ok(ArchiveFormat::TarGz),
        _ => Err(DeployError::UnknownFormat {
            path: path.to_path_buf(),
        }
        .into()),
    }
}

fn open_archive(path: &Path) -> Result<(File, ArchiveFormat)> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open archive {:?}", path))?;
    let format = detect_format(path, &mut file)?;
    debug!("Opened {:?} as {}", path, format);
    Ok((file, format))
}

/// Lists every file entry of the archive at `path` from its headers.
pub fn list_archive(path: &Path) -> Result<Vec<EntryListing>> {
    match open_archive(path)? {
        (file, ArchiveFormat::Zip) => list_zip(path, file),
        (file, ArchiveFormat::TarGz) => list_tar_gz(path, file),
    }
}

/// Reads every file entry of the archive at `path`, contents included.
pub fn read_archive(path: &Path) -> Result<Vec<ArchivedEntry>> {
    match open_archive(path)? {
        (file, ArchiveFormat::Zip) => read_zip(path, file),
        (file, ArchiveFormat::TarGz) => read_tar_gz(path, file),
    }
}

fn list_zip(path: &Path, file: File) -> Result<Vec<EntryListing>> {
    let mut archive = ::zip::ZipArchive::new(file)
        .with_context(|| format!("Failed to open zip archive {:?}", path))?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        // The raw view reads the central directory record without inflating.
        let entry = archive
            .by_index_raw(index)
            .with_context(|| format!("Failed to read entry {} of {:?}", index, path))?;
        if entry.is_dir() {
            continue;
        }
        entries.push(EntryListing {
            name: entry.name().to_string(),
            size: entry.size(),
            compressed_size: Some(entry.compressed_size()),
        });
    }
    Ok(entries)
}

fn list_tar_gz(path: &Path, file: File) -> Result<Vec<EntryListing>> {
    let mut archive = ::tar::Archive::new(GzDecoder::new(file));

    let mut entries = Vec::new();
    for entry in archive
        .entries()
        .with_context(|| format!("Failed to read tar archive {:?}", path))?
    {
        // Unread entry bodies are skipped by the iterator.
        let entry = entry.with_context(|| format!("Corrupt tar entry in {:?}", path))?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let name = entry
            .path()
            .with_context(|| format!("Invalid entry name in {:?}", path))?
            .to_string_lossy()
            .into_owned();
        entries.push(EntryListing {
            name,
            size: entry.size(),
            compressed_size: None,
        });
    }
    Ok(entries)
}

fn read_zip(path: &Path, file: File) -> Result<Vec<ArchivedEntry>> {
    let mut archive = ::zip::ZipArchive::new(file)
        .with_context(|| format!("Failed to open zip archive {:?}", path))?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .with_context(|| format!("Failed to read entry {} of {:?}", index, path))?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        let mut contents = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut contents)
            .with_context(|| format!("Failed to decompress '{}' in {:?}", name, path))?;
        entries.push(ArchivedEntry { name, contents });
    }
    Ok(entries)
}

fn read_tar_gz(path: &Path, file: File) -> Result<Vec<ArchivedEntry>> {
    let mut archive = ::tar::Archive::new(GzDecoder::new(file));

    let mut entries = Vec::new();
    for entry in archive
        .entries()
        .with_context(|| format!("Failed to read tar archive {:?}", path))?
    {
        let mut entry = entry.with_context(|| format!("Corrupt tar entry in {:?}", path))?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let name = entry
            .path()
            .with_context(|| format!("Invalid entry name in {:?}", path))?
            .to_string_lossy()
            .into_owned();
        let mut contents = Vec::new();
        entry
            .read_to_end(&mut contents)
            .with_context(|| format!("Failed to decompress '{}' in {:?}", name, path))?;
        entries.push(ArchivedEntry { name, contents });
    }
    Ok(entries)
}
