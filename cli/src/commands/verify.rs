//! # deployzip Verify Command
//!
//! File: cli/src/commands/verify.rs
//!
//! ## Overview
//!
//! Implements `deployzip verify ARCHIVE SOURCE`, which checks that extracting
//! the archive would reproduce SOURCE exactly. SOURCE is enumerated the same
//! way `pack` enumerates it, then compared entry by entry:
//!
//! - a source file with no archive entry is **missing**;
//! - an archive entry with no source file is **unexpected**;
//! - an entry whose bytes differ from the file is **changed**.
//!
//! Each discrepancy is logged as a warning and printed; any discrepancy makes
//! the command fail with `DeployError::Verification`.
//!
//! ```bash
//! deployzip pack dist -o site.zip
//! deployzip verify site.zip dist
//! ```
//!
use crate::common::archive::reader;
use crate::common::fs::io::read_source_file;
use crate::common::fs::walk;
use crate::core::error::{DeployError, Result};
use anyhow::Context;
use clap::Parser;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Arguments for `deployzip verify`.
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Archive produced by `deployzip pack`
    pub archive: PathBuf,

    /// Directory the archive was built from
    pub source: PathBuf,
}

/// One difference between an archive and its source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discrepancy {
    Missing(String),
    Unexpected(String),
    Changed(String),
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discrepancy::Missing(name) => write!(f, "missing from archive: {}", name),
            Discrepancy::Unexpected(name) => write!(f, "not in source: {}", name),
            Discrepancy::Changed(name) => write!(f, "content differs: {}", name),
        }
    }
}

/// Compares the archive at `archive` with the tree under `source`.
///
/// Returns the number of files compared and the discrepancies found, in
/// entry-name order.
pub fn compare(archive: &Path, source: &Path) -> Result<(usize, Vec<Discrepancy>)> {
    let root = source
        .canonicalize()
        .with_context(|| format!("Failed to resolve source directory {:?}", source))?;
    // An archive stored inside its own source tree is not part of the tree.
    let exclude: Vec<PathBuf> = archive.canonicalize().into_iter().collect();
    let files = walk::collect_files(&root, &exclude)?;

    let mut archived: BTreeMap<String, Vec<u8>> = BTreeMap::new();
    for entry in reader::read_archive(archive)? {
        if archived.insert(entry.name.clone(), entry.contents).is_some() {
            warn!("Duplicate entry '{}' in {:?}", entry.name, archive);
        }
    }

    let mut discrepancies = Vec::new();
    let mut compared = 0;
    for file in &files {
        match archived.remove(&file.name) {
            None => discrepancies.push(Discrepancy::Missing(file.name.clone())),
            Some(contents) => {
                compared += 1;
                if read_source_file(&file.path)? != contents {
                    discrepancies.push(Discrepancy::Changed(file.name.clone()));
                } else {
                    debug!("Verified {}", file.name);
                }
            }
        }
    }
    discrepancies.extend(archived.into_keys().map(Discrepancy::Unexpected));

    Ok((compared, discrepancies))
}

pub fn handle_verify(args: VerifyArgs) -> Result<()> {
    debug!("Handling verify command with args: {:?}", args);
    info!("Verifying {:?} against {:?}", args.archive, args.source);

    let (compared, discrepancies) = compare(&args.archive, &args.source)?;
    if discrepancies.is_empty() {
        println!("Archive matches source: {} files", compared);
        return Ok(());
    }

    for discrepancy in &discrepancies {
        warn!("{}", discrepancy);
        println!("{}", discrepancy);
    }
    Err(DeployError::Verification {
        archive: args.archive,
        source_dir: args.source,
        mismatches: discrepancies.len(),
    }
    .into())
}
