//! # deployzip Inspect Command
//!
//! File: cli/src/commands/inspect.rs
//!
//! Implements `deployzip inspect ARCHIVE`: lists every file entry of a zip or
//! tar-gz archive with its size, followed by a total. Only entry headers are
//! read; nothing is decompressed into memory.
//!
//! ```bash
//! deployzip inspect deploy.zip
//! ```
//!
use crate::common::archive::reader::{self, EntryListing};
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

/// Arguments for `deployzip inspect`.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Archive to list
    pub archive: PathBuf,
}

/// Formats one listing line: size, stored size (or `-`), name.
fn format_entry(entry: &EntryListing) -> String {
    let stored = entry
        .compressed_size
        .map_or_else(|| "-".to_string(), |s| s.to_string());
    format!("{:>12} {:>12}  {}", entry.size, stored, entry.name)
}

pub fn handle_inspect(args: InspectArgs) -> Result<()> {
    debug!("Handling inspect command with args: {:?}", args);
    let entries = reader::list_archive(&args.archive)?;

    println!("{:>12} {:>12}  {}", "size", "stored", "name");
    for entry in &entries {
        println!("{}", format_entry(entry));
    }
    let total: u64 = entries.iter().map(|e| e.size).sum();
    println!("{} files, {} bytes", entries.len(), total);
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_entry() {
        let entry = EntryListing {
            name: ".config/settings.json".to_string(),
            size: 120,
            compressed_size: Some(80),
        };
        assert_eq!(
            format_entry(&entry),
            "         120           80  .config/settings.json"
        );

        let tar_entry = EntryListing {
            compressed_size: None,
            ..entry
        };
        assert!(format_entry(&tar_entry).contains("            -  "));
    }
}
