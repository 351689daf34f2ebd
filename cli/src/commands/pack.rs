//! # deployzip Pack Command
//!
//! File: cli/src/commands/pack.rs
//!
//! ## Overview
//!
//! Implements `deployzip pack`, which turns a directory of built deployment
//! output into a single archive ready for upload.
//!
//! ## Architecture
//!
//! 1. Load configuration (unless `--no-config`) via `core::config`.
//! 2. Merge settings: command-line flags, then configuration, then defaults
//!    (`deploy` -> `deploy.zip`, level 6). With no explicit format, the
//!    format follows the output extension.
//! 3. Run `common::archive::build_archive` and report the entry count.
//!
//! ## Examples
//!
//! ```bash
//! # Pack ./deploy into ./deploy.zip
//! deployzip pack
//!
//! # Pack a build directory into a tarball at maximum compression
//! deployzip pack dist -o site.tar.gz --level 9
//! ```
//!
use crate::common::archive::{self, ArchiveFormat, PackOptions, DEFAULT_LEVEL};
use crate::core::config::{self, PackConfig};
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

const DEFAULT_SOURCE: &str = "deploy";
const DEFAULT_OUTPUT: &str = "deploy.zip";

/// # Pack Arguments (`PackArgs`)
///
/// Arguments accepted by `deployzip pack`. Any value left unset falls back to
/// the configuration files, then to the built-in defaults.
#[derive(Parser, Debug, Default)]
pub struct PackArgs {
    /// Directory containing the built deployment files [default: deploy]
    pub source: Option<PathBuf>,

    /// Archive file to write; its parent directory must exist [default: deploy.zip]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Archive format [default: inferred from the output extension]
    #[arg(short, long, value_enum)]
    pub format: Option<ArchiveFormat>,

    /// Compression level from 0 (fastest) to 9 (smallest) [default: 6]
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=9))]
    pub level: Option<u32>,

    /// Read settings from this file instead of the user/project config files
    #[arg(long, conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore all configuration files
    #[arg(long)]
    pub no_config: bool,
}

/// The fully resolved inputs of one `pack` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackPlan {
    pub source: PathBuf,
    pub output: PathBuf,
    pub options: PackOptions,
}

/// Merges flags over configuration over defaults.
pub fn resolve_plan(args: &PackArgs, file: &PackConfig) -> PackPlan {
    let source = args
        .source
        .clone()
        .or_else(|| file.source.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE));
    let output = args
        .output
        .clone()
        .or_else(|| file.output.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let format = args
        .format
        .or(file.format)
        .unwrap_or_else(|| ArchiveFormat::from_destination(&output));
    let level = args.level.or(file.level).unwrap_or(DEFAULT_LEVEL);

    PackPlan {
        source,
        output,
        options: PackOptions { format, level },
    }
}

/// # Handle Pack Command (`handle_pack`)
///
/// Resolves the settings for this run and builds the archive.
///
/// ## Errors
///
/// Configuration problems, and every `ArchiveError` from `build_archive`
/// (missing source, permission problems, unwritable destination), wrapped
/// with context naming the source and output.
pub fn handle_pack(args: PackArgs) -> Result<()> {
    debug!("Handling pack command with args: {:?}", args);

    let file_config = if args.no_config {
        config::Config::default()
    } else {
        config::load_config(args.config.as_deref())?
    };
    let plan = resolve_plan(&args, &file_config.pack);
    info!("Effective pack plan: {:?}", plan);

    let count = archive::build_archive(&plan.source, &plan.output, &plan.options)
        .with_context(|| {
            format!(
                "Failed to pack '{}' into '{}'",
                plan.source.display(),
                plan.output.display()
            )
        })?;

    println!(
        "Archive created: {} ({} files, {})",
        plan.output.display(),
        count,
        plan.options.format
    );
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_plan_defaults() {
        let plan = resolve_plan(&PackArgs::default(), &PackConfig::default());
        assert_eq!(plan.source, PathBuf::from("deploy"));
        assert_eq!(plan.output, PathBuf::from("deploy.zip"));
        assert_eq!(plan.options, PackOptions::default());
    }

    #[test]
    fn test_resolve_plan_flags_override_config() {
        let args = PackArgs {
            source: Some(PathBuf::from("dist")),
            level: Some(1),
            ..Default::default()
        };
        let file = PackConfig {
            source: Some(PathBuf::from("/configured/build")),
            output: Some(PathBuf::from("/configured/site.tgz")),
            level: Some(9),
            format: None,
        };
        let plan = resolve_plan(&args, &file);
        assert_eq!(plan.source, PathBuf::from("dist"));
        assert_eq!(plan.output, PathBuf::from("/configured/site.tgz"));
        assert_eq!(plan.options.level, 1);
        assert_eq!(plan.options.format, ArchiveFormat::TarGz);
    }

    #[test]
    fn test_resolve_plan_explicit_format_wins_over_extension() {
        let args = PackArgs {
            output: Some(PathBuf::from("bundle.tar.gz")),
            format: Some(ArchiveFormat::Zip),
            ..Default::default()
        };
        let plan = resolve_plan(&args, &PackConfig::default());
        assert_eq!(plan.options.format, ArchiveFormat::Zip);
    }
}
