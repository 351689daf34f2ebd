//! # deployzip Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads the optional TOML configuration for deployzip. Settings
//! are never read from process-wide state: the loaded `Config` is handed to
//! the command that needs it, which merges it with its own flags.
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit `--config FILE`, otherwise the project file
//!    `.deployzip.toml` in the current directory or its ancestors (the search
//!    stops at a directory containing `.git`)
//! 2. The user file `config.toml` in the platform config directory
//! 3. Default values defined by the command
//!
//! Paths are expanded (`~` to the home directory) and relative paths are
//! resolved against the directory of the file that declared them.
//!
//! ## Examples
//!
//! ```toml
//! [pack]
//! source = "dist"
//! output = "~/releases/site.zip"
//! format = "zip"
//! level = 9
//! ```
//!
//! ```rust
//! let cfg = config::load_config(None)?;
//! let source = cfg.pack.source.unwrap_or_else(|| PathBuf::from("deploy"));
//! ```
//!
use crate::common::archive::ArchiveFormat;
use crate::common::fs::io::read_file_to_string;
use crate::core::error::{DeployError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
pub struct Config {
    #[serde(default)]
    pub pack: PackConfig,
}

/// Settings for `deployzip pack`. Every field is optional; unset fields fall
/// through to the next source.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PackConfig {
    /// Directory whose contents are archived.
    pub source: Option<PathBuf>,
    /// Archive file to write.
    pub output: Option<PathBuf>,
    pub format: Option<ArchiveFormat>,
    /// Deflate level, 0-9.
    pub level: Option<u32>,
}

const PROJECT_CONFIG_FILENAME: &str = ".deployzip.toml";

/// Loads and merges configuration.
///
/// With `explicit` set, only that file is read (it must exist); otherwise the
/// user and project files are merged, project settings winning.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let merged = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    validate_config(&merged).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged);
    Ok(merged)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "deployzip", "deployzip") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file ({PROJECT_CONFIG_FILENAME}) found.");
        Ok(None)
    }
}

/// Searches `start` and its ancestors for `.deployzip.toml`, stopping at the
/// first directory that contains `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = read_file_to_string(path)?;
    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
    let base_dir = path.parent().unwrap_or(Path::new("."));
    resolve_config_paths(&mut config, base_dir);
    Ok(config)
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };
    Config {
        pack: PackConfig {
            source: project.pack.source.or(user.pack.source),
            output: project.pack.output.or(user.pack.output),
            format: project.pack.format.or(user.pack.format),
            level: project.pack.level.or(user.pack.level),
        },
    }
}

/// Expands `~` and anchors relative paths at `base_dir`.
fn resolve_config_paths(config: &mut Config, base_dir: &Path) {
    let resolve = |path: &mut PathBuf| {
        let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
        *path = if expanded.is_absolute() {
            expanded
        } else {
            base_dir.join(expanded)
        };
        debug!("Resolved configured path: {}", path.display());
    };
    if let Some(source) = config.pack.source.as_mut() {
        resolve(source);
    }
    if let Some(output) = config.pack.output.as_mut() {
        resolve(output);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if let Some(level) = config.pack.level {
        if level > 9 {
            return Err(anyhow!(DeployError::Config(format!(
                "Invalid compression level {}. Expected 0-9.",
                level
            ))));
        }
    }
    if let Some(source) = &config.pack.source {
        if source.as_os_str().is_empty() {
            return Err(anyhow!(DeployError::Config(
                "pack.source cannot be empty.".to_string()
            )));
        }
    }
    Ok(())
}
