//! # deployzip Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks used by the command handlers, kept apart from
//! command-specific logic (`commands::`) and core infrastructure (`core::`):
//!
//! - **`archive`**: building deployment archives (zip, tar-gz) and reading
//!   them back.
//! - **`fs`**: filesystem I/O helpers and the source-tree walker.
//!

/// Building and reading deployment archives.
pub mod archive;
/// Utilities for filesystem operations (I/O, tree walking).
pub mod fs;
