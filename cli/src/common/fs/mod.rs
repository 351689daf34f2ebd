//! # deployzip Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers shared by the archive builder and the commands:
//!
//! - **`io`**: reading files with path-aware errors and resolving where an
//!   archive will be written.
//! - **`walk`**: deterministic enumeration of the regular files under a
//!   source directory, already paired with their archive entry names.
//!
//! Import from the specific submodule, e.g. `crate::common::fs::walk::collect_files`.
//!

/// Contains basic file I/O operations (e.g., `read_file_to_string`, `resolve_destination`).
pub mod io;
/// Contains the source-tree walker (`collect_files`).
pub mod walk;
