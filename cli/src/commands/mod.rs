//! # deployzip Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! The subcommands of the deployzip CLI. Each module defines its clap
//! arguments struct and a `handle_*` function called from `main.rs`.
//!
//! - `pack`: build a deployment archive from a directory
//! - `inspect`: list the entries of an archive
//! - `verify`: check an archive against the directory it was built from
//!

/// Builds an archive (`deployzip pack`).
pub mod pack;
/// Lists archive entries (`deployzip inspect`).
pub mod inspect;
/// Compares an archive with its source tree (`deployzip verify`).
pub mod verify;
