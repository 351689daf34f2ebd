//! # deployzip Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the deployzip CLI.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! Every invocation is a single synchronous pass: parse, run one command,
//! exit. Errors propagate up to `main`, which prints them and exits with
//! status 1.
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! deployzip --help
//!
//! # Pack ./deploy into ./deploy.zip with progress logging
//! deployzip -v pack
//!
//! # Check the result
//! deployzip verify deploy.zip deploy
//! ```
//!
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

// Declare the top-level modules of the CLI crate.
mod commands; // Subcommand arguments and handlers (pack, inspect, verify)
mod common; // Shared utilities (archive, fs)
mod core; // Core infrastructure (errors, config)

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "deployzip",
    about = "Package built deployment output into a single archive",
    long_about = "Packs a directory of built deployment files into a zip (or tar.gz) archive\n\
                  with forward-slash, archive-relative entry names, ready for upload.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build an archive from a directory
    #[command(alias = "p")]
    Pack(commands::pack::PackArgs),
    /// List the entries of an archive
    #[command(alias = "ls")]
    Inspect(commands::inspect::InspectArgs),
    /// Check an archive against its source directory
    Verify(commands::verify::VerifyArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Pack(args) => commands::pack::handle_pack(args),
        Commands::Inspect(args) => commands::inspect::handle_inspect(args),
        Commands::Verify(args) => commands::verify::handle_verify(args),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
