//! # verity CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use verity_cli::issue::{run_issue, IssueArgs};
use verity_cli::ledger::{run_anchor, run_hash, AnchorArgs, HashArgs};
use verity_cli::verify::{run_verify, VerifyArgs};

/// Verity — verifiable traveler credentials with ledger anchoring.
///
/// Issues Ed25519-signed traveler credentials, verifies them along the
/// signature and anchoring axes, and manages their digests on an EVM
/// anchoring contract.
#[derive(Parser, Debug)]
#[command(name = "verity", version = "0.3.0", about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Issue a signed traveler credential (and anchor its digest).
    Issue(IssueArgs),

    /// Verify a credential file and report the trust verdict.
    Verify(VerifyArgs),

    /// Anchor an issued credential's digest on the ledger.
    Anchor(AnchorArgs),

    /// Print a credential file's canonical content digest.
    Hash(HashArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Issue(args) => run_issue(&args),
        Commands::Verify(args) => run_verify(&args),
        Commands::Anchor(args) => run_anchor(&args),
        Commands::Hash(args) => run_hash(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
