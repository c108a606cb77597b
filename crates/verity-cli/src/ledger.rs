//! # Ledger Subcommands
//!
//! `verity anchor` records an already-issued credential's digest on the
//! ledger; `verity hash` prints the digest without touching the network,
//! matching the diagnostic the verifier logs before its ledger lookup.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use verity_anchor::{credential_digest, AnchorClient};

use crate::{env_registry, read_credential_file};

/// Arguments for the `verity anchor` subcommand.
#[derive(Args, Debug)]
pub struct AnchorArgs {
    /// Path to the signed credential JSON file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for the `verity hash` subcommand.
#[derive(Args, Debug)]
pub struct HashArgs {
    /// Path to the credential JSON file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Execute the anchor subcommand.
pub fn run_anchor(args: &AnchorArgs) -> Result<u8> {
    let credential = read_credential_file(&args.file)?;
    let client = AnchorClient::new(env_registry()?);
    let receipt = client.anchor(&credential)?;

    println!("OK: anchored credential digest");
    println!("  Digest:      {}", receipt.digest);
    println!("  Status:      {}", receipt.status);
    if let Some(tx) = &receipt.transaction_id {
        println!("  Transaction: {tx}");
    }
    Ok(0)
}

/// Execute the hash subcommand.
///
/// Prints only the digest so the output can be piped.
pub fn run_hash(args: &HashArgs) -> Result<u8> {
    let credential = read_credential_file(&args.file)?;
    let digest = credential_digest(&credential)?;
    println!("{digest}");
    Ok(0)
}
