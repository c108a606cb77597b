//! # Verify Subcommand
//!
//! Reads a credential file and evaluates both verification axes, then
//! prints them separately followed by the combined verdict, the way a
//! checkpoint terminal displays them. The exit code encodes the verdict:
//!
//! - `0` — fully verified
//! - `2` — valid but unanchored
//! - `1` — invalid, unreadable input, or ledger unavailable
//!
//! `--signature-only` skips the ledger lookup entirely and reports just
//! the signature axis (exit `0` or `1`).

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use verity_pipeline::{TrustState, VerificationPipeline};
use verity_vc::Credential;

use crate::{env_registry, read_credential_file};

/// Arguments for the `verity verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Path to the credential JSON file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Check only the signature; skip the ledger lookup.
    #[arg(long)]
    pub signature_only: bool,
}

/// Execute the verify subcommand.
pub fn run_verify(args: &VerifyArgs) -> Result<u8> {
    let credential = read_credential_file(&args.file)?;

    if args.signature_only {
        return Ok(run_signature_only(&credential));
    }

    let pipeline = VerificationPipeline::new(env_registry()?);
    let report = pipeline.verify(&credential)?;

    println!(
        "Signature integrity: {}",
        if report.signature_valid { "PASS" } else { "FAIL" }
    );
    println!(
        "Ledger anchor:       {}",
        if report.anchored { "ANCHORED" } else { "ABSENT" }
    );
    println!();
    println!("{}", verdict_line(report.state));

    Ok(exit_code_for(report.state))
}

fn run_signature_only(credential: &Credential) -> u8 {
    match credential.verify_detailed() {
        Ok(()) => {
            println!("OK: signature is valid");
            0
        }
        Err(fault) => {
            println!("FAIL: signature verification failed: {fault}");
            1
        }
    }
}

fn verdict_line(state: TrustState) -> &'static str {
    match state {
        TrustState::FullyVerified => {
            "OK: fully verified (signature valid, digest anchored on ledger)"
        }
        TrustState::ValidButUnanchored => {
            "WARN: authentic but unconfirmed (signature valid, digest not anchored)"
        }
        TrustState::Invalid => "FAIL: do not trust (signature verification failed)",
    }
}

fn exit_code_for(state: TrustState) -> u8 {
    match state {
        TrustState::FullyVerified => 0,
        TrustState::ValidButUnanchored => 2,
        TrustState::Invalid => 1,
    }
}
