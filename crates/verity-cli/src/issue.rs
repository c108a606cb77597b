//! # Issue Subcommand
//!
//! One invocation performs the whole issuing flow: generate an Ed25519
//! issuer identity, derive its `did:key`, build the traveler credential
//! from the claim flags, sign it, and (unless `--skip-anchor`) anchor
//! its digest on the ledger.
//!
//! With `--output` the credential is written to a file and a summary is
//! printed; without it the signed credential JSON goes to stdout so it
//! can be piped.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use verity_anchor::AnchorClient;
use verity_crypto::issue_keypair;
use verity_vc::{Credential, CredentialBuilder};

use crate::env_registry;

/// Arguments for the `verity issue` subcommand.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Traveler's full name.
    #[arg(long)]
    pub name: String,

    /// Traveler's nationality.
    #[arg(long)]
    pub nationality: String,

    /// Passport number.
    #[arg(long)]
    pub passport_number: Option<String>,

    /// Emergency contact (phone number).
    #[arg(long)]
    pub emergency_contact: Option<String>,

    /// Blood type.
    #[arg(long)]
    pub blood_type: Option<String>,

    /// Travel insurance policy identifier.
    #[arg(long)]
    pub insurance_policy_id: Option<String>,

    /// Additional claim as KEY=VALUE. Repeatable.
    #[arg(long = "claim", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub extra: Vec<(String, String)>,

    /// Sign only; do not anchor the digest on the ledger.
    #[arg(long)]
    pub skip_anchor: bool,

    /// Write the signed credential to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Parse a `KEY=VALUE` claim argument.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k.to_string(), v.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {s:?}")),
    }
}

/// Execute the issue subcommand.
pub fn run_issue(args: &IssueArgs) -> Result<u8> {
    let identity = issue_keypair();
    tracing::info!(did = %identity.did, "issuer identity generated");

    let mut builder = CredentialBuilder::new(identity.did.clone())
        .claim("name", args.name.as_str())
        .claim("nationality", args.nationality.as_str());
    if let Some(v) = &args.passport_number {
        builder = builder.claim("passportNumber", v.as_str());
    }
    if let Some(v) = &args.emergency_contact {
        builder = builder.claim("emergencyContact", v.as_str());
    }
    if let Some(v) = &args.blood_type {
        builder = builder.claim("bloodType", v.as_str());
    }
    if let Some(v) = &args.insurance_policy_id {
        builder = builder.claim("insurancePolicyId", v.as_str());
    }
    for (k, v) in &args.extra {
        builder = builder.claim(k.as_str(), v.as_str());
    }

    let mut credential = builder.build().context("failed to build credential")?;
    credential
        .sign(&identity.keypair, identity.verification_method.clone())
        .context("failed to sign credential")?;

    write_credential(&credential, args.output.as_deref())?;

    match &args.output {
        Some(path) => {
            println!("OK: issued TouristCredential");
            println!("  Issuer DID: {}", identity.did);
            println!("  Issued at:  {}", credential.issuance_date);
            println!("  Credential: {}", path.display());
        }
        None => {
            tracing::info!(did = %identity.did, "credential issued to stdout");
        }
    }

    if args.skip_anchor {
        if args.output.is_some() {
            println!("  Anchoring:  skipped");
        }
        return Ok(0);
    }

    let client = AnchorClient::new(env_registry()?);
    let receipt = client.anchor(&credential).with_context(|| {
        match &args.output {
            Some(path) => format!(
                "credential written to {} but anchoring failed",
                path.display()
            ),
            None => "anchoring failed".to_string(),
        }
    })?;

    if args.output.is_some() {
        println!("  Digest:     {}", receipt.digest);
        match &receipt.transaction_id {
            Some(tx) => println!("  Anchoring:  {} (tx {tx})", receipt.status),
            None => println!("  Anchoring:  {}", receipt.status),
        }
    } else {
        tracing::info!(digest = %receipt.digest, status = %receipt.status, "digest anchored");
    }

    Ok(0)
}

fn write_credential(credential: &Credential, output: Option<&std::path::Path>) -> Result<()> {
    let json =
        serde_json::to_string_pretty(credential).context("failed to serialize credential")?;
    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write credential: {}", path.display()))?;
        }
        None => println!("{json}"),
    }
    Ok(())
}
