//! # verity-cli — CLI for the Verity Credential Stack
//!
//! Provides the `verity` command-line interface over the issuing,
//! verification, and anchoring crates.
//!
//! ## Subcommands
//!
//! - `verity issue` — Generate an issuer identity, build and sign a
//!   traveler credential, and anchor its digest.
//! - `verity verify` — Check a credential file along both axes and print
//!   the verdict; the exit code encodes it.
//! - `verity anchor` — Anchor an already-issued credential file.
//! - `verity hash` — Print a credential file's canonical content digest.
//!
//! Ledger-touching subcommands read the anchor configuration from
//! `VERITY_*` environment variables; `--skip-anchor`, `--signature-only`,
//! and `hash` work entirely offline.

pub mod issue;
pub mod ledger;
pub mod verify;

use std::path::Path;

use anyhow::{bail, Context, Result};

use verity_anchor::{AnchorConfig, EvmAnchorRegistry};
use verity_vc::Credential;

/// Read and parse a credential file.
pub fn read_credential_file(path: &Path) -> Result<Credential> {
    if !path.exists() {
        bail!("credential file not found: {}", path.display());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read credential: {}", path.display()))?;
    Credential::from_json(&raw)
        .with_context(|| format!("failed to parse credential: {}", path.display()))
}

/// Build the EVM anchor registry from `VERITY_*` environment variables.
pub fn env_registry() -> Result<EvmAnchorRegistry> {
    let config = AnchorConfig::from_env().context(
        "anchor registry not configured; set VERITY_RPC_URL, \
         VERITY_CONTRACT_ADDRESS, and VERITY_FROM_ADDRESS",
    )?;
    tracing::debug!(
        endpoint = %config.rpc_url,
        chain = %config.chain_name,
        "connecting to anchor registry"
    );
    EvmAnchorRegistry::new(config).context("failed to initialize anchor registry")
}
