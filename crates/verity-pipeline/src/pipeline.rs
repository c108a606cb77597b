//! The verification pipeline: parse, check both axes, reduce.
//!
//! Verification distinguishes three kinds of outcome and never blurs
//! them:
//!
//! - a **verdict** ([`VerificationReport`]) for any structurally valid
//!   credential, including ones whose signature fails;
//! - [`PipelineError::Malformed`] for input that cannot be read as a
//!   credential at all;
//! - [`PipelineError::AnchorUnreachable`] when the ledger cannot answer,
//!   because "not anchored" and "could not check" must never be
//!   conflated.

use serde::Serialize;
use thiserror::Error;

use verity_anchor::{AnchorClient, AnchorError, AnchorRegistry};
use verity_vc::{Credential, VcError};

use crate::state::{reduce, TrustState};

/// Errors that prevent verification from producing a verdict.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input could not be parsed as a credential.
    #[error("malformed credential: {0}")]
    Malformed(#[from] VcError),

    /// The anchor registry could not be consulted.
    #[error("anchor status unavailable: {0}")]
    AnchorUnreachable(#[from] AnchorError),
}

/// The outcome of verifying a credential: both axes plus the reduced
/// trust state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// Whether the attached proof verified against the document.
    pub signature_valid: bool,
    /// Whether the document's digest is anchored on the ledger.
    pub anchored: bool,
    /// The reduction of the two axes.
    pub state: TrustState,
}

/// Verifies credentials against a signature check and an anchor registry.
#[derive(Debug)]
pub struct VerificationPipeline<R: AnchorRegistry> {
    anchor: AnchorClient<R>,
}

impl<R: AnchorRegistry> VerificationPipeline<R> {
    /// Build a pipeline over the given registry backend.
    pub fn new(registry: R) -> Self {
        Self {
            anchor: AnchorClient::new(registry),
        }
    }

    /// The anchoring client the pipeline consults.
    pub fn anchor_client(&self) -> &AnchorClient<R> {
        &self.anchor
    }

    /// Verify a parsed credential.
    ///
    /// Both axes are always evaluated: a failed signature does not skip
    /// the anchor lookup, so an unreachable ledger surfaces as
    /// [`PipelineError::AnchorUnreachable`] regardless of signature
    /// standing.
    pub fn verify(&self, credential: &Credential) -> Result<VerificationReport, PipelineError> {
        let signature_valid = credential.verify_signature();
        let anchored = self.anchor.check_anchored(credential)?;
        let state = reduce(signature_valid, anchored);
        tracing::debug!(signature_valid, anchored, state = %state, "credential verified");
        Ok(VerificationReport {
            signature_valid,
            anchored,
            state,
        })
    }

    /// Parse a credential from its JSON wire form and verify it.
    pub fn verify_str(&self, raw: &str) -> Result<VerificationReport, PipelineError> {
        let credential = Credential::from_json(raw)?;
        self.verify(&credential)
    }
}
