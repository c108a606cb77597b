//! # Credential Structure, Signing, and Verification
//!
//! Defines the [`Credential`] envelope following the W3C VC data model,
//! trimmed to the traveler-credential profile.
//!
//! ## Security Invariants
//!
//! - **Signing** canonicalizes the credential body with `proof` removed
//!   via [`CanonicalBytes::new()`], signs it as a detached JWS, and
//!   attaches a [`Proof`]. No raw `serde_json::to_vec()` appears anywhere
//!   in the signing path.
//! - **Verification** recomputes the identical canonical body and checks
//!   the token against the key recovered from the proof's own
//!   verification-method reference. The public predicate
//!   [`Credential::verify_signature()`] is total: every content-level
//!   fault — missing proof, unresolvable key, malformed token, signature
//!   mismatch — folds to `false` rather than an error.
//! - The envelope is rigid (unknown fields fail the parse); the claims
//!   mapping inside `credentialSubject.touristInfo` is open.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use verity_core::{CanonicalBytes, CanonicalizationError, Did, Timestamp};
use verity_crypto::{resolve_verification_method, verify_detached, CryptoError, Ed25519KeyPair};

use crate::proof::{Proof, ProofType};

/// Errors from credential construction and signing.
#[derive(Error, Debug)]
pub enum VcError {
    /// Canonicalization of the credential body failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The credential carries no claims.
    #[error("credential requires at least one claim")]
    EmptyClaims,

    /// A proof is already attached; signed credentials are immutable.
    #[error("credential is already signed")]
    AlreadySigned,
}

/// Why the signature axis evaluated to false.
///
/// [`Credential::verify_signature()`] folds these to a boolean; the
/// detailed form is available for diagnostics.
#[derive(Error, Debug)]
pub enum SignatureFault {
    /// The credential carries no proof.
    #[error("credential has no proof")]
    MissingProof,

    /// The canonical signing input could not be recomputed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// The verification method did not resolve to an Ed25519 key.
    #[error("key resolution failed: {0}")]
    KeyResolution(#[source] CryptoError),

    /// The detached JWS token is malformed or its signature does not
    /// match the reconstructed signing input.
    #[error("token verification failed: {0}")]
    Token(#[source] CryptoError),
}

/// The credential subject: an open mapping of traveler claims.
///
/// Claim values are opaque strings; nothing downstream interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialSubject {
    /// Traveler profile claims (name, nationality, passport number, ...).
    #[serde(rename = "touristInfo")]
    pub tourist_info: BTreeMap<String, String>,
}

/// A traveler credential envelope.
///
/// A credential without `proof` is unsigned. Once signed, the rest of the
/// document is the signature's payload and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credential {
    /// DID of the credential issuer.
    pub issuer: Did,

    /// Credential types. Always includes `"VerifiableCredential"`.
    #[serde(rename = "type")]
    pub credential_type: Vec<String>,

    /// When the credential was issued (UTC, second precision).
    #[serde(rename = "issuanceDate")]
    pub issuance_date: Timestamp,

    /// The credential subject.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: CredentialSubject,

    /// Cryptographic proof; absent on unsigned credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

impl Credential {
    /// Parse a credential from its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns [`VcError::Json`] if the string is not valid JSON or the
    /// envelope does not match the credential structure. A parse failure
    /// means the input cannot be processed at all — it is not a
    /// verification verdict.
    pub fn from_json(raw: &str) -> Result<Self, VcError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Compute the canonical signing input: the JCS-canonicalized bytes
    /// of this credential with the `proof` field removed.
    ///
    /// Signing and verification both call this, so the bytes are
    /// identical on both sides for an untampered document.
    pub fn signing_input(&self) -> Result<CanonicalBytes, CanonicalizationError> {
        let mut val = serde_json::to_value(self)?;
        if let Some(obj) = val.as_object_mut() {
            obj.remove("proof");
        }
        CanonicalBytes::new(&val)
    }

    /// Sign this credential, attaching a detached-JWS proof.
    ///
    /// # Errors
    ///
    /// Returns [`VcError::AlreadySigned`] if a proof is already attached,
    /// or [`VcError::Canonicalization`] if the signing input cannot be
    /// computed.
    pub fn sign(
        &mut self,
        keypair: &Ed25519KeyPair,
        verification_method: impl Into<String>,
    ) -> Result<(), VcError> {
        if self.proof.is_some() {
            return Err(VcError::AlreadySigned);
        }
        let canonical = self.signing_input()?;
        let jws = verity_crypto::sign_detached(&canonical, keypair);
        self.proof = Some(Proof {
            proof_type: ProofType::Ed25519Signature,
            verification_method: verification_method.into(),
            jws,
        });
        Ok(())
    }

    /// Verify the attached proof. Total: any content-level fault yields
    /// `false`, never a panic or an error.
    pub fn verify_signature(&self) -> bool {
        self.verify_detailed().is_ok()
    }

    /// Verify the attached proof, reporting why verification failed.
    ///
    /// The public key is recovered from the proof's verification-method
    /// reference; the signing input is recomputed from this document. Both
    /// derive entirely from the credential, so verification needs no
    /// external state.
    pub fn verify_detailed(&self) -> Result<(), SignatureFault> {
        let proof = self.proof.as_ref().ok_or(SignatureFault::MissingProof)?;
        let canonical = self.signing_input()?;
        let verifying_key = resolve_verification_method(&proof.verification_method)
            .map_err(SignatureFault::KeyResolution)?;
        verify_detached(&canonical, &proof.jws, &verifying_key).map_err(SignatureFault::Token)
    }
}
