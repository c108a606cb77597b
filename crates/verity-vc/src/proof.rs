//! # Proof Types
//!
//! The cryptographic proof structure attached to credentials. The proof
//! object is rigid — unknown fields are rejected at the serde level — so
//! nothing can ride along inside a proof without failing the envelope
//! parse.

use serde::{Deserialize, Serialize};

/// The type of cryptographic proof attached to a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofType {
    /// Ed25519 detached signature over the JCS-canonicalized credential
    /// body.
    Ed25519Signature,
}

impl std::fmt::Display for ProofType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProofType::Ed25519Signature => write!(f, "Ed25519Signature"),
        }
    }
}

/// A cryptographic proof on a credential.
///
/// The `jws` field carries a detached `<header>..<signature>` token whose
/// payload is the JCS-canonicalized credential body with the `proof` field
/// excluded. The `verification_method` reference embeds the public key, so
/// the proof is verifiable without a trust store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Proof {
    /// The proof type.
    #[serde(rename = "type")]
    pub proof_type: ProofType,

    /// The verification method — a DID URL embedding the signing key.
    #[serde(rename = "verificationMethod")]
    pub verification_method: String,

    /// Detached JWS token (`<header>..<signature>`, base64url unpadded).
    pub jws: String,
}
