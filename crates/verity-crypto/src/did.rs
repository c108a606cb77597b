//! # did:key Derivation and Resolution
//!
//! Maps Ed25519 public keys to `did:key` identifiers and back. The
//! method-specific id is the base58 encoding of a 2-byte multicodec prefix
//! (`0xed 0x01`, Ed25519 public key) followed by the raw 32-byte key; the
//! verification-method reference repeats that encoding as the fragment.
//!
//! A credential proof is therefore self-contained: the verifier recovers
//! the public key from the proof's own verification-method reference
//! rather than from a trust store. Signature verification establishes
//! integrity only — provenance comes from the ledger anchor check.

use verity_core::Did;

use crate::ed25519::{Ed25519KeyPair, Ed25519PublicKey};
use crate::error::CryptoError;

/// Multicodec prefix marking an Ed25519 public key.
pub const ED25519_CODEC: [u8; 2] = [0xed, 0x01];

/// Identity material issued for one signing session.
///
/// The caller owns the key pair for the lifetime of the issuance
/// operation; nothing here persists private key material.
#[derive(Debug)]
pub struct IssuedIdentity {
    /// Fresh signing key pair.
    pub keypair: Ed25519KeyPair,
    /// Issuer DID derived from the public key.
    pub did: Did,
    /// Verification-method reference (`<did>#<fragment>`) for proofs.
    pub verification_method: String,
}

/// Generate a fresh issuer identity: key pair, `did:key` identifier, and
/// verification-method reference.
pub fn issue_keypair() -> IssuedIdentity {
    let keypair = Ed25519KeyPair::generate();
    let public_key = keypair.public_key();
    let did = derive_did(&public_key);
    let verification_method = verification_method(&public_key);
    IssuedIdentity {
        keypair,
        did,
        verification_method,
    }
}

/// Derive the `did:key` identifier for an Ed25519 public key.
pub fn derive_did(public_key: &Ed25519PublicKey) -> Did {
    let encoded = encode_key(public_key);
    Did::new(format!("did:key:{encoded}")).expect("base58 fragment satisfies DID syntax")
}

/// Build the verification-method reference for an Ed25519 public key.
///
/// The fragment repeats the method-specific id, so the key is recoverable
/// from the fragment alone.
pub fn verification_method(public_key: &Ed25519PublicKey) -> String {
    let encoded = encode_key(public_key);
    format!("did:key:{encoded}#{encoded}")
}

fn encode_key(public_key: &Ed25519PublicKey) -> String {
    let mut prefixed = Vec::with_capacity(ED25519_CODEC.len() + 32);
    prefixed.extend_from_slice(&ED25519_CODEC);
    prefixed.extend_from_slice(public_key.as_bytes());
    bs58::encode(prefixed).into_string()
}

/// Resolve a verification-method reference back to a verifying key.
///
/// Takes the fragment after `#`, base58-decodes it, checks and strips the
/// multicodec prefix, and constructs the Ed25519 key from the remaining
/// 32 bytes.
pub fn resolve_verification_method(
    reference: &str,
) -> Result<ed25519_dalek::VerifyingKey, CryptoError> {
    let (_, fragment) = reference.split_once('#').ok_or_else(|| {
        CryptoError::InvalidVerificationMethod(format!("missing #fragment in {reference:?}"))
    })?;

    let decoded = bs58::decode(fragment).into_vec().map_err(|e| {
        CryptoError::InvalidVerificationMethod(format!("fragment is not base58: {e}"))
    })?;

    if decoded.len() != ED25519_CODEC.len() + 32 || decoded[..2] != ED25519_CODEC {
        return Err(CryptoError::InvalidVerificationMethod(format!(
            "expected ed25519 multicodec prefix and 32 key bytes, got {} bytes",
            decoded.len()
        )));
    }

    let mut key_bytes = [0u8; 32];
    key_bytes.copy_from_slice(&decoded[2..]);
    ed25519_dalek::VerifyingKey::from_bytes(&key_bytes)
        .map_err(|e| CryptoError::InvalidVerificationMethod(format!("invalid key bytes: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_identity_is_internally_consistent() {
        let identity = issue_keypair();
        assert_eq!(identity.did.method(), "key");
        assert!(identity
            .verification_method
            .starts_with(identity.did.as_str()));
        assert!(identity.verification_method.contains('#'));
    }

    #[test]
    fn derive_did_uses_key_method() {
        let kp = Ed25519KeyPair::generate();
        let did = derive_did(&kp.public_key());
        assert_eq!(did.method(), "key");
        assert!(!did.method_specific_id().is_empty());
    }

    #[test]
    fn fragment_equals_method_specific_id() {
        let kp = Ed25519KeyPair::generate();
        let did = derive_did(&kp.public_key());
        let vm = verification_method(&kp.public_key());
        let (base, fragment) = vm.split_once('#').unwrap();
        assert_eq!(base, did.as_str());
        assert_eq!(fragment, did.method_specific_id());
    }

    #[test]
    fn encoded_key_carries_multicodec_prefix() {
        let kp = Ed25519KeyPair::generate();
        let did = derive_did(&kp.public_key());
        let decoded = bs58::decode(did.method_specific_id()).into_vec().unwrap();
        assert_eq!(decoded.len(), 34);
        assert_eq!(&decoded[..2], &ED25519_CODEC);
        assert_eq!(&decoded[2..], kp.public_key().as_bytes());
    }

    #[test]
    fn resolve_roundtrip_recovers_key() {
        let kp = Ed25519KeyPair::generate();
        let vm = verification_method(&kp.public_key());
        let vk = resolve_verification_method(&vm).unwrap();
        assert_eq!(vk.to_bytes(), *kp.public_key().as_bytes());
    }

    #[test]
    fn resolve_rejects_missing_fragment() {
        let kp = Ed25519KeyPair::generate();
        let did = derive_did(&kp.public_key());
        assert!(resolve_verification_method(did.as_str()).is_err());
    }

    #[test]
    fn resolve_rejects_bad_base58() {
        // 0, O, I, l are outside the base58 alphabet.
        assert!(resolve_verification_method("did:key:x#0OIl").is_err());
    }

    #[test]
    fn resolve_rejects_wrong_prefix() {
        let mut bytes = vec![0xec, 0x01];
        bytes.extend_from_slice(&[7u8; 32]);
        let fragment = bs58::encode(bytes).into_string();
        let err = resolve_verification_method(&format!("did:key:{fragment}#{fragment}"));
        assert!(err.is_err());
    }

    #[test]
    fn resolve_rejects_truncated_key() {
        let mut bytes = ED25519_CODEC.to_vec();
        bytes.extend_from_slice(&[7u8; 16]);
        let fragment = bs58::encode(bytes).into_string();
        assert!(resolve_verification_method(&format!("did:key:x#{fragment}")).is_err());
    }

    #[test]
    fn distinct_keys_distinct_dids() {
        let a = derive_did(&Ed25519KeyPair::generate().public_key());
        let b = derive_did(&Ed25519KeyPair::generate().public_key());
        assert_ne!(a, b);
    }
}
