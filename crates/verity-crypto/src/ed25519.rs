//! # Ed25519 Signing and Verification
//!
//! Ed25519 key generation, signing, and verification for credential
//! proofs.
//!
//! ## Security Invariant
//!
//! - The public signing input is `&CanonicalBytes` — raw bytes cannot be
//!   signed from outside this crate, so every signed payload went through
//!   the canonicalization pipeline. The detached-JWS module composes its
//!   header-prefixed input internally and is the only other signing path.
//! - Private keys are never serialized or logged. [`Ed25519KeyPair`] does
//!   not implement `Serialize` and its `Debug` output is redacted.
//!
//! Keys and signatures never appear bare on the wire: public keys travel
//! base58-encoded inside `did:key` identifiers and signatures travel
//! base64url-encoded inside detached JWS tokens, so these newtypes carry
//! no serde impls of their own.

use ed25519_dalek::{Signer, Verifier};
use verity_core::CanonicalBytes;

use crate::error::CryptoError;

/// An Ed25519 public key (32 bytes) for signature verification.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey(pub [u8; 32]);

/// An Ed25519 signature (64 bytes).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ed25519Signature(pub [u8; 64]);

/// An Ed25519 key pair for signing operations.
///
/// Does not implement `Serialize` — private keys must not leak into logs,
/// responses, or artifacts. The underlying key material zeroizes on drop.
pub struct Ed25519KeyPair {
    signing_key: ed25519_dalek::SigningKey,
}

// ---------------------------------------------------------------------------
// Ed25519PublicKey impls
// ---------------------------------------------------------------------------

impl Ed25519PublicKey {
    /// Create a public key from raw 32 bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the raw 32-byte public key.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to an `ed25519_dalek::VerifyingKey` for verification.
    pub fn to_verifying_key(&self) -> Result<ed25519_dalek::VerifyingKey, CryptoError> {
        ed25519_dalek::VerifyingKey::from_bytes(&self.0)
            .map_err(|e| CryptoError::KeyError(format!("invalid public key: {e}")))
    }
}

impl std::fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519PublicKey({}...)", hex_prefix(&self.0))
    }
}

// ---------------------------------------------------------------------------
// Ed25519Signature impls
// ---------------------------------------------------------------------------

impl Ed25519Signature {
    /// Create a signature from raw 64 bytes.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Return the raw 64-byte signature.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl std::fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519Signature({}...)", hex_prefix(&self.0))
    }
}

// ---------------------------------------------------------------------------
// Ed25519KeyPair impls
// ---------------------------------------------------------------------------

impl Ed25519KeyPair {
    /// Generate a new random Ed25519 key pair from OS entropy.
    ///
    /// Infallible at this surface; catastrophic entropy failure aborts the
    /// process rather than returning a key of degraded quality.
    pub fn generate() -> Self {
        let mut csprng = rand_core::OsRng;
        let signing_key = ed25519_dalek::SigningKey::generate(&mut csprng);
        Self { signing_key }
    }

    /// Create a key pair from a raw 32-byte private key seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = ed25519_dalek::SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Get the public key for this key pair.
    pub fn public_key(&self) -> Ed25519PublicKey {
        let vk = self.signing_key.verifying_key();
        Ed25519PublicKey(vk.to_bytes())
    }

    /// Sign canonical bytes.
    ///
    /// The signing input must be `&CanonicalBytes`, so only canonicalized
    /// data can be signed through the public surface.
    pub fn sign(&self, data: &CanonicalBytes) -> Ed25519Signature {
        self.sign_raw(data.as_bytes())
    }

    /// Sign raw bytes. Restricted to this crate: the only caller is the
    /// detached-JWS module, whose signing input is a header prefix plus
    /// canonical payload bytes.
    pub(crate) fn sign_raw(&self, data: &[u8]) -> Ed25519Signature {
        let sig = self.signing_key.sign(data);
        Ed25519Signature(sig.to_bytes())
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519KeyPair(<private>)")
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Verify an Ed25519 signature over canonical bytes.
///
/// Returns `Ok(())` if valid, `Err(CryptoError::VerificationFailed)`
/// otherwise.
pub fn verify(
    data: &CanonicalBytes,
    signature: &Ed25519Signature,
    verifying_key: &ed25519_dalek::VerifyingKey,
) -> Result<(), CryptoError> {
    let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key
        .verify(data.as_bytes(), &sig)
        .map_err(|e| CryptoError::VerificationFailed(format!("Ed25519 verification failed: {e}")))
}

fn hex_prefix(bytes: &[u8]) -> String {
    bytes.iter().take(4).map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keypair_generation() {
        let kp = Ed25519KeyPair::generate();
        assert_eq!(kp.public_key().as_bytes().len(), 32);
    }

    #[test]
    fn sign_and_verify() {
        let kp = Ed25519KeyPair::generate();
        let data = serde_json::json!({"name": "Priya Sharma", "bloodType": "O+"});
        let canonical = CanonicalBytes::new(&data).expect("should canonicalize");
        let sig = kp.sign(&canonical);
        assert_eq!(sig.as_bytes().len(), 64);

        let vk = kp.public_key().to_verifying_key().unwrap();
        verify(&canonical, &sig, &vk).expect("valid signature should verify");
    }

    #[test]
    fn verify_wrong_key_fails() {
        let kp1 = Ed25519KeyPair::generate();
        let kp2 = Ed25519KeyPair::generate();
        let canonical = CanonicalBytes::new(&serde_json::json!({"test": true})).unwrap();
        let sig = kp1.sign(&canonical);

        let wrong_vk = kp2.public_key().to_verifying_key().unwrap();
        assert!(verify(&canonical, &sig, &wrong_vk).is_err());
    }

    #[test]
    fn verify_wrong_message_fails() {
        let kp = Ed25519KeyPair::generate();
        let original = CanonicalBytes::new(&serde_json::json!({"bloodType": "O+"})).unwrap();
        let tampered = CanonicalBytes::new(&serde_json::json!({"bloodType": "A+"})).unwrap();
        let sig = kp.sign(&original);

        let vk = kp.public_key().to_verifying_key().unwrap();
        assert!(verify(&tampered, &sig, &vk).is_err());
    }

    #[test]
    fn deterministic_from_seed() {
        let seed = [42u8; 32];
        let kp1 = Ed25519KeyPair::from_seed(&seed);
        let kp2 = Ed25519KeyPair::from_seed(&seed);
        assert_eq!(kp1.public_key(), kp2.public_key());

        let canonical = CanonicalBytes::new(&serde_json::json!({"test": "deterministic"})).unwrap();
        assert_eq!(kp1.sign(&canonical), kp2.sign(&canonical));
    }

    #[test]
    fn debug_does_not_leak_private_key() {
        let kp = Ed25519KeyPair::generate();
        let debug = format!("{kp:?}");
        assert_eq!(debug, "Ed25519KeyPair(<private>)");
        assert!(!debug.contains("SigningKey"));
    }

    #[test]
    fn debug_public_key_shows_prefix_only() {
        let pk = Ed25519KeyPair::generate().public_key();
        let debug = format!("{pk:?}");
        assert!(debug.starts_with("Ed25519PublicKey("));
        assert!(debug.ends_with("...)"));
        assert!(debug.len() < 64); // never the full key
    }
}
