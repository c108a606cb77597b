//! # Content Digests
//!
//! Defines [`ContentDigest`] and [`DigestAlgorithm`] for credential hash
//! anchoring. A digest can only be computed from
//! [`CanonicalBytes`][crate::CanonicalBytes], enforced by the signature of
//! [`sha256_digest()`], so every hash submitted to or looked up on the
//! ledger went through the canonicalization pipeline.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// The hash algorithm that produced a content digest.
///
/// Digests carry their algorithm tag so anchored references stay
/// self-describing if another algorithm is ever introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    /// SHA-256 content addressing.
    Sha256,
}

impl DigestAlgorithm {
    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content digest with its algorithm tag.
///
/// Produced exclusively from `CanonicalBytes` via [`sha256_digest()`]. The
/// 32-byte value and the tag together form a self-describing identifier
/// suitable as a ledger anchor key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    /// The hash algorithm that produced this digest.
    pub algorithm: DigestAlgorithm,
    /// The raw 32-byte digest value.
    pub bytes: [u8; 32],
}

impl ContentDigest {
    /// Create a content digest from raw bytes and algorithm.
    ///
    /// Prefer [`sha256_digest()`] for computing digests from canonical
    /// bytes.
    pub fn new(algorithm: DigestAlgorithm, bytes: [u8; 32]) -> Self {
        Self { algorithm, bytes }
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

/// Compute a SHA-256 content digest from canonical bytes.
///
/// Accepts only `&CanonicalBytes`, not raw `&[u8]`, so no code path can
/// hash bytes that skipped canonicalization.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    let hash = Sha256::digest(data.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest::new(DigestAlgorithm::Sha256, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_digest_deterministic() {
        let cb = CanonicalBytes::new(&serde_json::json!({"name": "Priya", "bloodType": "O+"}))
            .unwrap();
        let d1 = sha256_digest(&cb);
        let d2 = sha256_digest(&cb);
        assert_eq!(d1, d2);
        assert_eq!(d1.algorithm, DigestAlgorithm::Sha256);
    }

    #[test]
    fn different_inputs_different_digests() {
        let cb1 = CanonicalBytes::new(&serde_json::json!({"bloodType": "O+"})).unwrap();
        let cb2 = CanonicalBytes::new(&serde_json::json!({"bloodType": "A+"})).unwrap();
        assert_ne!(sha256_digest(&cb1), sha256_digest(&cb2));
    }

    #[test]
    fn hex_is_64_lowercase_chars() {
        let cb = CanonicalBytes::new(&serde_json::json!({"key": "value"})).unwrap();
        let hex = sha256_digest(&cb).to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn display_carries_algorithm_tag() {
        let cb = CanonicalBytes::new(&serde_json::json!({"a": 1})).unwrap();
        let s = format!("{}", sha256_digest(&cb));
        assert!(s.starts_with("sha256:"));
        assert_eq!(s.len(), 7 + 64);
    }

    #[test]
    fn known_vector_empty_object() {
        // Pinned so a canonicalization or hashing change is caught here
        // before it silently invalidates every anchored credential.
        let cb = CanonicalBytes::new(&serde_json::json!({})).unwrap();
        assert_eq!(cb.as_bytes(), b"{}");
        assert_eq!(
            sha256_digest(&cb).to_hex(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn known_vector_sorted_claims() {
        let cb = CanonicalBytes::new(&serde_json::json!({
            "nationality": "British",
            "name": "Priya Sharma"
        }))
        .unwrap();
        assert_eq!(
            cb.as_bytes(),
            br#"{"name":"Priya Sharma","nationality":"British"}"#
        );
        assert_eq!(
            sha256_digest(&cb).to_hex(),
            "74aed09ccb87476aa9236733fe2608574891acc3334a552327ce682cb54d5226"
        );
    }
}
