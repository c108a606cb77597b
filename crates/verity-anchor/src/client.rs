//! # Anchoring Client
//!
//! High-level anchoring operations over any [`AnchorRegistry`]: compute
//! the anchor digest of a signed credential, record it on the ledger,
//! and query its status.
//!
//! The anchor digest covers the **whole signed document including its
//! proof**, so the ledger attests to one specific signature over the
//! content, not just the content. Re-signing the same claims yields a
//! different digest.

use verity_core::{sha256_digest, CanonicalBytes, ContentDigest};
use verity_vc::Credential;

use crate::error::AnchorError;
use crate::registry::AnchorRegistry;

/// Compute the anchor digest of a credential: SHA-256 over the canonical
/// form of the full document, proof included.
pub fn credential_digest(credential: &Credential) -> Result<ContentDigest, AnchorError> {
    let canonical = CanonicalBytes::new(credential)?;
    Ok(sha256_digest(&canonical))
}

/// Outcome of an anchoring request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorStatus {
    /// The digest was newly recorded on the ledger.
    Submitted,
    /// The digest was already present; no transaction was sent.
    AlreadyAnchored,
}

impl std::fmt::Display for AnchorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Submitted => write!(f, "submitted"),
            Self::AlreadyAnchored => write!(f, "already anchored"),
        }
    }
}

/// Receipt for an anchoring request.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorReceipt {
    /// The digest that was anchored or found.
    pub digest: ContentDigest,
    /// Ledger transaction identifier; `None` when nothing was submitted.
    pub transaction_id: Option<String>,
    /// Whether a transaction was submitted or the digest already existed.
    pub status: AnchorStatus,
}

/// Anchoring operations over a registry backend.
#[derive(Debug)]
pub struct AnchorClient<R: AnchorRegistry> {
    registry: R,
}

impl<R: AnchorRegistry> AnchorClient<R> {
    /// Wrap a registry backend.
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Anchor a signed credential's digest on the ledger.
    ///
    /// Checks the ledger first and skips the write when the digest is
    /// already present, returning [`AnchorStatus::AlreadyAnchored`].
    ///
    /// # Errors
    ///
    /// Returns [`AnchorError::Rejected`] for an unsigned credential; an
    /// unsigned document has no stable final form worth attesting to.
    /// Ledger failures propagate as [`AnchorError::Unreachable`].
    pub fn anchor(&self, credential: &Credential) -> Result<AnchorReceipt, AnchorError> {
        if credential.proof.is_none() {
            return Err(AnchorError::Rejected {
                reason: "credential is unsigned; sign before anchoring".to_string(),
            });
        }
        let digest = credential_digest(credential)?;
        if self.registry.is_anchored(&digest)? {
            tracing::debug!(digest = %digest, "digest already anchored, skipping write");
            return Ok(AnchorReceipt {
                digest,
                transaction_id: None,
                status: AnchorStatus::AlreadyAnchored,
            });
        }
        let transaction_id = self.registry.record(&digest)?;
        Ok(AnchorReceipt {
            digest,
            transaction_id: Some(transaction_id),
            status: AnchorStatus::Submitted,
        })
    }

    /// Whether the credential's digest is anchored on the ledger.
    pub fn check_anchored(&self, credential: &Credential) -> Result<bool, AnchorError> {
        let digest = credential_digest(credential)?;
        self.registry.is_anchored(&digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::InMemoryAnchorRegistry;
    use verity_crypto::issue_keypair;
    use verity_vc::CredentialBuilder;

    fn signed_credential() -> Credential {
        let identity = issue_keypair();
        let mut vc = CredentialBuilder::new(identity.did.clone())
            .claim("name", "Priya Sharma")
            .claim("nationality", "British")
            .build()
            .unwrap();
        vc.sign(&identity.keypair, identity.verification_method.clone())
            .unwrap();
        vc
    }

    fn unsigned_credential() -> Credential {
        let identity = issue_keypair();
        CredentialBuilder::new(identity.did)
            .claim("name", "Priya Sharma")
            .build()
            .unwrap()
    }

    #[test]
    fn anchor_then_check() {
        let client = AnchorClient::new(InMemoryAnchorRegistry::new());
        let vc = signed_credential();

        assert!(!client.check_anchored(&vc).unwrap());

        let receipt = client.anchor(&vc).unwrap();
        assert_eq!(receipt.status, AnchorStatus::Submitted);
        assert!(receipt.transaction_id.is_some());
        assert!(client.check_anchored(&vc).unwrap());
    }

    #[test]
    fn unsigned_credential_rejected() {
        let client = AnchorClient::new(InMemoryAnchorRegistry::new());
        let vc = unsigned_credential();
        assert!(matches!(
            client.anchor(&vc),
            Err(AnchorError::Rejected { .. })
        ));
        // Nothing was written.
        assert!(client.registry().is_empty());
    }

    #[test]
    fn second_anchor_skips_the_write() {
        let client = AnchorClient::new(InMemoryAnchorRegistry::new());
        let vc = signed_credential();

        let first = client.anchor(&vc).unwrap();
        let second = client.anchor(&vc).unwrap();

        assert_eq!(first.status, AnchorStatus::Submitted);
        assert_eq!(second.status, AnchorStatus::AlreadyAnchored);
        assert!(second.transaction_id.is_none());
        assert_eq!(first.digest, second.digest);
        assert_eq!(client.registry().len(), 1);
    }

    #[test]
    fn digest_covers_the_proof() {
        let identity = issue_keypair();
        let mut vc = CredentialBuilder::new(identity.did.clone())
            .claim("name", "Priya Sharma")
            .build()
            .unwrap();
        let unsigned_digest = credential_digest(&vc).unwrap();
        vc.sign(&identity.keypair, identity.verification_method.clone())
            .unwrap();
        let signed_digest = credential_digest(&vc).unwrap();
        assert_ne!(unsigned_digest, signed_digest);
    }

    #[test]
    fn different_credentials_different_digests() {
        let a = signed_credential();
        let b = signed_credential();
        assert_ne!(
            credential_digest(&a).unwrap(),
            credential_digest(&b).unwrap()
        );
    }

    #[test]
    fn offline_registry_propagates_unreachable() {
        let registry = InMemoryAnchorRegistry::new();
        registry.set_offline(true);
        let client = AnchorClient::new(registry);
        let vc = signed_credential();

        assert!(matches!(
            client.anchor(&vc),
            Err(AnchorError::Unreachable { .. })
        ));
        assert!(matches!(
            client.check_anchored(&vc),
            Err(AnchorError::Unreachable { .. })
        ));
    }
}
