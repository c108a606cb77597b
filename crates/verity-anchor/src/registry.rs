//! # Anchor Registry — Generic Trait Interface
//!
//! Defines the [`AnchorRegistry`] trait that abstracts over ledger
//! backends for credential-digest anchoring. The verification pipeline
//! and anchoring client are generic over this trait, so the same code
//! paths run against a live EVM node or the in-memory registry.
//!
//! A registry answers exactly two questions: is this digest anchored,
//! and record this digest. Absence of a digest is an `Ok(false)` answer,
//! never an error; errors are reserved for a ledger that cannot answer
//! at all.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use verity_core::ContentDigest;

use crate::error::AnchorError;

/// A ledger backend that stores and looks up credential digests.
///
/// Implementations must be `Send + Sync` so a registry can be shared
/// behind an `Arc` across threads.
pub trait AnchorRegistry: Send + Sync {
    /// Whether the digest has been anchored.
    ///
    /// An absent digest is `Ok(false)`. `Err` means the ledger could not
    /// be consulted and the status is unknown.
    fn is_anchored(&self, digest: &ContentDigest) -> Result<bool, AnchorError>;

    /// Record the digest on the ledger, returning a transaction
    /// identifier.
    fn record(&self, digest: &ContentDigest) -> Result<String, AnchorError>;

    /// The endpoint this registry talks to, for logs and error messages.
    fn endpoint(&self) -> &str;
}

/// In-memory anchor registry for testing and development.
///
/// Stores digests in a process-local set and fabricates transaction
/// identifiers from the digest prefix, so repeated runs are
/// deterministic. The registry can be switched offline to exercise the
/// unreachable-ledger paths without a network.
#[derive(Debug, Default)]
pub struct InMemoryAnchorRegistry {
    anchored: Mutex<HashSet<ContentDigest>>,
    offline: AtomicBool,
}

/// Endpoint label reported by [`InMemoryAnchorRegistry`].
pub const IN_MEMORY_ENDPOINT: &str = "memory://anchor-registry";

impl InMemoryAnchorRegistry {
    /// Create an empty, online registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the registry offline (or back online). While offline every
    /// operation fails with [`AnchorError::Unreachable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of digests currently anchored.
    pub fn len(&self) -> usize {
        self.anchored.lock().len()
    }

    /// Whether no digests have been anchored.
    pub fn is_empty(&self) -> bool {
        self.anchored.lock().is_empty()
    }

    fn check_online(&self) -> Result<(), AnchorError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(AnchorError::Unreachable {
                endpoint: IN_MEMORY_ENDPOINT.to_string(),
                reason: "registry is offline".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl AnchorRegistry for InMemoryAnchorRegistry {
    fn is_anchored(&self, digest: &ContentDigest) -> Result<bool, AnchorError> {
        self.check_online()?;
        Ok(self.anchored.lock().contains(digest))
    }

    fn record(&self, digest: &ContentDigest) -> Result<String, AnchorError> {
        self.check_online()?;
        self.anchored.lock().insert(digest.clone());
        Ok(format!("memtx-{}", &digest.to_hex()[..16]))
    }

    fn endpoint(&self) -> &str {
        IN_MEMORY_ENDPOINT
    }
}
