//! Trust states and the reduction from verification axes.

use serde::{Deserialize, Serialize};

/// The trust standing of a credential after both verification axes have
/// been evaluated.
///
/// An invalid signature dominates: anchoring attests to a document, and
/// a document whose signature fails is untrustworthy no matter what the
/// ledger says about its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustState {
    /// Signature valid and digest anchored on the ledger.
    FullyVerified,
    /// Signature valid but the digest is not on the ledger.
    ValidButUnanchored,
    /// Signature invalid or absent.
    Invalid,
}

impl TrustState {
    /// Stable identifier string, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullyVerified => "fully_verified",
            Self::ValidButUnanchored => "valid_but_unanchored",
            Self::Invalid => "invalid",
        }
    }
}

impl std::fmt::Display for TrustState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reduce the two verification axes to a trust state.
pub fn reduce(signature_valid: bool, anchored: bool) -> TrustState {
    match (signature_valid, anchored) {
        (true, true) => TrustState::FullyVerified,
        (true, false) => TrustState::ValidButUnanchored,
        (false, _) => TrustState::Invalid,
    }
}
