//! Anchoring error types.
//!
//! The split between [`AnchorError::Unreachable`] and
//! [`AnchorError::Rejected`] matters to callers: an unreachable ledger
//! means the anchor status could not be determined and the caller must
//! not treat the credential as unanchored, while a rejection is a
//! definitive refusal from the ledger.

use thiserror::Error;
use verity_core::CanonicalizationError;

/// Errors from anchor registry operations.
#[derive(Error, Debug)]
pub enum AnchorError {
    /// The ledger endpoint could not be reached or gave no usable answer.
    #[error("anchor registry unreachable at {endpoint}: {reason}")]
    Unreachable {
        /// The endpoint that failed to respond.
        endpoint: String,
        /// Transport-level detail (timeout, connection refused, bad response).
        reason: String,
    },

    /// The ledger was reached but refused the anchoring operation.
    #[error("anchoring rejected: {reason}")]
    Rejected {
        /// The ledger's refusal, or the local precondition that failed.
        reason: String,
    },

    /// The credential could not be canonicalized for hashing.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}
