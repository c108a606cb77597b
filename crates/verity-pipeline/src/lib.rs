//! # verity-pipeline — Credential Verification Pipeline
//!
//! Evaluates a credential along two independent axes and reduces them to
//! a single [`TrustState`]:
//!
//! 1. **Signature** — does the attached proof verify against the
//!    document and the key in its own verification method?
//! 2. **Anchoring** — is the document's digest recorded on the ledger?
//!
//! The reduction is strict: `FullyVerified` requires both, a valid
//! signature alone is `ValidButUnanchored`, and a failed signature is
//! `Invalid` regardless of anchoring. Inputs that cannot be parsed and
//! ledgers that cannot be reached are errors, not verdicts.

pub mod pipeline;
pub mod state;

// Re-export primary types.
pub use pipeline::{PipelineError, VerificationPipeline, VerificationReport};
pub use state::{reduce, TrustState};
