//! # verity-vc — Verifiable Traveler Credentials
//!
//! Implements the credential envelope for the Verity identity stack,
//! following the W3C Verifiable Credentials data model. Provides:
//!
//! - **Credential structure** ([`Credential`]) with typed envelope,
//!   traveler claims, and an optional detached-JWS proof.
//! - **Ed25519 proof generation and verification** using the
//!   cryptographic primitives from `verity-crypto`.
//! - **Fluent construction** via [`CredentialBuilder`].
//!
//! ## Security Invariants
//!
//! - All proof computation uses [`CanonicalBytes`](verity_core::CanonicalBytes)
//!   for payload canonicalization — never raw `serde_json::to_vec()`.
//! - The envelope and proof are rigid (unknown fields fail the parse);
//!   only the claims mapping is open.
//! - Signature verification is self-contained: the verifying key is
//!   recovered from the proof's own `did:key` verification method.

pub mod builder;
pub mod credential;
pub mod proof;

// Re-export primary types.
pub use builder::CredentialBuilder;
pub use credential::{Credential, CredentialSubject, SignatureFault, VcError};
pub use proof::{Proof, ProofType};

/// The W3C base credential type, always first in the `type` array.
pub const TYPE_VERIFIABLE_CREDENTIAL: &str = "VerifiableCredential";

/// The domain credential type for traveler profiles.
pub const TYPE_TOURIST_CREDENTIAL: &str = "TouristCredential";
