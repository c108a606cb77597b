#![deny(missing_docs)]

//! # verity-core — Foundational Types for Verity
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `serde_json`,
//! `serde_jcs`, `thiserror`, `chrono`, and `sha2` from the external
//! ecosystem.
//!
//! ## Design Principles
//!
//! 1. **[`CanonicalBytes`] is the sole path to signing and hashing.** Every
//!    byte sequence destined for an Ed25519 signature or a SHA-256 anchor
//!    digest flows through `CanonicalBytes::new()`, which applies RFC 8785
//!    canonicalization with float rejection. A credential canonicalized two
//!    different ways fails verification with no useful diagnostic, so the
//!    wrong-serialization-path defect class is closed off by construction.
//!
//! 2. **Newtype wrappers for domain primitives.** [`Did`] validates W3C DID
//!    syntax at construction; [`Timestamp`] enforces UTC second precision so
//!    re-canonicalized credentials reproduce their signed bytes.
//!
//! 3. **Structured errors with `thiserror`.** No `Box<dyn Error>`, no
//!    `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, ContentDigest, DigestAlgorithm};
pub use error::{CanonicalizationError, ValidationError};
pub use identity::Did;
pub use temporal::Timestamp;
