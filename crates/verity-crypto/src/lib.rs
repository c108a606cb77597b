//! # verity-crypto — Key Material and Signature Primitives
//!
//! Ed25519 key pairs, `did:key` derivation, and detached JWS signing for
//! Verity credentials. This crate owns everything that touches private key
//! bytes; higher layers see only [`CanonicalBytes`][verity_core::CanonicalBytes]
//! in, tokens and verification results out.
//!
//! The issuance entry point is [`issue_keypair()`], which produces a fresh
//! key pair together with the `did:key` identifier and verification-method
//! reference derived from its public half. The verification entry points
//! are [`resolve_verification_method()`] and [`verify_detached()`].

pub mod did;
pub mod ed25519;
pub mod error;
pub mod jws;

pub use did::{
    derive_did, issue_keypair, resolve_verification_method, verification_method, IssuedIdentity,
    ED25519_CODEC,
};
pub use ed25519::{verify, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use error::CryptoError;
pub use jws::{sign_detached, verify_detached};
