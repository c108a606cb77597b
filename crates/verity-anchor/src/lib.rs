//! # verity-anchor — Ledger Anchoring for Credential Digests
//!
//! Anchors SHA-256 digests of signed credentials on a ledger and answers
//! anchored-status queries. Provides:
//!
//! - **Registry abstraction** ([`AnchorRegistry`]) over ledger backends,
//!   with an in-memory implementation for testing and development.
//! - **EVM adapter** ([`EvmAnchorRegistry`]) speaking raw JSON-RPC to an
//!   anchoring contract, with retry on reads.
//! - **Anchoring client** ([`AnchorClient`]) tying digest computation to
//!   registry operations.
//!
//! The digest anchored for a credential covers the full signed document,
//! proof included, canonicalized through
//! [`CanonicalBytes`](verity_core::CanonicalBytes).

pub mod client;
pub mod config;
pub mod error;
pub mod evm;
pub mod registry;

// Re-export primary types.
pub use client::{credential_digest, AnchorClient, AnchorReceipt, AnchorStatus};
pub use config::{
    AnchorConfig, AnchorConfigError, ContractInterface, SELECTOR_ANCHOR_CREDENTIAL,
    SELECTOR_IS_ANCHORED,
};
pub use error::AnchorError;
pub use evm::EvmAnchorRegistry;
pub use registry::{AnchorRegistry, InMemoryAnchorRegistry, IN_MEMORY_ENDPOINT};
