//! # Cryptographic Error Types

use thiserror::Error;

/// Errors from key handling, signature verification, and token parsing.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Key material could not be parsed or constructed.
    #[error("key error: {0}")]
    KeyError(String),

    /// Cryptographic signature verification failed.
    #[error("verification failed: {0}")]
    VerificationFailed(String),

    /// A verification-method reference could not be resolved to a key.
    #[error("invalid verification method: {0}")]
    InvalidVerificationMethod(String),

    /// A detached JWS token is structurally malformed.
    #[error("malformed JWS token: {0}")]
    MalformedToken(String),
}
