//! # Identity Newtypes
//!
//! Validated identifier types. A [`Did`] is a distinct type, not a bare
//! string, so a raw claim value cannot be passed where an issuer identity
//! is expected.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// W3C Decentralized Identifier (DID).
///
/// Format: `did:<method>:<method-specific-id>` where the method is
/// lowercase alphanumeric and the method-specific id is non-empty. The
/// method-specific id may carry a `#fragment` suffix, as in
/// verification-method references.
///
/// Reference: <https://www.w3.org/TR/did-core/#did-syntax>
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Did(String);

impl Did {
    /// Create a DID from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDid`] if the string does not
    /// match the `did:method:identifier` format.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    fn validate(s: &str) -> Result<(), ValidationError> {
        let rest = match s.strip_prefix("did:") {
            Some(rest) => rest,
            None => return Err(ValidationError::InvalidDid(s.to_string())),
        };

        let (method, identifier) = match rest.split_once(':') {
            Some(parts) => parts,
            None => return Err(ValidationError::InvalidDid(s.to_string())),
        };

        if method.is_empty()
            || !method
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(ValidationError::InvalidDid(s.to_string()));
        }
        if identifier.is_empty() {
            return Err(ValidationError::InvalidDid(s.to_string()));
        }

        Ok(())
    }

    /// Access the DID string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the DID method (the part between the first and second colons).
    pub fn method(&self) -> &str {
        // Validation guarantees the did:method:id shape.
        let rest = &self.0[4..];
        match rest.split_once(':') {
            Some((method, _)) => method,
            None => rest,
        }
    }

    /// Return the method-specific identifier (everything after
    /// `did:method:`), including any `#fragment`.
    pub fn method_specific_id(&self) -> &str {
        let rest = &self.0[4..];
        match rest.split_once(':') {
            Some((_, id)) => id,
            None => "",
        }
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
