//! Fluent construction of unsigned credentials.

use std::collections::BTreeMap;

use verity_core::{Did, Timestamp};

use crate::credential::{Credential, CredentialSubject, VcError};
use crate::{TYPE_TOURIST_CREDENTIAL, TYPE_VERIFIABLE_CREDENTIAL};

/// Builder for an unsigned [`Credential`].
///
/// Claims accumulate into the `touristInfo` mapping; the issuance date
/// defaults to the current UTC second. The built credential carries no
/// proof until [`Credential::sign()`] is called.
///
/// # Example
///
/// ```
/// use verity_crypto::issue_keypair;
/// use verity_vc::CredentialBuilder;
///
/// let identity = issue_keypair();
/// let vc = CredentialBuilder::new(identity.did.clone())
///     .claim("name", "Priya Sharma")
///     .claim("nationality", "British")
///     .build()
///     .expect("claims are non-empty");
///
/// assert!(vc.proof.is_none());
/// assert_eq!(vc.credential_type[0], "VerifiableCredential");
/// ```
#[derive(Debug, Clone)]
pub struct CredentialBuilder {
    issuer: Did,
    issuance_date: Option<Timestamp>,
    claims: BTreeMap<String, String>,
}

impl CredentialBuilder {
    /// Create a builder for a credential issued by the given DID.
    pub fn new(issuer: Did) -> Self {
        Self {
            issuer,
            issuance_date: None,
            claims: BTreeMap::new(),
        }
    }

    /// Add a single claim. Re-adding a key overwrites the earlier value.
    pub fn claim(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.claims.insert(key.into(), value.into());
        self
    }

    /// Add every claim from an iterator of key/value pairs.
    pub fn claims<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in pairs {
            self.claims.insert(k.into(), v.into());
        }
        self
    }

    /// Pin the issuance date instead of using the current time.
    pub fn issued_at(mut self, at: Timestamp) -> Self {
        self.issuance_date = Some(at);
        self
    }

    /// Build the unsigned credential.
    ///
    /// # Errors
    ///
    /// Returns [`VcError::EmptyClaims`] if no claims were added.
    pub fn build(self) -> Result<Credential, VcError> {
        if self.claims.is_empty() {
            return Err(VcError::EmptyClaims);
        }
        Ok(Credential {
            issuer: self.issuer,
            credential_type: vec![
                TYPE_VERIFIABLE_CREDENTIAL.to_string(),
                TYPE_TOURIST_CREDENTIAL.to_string(),
            ],
            issuance_date: self.issuance_date.unwrap_or_else(Timestamp::now),
            credential_subject: CredentialSubject {
                tourist_info: self.claims,
            },
            proof: None,
        })
    }
}
