//! # Canonical Serialization
//!
//! This module defines [`CanonicalBytes`], the sole construction path for
//! bytes that are signed or hashed anywhere in Verity.
//!
//! A credential canonicalized one way at issuance and another way at
//! verification fails verification with no diagnostic beyond "signature
//! mismatch", so the byte production rule is centralized here: any function
//! that signs or digests accepts `&CanonicalBytes`, and the only way to
//! produce one is through [`CanonicalBytes::new()`].
//!
//! ## Rules
//!
//! Serialization follows RFC 8785 (JSON Canonicalization Scheme) via
//! `serde_jcs`: object keys sorted lexicographically, compact separators,
//! UTF-8 output with non-ASCII characters unescaped. Before serialization
//! the value tree is walked once to reject floating-point numbers, whose
//! rendering is the one JCS area with cross-implementation edge cases.
//! Credential claims are strings, so nothing legitimate is lost.
//!
//! Timestamp normalization (UTC, `Z` suffix, second precision) happens at
//! the `Serialize` boundary in the [`Timestamp`][crate::Timestamp] type,
//! not in the value tree.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization with float rejection.
///
/// # Invariants
///
/// - The only constructor is [`CanonicalBytes::new()`].
/// - Object keys are sorted lexicographically with compact separators.
/// - No value in the tree is a non-integer number.
/// - The byte sequence is valid UTF-8 and valid JSON.
///
/// The inner `Vec<u8>` is private, so downstream code cannot construct a
/// `CanonicalBytes` from an arbitrary serialization path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// All signing-input and digest computation in the workspace must flow
    /// through this constructor.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::FloatRejected`] if the value
    /// contains a non-integer number, or
    /// [`CanonicalizationError::SerializationFailed`] if JCS serialization
    /// fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes for signing or digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively reject non-integer numbers anywhere in a JSON value tree.
///
/// Everything else passes through: `null`, booleans, strings, and integers
/// are JCS-stable as-is; objects and arrays are recursed. Keys are already
/// strings in `serde_json::Map`.
fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
        Value::Number(n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(())
        }
        Value::Object(map) => {
            for v in map.values() {
                reject_floats(v)?;
            }
            Ok(())
        }
        Value::Array(arr) => {
            for v in arr {
                reject_floats(v)?;
            }
            Ok(())
        }
    }
}
