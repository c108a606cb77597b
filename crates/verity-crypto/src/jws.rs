//! # Detached JWS
//!
//! Detached JSON Web Signatures over canonical credential payloads.
//!
//! Token shape: `<protected-header>..<signature>` — both segments
//! base64url without padding, with the middle payload segment empty
//! because the payload travels as the credential document itself. The
//! signing input is the encoded header, a dot, and the raw canonical
//! payload bytes (RFC 7797 unencoded payload), reconstructed by the
//! verifier from the document it received.
//!
//! Verification uses the header segment of the received token, not a
//! local constant, so tokens from issuers with a different fixed header
//! still verify as long as the signature matches.

use base64ct::{Base64UrlUnpadded, Encoding};
use ed25519_dalek::Verifier;
use verity_core::CanonicalBytes;

use crate::ed25519::{Ed25519KeyPair, Ed25519Signature};
use crate::error::CryptoError;

/// Protected header attached to every issued token: EdDSA over an
/// unencoded detached payload.
const PROTECTED_HEADER: &str = r#"{"alg":"EdDSA","b64":false,"crit":["b64"]}"#;

/// Sign a canonical payload, producing a detached
/// `<header>..<signature>` token.
pub fn sign_detached(payload: &CanonicalBytes, keypair: &Ed25519KeyPair) -> String {
    let header = Base64UrlUnpadded::encode_string(PROTECTED_HEADER.as_bytes());
    let signature = keypair.sign_raw(&signing_input(&header, payload));
    let encoded_signature = Base64UrlUnpadded::encode_string(signature.as_bytes());
    format!("{header}..{encoded_signature}")
}

/// Verify a detached token against a canonical payload and verifying key.
///
/// # Errors
///
/// [`CryptoError::MalformedToken`] if the token does not split into
/// non-empty header and signature segments or the signature segment does
/// not decode to 64 bytes; [`CryptoError::VerificationFailed`] if the
/// signature does not match the reconstructed signing input.
pub fn verify_detached(
    payload: &CanonicalBytes,
    token: &str,
    verifying_key: &ed25519_dalek::VerifyingKey,
) -> Result<(), CryptoError> {
    let (header, signature_segment) = split_token(token)?;
    let signature = decode_signature(signature_segment)?;
    let input = signing_input(header, payload);
    let sig = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
    verifying_key
        .verify(&input, &sig)
        .map_err(|e| CryptoError::VerificationFailed(format!("detached JWS: {e}")))
}

fn signing_input(encoded_header: &str, payload: &CanonicalBytes) -> Vec<u8> {
    let mut input = Vec::with_capacity(encoded_header.len() + 1 + payload.len());
    input.extend_from_slice(encoded_header.as_bytes());
    input.push(b'.');
    input.extend_from_slice(payload.as_bytes());
    input
}

fn split_token(token: &str) -> Result<(&str, &str), CryptoError> {
    let (header, signature) = token.split_once("..").ok_or_else(|| {
        CryptoError::MalformedToken("expected <header>..<signature>".to_string())
    })?;
    if header.is_empty() || signature.is_empty() {
        return Err(CryptoError::MalformedToken(
            "empty header or signature segment".to_string(),
        ));
    }
    Ok((header, signature))
}

fn decode_signature(segment: &str) -> Result<Ed25519Signature, CryptoError> {
    // Some producers pad the final segment; strip before decoding.
    let trimmed = segment.trim_end_matches('=');
    let bytes = Base64UrlUnpadded::decode_vec(trimmed)
        .map_err(|e| CryptoError::MalformedToken(format!("signature segment: {e}")))?;
    let arr: [u8; 64] = bytes.try_into().map_err(|v: Vec<u8>| {
        CryptoError::MalformedToken(format!("signature must be 64 bytes, got {}", v.len()))
    })?;
    Ok(Ed25519Signature::from_bytes(arr))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> CanonicalBytes {
        CanonicalBytes::new(&serde_json::json!({
            "issuer": "did:key:abc",
            "credentialSubject": {"touristInfo": {"name": "Priya Sharma"}}
        }))
        .unwrap()
    }

    #[test]
    fn sign_verify_roundtrip() {
        let kp = Ed25519KeyPair::generate();
        let token = sign_detached(&payload(), &kp);
        let vk = kp.public_key().to_verifying_key().unwrap();
        verify_detached(&payload(), &token, &vk).expect("token should verify");
    }

    #[test]
    fn token_has_detached_shape() {
        let kp = Ed25519KeyPair::generate();
        let token = sign_detached(&payload(), &kp);
        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[1].is_empty(), "payload segment must be empty");
        assert!(!token.contains('='), "segments are unpadded");

        let header = Base64UrlUnpadded::decode_vec(parts[0]).unwrap();
        let header: serde_json::Value = serde_json::from_slice(&header).unwrap();
        assert_eq!(header["alg"], "EdDSA");
        assert_eq!(header["b64"], false);
    }

    #[test]
    fn verify_rejects_different_payload() {
        let kp = Ed25519KeyPair::generate();
        let token = sign_detached(&payload(), &kp);
        let other = CanonicalBytes::new(&serde_json::json!({"issuer": "did:key:other"})).unwrap();
        let vk = kp.public_key().to_verifying_key().unwrap();
        assert!(verify_detached(&other, &token, &vk).is_err());
    }

    #[test]
    fn verify_rejects_wrong_key() {
        let kp = Ed25519KeyPair::generate();
        let token = sign_detached(&payload(), &kp);
        let vk = Ed25519KeyPair::generate()
            .public_key()
            .to_verifying_key()
            .unwrap();
        assert!(verify_detached(&payload(), &token, &vk).is_err());
    }

    #[test]
    fn verify_accepts_padded_signature_segment() {
        let kp = Ed25519KeyPair::generate();
        let token = sign_detached(&payload(), &kp);
        let padded = format!("{token}==");
        let vk = kp.public_key().to_verifying_key().unwrap();
        verify_detached(&payload(), &padded, &vk).expect("padding should be tolerated");
    }

    #[test]
    fn verify_uses_received_header_segment() {
        // A token whose header differs from this crate's constant still
        // verifies, because the signing input is rebuilt from the token.
        let kp = Ed25519KeyPair::generate();
        let header = Base64UrlUnpadded::encode_string(br#"{"alg":"EdDSA"}"#);
        let signature = kp.sign_raw(&signing_input(&header, &payload()));
        let token = format!(
            "{header}..{}",
            Base64UrlUnpadded::encode_string(signature.as_bytes())
        );

        let vk = kp.public_key().to_verifying_key().unwrap();
        verify_detached(&payload(), &token, &vk).expect("foreign header should verify");
    }

    #[test]
    fn malformed_tokens_rejected() {
        let kp = Ed25519KeyPair::generate();
        let vk = kp.public_key().to_verifying_key().unwrap();

        for token in [
            "",
            "nodots",
            "single.dot",
            "..",
            "header..",
            "..signature",
            "header..!!!not-base64!!!",
            "header..c2hvcnQ", // decodes to fewer than 64 bytes
        ] {
            let result = verify_detached(&payload(), token, &vk);
            assert!(result.is_err(), "token {token:?} should be rejected");
            assert!(
                matches!(result.unwrap_err(), CryptoError::MalformedToken(_)),
                "token {token:?} should be malformed, not a signature mismatch"
            );
        }
    }

    #[test]
    fn tampered_signature_fails_verification() {
        let kp = Ed25519KeyPair::generate();
        let token = sign_detached(&payload(), &kp);
        let (header, _) = token.split_once("..").unwrap();
        let tampered = format!(
            "{header}..{}",
            Base64UrlUnpadded::encode_string(&[0u8; 64])
        );
        let vk = kp.public_key().to_verifying_key().unwrap();
        assert!(matches!(
            verify_detached(&payload(), &tampered, &vk),
            Err(CryptoError::VerificationFailed(_))
        ));
    }
}
