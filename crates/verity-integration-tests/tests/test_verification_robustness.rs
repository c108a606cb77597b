//! # Verification Robustness
//!
//! Adversarial and fuzz coverage for the verification surface. The
//! contract under test: for any input whatsoever, verification either
//! returns a verdict, returns a typed error, or reports a false
//! signature axis. It never panics, and no corruption is ever promoted
//! to a valid signature.

use proptest::prelude::*;

use verity_anchor::InMemoryAnchorRegistry;
use verity_crypto::issue_keypair;
use verity_pipeline::VerificationPipeline;
use verity_vc::{Credential, CredentialBuilder};

fn signed_credential() -> Credential {
    let identity = issue_keypair();
    let mut credential = CredentialBuilder::new(identity.did.clone())
        .claim("name", "Priya Sharma")
        .claim("nationality", "British")
        .claim("passportNumber", "G987654321")
        .build()
        .unwrap();
    credential
        .sign(&identity.keypair, identity.verification_method.clone())
        .unwrap();
    credential
}

// ---------------------------------------------------------------------------
// Targeted corruptions stay on the false signature axis
// ---------------------------------------------------------------------------

#[test]
fn corrupted_jws_variants_fail_closed() {
    let intact = signed_credential();
    let jws = intact.proof.as_ref().unwrap().jws.clone();

    let mut flipped_char = jws.clone();
    let last = flipped_char.pop().unwrap();
    flipped_char.push(if last == 'A' { 'B' } else { 'A' });

    let corruptions = [
        String::new(),
        "no-dots-at-all".to_string(),
        jws.replace("..", "."),
        jws[..jws.len() / 2].to_string(),
        format!("{jws}!!!"),
        flipped_char,
    ];

    for corrupt in corruptions {
        let mut credential = intact.clone();
        credential.proof.as_mut().unwrap().jws = corrupt.clone();
        assert!(
            !credential.verify_signature(),
            "corruption {corrupt:?} must not verify"
        );
    }
}

#[test]
fn trailing_padding_on_signature_segment_is_tolerated() {
    let mut credential = signed_credential();
    let jws = &mut credential.proof.as_mut().unwrap().jws;
    jws.push('=');
    assert!(
        credential.verify_signature(),
        "base64url padding is cosmetic, not a corruption"
    );
}

#[test]
fn foreign_did_methods_fail_closed() {
    let intact = signed_credential();
    let bad_references = [
        "did:web:example.com#key-1".to_string(),
        "did:key:nofragment".to_string(),
        "did:key:#".to_string(),
        "not-a-did".to_string(),
    ];

    for reference in bad_references {
        let mut credential = intact.clone();
        credential.proof.as_mut().unwrap().verification_method = reference.clone();
        assert!(
            !credential.verify_signature(),
            "reference {reference:?} must not verify"
        );
    }
}

#[test]
fn wrong_multicodec_prefix_fails_closed() {
    let identity = issue_keypair();
    let mut credential = CredentialBuilder::new(identity.did.clone())
        .claim("name", "Priya Sharma")
        .build()
        .unwrap();
    credential
        .sign(&identity.keypair, identity.verification_method.clone())
        .unwrap();
    assert!(credential.verify_signature());

    // Same key bytes, wrong codec prefix (0xec is the private-key code).
    let mut prefixed = vec![0xec, 0x01];
    prefixed.extend_from_slice(identity.keypair.public_key().as_bytes());
    let encoded = bs58::encode(&prefixed).into_string();
    credential.proof.as_mut().unwrap().verification_method =
        format!("did:key:{encoded}#{encoded}");

    assert!(!credential.verify_signature());
}

#[test]
fn truncated_key_material_fails_closed() {
    let mut credential = signed_credential();
    let reference = credential
        .proof
        .as_ref()
        .unwrap()
        .verification_method
        .clone();
    let (did_part, fragment) = reference.split_once('#').unwrap();
    let shortened = &fragment[..fragment.len() - 4];
    credential.proof.as_mut().unwrap().verification_method =
        format!("{did_part}#{shortened}");
    assert!(!credential.verify_signature());
}

// ---------------------------------------------------------------------------
// Fuzzing: no input panics the pipeline
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn verify_str_never_panics_on_arbitrary_input(input in any::<String>()) {
        let pipeline = VerificationPipeline::new(InMemoryAnchorRegistry::new());
        let _ = pipeline.verify_str(&input);
    }

    #[test]
    fn verify_str_never_panics_on_corrupted_wire(position in any::<prop::sample::Index>(), byte in any::<u8>()) {
        let credential = signed_credential();
        let wire = serde_json::to_string(&credential).unwrap();

        let mut bytes = wire.into_bytes();
        let at = position.index(bytes.len());
        bytes[at] = byte;
        let corrupted = String::from_utf8_lossy(&bytes).into_owned();

        let pipeline = VerificationPipeline::new(InMemoryAnchorRegistry::new());
        let _ = pipeline.verify_str(&corrupted);
    }

    #[test]
    fn arbitrary_json_objects_never_verify(claims in prop::collection::btree_map("[a-z]{1,8}", "[ -~]{0,16}", 0..5)) {
        // Random claim maps with no proof parse fine but always land on
        // the false axis.
        let identity = issue_keypair();
        let value = serde_json::json!({
            "issuer": identity.did,
            "type": ["VerifiableCredential", "TouristCredential"],
            "issuanceDate": "2026-08-23T10:00:00Z",
            "credentialSubject": {"touristInfo": claims},
        });
        let credential = Credential::from_json(&value.to_string()).unwrap();
        prop_assert!(!credential.verify_signature());
    }
}
