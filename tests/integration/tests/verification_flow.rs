//! Integration test: full verification flow across crates.
//!
//! Signs credentials with credo-crypto key pairs, serves the issuer
//! keys through credo-resolver, and drives credo-verifier end to end.

use std::sync::Arc;

use credo_canon::{canonicalize, ContextMap, DigestAlgorithm};
use credo_core::{codes, VerificationResult};
use credo_crypto::suites::encode_multibase_b58;
use credo_crypto::{DetachedJws, EcdsaKeyPair, KeyPair};
use credo_resolver::{KeyResolver, MethodFetcher, StaticMethodFetcher};
use credo_verifier::LdpVerifier;
use serde_json::{json, Value};

const VM: &str = "did:example:university#key-1";

fn unsigned_credential() -> Value {
    json!({
        "@context": ["https://www.w3.org/2018/credentials/v1"],
        "id": "urn:uuid:3b4f2a10-88e1-4e25-9f61-1f7c2c5a9b7d",
        "type": ["VerifiableCredential"],
        "issuer": "did:example:university",
        "issuanceDate": "2024-01-01T00:00:00Z",
        "credentialSubject": {"id": "did:example:alice"},
    })
}

fn digest_of(credential: &Value) -> Vec<u8> {
    let canonical = canonicalize(credential, &ContextMap::credentials_v1()).unwrap();
    DigestAlgorithm::Sha256.digest(&canonical)
}

fn attach_proof(mut credential: Value, proof: Value) -> Value {
    credential.as_object_mut().unwrap().insert("proof".into(), proof);
    credential
}

fn sign_ed25519_2020(kp: &KeyPair, credential: Value) -> Value {
    let signature = kp.sign(&digest_of(&credential));
    attach_proof(
        credential,
        json!({
            "type": "Ed25519Signature2020",
            "created": "2024-01-02T00:00:00Z",
            "verificationMethod": VM,
            "proofPurpose": "assertionMethod",
            "proofValue": encode_multibase_b58(&signature),
        }),
    )
}

fn sign_ed25519_2018(kp: &KeyPair, credential: Value) -> Value {
    let jws = DetachedJws::create("EdDSA", &digest_of(&credential), |input| {
        kp.sign(input).to_vec()
    });
    attach_proof(
        credential,
        json!({
            "type": "Ed25519Signature2018",
            "verificationMethod": VM,
            "proofPurpose": "assertionMethod",
            "jws": jws,
        }),
    )
}

fn sign_es256k(kp: &EcdsaKeyPair, credential: Value) -> Value {
    let jws = DetachedJws::create("ES256K", &digest_of(&credential), |input| {
        kp.sign(input).to_vec()
    });
    attach_proof(
        credential,
        json!({
            "type": "EcdsaSecp256k1Signature2019",
            "verificationMethod": VM,
            "proofPurpose": "assertionMethod",
            "jws": jws,
        }),
    )
}

fn ed25519_method_document(kp: &KeyPair) -> Value {
    let mut prefixed = vec![0xed, 0x01];
    prefixed.extend_from_slice(&kp.public_key_bytes());
    json!({"publicKeyMultibase": encode_multibase_b58(&prefixed)})
}

fn verifier_with_method(document: Value) -> (LdpVerifier, Arc<StaticMethodFetcher>) {
    let fetcher = Arc::new(StaticMethodFetcher::new());
    fetcher.insert(VM, document);
    let resolver = Arc::new(KeyResolver::new(
        Arc::clone(&fetcher) as Arc<dyn MethodFetcher>
    ));
    (LdpVerifier::new(resolver), fetcher)
}

// =========================================================================
// Happy paths, one per built-in suite
// =========================================================================

#[tokio::test]
async fn ed25519_2020_credential_verifies() {
    let kp = KeyPair::generate();
    let credential = sign_ed25519_2020(&kp, unsigned_credential());
    let (verifier, _) = verifier_with_method(ed25519_method_document(&kp));
    assert_eq!(
        verifier.verify_json(&credential).await,
        VerificationResult::success()
    );
}

#[tokio::test]
async fn ed25519_2018_jws_credential_verifies() {
    let kp = KeyPair::generate();
    let credential = sign_ed25519_2018(&kp, unsigned_credential());
    let (verifier, _) = verifier_with_method(ed25519_method_document(&kp));
    assert_eq!(
        verifier.verify_json(&credential).await,
        VerificationResult::success()
    );
}

#[tokio::test]
async fn es256k_credential_verifies() {
    let kp = EcdsaKeyPair::generate();
    let credential = sign_es256k(&kp, unsigned_credential());
    let document = json!({"publicKeyHex": hex::encode(kp.public_key_bytes())});
    let (verifier, _) = verifier_with_method(document);
    assert_eq!(
        verifier.verify_json(&credential).await,
        VerificationResult::success()
    );
}

#[tokio::test]
async fn serialized_result_uses_external_field_names() {
    let kp = KeyPair::generate();
    let credential = sign_ed25519_2020(&kp, unsigned_credential());
    let (verifier, _) = verifier_with_method(ed25519_method_document(&kp));
    let result = verifier.verify_json(&credential).await;
    let serialized = serde_json::to_value(&result).unwrap();
    assert_eq!(serialized["verificationStatus"], true);
    assert_eq!(serialized["verificationMessage"], "");
    assert_eq!(serialized["verificationErrorCode"], "");
}

// =========================================================================
// Tampering and malformed signatures
// =========================================================================

#[tokio::test]
async fn tampered_subject_is_a_mismatch_not_an_error() {
    let kp = KeyPair::generate();
    let mut credential = sign_ed25519_2020(&kp, unsigned_credential());
    credential["credentialSubject"]["id"] = json!("did:example:mallory");
    let (verifier, _) = verifier_with_method(ed25519_method_document(&kp));
    let result = verifier.verify_json(&credential).await;
    assert!(!result.verification_status);
    assert_eq!(result.verification_error_code, codes::SIGNATURE_MISMATCH);
}

#[tokio::test]
async fn truncated_proof_value_is_a_mismatch() {
    let kp = KeyPair::generate();
    let signature = kp.sign(&digest_of(&unsigned_credential()));
    let credential = attach_proof(
        unsigned_credential(),
        json!({
            "type": "Ed25519Signature2020",
            "verificationMethod": VM,
            "proofValue": encode_multibase_b58(&signature[..48]),
        }),
    );
    let (verifier, _) = verifier_with_method(ed25519_method_document(&kp));
    let result = verifier.verify_json(&credential).await;
    assert_eq!(result.verification_error_code, codes::SIGNATURE_MISMATCH);
}

#[tokio::test]
async fn wrong_multibase_prefix_is_an_encoding_error() {
    let kp = KeyPair::generate();
    let credential = attach_proof(
        unsigned_credential(),
        json!({
            "type": "Ed25519Signature2020",
            "verificationMethod": VM,
            "proofValue": "uQmFkUHJlZml4",
        }),
    );
    let (verifier, _) = verifier_with_method(ed25519_method_document(&kp));
    let result = verifier.verify_json(&credential).await;
    assert_eq!(
        result.verification_error_code,
        codes::INVALID_SIGNATURE_ENCODING
    );
}

#[tokio::test]
async fn credential_without_proof_is_malformed() {
    let kp = KeyPair::generate();
    let (verifier, _) = verifier_with_method(ed25519_method_document(&kp));
    let result = verifier.verify_json(&unsigned_credential()).await;
    assert_eq!(result.verification_error_code, codes::MALFORMED_CREDENTIAL);
}

#[tokio::test]
async fn two_proofs_are_rejected() {
    let kp = KeyPair::generate();
    let signed = sign_ed25519_2020(&kp, unsigned_credential());
    let proof = signed["proof"].clone();
    let mut credential = signed;
    credential["proof"] = json!([proof.clone(), proof]);
    let (verifier, _) = verifier_with_method(ed25519_method_document(&kp));
    let result = verifier.verify_json(&credential).await;
    assert_eq!(result.verification_error_code, codes::MALFORMED_CREDENTIAL);
}

// =========================================================================
// Determinism and key lifecycle
// =========================================================================

#[tokio::test]
async fn verification_is_idempotent() {
    let kp = KeyPair::generate();
    let credential = sign_ed25519_2020(&kp, unsigned_credential());
    let (verifier, _) = verifier_with_method(ed25519_method_document(&kp));
    let first = verifier.verify_json(&credential).await;
    let second = verifier.verify_json(&credential).await;
    assert_eq!(first, second);
    assert!(first.verification_status);
}

#[tokio::test]
async fn field_order_does_not_affect_the_signature() {
    let kp = KeyPair::generate();
    let credential = sign_ed25519_2020(&kp, unsigned_credential());

    // The same members serialized in a different order.
    let reordered: Value = serde_json::from_str(
        &serde_json::to_string(&json!({
            "credentialSubject": credential["credentialSubject"],
            "issuanceDate": credential["issuanceDate"],
            "type": credential["type"],
            "proof": credential["proof"],
            "issuer": credential["issuer"],
            "id": credential["id"],
            "@context": credential["@context"],
        }))
        .unwrap(),
    )
    .unwrap();

    let (verifier, _) = verifier_with_method(ed25519_method_document(&kp));
    assert!(verifier.verify_json(&reordered).await.verification_status);
}

#[tokio::test]
async fn rotated_key_needs_cache_invalidation() {
    let kp = KeyPair::generate();
    let credential = sign_ed25519_2020(&kp, unsigned_credential());

    let fetcher = Arc::new(StaticMethodFetcher::new());
    let rotated = KeyPair::generate();
    fetcher.insert(VM, ed25519_method_document(&rotated));
    let resolver = Arc::new(KeyResolver::new(
        Arc::clone(&fetcher) as Arc<dyn MethodFetcher>
    ));
    let verifier = LdpVerifier::new(Arc::clone(&resolver));

    // The served key does not match the signer.
    let result = verifier.verify_json(&credential).await;
    assert_eq!(result.verification_error_code, codes::SIGNATURE_MISMATCH);

    // Backend switches to the signing key; the stale entry must be
    // dropped before the change is visible.
    fetcher.insert(VM, ed25519_method_document(&kp));
    let stale = verifier.verify_json(&credential).await;
    assert_eq!(stale.verification_error_code, codes::SIGNATURE_MISMATCH);

    resolver.invalidate(VM);
    assert!(verifier.verify_json(&credential).await.verification_status);
}

#[tokio::test]
async fn expired_credential_reports_expiry_on_success() {
    let kp = KeyPair::generate();
    let mut unsigned = unsigned_credential();
    unsigned["expirationDate"] = json!("2025-01-01T00:00:00Z");
    let credential = sign_ed25519_2020(&kp, unsigned);
    let (verifier, _) = verifier_with_method(ed25519_method_document(&kp));
    let result = verifier.verify_json(&credential).await;
    assert!(result.verification_status);
    assert_eq!(result.verification_error_code, codes::VC_EXPIRED);
    assert_eq!(result.verification_message, "VC is expired");
}
