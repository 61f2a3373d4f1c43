//! Integration test: shared-verifier behavior under concurrency and
//! with failing collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use credo_canon::{canonicalize, ContextMap, DigestAlgorithm};
use credo_core::codes;
use credo_crypto::suites::encode_multibase_b58;
use credo_crypto::KeyPair;
use credo_resolver::{FetchError, KeyResolver, MethodFetcher};
use credo_verifier::{LdpVerifier, VerifyOptions};
use serde_json::{json, Value};

const VM: &str = "did:example:registry#key-1";

fn signed_credential(kp: &KeyPair) -> Value {
    let mut credential = json!({
        "@context": ["https://www.w3.org/2018/credentials/v1"],
        "type": ["VerifiableCredential"],
        "issuer": "did:example:registry",
        "issuanceDate": "2024-03-01T00:00:00Z",
        "credentialSubject": {"id": "did:example:holder"},
    });
    let canonical = canonicalize(&credential, &ContextMap::credentials_v1()).unwrap();
    let signature = kp.sign(&DigestAlgorithm::Sha256.digest(&canonical));
    credential.as_object_mut().unwrap().insert(
        "proof".into(),
        json!({
            "type": "Ed25519Signature2020",
            "verificationMethod": VM,
            "proofValue": encode_multibase_b58(&signature),
        }),
    );
    credential
}

fn method_document(kp: &KeyPair) -> Value {
    let mut prefixed = vec![0xed, 0x01];
    prefixed.extend_from_slice(&kp.public_key_bytes());
    json!({"publicKeyMultibase": encode_multibase_b58(&prefixed)})
}

/// Serves one verification method and counts backend hits.
struct CountingFetcher {
    document: Value,
    fetches: AtomicUsize,
}

#[async_trait]
impl MethodFetcher for CountingFetcher {
    async fn fetch(&self, vm: &str) -> Result<Value, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if vm == VM {
            Ok(self.document.clone())
        } else {
            Err(FetchError::NotFound(vm.to_string()))
        }
    }
}

#[tokio::test]
async fn thirty_two_tasks_share_one_verifier() {
    let kp = KeyPair::generate();
    let credential = signed_credential(&kp);
    let fetcher = Arc::new(CountingFetcher {
        document: method_document(&kp),
        fetches: AtomicUsize::new(0),
    });
    let resolver = Arc::new(KeyResolver::new(
        Arc::clone(&fetcher) as Arc<dyn MethodFetcher>
    ));
    let verifier = Arc::new(LdpVerifier::new(resolver));

    // Warm the key cache so the concurrent burst below never touches
    // the backend.
    assert!(verifier.verify_json(&credential).await.verification_status);
    assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 1);

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let verifier = Arc::clone(&verifier);
            let credential = credential.clone();
            tokio::spawn(async move { verifier.verify_json(&credential).await })
        })
        .collect();
    for handle in handles {
        let result = handle.await.unwrap();
        assert!(result.verification_status);
        assert!(result.verification_error_code.is_empty());
    }
    assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unavailable_backend_is_reported_as_collaborator_failure() {
    struct DownFetcher;

    #[async_trait]
    impl MethodFetcher for DownFetcher {
        async fn fetch(&self, _vm: &str) -> Result<Value, FetchError> {
            Err(FetchError::Unavailable("connection refused".into()))
        }
    }

    let kp = KeyPair::generate();
    let credential = signed_credential(&kp);
    let verifier = LdpVerifier::new(Arc::new(KeyResolver::new(Arc::new(DownFetcher))));
    let result = verifier.verify_json(&credential).await;
    assert!(!result.verification_status);
    assert_eq!(
        result.verification_error_code,
        codes::COLLABORATOR_UNAVAILABLE
    );
}

#[tokio::test]
async fn hung_backend_respects_the_caller_deadline() {
    struct HungFetcher;

    #[async_trait]
    impl MethodFetcher for HungFetcher {
        async fn fetch(&self, _vm: &str) -> Result<Value, FetchError> {
            tokio::time::sleep(Duration::from_secs(300)).await;
            Err(FetchError::Unavailable("unreachable".into()))
        }
    }

    let kp = KeyPair::generate();
    let credential = signed_credential(&kp);
    let verifier = LdpVerifier::new(Arc::new(KeyResolver::new(Arc::new(HungFetcher))));
    let result = verifier
        .verify_with_options(
            &credential,
            &VerifyOptions::with_timeout(Duration::from_millis(50)),
        )
        .await;
    assert_eq!(result.verification_error_code, codes::TIMEOUT);
}
