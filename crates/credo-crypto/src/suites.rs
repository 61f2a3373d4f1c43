use credo_core::Proof;

use crate::error::CryptoError;
use crate::jws::DetachedJws;
use crate::keys::{KeyAlgorithm, PublicKeyMaterial};

/// A signature verification strategy for one suite.
///
/// `verify` returns `Ok(false)` for a cryptographically invalid
/// signature; it errors only on malformed input: a signature container
/// that does not decode, or key material on the wrong curve.
pub trait SignatureSuite: Send + Sync {
    /// The proof `type` value this suite handles.
    fn suite_id(&self) -> &'static str;

    /// The key algorithm this suite requires.
    fn key_algorithm(&self) -> KeyAlgorithm;

    /// Check the proof's signature over the verification digest.
    fn verify(
        &self,
        digest: &[u8],
        proof: &Proof,
        key: &PublicKeyMaterial,
    ) -> Result<bool, CryptoError>;
}

impl std::fmt::Debug for dyn SignatureSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureSuite")
            .field("suite_id", &self.suite_id())
            .finish()
    }
}

/// Encode signature bytes as a multibase base58btc string (`z` prefix).
pub fn encode_multibase_b58(bytes: &[u8]) -> String {
    format!("z{}", bs58::encode(bytes).into_string())
}

/// Decode a multibase base58btc string.
fn decode_multibase_b58(value: &str) -> Result<Vec<u8>, CryptoError> {
    let rest = value.strip_prefix('z').ok_or_else(|| {
        CryptoError::InvalidSignatureEncoding(format!(
            "proofValue must be multibase base58btc (got prefix {:?})",
            value.chars().next()
        ))
    })?;
    bs58::decode(rest)
        .into_vec()
        .map_err(|e| CryptoError::InvalidSignatureEncoding(format!("base58: {e}")))
}

fn check_key_algorithm(
    suite: &'static str,
    expected: KeyAlgorithm,
    key: &PublicKeyMaterial,
) -> Result<(), CryptoError> {
    if key.algorithm != expected {
        return Err(CryptoError::WrongCurveKey {
            suite,
            expected,
            actual: key.algorithm,
        });
    }
    Ok(())
}

fn verify_ed25519(
    message: &[u8],
    signature: &[u8],
    key: &PublicKeyMaterial,
) -> Result<bool, CryptoError> {
    use ed25519_dalek::Verifier;

    // Wrong-length signature bytes cannot match any signature over the
    // digest; report mismatch rather than a pipeline error.
    let Ok(sig_bytes) = <[u8; 64]>::try_from(signature) else {
        return Ok(false);
    };
    let key_bytes: [u8; 32] = key.bytes.as_slice().try_into().map_err(|_| {
        CryptoError::InvalidKeyMaterial(format!("Ed25519 key must be 32 bytes, got {}", key.bytes.len()))
    })?;
    let verifying_key = ed25519_dalek::VerifyingKey::from_bytes(&key_bytes)
        .map_err(|e| CryptoError::InvalidKeyMaterial(format!("Ed25519 point: {e}")))?;

    let signature = ed25519_dalek::Signature::from_bytes(&sig_bytes);
    Ok(verifying_key.verify(message, &signature).is_ok())
}

/// Ed25519 over the digest, signature carried as multibase base58btc in
/// `proofValue` (Data-Integrity style).
#[derive(Debug, Default)]
pub struct Ed25519Signature2020Suite;

impl SignatureSuite for Ed25519Signature2020Suite {
    fn suite_id(&self) -> &'static str {
        "Ed25519Signature2020"
    }

    fn key_algorithm(&self) -> KeyAlgorithm {
        KeyAlgorithm::Ed25519
    }

    fn verify(
        &self,
        digest: &[u8],
        proof: &Proof,
        key: &PublicKeyMaterial,
    ) -> Result<bool, CryptoError> {
        check_key_algorithm(self.suite_id(), KeyAlgorithm::Ed25519, key)?;
        let proof_value = proof.proof_value.as_deref().ok_or_else(|| {
            CryptoError::InvalidSignatureEncoding("Ed25519Signature2020 requires proofValue".into())
        })?;
        let signature = decode_multibase_b58(proof_value)?;
        verify_ed25519(digest, &signature, key)
    }
}

/// Ed25519 via detached JWS (`EdDSA`), signature carried in `jws`.
#[derive(Debug, Default)]
pub struct Ed25519Signature2018Suite;

impl SignatureSuite for Ed25519Signature2018Suite {
    fn suite_id(&self) -> &'static str {
        "Ed25519Signature2018"
    }

    fn key_algorithm(&self) -> KeyAlgorithm {
        KeyAlgorithm::Ed25519
    }

    fn verify(
        &self,
        digest: &[u8],
        proof: &Proof,
        key: &PublicKeyMaterial,
    ) -> Result<bool, CryptoError> {
        check_key_algorithm(self.suite_id(), KeyAlgorithm::Ed25519, key)?;
        let jws = proof.jws.as_deref().ok_or_else(|| {
            CryptoError::InvalidSignatureEncoding("Ed25519Signature2018 requires jws".into())
        })?;
        let jws = DetachedJws::parse(jws)?;
        if jws.algorithm != "EdDSA" {
            return Err(CryptoError::InvalidSignatureEncoding(format!(
                "expected EdDSA jws, got {}",
                jws.algorithm
            )));
        }
        let signing_input = jws.signing_input(digest);
        verify_ed25519(&signing_input, &jws.signature, key)
    }
}

/// secp256k1 ECDSA via detached JWS (`ES256K`), r||s signature.
#[derive(Debug, Default)]
pub struct EcdsaSecp256k1Suite;

impl SignatureSuite for EcdsaSecp256k1Suite {
    fn suite_id(&self) -> &'static str {
        "EcdsaSecp256k1Signature2019"
    }

    fn key_algorithm(&self) -> KeyAlgorithm {
        KeyAlgorithm::EcdsaSecp256k1
    }

    fn verify(
        &self,
        digest: &[u8],
        proof: &Proof,
        key: &PublicKeyMaterial,
    ) -> Result<bool, CryptoError> {
        use k256::ecdsa::signature::Verifier;

        check_key_algorithm(self.suite_id(), KeyAlgorithm::EcdsaSecp256k1, key)?;
        let jws = proof.jws.as_deref().ok_or_else(|| {
            CryptoError::InvalidSignatureEncoding("EcdsaSecp256k1Signature2019 requires jws".into())
        })?;
        let jws = DetachedJws::parse(jws)?;
        if jws.algorithm != "ES256K" {
            return Err(CryptoError::InvalidSignatureEncoding(format!(
                "expected ES256K jws, got {}",
                jws.algorithm
            )));
        }

        let verifying_key = k256::ecdsa::VerifyingKey::from_sec1_bytes(&key.bytes)
            .map_err(|e| CryptoError::InvalidKeyMaterial(format!("secp256k1 point: {e}")))?;
        // Out-of-range or wrong-length r||s cannot match anything.
        let Ok(signature) = k256::ecdsa::Signature::from_slice(&jws.signature) else {
            return Ok(false);
        };
        let signing_input = jws.signing_input(digest);
        Ok(verifying_key.verify(&signing_input, &signature).is_ok())
    }
}
